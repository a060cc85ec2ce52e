use std::path::Path;

use rand::Rng;

use crate::{
    animation::ease::Ease,
    foundation::core::Rgba8,
    foundation::error::{GlyphDriftError, GlyphDriftResult},
};

/// Distance between consecutive glyphs along a path, as a multiple of the glyph size.
pub const GLYPH_SPACING_FACTOR: f64 = 1.5;

/// A `min`/`max` pair drawn from once per path.
///
/// Integer spans are inclusive of both ends, float spans are half-open (`max` is never
/// produced unless `min == max`).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Span<T> {
    pub min: T,
    pub max: T,
}

impl<T> Span<T> {
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }
}

impl Span<f64> {
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        if self.max > self.min {
            rng.gen_range(self.min..self.max)
        } else {
            self.min
        }
    }

    fn check(&self, name: &str) -> GlyphDriftResult<()> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(GlyphDriftError::validation(format!(
                "{name} bounds must be finite"
            )));
        }
        if self.min > self.max {
            return Err(GlyphDriftError::validation(format!(
                "{name} min must be <= max"
            )));
        }
        Ok(())
    }
}

impl Span<u32> {
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        if self.max > self.min {
            rng.gen_range(self.min..=self.max)
        } else {
            self.min
        }
    }

    fn check(&self, name: &str) -> GlyphDriftResult<()> {
        if self.min > self.max {
            return Err(GlyphDriftError::validation(format!(
                "{name} min must be <= max"
            )));
        }
        Ok(())
    }
}

/// Random-walk and interpolation settings for path generation.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CurveParams {
    /// Number of control points in the random walk (inclusive).
    pub control_points: Span<u32>,
    /// Distance between consecutive control points, in pixels.
    pub step_distance: Span<f64>,
    /// Fraction of the canvas kept free on each side when picking the start point.
    pub edge_margin: f64,
    /// Parameter intervals per Catmull-Rom segment; each segment yields one more sample.
    pub samples_per_segment: u32,
}

impl Default for CurveParams {
    fn default() -> Self {
        Self {
            control_points: Span::new(3, 5),
            step_distance: Span::new(100.0, 300.0),
            edge_margin: 0.1,
            samples_per_segment: 20,
        }
    }
}

/// Everything that shapes the overlay. All fields have defaults, so partial JSON
/// documents are accepted.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OverlayConfig {
    pub label: String,
    pub glyph_size: f64,
    pub color: Rgba8,
    pub stroke_width: f64,
    pub max_paths: usize,
    /// Frames between spawn attempts.
    pub spawn_interval: u64,
    pub fade_in_frames: u32,
    pub fade_out_frames: u32,
    pub fade_ease: Ease,
    /// Peak opacity on the 0..=255 alpha scale.
    pub peak_opacity: Span<f64>,
    pub lifespan_frames: Span<u32>,
    pub curve: CurveParams,
    /// Seed for the shared random source; `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            label: "NYU".to_string(),
            glyph_size: 18.0,
            color: Rgba8::rgb(0x8b, 0x5f, 0xbf),
            stroke_width: 0.5,
            max_paths: 40,
            spawn_interval: 3,
            fade_in_frames: 30,
            fade_out_frames: 60,
            fade_ease: Ease::Linear,
            peak_opacity: Span::new(150.0, 255.0),
            lifespan_frames: Span::new(180, 300),
            curve: CurveParams::default(),
            seed: None,
        }
    }
}

impl OverlayConfig {
    pub fn from_json_str(s: &str) -> GlyphDriftResult<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_path(path: &Path) -> GlyphDriftResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn glyph_spacing(&self) -> f64 {
        self.glyph_size * GLYPH_SPACING_FACTOR
    }

    pub fn validate(&self) -> GlyphDriftResult<()> {
        if self.label.trim().is_empty() {
            return Err(GlyphDriftError::validation("label must not be empty"));
        }
        if !self.glyph_size.is_finite() || self.glyph_size <= 0.0 {
            return Err(GlyphDriftError::validation(
                "glyph_size must be finite and > 0",
            ));
        }
        if !self.stroke_width.is_finite() || self.stroke_width < 0.0 {
            return Err(GlyphDriftError::validation(
                "stroke_width must be finite and >= 0",
            ));
        }
        if self.spawn_interval == 0 {
            return Err(GlyphDriftError::validation("spawn_interval must be > 0"));
        }
        if self.fade_in_frames == 0 || self.fade_out_frames == 0 {
            return Err(GlyphDriftError::validation(
                "fade_in_frames and fade_out_frames must be > 0",
            ));
        }

        self.peak_opacity.check("peak_opacity")?;
        if self.peak_opacity.min < 0.0 || self.peak_opacity.max > 255.0 {
            return Err(GlyphDriftError::validation(
                "peak_opacity must lie within 0..=255",
            ));
        }
        self.lifespan_frames.check("lifespan_frames")?;
        if self.lifespan_frames.min == 0 {
            return Err(GlyphDriftError::validation("lifespan_frames must be > 0"));
        }

        let curve = &self.curve;
        curve.control_points.check("curve.control_points")?;
        if curve.control_points.min < 2 {
            return Err(GlyphDriftError::validation(
                "curve.control_points must be >= 2",
            ));
        }
        curve.step_distance.check("curve.step_distance")?;
        if curve.step_distance.min < 0.0 {
            return Err(GlyphDriftError::validation(
                "curve.step_distance must be >= 0",
            ));
        }
        if !(0.0..0.5).contains(&curve.edge_margin) {
            return Err(GlyphDriftError::validation(
                "curve.edge_margin must lie within [0, 0.5)",
            ));
        }
        if curve.samples_per_segment == 0 {
            return Err(GlyphDriftError::validation(
                "curve.samples_per_segment must be > 0",
            ));
        }
        Ok(())
    }
}
