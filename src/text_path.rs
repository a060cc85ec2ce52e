use std::sync::Arc;

use rand::Rng;

use crate::{
    animation::envelope::FadeEnvelope,
    config::OverlayConfig,
    curve::{
        arc_length::{point_at_distance, polyline_length},
        catmull_rom::{generate_curve_points, interpolate},
    },
    foundation::{
        core::{Canvas, Point, Rgba8, Vec2},
        error::GlyphDriftResult,
        math::sin_deg,
    },
    render::{DrawSurface, LabelPaint, with_saved_state},
};

/// Per-glyph rotation jitter is drawn from `-JITTER_RANGE..JITTER_RANGE`.
const JITTER_RANGE: f64 = 3.0;
/// Degrees of extra rotation per unit of jitter.
const JITTER_ROTATION_DEG: f64 = 0.1;
/// Vertical bob: amplitude in pixels, angular speed in degrees per frame.
const WOBBLE_AMPLITUDE: f64 = 2.0;
const WOBBLE_SPEED_DEG: f64 = 3.0;
/// Size pulse: relative amplitude, angular speed in degrees per frame.
const PULSE_AMPLITUDE: f64 = 0.1;
const PULSE_SPEED_DEG: f64 = 2.0;
/// Outline alpha relative to fill alpha.
const STROKE_ALPHA_FACTOR: f64 = 0.5;

/// One instance of the label placed along a path.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct GlyphPlacement {
    pub position: Point,
    /// Radians.
    pub tangent_angle: f64,
    pub jitter_offset: f64,
    /// Oscillator phase offset drawn from `0..TAU`. It is added as-is to the
    /// degree-valued oscillator angle, so it shifts wobble and pulse by at most
    /// about 6.3 degrees.
    pub phase: f64,
}

impl GlyphPlacement {
    /// Vertical offset in pixels at `age`.
    pub fn wobble(&self, age: u32) -> f64 {
        sin_deg(f64::from(age) * WOBBLE_SPEED_DEG + self.phase) * WOBBLE_AMPLITUDE
    }

    /// Uniform scale factor at `age`.
    pub fn pulse(&self, age: u32) -> f64 {
        1.0 + sin_deg(f64::from(age) * PULSE_SPEED_DEG + self.phase) * PULSE_AMPLITUDE
    }

    /// Rotation in radians: the path tangent plus this glyph's fixed jitter.
    pub fn rotation(&self) -> f64 {
        self.tangent_angle + (self.jitter_offset * JITTER_ROTATION_DEG).to_radians()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PathState {
    /// Created, glyphs not placed yet.
    Uninitialized,
    Active,
}

/// A single animated curve carrying repeated label glyphs.
#[derive(Clone, Debug, serde::Serialize)]
pub struct TextPath {
    points: Vec<Point>,
    glyphs: Vec<GlyphPlacement>,
    #[serde(skip)]
    label: Arc<str>,
    color: Rgba8,
    stroke_width: f64,
    spacing: f64,
    envelope: FadeEnvelope,
    age: u32,
    opacity: f64,
    total_length: f64,
    #[serde(skip)]
    state: PathState,
}

impl TextPath {
    /// A new path on a random curve inside `canvas`.
    pub fn spawn<R: Rng + ?Sized>(canvas: Canvas, config: &OverlayConfig, rng: &mut R) -> Self {
        let points = generate_curve_points(canvas, &config.curve, rng);
        Self::from_points(points, config, rng)
    }

    /// A new path interpolated through an explicit control polygon.
    pub fn from_control_points<R: Rng + ?Sized>(
        control: &[Point],
        config: &OverlayConfig,
        rng: &mut R,
    ) -> Self {
        let points = interpolate(control, config.curve.samples_per_segment);
        Self::from_points(points, config, rng)
    }

    fn from_points<R: Rng + ?Sized>(
        points: Vec<Point>,
        config: &OverlayConfig,
        rng: &mut R,
    ) -> Self {
        let peak = config.peak_opacity.sample(rng);
        let lifespan = config.lifespan_frames.sample(rng);
        Self {
            points,
            glyphs: Vec::new(),
            label: Arc::from(config.label.as_str()),
            color: config.color,
            stroke_width: config.stroke_width,
            spacing: config.glyph_spacing(),
            envelope: FadeEnvelope {
                fade_in: config.fade_in_frames,
                fade_out: config.fade_out_frames,
                lifespan,
                peak,
                ease: config.fade_ease,
            },
            age: 0,
            opacity: 0.0,
            total_length: 0.0,
            state: PathState::Uninitialized,
        }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn glyphs(&self) -> &[GlyphPlacement] {
        &self.glyphs
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn color(&self) -> Rgba8 {
        self.color
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn lifespan(&self) -> u32 {
        self.envelope.lifespan
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    pub fn peak_opacity(&self) -> f64 {
        self.envelope.peak
    }

    /// Polyline length measured when the glyphs were placed; zero before that.
    pub fn total_length(&self) -> f64 {
        self.total_length
    }

    pub fn is_initialized(&self) -> bool {
        self.state == PathState::Active
    }

    /// Advances one frame: ages the path, places glyphs on the first call and
    /// recomputes opacity.
    pub fn update<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.age = self.age.saturating_add(1);
        if self.state == PathState::Uninitialized {
            self.place_glyphs(rng);
            self.state = PathState::Active;
        }
        self.opacity = self.envelope.opacity_at(self.age);
    }

    fn place_glyphs<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.total_length = polyline_length(&self.points);
        if self.spacing <= 0.0 || !self.total_length.is_finite() {
            return;
        }

        let count = (self.total_length / self.spacing).floor() as usize;
        self.glyphs.reserve(count);
        for i in 0..count {
            let Some(sample) = point_at_distance(&self.points, i as f64 * self.spacing) else {
                continue;
            };
            self.glyphs.push(GlyphPlacement {
                position: sample.position,
                tangent_angle: sample.tangent_angle,
                jitter_offset: rng.gen_range(-JITTER_RANGE..JITTER_RANGE),
                phase: rng.gen_range(0.0..std::f64::consts::TAU),
            });
        }
        tracing::trace!(
            length = self.total_length,
            glyphs = self.glyphs.len(),
            "placed glyphs"
        );
    }

    /// Draws every glyph in its own transform scope.
    pub fn render<S: DrawSurface + ?Sized>(&self, surface: &mut S) -> GlyphDriftResult<()> {
        if self.glyphs.is_empty() {
            return Ok(());
        }

        let paint = LabelPaint {
            fill: self.color.with_alpha(self.opacity),
            stroke: self.color.with_alpha(self.opacity * STROKE_ALPHA_FACTOR),
            stroke_width: self.stroke_width,
        };

        for glyph in &self.glyphs {
            with_saved_state(surface, |s| {
                s.translate(Vec2::new(
                    glyph.position.x,
                    glyph.position.y + glyph.wobble(self.age),
                ));
                s.rotate(glyph.rotation());
                s.scale(glyph.pulse(self.age));
                s.draw_label(&self.label, &paint)
            })?;
        }
        Ok(())
    }

    /// Fully faded after having been shown.
    pub fn is_expired(&self) -> bool {
        self.opacity <= 0.0 && self.age >= 1
    }
}
