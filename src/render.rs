pub mod cpu;
pub mod recording;
pub mod text;

use crate::foundation::{
    core::{Affine, Rgba8, Vec2},
    error::GlyphDriftResult,
};

#[derive(Clone, Debug)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Converts to straight alpha in place, as expected by image encoders.
    pub fn into_straight(mut self) -> Self {
        if self.premultiplied {
            crate::foundation::math::unpremultiply_rgba8(&mut self.data);
            self.premultiplied = false;
        }
        self
    }
}

/// Fill and outline colors for one label draw. Alphas are already applied.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabelPaint {
    pub fill: Rgba8,
    pub stroke: Rgba8,
    pub stroke_width: f64,
}

/// Immediate-mode 2D target with a canvas-style transform stack.
///
/// Transform operations post-multiply the current transform, so the last one applied
/// acts first on drawn geometry.
pub trait DrawSurface {
    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, offset: Vec2);
    fn rotate(&mut self, radians: f64);
    fn scale(&mut self, factor: f64);

    /// Draws `label` centered on the current origin.
    fn draw_label(&mut self, label: &str, paint: &LabelPaint) -> GlyphDriftResult<()>;
}

/// Runs `f` inside a save/restore pair. The restore happens even when `f` fails.
pub fn with_saved_state<S, T>(
    surface: &mut S,
    f: impl FnOnce(&mut S) -> GlyphDriftResult<T>,
) -> GlyphDriftResult<T>
where
    S: DrawSurface + ?Sized,
{
    surface.save();
    let out = f(surface);
    surface.restore();
    out
}

/// Current transform plus the saved ones beneath it.
#[derive(Clone, Debug)]
pub struct TransformStack {
    current: Affine,
    saved: Vec<Affine>,
}

impl Default for TransformStack {
    fn default() -> Self {
        Self {
            current: Affine::IDENTITY,
            saved: Vec::new(),
        }
    }
}

impl TransformStack {
    pub fn current(&self) -> Affine {
        self.current
    }

    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    pub fn save(&mut self) {
        self.saved.push(self.current);
    }

    /// Pops the last saved transform. Unbalanced restores leave the transform as is.
    pub fn restore(&mut self) {
        match self.saved.pop() {
            Some(prev) => self.current = prev,
            None => tracing::warn!("restore without matching save"),
        }
    }

    pub fn reset(&mut self) {
        self.current = Affine::IDENTITY;
        self.saved.clear();
    }

    pub fn translate(&mut self, offset: Vec2) {
        self.current *= Affine::translate(offset);
    }

    pub fn rotate(&mut self, radians: f64) {
        self.current *= Affine::rotate(radians);
    }

    pub fn scale(&mut self, factor: f64) {
        self.current *= Affine::scale(factor);
    }
}
