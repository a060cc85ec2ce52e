use crate::{
    foundation::{
        core::{Affine, Point, Vec2},
        error::GlyphDriftResult,
    },
    render::{DrawSurface, LabelPaint, TransformStack},
};

/// One `draw_label` call as seen by a [`RecordingSurface`].
#[derive(Clone, Debug, PartialEq)]
pub struct LabelDraw {
    pub label: String,
    /// Absolute transform in effect for the draw.
    pub transform: Affine,
    pub paint: LabelPaint,
}

impl LabelDraw {
    /// Where the label's center lands on the canvas.
    pub fn origin(&self) -> Point {
        self.transform * Point::ORIGIN
    }
}

/// Surface that keeps draw calls instead of rasterizing them.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    transforms: TransformStack,
    draws: Vec<LabelDraw>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draws(&self) -> &[LabelDraw] {
        &self.draws
    }

    pub fn take_draws(&mut self) -> Vec<LabelDraw> {
        std::mem::take(&mut self.draws)
    }

    pub fn depth(&self) -> usize {
        self.transforms.depth()
    }

    pub fn transform(&self) -> Affine {
        self.transforms.current()
    }
}

impl DrawSurface for RecordingSurface {
    fn save(&mut self) {
        self.transforms.save();
    }

    fn restore(&mut self) {
        self.transforms.restore();
    }

    fn translate(&mut self, offset: Vec2) {
        self.transforms.translate(offset);
    }

    fn rotate(&mut self, radians: f64) {
        self.transforms.rotate(radians);
    }

    fn scale(&mut self, factor: f64) {
        self.transforms.scale(factor);
    }

    fn draw_label(&mut self, label: &str, paint: &LabelPaint) -> GlyphDriftResult<()> {
        self.draws.push(LabelDraw {
            label: label.to_owned(),
            transform: self.transforms.current(),
            paint: *paint,
        });
        Ok(())
    }
}
