use std::collections::HashMap;

use crate::{
    foundation::{
        core::{Affine, Canvas, Rgba8, Vec2},
        error::{GlyphDriftError, GlyphDriftResult},
    },
    render::{
        DrawSurface, FrameRGBA, LabelPaint, TransformStack,
        text::{LabelShaper, ShapedLabel},
    },
};

#[derive(Clone, Debug, Default)]
pub struct SurfaceSettings {
    /// Background for every frame; `None` keeps the overlay transparent.
    pub clear_rgba: Option<Rgba8>,
    /// Font size used to shape labels, in pixels.
    pub font_size_px: f32,
}

/// Rasterizes label draws with `vello_cpu`.
pub struct CpuSurface {
    width: u16,
    height: u16,
    settings: SurfaceSettings,
    ctx: vello_cpu::RenderContext,
    transforms: TransformStack,
    font: vello_cpu::peniko::FontData,
    shaper: LabelShaper,
    labels: HashMap<String, ShapedLabel>,
}

impl CpuSurface {
    pub fn new(
        canvas: Canvas,
        font_bytes: Vec<u8>,
        settings: SurfaceSettings,
    ) -> GlyphDriftResult<Self> {
        let width: u16 = canvas
            .width
            .try_into()
            .map_err(|_| GlyphDriftError::render("surface width exceeds u16"))?;
        let height: u16 = canvas
            .height
            .try_into()
            .map_err(|_| GlyphDriftError::render("surface height exceeds u16"))?;

        let shaper = LabelShaper::new(&font_bytes)?;
        tracing::info!(family = shaper.family_name(), "loaded label font");
        let font = vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(font_bytes), 0);

        let mut surface = Self {
            width,
            height,
            settings,
            ctx: vello_cpu::RenderContext::new(width, height),
            transforms: TransformStack::default(),
            font,
            shaper,
            labels: HashMap::new(),
        };
        surface.begin_frame();
        Ok(surface)
    }

    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: u32::from(self.width),
            height: u32::from(self.height),
        }
    }

    /// Discards pending draws, resets the transform stack and paints the background
    /// as the first fill of the new frame.
    pub fn begin_frame(&mut self) {
        self.ctx = vello_cpu::RenderContext::new(self.width, self.height);
        self.transforms.reset();

        if let Some(bg) = self.settings.clear_rgba {
            self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            self.ctx
                .set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
            self.ctx.set_paint(color_to_cpu(bg));
            self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                0.0,
                0.0,
                f64::from(self.width),
                f64::from(self.height),
            ));
        }
    }

    /// Rasterizes everything drawn since `begin_frame` into a premultiplied frame.
    pub fn finish_frame(&mut self) -> GlyphDriftResult<FrameRGBA> {
        if self.transforms.depth() != 0 {
            return Err(GlyphDriftError::render(format!(
                "frame finished with {} unrestored transform scope(s)",
                self.transforms.depth()
            )));
        }

        // Starts transparent; the background, if any, is the frame's first fill.
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);

        Ok(FrameRGBA {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }
}

impl DrawSurface for CpuSurface {
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
        if paint.fill.a == 0 && paint.stroke.a == 0 {
            return Ok(());
        }

        let shaped = match self.labels.entry(label.to_owned()) {
            std::collections::hash_map::Entry::Occupied(e) => e.into_mut(),
            std::collections::hash_map::Entry::Vacant(e) => {
                e.insert(self.shaper.shape(label, self.settings.font_size_px)?)
            }
        };

        let centered = self.transforms.current()
            * Affine::translate(Vec2::new(-shaped.width / 2.0, -shaped.height / 2.0));
        self.ctx.set_transform(affine_to_cpu(centered));
        self.ctx
            .set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);

        let glyphs = || {
            shaped.glyphs.iter().map(|g| vello_cpu::Glyph {
                id: g.id,
                x: g.x,
                y: g.y,
            })
        };

        if paint.fill.a > 0 {
            self.ctx.set_paint(color_to_cpu(paint.fill));
            self.ctx
                .glyph_run(&self.font)
                .font_size(shaped.font_size)
                .fill_glyphs(glyphs());
        }

        if paint.stroke.a > 0 && paint.stroke_width > 0.0 {
            self.ctx
                .set_stroke(vello_cpu::kurbo::Stroke::new(paint.stroke_width));
            self.ctx.set_paint(color_to_cpu(paint.stroke));
            self.ctx
                .glyph_run(&self.font)
                .font_size(shaped.font_size)
                .stroke_glyphs(glyphs());
        }

        Ok(())
    }
}

fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

#[cfg(test)]
const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
    "C:\\Windows\\Fonts\\arialbd.ttf",
];

#[cfg(test)]
pub(crate) fn system_font() -> Option<Vec<u8>> {
    FONT_CANDIDATES.iter().find_map(|p| std::fs::read(p).ok())
}
