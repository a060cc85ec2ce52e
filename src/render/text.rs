use crate::foundation::error::{GlyphDriftError, GlyphDriftResult};

/// Brush type threaded through Parley layouts. Paint is chosen per draw, so the
/// layout itself carries no color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct NoBrush;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapedGlyph {
    pub id: u32,
    pub x: f32,
    pub y: f32,
}

/// A label laid out once and reused for every draw.
#[derive(Clone, Debug)]
pub struct ShapedLabel {
    pub glyphs: Vec<ShapedGlyph>,
    pub font_size: f32,
    pub width: f64,
    pub height: f64,
}

/// Stateful helper for shaping labels with Parley from raw font bytes.
pub struct LabelShaper {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<NoBrush>,
    family_name: String,
}

impl LabelShaper {
    /// Registers `font_bytes` and remembers its primary family.
    pub fn new(font_bytes: &[u8]) -> GlyphDriftResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            GlyphDriftError::validation("no font families registered from font bytes")
        })?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| GlyphDriftError::validation("registered font family has no name"))?
            .to_string();

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
        })
    }

    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    pub fn shape(&mut self, text: &str, size_px: f32) -> GlyphDriftResult<ShapedLabel> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(GlyphDriftError::validation(
                "label size_px must be finite and > 0",
            ));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::FontWeight(
            parley::style::FontWeight::BOLD,
        ));

        let mut layout: parley::Layout<NoBrush> = builder.build(text);
        layout.break_all_lines(None);

        let mut glyphs = Vec::new();
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                glyphs.extend(run.positioned_glyphs().map(|g| ShapedGlyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                }));
            }
        }

        tracing::debug!(text, glyphs = glyphs.len(), "shaped label");
        Ok(ShapedLabel {
            glyphs,
            font_size: size_px,
            width: f64::from(layout.width()),
            height: f64::from(layout.height()),
        })
    }
}
