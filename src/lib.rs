//! glyphdrift renders a decorative text overlay: short-lived smooth curves carrying a
//! repeated label that fades in, bobs along the curve and fades out.
//!
//! # Frame loop
//!
//! 1. **Spawn**: every `spawn_interval` frames, while below `max_paths`, a [`TextPath`]
//!    is created on a random Catmull-Rom curve.
//! 2. **Update**: each path ages one frame; on its first update glyph placements are
//!    resampled along the curve by arc length.
//! 3. **Draw**: each glyph is drawn through a [`DrawSurface`] inside its own
//!    transform scope.
//! 4. **Reap**: paths whose opacity has fallen back to zero are dropped.
//!
//! All randomness comes from the single generator owned by [`PathPopulation`], so a
//! fixed seed replays the same animation.
#![forbid(unsafe_code)]

mod animation;
mod config;
mod curve;
mod foundation;
mod pipeline;
mod population;
mod render;
mod text_path;

pub use animation::ease::Ease;
pub use animation::envelope::FadeEnvelope;
pub use config::{CurveParams, GLYPH_SPACING_FACTOR, OverlayConfig, Span};
pub use curve::arc_length::{PathSample, point_at_distance, polyline_length};
pub use curve::catmull_rom::{
    catmull_rom, catmull_rom_point, generate_curve_points, interpolate, random_control_polygon,
};
pub use foundation::core::{Affine, Canvas, FrameIndex, Point, Rect, Rgba8, Vec2};
pub use foundation::error::{GlyphDriftError, GlyphDriftResult};
pub use foundation::math::{lerp, unpremultiply_rgba8};
pub use pipeline::OverlayRunner;
pub use population::{PathPopulation, TickReport};
pub use render::cpu::{CpuSurface, SurfaceSettings};
pub use render::recording::{LabelDraw, RecordingSurface};
pub use render::text::{LabelShaper, ShapedGlyph, ShapedLabel};
pub use render::{DrawSurface, FrameRGBA, LabelPaint, TransformStack, with_saved_state};
pub use text_path::{GlyphPlacement, TextPath};
