use crate::{
    foundation::{core::FrameIndex, error::GlyphDriftResult},
    population::{PathPopulation, TickReport},
    render::{DrawSurface, FrameRGBA, cpu::CpuSurface},
};

/// Drives a population frame by frame against one surface.
///
/// Frames are numbered from 1, so the first spawn happens on the first frame that is
/// a multiple of the spawn interval.
pub struct OverlayRunner<S> {
    population: PathPopulation,
    surface: S,
    frame: FrameIndex,
}

impl<S: DrawSurface> OverlayRunner<S> {
    pub fn new(population: PathPopulation, surface: S) -> Self {
        Self {
            population,
            surface,
            frame: FrameIndex(0),
        }
    }

    pub fn population(&self) -> &PathPopulation {
        &self.population
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Index of the last frame stepped, `FrameIndex(0)` before the first one.
    pub fn frame(&self) -> FrameIndex {
        self.frame
    }

    /// Advances the frame counter and ticks the population once.
    pub fn step(&mut self) -> GlyphDriftResult<TickReport> {
        self.frame = self.frame.next();
        self.population.tick(self.frame, &mut self.surface)
    }
}

impl OverlayRunner<CpuSurface> {
    pub fn render_next(&mut self) -> GlyphDriftResult<(FrameIndex, FrameRGBA)> {
        self.surface.begin_frame();
        self.step()?;
        let frame = self.surface.finish_frame()?;
        Ok((self.frame, frame))
    }

    /// Renders `count` consecutive frames, handing each one to `sink`.
    #[tracing::instrument(skip(self, sink))]
    pub fn render_sequence(
        &mut self,
        count: u64,
        mut sink: impl FnMut(FrameIndex, FrameRGBA) -> GlyphDriftResult<()>,
    ) -> GlyphDriftResult<()> {
        for _ in 0..count {
            let (idx, frame) = self.render_next()?;
            sink(idx, frame)?;
        }
        tracing::info!(
            frames = count,
            live = self.population.len(),
            "rendered sequence"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::OverlayConfig,
        foundation::{
            core::{Canvas, Rgba8},
            error::GlyphDriftError,
        },
        render::{
            cpu::{SurfaceSettings, system_font},
            recording::RecordingSurface,
        },
    };
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn steps_number_frames_from_one() {
        let pop = PathPopulation::with_rng(
            OverlayConfig::default(),
            Canvas::new(640, 480).unwrap(),
            ChaCha8Rng::seed_from_u64(0),
        )
        .unwrap();
        let mut runner = OverlayRunner::new(pop, RecordingSurface::new());
        assert_eq!(runner.frame(), FrameIndex(0));

        assert!(!runner.step().unwrap().spawned);
        assert!(!runner.step().unwrap().spawned);
        let third = runner.step().unwrap();
        assert!(third.spawned);
        assert_eq!(runner.frame(), FrameIndex(3));
        assert_eq!(runner.population().len(), 1);
        assert_eq!(runner.surface().draws().len(), third.drawn_glyphs);
        runner.surface_mut().take_draws();
    }

    #[test]
    fn render_sequence_hands_numbered_frames_over_background() {
        let Some(font) = system_font() else {
            return;
        };
        let bg = [0x10, 0x20, 0x30, 0xff];
        let config = OverlayConfig {
            spawn_interval: 1,
            ..OverlayConfig::default()
        };
        let canvas = Canvas::new(320, 240).unwrap();
        let pop = PathPopulation::with_rng(config, canvas, ChaCha8Rng::seed_from_u64(8)).unwrap();
        let surface = CpuSurface::new(
            canvas,
            font,
            SurfaceSettings {
                clear_rgba: Some(Rgba8::rgb(0x10, 0x20, 0x30)),
                font_size_px: 18.0,
            },
        )
        .unwrap();
        let mut runner = OverlayRunner::new(pop, surface);

        let mut frames = Vec::new();
        runner
            .render_sequence(12, |idx, frame| {
                frames.push((idx, frame));
                Ok(())
            })
            .unwrap();

        let indices: Vec<u64> = frames.iter().map(|(idx, _)| idx.0).collect();
        assert_eq!(indices, (1..=12).collect::<Vec<_>>());
        assert_eq!(runner.frame(), FrameIndex(12));

        for (_, frame) in &frames {
            assert!(frame.premultiplied);
            assert_eq!((frame.width, frame.height), (320, 240));
            assert_eq!(frame.data.len(), 320 * 240 * 4);
            assert!(frame.data.chunks_exact(4).all(|px| px[3] == 0xff));
        }

        let (_, last) = &frames[11];
        let pixels = last.data.len() / 4;
        let background = last.data.chunks_exact(4).filter(|px| *px == bg).count();
        assert!(background > 0, "background missing");
        assert!(background < pixels, "no label pixels");
    }

    #[test]
    fn sink_error_stops_the_sequence() {
        let Some(font) = system_font() else {
            return;
        };
        let canvas = Canvas::new(64, 64).unwrap();
        let pop = PathPopulation::with_rng(
            OverlayConfig::default(),
            canvas,
            ChaCha8Rng::seed_from_u64(1),
        )
        .unwrap();
        let settings = SurfaceSettings {
            clear_rgba: None,
            font_size_px: 18.0,
        };
        let surface = CpuSurface::new(canvas, font, settings).unwrap();
        let mut runner = OverlayRunner::new(pop, surface);

        let mut seen = 0;
        let err = runner.render_sequence(5, |idx, _| {
            seen += 1;
            if idx == FrameIndex(2) {
                return Err(GlyphDriftError::render("sink full"));
            }
            Ok(())
        });
        assert!(err.is_err());
        assert_eq!(seen, 2);
        assert_eq!(runner.frame(), FrameIndex(2));
    }
}
