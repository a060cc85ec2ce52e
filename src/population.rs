use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::{
    config::OverlayConfig,
    foundation::{
        core::{Canvas, FrameIndex},
        error::GlyphDriftResult,
    },
    render::DrawSurface,
    text_path::TextPath,
};

/// What one [`PathPopulation::tick`] did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct TickReport {
    pub spawned: bool,
    pub drawn_glyphs: usize,
    pub reaped: usize,
    pub live: usize,
}

/// The live set of text paths and the random source they all draw from.
pub struct PathPopulation<R = ChaCha8Rng> {
    config: OverlayConfig,
    canvas: Canvas,
    rng: R,
    paths: Vec<TextPath>,
}

impl PathPopulation<ChaCha8Rng> {
    /// Validates `config` and seeds the random source from `config.seed`, or from
    /// the OS when no seed is set.
    pub fn new(config: OverlayConfig, canvas: Canvas) -> GlyphDriftResult<Self> {
        let seed = config.seed.unwrap_or_else(rand::random);
        tracing::info!(seed, width = canvas.width, height = canvas.height, "seeded population");
        Self::with_rng(config, canvas, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> PathPopulation<R> {
    pub fn with_rng(config: OverlayConfig, canvas: Canvas, rng: R) -> GlyphDriftResult<Self> {
        config.validate()?;
        let paths = Vec::with_capacity(config.max_paths);
        Ok(Self {
            config,
            canvas,
            rng,
            paths,
        })
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Bounds for paths spawned from now on. Live paths keep their geometry.
    pub fn set_canvas(&mut self, canvas: Canvas) {
        self.canvas = canvas;
    }

    pub fn paths(&self) -> &[TextPath] {
        &self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn clear(&mut self) {
        self.paths.clear();
    }

    /// One animation frame: maybe spawn, then update every path, draw every path, and
    /// drop the ones that have faded out.
    ///
    /// A draw error is returned only after the whole frame has run, so the population
    /// stays consistent either way.
    #[tracing::instrument(level = "debug", skip_all, fields(frame = frame.0))]
    pub fn tick<S: DrawSurface + ?Sized>(
        &mut self,
        frame: FrameIndex,
        surface: &mut S,
    ) -> GlyphDriftResult<TickReport> {
        let mut report = TickReport::default();

        if frame.0 % self.config.spawn_interval == 0 && self.paths.len() < self.config.max_paths {
            let path = TextPath::spawn(self.canvas, &self.config, &mut self.rng);
            tracing::debug!(
                points = path.points().len(),
                lifespan = path.lifespan(),
                "spawned path"
            );
            self.paths.push(path);
            report.spawned = true;
        }

        for path in &mut self.paths {
            path.update(&mut self.rng);
        }

        // A failed draw does not stop the frame: every path is drawn and the reap
        // still runs, then the first error is reported.
        let mut first_err = None;
        for path in &self.paths {
            match path.render(surface) {
                Ok(()) => report.drawn_glyphs += path.glyphs().len(),
                Err(err) => {
                    tracing::warn!(error = %err, "path draw failed");
                    first_err.get_or_insert(err);
                }
            }
        }

        let before = self.paths.len();
        self.paths.retain(|p| !p.is_expired());
        report.reaped = before - self.paths.len();
        report.live = self.paths.len();
        if report.reaped > 0 {
            tracing::debug!(reaped = report.reaped, live = report.live, "reaped paths");
        }

        match first_err {
            Some(err) => Err(err),
            None => Ok(report),
        }
    }
}
