use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "glyphdrift", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the overlay as a numbered PNG sequence.
    Frames(FramesArgs),
    /// Run the animation headless and report population statistics.
    Simulate(SimulateArgs),
}

#[derive(Parser, Debug)]
struct SceneArgs {
    /// Overlay configuration JSON (defaults are used for missing fields).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Canvas width in pixels.
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Canvas height in pixels.
    #[arg(long, default_value_t = 720)]
    height: u32,

    /// Random seed; overrides the configuration's seed.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Parser, Debug)]
struct FramesArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// TrueType/OpenType font used for the label.
    #[arg(long)]
    font: PathBuf,

    /// Output directory for frame_NNNNN.png files.
    #[arg(long)]
    out: PathBuf,

    /// Number of frames to render.
    #[arg(long, default_value_t = 120)]
    count: u64,

    /// Opaque background color (#RRGGBB); transparent when omitted.
    #[arg(long)]
    background: Option<String>,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Number of ticks to run.
    #[arg(long, default_value_t = 600)]
    ticks: u64,

    /// Log statistics every N ticks.
    #[arg(long, default_value_t = 60)]
    report_every: u64,

    /// Print the final population as JSON on stdout.
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frames(args) => cmd_frames(args),
        Command::Simulate(args) => cmd_simulate(args),
    }
}

fn load_population(scene: &SceneArgs) -> anyhow::Result<glyphdrift::PathPopulation> {
    let mut config = match &scene.config {
        Some(path) => glyphdrift::OverlayConfig::from_json_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => glyphdrift::OverlayConfig::default(),
    };
    if let Some(seed) = scene.seed {
        config.seed = Some(seed);
    }

    let canvas = glyphdrift::Canvas::new(scene.width, scene.height)?;
    Ok(glyphdrift::PathPopulation::new(config, canvas)?)
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let population = load_population(&args.scene)?;

    let clear_rgba = args
        .background
        .as_deref()
        .map(glyphdrift::Rgba8::parse_hex)
        .transpose()
        .context("parse --background")?;
    let font_bytes = std::fs::read(&args.font)
        .with_context(|| format!("read font '{}'", args.font.display()))?;
    let settings = glyphdrift::SurfaceSettings {
        clear_rgba,
        font_size_px: population.config().glyph_size as f32,
    };
    let surface = glyphdrift::CpuSurface::new(population.canvas(), font_bytes, settings)?;

    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("create output dir '{}'", args.out.display()))?;

    let mut runner = glyphdrift::OverlayRunner::new(population, surface);
    runner.render_sequence(args.count, |idx, frame| {
        write_png(&args.out, idx, frame).map_err(glyphdrift::GlyphDriftError::Other)
    })?;

    eprintln!("wrote {} frames to {}", args.count, args.out.display());
    Ok(())
}

fn write_png(
    dir: &Path,
    idx: glyphdrift::FrameIndex,
    frame: glyphdrift::FrameRGBA,
) -> anyhow::Result<()> {
    let path = dir.join(format!("frame_{:05}.png", idx.0));
    let frame = frame.into_straight();
    image::save_buffer_with_format(
        &path,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    let population = load_population(&args.scene)?;
    let mut runner =
        glyphdrift::OverlayRunner::new(population, glyphdrift::RecordingSurface::new());

    let report_every = args.report_every.max(1);
    let mut spawned = 0u64;
    let mut reaped = 0u64;
    let mut peak_live = 0usize;
    for _ in 0..args.ticks {
        let report = runner.step()?;
        spawned += u64::from(report.spawned);
        reaped += report.reaped as u64;
        peak_live = peak_live.max(report.live);
        runner.surface_mut().take_draws();

        let frame = runner.frame();
        if frame.0 % report_every == 0 {
            tracing::info!(
                frame = frame.0,
                live = report.live,
                glyphs = report.drawn_glyphs,
                spawned,
                reaped,
                "population"
            );
        }
    }

    tracing::info!(ticks = args.ticks, spawned, reaped, peak_live, "simulation finished");

    if args.json {
        let stdout = std::io::stdout();
        serde_json::to_writer_pretty(stdout.lock(), runner.population().paths())
            .context("write population JSON")?;
        println!();
    }
    Ok(())
}
