use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use parallax::{
    CpuRenderer, FrameRGBA, ImageStore, ParallaxStage, RedrawQueue, Rgba8Premul, StageSpec,
    play_frames, play_until,
};

#[derive(Parser, Debug)]
#[command(name = "parallax", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the stage at one point in time as a PNG.
    Frame(FrameArgs),
    /// Render consecutive frames at the stage's redraw cadence as numbered PNGs.
    Frames(FramesArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input stage JSON. Image paths resolve relative to its directory.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Animation time in seconds.
    #[arg(long, default_value_t = 0.0)]
    at: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Background color as RRGGBB or RRGGBBAA.
    #[arg(long, default_value = "00000000")]
    background: String,
}

#[derive(Parser, Debug)]
struct FramesArgs {
    /// Input stage JSON. Image paths resolve relative to its directory.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Number of frames to write.
    #[arg(long)]
    count: usize,

    /// Output directory; files are named `frame_00000.png`, `frame_00001.png`, ...
    #[arg(long)]
    out_dir: PathBuf,

    /// Background color as RRGGBB or RRGGBBAA.
    #[arg(long, default_value = "00000000")]
    background: String,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Frames(args) => cmd_frames(args),
    }
}

fn load_stage(in_path: &Path) -> anyhow::Result<ParallaxStage<ImageStore>> {
    let spec = StageSpec::from_path(in_path)?;
    let assets_root = in_path.parent().unwrap_or_else(|| Path::new("."));
    let stage = ParallaxStage::from_spec(spec, ImageStore::new(assets_root))?;
    Ok(stage)
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let background = Rgba8Premul::from_hex(&args.background)?;
    let mut stage = load_stage(&args.in_path)?;
    let mut queue = RedrawQueue::new();

    let frame = play_until(&mut stage, &mut queue, args.at)?;
    let pixels = CpuRenderer::new().render(&frame, background)?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    write_png(&args.out, &pixels)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let background = Rgba8Premul::from_hex(&args.background)?;
    let mut stage = load_stage(&args.in_path)?;
    let mut queue = RedrawQueue::new();
    let mut renderer = CpuRenderer::new();

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    play_frames(&mut stage, &mut queue, args.count, |n, frame| {
        let pixels = renderer.render(frame, background)?;
        let path = args.out_dir.join(format!("frame_{n:05}.png"));
        write_png(&path, &pixels)?;
        Ok(())
    })?;

    eprintln!(
        "wrote {} frames to {}",
        args.count,
        args.out_dir.display()
    );
    Ok(())
}

fn write_png(path: &Path, frame: &FrameRGBA) -> anyhow::Result<()> {
    image::save_buffer_with_format(
        path,
        &frame.to_straight_rgba8(),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))
}
