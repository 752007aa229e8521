use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "sapling", version)]
struct Cli {
    /// Log pipeline progress to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Write a single frame as an SVG document.
    Svg(FrameArgs),
    /// Render every frame as a numbered PNG sequence.
    Render(RenderArgs),
    /// Print the compiled schedule as JSON.
    Plan(PlanArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Output path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output directory for `frame_00000.png`, `frame_00001.png`, ...
    #[arg(long)]
    out_dir: PathBuf,

    /// Render frames in parallel.
    #[arg(long)]
    parallel: bool,

    /// Worker threads for parallel rendering (defaults to the number of cores).
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Parser, Debug)]
struct PlanArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(serde::Serialize)]
struct Plan<'a> {
    fps: sapling::Fps,
    duration: sapling::FrameIndex,
    schedule: &'a sapling::Schedule,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(std::io::stderr)
            .init();
    }
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Svg(args) => cmd_svg(args),
        Command::Render(args) => cmd_render(args),
        Command::Plan(args) => cmd_plan(args),
    }
}

fn read_scene(path: &Path) -> anyhow::Result<sapling::Composition> {
    sapling::load_scene_file(path).with_context(|| format!("load scene '{}'", path.display()))
}

fn make_renderer(in_path: &Path) -> sapling::CpuRenderer {
    let fonts = in_path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join("fonts");
    sapling::CpuRenderer::new(fonts.is_dir().then_some(fonts.as_path()))
}

fn ensure_parent(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let comp = read_scene(&args.in_path)?;
    let mut backend = make_renderer(&args.in_path);
    let frame = sapling::render_frame(&comp, sapling::FrameIndex(args.frame), &mut backend)?;

    ensure_parent(&args.out)?;
    sapling::write_png(&args.out, &frame)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_svg(args: FrameArgs) -> anyhow::Result<()> {
    let comp = read_scene(&args.in_path)?;
    let eval = sapling::Evaluator::eval_frame(&comp, sapling::FrameIndex(args.frame))?;
    let svg = sapling::frame_to_svg(&eval, comp.canvas, comp.background);

    ensure_parent(&args.out)?;
    std::fs::write(&args.out, svg)
        .with_context(|| format!("write svg '{}'", args.out.display()))?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let comp = read_scene(&args.in_path)?;
    let mut backend = make_renderer(&args.in_path);
    let threading = sapling::RenderThreading {
        parallel: args.parallel,
        threads: args.threads,
        ..Default::default()
    };

    let written = sapling::render_to_dir(&comp, &args.out_dir, &mut backend, &threading)?;
    eprintln!(
        "wrote {} frames to {}",
        written.len(),
        args.out_dir.display()
    );
    Ok(())
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let comp = read_scene(&args.in_path)?;
    let plan = Plan {
        fps: comp.fps,
        duration: comp.duration,
        schedule: &comp.schedule,
    };
    let json = serde_json::to_string_pretty(&plan).context("serialize schedule")?;
    println!("{json}");
    Ok(())
}
