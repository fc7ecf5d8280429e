use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use lottie_loader::{Loader, SchedulerOpts, TaskScheduler};

#[derive(Parser, Debug)]
#[command(name = "lottie-loader", version)]
struct Cli {
    /// Log loader activity to stderr.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the document header.
    Info(LoadArgs),
    /// List timeline markers as `name<TAB>begin<TAB>end`.
    Markers(LoadArgs),
    /// Evaluate one frame and print the scene as JSON.
    Frame(FrameArgs),
}

#[derive(Parser, Debug)]
struct LoadArgs {
    /// Input Lottie JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Worker threads; `0` parses and evaluates on the main thread.
    #[arg(long, default_value_t = 1)]
    threads: usize,

    /// Slot override payload (JSON file) applied after loading.
    #[arg(long)]
    slots: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    load: LoadArgs,

    /// Frame number, relative to the segment start.
    #[arg(long, default_value_t = 0.0)]
    frame: f32,

    /// Restrict the timeline to the named marker first.
    #[arg(long)]
    marker: Option<String>,

    /// Blend towards this frame instead of seeking exactly.
    #[arg(long)]
    tween_to: Option<f32>,

    /// Tween progress in `[0, 1]`.
    #[arg(long, default_value_t = 0.5, requires = "tween_to")]
    progress: f32,

    /// Output width; scales the scene together with `--height`.
    #[arg(long, requires = "height")]
    width: Option<f32>,

    /// Output height.
    #[arg(long, requires = "width")]
    height: Option<f32>,

    /// Write the scene JSON here instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_max_level(tracing::Level::DEBUG)
            .init();
    }
    match cli.cmd {
        Command::Info(args) => cmd_info(args),
        Command::Markers(args) => cmd_markers(args),
        Command::Frame(args) => cmd_frame(args),
    }
}

fn open(args: &LoadArgs) -> anyhow::Result<Loader> {
    let scheduler = TaskScheduler::new(SchedulerOpts {
        threads: args.threads,
    })?;
    let mut loader = Loader::new(scheduler);
    loader
        .open_path(&args.in_path)
        .with_context(|| format!("open document '{}'", args.in_path.display()))?;
    loader.read()?;

    if let Some(path) = &args.slots {
        let payload = std::fs::read_to_string(path)
            .with_context(|| format!("read slot payload '{}'", path.display()))?;
        if !loader.override_slots(Some(&payload)) {
            anyhow::bail!("slot payload '{}' did not apply", path.display());
        }
    }
    Ok(loader)
}

fn cmd_info(args: LoadArgs) -> anyhow::Result<()> {
    let mut loader = open(&args)?;
    anyhow::ensure!(loader.ready(), "'{}' did not load", args.in_path.display());

    let (w, h) = loader.size();
    println!("size: {w}x{h}");
    println!("frame rate: {}", loader.frame_rate());
    println!("frames: {}", loader.total_frame());
    println!("duration: {:.3}s", loader.duration());
    println!("markers: {}", loader.markers_cnt());
    Ok(())
}

fn cmd_markers(args: LoadArgs) -> anyhow::Result<()> {
    let mut loader = open(&args)?;
    anyhow::ensure!(loader.ready(), "'{}' did not load", args.in_path.display());

    for i in 0..loader.markers_cnt() {
        let Some(name) = loader.marker(i).map(str::to_owned) else {
            continue;
        };
        if let Some((begin, end)) = loader.segment_by_marker(&name) {
            println!("{name}\t{begin}\t{end}");
        }
    }
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut loader = open(&args.load)?;

    if let Some(name) = &args.marker {
        let (begin, end) = loader
            .segment_by_marker(name)
            .with_context(|| format!("no marker named '{name}'"))?;
        loader.segment(begin, end)?;
    }

    match args.tween_to {
        Some(to) => loader.tween(args.frame, to, args.progress),
        None => loader.frame(args.frame),
    };
    loader.sync();

    if let (Some(w), Some(h)) = (args.width, args.height) {
        anyhow::ensure!(loader.resize(w, h), "cannot resize to {w}x{h}");
    }

    let scene = loader.paint().context("document has no scene")?;
    let json = serde_json::to_string_pretty(scene).context("serialize scene")?;
    match &args.out {
        Some(path) => std::fs::write(path, json)
            .with_context(|| format!("write scene '{}'", path.display()))?,
        None => println!("{json}"),
    }
    Ok(())
}
