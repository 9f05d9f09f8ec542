use std::{
    io::{BufRead as _, Write as _},
    path::PathBuf,
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use rand::{SeedableRng as _, rngs::StdRng};
use tracing_subscriber::EnvFilter;

use pocketpals::{
    FactRecord, FfmpegSlideshow, Fps, FrameTemplate, GameCatalog, OrderUpSession, PageController,
    PngDirectory, RenderQueueOpts, ReviewRecord, RevealJob, RotateMode, RotatePaths,
    SlideshowOpts, SlotSet, SvgFrameRenderer, TerminalView, Trigger,
};

#[derive(Parser, Debug)]
#[command(name = "pocketpals", version, about = "Pocket Pals asset automation")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render Fake News Fact Checkers reveal frames.
    Facts(RevealArgs),
    /// Render Lightly Steamed review reveal frames.
    Reviews(RevealArgs),
    /// Render Screenshot in the Dark videos (requires `ffmpeg` on PATH).
    Screenshots(ScreenshotArgs),
    /// Make the next rendered item live.
    SwapNext(SwapArgs),
    /// Write a countdown subtitle file.
    Countdown(CountdownArgs),
    /// Run the Order Up timeline on the terminal, one trigger per stdin line.
    OrderUp(OrderUpArgs),
    /// Print the fragments and reveal states of a text as JSON.
    Segment(SegmentArgs),
}

#[derive(Args, Debug)]
struct RevealArgs {
    /// Records JSON (an array of PascalCase objects).
    #[arg(long, default_value = "data.json")]
    data: PathBuf,

    /// Export root.
    #[arg(long, default_value = "Rendered")]
    out: PathBuf,

    /// Frame template JSON; the game's built-in layout when omitted.
    #[arg(long)]
    template: Option<PathBuf>,

    /// Extra font directory.
    #[arg(long)]
    fonts: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ScreenshotArgs {
    /// First source folder number.
    #[arg(long, default_value_t = 1)]
    start: u32,

    /// How many folders to render.
    #[arg(long, default_value_t = 1)]
    amount: u32,

    /// Directory of numbered source folders.
    #[arg(long, default_value = "Source")]
    source: PathBuf,

    /// Export directory.
    #[arg(long, default_value = "Rendered")]
    out: PathBuf,

    /// Output width (even).
    #[arg(long, default_value_t = 1920)]
    width: u32,

    /// Output height (even).
    #[arg(long, default_value_t = 1080)]
    height: u32,

    /// Output frame rate.
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Seconds per screenshot.
    #[arg(long, default_value_t = 5.0)]
    hold_secs: f64,

    /// Seconds the logo stays up.
    #[arg(long, default_value_t = 5.0)]
    logo_secs: f64,

    /// Fail instead of replacing an MP4 that already exists.
    #[arg(long)]
    no_overwrite: bool,
}

#[derive(Args, Debug)]
struct SwapArgs {
    /// Directory holding `Rendered/` and the state file.
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Whether rendered items are directories or MP4 files.
    #[arg(long, value_enum, default_value_t = RotateMode::Directory)]
    mode: RotateMode,
}

#[derive(Args, Debug)]
struct CountdownArgs {
    /// Countdown length in minutes.
    #[arg(long)]
    minutes: u32,

    /// Output SRT path.
    #[arg(long, default_value = "countdown.srt")]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct OrderUpArgs {
    /// Game catalog JSON (decade key to list of `{name, date}`).
    #[arg(long)]
    catalog: PathBuf,

    /// Decade to play.
    #[arg(long, default_value = pocketpals::DEFAULT_DECADE)]
    decade: String,

    /// Asset root to check for background and logo images.
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Seed for a reproducible order.
    #[arg(long)]
    seed: Option<u64>,

    /// Event name that advances the timeline.
    #[arg(long, default_value = pocketpals::DEFAULT_NEXT_EVENT)]
    event: String,
}

#[derive(Args, Debug)]
struct SegmentArgs {
    /// Text to segment.
    text: String,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Facts(args) => {
            let records: Vec<FactRecord> = pocketpals::read_records(&args.data)?;
            cmd_reveal(&records, &args, FrameTemplate::fake_news())
        }
        Command::Reviews(args) => {
            let records: Vec<ReviewRecord> = pocketpals::read_records(&args.data)?;
            cmd_reveal(&records, &args, FrameTemplate::lightly_steamed())
        }
        Command::Screenshots(args) => cmd_screenshots(args),
        Command::SwapNext(args) => cmd_swap_next(args),
        Command::Countdown(args) => cmd_countdown(args),
        Command::OrderUp(args) => cmd_order_up(args),
        Command::Segment(args) => cmd_segment(args),
    }
}

fn cmd_reveal<J: RevealJob>(
    records: &[J],
    args: &RevealArgs,
    builtin: FrameTemplate,
) -> anyhow::Result<()> {
    let template = match &args.template {
        Some(path) => FrameTemplate::load(path)?,
        None => builtin,
    };
    let mut renderer = SvgFrameRenderer::with_font_dir(template.clone(), args.fonts.as_deref())?;
    let mut sink = PngDirectory::new(&args.out);

    let summary = pocketpals::render_reveal_batch(records, &template, &mut renderer, &mut sink)?;
    eprintln!(
        "rendered {} records ({} frames) into {}",
        summary.records,
        summary.frames,
        args.out.display()
    );
    Ok(())
}

fn cmd_screenshots(args: ScreenshotArgs) -> anyhow::Result<()> {
    let opts = RenderQueueOpts {
        source_root: args.source,
        export_root: args.out,
        start: args.start,
        amount: args.amount,
        slots: SlotSet::default(),
    };
    let mut renderer = FfmpegSlideshow::new(SlideshowOpts {
        canvas: pocketpals::Canvas {
            width: args.width,
            height: args.height,
        },
        fps: Fps::new(args.fps, 1)?,
        hold_secs: args.hold_secs,
        logo_secs: args.logo_secs,
        overwrite: !args.no_overwrite,
    });

    let written = pocketpals::run_render_queue(&opts, &mut renderer)?;
    for path in &written {
        eprintln!("wrote {}", path.display());
    }
    eprintln!("Done.");
    Ok(())
}

fn cmd_swap_next(args: SwapArgs) -> anyhow::Result<()> {
    let paths = RotatePaths::under(&args.root);
    let outcome = pocketpals::swap_next(&paths, args.mode)?;
    let dest = match args.mode {
        RotateMode::Directory => &paths.current_dir,
        RotateMode::File => &paths.current_file,
    };
    eprintln!(
        "copied {} to {} (index {})",
        outcome.source.display(),
        dest.display(),
        outcome.index
    );
    Ok(())
}

fn cmd_countdown(args: CountdownArgs) -> anyhow::Result<()> {
    let srt = pocketpals::countdown_srt(args.minutes);
    pocketpals::write_srt(&args.out, &srt)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_order_up(args: OrderUpArgs) -> anyhow::Result<()> {
    let catalog = GameCatalog::load(&args.catalog)?;
    let session = match args.seed {
        Some(seed) => {
            OrderUpSession::with_rng(&catalog, &args.decade, &mut StdRng::seed_from_u64(seed))?
        }
        None => OrderUpSession::new(&catalog, &args.decade)?,
    };

    if let Some(root) = &args.assets {
        for rel in pocketpals::missing_assets(root, session.decade(), session.games()) {
            tracing::warn!(path = %rel, "missing timeline asset");
        }
    }

    let stdout = std::io::stdout();
    let mut controller = PageController::start(session, TerminalView::new(stdout.lock()), args.event);

    let mut lines = std::io::stdin().lock().lines();
    while !controller.is_finished() {
        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("read trigger from stdin")?;
        controller.handle(&Trigger::from_line(&line));
    }

    let placed = controller.session().track().len();
    eprintln!(
        "{placed} of {} games on the track",
        controller.session().games().len()
    );
    Ok(())
}

fn cmd_segment(args: SegmentArgs) -> anyhow::Result<()> {
    let fragments = pocketpals::segment(&args.text);
    let states = pocketpals::sequence(&fragments);
    let out = serde_json::json!({
        "fragments": fragments,
        "states": states,
    });

    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &out).context("write segment JSON")?;
    writeln!(stdout).context("write segment JSON")?;
    Ok(())
}
