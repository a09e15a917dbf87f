use std::{
    io::Write as _,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "tilewall", version)]
struct Cli {
    /// Log verbosity (logs go to stderr).
    #[arg(long, value_enum, global = true, default_value_t = LogLevel::Info)]
    log: LogLevel,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the grid layout computed for a viewport.
    Layout(LayoutArgs),
    /// Run the wall over a simulated timeline and print its events as JSON lines.
    Simulate(SimulateArgs),
    /// Print the collection listing URL for a hash fragment.
    Url(UrlArgs),
}

#[derive(Parser, Debug)]
struct WallArgs {
    /// Viewport width in pixels.
    #[arg(long, default_value_t = 1920.0)]
    width: f64,

    /// Viewport height in pixels.
    #[arg(long, default_value_t = 1080.0)]
    height: f64,

    /// Engine config JSON; missing fields take their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// URL hash fragment (`username=..&aspect=2/3&rows=3&padding=6`) overriding the config.
    #[arg(long)]
    hash: Option<String>,
}

#[derive(Parser, Debug)]
struct LayoutArgs {
    #[command(flatten)]
    wall: WallArgs,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    #[command(flatten)]
    wall: WallArgs,

    /// Items JSON: an array of `{id, image, meta?}` or a collection listing response.
    #[arg(long)]
    items: PathBuf,

    /// Simulated run length in milliseconds.
    #[arg(long, default_value_t = 30_000)]
    duration_ms: u64,

    /// Host events to replay (JSON array of `{"at": ms, "type": ...}`).
    #[arg(long)]
    script: Option<PathBuf>,

    /// Seed overriding the config seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Print the final render snapshot after the events.
    #[arg(long)]
    snapshot: bool,
}

#[derive(Parser, Debug)]
struct UrlArgs {
    /// URL hash fragment.
    #[arg(long, default_value = "")]
    hash: String,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(tracing::Level::from(cli.log))
        .init();

    match cli.cmd {
        Command::Layout(args) => cmd_layout(args),
        Command::Simulate(args) => cmd_simulate(args),
        Command::Url(args) => cmd_url(args),
    }
}

fn read_text(path: &Path, what: &str) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("read {what} '{}'", path.display()))
}

fn load_config(args: &WallArgs) -> anyhow::Result<tilewall::WallConfig> {
    let mut cfg = match &args.config {
        Some(path) => tilewall::WallConfig::from_json(&read_text(path, "config")?)
            .with_context(|| format!("parse config '{}'", path.display()))?,
        None => tilewall::WallConfig::default(),
    };
    if let Some(hash) = &args.hash {
        cfg = cfg.with_params(&tilewall::WallParams::from_hash(hash));
    }
    cfg.validate().context("validate config")?;
    Ok(cfg)
}

fn cmd_layout(args: LayoutArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.wall)?;
    let viewport = tilewall::Viewport::new(args.wall.width, args.wall.height);
    let layout = tilewall::compute_layout(viewport, &cfg.layout_params());
    println!("{}", serde_json::to_string_pretty(&layout)?);
    Ok(())
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    let mut cfg = load_config(&args.wall)?;
    if args.seed.is_some() {
        cfg.seed = args.seed;
    }

    let items = tilewall::parse_item_list(&read_text(&args.items, "items")?)
        .with_context(|| format!("parse items '{}'", args.items.display()))?;
    let script = match &args.script {
        Some(path) => tilewall::WatchScript::from_json(&read_text(path, "script")?)
            .with_context(|| format!("parse script '{}'", path.display()))?,
        None => tilewall::WatchScript::default(),
    };

    let viewport = tilewall::Viewport::new(args.wall.width, args.wall.height);
    let mut wall = tilewall::Wall::new(cfg, viewport)?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    wall.replace_items(items, tilewall::Millis::ZERO);
    for scripted in script.events() {
        if scripted.at.0 > args.duration_ms {
            break;
        }
        wall.handle(scripted.event.clone(), scripted.at)?;
        write_events(&mut out, &mut wall)?;
    }
    wall.advance_to(tilewall::Millis(args.duration_ms));
    write_events(&mut out, &mut wall)?;

    if args.snapshot {
        serde_json::to_writer(&mut out, &wall.snapshot())?;
        writeln!(out)?;
    }
    Ok(())
}

fn write_events(out: &mut impl std::io::Write, wall: &mut tilewall::Wall) -> anyhow::Result<()> {
    for event in wall.drain_events() {
        serde_json::to_writer(&mut *out, &event)?;
        writeln!(out)?;
    }
    Ok(())
}

fn cmd_url(args: UrlArgs) -> anyhow::Result<()> {
    let params = tilewall::WallParams::from_hash(&args.hash);
    println!("{}", params.query().api_url()?);
    Ok(())
}
