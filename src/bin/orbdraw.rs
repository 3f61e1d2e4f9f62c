use std::{
    io::Write as _,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "orbdraw", version)]
struct Cli {
    /// Log verbosity (written to stderr).
    #[arg(long, value_enum, default_value_t = LogLevel::Warn, global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the resolved configuration as JSON.
    Config(ConfigArgs),
    /// Run a full lifecycle headlessly and write the frame timeline as JSON.
    Simulate(SimulateArgs),
}

#[derive(Parser, Debug)]
struct ConfigArgs {
    /// Viewport width in CSS pixels (selects point and cap sizes).
    #[arg(long)]
    width: Option<f64>,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Config JSON. Takes precedence over `--width`.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Viewport width in CSS pixels.
    #[arg(long)]
    width: Option<f64>,

    /// Simulated display refresh rate.
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Output path for the timeline JSON (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,

    /// Print a one-line summary instead of the timeline.
    #[arg(long, default_value_t = false)]
    summary: bool,
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
    fn from(v: LogLevel) -> Self {
        match v {
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
        .with_max_level(tracing::Level::from(cli.log_level))
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Config(args) => cmd_config(args),
        Command::Simulate(args) => cmd_simulate(args),
    }
}

fn resolve_config(path: Option<&Path>, width: Option<f64>) -> anyhow::Result<orbdraw::Config> {
    if let Some(path) = path {
        return orbdraw::Config::from_path(path)
            .with_context(|| format!("load config '{}'", path.display()));
    }
    Ok(width
        .map(orbdraw::Config::for_viewport_width)
        .unwrap_or_default())
}

fn cmd_config(args: ConfigArgs) -> anyhow::Result<()> {
    let cfg = resolve_config(None, args.width)?;
    let json = serde_json::to_string_pretty(&cfg).context("serialize config")?;
    println!("{json}");
    Ok(())
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    if args.fps == 0 {
        anyhow::bail!("--fps must be > 0");
    }
    let cfg = resolve_config(args.config.as_deref(), args.width)?;
    let timeline = orbdraw::simulate_lifecycle(&cfg, orbdraw::SimOpts::at_fps(args.fps))?;

    if args.summary {
        let peak = timeline
            .frames
            .iter()
            .filter(|f| f.progress >= 1.0)
            .count();
        println!(
            "frames={} peak_frames={} elapsed_ms={:.1} released={}",
            timeline.frames.len(),
            peak,
            timeline.elapsed_ms,
            timeline.released
        );
        return Ok(());
    }

    let json = serde_json::to_string_pretty(&timeline).context("serialize timeline")?;
    match args.out {
        Some(out) => {
            if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(&out, json)
                .with_context(|| format!("write timeline '{}'", out.display()))?;
            eprintln!("wrote {}", out.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}").context("write timeline to stdout")?;
        }
    }
    Ok(())
}
