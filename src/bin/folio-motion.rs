use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use folio_motion::{
    MarqueeState, MotionConfig, Preloader, PreloaderElements, Rect, Size, Stage, classify_edge,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "folio-motion", version)]
struct Cli {
    /// Motion config JSON (defaults apply when omitted).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Simulate the preloader and print one JSON line per frame.
    Preloader(PreloaderArgs),
    /// Print the marquee loop state for a measured layout.
    Marquee(MarqueeArgs),
    /// Classify the hover edge for a pointer position inside a row.
    Edge(EdgeArgs),
    /// Print the motion profile picked for a viewport width.
    Profile(ProfileArgs),
    /// Validate the config and print it with every default filled in.
    Config,
}

#[derive(Parser, Debug)]
struct PreloaderArgs {
    /// Simulated frame rate.
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Give up after this many simulated seconds.
    #[arg(long, default_value_t = 30.0)]
    max_sec: f64,
}

#[derive(Parser, Debug)]
struct MarqueeArgs {
    /// Width of one unrepeated content block, in px.
    #[arg(long)]
    content_width: f64,

    #[arg(long)]
    viewport_width: f64,
}

#[derive(Parser, Debug)]
struct EdgeArgs {
    #[arg(long)]
    x: f64,
    #[arg(long)]
    y: f64,
    #[arg(long)]
    width: f64,
    #[arg(long)]
    height: f64,
}

#[derive(Parser, Debug)]
struct ProfileArgs {
    #[arg(long)]
    width: f64,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    match cli.cmd {
        Command::Preloader(args) => cmd_preloader(&config, args),
        Command::Marquee(args) => cmd_marquee(&config, args),
        Command::Edge(args) => cmd_edge(args),
        Command::Profile(args) => cmd_profile(&config, args),
        Command::Config => {
            println!("{}", config.to_json_pretty()?);
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<MotionConfig> {
    let config = match path {
        Some(p) => MotionConfig::from_path(p)
            .with_context(|| format!("load motion config '{}'", p.display()))?,
        None => MotionConfig::default(),
    };
    config.validate().context("validate motion config")?;
    Ok(config)
}

fn cmd_preloader(config: &MotionConfig, args: PreloaderArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.fps > 0, "--fps must be > 0");
    let dt = 1.0 / f64::from(args.fps);

    let mut stage = Stage::new();
    let el = PreloaderElements {
        container: stage.mount(Rect::new(0.0, 0.0, 1.0, 1.0)),
        top: stage.mount(Rect::new(0.0, 0.0, 1.0, 0.5)),
        bottom: stage.mount(Rect::new(0.0, 0.5, 1.0, 1.0)),
    };
    let mut preloader = Preloader::new(el, config.preloader.clone(), &mut stage)?;

    let mut frame = 0u64;
    loop {
        let done = preloader.advance(dt, &mut stage);
        frame += 1;
        let line = serde_json::json!({
            "frame": frame,
            "t": preloader.elapsed(),
            "state": preloader.frame(&stage),
        });
        println!("{line}");
        if done {
            break;
        }
        anyhow::ensure!(
            preloader.elapsed() < args.max_sec,
            "preloader did not finish within {}s",
            args.max_sec
        );
    }
    println!(
        "{}",
        serde_json::json!({ "completed_at_sec": preloader.elapsed(), "frames": frame })
    );
    Ok(())
}

fn cmd_marquee(config: &MotionConfig, args: MarqueeArgs) -> anyhow::Result<()> {
    let out = match MarqueeState::compute(args.content_width, args.viewport_width, &config.marquee)
    {
        Some(state) => serde_json::json!({
            "state": state,
            "rendered_width": state.rendered_width(),
            "speed_px_per_sec": state.speed_px_per_sec(),
        }),
        None => serde_json::json!({
            "deferred": true,
            "repetition_count": config.marquee.min_repetitions,
        }),
    };
    println!("{out}");
    Ok(())
}

fn cmd_edge(args: EdgeArgs) -> anyhow::Result<()> {
    let edge = classify_edge(
        folio_motion::Point::new(args.x, args.y),
        Size::new(args.width, args.height),
    );
    println!("{}", serde_json::to_string(&edge)?);
    Ok(())
}

fn cmd_profile(config: &MotionConfig, args: ProfileArgs) -> anyhow::Result<()> {
    let out = serde_json::json!({
        "class": config.profiles.classify(args.width),
        "profile": config.profiles.select(args.width),
    });
    println!("{out}");
    Ok(())
}
