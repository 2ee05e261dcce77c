mod autopilot;
mod render;

use std::io::{self, BufWriter};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use galaxy_raiders_core::score::now_timestamp;
use galaxy_raiders_core::{
    GameConfig, GameEngine, JsonScoreStore, MemoryScoreStore, RenderSink, ScoreStore,
    ScoreTracker, SeededRng,
};
use tracing::info;

use crate::autopilot::Autopilot;
use crate::render::{JsonLinesRender, NullRender, SummaryRender};

#[derive(Parser, Debug)]
#[command(name = "galaxy-raiders")]
#[command(
    about = "Runs a Galaxy Raiders game under the autopilot. Engine options come from GR__CORE__GAME__GAME_ENGINE__* variables."
)]
struct Cli {
    /// Seed for asteroid generation and the autopilot (decimal or 0x-prefixed hex)
    #[arg(long, default_value = "0xDEADBEEF", value_parser = parse_seed)]
    seed: u32,
    /// Stop after this many ticks; runs until interrupted when omitted
    #[arg(long)]
    ticks: Option<u64>,
    /// Hold the configured frame rate even when --ticks is given
    #[arg(long, default_value_t = false)]
    paced: bool,
    #[arg(long, default_value = "Scoreboard.json")]
    scoreboard: PathBuf,
    #[arg(long, default_value = "Leaderboard.json")]
    leaderboard: PathBuf,
    /// Keep scores in memory only
    #[arg(long, default_value_t = false)]
    no_persist: bool,
    #[arg(long, value_enum, default_value_t = RenderMode::Summary)]
    render: RenderMode,
    /// Ticks between summary lines or JSON frames
    #[arg(long, default_value_t = 60)]
    render_every: u64,
}

/// Accepts `0x`-prefixed hex (as printed in the logs) or decimal.
fn parse_seed(raw: &str) -> Result<u32, String> {
    let s = raw.trim();
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => {
            u32::from_str_radix(hex, 16).map_err(|e| format!("invalid hex seed {s:?}: {e}"))
        }
        None => s.parse().map_err(|e| format!("invalid decimal seed {s:?}: {e}")),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum RenderMode {
    /// Periodic field summary in the log
    Summary,
    /// One JSON field snapshot per line on stdout
    Json,
    None,
}

#[derive(Debug)]
struct RunOutcome {
    ticks: u64,
    score: u64,
    asteroids_destroyed: u32,
    leaderboard: [u64; 3],
}

fn run<V: RenderSink>(
    cli: &Cli,
    config: GameConfig,
    seed: u32,
    visualizer: V,
) -> Result<(RunOutcome, V)> {
    let store: Box<dyn ScoreStore> = if cli.no_persist {
        Box::new(MemoryScoreStore::new())
    } else {
        Box::new(JsonScoreStore::new(
            cli.scoreboard.clone(),
            cli.leaderboard.clone(),
        ))
    };
    let tracker = ScoreTracker::load(store, &now_timestamp());

    let mut engine = GameEngine::new(
        config,
        Box::new(SeededRng::new(seed)),
        Autopilot::new(seed),
        visualizer,
        tracker,
    );
    engine.setup_score_files().with_context(|| {
        format!(
            "failed to write score files {} and {}",
            cli.scoreboard.display(),
            cli.leaderboard.display()
        )
    })?;

    match (cli.ticks, cli.paced) {
        (Some(ticks), false) => engine.execute_ticks(ticks),
        (limit, _) => engine.execute(limit),
    }

    let tracker = engine.tracker();
    let slots = tracker.leaderboard().slots();
    let outcome = RunOutcome {
        ticks: engine.tick_count(),
        score: tracker.score(),
        asteroids_destroyed: tracker.asteroids_destroyed(),
        leaderboard: [slots[0].score, slots[1].score, slots[2].score],
    };
    Ok((outcome, engine.into_visualizer()))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::filter::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let seed = cli.seed;
    let config = GameConfig::from_env().context("invalid engine configuration")?;
    info!(seed = %format!("{seed:#010x}"), ?config, "configuration loaded");

    let outcome = match cli.render {
        RenderMode::Summary => {
            let sink = SummaryRender::new(cli.render_every);
            let (outcome, summary) = run(&cli, config, seed, sink)?;
            info!(
                frames = summary.frames(),
                peak_asteroids = summary.peak_asteroids(),
                "render summary"
            );
            outcome
        }
        RenderMode::Json => {
            let sink = JsonLinesRender::new(BufWriter::new(io::stdout().lock()), cli.render_every);
            let (outcome, frames) = run(&cli, config, seed, sink)?;
            frames.finish().context("failed writing frames to stdout")?;
            outcome
        }
        RenderMode::None => run(&cli, config, seed, NullRender)?.0,
    };

    info!(
        ticks = outcome.ticks,
        score = outcome.score,
        asteroids_destroyed = outcome.asteroids_destroyed,
        leaderboard = ?outcome.leaderboard,
        "game over"
    );
    Ok(())
}
