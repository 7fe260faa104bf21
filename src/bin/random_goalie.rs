use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use gym_soccer::{
    common::{
        eval::{run_episodes, EvalResult},
        logger::{CsvLogger, LogItem, Logger},
        spaces::{seed_spaces_rng, Space},
    },
    env::{
        base::{Env, EnvError, RenderMode},
        hfo::{ServerConfig, SoccerGoalieEnv},
    },
};

/// Plays HFO as a goalie choosing uniformly random actions.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// JSON server configuration; defaults are used for missing fields
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, default_value_t = 10)]
    episodes: usize,

    /// Where to write per-episode statistics
    #[arg(long, default_value = "logs/random_goalie.csv")]
    log_path: PathBuf,

    /// Open the soccerwindow viewer
    #[arg(long)]
    render: bool,

    /// Seeds both the server and the action sampler
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ServerConfig::from_json_file(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => ServerConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed as i64;
        seed_spaces_rng(seed);
    }

    let mut logger = CsvLogger::new(args.log_path.clone(), false, true);
    logger
        .check_can_log(true)
        .map_err(|e| anyhow::anyhow!("{e}: {}", args.log_path.display()))?;

    let mut env = SoccerGoalieEnv::new(config).context("starting HFO")?;
    if args.render {
        env.render(RenderMode::Human, false)?;
    }

    let bar = ProgressBar::new(args.episodes as u64);
    bar.set_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} episodes {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let mut action_space = env.action_space();
    let mut completed = Vec::new();
    let result = run_episodes(
        &mut env,
        args.episodes,
        |_| action_space.sample(),
        |stats| {
            bar.set_message(stats.status.clone());
            bar.inc(1);
            logger.log(LogItem::from(stats));
            completed.push(stats.clone());
        },
    );
    bar.finish();

    match result {
        Ok(_) => {}
        Err(EnvError::ServerDown) => {
            warn!(
                "HFO server went down after {} of {} episodes, stopping early",
                completed.len(),
                args.episodes
            );
        }
        Err(e) => return Err(e.into()),
    }

    if !completed.is_empty() {
        let summary = EvalResult::from(completed.as_slice());
        info!(
            "{} episodes: mean return {:.3}, mean length {:.1}",
            completed.len(),
            summary.mean_reward,
            summary.mean_len
        );
    }

    logger.dump().map_err(|e| anyhow::anyhow!("{e}"))?;
    env.close();

    Ok(())
}
