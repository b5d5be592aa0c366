use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use chess_system::config::AppConfig;
use chess_system::models::is_valid_location;
use chess_system::replay::{replay_file, Outcome};
use chess_system::storage::{
    export_player_levels, export_tournament_statistics, save_player_levels,
    save_tournament_statistics, write_jsonl, JsonlWriter,
};
use chess_system::{ChessError, ChessSystem};

#[derive(Parser)]
#[command(name = "chess-system")]
#[command(about = "Chess tournament bookkeeping: replay game scripts and export rankings")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error), overrides the config file
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a JSONL command script and write the reports
    Replay {
        /// Script to replay
        script: PathBuf,

        /// Stop at the first rejected command
        #[arg(long)]
        strict: bool,

        /// Player-level report path (defaults to the configured output dir)
        #[arg(long)]
        levels: Option<PathBuf>,

        /// Tournament-statistics report path (defaults to the configured output dir)
        #[arg(long)]
        statistics: Option<PathBuf>,

        /// Print the reports instead of writing files
        #[arg(long)]
        stdout: bool,

        /// Emit reports as JSONL records
        #[arg(long)]
        json: bool,
    },

    /// Check whether a tournament location is well formed
    CheckLocation {
        location: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load config from {:?}", cli.config))?;

    // Initialize tracing
    let level = cli.log_level.as_deref().unwrap_or(&config.log_level);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(filter);
    if cli.json_logs {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init();
    }

    tracing::debug!("Starting chess-system v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Replay {
            script,
            strict,
            levels,
            statistics,
            stdout,
            json,
        } => {
            let mut system = ChessSystem::new();
            let summary = replay_file(&mut system, &script, strict || config.replay.strict)
                .with_context(|| format!("Failed to replay {:?}", script))?;

            for outcome in &summary.outcomes {
                if let Outcome::Rejected { error } = &outcome.outcome {
                    eprintln!("line {}: {}", outcome.line, error);
                }
            }
            eprintln!(
                "Applied {} commands, rejected {}",
                summary.applied, summary.rejected
            );

            if stdout {
                print_reports(&system, json)?;
            } else {
                let storage = config.storage();
                let levels = levels.unwrap_or_else(|| storage.levels_path());
                let statistics = statistics.unwrap_or_else(|| storage.statistics_path());
                save_reports(&system, &levels, &statistics, json)?;
            }
        }

        Commands::CheckLocation { location } => {
            if is_valid_location(&location) {
                println!("{:?} is a valid location", location);
            } else {
                println!("{:?} is not a valid location", location);
            }
        }
    }

    Ok(())
}

fn print_reports(system: &ChessSystem, json: bool) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if json {
        write_jsonl(&mut out, &system.player_levels())?;
        match system.tournament_statistics() {
            Ok(stats) => {
                write_jsonl(&mut out, &stats)?;
            }
            Err(ChessError::NoTournamentsEnded) => {
                tracing::warn!("No tournament has ended, skipping statistics");
            }
            Err(e) => return Err(e.into()),
        }
        out.flush()?;
        return Ok(());
    }

    export_player_levels(system, &mut out)?;
    match export_tournament_statistics(system, &mut out) {
        Err(ChessError::NoTournamentsEnded) => {
            tracing::warn!("No tournament has ended, skipping statistics");
            Ok(())
        }
        other => Ok(other?),
    }
}

fn save_reports(system: &ChessSystem, levels: &Path, statistics: &Path, json: bool) -> Result<()> {
    if json {
        JsonlWriter::new(levels.to_path_buf()).write_all(&system.player_levels())?;
        match system.tournament_statistics() {
            Ok(stats) => {
                JsonlWriter::new(statistics.to_path_buf()).write_all(&stats)?;
            }
            Err(ChessError::NoTournamentsEnded) => {
                tracing::warn!("No tournament has ended, skipping statistics");
            }
            Err(e) => return Err(e.into()),
        }
        return Ok(());
    }

    save_player_levels(system, levels)
        .with_context(|| format!("Failed to write {:?}", levels))?;
    match save_tournament_statistics(system, statistics) {
        Err(ChessError::NoTournamentsEnded) => {
            tracing::warn!("No tournament has ended, skipping statistics");
            Ok(())
        }
        other => other.with_context(|| format!("Failed to write {:?}", statistics)),
    }
}
