//! Command scripts.
//!
//! A script is a JSONL file with one command per line, tagged by `op`:
//!
//! ```text
//! {"op":"add_tournament","id":7,"max_games_per_player":5,"location":"Haifa"}
//! {"op":"add_game","tournament_id":7,"first_player":1,"second_player":2,"winner":"first","play_time":10}
//! {"op":"end_tournament","id":7}
//! ```
//!
//! Commands run in order against a [`ChessSystem`]. A rejected command is
//! logged and counted; in strict mode it aborts the replay instead. Commands
//! that already ran stay applied either way.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::models::{PlayerId, TournamentId, Winner};
use crate::storage::{JsonlReader, StorageError};
use crate::system::{ChessError, ChessSystem};

/// Errors that abort a replay.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Command on line {line} failed: {source}")]
    Command {
        line: usize,
        #[source]
        source: ChessError,
    },
}

/// One scripted operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    AddTournament {
        id: TournamentId,
        max_games_per_player: i32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        location: Option<String>,
    },
    AddGame {
        tournament_id: TournamentId,
        first_player: PlayerId,
        second_player: PlayerId,
        /// `first`, `second` or `draw`
        winner: String,
        play_time: i32,
    },
    RemoveTournament {
        id: TournamentId,
    },
    RemovePlayer {
        id: PlayerId,
    },
    EndTournament {
        id: TournamentId,
    },
    AveragePlayTime {
        player_id: PlayerId,
    },
}

impl Command {
    /// The `op` tag of this command.
    pub fn op(&self) -> &'static str {
        match self {
            Command::AddTournament { .. } => "add_tournament",
            Command::AddGame { .. } => "add_game",
            Command::RemoveTournament { .. } => "remove_tournament",
            Command::RemovePlayer { .. } => "remove_player",
            Command::EndTournament { .. } => "end_tournament",
            Command::AveragePlayTime { .. } => "average_play_time",
        }
    }
}

/// What happened to one line of a script.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Applied,
    /// Query result
    Value { value: f64 },
    Rejected { error: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandOutcome {
    pub line: usize,
    /// Missing when the line could not be parsed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<Command>,
    pub outcome: Outcome,
}

/// Totals and per-line outcomes of a replay.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReplaySummary {
    pub applied: usize,
    pub rejected: usize,
    pub outcomes: Vec<CommandOutcome>,
}

impl ReplaySummary {
    fn accept(&mut self, line: usize, command: Command, value: Option<f64>) {
        self.applied += 1;
        let outcome = match value {
            Some(value) => Outcome::Value { value },
            None => Outcome::Applied,
        };
        self.outcomes.push(CommandOutcome {
            line,
            command: Some(command),
            outcome,
        });
    }

    fn reject(&mut self, line: usize, command: Option<Command>, error: String) {
        self.rejected += 1;
        self.outcomes.push(CommandOutcome {
            line,
            command,
            outcome: Outcome::Rejected { error },
        });
    }
}

/// Run a single command. Queries return their value.
pub fn apply(system: &mut ChessSystem, command: &Command) -> Result<Option<f64>, ChessError> {
    match command {
        Command::AddTournament {
            id,
            max_games_per_player,
            location,
        } => {
            let location = location.as_deref().ok_or(ChessError::NullArgument)?;
            system.add_tournament(*id, *max_games_per_player, location)?;
        }
        Command::AddGame {
            tournament_id,
            first_player,
            second_player,
            winner,
            play_time,
        } => {
            let winner: Winner = winner.parse().map_err(|_| ChessError::InvalidId)?;
            system.add_game(
                *tournament_id,
                *first_player,
                *second_player,
                winner,
                *play_time,
            )?;
        }
        Command::RemoveTournament { id } => system.remove_tournament(*id)?,
        Command::RemovePlayer { id } => system.remove_player(*id)?,
        Command::EndTournament { id } => system.end_tournament(*id)?,
        Command::AveragePlayTime { player_id } => {
            return system.average_play_time(*player_id).map(Some);
        }
    }
    Ok(None)
}

/// Replay parsed script entries, as yielded by [`JsonlReader::iter`].
pub fn replay<I>(
    system: &mut ChessSystem,
    entries: I,
    strict: bool,
) -> Result<ReplaySummary, ReplayError>
where
    I: IntoIterator<Item = Result<(usize, Command), StorageError>>,
{
    let mut summary = ReplaySummary::default();

    for entry in entries {
        let (line, command) = match entry {
            Ok(entry) => entry,
            Err(e) if strict => return Err(e.into()),
            Err(StorageError::Json { line, source }) => {
                warn!("Skipping malformed line {}: {}", line, source);
                summary.reject(line, None, source.to_string());
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        match apply(system, &command) {
            Ok(value) => {
                debug!("Line {}: {} applied", line, command.op());
                summary.accept(line, command, value);
            }
            Err(source) if strict => return Err(ReplayError::Command { line, source }),
            Err(e) => {
                warn!("Line {}: {} rejected: {}", line, command.op(), e);
                summary.reject(line, Some(command), e.to_string());
            }
        }
    }

    info!(
        "Replay finished: {} applied, {} rejected",
        summary.applied, summary.rejected
    );
    Ok(summary)
}

/// Replay a JSONL script file.
pub fn replay_file(
    system: &mut ChessSystem,
    path: &Path,
    strict: bool,
) -> Result<ReplaySummary, ReplayError> {
    let reader: JsonlReader<Command> = JsonlReader::new(path.to_path_buf());
    info!("Replaying {:?}", path);
    replay(system, reader.iter()?, strict)
}
