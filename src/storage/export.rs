//! Text reports.
//!
//! Player levels: one `"<id> <level>"` line per player, highest level first.
//!
//! Tournament statistics: six lines per finished tournament, in ascending
//! tournament id order: winner, longest game, mean game time, location,
//! number of games, number of players.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::system::{ChessError, ChessSystem, Result};

/// Write the player-level report to `writer`.
pub fn export_player_levels<W: Write>(system: &ChessSystem, mut writer: W) -> Result<()> {
    for entry in system.player_levels() {
        writeln!(writer, "{} {:.2}", entry.player_id, entry.level)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the tournament-statistics report to `writer`.
///
/// Fails with [`ChessError::NoTournamentsEnded`] before writing anything if
/// no tournament has finished.
pub fn export_tournament_statistics<W: Write>(system: &ChessSystem, mut writer: W) -> Result<()> {
    for stats in system.tournament_statistics()? {
        writeln!(writer, "{}", stats.winner)?;
        writeln!(writer, "{}", stats.longest_game_time)?;
        writeln!(writer, "{:.2}", stats.average_game_time)?;
        writeln!(writer, "{}", stats.location)?;
        writeln!(writer, "{}", stats.total_games)?;
        writeln!(writer, "{}", stats.total_players)?;
    }
    writer.flush()?;
    Ok(())
}

/// Save the player-level report to a file, replacing it.
pub fn save_player_levels(system: &ChessSystem, path: &Path) -> Result<()> {
    let writer = create_report(path)?;
    export_player_levels(system, writer)?;
    info!("Saved player levels to {:?}", path);
    Ok(())
}

/// Save the tournament-statistics report to a file, replacing it.
///
/// The file is left untouched when no tournament has finished.
pub fn save_tournament_statistics(system: &ChessSystem, path: &Path) -> Result<()> {
    if system.tournaments().all(|t| !t.finished) {
        return Err(ChessError::NoTournamentsEnded);
    }
    let writer = create_report(path)?;
    export_tournament_statistics(system, writer)?;
    info!("Saved tournament statistics to {:?}", path);
    Ok(())
}

fn create_report(path: &Path) -> Result<BufWriter<File>> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(BufWriter::new(File::create(path)?))
}
