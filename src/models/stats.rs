//! Derived statistics models.

use serde::{Deserialize, Serialize};

use super::{GameResult, PlayerId, TournamentId};

/// Win/loss/draw record.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct WinLossRecord {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
}

impl WinLossRecord {
    /// Create a new record.
    pub fn new(wins: u32, losses: u32, draws: u32) -> Self {
        Self {
            wins,
            losses,
            draws,
        }
    }

    /// Total games played.
    pub fn total_games(&self) -> u32 {
        self.wins + self.losses + self.draws
    }

    /// Count one more game with the given result.
    pub fn add(&mut self, result: GameResult) {
        match result {
            GameResult::Win => self.wins += 1,
            GameResult::Loss => self.losses += 1,
            GameResult::Draw => self.draws += 1,
        }
    }

    /// Stop counting one game with the given result.
    ///
    /// The result must have been counted before.
    pub fn remove(&mut self, result: GameResult) {
        let count = match result {
            GameResult::Win => &mut self.wins,
            GameResult::Loss => &mut self.losses,
            GameResult::Draw => &mut self.draws,
        };
        debug_assert!(*count > 0, "removing an uncounted {:?}", result);
        *count -= 1;
    }
}

/// A player's line in a tournament table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub player_id: PlayerId,
    pub record: WinLossRecord,
}

impl Standing {
    pub fn new(player_id: PlayerId) -> Self {
        Self {
            player_id,
            record: WinLossRecord::default(),
        }
    }

    /// Tournament points: two per win, one per draw.
    pub fn points(&self) -> u32 {
        crate::calculate::calculate_points(self.record.wins, self.record.draws)
    }
}

/// One line of the player-level report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerLevel {
    pub player_id: PlayerId,
    pub level: f64,
}

/// Summary of a finished tournament.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TournamentStatistics {
    pub tournament_id: TournamentId,

    pub winner: PlayerId,

    /// Duration of the longest game
    pub longest_game_time: u32,

    /// Mean duration over all games
    pub average_game_time: f64,

    pub location: String,

    pub total_games: usize,

    /// Distinct players that took part
    pub total_players: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_add_and_remove() {
        let mut record = WinLossRecord::default();
        record.add(GameResult::Win);
        record.add(GameResult::Draw);
        record.add(GameResult::Draw);
        assert_eq!(record, WinLossRecord::new(1, 0, 2));
        assert_eq!(record.total_games(), 3);

        record.remove(GameResult::Draw);
        assert_eq!(record, WinLossRecord::new(1, 0, 1));
    }

    #[test]
    fn test_record_remove_counted_result() {
        let mut record = WinLossRecord::new(2, 1, 1);
        record.remove(GameResult::Loss);
        record.remove(GameResult::Win);
        assert_eq!(record, WinLossRecord::new(1, 0, 1));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "removing an uncounted Loss")]
    fn test_record_remove_uncounted_result_panics() {
        let mut record = WinLossRecord::default();
        record.remove(GameResult::Loss);
    }

    #[test]
    fn test_standing_points() {
        let standing = Standing {
            player_id: 4,
            record: WinLossRecord::new(3, 2, 1),
        };
        assert_eq!(standing.points(), 7);
    }

    #[test]
    fn test_statistics_serialization() {
        let stats = TournamentStatistics {
            tournament_id: 7,
            winner: 1,
            longest_game_time: 20,
            average_game_time: 15.0,
            location: "Haifa".to_string(),
            total_games: 3,
            total_players: 3,
        };
        let json = serde_json::to_string(&stats).unwrap();
        let parsed: TournamentStatistics = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, stats);
    }
}
