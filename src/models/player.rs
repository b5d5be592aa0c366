//! Player record: cumulative results across every tournament.

use serde::{Deserialize, Serialize};

use super::{GameResult, PlayerId, WinLossRecord};
use crate::calculate::{add_to_average, calculate_level, remove_from_average};

/// Running statistics of a single player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,

    /// Results of every currently counted game
    pub record: WinLossRecord,

    /// Mean duration of every currently counted game
    pub average_play_time: f64,
}

impl Player {
    /// A player with no games yet.
    pub fn new(id: PlayerId) -> Self {
        Self {
            id,
            record: WinLossRecord::default(),
            average_play_time: 0.0,
        }
    }

    pub fn total_games(&self) -> u32 {
        self.record.total_games()
    }

    /// Level score derived from the current record.
    pub fn level(&self) -> f64 {
        calculate_level(self.record.wins, self.record.losses, self.record.draws)
    }

    /// Count a newly recorded game.
    pub fn record_game(&mut self, result: GameResult, play_time: u32) {
        self.average_play_time =
            add_to_average(self.average_play_time, self.total_games(), play_time);
        self.record.add(result);
    }

    /// Undo the contribution of a game that no longer exists.
    pub fn rollback_game(&mut self, result: GameResult, play_time: u32) {
        self.average_play_time =
            remove_from_average(self.average_play_time, self.total_games(), play_time);
        self.record.remove(result);
    }

    /// Turn a previously counted result into a win, leaving the duration as is.
    pub fn convert_to_win(&mut self, previous: GameResult) {
        if previous != GameResult::Win {
            self.record.remove(previous);
            self.record.add(GameResult::Win);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_player_is_empty() {
        let player = Player::new(3);
        assert_eq!(player.total_games(), 0);
        assert_eq!(player.level(), 0.0);
        assert_eq!(player.average_play_time, 0.0);
    }

    #[test]
    fn test_record_game_updates_average() {
        let mut player = Player::new(1);
        player.record_game(GameResult::Win, 10);
        player.record_game(GameResult::Draw, 20);
        player.record_game(GameResult::Loss, 60);

        assert_eq!(player.record, WinLossRecord::new(1, 1, 1));
        assert!((player.average_play_time - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_rollback_restores_previous_state() {
        let mut player = Player::new(1);
        player.record_game(GameResult::Win, 10);
        player.record_game(GameResult::Loss, 25);
        let before = player.clone();

        player.record_game(GameResult::Draw, 40);
        player.rollback_game(GameResult::Draw, 40);

        assert_eq!(player.record, before.record);
        assert!((player.average_play_time - before.average_play_time).abs() < 1e-9);
    }

    #[test]
    fn test_rollback_last_game_resets_average() {
        let mut player = Player::new(1);
        player.record_game(GameResult::Win, 17);
        player.rollback_game(GameResult::Win, 17);

        assert_eq!(player.total_games(), 0);
        assert_eq!(player.average_play_time, 0.0);
    }

    #[test]
    fn test_convert_to_win() {
        let mut player = Player::new(1);
        player.record_game(GameResult::Draw, 10);
        player.record_game(GameResult::Loss, 10);

        player.convert_to_win(GameResult::Draw);
        player.convert_to_win(GameResult::Loss);
        assert_eq!(player.record, WinLossRecord::new(2, 0, 0));

        player.convert_to_win(GameResult::Win);
        assert_eq!(player.record, WinLossRecord::new(2, 0, 0));
    }

    #[test]
    fn test_level() {
        let mut player = Player::new(1);
        player.record_game(GameResult::Win, 1);
        player.record_game(GameResult::Win, 1);
        player.record_game(GameResult::Loss, 1);
        player.record_game(GameResult::Draw, 1);
        // (12 - 10 + 2) / 4
        assert!((player.level() - 1.0).abs() < 1e-9);
    }
}
