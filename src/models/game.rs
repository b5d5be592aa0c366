//! Game record: a single game played between two players in a tournament.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{GameId, PlayerId};

/// Declared outcome of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    /// The first player won
    First,
    /// The second player won
    Second,
    Draw,
}

/// Error returned when an outcome string is not one of `first`, `second`, `draw`.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown game outcome: {0:?}")]
pub struct ParseWinnerError(String);

impl FromStr for Winner {
    type Err = ParseWinnerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "first" | "first_player" => Ok(Winner::First),
            "second" | "second_player" => Ok(Winner::Second),
            "draw" => Ok(Winner::Draw),
            _ => Err(ParseWinnerError(s.to_string())),
        }
    }
}

impl std::fmt::Display for Winner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Winner::First => write!(f, "first"),
            Winner::Second => write!(f, "second"),
            Winner::Draw => write!(f, "draw"),
        }
    }
}

/// A game's result seen from one participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    Win,
    Loss,
    Draw,
}

/// A single recorded game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    /// Sequence number within the tournament (1-based)
    pub id: GameId,

    pub first_player: PlayerId,

    pub second_player: PlayerId,

    pub winner: Winner,

    /// Duration of the game
    pub play_time: u32,

    /// The first player was removed from the system after this game
    #[serde(default)]
    pub first_removed: bool,

    #[serde(default)]
    pub second_removed: bool,
}

impl Game {
    pub fn new(
        id: GameId,
        first_player: PlayerId,
        second_player: PlayerId,
        winner: Winner,
        play_time: u32,
    ) -> Self {
        Self {
            id,
            first_player,
            second_player,
            winner,
            play_time,
            first_removed: false,
            second_removed: false,
        }
    }

    /// Returns true if `player` took part in this game.
    pub fn involves(&self, player: PlayerId) -> bool {
        self.first_player == player || self.second_player == player
    }

    /// Returns true if this game was played between `a` and `b`, in either seat.
    pub fn is_between(&self, a: PlayerId, b: PlayerId) -> bool {
        (self.first_player == a && self.second_player == b)
            || (self.first_player == b && self.second_player == a)
    }

    /// Returns true if this game is counted in the current record of `player`.
    ///
    /// A removed player's games stay in the history but no longer belong to
    /// any record, even if the same id shows up again later.
    pub fn counts_for(&self, player: PlayerId) -> bool {
        (self.first_player == player && !self.first_removed)
            || (self.second_player == player && !self.second_removed)
    }

    /// Detach this game from the record of `player`, who left the system.
    pub fn mark_removed(&mut self, player: PlayerId) {
        if self.first_player == player {
            self.first_removed = true;
        } else if self.second_player == player {
            self.second_removed = true;
        }
    }

    /// The other participant, if `player` took part.
    pub fn opponent_of(&self, player: PlayerId) -> Option<PlayerId> {
        if self.first_player == player {
            Some(self.second_player)
        } else if self.second_player == player {
            Some(self.first_player)
        } else {
            None
        }
    }

    /// The result for `player`, if they took part.
    pub fn result_for(&self, player: PlayerId) -> Option<GameResult> {
        let seat = if self.first_player == player {
            Winner::First
        } else if self.second_player == player {
            Winner::Second
        } else {
            return None;
        };

        Some(match self.winner {
            Winner::Draw => GameResult::Draw,
            w if w == seat => GameResult::Win,
            _ => GameResult::Loss,
        })
    }

    /// Hand the game to the opponent of `removed`.
    ///
    /// Returns the survivor's result before the change, or `None` if
    /// `removed` did not play this game.
    pub fn forfeit(&mut self, removed: PlayerId) -> Option<GameResult> {
        let survivor = self.opponent_of(removed)?;
        let previous = self.result_for(survivor);
        self.winner = if self.first_player == survivor {
            Winner::First
        } else {
            Winner::Second
        };
        previous
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_winner_from_str() {
        assert_eq!("first".parse::<Winner>(), Ok(Winner::First));
        assert_eq!("Second".parse::<Winner>(), Ok(Winner::Second));
        assert_eq!(" draw ".parse::<Winner>(), Ok(Winner::Draw));
        assert!("nobody".parse::<Winner>().is_err());
    }

    #[test]
    fn test_winner_serialization() {
        let json = serde_json::to_string(&Winner::Draw).unwrap();
        assert_eq!(json, "\"draw\"");

        let deserialized: Winner = serde_json::from_str("\"first\"").unwrap();
        assert_eq!(deserialized, Winner::First);
    }

    #[test]
    fn test_result_for_each_seat() {
        let game = Game::new(1, 10, 20, Winner::First, 30);
        assert_eq!(game.result_for(10), Some(GameResult::Win));
        assert_eq!(game.result_for(20), Some(GameResult::Loss));
        assert_eq!(game.result_for(30), None);

        let draw = Game::new(2, 10, 20, Winner::Draw, 30);
        assert_eq!(draw.result_for(10), Some(GameResult::Draw));
        assert_eq!(draw.result_for(20), Some(GameResult::Draw));
    }

    #[test]
    fn test_is_between_ignores_seats() {
        let game = Game::new(1, 3, 4, Winner::Second, 5);
        assert!(game.is_between(3, 4));
        assert!(game.is_between(4, 3));
        assert!(!game.is_between(3, 5));
    }

    #[test]
    fn test_opponent_of() {
        let game = Game::new(1, 3, 4, Winner::Draw, 5);
        assert_eq!(game.opponent_of(3), Some(4));
        assert_eq!(game.opponent_of(4), Some(3));
        assert_eq!(game.opponent_of(5), None);
    }

    #[test]
    fn test_forfeit_turns_draw_into_win() {
        let mut game = Game::new(1, 3, 4, Winner::Draw, 5);
        assert_eq!(game.forfeit(3), Some(GameResult::Draw));
        assert_eq!(game.winner, Winner::Second);
        assert_eq!(game.result_for(4), Some(GameResult::Win));
    }

    #[test]
    fn test_forfeit_turns_loss_into_win() {
        let mut game = Game::new(1, 3, 4, Winner::Second, 5);
        assert_eq!(game.forfeit(4), Some(GameResult::Loss));
        assert_eq!(game.winner, Winner::First);
    }

    #[test]
    fn test_mark_removed_detaches_one_seat() {
        let mut game = Game::new(1, 3, 4, Winner::Draw, 5);
        assert!(game.counts_for(3));
        assert!(game.counts_for(4));
        assert!(!game.counts_for(5));

        game.mark_removed(3);
        assert!(!game.counts_for(3));
        assert!(game.counts_for(4));

        game.mark_removed(9);
        assert!(game.counts_for(4));
    }

    #[test]
    fn test_removed_flags_default_when_missing() {
        let json = r#"{"id":1,"first_player":3,"second_player":4,"winner":"draw","play_time":5}"#;
        let game: Game = serde_json::from_str(json).unwrap();
        assert_eq!(game, Game::new(1, 3, 4, Winner::Draw, 5));
    }

    #[test]
    fn test_forfeit_by_outsider_is_noop() {
        let mut game = Game::new(1, 3, 4, Winner::Second, 5);
        assert_eq!(game.forfeit(9), None);
        assert_eq!(game.winner, Winner::Second);
    }
}
