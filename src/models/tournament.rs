//! Tournament record and its game list.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::{Game, GameId, PlayerId, Standing, TournamentId, TournamentStatistics};
use crate::map::{MapError, OrderedMap};

/// A tournament and every game recorded in it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,

    /// Where the tournament takes place
    pub location: String,

    /// How many games a single player may play here
    pub max_games_per_player: u32,

    /// Set once by ending the tournament; never cleared
    pub finished: bool,

    /// Chosen when the tournament ends
    pub winner: Option<PlayerId>,

    /// Distinct players appearing in `games`
    pub player_count: usize,

    games: OrderedMap<GameId, Game>,
}

impl Tournament {
    /// Create an open tournament with no games.
    pub fn new(id: TournamentId, location: String, max_games_per_player: u32) -> Self {
        Self {
            id,
            location,
            max_games_per_player,
            finished: false,
            winner: None,
            player_count: 0,
            games: OrderedMap::new(),
        }
    }

    /// Recorded games, keyed by sequence id.
    pub fn games(&self) -> &OrderedMap<GameId, Game> {
        &self.games
    }

    pub(crate) fn games_mut(&mut self) -> &mut OrderedMap<GameId, Game> {
        &mut self.games
    }

    pub fn game_count(&self) -> usize {
        self.games.len()
    }

    /// Sequence id the next recorded game will receive.
    pub fn next_game_id(&self) -> GameId {
        self.games.len() as GameId + 1
    }

    /// Returns true if `a` and `b` already played each other here.
    pub fn has_played(&self, a: PlayerId, b: PlayerId) -> bool {
        self.games.values().any(|game| game.is_between(a, b))
    }

    /// Number of games `player` has played here.
    pub fn games_played_by(&self, player: PlayerId) -> usize {
        self.games.values().filter(|game| game.involves(player)).count()
    }

    /// Returns true if `player` may not play any more games here.
    pub fn reached_game_limit(&self, player: PlayerId) -> bool {
        self.games_played_by(player) >= self.max_games_per_player as usize
    }

    /// Store a game and refresh the participant count.
    pub(crate) fn record_game(&mut self, game: Game) -> Result<(), MapError> {
        self.games.put(game.id, game)?;
        self.player_count = self.count_distinct_players();
        Ok(())
    }

    /// Count distinct players with a full scan of the games.
    pub fn count_distinct_players(&self) -> usize {
        self.games
            .values()
            .flat_map(|game| [game.first_player, game.second_player])
            .collect::<BTreeSet<_>>()
            .len()
    }

    /// Duration of the longest game, 0 without games.
    pub fn longest_play_time(&self) -> u32 {
        self.games
            .values()
            .map(|game| game.play_time)
            .max()
            .unwrap_or(0)
    }

    /// Mean game duration, 0 without games.
    pub fn average_play_time(&self) -> f64 {
        if self.games.is_empty() {
            return 0.0;
        }
        let total: u64 = self.games.values().map(|game| game.play_time as u64).sum();
        total as f64 / self.games.len() as f64
    }

    /// Table ordered from first place to last.
    ///
    /// Only games still counted for a participant appear on their line, so
    /// players removed from the system drop out of the table.
    pub fn standings(&self) -> Vec<Standing> {
        let mut table: BTreeMap<PlayerId, Standing> = BTreeMap::new();
        for game in self.games.values() {
            for player in [game.first_player, game.second_player] {
                if !game.counts_for(player) {
                    continue;
                }
                if let Some(result) = game.result_for(player) {
                    table
                        .entry(player)
                        .or_insert_with(|| Standing::new(player))
                        .record
                        .add(result);
                }
            }
        }
        let mut table: Vec<Standing> = table.into_values().collect();
        table.sort_by(crate::calculate::compare_standings);
        table
    }

    /// Close the tournament with the given winner.
    pub(crate) fn finish(&mut self, winner: PlayerId) {
        self.finished = true;
        self.winner = Some(winner);
    }

    /// Summary for reporting, available once the tournament has finished.
    pub fn statistics(&self) -> Option<TournamentStatistics> {
        let winner = self.winner.filter(|_| self.finished)?;
        Some(TournamentStatistics {
            tournament_id: self.id,
            winner,
            longest_game_time: self.longest_play_time(),
            average_game_time: self.average_play_time(),
            location: self.location.clone(),
            total_games: self.game_count(),
            total_players: self.player_count,
        })
    }
}
