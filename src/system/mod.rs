//! Tournament system orchestrator.
//!
//! [`ChessSystem`] owns the tournament table and the player table. Every
//! mutation goes through its methods, which validate the whole request before
//! touching any state: a call either succeeds completely or leaves the system
//! unchanged.

use thiserror::Error;
use tracing::{debug, info};

use crate::calculate::{rank_by_level, select_winner};
use crate::map::{MapError, OrderedMap};
use crate::models::{
    is_valid_id, is_valid_location, Game, Player, PlayerId, PlayerLevel, Tournament,
    TournamentId, TournamentStatistics, Winner,
};

/// Errors returned by system operations.
#[derive(Debug, Error)]
pub enum ChessError {
    #[error("a required argument is missing")]
    NullArgument,

    #[error("invalid id")]
    InvalidId,

    #[error("invalid tournament location")]
    InvalidLocation,

    #[error("invalid maximum number of games per player")]
    InvalidMaxGames,

    #[error("tournament already exists")]
    TournamentAlreadyExists,

    #[error("tournament does not exist")]
    TournamentNotExist,

    #[error("tournament has already ended")]
    TournamentEnded,

    #[error("player does not exist")]
    PlayerNotExist,

    #[error("these players already played each other in this tournament")]
    GameAlreadyExists,

    #[error("invalid play time")]
    InvalidPlayTime,

    #[error("a player exceeded the games limit of this tournament")]
    ExceededGames,

    #[error("tournament has no games")]
    NoGames,

    #[error("no tournament has ended yet")]
    NoTournamentsEnded,

    #[error("failed to save report: {0}")]
    SaveFailure(#[from] std::io::Error),

    #[error("out of memory")]
    OutOfMemory,
}

impl From<MapError> for ChessError {
    fn from(err: MapError) -> Self {
        match err {
            MapError::OutOfMemory => ChessError::OutOfMemory,
        }
    }
}

pub type Result<T> = std::result::Result<T, ChessError>;

/// Tournaments, players and their games.
#[derive(Debug, Clone, Default)]
pub struct ChessSystem {
    tournaments: OrderedMap<TournamentId, Tournament>,
    players: OrderedMap<PlayerId, Player>,
}

impl ChessSystem {
    /// Create an empty system.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new, open tournament.
    pub fn add_tournament(
        &mut self,
        tournament_id: TournamentId,
        max_games_per_player: i32,
        location: &str,
    ) -> Result<()> {
        if !is_valid_id(tournament_id) {
            return Err(ChessError::InvalidId);
        }
        if !is_valid_location(location) {
            return Err(ChessError::InvalidLocation);
        }
        if self.tournaments.contains(&tournament_id) {
            return Err(ChessError::TournamentAlreadyExists);
        }
        let max_games = u32::try_from(max_games_per_player)
            .ok()
            .filter(|&max| max > 0)
            .ok_or(ChessError::InvalidMaxGames)?;

        self.tournaments.put(
            tournament_id,
            Tournament::new(tournament_id, location.to_string(), max_games),
        )?;

        debug!(
            "Added tournament {} at {} (max {} games per player)",
            tournament_id, location, max_games
        );
        Ok(())
    }

    /// Record a game in an open tournament and update both players.
    pub fn add_game(
        &mut self,
        tournament_id: TournamentId,
        first_player: PlayerId,
        second_player: PlayerId,
        winner: Winner,
        play_time: i32,
    ) -> Result<()> {
        if !is_valid_id(tournament_id)
            || !is_valid_id(first_player)
            || !is_valid_id(second_player)
            || first_player == second_player
        {
            return Err(ChessError::InvalidId);
        }

        let tournament = self
            .tournaments
            .get_mut(&tournament_id)
            .ok_or(ChessError::TournamentNotExist)?;
        if tournament.finished {
            return Err(ChessError::TournamentEnded);
        }
        if tournament.has_played(first_player, second_player) {
            return Err(ChessError::GameAlreadyExists);
        }
        let play_time = u32::try_from(play_time).map_err(|_| ChessError::InvalidPlayTime)?;
        if tournament.reached_game_limit(first_player)
            || tournament.reached_game_limit(second_player)
        {
            return Err(ChessError::ExceededGames);
        }

        // Reserve everything up front so nothing below can fail halfway.
        tournament.games_mut().reserve(1)?;
        self.players.reserve(2)?;

        let game = Game::new(
            tournament.next_game_id(),
            first_player,
            second_player,
            winner,
            play_time,
        );
        let game_id = game.id;
        let results = [
            (first_player, game.result_for(first_player)),
            (second_player, game.result_for(second_player)),
        ];
        tournament.record_game(game)?;

        for (player_id, result) in results {
            if !self.players.contains(&player_id) {
                self.players.put(player_id, Player::new(player_id))?;
                debug!("Created player {}", player_id);
            }
            if let (Some(player), Some(result)) = (self.players.get_mut(&player_id), result) {
                player.record_game(result, play_time);
            }
        }

        debug!(
            "Recorded game {} in tournament {}: {} vs {} ({}, {})",
            game_id, tournament_id, first_player, second_player, winner, play_time
        );
        Ok(())
    }

    /// Remove a tournament and roll its games back out of the player stats.
    pub fn remove_tournament(&mut self, tournament_id: TournamentId) -> Result<()> {
        if !is_valid_id(tournament_id) {
            return Err(ChessError::InvalidId);
        }
        let tournament = self
            .tournaments
            .remove(&tournament_id)
            .ok_or(ChessError::TournamentNotExist)?;

        for game in tournament.games().values() {
            for player_id in [game.first_player, game.second_player] {
                if !game.counts_for(player_id) {
                    continue;
                }
                let result = game.result_for(player_id);
                if let (Some(player), Some(result)) = (self.players.get_mut(&player_id), result) {
                    player.rollback_game(result, game.play_time);
                }
            }
        }

        info!(
            "Removed tournament {} ({} games rolled back)",
            tournament_id,
            tournament.game_count()
        );
        Ok(())
    }

    /// Remove a player, forfeiting their games in every open tournament.
    ///
    /// Games stay in every tournament's history but are detached from the
    /// player, so a later player reusing the id starts from a clean record.
    pub fn remove_player(&mut self, player_id: PlayerId) -> Result<()> {
        if !is_valid_id(player_id) {
            return Err(ChessError::InvalidId);
        }
        if !self.players.contains(&player_id) {
            return Err(ChessError::PlayerNotExist);
        }

        let mut forfeited = 0;
        for tournament in self.tournaments.values_mut() {
            let open = !tournament.finished;
            for game in tournament.games_mut().values_mut() {
                if !game.counts_for(player_id) {
                    continue;
                }
                if open {
                    let survivor = game.opponent_of(player_id);
                    if let (Some(survivor), Some(previous)) = (survivor, game.forfeit(player_id)) {
                        if game.counts_for(survivor) {
                            if let Some(player) = self.players.get_mut(&survivor) {
                                player.convert_to_win(previous);
                            }
                        }
                        forfeited += 1;
                    }
                }
                game.mark_removed(player_id);
            }
        }

        self.players.remove(&player_id);
        info!(
            "Removed player {} ({} games forfeited)",
            player_id, forfeited
        );
        Ok(())
    }

    /// Close a tournament and pick its winner.
    ///
    /// Players removed from the system cannot win. When every participant
    /// has been removed there is nobody left to rank, and the call fails
    /// with [`ChessError::NoGames`] even though games were recorded.
    pub fn end_tournament(&mut self, tournament_id: TournamentId) -> Result<()> {
        if !is_valid_id(tournament_id) {
            return Err(ChessError::InvalidId);
        }
        let tournament = self
            .tournaments
            .get_mut(&tournament_id)
            .ok_or(ChessError::TournamentNotExist)?;
        if tournament.finished {
            return Err(ChessError::TournamentEnded);
        }
        if tournament.game_count() == 0 {
            return Err(ChessError::NoGames);
        }

        let winner = select_winner(&tournament.standings()).ok_or(ChessError::NoGames)?;
        tournament.finish(winner);

        info!("Tournament {} ended, winner: {}", tournament_id, winner);
        Ok(())
    }

    /// Mean duration of every game `player_id` currently has counted.
    pub fn average_play_time(&self, player_id: PlayerId) -> Result<f64> {
        if !is_valid_id(player_id) {
            return Err(ChessError::InvalidId);
        }
        self.players
            .get(&player_id)
            .map(|player| player.average_play_time)
            .ok_or(ChessError::PlayerNotExist)
    }

    pub fn tournament(&self, tournament_id: TournamentId) -> Option<&Tournament> {
        self.tournaments.get(&tournament_id)
    }

    pub fn player(&self, player_id: PlayerId) -> Option<&Player> {
        self.players.get(&player_id)
    }

    /// Tournaments in ascending id order.
    pub fn tournaments(&self) -> impl Iterator<Item = &Tournament> {
        self.tournaments.values()
    }

    /// Players in ascending id order.
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.players.values()
    }

    /// Every player's level, highest first, ties by ascending id.
    pub fn player_levels(&self) -> Vec<PlayerLevel> {
        let mut levels: Vec<PlayerLevel> = self
            .players
            .values()
            .map(|player| PlayerLevel {
                player_id: player.id,
                level: player.level(),
            })
            .collect();
        rank_by_level(&mut levels);
        levels
    }

    /// Statistics of every finished tournament, in ascending id order.
    pub fn tournament_statistics(&self) -> Result<Vec<TournamentStatistics>> {
        let stats: Vec<TournamentStatistics> = self
            .tournaments
            .values()
            .filter_map(Tournament::statistics)
            .collect();
        if stats.is_empty() {
            return Err(ChessError::NoTournamentsEnded);
        }
        Ok(stats)
    }

    /// Deep copy that reports allocation failure instead of aborting.
    pub fn try_clone(&self) -> Result<Self> {
        Ok(Self {
            tournaments: self.tournaments.try_clone()?,
            players: self.players.try_clone()?,
        })
    }
}
