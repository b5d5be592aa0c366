//! Statistics calculation engine.
//!
//! Pure functions behind the player and tournament aggregates:
//! - Level score and tournament points
//! - Running average maintenance (add and roll back)
//! - Tournament winner tie-break cascade
//! - Player ranking by level

use std::cmp::Ordering;

use crate::models::{PlayerId, PlayerLevel, Standing};

/// Level weights per result.
const WIN_WEIGHT: f64 = 6.0;
const LOSS_WEIGHT: f64 = -10.0;
const DRAW_WEIGHT: f64 = 2.0;

/// Tournament points per result.
const POINTS_PER_WIN: u32 = 2;
const POINTS_PER_DRAW: u32 = 1;

/// Calculate a player's level from wins/losses/draws.
pub fn calculate_level(wins: u32, losses: u32, draws: u32) -> f64 {
    let total = wins + losses + draws;
    if total == 0 {
        0.0
    } else {
        (WIN_WEIGHT * wins as f64 + LOSS_WEIGHT * losses as f64 + DRAW_WEIGHT * draws as f64)
            / total as f64
    }
}

/// Calculate tournament points from wins and draws.
pub fn calculate_points(wins: u32, draws: u32) -> u32 {
    POINTS_PER_WIN * wins + POINTS_PER_DRAW * draws
}

/// Fold one more value into a mean taken over `count` values.
pub fn add_to_average(average: f64, count: u32, value: u32) -> f64 {
    (average * count as f64 + value as f64) / (count as f64 + 1.0)
}

/// Take one value back out of a mean taken over `count` values.
///
/// Returns 0 when no value would remain.
pub fn remove_from_average(average: f64, count: u32, value: u32) -> f64 {
    if count <= 1 {
        return 0.0;
    }
    (average * count as f64 - value as f64) / (count as f64 - 1.0)
}

/// Order two table lines from first place to last: more points, then fewer
/// losses, then more wins, then the smaller id.
pub fn compare_standings(a: &Standing, b: &Standing) -> Ordering {
    b.points()
        .cmp(&a.points())
        .then(a.record.losses.cmp(&b.record.losses))
        .then(b.record.wins.cmp(&a.record.wins))
        .then(a.player_id.cmp(&b.player_id))
}

/// Pick the tournament winner from a table.
///
/// Each criterion only looks at the players that survived the previous one.
/// Returns `None` for an empty table.
pub fn select_winner(standings: &[Standing]) -> Option<PlayerId> {
    let best_points = standings.iter().map(Standing::points).max()?;
    let survivors: Vec<&Standing> = standings
        .iter()
        .filter(|s| s.points() == best_points)
        .collect();

    let fewest_losses = survivors.iter().map(|s| s.record.losses).min()?;
    let survivors: Vec<&Standing> = survivors
        .into_iter()
        .filter(|s| s.record.losses == fewest_losses)
        .collect();

    let most_wins = survivors.iter().map(|s| s.record.wins).max()?;
    survivors
        .into_iter()
        .filter(|s| s.record.wins == most_wins)
        .map(|s| s.player_id)
        .min()
}

/// Sort a level report: highest level first, ties by ascending id.
pub fn rank_by_level(levels: &mut [PlayerLevel]) {
    levels.sort_by(|a, b| {
        b.level
            .total_cmp(&a.level)
            .then(a.player_id.cmp(&b.player_id))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WinLossRecord;
    use pretty_assertions::assert_eq;

    fn standing(player_id: PlayerId, wins: u32, losses: u32, draws: u32) -> Standing {
        Standing {
            player_id,
            record: WinLossRecord::new(wins, losses, draws),
        }
    }

    #[test]
    fn test_calculate_level() {
        assert_eq!(calculate_level(0, 0, 0), 0.0);
        assert!((calculate_level(1, 0, 0) - 6.0).abs() < 1e-9);
        assert!((calculate_level(0, 1, 0) + 10.0).abs() < 1e-9);
        assert!((calculate_level(1, 1, 1) - (-2.0 / 3.0)).abs() < 1e-9);
    }

    #[test]
    fn test_calculate_points() {
        assert_eq!(calculate_points(0, 0), 0);
        assert_eq!(calculate_points(3, 1), 7);
    }

    #[test]
    fn test_running_average() {
        let mut average = 0.0;
        for (count, value) in [10, 20, 60].into_iter().enumerate() {
            average = add_to_average(average, count as u32, value);
        }
        assert!((average - 30.0).abs() < 1e-9);

        let average = remove_from_average(average, 3, 60);
        assert!((average - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_remove_last_value_resets() {
        assert_eq!(remove_from_average(42.0, 1, 42), 0.0);
        assert_eq!(remove_from_average(42.0, 0, 42), 0.0);
    }

    #[test]
    fn test_winner_by_points() {
        let table = vec![standing(1, 1, 1, 0), standing(2, 2, 0, 0), standing(3, 0, 1, 1)];
        assert_eq!(select_winner(&table), Some(2));
    }

    #[test]
    fn test_winner_by_fewest_losses() {
        // Both on 4 points; player 2 lost fewer games.
        let table = vec![standing(1, 2, 2, 0), standing(2, 1, 0, 2)];
        assert_eq!(select_winner(&table), Some(2));
    }

    #[test]
    fn test_winner_by_most_wins() {
        // Same points, same losses; player 3 won more.
        let table = vec![standing(1, 1, 1, 2), standing(3, 2, 1, 0)];
        assert_eq!(select_winner(&table), Some(3));
    }

    #[test]
    fn test_winner_by_smallest_id() {
        let table = vec![standing(9, 1, 0, 1), standing(4, 1, 0, 1), standing(6, 1, 0, 1)];
        assert_eq!(select_winner(&table), Some(4));
    }

    #[test]
    fn test_tie_break_applies_only_to_survivors() {
        // Player 1 has the most wins overall but is out after the points step.
        let table = vec![standing(1, 3, 5, 0), standing(2, 2, 0, 3), standing(5, 1, 0, 5)];
        assert_eq!(select_winner(&table), Some(2));
    }

    #[test]
    fn test_winner_empty_table() {
        assert_eq!(select_winner(&[]), None);
    }

    #[test]
    fn test_compare_standings_matches_select_winner() {
        let mut table = vec![
            standing(5, 1, 0, 5),
            standing(1, 3, 5, 0),
            standing(2, 3, 1, 1),
            standing(4, 1, 0, 5),
        ];
        let winner = select_winner(&table);
        table.sort_by(compare_standings);
        let order: Vec<PlayerId> = table.iter().map(|s| s.player_id).collect();
        assert_eq!(order, vec![4, 5, 2, 1]);
        assert_eq!(winner, Some(4));
    }

    #[test]
    fn test_rank_by_level() {
        let mut levels = vec![
            PlayerLevel {
                player_id: 3,
                level: 2.0,
            },
            PlayerLevel {
                player_id: 1,
                level: -4.0,
            },
            PlayerLevel {
                player_id: 2,
                level: 2.0,
            },
            PlayerLevel {
                player_id: 7,
                level: 6.0,
            },
        ];
        rank_by_level(&mut levels);
        let order: Vec<PlayerId> = levels.iter().map(|l| l.player_id).collect();
        assert_eq!(order, vec![7, 2, 3, 1]);
    }
}
