//! Identifier types.
//!
//! Tournament and player ids are supplied by callers as plain integers and
//! are only meaningful when positive. Game ids are assigned internally as a
//! per-tournament sequence starting at 1.

/// Caller-supplied tournament identifier.
pub type TournamentId = i32;

/// Caller-supplied player identifier.
pub type PlayerId = i32;

/// Per-tournament game sequence number.
pub type GameId = u32;

/// Returns true if `id` can identify a tournament or a player.
pub fn is_valid_id(id: i32) -> bool {
    id > 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_ids_are_valid() {
        assert!(is_valid_id(1));
        assert!(is_valid_id(i32::MAX));
    }

    #[test]
    fn test_zero_and_negative_ids_are_invalid() {
        assert!(!is_valid_id(0));
        assert!(!is_valid_id(-7));
        assert!(!is_valid_id(i32::MIN));
    }
}
