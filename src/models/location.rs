//! Tournament location validation.

/// Returns true if `location` is a valid tournament location.
///
/// A valid location starts with an uppercase ASCII letter, followed only by
/// lowercase ASCII letters and plain spaces.
pub fn is_valid_location(location: &str) -> bool {
    let mut chars = location.chars();
    match chars.next() {
        Some(first) if first.is_ascii_uppercase() => {
            chars.all(|c| c.is_ascii_lowercase() || c == ' ')
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_locations() {
        assert!(is_valid_location("Haifa"));
        assert!(is_valid_location("Tel aviv"));
        assert!(is_valid_location("B"));
        assert!(is_valid_location("Rishon le zion "));
    }

    #[test]
    fn test_empty_location() {
        assert!(!is_valid_location(""));
    }

    #[test]
    fn test_lowercase_first_letter() {
        assert!(!is_valid_location("haifa"));
        assert!(!is_valid_location(" Haifa"));
    }

    #[test]
    fn test_invalid_following_characters() {
        assert!(!is_valid_location("Tel Aviv"));
        assert!(!is_valid_location("Haifa1"));
        assert!(!is_valid_location("Tel-aviv"));
        assert!(!is_valid_location("Tel\taviv"));
        assert!(!is_valid_location("Bé"));
    }
}
