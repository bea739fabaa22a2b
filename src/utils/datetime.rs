/// Pure date/time utility functions (platform-agnostic)
use chrono::{Datelike, Local};

/// Check if a date matches month and day (ignoring year)
pub fn matches_birthday(month: u32, day: u32, target_month: u32, target_day: u32) -> bool {
    month == target_month && day == target_day
}

/// Get the current month and day as a tuple
pub fn current_month_day() -> (u32, u32) {
    let now = Local::now();
    (now.month(), now.day())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_birthday() {
        assert!(matches_birthday(3, 15, 3, 15));
        assert!(matches_birthday(12, 31, 12, 31));

        assert!(!matches_birthday(3, 15, 3, 16));
        assert!(!matches_birthday(3, 15, 4, 15));
        assert!(!matches_birthday(1, 1, 12, 31));
    }

    #[test]
    fn test_current_month_day() {
        let (month, day) = current_month_day();
        // Just verify they're in valid ranges
        assert!((1..=12).contains(&month));
        assert!((1..=31).contains(&day));
    }
}
