//! Scoring and progression rules.
//!
//! Clear points come from a fixed table indexed by rows cleared in one lock,
//! doubled for a T-spin lock and multiplied by the current level. The level
//! is derived from the cumulative cleared-line count, and the gravity
//! interval is derived from the level with a hard floor.

use gridfall_types::{
    BASE_DROP_MS, DROP_INTERVAL_MIN_MS, DROP_SPEEDUP_PER_LEVEL_MS, LINES_PER_LEVEL, LINE_SCORES,
    T_SPIN_MULTIPLIER,
};

/// Points awarded for a lock that cleared `rows` rows at `level`.
pub fn points_for_clear(rows: u32, t_spin: bool, level: u32) -> u32 {
    if rows == 0 || rows as usize >= LINE_SCORES.len() {
        return 0;
    }
    let mut points = LINE_SCORES[rows as usize];
    if t_spin {
        points *= T_SPIN_MULTIPLIER;
    }
    points * level
}

/// Level for a cumulative cleared-line count. Starts at 1.
pub fn level_for_lines(lines: u32) -> u32 {
    lines / LINES_PER_LEVEL + 1
}

/// Gravity interval for a level, in milliseconds.
///
/// Each level shaves a fixed amount off the base interval, floored so high
/// levels stay playable.
pub fn drop_interval_ms(level: u32) -> u32 {
    BASE_DROP_MS
        .saturating_sub(level.saturating_sub(1).saturating_mul(DROP_SPEEDUP_PER_LEVEL_MS))
        .max(DROP_INTERVAL_MIN_MS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_points_at_level_one() {
        assert_eq!(points_for_clear(0, false, 1), 0);
        assert_eq!(points_for_clear(1, false, 1), 40);
        assert_eq!(points_for_clear(2, false, 1), 100);
        assert_eq!(points_for_clear(3, false, 1), 300);
        assert_eq!(points_for_clear(4, false, 1), 1200);
    }

    #[test]
    fn t_spin_doubles_the_table_value() {
        assert_eq!(points_for_clear(1, true, 1), 80);
        assert_eq!(points_for_clear(2, true, 1), 200);
        assert_eq!(points_for_clear(3, true, 3), 1800);
    }

    #[test]
    fn points_scale_with_level() {
        assert_eq!(points_for_clear(1, false, 5), 200);
        assert_eq!(points_for_clear(4, false, 2), 2400);
    }

    #[test]
    fn level_progression() {
        assert_eq!(level_for_lines(0), 1);
        assert_eq!(level_for_lines(9), 1);
        assert_eq!(level_for_lines(10), 2);
        assert_eq!(level_for_lines(25), 3);
        assert_eq!(level_for_lines(100), 11);
    }

    #[test]
    fn drop_interval_speeds_up_and_floors() {
        assert_eq!(drop_interval_ms(1), 1000);
        assert_eq!(drop_interval_ms(2), 900);
        assert_eq!(drop_interval_ms(9), 200);
        assert_eq!(drop_interval_ms(10), 100);
        assert_eq!(drop_interval_ms(50), 100);
    }

    #[test]
    fn interval_is_monotonically_non_increasing() {
        let mut prev = drop_interval_ms(1);
        for level in 2..60 {
            let next = drop_interval_ms(level);
            assert!(next <= prev, "level {level}");
            assert!(next >= DROP_INTERVAL_MIN_MS);
            prev = next;
        }
    }
}
