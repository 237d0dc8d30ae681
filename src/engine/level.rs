/// XP awarded for one completed workout. A flat constant on purpose: no
/// streak or performance multipliers, so inflating logged amounts buys
/// nothing.
pub const XP_PER_WORKOUT: i64 = 50;

/// The level table: cumulative XP floor paired with the title earned at
/// that level. One sequence of pairs so the thresholds and titles cannot
/// drift out of step. Level n (1-based) starts at `LEVELS[n - 1].0`.
pub const LEVELS: &[(i64, &str)] = &[
    (0, "Starter"),
    (300, "Beginner"),
    (700, "Novice"),
    (1_200, "Apprentice"),
    (1_800, "Challenger"),
    (2_500, "Contender"),
    (3_300, "Regular"),
    (4_200, "Committed"),
    (5_200, "Dedicated"),
    (6_300, "Determined"),
    (7_500, "Disciplined"),
    (8_800, "Relentless"),
    (10_200, "Athlete"),
    (11_700, "Competitor"),
    (13_300, "Veteran"),
    (15_000, "Elite"),
    (16_800, "Champion"),
    (18_700, "Master"),
    (20_700, "Grandmaster"),
    (22_800, "Legend"),
    (25_000, "Mythic"),
    (27_300, "Immortal"),
];

/// Highest 1-based level whose XP floor has been reached. Never below 1,
/// even for zero or negative XP.
pub fn level_for_xp(xp: i64) -> i64 {
    let reached = LEVELS.iter().take_while(|(floor, _)| *floor <= xp).count();
    (reached as i64).max(1)
}

/// XP floor of `level`, saturating at the last table entry.
pub fn xp_floor_for_level(level: i64) -> i64 {
    LEVELS[clamp_index(level - 1)].0
}

/// XP floor of the next level, i.e. where `level` ends. Saturates at the
/// last table entry, so the top level's ceiling equals its floor.
pub fn xp_ceiling_for_level(level: i64) -> i64 {
    LEVELS[clamp_index(level)].0
}

/// Title earned at `level`, saturating at the last title.
pub fn title_for_level(level: i64) -> &'static str {
    LEVELS[clamp_index(level - 1)].1
}

/// Fraction of the way through the current level, in [0, 1]. At the top
/// of the table floor and ceiling coincide and the fraction is 1.
pub fn xp_progress_fraction(total_xp: i64) -> f64 {
    let level = level_for_xp(total_xp);
    let floor = xp_floor_for_level(level);
    let ceiling = xp_ceiling_for_level(level);
    if ceiling <= floor {
        return 1.0;
    }

    ((total_xp - floor) as f64 / (ceiling - floor) as f64).clamp(0.0, 1.0)
}

/// XP still needed to reach the next level floor (0 at the table top).
pub fn xp_remaining_to_next_level(total_xp: i64) -> i64 {
    (xp_ceiling_for_level(level_for_xp(total_xp)) - total_xp).max(0)
}

fn clamp_index(i: i64) -> usize {
    i.clamp(0, LEVELS.len() as i64 - 1) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_thresholds_are_strictly_ascending_from_zero() {
        assert_eq!(LEVELS[0].0, 0);
        assert!(LEVELS.len() >= 20);
        for pair in LEVELS.windows(2) {
            assert!(pair[0].0 < pair[1].0, "thresholds must ascend");
        }
    }

    #[test]
    fn level_for_xp_at_boundaries() {
        assert_eq!(level_for_xp(0), 1);
        assert_eq!(level_for_xp(299), 1);
        assert_eq!(level_for_xp(300), 2);
        assert_eq!(level_for_xp(699), 2);
        assert_eq!(level_for_xp(700), 3);
    }

    #[test]
    fn level_for_xp_never_drops_below_one() {
        assert_eq!(level_for_xp(-500), 1);
    }

    #[test]
    fn level_for_xp_is_monotone() {
        let mut prev = 0;
        for xp in (0..30_000).step_by(17) {
            let level = level_for_xp(xp);
            assert!(level >= prev);
            prev = level;
        }
    }

    #[test]
    fn floor_and_ceiling_bracket_the_xp() {
        for xp in [0, 1, 299, 300, 4_199, 9_999, 24_999] {
            let level = level_for_xp(xp);
            assert!(xp_floor_for_level(level) <= xp);
            assert!(xp < xp_ceiling_for_level(level));
        }
    }

    #[test]
    fn titles_saturate_beyond_table() {
        assert_eq!(title_for_level(1), "Starter");
        assert_eq!(title_for_level(2), "Beginner");
        assert_eq!(title_for_level(999), "Immortal");
        assert_eq!(xp_floor_for_level(999), 27_300);
        assert_eq!(xp_ceiling_for_level(999), 27_300);
    }

    #[test]
    fn progress_fraction_is_clamped() {
        assert_eq!(xp_progress_fraction(0), 0.0);
        assert_eq!(xp_progress_fraction(150), 0.5);
        // Past the table top the fraction pins at 1 instead of dividing
        // by a zero-width level.
        assert_eq!(xp_progress_fraction(40_000), 1.0);
    }

    #[test]
    fn remaining_xp_to_next_level() {
        assert_eq!(xp_remaining_to_next_level(0), 300);
        assert_eq!(xp_remaining_to_next_level(250), 50);
        assert_eq!(xp_remaining_to_next_level(40_000), 0);
    }
}
