use chrono::NaiveDate;

/// Whether the streak is still alive on `today`: the last workout was
/// today or yesterday. No workout yet means no streak.
pub fn is_streak_active(last_workout: Option<NaiveDate>, today: NaiveDate) -> bool {
    match last_workout {
        None => false,
        Some(last) => {
            let gap = (today - last).num_days();
            gap == 0 || gap == 1
        }
    }
}

/// Streak value after recording a workout on `today`.
///
/// First workout ever starts the streak at 1. A second workout on the
/// same day leaves it untouched, a workout exactly one day after the
/// last extends it, and anything later starts over at 1. Consuming a
/// streak freeze does not feed into this; the counter lives elsewhere
/// and decrements independently.
pub fn next_streak_value(last_workout: Option<NaiveDate>, today: NaiveDate, current: i64) -> i64 {
    match last_workout {
        None => 1,
        Some(last) => match (today - last).num_days() {
            0 => current,
            1 => current + 1,
            _ => 1,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 15).unwrap()
    }

    #[test]
    fn no_prior_workout_means_no_streak() {
        assert!(!is_streak_active(None, today()));
        assert_eq!(next_streak_value(None, today(), 0), 1);
    }

    #[test]
    fn same_day_and_yesterday_keep_the_streak_alive() {
        assert!(is_streak_active(Some(today()), today()));
        assert!(is_streak_active(Some(today() - Duration::days(1)), today()));
        assert!(!is_streak_active(Some(today() - Duration::days(2)), today()));
    }

    #[test]
    fn second_workout_same_day_is_idempotent() {
        let streak = next_streak_value(Some(today()), today(), 5);
        assert_eq!(streak, 5);
        assert_eq!(next_streak_value(Some(today()), today(), streak), 5);
    }

    #[test]
    fn workout_after_yesterday_extends_the_streak() {
        assert_eq!(
            next_streak_value(Some(today() - Duration::days(1)), today(), 5),
            6
        );
    }

    #[test]
    fn gap_of_two_or_more_days_resets_to_one() {
        assert_eq!(
            next_streak_value(Some(today() - Duration::days(2)), today(), 5),
            1
        );
        assert_eq!(
            next_streak_value(Some(today() - Duration::days(3)), today(), 5),
            1
        );
        assert_eq!(
            next_streak_value(Some(today() - Duration::days(90)), today(), 42),
            1
        );
    }
}
