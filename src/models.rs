use anyhow::{Result, bail};
use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::types::{Cadence, MeasurementKind};

/// Catalog entry for one exercise. Seeded from the built-in preset list
/// on first launch, extendable with user-defined entries, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ExerciseDefinition {
    pub id: String,
    pub name: String,
    pub kind: MeasurementKind,
    pub unit: String,
    pub category: String,
    pub builtin: bool,
}

/// A user's incremental goal for one exercise: start at `starting_amount`,
/// add `increment_amount` every cadence period until `target_amount`.
///
/// The numeric goal fields are frozen at creation; only `active` and
/// `completed_at` change afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Plan {
    pub id: String,
    pub name: String,
    pub exercise_id: String,
    pub starting_amount: i64,
    pub target_amount: i64,
    pub increment_amount: i64,
    pub cadence: Cadence,
    pub start_date: NaiveDate,
    pub active: bool,
    pub completed_at: Option<NaiveDate>,
    /// Reminder time as "HH:MM"; delivery belongs to the platform layer.
    pub reminder_time: Option<String>,
}

impl Plan {
    /// Fail-fast constructor. Rejects any plan whose goal parameters are
    /// inconsistent so the scheduler never sees invalid inputs.
    pub fn new(
        name: &str,
        exercise_id: &str,
        starting_amount: i64,
        target_amount: i64,
        increment_amount: i64,
        cadence: Cadence,
        start_date: NaiveDate,
    ) -> Result<Self> {
        if starting_amount <= 0 {
            bail!("starting amount must be positive (got {starting_amount})");
        }
        if target_amount <= starting_amount {
            bail!(
                "target amount must be greater than starting amount ({target_amount} <= {starting_amount})"
            );
        }
        if increment_amount <= 0 {
            bail!("increment amount must be positive (got {increment_amount})");
        }

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            exercise_id: exercise_id.to_string(),
            starting_amount,
            target_amount,
            increment_amount,
            cadence,
            start_date,
            active: true,
            completed_at: None,
            reminder_time: None,
        })
    }
}

/// One completed workout against a plan on a specific date. Immutable:
/// written exactly once, only superseded by later sessions.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Session {
    pub id: String,
    pub plan_id: String,
    pub date: NaiveDate,
    pub amount_completed: i64,
    pub amount_targeted: i64,
    pub xp_awarded: i64,
    pub duration_seconds: Option<i64>,
    pub completed_at: DateTime<Local>,
}

/// Singleton aggregate row (id = 1). `level` is always re-derived from
/// `total_xp` through the progression curve on every write, and
/// `current_streak <= longest_streak` holds after every update.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AggregateStats {
    pub total_xp: i64,
    pub level: i64,
    pub current_streak: i64,
    pub longest_streak: i64,
    pub total_workouts: i64,
    pub streak_freezes: i64,
    pub last_workout_date: Option<NaiveDate>,
}

/// Unlock state for one achievement. `unlocked_at` transitions from null
/// to a timestamp exactly once and is never reset.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AchievementUnlockRecord {
    pub achievement_id: String,
    pub unlocked_at: Option<DateTime<Local>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(n: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, n).unwrap()
    }

    #[test]
    fn plan_new_accepts_valid_goals() {
        let plan = Plan::new("Road to 50", "push-ups", 5, 50, 2, Cadence::Weekly, day(1)).unwrap();
        assert!(plan.active);
        assert!(plan.completed_at.is_none());
        assert_eq!(plan.starting_amount, 5);
    }

    #[test]
    fn plan_new_rejects_invalid_goals() {
        assert!(Plan::new("p", "push-ups", 0, 50, 2, Cadence::Daily, day(1)).is_err());
        assert!(Plan::new("p", "push-ups", -3, 50, 2, Cadence::Daily, day(1)).is_err());
        assert!(Plan::new("p", "push-ups", 50, 50, 2, Cadence::Daily, day(1)).is_err());
        assert!(Plan::new("p", "push-ups", 60, 50, 2, Cadence::Daily, day(1)).is_err());
        assert!(Plan::new("p", "push-ups", 5, 50, 0, Cadence::Daily, day(1)).is_err());
    }
}
