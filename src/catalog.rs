//! Compiled-in presets: the starter exercise catalog, a handful of
//! ready-made plans, and the full achievement catalog. All fixed at
//! build time; user-defined exercises and plans live next to these in
//! the database but never replace them.

use crate::engine::achievement::{AchievementDefinition, Requirement};
use crate::types::{Cadence, MeasurementKind};

pub struct PresetExercise {
    pub id: &'static str,
    pub name: &'static str,
    pub kind: MeasurementKind,
    pub unit: &'static str,
    pub category: &'static str,
}

pub const PRESET_EXERCISES: &[PresetExercise] = &[
    PresetExercise {
        id: "push-ups",
        name: "Push-ups",
        kind: MeasurementKind::Reps,
        unit: "reps",
        category: "upper-body",
    },
    PresetExercise {
        id: "squats",
        name: "Squats",
        kind: MeasurementKind::Reps,
        unit: "reps",
        category: "lower-body",
    },
    PresetExercise {
        id: "pull-ups",
        name: "Pull-ups",
        kind: MeasurementKind::Reps,
        unit: "reps",
        category: "upper-body",
    },
    PresetExercise {
        id: "sit-ups",
        name: "Sit-ups",
        kind: MeasurementKind::Reps,
        unit: "reps",
        category: "core",
    },
    PresetExercise {
        id: "lunges",
        name: "Lunges",
        kind: MeasurementKind::Reps,
        unit: "reps",
        category: "lower-body",
    },
    PresetExercise {
        id: "burpees",
        name: "Burpees",
        kind: MeasurementKind::Reps,
        unit: "reps",
        category: "full-body",
    },
    PresetExercise {
        id: "plank",
        name: "Plank",
        kind: MeasurementKind::DurationSeconds,
        unit: "s",
        category: "core",
    },
    PresetExercise {
        id: "wall-sit",
        name: "Wall Sit",
        kind: MeasurementKind::DurationSeconds,
        unit: "s",
        category: "lower-body",
    },
    PresetExercise {
        id: "running",
        name: "Running",
        kind: MeasurementKind::DistanceMeters,
        unit: "m",
        category: "cardio",
    },
];

pub struct PresetPlan {
    pub id: &'static str,
    pub name: &'static str,
    pub exercise_id: &'static str,
    pub starting_amount: i64,
    pub target_amount: i64,
    pub increment_amount: i64,
    pub cadence: Cadence,
}

pub const PRESET_PLANS: &[PresetPlan] = &[
    PresetPlan {
        id: "pushups-to-50",
        name: "Road to 50 Push-ups",
        exercise_id: "push-ups",
        starting_amount: 5,
        target_amount: 50,
        increment_amount: 2,
        cadence: Cadence::Weekly,
    },
    PresetPlan {
        id: "pushups-first-20",
        name: "First 20 Push-ups",
        exercise_id: "push-ups",
        starting_amount: 1,
        target_amount: 20,
        increment_amount: 1,
        cadence: Cadence::Weekly,
    },
    PresetPlan {
        id: "squats-to-100",
        name: "Century Squats",
        exercise_id: "squats",
        starting_amount: 10,
        target_amount: 100,
        increment_amount: 5,
        cadence: Cadence::Weekly,
    },
    PresetPlan {
        id: "plank-to-300",
        name: "Five-Minute Plank",
        exercise_id: "plank",
        starting_amount: 30,
        target_amount: 300,
        increment_amount: 15,
        cadence: Cadence::Weekly,
    },
    PresetPlan {
        id: "first-pullup",
        name: "First Pull-up and Beyond",
        exercise_id: "pull-ups",
        starting_amount: 1,
        target_amount: 12,
        increment_amount: 1,
        cadence: Cadence::Biweekly,
    },
    PresetPlan {
        id: "run-to-5k",
        name: "Couch to 5K",
        exercise_id: "running",
        starting_amount: 500,
        target_amount: 5_000,
        increment_amount: 250,
        cadence: Cadence::Weekly,
    },
];

pub const ACHIEVEMENTS: &[AchievementDefinition] = &[
    // Consistency.
    AchievementDefinition {
        id: "first-workout",
        name: "First Step",
        description: "Complete your first workout",
        category: "consistency",
        requirement: Requirement::WorkoutCount(1),
        xp_reward: 50,
        hidden: false,
    },
    AchievementDefinition {
        id: "workouts-10",
        name: "Ten Down",
        description: "Complete 10 workouts",
        category: "consistency",
        requirement: Requirement::WorkoutCount(10),
        xp_reward: 100,
        hidden: false,
    },
    AchievementDefinition {
        id: "workouts-50",
        name: "Fifty Strong",
        description: "Complete 50 workouts",
        category: "consistency",
        requirement: Requirement::WorkoutCount(50),
        xp_reward: 250,
        hidden: false,
    },
    AchievementDefinition {
        id: "workouts-250",
        name: "Workhorse",
        description: "Complete 250 workouts",
        category: "consistency",
        requirement: Requirement::WorkoutCount(250),
        xp_reward: 500,
        hidden: false,
    },
    // Streaks.
    AchievementDefinition {
        id: "streak-3",
        name: "Warming Up",
        description: "Keep a 3-day streak",
        category: "streak",
        requirement: Requirement::StreakLength(3),
        xp_reward: 50,
        hidden: false,
    },
    AchievementDefinition {
        id: "streak-7",
        name: "One Week Strong",
        description: "Keep a 7-day streak",
        category: "streak",
        requirement: Requirement::StreakLength(7),
        xp_reward: 100,
        hidden: false,
    },
    AchievementDefinition {
        id: "streak-30",
        name: "Monthly Habit",
        description: "Keep a 30-day streak",
        category: "streak",
        requirement: Requirement::StreakLength(30),
        xp_reward: 300,
        hidden: false,
    },
    AchievementDefinition {
        id: "streak-100",
        name: "Unbreakable",
        description: "Keep a 100-day streak",
        category: "streak",
        requirement: Requirement::StreakLength(100),
        xp_reward: 1_000,
        hidden: true,
    },
    // Volume.
    AchievementDefinition {
        id: "pushups-500",
        name: "Half a Thousand",
        description: "500 lifetime push-ups",
        category: "volume",
        requirement: Requirement::ExerciseTotal {
            exercise_id: "push-ups",
            amount: 500,
        },
        xp_reward: 150,
        hidden: false,
    },
    AchievementDefinition {
        id: "pushups-5000",
        name: "Push-up Machine",
        description: "5000 lifetime push-ups",
        category: "volume",
        requirement: Requirement::ExerciseTotal {
            exercise_id: "push-ups",
            amount: 5_000,
        },
        xp_reward: 500,
        hidden: false,
    },
    AchievementDefinition {
        id: "squats-1000",
        name: "Leg Day Legend",
        description: "1000 lifetime squats",
        category: "volume",
        requirement: Requirement::ExerciseTotal {
            exercise_id: "squats",
            amount: 1_000,
        },
        xp_reward: 250,
        hidden: false,
    },
    AchievementDefinition {
        id: "plank-3600",
        name: "Hour of Iron",
        description: "A full hour of lifetime plank",
        category: "volume",
        requirement: Requirement::ExerciseTotal {
            exercise_id: "plank",
            amount: 3_600,
        },
        xp_reward: 250,
        hidden: false,
    },
    AchievementDefinition {
        id: "run-42195",
        name: "Marathon, Eventually",
        description: "Run a marathon's distance in total",
        category: "volume",
        requirement: Requirement::ExerciseTotal {
            exercise_id: "running",
            amount: 42_195,
        },
        xp_reward: 500,
        hidden: true,
    },
    // Progression.
    AchievementDefinition {
        id: "level-5",
        name: "Climbing",
        description: "Reach level 5",
        category: "progression",
        requirement: Requirement::LevelReached(5),
        xp_reward: 100,
        hidden: false,
    },
    AchievementDefinition {
        id: "level-10",
        name: "Double Digits",
        description: "Reach level 10",
        category: "progression",
        requirement: Requirement::LevelReached(10),
        xp_reward: 250,
        hidden: false,
    },
    AchievementDefinition {
        id: "level-20",
        name: "Top of the Curve",
        description: "Reach level 20",
        category: "progression",
        requirement: Requirement::LevelReached(20),
        xp_reward: 500,
        hidden: true,
    },
    AchievementDefinition {
        id: "xp-1000",
        name: "Point Collector",
        description: "Earn 1000 XP",
        category: "progression",
        requirement: Requirement::TotalXp(1_000),
        xp_reward: 100,
        hidden: false,
    },
    AchievementDefinition {
        id: "xp-10000",
        name: "XP Hoarder",
        description: "Earn 10000 XP",
        category: "progression",
        requirement: Requirement::TotalXp(10_000),
        xp_reward: 250,
        hidden: false,
    },
    // Plans.
    AchievementDefinition {
        id: "plans-1",
        name: "Finisher",
        description: "Carry a plan through to its goal",
        category: "plans",
        requirement: Requirement::PlansCompleted(1),
        xp_reward: 200,
        hidden: false,
    },
    AchievementDefinition {
        id: "plans-5",
        name: "Serial Finisher",
        description: "Complete 5 plans",
        category: "plans",
        requirement: Requirement::PlansCompleted(5),
        xp_reward: 500,
        hidden: false,
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn preset_exercise_ids_are_unique() {
        let ids: HashSet<_> = PRESET_EXERCISES.iter().map(|e| e.id).collect();
        assert_eq!(ids.len(), PRESET_EXERCISES.len());
    }

    #[test]
    fn preset_plans_reference_preset_exercises_and_validate() {
        let ids: HashSet<_> = PRESET_EXERCISES.iter().map(|e| e.id).collect();
        for plan in PRESET_PLANS {
            assert!(ids.contains(plan.exercise_id), "unknown exercise in {}", plan.id);
            assert!(plan.starting_amount > 0);
            assert!(plan.target_amount > plan.starting_amount);
            assert!(plan.increment_amount > 0);
        }
    }

    #[test]
    fn achievement_ids_are_unique() {
        let ids: HashSet<_> = ACHIEVEMENTS.iter().map(|a| a.id).collect();
        assert_eq!(ids.len(), ACHIEVEMENTS.len());
    }

    #[test]
    fn exercise_total_requirements_reference_known_exercises() {
        let ids: HashSet<_> = PRESET_EXERCISES.iter().map(|e| e.id).collect();
        for def in ACHIEVEMENTS {
            if let Requirement::ExerciseTotal { exercise_id, .. } = &def.requirement {
                assert!(ids.contains(exercise_id), "unknown exercise in {}", def.id);
            }
        }
    }
}
