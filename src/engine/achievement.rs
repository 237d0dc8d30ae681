use std::collections::{HashMap, HashSet};

use crate::models::AggregateStats;

/// What it takes to unlock an achievement. A closed set: the evaluator
/// matches every variant with no fallback arm, so adding a kind forces
/// every call site to handle it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Requirement {
    /// Current or longest streak reaches this many days.
    StreakLength(i64),
    /// Lifetime amount recorded for one specific exercise.
    ExerciseTotal { exercise_id: &'static str, amount: i64 },
    /// Lifetime number of completed sessions.
    WorkoutCount(i64),
    /// Level reached on the progression curve.
    LevelReached(i64),
    /// Number of plans carried through to completion.
    PlansCompleted(i64),
    /// Lifetime XP total.
    TotalXp(i64),
}

/// Compiled-in achievement catalog entry. Fixed and versioned in code;
/// never read from configuration.
#[derive(Debug, Clone)]
pub struct AchievementDefinition {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub category: &'static str,
    pub requirement: Requirement,
    pub xp_reward: i64,
    pub hidden: bool,
}

/// One pass over the catalog in its defined order, returning the ids of
/// achievements that are satisfied now and were not unlocked before.
///
/// Pure with respect to its inputs: recording timestamps and crediting
/// XP rewards is the caller's job, which is what makes a second pass
/// with unchanged state come back empty.
pub fn evaluate(
    stats: &AggregateStats,
    total_workouts: i64,
    completed_plans: i64,
    per_exercise_totals: &HashMap<String, i64>,
    catalog: &[AchievementDefinition],
    already_unlocked: &HashSet<String>,
) -> Vec<&'static str> {
    let mut newly_unlocked = Vec::new();

    for def in catalog {
        if already_unlocked.contains(def.id) {
            continue;
        }

        let satisfied = match &def.requirement {
            Requirement::StreakLength(n) => {
                stats.current_streak >= *n || stats.longest_streak >= *n
            }
            Requirement::ExerciseTotal { exercise_id, amount } => per_exercise_totals
                .get(*exercise_id)
                .is_some_and(|total| *total >= *amount),
            Requirement::WorkoutCount(n) => total_workouts >= *n,
            Requirement::LevelReached(n) => stats.level >= *n,
            Requirement::PlansCompleted(n) => completed_plans >= *n,
            Requirement::TotalXp(n) => stats.total_xp >= *n,
        };

        if satisfied {
            newly_unlocked.push(def.id);
        }
    }

    newly_unlocked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats() -> AggregateStats {
        AggregateStats {
            total_xp: 450,
            level: 2,
            current_streak: 3,
            longest_streak: 9,
            total_workouts: 12,
            streak_freezes: 1,
            last_workout_date: None,
        }
    }

    fn catalog() -> Vec<AchievementDefinition> {
        vec![
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
                id: "workouts-10",
                name: "Ten Down",
                description: "Complete 10 workouts",
                category: "consistency",
                requirement: Requirement::WorkoutCount(10),
                xp_reward: 50,
                hidden: false,
            },
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
                id: "plans-1",
                name: "Finisher",
                description: "Complete a plan",
                category: "plans",
                requirement: Requirement::PlansCompleted(1),
                xp_reward: 200,
                hidden: false,
            },
            AchievementDefinition {
                id: "xp-400",
                name: "Point Collector",
                description: "Earn 400 XP",
                category: "progression",
                requirement: Requirement::TotalXp(400),
                xp_reward: 50,
                hidden: true,
            },
        ]
    }

    #[test]
    fn satisfied_requirements_unlock_in_catalog_order() {
        let totals = HashMap::from([("push-ups".to_string(), 620_i64)]);
        let unlocked = evaluate(&stats(), 12, 0, &totals, &catalog(), &HashSet::new());
        // streak-7 via longest streak, pushups-500, workouts-10, xp-400.
        assert_eq!(unlocked, vec!["streak-7", "pushups-500", "workouts-10", "xp-400"]);
    }

    #[test]
    fn longest_streak_counts_for_streak_requirements() {
        let mut s = stats();
        s.current_streak = 1;
        s.longest_streak = 7;
        let unlocked = evaluate(&s, 0, 0, &HashMap::new(), &catalog(), &HashSet::new());
        assert!(unlocked.contains(&"streak-7"));
    }

    #[test]
    fn already_unlocked_ids_are_skipped() {
        let totals = HashMap::from([("push-ups".to_string(), 620_i64)]);
        let first = evaluate(&stats(), 12, 0, &totals, &catalog(), &HashSet::new());
        let done: HashSet<String> = first.iter().map(|id| id.to_string()).collect();

        // Second pass with unchanged state finds nothing new.
        let second = evaluate(&stats(), 12, 0, &totals, &catalog(), &done);
        assert!(second.is_empty());
    }

    #[test]
    fn missing_exercise_total_does_not_unlock() {
        let unlocked = evaluate(&stats(), 0, 0, &HashMap::new(), &catalog(), &HashSet::new());
        assert!(!unlocked.contains(&"pushups-500"));
    }

    #[test]
    fn completed_plans_requirement() {
        let unlocked = evaluate(&stats(), 0, 1, &HashMap::new(), &catalog(), &HashSet::new());
        assert!(unlocked.contains(&"plans-1"));
    }
}
