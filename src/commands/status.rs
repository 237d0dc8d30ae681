use anyhow::Result;
use chrono::NaiveDate;
use colored::Colorize;
use serde::Serialize;
use sqlx::SqlitePool;

use crate::{
    engine::{level, schedule, streak},
    models::{AggregateStats, Plan},
};

#[derive(Serialize)]
struct StatusJson {
    level: i64,
    title: String,
    total_xp: i64,
    xp_into_level: i64,
    xp_to_next_level: i64,
    current_streak: i64,
    longest_streak: i64,
    streak_active: bool,
    streak_freezes: i64,
    total_workouts: i64,
    plans: Vec<PlanTargetJson>,
}

#[derive(Serialize)]
struct PlanTargetJson {
    name: String,
    exercise: String,
    today_target: i64,
    logged_today: bool,
}

pub async fn handle(pool: &SqlitePool, today: NaiveDate, json: bool) -> Result<()> {
    let stats: AggregateStats = sqlx::query_as(
        r#"
        SELECT total_xp, level, current_streak, longest_streak, total_workouts,
               streak_freezes, last_workout_date
        FROM stats
        WHERE id = 1
        "#,
    )
    .fetch_one(pool)
    .await?;

    let plans: Vec<Plan> = sqlx::query_as(
        r#"
        SELECT id, name, exercise_id, starting_amount, target_amount, increment_amount,
               cadence, start_date, active, completed_at, reminder_time
        FROM plans
        WHERE active = 1
        ORDER BY name
        "#,
    )
    .fetch_all(pool)
    .await?;

    let mut plan_targets = Vec::with_capacity(plans.len());
    for plan in &plans {
        let exercise: String = sqlx::query_scalar("SELECT name FROM exercises WHERE id = ?")
            .bind(&plan.exercise_id)
            .fetch_one(pool)
            .await?;

        let logged: Option<String> =
            sqlx::query_scalar("SELECT id FROM sessions WHERE plan_id = ?1 AND date = ?2")
                .bind(&plan.id)
                .bind(today)
                .fetch_optional(pool)
                .await?;

        plan_targets.push((
            plan.name.clone(),
            exercise,
            schedule::current_target(plan, today),
            logged.is_some(),
        ));
    }

    let title = level::title_for_level(stats.level);
    let active = streak::is_streak_active(stats.last_workout_date, today);

    if json {
        let out = StatusJson {
            level: stats.level,
            title: title.to_string(),
            total_xp: stats.total_xp,
            xp_into_level: stats.total_xp - level::xp_floor_for_level(stats.level),
            xp_to_next_level: level::xp_remaining_to_next_level(stats.total_xp),
            current_streak: stats.current_streak,
            longest_streak: stats.longest_streak,
            streak_active: active,
            streak_freezes: stats.streak_freezes,
            total_workouts: stats.total_workouts,
            plans: plan_targets
                .into_iter()
                .map(|(name, exercise, today_target, logged_today)| PlanTargetJson {
                    name,
                    exercise,
                    today_target,
                    logged_today,
                })
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!(
        "{} {} — {}",
        "Level".cyan().bold(),
        format!("{}", stats.level).bold(),
        title.bold()
    );

    let fraction = level::xp_progress_fraction(stats.total_xp);
    let remaining = level::xp_remaining_to_next_level(stats.total_xp);
    println!(
        "  {} {} {} XP{}",
        xp_bar(fraction),
        stats.total_xp,
        "total".dimmed(),
        if remaining > 0 {
            format!(" ({} to next level)", remaining).dimmed()
        } else {
            " (max level)".dimmed()
        }
    );

    let flame = if active && stats.current_streak > 0 {
        format!("{} day(s) 🔥", stats.current_streak)
    } else if stats.current_streak > 0 {
        format!("{} day(s) (at risk — no workout since {})",
            stats.current_streak,
            stats
                .last_workout_date
                .map(|d| d.to_string())
                .unwrap_or_default()
        )
    } else {
        "none yet".to_string()
    };
    println!("  {} {} (longest: {})", "streak:".cyan().bold(), flame, stats.longest_streak);
    println!(
        "  {} {} · {} {}",
        "workouts:".cyan().bold(),
        stats.total_workouts,
        "freezes:".cyan().bold(),
        stats.streak_freezes
    );

    if plan_targets.is_empty() {
        println!("\n{}", "(no active plans — try `plan presets`)".dimmed());
        return Ok(());
    }

    println!("\n{}", "Today:".cyan().bold());
    for (name, exercise, target, logged) in plan_targets {
        let mark = if logged { "✓".green().bold() } else { "•".normal() };
        println!("  {} {} [{}] — {}", mark, name.bold(), exercise, target);
    }

    Ok(())
}

fn xp_bar(fraction: f64) -> String {
    const WIDTH: usize = 20;
    let filled = (fraction.clamp(0.0, 1.0) * WIDTH as f64).round() as usize;
    format!("[{}{}]", "█".repeat(filled), "░".repeat(WIDTH - filled))
}
