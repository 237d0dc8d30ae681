use std::collections::{HashMap, HashSet};

use anyhow::Result;
use chrono::{Local, NaiveDate};
use colored::Colorize;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::{
    catalog,
    commands::plan,
    engine::{achievement, level, schedule, streak},
    models::{AggregateStats, Session},
};

/// Record a workout: insert the session, roll the aggregate stats
/// forward (streak, XP, level, last-workout date) and evaluate the
/// achievement catalog, all in one transaction.
pub async fn handle(
    plan_arg: &str,
    amount: Option<i64>,
    duration: Option<i64>,
    pool: &SqlitePool,
    today: NaiveDate,
) -> Result<()> {
    let Some((plan, exercise_name, unit)) = plan::resolve(pool, plan_arg).await? else {
        println!("{} no plan matching `{}`", "error:".red().bold(), plan_arg);
        return Ok(());
    };

    if !plan.active {
        println!(
            "{} plan `{}` is not active — start a new one with `plan start`",
            "error:".red().bold(),
            plan.name
        );
        return Ok(());
    }

    let target = schedule::current_target(&plan, today);
    let amount = amount.unwrap_or(target);

    if amount <= 0 {
        println!("{} amount must be positive", "error:".red().bold());
        return Ok(());
    }

    // One session per plan per day; later days supersede, same day is a
    // no-op.
    let existing: Option<String> =
        sqlx::query_scalar("SELECT id FROM sessions WHERE plan_id = ?1 AND date = ?2")
            .bind(&plan.id)
            .bind(today)
            .fetch_optional(pool)
            .await?;

    if existing.is_some() {
        println!(
            "{} already logged `{}` for {} — come back tomorrow",
            "warning:".yellow().bold(),
            plan.name,
            today
        );
        return Ok(());
    }

    let session = Session {
        id: Uuid::new_v4().to_string(),
        plan_id: plan.id.clone(),
        date: today,
        amount_completed: amount,
        amount_targeted: target,
        xp_awarded: level::XP_PER_WORKOUT,
        duration_seconds: duration,
        completed_at: Local::now(),
    };

    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO sessions
          (id, plan_id, date, amount_completed, amount_targeted, xp_awarded,
           duration_seconds, completed_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
        "#,
    )
    .bind(&session.id)
    .bind(&session.plan_id)
    .bind(session.date)
    .bind(session.amount_completed)
    .bind(session.amount_targeted)
    .bind(session.xp_awarded)
    .bind(session.duration_seconds)
    .bind(session.completed_at)
    .execute(&mut *tx)
    .await?;

    let mut stats: AggregateStats = sqlx::query_as(
        r#"
        SELECT total_xp, level, current_streak, longest_streak, total_workouts,
               streak_freezes, last_workout_date
        FROM stats
        WHERE id = 1
        "#,
    )
    .fetch_one(&mut *tx)
    .await?;

    let old_level = stats.level;
    let old_streak = stats.current_streak;

    stats.current_streak =
        streak::next_streak_value(stats.last_workout_date, today, stats.current_streak);
    stats.longest_streak = stats.longest_streak.max(stats.current_streak);
    stats.total_xp += level::XP_PER_WORKOUT;
    stats.total_workouts += 1;
    stats.last_workout_date = Some(today);
    stats.level = level::level_for_xp(stats.total_xp);

    // Achievement pass over the state this workout produced.
    let xp_before_rewards = stats.total_xp;
    let newly_unlocked = run_achievement_pass(&mut tx, &mut stats).await?;
    let reward_xp = stats.total_xp - xp_before_rewards;

    sqlx::query(
        r#"
        UPDATE stats
        SET total_xp = ?1, level = ?2, current_streak = ?3, longest_streak = ?4,
            total_workouts = ?5, last_workout_date = ?6
        WHERE id = 1
        "#,
    )
    .bind(stats.total_xp)
    .bind(stats.level)
    .bind(stats.current_streak)
    .bind(stats.longest_streak)
    .bind(stats.total_workouts)
    .bind(stats.last_workout_date)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    let hit = if amount >= target {
        "target hit".green().bold()
    } else {
        "under target".yellow().bold()
    };
    println!(
        "{} logged {} {} for `{}` [{}] — {} (today's target: {})",
        "ok:".green().bold(),
        amount,
        unit,
        plan.name,
        exercise_name,
        hit,
        target
    );

    println!(
        "  {} +{} XP ({} total)",
        "xp:".cyan().bold(),
        level::XP_PER_WORKOUT + reward_xp,
        stats.total_xp
    );

    if stats.current_streak > old_streak {
        println!(
            "  {} {} day(s) 🔥",
            "streak:".cyan().bold(),
            stats.current_streak
        );
    } else if stats.current_streak < old_streak {
        println!(
            "  {} streak reset to {} (last workout was too long ago)",
            "streak:".cyan().bold(),
            stats.current_streak
        );
    }

    if stats.level > old_level {
        println!(
            "  {} level {} — {}",
            "level up!".magenta().bold(),
            stats.level,
            level::title_for_level(stats.level).bold()
        );
    }

    announce_unlocks(&newly_unlocked);

    Ok(())
}

/// Single-pass achievement sweep inside an open transaction: evaluate
/// the catalog against the in-memory stats, stamp unlock timestamps
/// (first write only) and credit the XP rewards into `stats`, which may
/// bump the level again. Returns the ids unlocked by this pass.
pub async fn run_achievement_pass(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    stats: &mut AggregateStats,
) -> Result<Vec<&'static str>> {
    let completed_plans: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM plans WHERE completed_at IS NOT NULL")
            .fetch_one(&mut **tx)
            .await?;

    let totals_rows: Vec<(String, i64)> = sqlx::query_as(
        r#"
        SELECT p.exercise_id, SUM(s.amount_completed)
        FROM sessions s
        JOIN plans p ON p.id = s.plan_id
        GROUP BY p.exercise_id
        "#,
    )
    .fetch_all(&mut **tx)
    .await?;
    let per_exercise_totals: HashMap<String, i64> = totals_rows.into_iter().collect();

    let unlocked_rows: Vec<String> = sqlx::query_scalar(
        "SELECT achievement_id FROM achievement_unlocks WHERE unlocked_at IS NOT NULL",
    )
    .fetch_all(&mut **tx)
    .await?;
    let already_unlocked: HashSet<String> = unlocked_rows.into_iter().collect();

    let newly_unlocked = achievement::evaluate(
        stats,
        stats.total_workouts,
        completed_plans,
        &per_exercise_totals,
        catalog::ACHIEVEMENTS,
        &already_unlocked,
    );

    let mut reward_xp = 0;
    for id in &newly_unlocked {
        // First write only: the guard keeps a re-run from ever resetting
        // or double-crediting an unlock.
        let res = sqlx::query(
            "UPDATE achievement_unlocks SET unlocked_at = ?1 \
             WHERE achievement_id = ?2 AND unlocked_at IS NULL",
        )
        .bind(Local::now())
        .bind(*id)
        .execute(&mut **tx)
        .await?;

        if res.rows_affected() == 1 {
            if let Some(def) = catalog::ACHIEVEMENTS.iter().find(|d| d.id == *id) {
                reward_xp += def.xp_reward;
            }
        }
    }

    if reward_xp > 0 {
        stats.total_xp += reward_xp;
        // A reward can push the total over the next floor.
        stats.level = level::level_for_xp(stats.total_xp);
    }

    Ok(newly_unlocked)
}

pub fn announce_unlocks(ids: &[&'static str]) {
    for id in ids {
        if let Some(def) = catalog::ACHIEVEMENTS.iter().find(|d| d.id == *id) {
            println!(
                "  {} {} — {} (+{} XP)",
                "achievement unlocked:".magenta().bold(),
                def.name.bold(),
                def.description,
                def.xp_reward
            );
        }
    }
}
