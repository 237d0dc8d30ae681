use anyhow::Result;
use chrono::NaiveDate;
use colored::Colorize;
use serde::Serialize;
use sqlx::SqlitePool;

use crate::{
    catalog,
    cli::{PlanCmd, StartArgs},
    commands::{exercise, log},
    engine::schedule,
    models::{AggregateStats, Plan},
};

#[derive(Serialize)]
struct PlanJson {
    idx: i64,
    name: String,
    exercise: String,
    current_target: i64,
    target_amount: i64,
    progress: f64,
    days_until_target: i64,
    cadence: String,
    active: bool,
    completed: bool,
}

pub async fn handle(cmd: PlanCmd, pool: &SqlitePool, today: NaiveDate, json: bool) -> Result<()> {
    match cmd {
        PlanCmd::Start(args) => start(args, pool, today).await?,

        PlanCmd::Presets => {
            println!("{}", "Preset plans:".cyan().bold());
            for preset in catalog::PRESET_PLANS {
                println!(
                    "  {} — {} ({} → {} {}, +{} {})",
                    preset.id.green(),
                    preset.name.bold(),
                    preset.starting_amount,
                    preset.target_amount,
                    unit_for(preset.exercise_id),
                    preset.increment_amount,
                    preset.cadence,
                );
            }
            println!("\nStart one with `plan start <ID>`");
        }

        PlanCmd::List { all } => {
            let plans = list_plans(pool, all).await?;

            if plans.is_empty() {
                println!("{}", "(no plans — try `plan presets`)".dimmed());
                return Ok(());
            }

            if json {
                let mut out = Vec::new();
                for (i, (plan, exercise_name)) in plans.iter().enumerate() {
                    out.push(PlanJson {
                        idx: i as i64 + 1,
                        name: plan.name.clone(),
                        exercise: exercise_name.clone(),
                        current_target: schedule::current_target(plan, today),
                        target_amount: plan.target_amount,
                        progress: schedule::progress_percentage(plan, today),
                        days_until_target: schedule::days_until_target(plan, today),
                        cadence: plan.cadence.to_string(),
                        active: plan.active,
                        completed: plan.completed_at.is_some(),
                    });
                }
                println!("{}", serde_json::to_string_pretty(&out)?);
                return Ok(());
            }

            println!("{}", "Plans:".cyan().bold());
            for (i, (plan, exercise_name)) in plans.iter().enumerate() {
                let idx = format!("{}", i + 1).yellow();
                let target = schedule::current_target(plan, today);
                let pct = schedule::progress_percentage(plan, today) * 100.0;

                let state = if plan.completed_at.is_some() {
                    " ✓ completed".green()
                } else if !plan.active {
                    " (stopped)".dimmed()
                } else {
                    "".normal()
                };

                println!(
                    "{} • {} [{}] — today: {} / goal {} ({:.0}%){}",
                    idx,
                    plan.name.bold(),
                    exercise_name,
                    target,
                    plan.target_amount,
                    pct,
                    state,
                );
            }
        }

        PlanCmd::Show { plan } => {
            let Some((p, exercise_name, unit)) = resolve(pool, &plan).await? else {
                println!("{} no plan matching `{}`", "error:".red().bold(), plan);
                return Ok(());
            };

            let target = schedule::current_target(&p, today);
            let pct = schedule::progress_percentage(&p, today) * 100.0;
            let days_left = schedule::days_until_target(&p, today);

            println!("{} [{}]", p.name.cyan().bold(), exercise_name);
            println!(
                "  goal:      {} → {} {} (+{} {})",
                p.starting_amount, p.target_amount, unit, p.increment_amount, p.cadence
            );
            println!("  started:   {}", p.start_date);
            println!("  today:     {} {}", format!("{}", target).bold(), unit);
            println!("  progress:  {} {:.0}%", progress_bar(pct / 100.0), pct);

            if days_left == 0 {
                println!("  {}", "target has reached the goal".green());
            } else {
                println!("  remaining: ~{} day(s) to goal", days_left);
            }

            if let Some(done) = p.completed_at {
                println!("  {} {}", "completed on".green(), done);
            } else if !p.active {
                println!("  {}", "stopped".dimmed());
            }

            if let Some(time) = &p.reminder_time {
                println!("  reminder:  {}", time);
            }
        }

        PlanCmd::Complete { plan } => {
            let Some((p, _, _)) = resolve(pool, &plan).await? else {
                println!("{} no plan matching `{}`", "error:".red().bold(), plan);
                return Ok(());
            };

            if p.completed_at.is_some() {
                println!("{} plan `{}` is already completed", "warning:".yellow().bold(), p.name);
                return Ok(());
            }

            let mut tx = pool.begin().await?;

            sqlx::query("UPDATE plans SET completed_at = ?1, active = 0 WHERE id = ?2")
                .bind(today)
                .bind(&p.id)
                .execute(&mut *tx)
                .await?;

            // Completing a plan can unlock plans-completed achievements.
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

            let unlocked = log::run_achievement_pass(&mut tx, &mut stats).await?;

            sqlx::query("UPDATE stats SET total_xp = ?1, level = ?2 WHERE id = 1")
                .bind(stats.total_xp)
                .bind(stats.level)
                .execute(&mut *tx)
                .await?;

            tx.commit().await?;

            println!("{} plan `{}` completed", "ok:".green().bold(), p.name);
            log::announce_unlocks(&unlocked);
        }

        PlanCmd::Stop { plan } => {
            let Some((p, _, _)) = resolve(pool, &plan).await? else {
                println!("{} no plan matching `{}`", "error:".red().bold(), plan);
                return Ok(());
            };

            if !p.active {
                println!("{} plan `{}` is not active", "warning:".yellow().bold(), p.name);
                return Ok(());
            }

            sqlx::query("UPDATE plans SET active = 0 WHERE id = ?")
                .bind(&p.id)
                .execute(pool)
                .await?;

            println!("{} plan `{}` stopped", "ok:".green().bold(), p.name);
        }

        PlanCmd::Remind { plan, time } => {
            let Some((p, _, _)) = resolve(pool, &plan).await? else {
                println!("{} no plan matching `{}`", "error:".red().bold(), plan);
                return Ok(());
            };

            if let Some(t) = &time {
                if chrono::NaiveTime::parse_from_str(t, "%H:%M").is_err() {
                    println!("{} `{}` is not a valid HH:MM time", "error:".red().bold(), t);
                    return Ok(());
                }
            }

            sqlx::query("UPDATE plans SET reminder_time = ?1 WHERE id = ?2")
                .bind(time.as_deref())
                .bind(&p.id)
                .execute(pool)
                .await?;

            match time {
                Some(t) => println!("{} reminder for `{}` set to {}", "ok:".green().bold(), p.name, t),
                None => println!("{} reminder for `{}` cleared", "ok:".green().bold(), p.name),
            }
        }
    }

    Ok(())
}

async fn start(args: StartArgs, pool: &SqlitePool, today: NaiveDate) -> Result<()> {
    let plan = if let Some(preset_id) = &args.preset {
        let Some(preset) = catalog::PRESET_PLANS.iter().find(|p| p.id == *preset_id) else {
            println!(
                "{} no preset `{}` — see `plan presets`",
                "error:".red().bold(),
                preset_id
            );
            return Ok(());
        };

        let mut plan = Plan::new(
            preset.name,
            preset.exercise_id,
            preset.starting_amount,
            preset.target_amount,
            preset.increment_amount,
            preset.cadence,
            today,
        )?;
        plan.reminder_time = args.remind.clone();
        plan
    } else {
        // Custom plan: all goal parameters are required.
        let (Some(exercise), Some(starting), Some(target), Some(increment), Some(cadence)) = (
            args.exercise.as_deref(),
            args.starting,
            args.target,
            args.increment,
            args.cadence,
        ) else {
            println!(
                "{} custom plans need --exercise, --starting, --target, --increment and --cadence",
                "error:".red().bold()
            );
            return Ok(());
        };

        let Some((exercise_id, exercise_name)) = exercise::resolve(pool, exercise).await? else {
            println!("{} no exercise matching `{}`", "error:".red().bold(), exercise);
            return Ok(());
        };

        let name = args
            .name
            .clone()
            .unwrap_or_else(|| format!("{} {} → {}", exercise_name, starting, target));

        match Plan::new(&name, &exercise_id, starting, target, increment, cadence, today) {
            Ok(mut plan) => {
                plan.reminder_time = args.remind.clone();
                plan
            }
            Err(e) => {
                println!("{} {}", "error:".red().bold(), e);
                return Ok(());
            }
        }
    };

    // One active plan per exercise keeps targets unambiguous.
    let existing: Option<String> = sqlx::query_scalar(
        "SELECT name FROM plans WHERE exercise_id = ? AND active = 1",
    )
    .bind(&plan.exercise_id)
    .fetch_optional(pool)
    .await?;

    if let Some(name) = existing {
        println!(
            "{} there is already an active plan for this exercise: `{}`",
            "error:".red().bold(),
            name
        );
        return Ok(());
    }

    sqlx::query(
        r#"
        INSERT INTO plans
          (id, name, exercise_id, starting_amount, target_amount, increment_amount,
           cadence, start_date, active, reminder_time)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, 1, ?9)
        "#,
    )
    .bind(&plan.id)
    .bind(&plan.name)
    .bind(&plan.exercise_id)
    .bind(plan.starting_amount)
    .bind(plan.target_amount)
    .bind(plan.increment_amount)
    .bind(plan.cadence)
    .bind(plan.start_date)
    .bind(plan.reminder_time.as_deref())
    .execute(pool)
    .await?;

    println!(
        "{} plan `{}` started — today's target: {}",
        "ok:".green().bold(),
        plan.name,
        schedule::current_target(&plan, today)
    );

    Ok(())
}

async fn list_plans(pool: &SqlitePool, all: bool) -> Result<Vec<(Plan, String)>> {
    let sql = if all {
        r#"
        SELECT id, name, exercise_id, starting_amount, target_amount, increment_amount,
               cadence, start_date, active, completed_at, reminder_time
        FROM plans
        ORDER BY name
        "#
    } else {
        r#"
        SELECT id, name, exercise_id, starting_amount, target_amount, increment_amount,
               cadence, start_date, active, completed_at, reminder_time
        FROM plans
        WHERE active = 1
        ORDER BY name
        "#
    };

    let plans: Vec<Plan> = sqlx::query_as(sql).fetch_all(pool).await?;

    let mut out = Vec::with_capacity(plans.len());
    for plan in plans {
        let name: String = sqlx::query_scalar("SELECT name FROM exercises WHERE id = ?")
            .bind(&plan.exercise_id)
            .fetch_one(pool)
            .await?;
        out.push((plan, name));
    }

    Ok(out)
}

/// Resolve a plan argument (1-based index into the active list, or a
/// name) to the full plan row plus its exercise name and unit.
pub async fn resolve(pool: &SqlitePool, arg: &str) -> Result<Option<(Plan, String, String)>> {
    let id: Option<String> = if let Ok(idx) = arg.parse::<i64>() {
        sqlx::query_scalar(
            r#"
            SELECT id
            FROM (
              SELECT id, ROW_NUMBER() OVER (ORDER BY name) AS rn
              FROM plans
              WHERE active = 1
            ) t
            WHERE t.rn = ?
            "#,
        )
        .bind(idx)
        .fetch_optional(pool)
        .await?
    } else {
        sqlx::query_scalar("SELECT id FROM plans WHERE name = ?1 ORDER BY active DESC LIMIT 1")
            .bind(arg)
            .fetch_optional(pool)
            .await?
    };

    let Some(id) = id else {
        return Ok(None);
    };

    let plan: Plan = sqlx::query_as(
        r#"
        SELECT id, name, exercise_id, starting_amount, target_amount, increment_amount,
               cadence, start_date, active, completed_at, reminder_time
        FROM plans
        WHERE id = ?
        "#,
    )
    .bind(&id)
    .fetch_one(pool)
    .await?;

    let (exercise_name, unit): (String, String) =
        sqlx::query_as("SELECT name, unit FROM exercises WHERE id = ?")
            .bind(&plan.exercise_id)
            .fetch_one(pool)
            .await?;

    Ok(Some((plan, exercise_name, unit)))
}

fn unit_for(exercise_id: &str) -> &'static str {
    catalog::PRESET_EXERCISES
        .iter()
        .find(|e| e.id == exercise_id)
        .map(|e| e.unit)
        .unwrap_or("")
}

fn progress_bar(fraction: f64) -> String {
    const WIDTH: usize = 20;
    let filled = (fraction.clamp(0.0, 1.0) * WIDTH as f64).round() as usize;
    format!(
        "[{}{}]",
        "█".repeat(filled),
        "░".repeat(WIDTH - filled)
    )
}
