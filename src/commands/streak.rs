use anyhow::Result;
use chrono::NaiveDate;
use colored::Colorize;
use sqlx::SqlitePool;

use crate::{cli::StreakCmd, engine::streak, models::AggregateStats};

pub async fn handle(cmd: StreakCmd, pool: &SqlitePool, today: NaiveDate) -> Result<()> {
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

    match cmd {
        StreakCmd::Show => {
            let active = streak::is_streak_active(stats.last_workout_date, today);

            if stats.current_streak == 0 {
                println!("{}", "No streak yet — log a workout to start one.".dimmed());
            } else if active {
                println!(
                    "{} {} day(s) 🔥 (longest: {})",
                    "streak:".cyan().bold(),
                    stats.current_streak,
                    stats.longest_streak
                );
            } else {
                println!(
                    "{} {} day(s), {} — last workout {}",
                    "streak:".cyan().bold(),
                    stats.current_streak,
                    "lapsed".yellow().bold(),
                    stats
                        .last_workout_date
                        .map(|d| d.to_string())
                        .unwrap_or_else(|| "never".to_string())
                );
            }

            println!(
                "{} {} remaining",
                "freezes:".cyan().bold(),
                stats.streak_freezes
            );
        }

        StreakCmd::Freeze => {
            if stats.streak_freezes <= 0 {
                println!("{} no streak freezes left", "error:".red().bold());
                return Ok(());
            }

            // Decrements the counter only. Whether a freeze should also
            // suppress the next streak reset is deliberately not wired
            // into the streak computation.
            sqlx::query("UPDATE stats SET streak_freezes = streak_freezes - 1 WHERE id = 1")
                .execute(pool)
                .await?;

            println!(
                "{} streak freeze used — {} remaining",
                "ok:".green().bold(),
                stats.streak_freezes - 1
            );
        }
    }

    Ok(())
}
