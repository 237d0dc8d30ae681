use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use colored::Colorize;
use sqlx::SqlitePool;

pub async fn handle(pool: &SqlitePool, year: Option<i32>, month: Option<u32>) -> Result<()> {
    let now = chrono::Local::now();
    let year = year.unwrap_or(now.year());
    let month = month.unwrap_or(now.month());

    if !(1..=12).contains(&month) {
        println!("{} month must be between 1 and 12", "error:".red().bold());
        return Ok(());
    }

    let Some((first_day, last_day)) = month_bounds(year, month) else {
        println!(
            "{} {}-{:02} is outside the supported date range",
            "error:".red().bold(),
            year,
            month
        );
        return Ok(());
    };

    // All workouts in the month, with the plan they were logged against.
    let sessions: Vec<(NaiveDate, i64, i64, String)> = sqlx::query_as(
        r#"
        SELECT s.date, s.amount_completed, s.amount_targeted, p.name
        FROM sessions s
        JOIN plans p ON p.id = s.plan_id
        WHERE s.date >= ?1 AND s.date <= ?2
        ORDER BY s.date
        "#,
    )
    .bind(first_day)
    .bind(last_day)
    .fetch_all(pool)
    .await?;

    let month_name = first_day.format("%B %Y").to_string();
    println!("\n{}", month_name.bold().cyan());
    println!("{}", "Su Mo Tu We Th Fr Sa".dimmed());

    let first_weekday = first_day.weekday().num_days_from_sunday() as usize;
    print!("{}", "   ".repeat(first_weekday));

    let mut days_with_workouts = std::collections::HashSet::new();
    for (date, _, _, _) in &sessions {
        days_with_workouts.insert(date.day());
    }

    for day in 1..=last_day.day() {
        if days_with_workouts.contains(&day) {
            print!("{:2} ", day.to_string().green().bold());
        } else {
            print!("{:2} ", day);
        }

        if (first_weekday + day as usize) % 7 == 0 {
            println!();
        }
    }
    println!("\n");

    if !sessions.is_empty() {
        println!("{}", "Workouts:".bold().cyan());
        for (date, completed, targeted, plan_name) in sessions {
            let mark = if completed >= targeted {
                "✓".green()
            } else {
                "–".yellow()
            };
            println!(
                "  {} {} — {} ({} / {})",
                date.format("%a %b %d").to_string().green(),
                mark,
                plan_name.bold(),
                completed,
                targeted
            );
        }
    }

    Ok(())
}

/// First and last day of a month, or `None` when the year falls outside
/// chrono's representable range.
fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };

    Some((first, next_month.pred_opt()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_bounds_cover_the_whole_month() {
        let (first, last) = month_bounds(2026, 2).unwrap();
        assert_eq!(first, NaiveDate::from_ymd_opt(2026, 2, 1).unwrap());
        assert_eq!(last, NaiveDate::from_ymd_opt(2026, 2, 28).unwrap());

        let (first, last) = month_bounds(2026, 12).unwrap();
        assert_eq!(first, NaiveDate::from_ymd_opt(2026, 12, 1).unwrap());
        assert_eq!(last, NaiveDate::from_ymd_opt(2026, 12, 31).unwrap());
    }

    #[test]
    fn month_bounds_reject_out_of_range_years() {
        assert!(month_bounds(300_000, 1).is_none());
        assert!(month_bounds(-300_000, 1).is_none());
    }
}
