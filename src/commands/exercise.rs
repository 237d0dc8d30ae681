use std::{collections::BTreeSet, path::Path};

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use sqlx::SqlitePool;

use crate::{
    cli::ExerciseCmd,
    models::ExerciseDefinition,
    types::{ExerciseImport, MeasurementKind, best_category_suggestion, canonical_category},
};

#[derive(Serialize)]
struct ExJson {
    idx: i64,
    name: String,
    kind: String,
    unit: String,
    category: String,
    builtin: bool,
}

pub async fn handle(cmd: ExerciseCmd, pool: &SqlitePool, json: bool) -> Result<()> {
    match cmd {
        ExerciseCmd::Add {
            name,
            kind,
            category,
            unit,
        } => {
            let category = match canonical_category(&category) {
                Some(c) => c,
                None => {
                    if let Some(sug) = best_category_suggestion(&category) {
                        println!(
                            "{} unknown category `{}` -- did you mean: `{}`?",
                            "error:".red().bold(),
                            category,
                            sug.green()
                        );
                    } else {
                        println!("{} unknown category `{}`", "error:".red().bold(), category);
                    }
                    return Ok(());
                }
            };

            let unit = unit.unwrap_or_else(|| kind.unit_label().to_string());

            let res = sqlx::query(
                r#"
                INSERT INTO exercises (id, name, kind, unit, category, builtin)
                VALUES (?1, ?2, ?3, ?4, ?5, 0)
                "#,
            )
            .bind(uuid::Uuid::new_v4().to_string())
            .bind(&name)
            .bind(kind)
            .bind(&unit)
            .bind(&category)
            .execute(pool)
            .await;

            match res {
                Ok(info) if info.rows_affected() == 1 => {
                    println!("{} Exercise \"{}\" added", "info:".blue().bold(), &name)
                }
                Ok(_) => println!(
                    "{} Exercise \"{}\" was not inserted",
                    "info:".blue().bold(),
                    &name
                ),
                Err(sqlx::Error::Database(db_err)) if db_err.code() == Some("2067".into()) => {
                    // 2067 = SQLITE_CONSTRAINT_UNIQUE
                    println!(
                        "{} Exercise \"{}\" already exists — use `ex list` to view all exercises",
                        "warning:".yellow().bold(),
                        name
                    );
                }
                Err(e) => {
                    println!("{} {}", "error:".red().bold(), e.to_string().red());
                    return Err(e.into());
                }
            }
        }

        ExerciseCmd::Import { file } => {
            let path = Path::new(&file);
            let toml_str = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Could not read file: `{}`", file))?;

            let import: ExerciseImport = toml::from_str(&toml_str)
                .context("Failed to parse TOML: Expected `[[exercise]]` entries")?;

            if import.exercise.is_empty() {
                println!(
                    "{}",
                    "warning: no [[exercise]] entries found".yellow().bold()
                );
                return Ok(());
            }

            let mut inserted = 0;
            let mut skipped = 0;
            let mut unknowns: BTreeSet<String> = BTreeSet::new();

            for ex in import.exercise {
                let category = match canonical_category(&ex.category) {
                    Some(c) => c,
                    None => {
                        if let Some(sug) = best_category_suggestion(&ex.category) {
                            println!(
                                "{} `{}` skipped – unknown category `{}` -- did you mean: `{}`?",
                                "warning:".yellow().bold(),
                                ex.name,
                                ex.category,
                                sug.green()
                            );
                        } else {
                            println!(
                                "{} `{}` skipped – unknown category `{}`",
                                "warning:".yellow().bold(),
                                ex.name,
                                ex.category
                            );
                        }

                        skipped += 1;
                        unknowns.insert(ex.category);
                        continue;
                    }
                };

                let unit = ex.unit.unwrap_or_else(|| ex.kind.unit_label().to_string());

                let res = sqlx::query(
                    r#"
                    INSERT OR IGNORE INTO exercises (id, name, kind, unit, category, builtin)
                    VALUES (?1, ?2, ?3, ?4, ?5, 0)
                    "#,
                )
                .bind(uuid::Uuid::new_v4().to_string())
                .bind(&ex.name)
                .bind(ex.kind)
                .bind(&unit)
                .bind(&category)
                .execute(pool)
                .await?;

                if res.rows_affected() == 1 {
                    inserted += 1;
                } else {
                    skipped += 1;
                }
            }

            println!(
                "{} imported {} exercise(s), skipped {}",
                "ok:".green().bold(),
                inserted,
                skipped
            );

            if !unknowns.is_empty() {
                println!(
                    "{} unknown categories: {}",
                    "info:".blue().bold(),
                    unknowns.into_iter().collect::<Vec<_>>().join(", ")
                );
            }
        }

        ExerciseCmd::List { category } => {
            let rows: Vec<(String, MeasurementKind, String, String, bool)> = match &category {
                Some(cat) => {
                    let cat = match canonical_category(cat) {
                        Some(c) => c,
                        None => {
                            println!("{} unknown category `{}`", "error:".red().bold(), cat);
                            return Ok(());
                        }
                    };

                    sqlx::query_as(
                        r#"
                        SELECT name, kind, unit, category, builtin
                        FROM exercises
                        WHERE category = ?
                        ORDER BY name
                        "#,
                    )
                    .bind(cat)
                    .fetch_all(pool)
                    .await?
                }
                None => {
                    sqlx::query_as(
                        "SELECT name, kind, unit, category, builtin FROM exercises ORDER BY name",
                    )
                    .fetch_all(pool)
                    .await?
                }
            };

            if rows.is_empty() {
                println!("{}", "(no exercises)".dimmed());
                return Ok(());
            }

            if json {
                let out: Vec<ExJson> = rows
                    .iter()
                    .enumerate()
                    .map(|(i, (name, kind, unit, category, builtin))| ExJson {
                        idx: i as i64 + 1,
                        name: name.clone(),
                        kind: kind.to_string(),
                        unit: unit.clone(),
                        category: category.clone(),
                        builtin: *builtin,
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&out)?);
                return Ok(());
            }

            println!("{}", "Exercises:".cyan().bold());
            for (i, (name, kind, _unit, category, builtin)) in rows.iter().enumerate() {
                let idx = format!("{}", i + 1).yellow();
                let tag = if *builtin { "".normal() } else { " (custom)".dimmed() };
                println!(
                    "{} • {} — {} [{}]{}",
                    idx,
                    name.bold(),
                    kind,
                    category,
                    tag
                );
            }
        }

        ExerciseCmd::Show { exercise } => {
            let found = resolve(pool, &exercise).await?;

            let Some((id, _)) = found else {
                println!("{} no exercise matching `{}`", "error:".red().bold(), exercise);
                return Ok(());
            };

            let ex: ExerciseDefinition = sqlx::query_as(
                "SELECT id, name, kind, unit, category, builtin FROM exercises WHERE id = ?",
            )
            .bind(&id)
            .fetch_one(pool)
            .await?;

            // Lifetime volume across every plan for this exercise.
            let (total, sessions): (i64, i64) = sqlx::query_as(
                r#"
                SELECT COALESCE(SUM(s.amount_completed), 0), COUNT(*)
                FROM sessions s
                JOIN plans p ON p.id = s.plan_id
                WHERE p.exercise_id = ?
                "#,
            )
            .bind(&id)
            .fetch_one(pool)
            .await?;

            println!("{}", ex.name.cyan().bold());
            println!("  kind:     {}", ex.kind);
            println!("  category: {}", ex.category);
            println!("  source:   {}", if ex.builtin { "built-in" } else { "custom" });
            println!("  lifetime: {} {} over {} session(s)", total, ex.unit, sessions);
        }
    }

    Ok(())
}

/// Resolve an exercise argument (1-based list index or name) to (id, name).
pub async fn resolve(pool: &SqlitePool, arg: &str) -> Result<Option<(String, String)>> {
    if let Ok(idx) = arg.parse::<i64>() {
        let row: Option<(String, String)> = sqlx::query_as(
            r#"
            SELECT id, name
            FROM (
              SELECT id, name, ROW_NUMBER() OVER (ORDER BY name) AS rn
              FROM exercises
            ) t
            WHERE t.rn = ?
            "#,
        )
        .bind(idx)
        .fetch_optional(pool)
        .await?;
        return Ok(row);
    }

    // Exact name first, then the preset-style id.
    let row: Option<(String, String)> = sqlx::query_as(
        "SELECT id, name FROM exercises WHERE name = ?1 OR id = ?1",
    )
    .bind(arg)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}
