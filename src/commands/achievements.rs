use anyhow::Result;
use chrono::{DateTime, Local};
use colored::Colorize;
use serde::Serialize;
use sqlx::SqlitePool;
use std::collections::HashMap;

use crate::{catalog, models::AchievementUnlockRecord};

#[derive(Serialize)]
struct AchJson {
    id: String,
    name: String,
    description: String,
    category: String,
    xp_reward: i64,
    hidden: bool,
    unlocked_at: Option<String>,
}

pub async fn handle(pool: &SqlitePool, all: bool, json: bool) -> Result<()> {
    let rows: Vec<AchievementUnlockRecord> =
        sqlx::query_as("SELECT achievement_id, unlocked_at FROM achievement_unlocks")
            .fetch_all(pool)
            .await?;
    let unlocks: HashMap<String, Option<DateTime<Local>>> = rows
        .into_iter()
        .map(|r| (r.achievement_id, r.unlocked_at))
        .collect();

    if json {
        let out: Vec<AchJson> = catalog::ACHIEVEMENTS
            .iter()
            .filter(|def| {
                let unlocked = unlocks.get(def.id).and_then(|t| *t).is_some();
                unlocked || !def.hidden || all
            })
            .map(|def| {
                let unlocked_at = unlocks.get(def.id).and_then(|t| *t);
                AchJson {
                    id: def.id.to_string(),
                    name: def.name.to_string(),
                    description: def.description.to_string(),
                    category: def.category.to_string(),
                    xp_reward: def.xp_reward,
                    hidden: def.hidden,
                    unlocked_at: unlocked_at.map(|t| t.to_rfc3339()),
                }
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    let total = catalog::ACHIEVEMENTS.len();
    let done = catalog::ACHIEVEMENTS
        .iter()
        .filter(|def| unlocks.get(def.id).and_then(|t| *t).is_some())
        .count();

    println!("{} {}/{}", "Achievements:".cyan().bold(), done, total);

    let mut category = "";
    for def in catalog::ACHIEVEMENTS {
        let unlocked_at = unlocks.get(def.id).and_then(|t| *t);

        // Hidden achievements stay masked until unlocked.
        if def.hidden && unlocked_at.is_none() && !all {
            continue;
        }

        if def.category != category {
            category = def.category;
            println!("\n  {}", category.bold());
        }

        match unlocked_at {
            Some(t) => println!(
                "    {} {} — {} {}",
                "★".green().bold(),
                def.name.bold(),
                def.description,
                format!("({})", t.format("%Y-%m-%d")).dimmed()
            ),
            None if def.hidden => println!(
                "    {} {} — {}",
                "☆".dimmed(),
                "???".dimmed(),
                "hidden until unlocked".dimmed()
            ),
            None => println!(
                "    {} {} — {} {}",
                "☆".dimmed(),
                def.name,
                def.description,
                format!("(+{} XP)", def.xp_reward).dimmed()
            ),
        }
    }

    Ok(())
}
