use std::str::FromStr;

use anyhow::Result;
use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};

use crate::catalog;

pub type DB = SqlitePool;

pub async fn open(path: &str) -> Result<DB> {
    let opts = SqliteConnectOptions::from_str(path)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(opts)
        .await?;

    migrate(&pool).await?;
    Ok(pool)
}

/// Idempotent schema setup plus first-launch seeding: the preset
/// exercise catalog, the singleton stats row and one locked unlock row
/// per achievement. Safe to run on every start.
async fn migrate(pool: &SqlitePool) -> Result<()> {
    sqlx::raw_sql(
        r#"
        CREATE TABLE IF NOT EXISTS exercises (
            id          TEXT PRIMARY KEY,
            name        TEXT NOT NULL UNIQUE,
            kind        TEXT NOT NULL,
            unit        TEXT NOT NULL,
            category    TEXT NOT NULL,
            builtin     INTEGER NOT NULL DEFAULT 0,
            created_at  TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS plans (
            id               TEXT PRIMARY KEY,
            name             TEXT NOT NULL,
            exercise_id      TEXT NOT NULL REFERENCES exercises(id),
            starting_amount  INTEGER NOT NULL,
            target_amount    INTEGER NOT NULL,
            increment_amount INTEGER NOT NULL,
            cadence          TEXT NOT NULL,
            start_date       TEXT NOT NULL,
            active           INTEGER NOT NULL DEFAULT 1,
            completed_at     TEXT,
            reminder_time    TEXT,
            created_at       TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS sessions (
            id               TEXT PRIMARY KEY,
            plan_id          TEXT NOT NULL REFERENCES plans(id) ON DELETE CASCADE,
            date             TEXT NOT NULL,
            amount_completed INTEGER NOT NULL,
            amount_targeted  INTEGER NOT NULL,
            xp_awarded       INTEGER NOT NULL,
            duration_seconds INTEGER,
            completed_at     TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS stats (
            id                INTEGER PRIMARY KEY CHECK (id = 1),
            total_xp          INTEGER NOT NULL DEFAULT 0,
            level             INTEGER NOT NULL DEFAULT 1,
            current_streak    INTEGER NOT NULL DEFAULT 0,
            longest_streak    INTEGER NOT NULL DEFAULT 0,
            total_workouts    INTEGER NOT NULL DEFAULT 0,
            streak_freezes    INTEGER NOT NULL DEFAULT 0,
            last_workout_date TEXT
        );

        CREATE TABLE IF NOT EXISTS achievement_unlocks (
            achievement_id TEXT PRIMARY KEY,
            unlocked_at    TEXT
        );
        "#,
    )
    .execute(pool)
    .await?;

    let mut tx = pool.begin().await?;

    for ex in catalog::PRESET_EXERCISES {
        sqlx::query(
            r#"
            INSERT OR IGNORE INTO exercises (id, name, kind, unit, category, builtin)
            VALUES (?1, ?2, ?3, ?4, ?5, 1)
            "#,
        )
        .bind(ex.id)
        .bind(ex.name)
        .bind(ex.kind)
        .bind(ex.unit)
        .bind(ex.category)
        .execute(&mut *tx)
        .await?;
    }

    // New installs start with a small stock of streak freezes.
    sqlx::query(
        "INSERT OR IGNORE INTO stats (id, streak_freezes) VALUES (1, 3)",
    )
    .execute(&mut *tx)
    .await?;

    for def in catalog::ACHIEVEMENTS {
        sqlx::query("INSERT OR IGNORE INTO achievement_unlocks (achievement_id) VALUES (?1)")
            .bind(def.id)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;
    Ok(())
}
