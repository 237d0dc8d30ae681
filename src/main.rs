use anyhow::Result;
use chrono::Local;
use clap::Parser;
use cli::{Cli, Commands};
use db::open;

mod catalog;
mod cli;
mod commands;
mod db;
mod engine;
mod models;
mod types;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let db_path = "./repwise.db";

    let pool = open(db_path).await?;
    let today = cli.date.unwrap_or_else(|| Local::now().date_naive());

    match cli.cmd {
        Commands::Exercise(cmd) => commands::exercise::handle(cmd, &pool, cli.json).await?,
        Commands::Plan(cmd) => commands::plan::handle(cmd, &pool, today, cli.json).await?,
        Commands::Log {
            plan,
            amount,
            duration,
        } => commands::log::handle(&plan, amount, duration, &pool, today).await?,
        Commands::Status => commands::status::handle(&pool, today, cli.json).await?,
        Commands::Achievements { all } => commands::achievements::handle(&pool, all, cli.json).await?,
        Commands::Streak(cmd) => commands::streak::handle(cmd, &pool, today).await?,
        Commands::Calendar { year, month } => commands::calendar::handle(&pool, year, month).await?,
        Commands::Config(cmd) => commands::config::handle(cmd).await?,
    }

    Ok(())
}
