use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::types::{Cadence, MeasurementKind};

#[derive(Parser)]
#[command(name = "repwise", version, about = "Incremental fitness habit tracker")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Emit machine-readable JSON instead of colorful text.
    #[arg(global = true, long)]
    pub json: bool,

    /// Evaluate date-sensitive commands as of this date (YYYY-MM-DD,
    /// defaults to today).
    #[arg(global = true, long, value_name = "DATE")]
    pub date: Option<NaiveDate>,

    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Exercise catalog management
    #[command(subcommand, visible_alias = "ex")]
    Exercise(ExerciseCmd),

    /// Plan lifecycle: start, inspect, complete
    #[command(subcommand, visible_alias = "p")]
    Plan(PlanCmd),

    /// Record a workout against a plan
    #[command(visible_alias = "l")]
    Log {
        /// Plan index (from `plan list`) or name
        plan: String,

        /// Amount completed (defaults to today's target)
        amount: Option<i64>,

        /// Workout duration in seconds
        #[arg(short, long)]
        duration: Option<i64>,
    },

    /// Show level, XP, streak and active plan targets
    Status,

    /// List achievements and their unlock state
    #[command(visible_alias = "ach")]
    Achievements {
        /// Include hidden achievements that are still locked
        #[arg(short, long)]
        all: bool,
    },

    /// Streak details and freeze management
    #[command(subcommand)]
    Streak(StreakCmd),

    /// Show workout days in a calendar view
    #[command(visible_alias = "cal")]
    Calendar {
        /// Year to show (defaults to current year)
        #[arg(short, long)]
        year: Option<i32>,

        /// Month to show (1-12, defaults to current month)
        #[arg(short, long)]
        month: Option<u32>,
    },

    /// View or edit repwise config
    #[command(subcommand)]
    Config(ConfigCmd),
}

//
// Commands
//

#[derive(Debug, Subcommand)]
pub enum ExerciseCmd {
    /// Add a custom exercise
    #[command(visible_alias = "a")]
    Add {
        /// Exercise name
        name: String,

        /// What the amount counts
        #[arg(short, long, value_enum)]
        kind: MeasurementKind,

        /// Category tag
        #[arg(short, long)]
        category: String,

        /// Unit label (defaults to the measurement kind's unit)
        #[arg(short, long)]
        unit: Option<String>,
    },

    /// Import exercises from a TOML file
    #[command(visible_alias = "i")]
    Import {
        /// Path to TOML file
        file: String,
    },

    /// List all exercises
    #[command(visible_alias = "l")]
    List {
        /// Filter by category tag
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Show one exercise with its lifetime total
    #[command(visible_alias = "s")]
    Show {
        /// Exercise index or name
        exercise: String,
    },
}

#[derive(Subcommand)]
pub enum PlanCmd {
    /// Start a plan from a preset or from custom goal parameters
    #[command(visible_alias = "s")]
    Start(StartArgs),

    /// List the built-in preset plans
    Presets,

    /// List plans
    #[command(visible_alias = "l")]
    List {
        /// Include completed and stopped plans
        #[arg(short, long)]
        all: bool,
    },

    /// Show a plan with today's target and progress
    Show {
        /// Plan index (from `plan list`) or name
        plan: String,
    },

    /// Mark a plan as completed
    Complete {
        /// Plan index (from `plan list`) or name
        plan: String,
    },

    /// Deactivate a plan without completing it
    Stop {
        /// Plan index (from `plan list`) or name
        plan: String,
    },

    /// Set or clear a plan's daily reminder time
    Remind {
        /// Plan index (from `plan list`) or name
        plan: String,

        /// Reminder time as HH:MM; omit to clear
        time: Option<String>,
    },
}

#[derive(Args)]
pub struct StartArgs {
    /// Preset plan id (see `plan presets`)
    pub preset: Option<String>,

    /// Exercise index or name (custom plans)
    #[arg(short, long)]
    pub exercise: Option<String>,

    /// Display name for the plan
    #[arg(short, long)]
    pub name: Option<String>,

    /// Amount to start at
    #[arg(short, long)]
    pub starting: Option<i64>,

    /// Goal amount
    #[arg(short, long)]
    pub target: Option<i64>,

    /// Amount added per cadence period
    #[arg(short, long)]
    pub increment: Option<i64>,

    /// How often the target goes up
    #[arg(short, long, value_enum)]
    pub cadence: Option<Cadence>,

    /// Daily reminder time as HH:MM
    #[arg(short, long)]
    pub remind: Option<String>,
}

#[derive(Subcommand)]
pub enum StreakCmd {
    /// Show current and longest streak
    #[command(visible_alias = "s")]
    Show,

    /// Consume one streak freeze
    #[command(visible_alias = "f")]
    Freeze,
}

#[derive(Subcommand)]
pub enum ConfigCmd {
    /// Show all config keys
    List,

    /// Get the value of a key
    Get { key: String },

    /// Set or override a key
    Set { key: String, val: String },

    /// Remove a key
    Unset { key: String },
}
