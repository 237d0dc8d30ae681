use once_cell::sync::Lazy;
use std::{
    collections::{BTreeMap, HashSet},
    fmt::Display,
    fs,
    path::Path,
};
use strsim::jaro_winkler;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use sqlx::prelude::Type;

/// How often a plan's target goes up. Monthly is a fixed 30-day span,
/// not a calendar month.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Serialize, Deserialize, Type)]
#[sqlx(type_name = "TEXT", rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum Cadence {
    Daily,
    Weekly,
    Biweekly,
    Monthly,
}

impl Cadence {
    pub fn days_per_period(self) -> i64 {
        match self {
            Self::Daily => 1,
            Self::Weekly => 7,
            Self::Biweekly => 14,
            Self::Monthly => 30,
        }
    }
}

impl Display for Cadence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Biweekly => "biweekly",
            Self::Monthly => "monthly",
        };

        write!(f, "{}", s)
    }
}

/// What an exercise amount counts: repetitions, seconds held, or meters
/// covered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Serialize, Deserialize, Type)]
#[sqlx(type_name = "TEXT", rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum MeasurementKind {
    Reps,
    DurationSeconds,
    DistanceMeters,
}

impl MeasurementKind {
    pub fn unit_label(self) -> &'static str {
        match self {
            Self::Reps => "reps",
            Self::DurationSeconds => "s",
            Self::DistanceMeters => "m",
        }
    }
}

impl Display for MeasurementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Reps => "reps",
            Self::DurationSeconds => "duration-seconds",
            Self::DistanceMeters => "distance-meters",
        };

        write!(f, "{}", s)
    }
}

pub static ALLOWED_CATEGORIES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "upper-body",
        "lower-body",
        "core",
        "cardio",
        "full-body",
        "flexibility",
    ])
});

/// Returns the canonical lowercase category tag or `None` if not allowed.
pub fn canonical_category<S: AsRef<str>>(c: S) -> Option<String> {
    let c = c.as_ref().to_ascii_lowercase().replace(' ', "-");
    if ALLOWED_CATEGORIES.contains(c.as_str()) {
        Some(c)
    } else {
        None
    }
}

/// Return the closest allowed category for `input`
/// if similarity is high *and* clearly better than the runner-up.
/// Otherwise return `None` (no suggestion shown).
pub fn best_category_suggestion(input: &str) -> Option<&'static str> {
    let inp = input.to_ascii_lowercase();
    if inp.trim().is_empty() {
        return None;
    }

    // Collect (category, score) pairs.
    let mut scores: Vec<(&'static str, f64)> = ALLOWED_CATEGORIES
        .iter()
        .copied()
        .map(|c| (c, jaro_winkler(&inp, c)))
        .collect();

    // Highest score first.
    scores.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap());

    let (best, best_score) = scores[0];
    let second_score = scores.get(1).map(|(_, s)| *s).unwrap_or(0.0);

    const MIN_SCORE: f64 = 0.80;
    const GAP: f64 = 0.02;

    if best_score >= MIN_SCORE && best_score - second_score >= GAP {
        Some(best)
    } else {
        None
    }
}

#[derive(Deserialize)]
pub struct ExerciseDef {
    pub name: String,
    pub kind: MeasurementKind,
    pub unit: Option<String>,
    pub category: String,
}

#[derive(Deserialize)]
pub struct ExerciseImport {
    pub exercise: Vec<ExerciseDef>,
}

/// Flat key/value config persisted as TOML under the user config dir.
#[derive(Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(flatten)]
    pub map: BTreeMap<String, String>,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content).with_context(|| format!("Invalid config file: {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config dir: {}", parent.display()))?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cadence_day_spans_are_fixed() {
        assert_eq!(Cadence::Daily.days_per_period(), 1);
        assert_eq!(Cadence::Weekly.days_per_period(), 7);
        assert_eq!(Cadence::Biweekly.days_per_period(), 14);
        // Fixed 30-day span, never calendar months.
        assert_eq!(Cadence::Monthly.days_per_period(), 30);
    }

    #[test]
    fn category_canonicalization() {
        assert_eq!(canonical_category("Upper Body").as_deref(), Some("upper-body"));
        assert_eq!(canonical_category("CORE").as_deref(), Some("core"));
        assert_eq!(canonical_category("arms"), None);
    }

    #[test]
    fn category_suggestion_for_close_typo() {
        assert_eq!(best_category_suggestion("cardoi"), Some("cardio"));
        assert_eq!(best_category_suggestion("zzz"), None);
    }
}
