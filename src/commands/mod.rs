pub mod achievements;
pub mod calendar;
pub mod config;
pub mod exercise;
pub mod log;
pub mod plan;
pub mod status;
pub mod streak;
