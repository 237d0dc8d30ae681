//! Pure gamification computations: target scheduling, XP/level curve,
//! streak continuity and achievement unlocking. No I/O, no shared state;
//! every function is a total computation over the values it is handed.
//! All persistence happens in the command handlers that call in here.

pub mod achievement;
pub mod level;
pub mod schedule;
pub mod streak;
