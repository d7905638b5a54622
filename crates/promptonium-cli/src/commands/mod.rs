pub mod attempt;
pub mod auth;
pub mod challenge;
pub mod config;
pub mod evaluate;
pub mod leaderboard;
pub mod progress;
