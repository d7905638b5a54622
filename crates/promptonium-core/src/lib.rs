//! # Promptonium Core Library
//!
//! Core logic for a prompt-engineering practice trainer: pick a challenge,
//! write a prompt against the clock, get a weighted score back. The
//! `promptonium-cli` binary is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Catalog**: the ordered, read-only list of challenges
//! - **Timer / Attempt**: a clock-free countdown and attempt state machine,
//!   driven by a tokio task that owns the tick interval and evaluation delay
//! - **Scoring**: simulated and heuristic evaluators producing four weighted
//!   sub-scores
//! - **Session**: a demo identity stub that logs completed attempts
//! - **History / Leaderboard / Progress**: analytics over generated history
//!
//! ## Key Components
//!
//! - [`AttemptRunner`]: runs one timed attempt and reports its outcome
//! - [`Evaluator`]: trait implemented by every scoring strategy
//! - [`SessionManager`]: current user and token, owned by the caller
//! - [`Config`]: TOML configuration management

pub mod attempt;
pub mod catalog;
pub mod config;
pub mod error;
pub mod events;
pub mod history;
pub mod leaderboard;
pub mod progress;
pub mod scoring;
pub mod session;
pub mod timer;

pub use attempt::{AttemptFlow, AttemptHandle, AttemptOutcome, AttemptRunner, CompletionEvent, RunnerOptions};
pub use catalog::{Catalog, Challenge, Difficulty};
pub use config::Config;
pub use error::{AuthError, CatalogError, ConfigError, CoreError, SessionError, ValidationError};
pub use events::Event;
pub use scoring::{Evaluator, EvaluatorKind, ModelKind, ResultKind, SubmissionResult};
pub use session::{SessionManager, UserProfile};
pub use timer::{Countdown, TimerState};
