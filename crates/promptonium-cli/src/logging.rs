//! Tracing initialization.
//!
//! - PROMPTONIUM_LOG sets the filter (e.g. "info" or
//!   "warn,promptonium_core=debug"). Defaults to "warn".
//! - PROMPTONIUM_LOG_FORMAT=json selects JSON logs.
//!
//! Logs go to stderr; stdout carries command output only.

use tracing_subscriber::EnvFilter;

pub fn init() {
    let filter =
        EnvFilter::try_from_env("PROMPTONIUM_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    match std::env::var("PROMPTONIUM_LOG_FORMAT").as_deref() {
        Ok("json") => builder.json().init(),
        _ => builder.init(),
    }
}
