//! Per-attempt countdown.
//!
//! A whole-second state machine with no internal thread: the owner calls
//! `tick()` once per elapsed second.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> (Stopped | Expired)
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
    /// Stopped early: submission started or the attempt was left.
    Stopped,
    /// Reached zero.
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Not running; nothing changed.
    Ignored,
    /// One second elapsed, time remains.
    Remaining(u32),
    /// This tick brought the counter to zero.
    Expired,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Countdown {
    limit_secs: u32,
    remaining_secs: u32,
    state: TimerState,
}

impl Countdown {
    pub fn new(limit_secs: u32) -> Self {
        Self {
            limit_secs,
            remaining_secs: limit_secs,
            state: TimerState::Idle,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn limit_secs(&self) -> u32 {
        self.limit_secs
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.limit_secs - self.remaining_secs
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    /// Remaining time as `m:ss`.
    pub fn display(&self) -> String {
        format_mmss(self.remaining_secs)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin counting. Only valid from `Idle`. A zero limit expires on the
    /// first tick.
    pub fn start(&mut self) -> bool {
        if self.state != TimerState::Idle {
            return false;
        }
        self.state = TimerState::Running;
        true
    }

    /// Freeze the counter at its current value.
    pub fn stop(&mut self) -> bool {
        match self.state {
            TimerState::Idle | TimerState::Running => {
                self.state = TimerState::Stopped;
                true
            }
            TimerState::Stopped | TimerState::Expired => false,
        }
    }

    /// Advance by one second.
    pub fn tick(&mut self) -> Tick {
        if self.state != TimerState::Running {
            return Tick::Ignored;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.state = TimerState::Expired;
            Tick::Expired
        } else {
            Tick::Remaining(self.remaining_secs)
        }
    }
}

/// `m:ss`, minutes unpadded.
pub fn format_mmss(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}
