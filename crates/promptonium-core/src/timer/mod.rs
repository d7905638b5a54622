mod countdown;

pub use countdown::{format_mmss, Countdown, Tick, TimerState};
