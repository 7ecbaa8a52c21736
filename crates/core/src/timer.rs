//! Stopwatch for profiling translation passes.

use std::time::{Duration, Instant};

/// A start/stop stopwatch.
///
/// While running, [`Timer::elapsed`] reports the time since the last
/// [`Timer::start`]; once stopped it reports the frozen interval.
#[derive(Debug, Default)]
pub struct Timer {
    started: Option<Instant>,
    accumulated: Duration,
}

impl Timer {
    /// Create a stopped timer with zero elapsed time.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a timer that is already running.
    pub fn started() -> Self {
        let mut timer = Self::new();
        timer.start();
        timer
    }

    /// Start (or restart) measuring. Any previous measurement is discarded.
    pub fn start(&mut self) {
        self.accumulated = Duration::ZERO;
        self.started = Some(Instant::now());
    }

    /// Stop measuring and freeze the elapsed time.
    pub fn stop(&mut self) -> Duration {
        if let Some(started) = self.started.take() {
            self.accumulated = started.elapsed();
        }
        self.accumulated
    }

    /// Whether the timer is currently running.
    pub fn is_running(&self) -> bool {
        self.started.is_some()
    }

    /// Elapsed time of the current or last measurement.
    pub fn elapsed(&self) -> Duration {
        match self.started {
            Some(started) => started.elapsed(),
            None => self.accumulated,
        }
    }

    /// Elapsed time in seconds.
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed().as_secs_f64()
    }
}
