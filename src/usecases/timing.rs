use std::time::{Duration, Instant};

/// Logs the elapsed wall time of its scope when dropped.
#[derive(Debug)]
pub struct Stopwatch {
    label: &'static str,
    started: Instant,
}

impl Stopwatch {
    pub fn start(label: &'static str) -> Self {
        Self {
            label,
            started: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

impl Drop for Stopwatch {
    fn drop(&mut self) {
        tracing::info!(
            label = self.label,
            elapsed_secs = self.elapsed().as_secs_f64(),
            "time elapsed"
        );
    }
}
