use std::time::{Duration, Instant};

/// Elapsed-time counter for a live gambling session.
///
/// While running, `tick` refreshes elapsed as wall-clock time since the
/// start instant; the TUI loop drives it on its poll cadence. Pausing clears
/// the start instant and freezes the last ticked value. Starting again
/// restarts the basis at "now" and the frozen value is discarded on the next
/// tick. That matches the product's observed behavior and is kept as is.
pub(crate) struct SessionTimer {
    started_at: Option<Instant>,
    elapsed: Duration,
}

impl SessionTimer {
    pub(crate) fn new() -> Self {
        Self {
            started_at: None,
            elapsed: Duration::ZERO,
        }
    }

    pub(crate) fn start(&mut self) {
        self.started_at = Some(Instant::now());
    }

    pub(crate) fn pause(&mut self) {
        self.started_at = None;
    }

    pub(crate) fn reset(&mut self) {
        self.started_at = None;
        self.elapsed = Duration::ZERO;
    }

    /// Refresh the elapsed value. No-op while paused or reset.
    pub(crate) fn tick(&mut self) {
        if let Some(started) = self.started_at {
            self.elapsed = started.elapsed();
        }
    }

    pub(crate) fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    pub(crate) fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub(crate) fn formatted(&self) -> String {
        format_elapsed(self.elapsed)
    }
}

/// `H:MM:SS` at one hour and beyond (hours unpadded), `M:SS` below it.
pub(crate) fn format_elapsed(elapsed: Duration) -> String {
    let total = elapsed.as_secs();
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;

    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes}:{seconds:02}")
    }
}

#[cfg(test)]
mod tests;
