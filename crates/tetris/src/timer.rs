//! Tick source for the engine.
//!
//! The host feeds elapsed wall time in; the timer reports when the gravity
//! tick is due. At most one tick is pending at a time and restarting always
//! discards the pending one.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickTimer {
    interval_ms: Option<u32>,
    elapsed_ms: u32,
}

impl TickTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel any pending tick and schedule ticks every `interval_ms`.
    pub fn start(&mut self, interval_ms: u32) {
        self.interval_ms = Some(interval_ms.max(1));
        self.elapsed_ms = 0;
    }

    pub fn stop(&mut self) {
        self.interval_ms = None;
        self.elapsed_ms = 0;
    }

    pub fn is_running(&self) -> bool {
        self.interval_ms.is_some()
    }

    pub fn interval_ms(&self) -> Option<u32> {
        self.interval_ms
    }

    /// Add elapsed time; returns true when a tick fires.
    ///
    /// Fires at most once per call. Time beyond the fired tick is carried
    /// over but capped below one interval.
    pub fn advance(&mut self, elapsed_ms: u32) -> bool {
        let Some(interval) = self.interval_ms else {
            return false;
        };
        self.elapsed_ms = self.elapsed_ms.saturating_add(elapsed_ms);
        if self.elapsed_ms < interval {
            return false;
        }
        self.elapsed_ms = (self.elapsed_ms - interval).min(interval - 1);
        true
    }
}
