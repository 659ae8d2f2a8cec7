use crate::host::collaborators::Scheduler;

/// In-process [`Scheduler`] that keeps the earliest pending redraw request.
///
/// Hosts poll it once per frame with [`RedrawQueue::take`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RedrawQueue {
    pending: Option<f64>,
    requests: u64,
}

impl RedrawQueue {
    /// Empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Earliest pending delay, without draining it.
    pub fn pending(&self) -> Option<f64> {
        self.pending
    }

    /// Drain the pending delay.
    pub fn take(&mut self) -> Option<f64> {
        self.pending.take()
    }

    /// Total number of requests received, coalesced or not.
    pub fn requests(&self) -> u64 {
        self.requests
    }
}

impl Scheduler for RedrawQueue {
    fn request_redraw(&mut self, after_secs: f64) {
        self.requests += 1;
        let after_secs = if after_secs.is_nan() {
            0.0
        } else {
            after_secs.max(0.0)
        };
        self.pending = Some(match self.pending {
            Some(existing) => existing.min(after_secs),
            None => after_secs,
        });
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/schedule.rs"]
mod tests;
