use std::sync::atomic::{AtomicU64, Ordering};

/// Anonymous, process-lifetime usage counter. Only a total is kept; no
/// per-user data, no conversation history.
#[derive(Debug, Default)]
pub struct RequestStats {
    total: AtomicU64,
}

impl RequestStats {
    /// Count one chat request, whatever its outcome.
    pub fn record_request(&self) {
        self.total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn total_requests(&self) -> u64 {
        self.total.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_starts_at_zero_and_increments() {
        let stats = RequestStats::default();
        assert_eq!(stats.total_requests(), 0);

        stats.record_request();
        stats.record_request();
        assert_eq!(stats.total_requests(), 2);
    }
}
