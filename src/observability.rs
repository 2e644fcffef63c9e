//! Observability stubs (metrics, tracing)

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics handle for recording counters
#[derive(Debug, Default)]
pub struct Metrics {
    links_created: AtomicU64,
    links_rejected: AtomicU64,
    shorten_failures: AtomicU64,
    code_collisions: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn link_created(&self) {
        self.links_created.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "links_created", "Metric incremented");
    }

    pub fn link_rejected(&self) {
        self.links_rejected.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "links_rejected", "Metric incremented");
    }

    pub fn shorten_failed(&self) {
        self.shorten_failures.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "shorten_failures", "Metric incremented");
    }

    /// Conflicting code draws observed while allocating one link.
    pub fn code_collisions(&self, count: u64) {
        if count > 0 {
            self.code_collisions.fetch_add(count, Ordering::Relaxed);
            tracing::debug!(counter = "code_collisions", count, "Metric incremented");
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            links_created: self.links_created.load(Ordering::Relaxed),
            links_rejected: self.links_rejected.load(Ordering::Relaxed),
            shorten_failures: self.shorten_failures.load(Ordering::Relaxed),
            code_collisions: self.code_collisions.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MetricsSnapshot {
    pub links_created: u64,
    pub links_rejected: u64,
    pub shorten_failures: u64,
    pub code_collisions: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate() {
        let metrics = Metrics::new();
        metrics.link_created();
        metrics.link_created();
        metrics.link_rejected();
        metrics.code_collisions(0);
        metrics.code_collisions(3);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.links_created, 2);
        assert_eq!(snapshot.links_rejected, 1);
        assert_eq!(snapshot.shorten_failures, 0);
        assert_eq!(snapshot.code_collisions, 3);
    }
}
