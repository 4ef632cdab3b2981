use std::time::{Duration, Instant};

/// Timing for a single classification run.
#[derive(Debug, Clone)]
pub struct PipelineStats {
    /// Total execution time, tokenization included.
    pub total_time: Duration,
    /// Number of texts classified.
    pub items_processed: usize,
}

impl PipelineStats {
    /// Start timing (call at start of operation).
    pub(crate) fn start() -> PipelineStatsBuilder {
        PipelineStatsBuilder {
            start_time: Instant::now(),
        }
    }

    /// Mean time spent per text.
    pub fn time_per_item(&self) -> Duration {
        match u32::try_from(self.items_processed) {
            Ok(0) | Err(_) => Duration::ZERO,
            Ok(n) => self.total_time / n,
        }
    }
}

/// Tracks timing from creation to [`finish`](Self::finish).
pub(crate) struct PipelineStatsBuilder {
    start_time: Instant,
}

impl PipelineStatsBuilder {
    pub fn finish(self, items_processed: usize) -> PipelineStats {
        PipelineStats {
            total_time: self.start_time.elapsed(),
            items_processed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_elapsed_time_and_items() {
        let builder = PipelineStats::start();
        std::thread::sleep(Duration::from_millis(5));
        let stats = builder.finish(1);

        assert_eq!(stats.items_processed, 1);
        assert!(stats.total_time >= Duration::from_millis(5));
        assert_eq!(stats.time_per_item(), stats.total_time);
    }

    #[test]
    fn empty_run_has_zero_time_per_item() {
        let stats = PipelineStats {
            total_time: Duration::from_secs(1),
            items_processed: 0,
        };
        assert_eq!(stats.time_per_item(), Duration::ZERO);
    }
}
