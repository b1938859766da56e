//! Percentage progress with de-duplication.

/// Turns cumulative byte counts into integer percentages, reporting each value
/// at most once.
///
/// The emitted sequence is strictly increasing, bounded to `0..=100`, and for a
/// non-empty body ends at exactly `100` once every byte has been processed.
#[derive(Debug, Clone)]
pub struct ProgressTracker {
    total: u64,
    last: Option<u8>,
}

impl ProgressTracker {
    #[must_use]
    pub fn new(total: u64) -> Self {
        Self { total, last: None }
    }

    /// Record that `processed` bytes (cumulative) are done.
    ///
    /// Returns the new percentage when it differs from the last one reported.
    /// An empty body never reports anything.
    pub fn advance(&mut self, processed: u64) -> Option<u8> {
        if self.total == 0 {
            return None;
        }
        let percent = (u128::from(processed.min(self.total)) * 100 / u128::from(self.total)) as u8;
        if self.last.is_some_and(|last| percent <= last) {
            return None;
        }
        self.last = Some(percent);
        Some(percent)
    }

    #[must_use]
    pub fn last(&self) -> Option<u8> {
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deduplicates_and_ends_at_100() {
        let mut tracker = ProgressTracker::new(10_000);
        let emitted: Vec<u8> = (1..=10_000u64)
            .step_by(7)
            .chain(std::iter::once(10_000))
            .filter_map(|p| tracker.advance(p))
            .collect();
        assert!(emitted.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(emitted.last(), Some(&100));
    }

    #[test]
    fn first_chunk_may_report_zero() {
        let mut tracker = ProgressTracker::new(1_000_000);
        assert_eq!(tracker.advance(4096), Some(0));
        assert_eq!(tracker.advance(8192), None);
        assert_eq!(tracker.advance(10_000), Some(1));
    }

    #[test]
    fn empty_body_is_silent() {
        let mut tracker = ProgressTracker::new(0);
        assert_eq!(tracker.advance(0), None);
        assert_eq!(tracker.last(), None);
    }

    #[test]
    fn overshoot_is_clamped() {
        let mut tracker = ProgressTracker::new(10);
        assert_eq!(tracker.advance(25), Some(100));
        assert_eq!(tracker.advance(30), None);
    }
}
