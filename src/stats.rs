use crate::round::RoundResult;
use crate::settings::Mode;
use crate::util::{average, percentage};
use serde::Serialize;

/// Flash mode outcome counts for one target count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FlashBucket {
    pub total: u32,
    pub correct: u32,
}

/// Timed mode latency totals for one target count. Only correct answers land
/// here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TimedBucket {
    pub total: u32,
    pub total_time_ms: u64,
}

/// Per-count statistics for both modes. Bucket `i` holds target count `i + 1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Statistics {
    flash: Vec<FlashBucket>,
    timed: Vec<TimedBucket>,
}

impl Statistics {
    pub fn new(max_count: usize) -> Self {
        Self {
            flash: vec![FlashBucket::default(); max_count],
            timed: vec![TimedBucket::default(); max_count],
        }
    }

    pub fn len(&self) -> usize {
        self.flash.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flash.is_empty()
    }

    fn index(&self, target_count: u32) -> Option<usize> {
        let idx = (target_count as usize).checked_sub(1)?;
        (idx < self.len()).then_some(idx)
    }

    pub fn record_flash(&mut self, target_count: u32, correct: bool) {
        let Some(idx) = self.index(target_count) else {
            log::debug!("flash result for count {target_count} outside buckets, ignored");
            return;
        };
        let bucket = &mut self.flash[idx];
        bucket.total += 1;
        if correct {
            bucket.correct += 1;
        }
    }

    pub fn record_timed(&mut self, target_count: u32, correct: bool, elapsed_ms: u64) {
        if !correct {
            return;
        }
        let Some(idx) = self.index(target_count) else {
            log::debug!("timed result for count {target_count} outside buckets, ignored");
            return;
        };
        let bucket = &mut self.timed[idx];
        bucket.total += 1;
        bucket.total_time_ms += elapsed_ms;
    }

    /// Route a finished round to the buckets of the mode it was played in.
    pub fn record(&mut self, result: &RoundResult) {
        match result.mode {
            Mode::Flash => self.record_flash(result.target_count, result.correct),
            Mode::Timed => {
                self.record_timed(result.target_count, result.correct, result.elapsed_ms)
            }
        }
    }

    pub fn reset(&mut self) {
        self.reset_flash();
        self.timed.fill(TimedBucket::default());
    }

    pub fn reset_flash(&mut self) {
        self.flash.fill(FlashBucket::default());
    }

    /// Reallocate to `new_max` zeroed buckets. Prior data is dropped because
    /// the charts are keyed by the configured range.
    pub fn resize(&mut self, new_max: usize) {
        *self = Self::new(new_max);
    }

    pub fn flash_buckets(&self) -> &[FlashBucket] {
        &self.flash
    }

    pub fn timed_buckets(&self) -> &[TimedBucket] {
        &self.timed
    }

    pub fn flash_percentages(&self) -> Vec<f64> {
        self.flash
            .iter()
            .map(|b| percentage(b.correct as u64, b.total as u64))
            .collect()
    }

    pub fn timed_averages(&self) -> Vec<f64> {
        self.timed
            .iter()
            .map(|b| average(b.total_time_ms, b.total as u64))
            .collect()
    }

    pub fn flash_total(&self) -> u32 {
        self.flash.iter().map(|b| b.total).sum()
    }

    pub fn timed_total(&self) -> u32 {
        self.timed.iter().map(|b| b.total).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_flash_is_additive() {
        let mut stats = Statistics::new(10);
        for _ in 0..4 {
            stats.record_flash(3, true);
        }
        assert_eq!(
            stats.flash_buckets()[2],
            FlashBucket {
                total: 4,
                correct: 4
            }
        );

        stats.record_flash(3, false);
        assert_eq!(
            stats.flash_buckets()[2],
            FlashBucket {
                total: 5,
                correct: 4
            }
        );
        assert_eq!(stats.flash_total(), 5);
    }

    #[test]
    fn test_record_timed_ignores_wrong_answers() {
        let mut stats = Statistics::new(10);
        let before = stats.clone();
        stats.record_timed(5, false, 900);
        assert_eq!(stats, before);

        stats.record_timed(5, true, 842);
        assert_eq!(
            stats.timed_buckets()[4],
            TimedBucket {
                total: 1,
                total_time_ms: 842
            }
        );
    }

    #[test]
    fn test_out_of_range_counts_are_ignored() {
        let mut stats = Statistics::new(5);
        stats.record_flash(0, true);
        stats.record_flash(6, true);
        stats.record_timed(9, true, 100);
        assert_eq!(stats, Statistics::new(5));
    }

    #[test]
    fn test_reset_matches_fresh_aggregator() {
        let mut stats = Statistics::new(10);
        stats.record_flash(1, true);
        stats.record_timed(2, true, 500);
        stats.reset();
        assert_eq!(stats, Statistics::new(10));

        let mut fresh = Statistics::new(10);
        stats.record_flash(4, false);
        fresh.record_flash(4, false);
        assert_eq!(stats, fresh);
    }

    #[test]
    fn test_reset_flash_keeps_timed() {
        let mut stats = Statistics::new(10);
        stats.record_flash(1, true);
        stats.record_timed(1, true, 300);
        stats.reset_flash();
        assert_eq!(stats.flash_total(), 0);
        assert_eq!(stats.timed_total(), 1);
    }

    #[test]
    fn test_resize_discards_data() {
        let mut stats = Statistics::new(10);
        stats.record_flash(2, true);
        stats.resize(15);
        assert_eq!(stats.len(), 15);
        assert!(stats.flash_buckets().iter().all(|b| b.total == 0));
        assert!(stats.timed_buckets().iter().all(|b| b.total == 0));
    }

    #[test]
    fn test_derived_views() {
        let mut stats = Statistics::new(3);
        stats.record_flash(1, true);
        stats.record_flash(1, false);
        stats.record_flash(2, true);
        stats.record_timed(3, true, 400);
        stats.record_timed(3, true, 600);

        assert_eq!(stats.flash_percentages(), vec![50.0, 100.0, 0.0]);
        assert_eq!(stats.timed_averages(), vec![0.0, 0.0, 500.0]);
    }

    #[test]
    fn test_record_dispatches_on_mode() {
        let mut stats = Statistics::new(10);
        stats.record(&RoundResult {
            target_count: 4,
            guess: 4,
            correct: true,
            elapsed_ms: 250,
            mode: Mode::Timed,
        });
        stats.record(&RoundResult {
            target_count: 4,
            guess: 5,
            correct: false,
            elapsed_ms: 250,
            mode: Mode::Flash,
        });
        assert_eq!(stats.timed_buckets()[3].total_time_ms, 250);
        assert_eq!(
            stats.flash_buckets()[3],
            FlashBucket {
                total: 1,
                correct: 0
            }
        );
    }
}
