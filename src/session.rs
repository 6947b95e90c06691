use crate::round::{RenderModel, RoundEvent, RoundMachine, RoundResult};
use crate::settings::{RoundConfig, SettingField, SettingsChange, SettingsError, SettingsStore};
use crate::stats::Statistics;
use rand::{rngs::StdRng, SeedableRng};

/// The game core as one object: settings, the round in progress, the stats it
/// feeds, and the random source behind the layouts.
///
/// All time arguments are milliseconds on a caller-chosen monotonic clock.
#[derive(Debug, Clone)]
pub struct Session {
    settings: SettingsStore,
    machine: RoundMachine,
    stats: Statistics,
    rng: StdRng,
}

impl Session {
    pub fn new(config: RoundConfig) -> Result<Self, SettingsError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    pub fn with_seed(config: RoundConfig, seed: u64) -> Result<Self, SettingsError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: RoundConfig, rng: StdRng) -> Result<Self, SettingsError> {
        let settings = SettingsStore::new(config)?;
        let stats = Statistics::new(settings.config().bucket_count());
        Ok(Self {
            settings,
            machine: RoundMachine::new(),
            stats,
            rng,
        })
    }

    pub fn config(&self) -> &RoundConfig {
        self.settings.config()
    }

    pub fn stats(&self) -> &Statistics {
        &self.stats
    }

    pub fn machine(&self) -> &RoundMachine {
        &self.machine
    }

    pub fn is_running(&self) -> bool {
        !self.machine.is_idle()
    }

    /// Replace the whole configuration.
    pub fn configure(
        &mut self,
        config: RoundConfig,
        now_ms: u64,
    ) -> Result<SettingsChange, SettingsError> {
        let change = self.settings.replace(config)?;
        self.apply(change, now_ms);
        Ok(change)
    }

    /// Step one field, as the settings screen does.
    pub fn adjust(
        &mut self,
        field: SettingField,
        delta: i32,
        now_ms: u64,
    ) -> Result<SettingsChange, SettingsError> {
        let change = self.settings.adjust(field, delta)?;
        self.apply(change, now_ms);
        Ok(change)
    }

    pub fn toggle_mode(&mut self, now_ms: u64) -> Result<SettingsChange, SettingsError> {
        self.adjust(SettingField::Mode, 1, now_ms)
    }

    fn apply(&mut self, change: SettingsChange, now_ms: u64) {
        if change.max_changed {
            let buckets = self.config().bucket_count();
            log::info!("target range now ends at {buckets}, resizing stats");
            self.stats.resize(buckets);
        } else if change.flash_duration_changed {
            log::info!(
                "flash duration now {} ms, clearing flash stats",
                self.config().flash_duration_ms
            );
            self.stats.reset_flash();
        }

        if change.mode_changed && self.is_running() {
            log::info!("mode switched to {} mid-round, restarting", self.config().mode);
            self.stop();
            self.start(now_ms);
        }
    }

    pub fn start(&mut self, now_ms: u64) {
        let config = self.settings.snapshot();
        self.machine.start(&config, now_ms, &mut self.rng);
    }

    pub fn stop(&mut self) {
        self.machine.stop();
    }

    /// Score a guess and fold it into the statistics.
    pub fn answer(&mut self, guess: u32, now_ms: u64) -> Option<RoundResult> {
        let result = self.machine.answer(guess, now_ms)?;
        log::debug!(
            "guess {} for {} dots: {} in {} ms",
            result.guess,
            result.target_count,
            if result.correct { "correct" } else { "wrong" },
            result.elapsed_ms
        );
        self.stats.record(&result);
        Some(result)
    }

    pub fn tick(&mut self, now_ms: u64) -> Vec<RoundEvent> {
        let config = self.settings.snapshot();
        self.machine.tick(now_ms, &config, &mut self.rng)
    }

    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }

    pub fn render_model(&self) -> RenderModel {
        self.machine.render_model()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::round::Phase;
    use crate::settings::{CountRange, Mode};

    fn session(config: RoundConfig) -> Session {
        Session::with_seed(config, 99).unwrap()
    }

    #[test]
    fn test_invalid_config_is_rejected_up_front() {
        let cfg = RoundConfig {
            target_range: CountRange::new(5, 2),
            ..RoundConfig::default()
        };
        assert!(Session::new(cfg).is_err());
    }

    #[test]
    fn test_answer_records_into_stats() {
        let mut s = session(RoundConfig::default());
        s.start(0);
        let target = s.machine().target_count().unwrap();

        let result = s.answer(target, 842).unwrap();
        assert!(result.correct);
        let bucket = s.stats().timed_buckets()[target as usize - 1];
        assert_eq!(bucket.total, 1);
        assert_eq!(bucket.total_time_ms, 842);
    }

    #[test]
    fn test_max_change_resizes_stats() {
        let mut s = session(RoundConfig::default());
        s.start(0);
        let target = s.machine().target_count().unwrap();
        s.answer(target, 100);

        let cfg = RoundConfig {
            target_range: CountRange::new(1, 15),
            ..s.config().clone()
        };
        let change = s.configure(cfg, 200).unwrap();
        assert!(change.max_changed);
        assert_eq!(s.stats().len(), 15);
        assert_eq!(s.stats().timed_total(), 0);
    }

    #[test]
    fn test_flash_duration_change_clears_flash_stats_only() {
        let mut s = session(RoundConfig {
            mode: Mode::Flash,
            ..RoundConfig::default()
        });
        s.start(0);
        let target = s.machine().target_count().unwrap();
        s.answer(target, 100);
        assert_eq!(s.stats().flash_total(), 1);

        s.adjust(SettingField::FlashDuration, 1, 150).unwrap();
        assert_eq!(s.stats().flash_total(), 0);
        assert_eq!(s.stats().len(), 10);
    }

    #[test]
    fn test_mode_toggle_restarts_running_round() {
        let mut s = session(RoundConfig::default());
        s.start(0);
        let before = s.machine().generation();

        s.toggle_mode(50).unwrap();
        assert_eq!(s.config().mode, Mode::Flash);
        assert_eq!(s.machine().mode(), Some(Mode::Flash));
        assert_eq!(s.machine().phase(), Phase::ShowingDots);
        assert!(s.machine().generation() > before);
    }

    #[test]
    fn test_mode_toggle_while_idle_does_not_start() {
        let mut s = session(RoundConfig::default());
        s.toggle_mode(0).unwrap();
        assert!(!s.is_running());
    }

    #[test]
    fn test_bad_adjustment_leaves_state_alone() {
        let mut s = session(RoundConfig::default());
        let before = s.config().clone();
        assert!(s
            .configure(
                RoundConfig {
                    flash_duration_ms: 0,
                    ..before.clone()
                },
                0
            )
            .is_err());
        assert_eq!(s.config(), &before);
    }

    #[test]
    fn test_out_of_range_flash_duration_is_refused_up_front() {
        let cfg = RoundConfig {
            mode: Mode::Flash,
            flash_duration_ms: u64::MAX,
            ..RoundConfig::default()
        };
        assert!(matches!(
            Session::with_seed(cfg, 1),
            Err(SettingsError::FlashDurationOutOfRange { .. })
        ));
    }
}
