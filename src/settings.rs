use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::{fmt, ops::RangeInclusive, str::FromStr};
use thiserror::Error;

/// Largest dot count either range may reach.
pub const MAX_COUNT: u32 = 25;
pub const MIN_FLASH_MS: u64 = 100;
pub const MAX_FLASH_MS: u64 = 2000;
pub const FLASH_STEP_MS: u64 = 100;
pub const DEFAULT_FLASH_MS: u64 = 1000;
pub const DEFAULT_MIN_SEPARATION: f64 = 25.0;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettingsError {
    #[error("invalid {name} range: min {min} is greater than max {max}")]
    InvertedRange {
        name: &'static str,
        min: u32,
        max: u32,
    },

    #[error("invalid {name} range: counts start at 1")]
    ZeroCount { name: &'static str },

    #[error("invalid {name} range: max {max} exceeds the limit of {limit}")]
    CountTooLarge {
        name: &'static str,
        max: u32,
        limit: u32,
    },

    #[error("flash duration {ms} ms is outside {min}..={max} ms")]
    FlashDurationOutOfRange { ms: u64, min: u64, max: u64 },

    #[error("minimum separation must be a positive number, got {0}")]
    InvalidSeparation(f64),

    #[error("could not parse range {0:?}, expected MIN-MAX")]
    RangeSyntax(String),
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    ValueEnum,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// dots are shown for a fixed duration, then hidden before the guess
    Flash,
    /// dots stay visible and the time to a correct answer is measured
    Timed,
}

impl Mode {
    pub fn toggled(self) -> Self {
        match self {
            Mode::Flash => Mode::Timed,
            Mode::Timed => Mode::Flash,
        }
    }
}

/// Inclusive range of dot counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountRange {
    pub min: u32,
    pub max: u32,
}

impl CountRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    fn validate(&self, name: &'static str) -> Result<(), SettingsError> {
        if self.min == 0 {
            return Err(SettingsError::ZeroCount { name });
        }
        if self.min > self.max {
            return Err(SettingsError::InvertedRange {
                name,
                min: self.min,
                max: self.max,
            });
        }
        if self.max > MAX_COUNT {
            return Err(SettingsError::CountTooLarge {
                name,
                max: self.max,
                limit: MAX_COUNT,
            });
        }
        Ok(())
    }

    pub fn contains(&self, n: u32) -> bool {
        self.iter().contains(&n)
    }

    pub fn iter(&self) -> RangeInclusive<u32> {
        self.min..=self.max
    }
}

impl fmt::Display for CountRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

impl FromStr for CountRange {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let syntax = || SettingsError::RangeSyntax(s.to_string());
        let (min, max) = match s.split_once('-') {
            Some((min, max)) => (min, max),
            None => (s, s),
        };
        let min = min.trim().parse::<u32>().map_err(|_| syntax())?;
        let max = max.trim().parse::<u32>().map_err(|_| syntax())?;
        Ok(Self { min, max })
    }
}

/// Everything a round needs to know about how to lay out and score dots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundConfig {
    pub mode: Mode,
    pub flash_duration_ms: u64,
    pub target_range: CountRange,
    pub distractors_enabled: bool,
    pub distractor_range: CountRange,
    pub min_separation: f64,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Timed,
            flash_duration_ms: DEFAULT_FLASH_MS,
            target_range: CountRange::new(1, 10),
            distractors_enabled: false,
            distractor_range: CountRange::new(1, 5),
            min_separation: DEFAULT_MIN_SEPARATION,
        }
    }
}

impl RoundConfig {
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(MIN_FLASH_MS..=MAX_FLASH_MS).contains(&self.flash_duration_ms) {
            return Err(SettingsError::FlashDurationOutOfRange {
                ms: self.flash_duration_ms,
                min: MIN_FLASH_MS,
                max: MAX_FLASH_MS,
            });
        }
        if !(self.min_separation.is_finite() && self.min_separation > 0.0) {
            return Err(SettingsError::InvalidSeparation(self.min_separation));
        }
        self.target_range.validate("target")?;
        self.distractor_range.validate("distractor")
    }

    /// Number of statistics buckets this config needs.
    pub fn bucket_count(&self) -> usize {
        self.target_range.max as usize
    }
}

/// What changed when a new config was accepted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SettingsChange {
    pub mode_changed: bool,
    /// stats buckets have to be resized
    pub max_changed: bool,
    /// flash accuracy was measured under a different duration
    pub flash_duration_changed: bool,
}

impl SettingsChange {
    fn between(old: &RoundConfig, new: &RoundConfig) -> Self {
        Self {
            mode_changed: old.mode != new.mode,
            max_changed: old.target_range.max != new.target_range.max,
            flash_duration_changed: old.flash_duration_ms != new.flash_duration_ms,
        }
    }
}

/// Fields the settings screen can step through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingField {
    Mode,
    FlashDuration,
    TargetMin,
    TargetMax,
    Distractors,
    DistractorMin,
    DistractorMax,
}

impl SettingField {
    pub const ALL: [SettingField; 7] = [
        SettingField::Mode,
        SettingField::FlashDuration,
        SettingField::TargetMin,
        SettingField::TargetMax,
        SettingField::Distractors,
        SettingField::DistractorMin,
        SettingField::DistractorMax,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SettingField::Mode => "Mode",
            SettingField::FlashDuration => "Flash speed",
            SettingField::TargetMin => "Fewest dots",
            SettingField::TargetMax => "Most dots",
            SettingField::Distractors => "Distraction dots",
            SettingField::DistractorMin => "Fewest distractors",
            SettingField::DistractorMax => "Most distractors",
        }
    }

    pub fn value(self, cfg: &RoundConfig) -> String {
        let on_off = |b: bool| if b { "ON" } else { "OFF" }.to_string();
        match self {
            SettingField::Mode => cfg.mode.to_string(),
            SettingField::FlashDuration => format!("{} ms", cfg.flash_duration_ms),
            SettingField::TargetMin => cfg.target_range.min.to_string(),
            SettingField::TargetMax => cfg.target_range.max.to_string(),
            SettingField::Distractors => on_off(cfg.distractors_enabled),
            SettingField::DistractorMin => cfg.distractor_range.min.to_string(),
            SettingField::DistractorMax => cfg.distractor_range.max.to_string(),
        }
    }
}

fn step_count(value: u32, delta: i32, lo: u32, hi: u32) -> u32 {
    (value as i64 + delta as i64).clamp(lo as i64, hi as i64) as u32
}

/// Owner of the live configuration. Every change is validated here before
/// any round can see it.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    config: RoundConfig,
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self {
            config: RoundConfig::default(),
        }
    }
}

impl SettingsStore {
    pub fn new(config: RoundConfig) -> Result<Self, SettingsError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RoundConfig {
        &self.config
    }

    /// Copy handed to a round when it starts.
    pub fn snapshot(&self) -> RoundConfig {
        self.config.clone()
    }

    pub fn replace(&mut self, config: RoundConfig) -> Result<SettingsChange, SettingsError> {
        config.validate()?;
        let change = SettingsChange::between(&self.config, &config);
        self.config = config;
        Ok(change)
    }

    fn update<F>(&mut self, f: F) -> Result<SettingsChange, SettingsError>
    where
        F: FnOnce(&mut RoundConfig),
    {
        let mut next = self.config.clone();
        f(&mut next);
        self.replace(next)
    }

    pub fn set_mode(&mut self, mode: Mode) -> Result<SettingsChange, SettingsError> {
        self.update(|c| c.mode = mode)
    }

    pub fn set_flash_duration(&mut self, ms: u64) -> Result<SettingsChange, SettingsError> {
        self.update(|c| c.flash_duration_ms = ms)
    }

    pub fn set_target_range(&mut self, min: u32, max: u32) -> Result<SettingsChange, SettingsError> {
        self.update(|c| c.target_range = CountRange::new(min, max))
    }

    pub fn set_distractors_enabled(&mut self, on: bool) -> Result<SettingsChange, SettingsError> {
        self.update(|c| c.distractors_enabled = on)
    }

    pub fn set_distractor_range(
        &mut self,
        min: u32,
        max: u32,
    ) -> Result<SettingsChange, SettingsError> {
        self.update(|c| c.distractor_range = CountRange::new(min, max))
    }

    pub fn set_min_separation(&mut self, separation: f64) -> Result<SettingsChange, SettingsError> {
        self.update(|c| c.min_separation = separation)
    }

    /// Slider-style step of one field. Values are clamped to their limits and
    /// range ends never cross each other.
    pub fn adjust(
        &mut self,
        field: SettingField,
        delta: i32,
    ) -> Result<SettingsChange, SettingsError> {
        self.update(|c| match field {
            SettingField::Mode => {
                if delta != 0 {
                    c.mode = c.mode.toggled();
                }
            }
            SettingField::FlashDuration => {
                let step = FLASH_STEP_MS as i64 * delta as i64;
                c.flash_duration_ms = (c.flash_duration_ms as i64 + step)
                    .clamp(MIN_FLASH_MS as i64, MAX_FLASH_MS as i64)
                    as u64;
            }
            SettingField::TargetMin => {
                c.target_range.min = step_count(c.target_range.min, delta, 1, c.target_range.max)
            }
            SettingField::TargetMax => {
                c.target_range.max =
                    step_count(c.target_range.max, delta, c.target_range.min, MAX_COUNT)
            }
            SettingField::Distractors => {
                if delta != 0 {
                    c.distractors_enabled = !c.distractors_enabled;
                }
            }
            SettingField::DistractorMin => {
                c.distractor_range.min =
                    step_count(c.distractor_range.min, delta, 1, c.distractor_range.max)
            }
            SettingField::DistractorMax => {
                c.distractor_range.max =
                    step_count(c.distractor_range.max, delta, c.distractor_range.min, MAX_COUNT)
            }
        })
    }
}
