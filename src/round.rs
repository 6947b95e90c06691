use crate::layout::{self, Layout, Point};
use crate::settings::{CountRange, Mode, RoundConfig};
use rand::Rng;

/// Pause between a scored guess and the next round's dots.
pub const RESTART_DELAY_MS: u64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    ShowingDots,
    AwaitingGuess,
    Resolved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// flash mode: take the dots away
    Hide,
    /// start the next round after a guess
    Restart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Scheduled {
    kind: TimerKind,
    due_ms: u64,
    generation: u64,
}

/// Outcome of one guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundResult {
    pub target_count: u32,
    pub guess: u32,
    pub correct: bool,
    pub elapsed_ms: u64,
    pub mode: Mode,
}

/// Timer-driven transitions reported by [`RoundMachine::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundEvent {
    Hidden,
    Restarted { degraded: bool },
}

#[derive(Debug, Clone)]
struct Round {
    config: RoundConfig,
    layout: Layout,
    started_at_ms: u64,
}

/// What the play screen needs to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderModel {
    pub points: Vec<Point>,
    pub phase: Phase,
    pub message: String,
    pub elapsed_ms: u64,
    pub mode: Option<Mode>,
    pub choices: Option<CountRange>,
    pub degraded: bool,
}

/// Drives a single play round and the hand-off to the next one.
///
/// Timers are deadlines in caller-supplied milliseconds, tagged with the
/// generation of the round that scheduled them. Every start or stop bumps the
/// generation, so a deadline from an earlier round can never fire into the
/// current one.
#[derive(Debug, Clone)]
pub struct RoundMachine {
    phase: Phase,
    generation: u64,
    round: Option<Round>,
    timers: Vec<Scheduled>,
    clock_running: bool,
    dots_visible: bool,
    elapsed_ms: u64,
    message: String,
}

impl Default for RoundMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl RoundMachine {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            generation: 0,
            round: None,
            timers: Vec::new(),
            clock_running: false,
            dots_visible: false,
            elapsed_ms: 0,
            message: String::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_idle(&self) -> bool {
        self.phase == Phase::Idle
    }

    pub fn layout(&self) -> Option<&Layout> {
        self.round.as_ref().map(|r| &r.layout)
    }

    /// Scoring target of the round in progress, fixed when its dots were laid
    /// out.
    pub fn target_count(&self) -> Option<u32> {
        self.layout().map(|l| l.target_count)
    }

    pub fn mode(&self) -> Option<Mode> {
        self.round.as_ref().map(|r| r.config.mode)
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn dots_visible(&self) -> bool {
        self.dots_visible
    }

    pub fn accepts_answers(&self) -> bool {
        matches!(self.phase, Phase::ShowingDots | Phase::AwaitingGuess)
    }

    pub fn has_pending(&self, kind: TimerKind) -> bool {
        self.timers
            .iter()
            .any(|t| t.kind == kind && t.generation == self.generation)
    }

    fn schedule(&mut self, kind: TimerKind, due_ms: u64) {
        self.timers.push(Scheduled {
            kind,
            due_ms,
            generation: self.generation,
        });
    }

    fn cancel(&mut self, kind: TimerKind) {
        self.timers.retain(|t| t.kind != kind);
    }

    /// Lay out a fresh round from `config` and show it. Anything still pending
    /// from an earlier round is cancelled first.
    pub fn start<R: Rng + ?Sized>(
        &mut self,
        config: &RoundConfig,
        now_ms: u64,
        rng: &mut R,
    ) -> &Layout {
        self.timers.clear();
        self.generation += 1;

        let layout = layout::generate(config, rng);
        log::debug!(
            "round {} started: {} targets, {} distractors, mode {}",
            self.generation,
            layout.target_count,
            layout.distractor_count,
            config.mode
        );

        self.phase = Phase::ShowingDots;
        self.clock_running = true;
        self.dots_visible = true;
        self.elapsed_ms = 0;
        self.message.clear();

        if config.mode == Mode::Flash {
            self.schedule(TimerKind::Hide, now_ms.saturating_add(config.flash_duration_ms));
        }

        &self
            .round
            .insert(Round {
                config: config.clone(),
                layout,
                started_at_ms: now_ms,
            })
            .layout
    }

    /// Return to idle and forget the round in progress.
    pub fn stop(&mut self) {
        self.timers.clear();
        self.generation += 1;
        self.round = None;
        self.phase = Phase::Idle;
        self.clock_running = false;
        self.dots_visible = false;
        self.elapsed_ms = 0;
        self.message.clear();
    }

    /// Score a guess. Returns `None` when no round is waiting for one, which
    /// covers stray input while idle and repeats after a round resolved.
    pub fn answer(&mut self, guess: u32, now_ms: u64) -> Option<RoundResult> {
        if !self.accepts_answers() {
            log::debug!("guess {guess} ignored in phase {:?}", self.phase);
            return None;
        }
        let round = self.round.as_ref()?;
        let target_count = round.layout.target_count;
        let correct = guess == target_count;
        let elapsed_ms = now_ms.saturating_sub(round.started_at_ms);
        let mode = round.config.mode;

        self.cancel(TimerKind::Hide);
        self.clock_running = false;
        self.elapsed_ms = elapsed_ms;
        self.message = if correct {
            "Correct!".to_string()
        } else {
            format!("The correct answer was {target_count}.")
        };
        self.phase = Phase::Resolved;
        self.schedule(TimerKind::Restart, now_ms.saturating_add(RESTART_DELAY_MS));

        Some(RoundResult {
            target_count,
            guess,
            correct,
            elapsed_ms,
            mode,
        })
    }

    /// Advance to `now_ms`: refresh the elapsed counter and fire every due
    /// timer in deadline order. A restart lays out the next round from
    /// `config`, so settings changed between rounds apply from then on.
    pub fn tick<R: Rng + ?Sized>(
        &mut self,
        now_ms: u64,
        config: &RoundConfig,
        rng: &mut R,
    ) -> Vec<RoundEvent> {
        if self.clock_running {
            if let Some(round) = &self.round {
                self.elapsed_ms = now_ms.saturating_sub(round.started_at_ms);
            }
        }

        let mut fired = Vec::new();
        while let Some(idx) = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_ms <= now_ms)
            .min_by_key(|(_, t)| t.due_ms)
            .map(|(idx, _)| idx)
        {
            let timer = self.timers.remove(idx);
            if timer.generation != self.generation {
                log::debug!(
                    "dropping stale {:?} timer from round {}",
                    timer.kind,
                    timer.generation
                );
                continue;
            }
            match timer.kind {
                TimerKind::Hide => {
                    if self.phase == Phase::ShowingDots {
                        self.phase = Phase::AwaitingGuess;
                        self.dots_visible = false;
                        fired.push(RoundEvent::Hidden);
                    }
                }
                TimerKind::Restart => {
                    let degraded = self.start(config, now_ms, rng).degraded;
                    fired.push(RoundEvent::Restarted { degraded });
                }
            }
        }
        fired
    }

    pub fn render_model(&self) -> RenderModel {
        let points = match (&self.round, self.dots_visible) {
            (Some(round), true) => round.layout.points.clone(),
            _ => Vec::new(),
        };
        RenderModel {
            points,
            phase: self.phase,
            message: self.message.clone(),
            elapsed_ms: self.elapsed_ms,
            mode: self.mode(),
            choices: self.round.as_ref().map(|r| r.config.target_range),
            degraded: self.layout().is_some_and(|l| l.degraded),
        }
    }
}
