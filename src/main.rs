mod guess;
mod ui;

use crate::guess::GuessInput;
use anyhow::Context;
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    io::{self, stdin},
    path::PathBuf,
};
use subitize::{
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    round::RoundEvent,
    runtime::{Clock, CrosstermEventSource, FixedTicker, GameEvent, MonotonicClock, Runner},
    settings::{CountRange, Mode, RoundConfig, SettingField},
    Session,
};

/// flash a cluster of dots, guess how many there were
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A terminal subitizing trainer: a random cluster of dots appears, you name the count. Flash mode hides the dots after a moment; timed mode measures how fast you answer correctly."
)]
pub struct Cli {
    /// game mode
    #[clap(short = 'm', long, value_enum)]
    mode: Option<Mode>,

    /// how long dots stay visible in flash mode, in milliseconds
    #[clap(short = 'f', long)]
    flash_ms: Option<u64>,

    /// fewest dots to count
    #[clap(long)]
    min_dots: Option<u32>,

    /// most dots to count
    #[clap(long)]
    max_dots: Option<u32>,

    /// add differently colored distraction dots, e.g. 2-5
    #[clap(short = 'd', long)]
    distractors: Option<CountRange>,

    /// minimum distance between dot centers (the board is 200 units wide)
    #[clap(long)]
    separation: Option<f64>,

    /// seed the dot layouts for repeatable sessions
    #[clap(long)]
    seed: Option<u64>,

    /// settings file to read instead of the default location
    #[clap(short = 'c', long)]
    config: Option<PathBuf>,
}

impl Cli {
    /// File settings with command line values on top.
    fn to_round_config(&self, file: &Config) -> RoundConfig {
        let mut rc = RoundConfig::from(file);
        if let Some(mode) = self.mode {
            rc.mode = mode;
        }
        if let Some(ms) = self.flash_ms {
            rc.flash_duration_ms = ms;
        }
        if let Some(min) = self.min_dots {
            rc.target_range.min = min;
        }
        if let Some(max) = self.max_dots {
            rc.target_range.max = max;
        }
        if let Some(range) = self.distractors {
            rc.distractors_enabled = true;
            rc.distractor_range = range;
        }
        if let Some(separation) = self.separation {
            rc.min_separation = separation;
        }
        rc
    }

    fn config_store(&self) -> FileConfigStore {
        match &self.config {
            Some(path) => FileConfigStore::with_path(path),
            None => FileConfigStore::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Start,
    Playing,
    Stats,
    Settings,
}

#[derive(Debug, Default)]
pub struct SettingsState {
    pub selected: usize,
    pub error: Option<String>,
}

impl SettingsState {
    pub fn field(&self) -> SettingField {
        SettingField::ALL[self.selected]
    }
}

#[derive(Debug)]
pub struct App {
    pub session: Session,
    pub state: AppState,
    pub guess: GuessInput,
    pub settings_state: SettingsState,
}

impl App {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            state: AppState::Start,
            guess: GuessInput::default(),
            settings_state: SettingsState::default(),
        }
    }

    fn submit_guess(&mut self, guess: u32, now_ms: u64) {
        if self.session.answer(guess, now_ms).is_none() {
            log::debug!("guess {guess} arrived with no round waiting");
        }
    }

    fn stop_playing(&mut self) {
        self.session.stop();
        self.guess.clear();
        self.state = AppState::Start;
    }

    fn adjust_setting(&mut self, delta: i32, now_ms: u64) {
        let field = self.settings_state.field();
        self.settings_state.error = self
            .session
            .adjust(field, delta, now_ms)
            .err()
            .map(|e| e.to_string());
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

fn handle_key(app: &mut App, key: KeyEvent, now_ms: u64) -> Flow {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Flow::Quit;
    }

    match app.state {
        AppState::Start => match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return Flow::Quit,
            KeyCode::Enter | KeyCode::Char(' ') => {
                app.guess.clear();
                app.session.start(now_ms);
                app.state = AppState::Playing;
            }
            KeyCode::Char('m') => {
                if let Err(e) = app.session.toggle_mode(now_ms) {
                    log::warn!("mode toggle rejected: {e}");
                }
            }
            KeyCode::Char('s') => app.state = AppState::Stats,
            KeyCode::Char('o') => app.state = AppState::Settings,
            _ => {}
        },
        AppState::Playing => match key.code {
            KeyCode::Esc | KeyCode::Char('q') => app.stop_playing(),
            KeyCode::Char('m') => {
                app.guess.clear();
                if let Err(e) = app.session.toggle_mode(now_ms) {
                    log::warn!("mode toggle rejected: {e}");
                }
            }
            KeyCode::Char(c) if c.is_ascii_digit() => {
                if let Some(choices) = app.session.render_model().choices {
                    if let Some(guess) = app.guess.push(c, choices) {
                        app.submit_guess(guess, now_ms);
                    }
                }
            }
            KeyCode::Enter => {
                if let Some(choices) = app.session.render_model().choices {
                    if let Some(guess) = app.guess.submit(choices) {
                        app.submit_guess(guess, now_ms);
                    }
                }
            }
            KeyCode::Backspace => app.guess.backspace(),
            _ => {}
        },
        AppState::Stats => match key.code {
            KeyCode::Esc => return Flow::Quit,
            KeyCode::Char('r') => app.session.reset_stats(),
            KeyCode::Char('b') | KeyCode::Backspace => app.state = AppState::Start,
            _ => {}
        },
        AppState::Settings => match key.code {
            KeyCode::Esc => return Flow::Quit,
            KeyCode::Char('b') | KeyCode::Backspace => {
                app.settings_state.error = None;
                app.state = AppState::Start;
            }
            KeyCode::Up => {
                app.settings_state.selected = app.settings_state.selected.saturating_sub(1);
            }
            KeyCode::Down => {
                app.settings_state.selected =
                    (app.settings_state.selected + 1).min(SettingField::ALL.len() - 1);
            }
            KeyCode::Left => app.adjust_setting(-1, now_ms),
            KeyCode::Right => app.adjust_setting(1, now_ms),
            KeyCode::Char('d') => {
                let mut next = app.session.config().clone();
                next.distractors_enabled = !next.distractors_enabled;
                app.settings_state.error =
                    app.session.configure(next, now_ms).err().map(|e| e.to_string());
            }
            _ => {}
        },
    }
    Flow::Continue
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    // logging is best-effort; the game runs without it
    match AppDirs::log_path() {
        Some(path) => {
            if let Err(e) = subitize::logging::init(&path) {
                eprintln!("subitize: logging disabled, {}: {e}", path.display());
            }
        }
        None => eprintln!("subitize: logging disabled, no home or data directory"),
    }

    let file_config = cli.config_store().load();
    let round_config = cli.to_round_config(&file_config);
    let session = match cli.seed {
        Some(seed) => Session::with_seed(round_config, seed),
        None => Session::new(round_config),
    };
    let session = match session {
        Ok(session) => session,
        Err(e) => {
            let mut cmd = Cli::command();
            cmd.error(ErrorKind::ValueValidation, e.to_string()).exit();
        }
    };

    enable_raw_mode().context("enabling raw mode")?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(session);
    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen,)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> anyhow::Result<()> {
    let clock = MonotonicClock::new();
    let runner = Runner::new(CrosstermEventSource::new(), FixedTicker::default());

    terminal.draw(|f| ui(app, f))?;

    loop {
        match runner.step() {
            GameEvent::Tick => {
                let events = app.session.tick(clock.now_ms());
                if events
                    .iter()
                    .any(|e| matches!(e, RoundEvent::Restarted { .. }))
                {
                    app.guess.clear();
                }
                // the running counter changes every tick while a round is up
                if app.state == AppState::Playing && app.session.is_running() {
                    terminal.draw(|f| ui(app, f))?;
                }
            }
            GameEvent::Resize => {
                terminal.draw(|f| ui(app, f))?;
            }
            GameEvent::Key(key) => {
                if handle_key(app, key, clock.now_ms()) == Flow::Quit {
                    break;
                }
                terminal.draw(|f| ui(app, f))?;
            }
        }
    }

    Ok(())
}

fn ui(app: &mut App, f: &mut Frame) {
    ui::screen::current_screen(&app.state).render(app, f);
}
