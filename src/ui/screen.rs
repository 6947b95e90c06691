use ratatui::Frame;

use crate::{
    ui::{settings_view::render_settings, stats_view::render_stats},
    App, AppState,
};

/// A UI Screen boundary: responsible for rendering one app state
pub trait Screen {
    fn render(&self, app: &mut App, f: &mut Frame);
}

/// Start screen - mode title and menu, drawn by the App widget
pub struct StartScreen;

impl Screen for StartScreen {
    fn render(&self, app: &mut App, f: &mut Frame) {
        f.render_widget(&*app, f.area());
    }
}

/// Play screen - dots, choices and feedback, drawn by the App widget
pub struct PlayScreen;

impl Screen for PlayScreen {
    fn render(&self, app: &mut App, f: &mut Frame) {
        f.render_widget(&*app, f.area());
    }
}

/// Stats screen - per-count bar charts
pub struct StatsScreen;

impl Screen for StatsScreen {
    fn render(&self, app: &mut App, f: &mut Frame) {
        render_stats(app, f);
    }
}

/// Settings screen - slider-style field list
pub struct SettingsScreen;

impl Screen for SettingsScreen {
    fn render(&self, app: &mut App, f: &mut Frame) {
        render_settings(app, f);
    }
}

/// Helper to construct the appropriate screen for the current state
pub fn current_screen(state: &AppState) -> Box<dyn Screen> {
    match state {
        AppState::Start => Box::new(StartScreen),
        AppState::Playing => Box::new(PlayScreen),
        AppState::Stats => Box::new(StatsScreen),
        AppState::Settings => Box::new(SettingsScreen),
    }
}
