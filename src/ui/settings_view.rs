use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};
use subitize::{
    settings::{RoundConfig, SettingField},
    Mode,
};

use crate::App;

/// Fields that have no effect under the current config are shown dimmed.
fn is_active(field: SettingField, cfg: &RoundConfig) -> bool {
    match field {
        SettingField::FlashDuration => cfg.mode == Mode::Flash,
        SettingField::DistractorMin | SettingField::DistractorMax => cfg.distractors_enabled,
        _ => true,
    }
}

pub fn render_settings(app: &mut App, f: &mut Frame) {
    let area = f.area();
    let cfg = app.session.config();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints([
            Constraint::Length(3), // title
            Constraint::Min(0),    // fields
            Constraint::Length(1), // validation error
            Constraint::Length(3), // instructions
        ])
        .split(area);

    let title = Paragraph::new("Settings")
        .block(Block::default().borders(Borders::ALL))
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center);
    f.render_widget(title, chunks[0]);

    let items: Vec<ListItem> = SettingField::ALL
        .iter()
        .map(|&field| {
            let style = if is_active(field, cfg) {
                Style::default()
            } else {
                Style::default().add_modifier(Modifier::DIM)
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<20}", field.label()), style),
                Span::styled(
                    format!("◀ {} ▶", field.value(cfg)),
                    style.add_modifier(Modifier::BOLD),
                ),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL))
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("> ");
    let mut state = ListState::default().with_selected(Some(app.settings_state.selected));
    f.render_stateful_widget(list, chunks[1], &mut state);

    if let Some(err) = &app.settings_state.error {
        let error = Paragraph::new(Span::styled(err.as_str(), Style::default().fg(Color::Red)))
            .alignment(Alignment::Center);
        f.render_widget(error, chunks[2]);
    }

    let instructions = Paragraph::new(
        "↑/↓ select | ←/→ adjust | (d)istractors on/off | (b)ack | (esc)ape\nchanging flash speed clears flash stats, changing the most dots clears all stats",
    )
    .block(Block::default().borders(Borders::ALL))
    .style(
        Style::default()
            .fg(Color::Gray)
            .add_modifier(Modifier::ITALIC),
    )
    .alignment(Alignment::Center);
    f.render_widget(instructions, chunks[3]);
}
