pub mod charting;
pub mod screen;
pub mod settings_view;
pub mod stats_view;

use itertools::Itertools;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Circle},
        Block, Borders, Paragraph, Widget,
    },
};
use subitize::{
    layout::{Role, DOMAIN_SIZE},
    Mode, Phase, RenderModel,
};

use crate::{App, AppState};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 1;
const DOT_RADIUS: f64 = 8.0;

fn role_color(role: Role) -> Color {
    match role {
        Role::Target => Color::Yellow,
        Role::Distractor => Color::Blue,
    }
}

/// Largest square (in on-screen proportions) that fits `area`, centered.
/// Terminal cells are about twice as tall as they are wide.
fn board_rect(area: Rect) -> Rect {
    let height = area.height.min(area.width / 2);
    let width = height * 2;
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn render_board(model: &RenderModel, area: Rect, buf: &mut Buffer) {
    let board = board_rect(area);
    Canvas::default()
        .block(Block::default().borders(Borders::ALL))
        .marker(Marker::Braille)
        .x_bounds([-DOT_RADIUS, DOMAIN_SIZE + DOT_RADIUS])
        .y_bounds([-DOT_RADIUS, DOMAIN_SIZE + DOT_RADIUS])
        .paint(|ctx| {
            for p in &model.points {
                ctx.draw(&Circle {
                    x: p.x,
                    y: p.y,
                    radius: DOT_RADIUS,
                    color: role_color(p.role),
                });
            }
        })
        .render(board, buf);
}

fn choices_visible(model: &RenderModel) -> bool {
    match model.phase {
        Phase::AwaitingGuess => true,
        Phase::ShowingDots => model.mode == Some(Mode::Timed),
        Phase::Idle | Phase::Resolved => false,
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let italic_style = Style::default().add_modifier(Modifier::ITALIC);
        let yellow_bold_style = Style::default().patch(bold_style).fg(Color::Yellow);
        let dim_style = Style::default().add_modifier(Modifier::DIM);

        let mode = self.session.config().mode;

        match self.state {
            AppState::Playing => {
                let model = self.session.render_model();

                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .horizontal_margin(HORIZONTAL_MARGIN)
                    .vertical_margin(VERTICAL_MARGIN)
                    .constraints([
                        Constraint::Length(1), // mode
                        Constraint::Min(4),    // board
                        Constraint::Length(1), // choices
                        Constraint::Length(1), // typed guess
                        Constraint::Length(1), // message
                        Constraint::Length(1), // timer
                        Constraint::Length(1), // legend
                    ])
                    .split(area);

                Paragraph::new(Span::styled(format!("{mode} Mode"), bold_style))
                    .alignment(Alignment::Center)
                    .render(chunks[0], buf);

                render_board(&model, chunks[1], buf);

                if choices_visible(&model) {
                    if let Some(choices) = model.choices {
                        let line = choices.iter().map(|n| format!("[{n}]")).join(" ");
                        Paragraph::new(Span::styled(line, yellow_bold_style))
                            .alignment(Alignment::Center)
                            .render(chunks[2], buf);
                    }
                }

                if !self.guess.is_empty() {
                    Paragraph::new(Line::from(vec![
                        Span::styled("guess: ", dim_style),
                        Span::styled(self.guess.as_str(), bold_style),
                    ]))
                    .alignment(Alignment::Center)
                    .render(chunks[3], buf);
                }

                let message_style = if model.message.starts_with("Correct") {
                    Style::default().patch(bold_style).fg(Color::Green)
                } else {
                    Style::default().patch(bold_style).fg(Color::Red)
                };
                Paragraph::new(Span::styled(model.message.as_str(), message_style))
                    .alignment(Alignment::Center)
                    .render(chunks[4], buf);

                if model.mode == Some(Mode::Timed) {
                    Paragraph::new(Span::styled(
                        format!("Time: {}ms", model.elapsed_ms),
                        yellow_bold_style,
                    ))
                    .alignment(Alignment::Center)
                    .render(chunks[5], buf);
                }

                Paragraph::new(Span::styled(
                    "type the count, (enter) submit / (m)ode / (esc) stop",
                    italic_style,
                ))
                .render(chunks[6], buf);
            }
            _ => {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([
                        Constraint::Percentage(45),
                        Constraint::Length(1),
                        Constraint::Length(1),
                        Constraint::Length(1),
                        Constraint::Min(0),
                    ])
                    .split(area);

                Paragraph::new(Span::styled(
                    format!("{mode} Mode"),
                    Style::default().patch(bold_style).fg(Color::White),
                ))
                .alignment(Alignment::Center)
                .render(chunks[1], buf);

                let summary = self.session.config();
                let detail = if summary.distractors_enabled {
                    format!(
                        "{} dots, {} distractors",
                        summary.target_range, summary.distractor_range
                    )
                } else {
                    format!("{} dots", summary.target_range)
                };
                Paragraph::new(Span::styled(detail, dim_style))
                    .alignment(Alignment::Center)
                    .render(chunks[2], buf);

                Paragraph::new(Span::styled(
                    "(enter) start / (m)ode / (s)tats / (o)ptions / (esc)ape",
                    italic_style,
                ))
                .alignment(Alignment::Center)
                .render(chunks[3], buf);
            }
        }
    }
}
