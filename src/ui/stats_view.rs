use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
    Frame,
};

use crate::{ui::charting, App};

fn render_chart(
    f: &mut Frame,
    area: Rect,
    title: String,
    values: &[f64],
    max: Option<u64>,
    unit: &str,
    color: Color,
) {
    let heights = charting::bar_values(values);
    let bars: Vec<Bar> = heights
        .iter()
        .enumerate()
        .map(|(idx, &h)| {
            Bar::default()
                .value(h)
                .label(Line::from((idx + 1).to_string()))
                .text_value(if h == 0 {
                    String::new()
                } else {
                    format!("{h}{unit}")
                })
                .style(Style::default().fg(color))
        })
        .collect();

    let mut chart = BarChart::default()
        .block(Block::default().borders(Borders::ALL).title(title))
        .bar_width(charting::bar_width(area.width, values.len()))
        .bar_gap(1)
        .value_style(
            Style::default()
                .fg(Color::Black)
                .bg(color)
                .add_modifier(Modifier::BOLD),
        )
        .data(BarGroup::default().bars(&bars));
    if let Some(max) = max {
        chart = chart.max(max);
    }

    f.render_widget(chart, area);
}

pub fn render_stats(app: &mut App, f: &mut Frame) {
    let area = f.area();
    let stats = app.session.stats();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Percentage(50), // flash accuracy
            Constraint::Min(0),         // timed latency
            Constraint::Length(3),      // instructions
        ])
        .split(area);

    let flash_total = stats.flash_total();
    render_chart(
        f,
        chunks[0],
        format!(
            "Flash mode: % correct at {} ms ({} rounds)",
            app.session.config().flash_duration_ms,
            flash_total
        ),
        &stats.flash_percentages(),
        Some(100),
        "%",
        Color::Yellow,
    );

    let timed_total = stats.timed_total();
    let averages = stats.timed_averages();
    let slowest = averages.iter().cloned().fold(0.0_f64, f64::max);
    render_chart(
        f,
        chunks[1],
        format!(
            "Timed mode: average ms to a correct answer ({} correct, slowest {} ms)",
            timed_total,
            charting::format_label(slowest.round())
        ),
        &averages,
        None,
        "",
        Color::Cyan,
    );

    let instructions = Paragraph::new("(r)eset stats | (b)ack | (esc)ape")
        .block(Block::default().borders(Borders::ALL))
        .style(
            Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::ITALIC),
        )
        .alignment(Alignment::Center);
    f.render_widget(instructions, chunks[2]);
}
