mod form;
mod list;
mod quiz;

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Tabs},
};

use crate::app::{App, Screen};
use crate::workflow::{Level, Notice};

pub fn render<A>(frame: &mut Frame, app: &App<A>) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    let toast_height = app.toasts().visible().count() as u16;
    let chunks = Layout::vertical([
        Constraint::Length(2),
        Constraint::Fill(1),
        Constraint::Length(toast_height),
    ])
    .split(area);

    render_tabs(frame, chunks[0], app.screen);

    match app.screen {
        Screen::Create => form::render(frame, chunks[1], app.form()),
        Screen::List => list::render(frame, chunks[1], app.list()),
        Screen::Quiz => quiz::render(frame, chunks[1], app.quiz()),
    }

    render_toasts(frame, chunks[2], app.toasts().visible());
}

fn render_tabs(frame: &mut Frame, area: Rect, current: Screen) {
    let titles = Screen::ALL
        .iter()
        .enumerate()
        .map(|(index, screen)| format!(" F{} {} ", index + 1, screen.title()));
    let selected = Screen::ALL
        .iter()
        .position(|screen| *screen == current)
        .unwrap_or(0);

    let widget = Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(Style::default().fg(Color::Cyan).bold())
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Color::DarkGray),
        );
    frame.render_widget(widget, area);
}

fn render_toasts<'a>(frame: &mut Frame, area: Rect, notices: impl Iterator<Item = &'a Notice>) {
    let lines: Vec<Line> = notices
        .map(|notice| {
            let (symbol, color) = match notice.level {
                Level::Success => ("+", Color::Green),
                Level::Error => ("!", Color::Red),
            };
            Line::from(vec![
                Span::styled(format!(" {} ", symbol), Style::default().fg(color).bold()),
                Span::styled(notice.message.as_str(), Style::default().fg(color)),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), area);
}

/// Centred rectangle for a modal prompt, clipped to `area`.
fn popup_area(area: Rect, width: u16, height: u16) -> Rect {
    let rows = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height.min(area.height)),
        Constraint::Fill(1),
    ])
    .split(area);
    Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(width.min(area.width)),
        Constraint::Fill(1),
    ])
    .split(rows[1])[1]
}

/// Placeholder shown instead of an empty or loading screen.
fn render_status(frame: &mut Frame, area: Rect, message: &str, color: Color) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .split(area);
    let widget = Paragraph::new(message)
        .alignment(Alignment::Center)
        .fg(color);
    frame.render_widget(widget, chunks[1]);
}

fn render_controls(frame: &mut Frame, area: Rect, text: &str) {
    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{}...", truncated)
    } else {
        text.to_string()
    }
}
