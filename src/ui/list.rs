//! Question listing.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::workflow::listing::QuestionList;

use super::{render_controls, render_status};

pub fn render(frame: &mut Frame, area: Rect, list: &QuestionList) {
    let chunks = Layout::vertical([Constraint::Fill(1), Constraint::Length(1)])
        .margin(1)
        .split(area);

    if list.questions().is_empty() {
        if list.is_loading() {
            render_status(frame, chunks[0], "Loading questions...", Color::Yellow);
        } else {
            render_status(frame, chunks[0], "No questions yet", Color::DarkGray);
        }
    } else {
        render_rows(frame, chunks[0], list);
    }

    render_controls(frame, chunks[1], "j/k move  ·  d delete  ·  r reload  ·  q quit");
}

fn render_rows(frame: &mut Frame, area: Rect, list: &QuestionList) {
    let lines: Vec<Line> = list
        .rows()
        .map(|(number, question)| {
            let is_selected = number - 1 == list.selected();
            let style = if is_selected {
                Style::default().fg(Color::Cyan).bold()
            } else {
                Style::default().fg(Color::Gray)
            };
            let marker = if is_selected { ">" } else { " " };

            Line::from(vec![
                Span::styled(format!(" {} ", marker), style),
                Span::styled(format!("{:2}. ", number), Style::default().fg(Color::DarkGray)),
                Span::styled(question.question_text.as_str(), style),
            ])
        })
        .collect();

    // Keep the selected row inside the bordered area.
    let visible = area.height.saturating_sub(2) as usize;
    let scroll = (list.selected() + 1).saturating_sub(visible);

    let title = if list.is_loading() {
        " Questions (refreshing) "
    } else {
        " Questions "
    };
    let widget = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(title)
                .title_style(Style::default().fg(Color::Cyan))
                .padding(Padding::horizontal(1)),
        )
        .scroll((scroll as u16, 0));
    frame.render_widget(widget, area);
}
