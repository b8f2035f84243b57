//! Question creation form.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::workflow::creation::{FormField, QuestionForm, ANSWER_COUNT};

use super::render_controls;

pub fn render(frame: &mut Frame, area: Rect, form: &QuestionForm) {
    let mut constraints = vec![Constraint::Length(3); ANSWER_COUNT + 2];
    constraints.push(Constraint::Length(1));
    constraints.push(Constraint::Fill(1));
    constraints.push(Constraint::Length(1));
    let chunks = Layout::vertical(constraints).margin(1).split(area);

    render_input(
        frame,
        chunks[0],
        "Question",
        form.question(),
        form.focus() == FormField::Question,
    );

    for (index, answer) in form.answers().iter().enumerate() {
        render_input(
            frame,
            chunks[index + 1],
            &format!("Answer {}", index + 1),
            answer,
            form.focus() == FormField::Answer(index),
        );
    }

    render_correct_selector(
        frame,
        chunks[ANSWER_COUNT + 1],
        form.correct_index(),
        form.focus() == FormField::Correct,
    );

    if form.is_submitting() {
        let widget = Paragraph::new("Saving...")
            .alignment(Alignment::Center)
            .fg(Color::Yellow);
        frame.render_widget(widget, chunks[ANSWER_COUNT + 2]);
    }

    render_controls(
        frame,
        chunks[ANSWER_COUNT + 4],
        "tab/↑↓ field  ·  ←/→ correct answer  ·  enter save  ·  esc cancel",
    );
}

fn field_block(title: &str, focused: bool) -> Block<'static> {
    let border = if focused { Color::Cyan } else { Color::DarkGray };
    Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(format!(" {} ", title))
        .title_style(Style::default().fg(Color::Cyan))
        .padding(Padding::horizontal(1))
}

fn render_input(frame: &mut Frame, area: Rect, title: &str, value: &str, focused: bool) {
    let mut spans = vec![Span::styled(value, Style::default().fg(Color::White))];
    if focused {
        spans.push(Span::styled("_", Style::default().fg(Color::Yellow)));
    }

    let widget = Paragraph::new(Line::from(spans)).block(field_block(title, focused));
    frame.render_widget(widget, area);
}

fn render_correct_selector(frame: &mut Frame, area: Rect, correct_index: usize, focused: bool) {
    let spans: Vec<Span> = (0..ANSWER_COUNT)
        .flat_map(|index| {
            let is_correct = index == correct_index;
            let style = if is_correct {
                Style::default().fg(Color::Green).bold()
            } else {
                Style::default().fg(Color::Gray)
            };
            let marker = if is_correct { "(•)" } else { "( )" };
            [
                Span::styled(format!("{} Answer {}", marker, index + 1), style),
                Span::raw("   "),
            ]
        })
        .collect();

    let widget = Paragraph::new(Line::from(spans)).block(field_block("Correct answer", focused));
    frame.render_widget(widget, area);
}
