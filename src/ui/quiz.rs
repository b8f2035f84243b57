//! Quiz screen with its confirmation and result prompts.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap},
};

use crate::models::QuizQuestion;
use crate::workflow::quiz::{QuizSession, Score};

use super::{popup_area, render_controls, render_status, truncate};

const PROMPT_PREVIEW_LENGTH: usize = 40;

pub fn render(frame: &mut Frame, area: Rect, quiz: &QuizSession) {
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    if quiz.questions().is_empty() {
        if quiz.is_loading() {
            render_status(frame, chunks[1], "Loading questions...", Color::Yellow);
        } else {
            render_status(frame, chunks[1], "No questions yet", Color::DarkGray);
        }
    } else {
        render_progress(frame, chunks[0], quiz);
        render_questions(frame, chunks[1], quiz);
    }

    render_controls(
        frame,
        chunks[2],
        "j/k question  ·  h/l choice  ·  space select  ·  s submit  ·  d delete  ·  r reload  ·  q quit",
    );

    if let Some(question) = quiz.pending_delete_question() {
        render_delete_prompt(frame, area, question);
    }
    if let Some(score) = quiz.summary() {
        render_summary(frame, area, score);
    }
}

fn render_progress(frame: &mut Frame, area: Rect, quiz: &QuizSession) {
    let mut progress = format!(
        "Answered {}/{}",
        quiz.answered_count(),
        quiz.questions().len()
    );
    if quiz.is_loading() {
        progress.push_str("  ·  refreshing");
    }
    let widget = Paragraph::new(progress)
        .alignment(Alignment::Right)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

fn question_lines<'a>(
    quiz: &'a QuizSession,
    number: usize,
    question: &'a QuizQuestion,
    focused: bool,
) -> Vec<Line<'a>> {
    let title_style = if focused {
        Style::default().fg(Color::Cyan).bold()
    } else {
        Style::default().fg(Color::White)
    };
    let marker = if focused { ">" } else { " " };

    let mut lines = vec![Line::from(vec![
        Span::styled(format!("{} ", marker), title_style),
        Span::styled(format!("{}. ", number), title_style),
        Span::styled(question.question_text.as_str(), title_style),
    ])];

    if question.choices.is_empty() {
        lines.push(Line::from("      No choices".fg(Color::DarkGray)));
    }

    let selected = quiz.selection(&question.id);
    for (index, choice) in question.choices.iter().enumerate() {
        let is_selected = selected == Some(choice.choice_text.as_str());
        let is_highlighted = focused && index == quiz.choice_cursor();
        let style = if is_highlighted {
            Style::default().fg(Color::Yellow).bold()
        } else if is_selected {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::Gray)
        };
        let radio = if is_selected { "(•)" } else { "( )" };

        lines.push(Line::from(vec![
            Span::styled(format!("    {} ", radio), style),
            Span::styled(choice.choice_text.as_str(), style),
        ]));
    }

    lines.push(Line::from(""));
    lines
}

fn render_questions(frame: &mut Frame, area: Rect, quiz: &QuizSession) {
    let mut lines: Vec<Line> = Vec::new();
    let mut focused_offset = 0;
    let mut focused_height = 0;

    for (index, question) in quiz.questions().iter().enumerate() {
        let focused = index == quiz.cursor();
        let block = question_lines(quiz, index + 1, question, focused);
        if focused {
            focused_offset = lines.len();
            focused_height = block.len();
        }
        lines.extend(block);
    }

    // Scroll so the whole focused question is visible.
    let visible = area.height.saturating_sub(2) as usize;
    let scroll = (focused_offset + focused_height)
        .saturating_sub(visible)
        .min(focused_offset);

    let widget = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" All questions ")
                .title_style(Style::default().fg(Color::Cyan))
                .padding(Padding::horizontal(1)),
        )
        .scroll((scroll as u16, 0));
    frame.render_widget(widget, area);
}

fn render_delete_prompt(frame: &mut Frame, area: Rect, question: &QuizQuestion) {
    let popup = popup_area(area, 52, 8);
    frame.render_widget(Clear, popup);

    let content = vec![
        Line::from(""),
        Line::from("Delete this question?".fg(Color::White).bold()),
        Line::from(Span::styled(
            truncate(&question.question_text, PROMPT_PREVIEW_LENGTH),
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("[y] ", Style::default().fg(Color::Red).bold()),
            Span::styled("delete  ·  ", Style::default().fg(Color::DarkGray)),
            Span::styled("[n] ", Style::default().fg(Color::Green).bold()),
            Span::styled("cancel", Style::default().fg(Color::DarkGray)),
        ]),
    ];

    let widget = Paragraph::new(content)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Color::Red)
                .title(" Confirm delete ")
                .title_style(Style::default().fg(Color::Red)),
        );
    frame.render_widget(widget, popup);
}

fn grade_color(percentage: f64) -> Color {
    match percentage as u32 {
        90..=100 => Color::Green,
        70..=89 => Color::Cyan,
        50..=69 => Color::Yellow,
        _ => Color::Red,
    }
}

fn render_summary(frame: &mut Frame, area: Rect, score: Score) {
    let popup = popup_area(area, 40, 9);
    frame.render_widget(Clear, popup);

    let percentage = score.percentage();
    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "RESULTS",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("You got {} correct", score),
            Style::default().fg(grade_color(percentage)).bold(),
        )),
        Line::from(Span::styled(
            format!("({:.0}%)", percentage),
            Style::default().fg(grade_color(percentage)),
        )),
        Line::from(""),
        Line::from("press any key".fg(Color::DarkGray)),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, popup);
}

#[cfg(test)]
mod tests {
    use ratatui::{backend::TestBackend, Terminal};

    use crate::models::Choice;

    use super::*;

    #[test]
    fn test_grade_color() {
        assert_eq!(grade_color(100.0), Color::Green);
        assert_eq!(grade_color(75.0), Color::Cyan);
        assert_eq!(grade_color(50.0), Color::Yellow);
        assert_eq!(grade_color(0.0), Color::Red);
    }

    #[test]
    fn test_question_lines_mark_selection_and_empty_choices() {
        let quiz = QuizSession::default();
        let question = QuizQuestion {
            id: "q".to_string(),
            question_text: "Empty?".to_string(),
            choices: Vec::new(),
        };
        let lines = question_lines(&quiz, 1, &question, true);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1].to_string().trim(), "No choices");

        let question = QuizQuestion {
            choices: vec![Choice {
                id: "c".to_string(),
                choice_text: "Yes".to_string(),
                is_correct: Some(true),
            }],
            ..question
        };
        let lines = question_lines(&quiz, 2, &question, false);
        assert_eq!(lines[0].to_string(), "  2. Empty?");
        assert_eq!(lines[1].to_string(), "    ( ) Yes");
    }

    #[test]
    fn test_renders_empty_state() {
        let mut terminal = Terminal::new(TestBackend::new(60, 10)).unwrap();
        let quiz = QuizSession::default();

        terminal
            .draw(|frame| {
                let area = frame.area();
                render(frame, area, &quiz);
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|cell| cell.symbol()).collect();
        assert!(text.contains("No questions yet"));
    }
}
