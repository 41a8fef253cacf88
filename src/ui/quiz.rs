use ratatui::{
    prelude::*,
    widgets::{Gauge, Paragraph, Wrap},
};

use crate::app::App;
use crate::models::{OptionVariant, OptionView, QuestionView, SessionSnapshot};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let snapshot = app.snapshot();
    let Some(question) = snapshot.question.as_ref() else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(2),
        Constraint::Length(3),
        Constraint::Fill(1),
        Constraint::Length(2),
        Constraint::Length(1),
    ])
    .margin(2)
    .split(area);

    render_header(frame, chunks[0], &snapshot);
    render_progress(frame, chunks[1], snapshot.progress_percent);
    render_subject(frame, chunks[2], question);
    render_prompt(frame, chunks[3], &question.prompt);
    render_options(frame, chunks[4], &question.options, app.cursor(), snapshot.can_advance);
    render_next(frame, chunks[5], &snapshot);
    render_controls(frame, chunks[6], snapshot.can_advance);
}

fn render_header(frame: &mut Frame, area: Rect, snapshot: &SessionSnapshot) {
    let halves = Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).split(area);

    let position = Paragraph::new(format!(
        "Question {} of {}",
        snapshot.question_number, snapshot.total
    ))
    .fg(Color::DarkGray);
    let score = Paragraph::new(format!("Score: {}", snapshot.score))
        .alignment(Alignment::Right)
        .fg(Color::DarkGray);

    frame.render_widget(position, halves[0]);
    frame.render_widget(score, halves[1]);
}

fn render_progress(frame: &mut Frame, area: Rect, percent: u32) {
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Red).bg(Color::Black))
        .percent(percent.min(100) as u16)
        .label("");
    frame.render_widget(gauge, area);
}

fn render_subject(frame: &mut Frame, area: Rect, question: &QuestionView) {
    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", question.subject_label),
            Style::default().fg(Color::Black).bg(Color::Yellow).bold(),
        ),
        Span::styled(
            format!("  [{}]", question.image_ref),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_prompt(frame: &mut Frame, area: Rect, prompt: &str) {
    let widget = Paragraph::new(prompt)
        .wrap(Wrap { trim: true })
        .fg(Color::White)
        .bold();
    frame.render_widget(widget, area);
}

fn option_style(variant: OptionVariant, highlighted: bool, answered: bool) -> Style {
    match variant {
        OptionVariant::Correct => Style::default().fg(Color::Green).bold(),
        OptionVariant::Incorrect => Style::default().fg(Color::Red).bold(),
        OptionVariant::Neutral if answered => Style::default().fg(Color::DarkGray),
        OptionVariant::Neutral if highlighted => Style::default().fg(Color::Cyan).bold(),
        OptionVariant::Neutral => Style::default().fg(Color::Gray),
    }
}

fn option_icon(variant: OptionVariant) -> &'static str {
    match variant {
        OptionVariant::Correct => "  ✓",
        OptionVariant::Incorrect => "  ✗",
        OptionVariant::Neutral => "",
    }
}

fn render_options(
    frame: &mut Frame,
    area: Rect,
    options: &[OptionView],
    cursor: usize,
    answered: bool,
) {
    let mut lines: Vec<Line> = Vec::with_capacity(options.len() * 2);

    for (index, option) in options.iter().enumerate() {
        let highlighted = !answered && index == cursor;
        let style = option_style(option.variant, highlighted, answered);
        let marker = if highlighted || option.selected { ">" } else { " " };

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker), style),
            Span::styled(format!("{}. ", index + 1), style),
            Span::styled(option.text.as_str(), style),
            Span::styled(option_icon(option.variant), style),
        ]));
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_next(frame: &mut Frame, area: Rect, snapshot: &SessionSnapshot) {
    if !snapshot.can_advance {
        return;
    }
    let label = if snapshot.advance_shows_results {
        "[ See results ]"
    } else {
        "[ Next question ]"
    };
    let widget = Paragraph::new(label)
        .alignment(Alignment::Center)
        .fg(Color::Green)
        .bold();
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect, answered: bool) {
    let hint = if answered {
        "enter/n continue  ·  q quit"
    } else {
        "j/k navigate  ·  enter or 1-4 answer  ·  q quit"
    };
    let widget = Paragraph::new(hint)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::models::QuestionSet;
    use crate::ui::tests::draw;

    fn started_app() -> App {
        let mut app = App::new(QuestionSet::builtin().unwrap(), false, Duration::ZERO);
        app.start_quiz();
        app
    }

    #[test]
    fn test_question_screen() {
        let app = started_app();
        let screen = draw(&app);
        assert!(screen.contains("Question 1 of 10"));
        assert!(screen.contains("Score: 0"));
        assert!(screen.contains("Iron Man"));
        assert!(screen.contains("Tony Stark"));
        assert!(!screen.contains("Next question"));
    }

    #[test]
    fn test_feedback_after_wrong_answer() {
        let mut app = started_app();
        app.submit_option(1);
        let screen = draw(&app);
        assert!(screen.contains("✗"));
        assert!(screen.contains("✓"));
        assert!(screen.contains("Next question"));
    }

    #[test]
    fn test_last_question_offers_results() {
        let mut app = started_app();
        for _ in 0..9 {
            app.submit_option(0);
            app.next_question();
        }
        app.submit_option(0);
        let screen = draw(&app);
        assert!(screen.contains("Question 10 of 10"));
        assert!(screen.contains("See results"));
    }

    #[test]
    fn test_option_style_precedence() {
        let answered = option_style(OptionVariant::Neutral, true, true);
        assert_eq!(answered.fg, Some(Color::DarkGray));
        let correct = option_style(OptionVariant::Correct, false, true);
        assert_eq!(correct.fg, Some(Color::Green));
    }
}
