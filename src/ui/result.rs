use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::app::App;
use crate::models::{ScoreSummary, ScoreTier};

const QUESTION_PREVIEW_LENGTH: usize = 55;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let summary = app.session().score_summary();
    let tier = ScoreTier::from_summary(&summary);

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(8),
        Constraint::Fill(1),
        Constraint::Length(2),
    ])
    .margin(1)
    .split(area);

    render_score_summary(frame, chunks[1], summary, tier);
    render_question_breakdown(frame, chunks[2], app);
    render_controls(frame, chunks[3]);
}

fn tier_color(tier: ScoreTier) -> Color {
    match tier {
        ScoreTier::Legendary => Color::Green,
        ScoreTier::Strong => Color::Cyan,
        ScoreTier::Fair => Color::Yellow,
        ScoreTier::Rookie => Color::Red,
    }
}

fn render_score_summary(frame: &mut Frame, area: Rect, summary: ScoreSummary, tier: ScoreTier) {
    let color = tier_color(tier);
    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "QUIZ COMPLETE",
            Style::default().fg(Color::Red).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(tier.message(), Style::default().fg(Color::Gray))),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "{} / {}  ({}% correct)",
                summary.score, summary.total, summary.percentage
            ),
            Style::default().fg(color).bold(),
        )),
        Line::from(""),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn render_question_breakdown(frame: &mut Frame, area: Rect, app: &App) {
    let session = app.session();
    let lines: Vec<Line> = session
        .answered_correctly()
        .iter()
        .zip(session.questions().iter())
        .enumerate()
        .map(|(index, (is_correct, question))| {
            let (symbol, color) = if *is_correct {
                ("+", Color::Green)
            } else {
                ("-", Color::Red)
            };

            Line::from(vec![
                Span::styled(format!(" {} ", symbol), Style::default().fg(color)),
                Span::styled(
                    format!("{:2}. ", index + 1),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    truncate_question(&question.prompt),
                    Style::default().fg(Color::Gray),
                ),
                Span::styled(
                    format!("  ({})", question.correct_option()),
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        })
        .collect();

    let widget = Paragraph::new(lines)
        .block(Block::default().padding(Padding::horizontal(1)))
        .scroll((app.result_scroll() as u16, 0));
    frame.render_widget(widget, area);
}

fn truncate_question(text: &str) -> String {
    let char_count = text.chars().count();
    if char_count > QUESTION_PREVIEW_LENGTH {
        let truncated: String = text.chars().take(QUESTION_PREVIEW_LENGTH).collect();
        format!("{}...", truncated)
    } else {
        text.to_string()
    }
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new("j/k scroll  ·  r play again  ·  q quit")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
