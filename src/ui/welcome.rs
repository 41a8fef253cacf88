use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::app::App;

const SPINNER: [char; 4] = ['|', '/', '-', '\\'];

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let total = app.session().total_questions();

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "AVENGERS QUIZ",
            Style::default().fg(Color::Red).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("{} Questions · Earth's Mightiest Heroes", total),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            "ENTER",
            Style::default().fg(Color::Green).bold(),
        )),
        Line::from("to start  ·  q to quit".fg(Color::DarkGray)),
    ];

    render_centered_box(frame, area, content);
}

pub fn render_loading(frame: &mut Frame, area: Rect, app: &App) {
    let spinner = SPINNER[app.ticks() % SPINNER.len()];

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "AVENGERS QUIZ",
            Style::default().fg(Color::Red).bold(),
        )),
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            format!("{} Assembling the team...", spinner),
            Style::default().fg(Color::Yellow),
        )),
        Line::from(""),
        Line::from(""),
        Line::from("esc to go back".fg(Color::DarkGray)),
    ];

    render_centered_box(frame, area, content);
}

fn render_centered_box(frame: &mut Frame, area: Rect, content: Vec<Line>) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(10),
        Constraint::Fill(1),
    ])
    .split(area);

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray),
    );

    frame.render_widget(widget, chunks[1]);
}
