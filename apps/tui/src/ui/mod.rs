// Rendering for the company card viewer

pub mod cards;
pub mod widgets;

use crate::app::state::LOADING_MESSAGE;
use crate::app::App;
use crate::ui::widgets::popup::render_help_popup;
use ratatui::layout::{Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use throbber_widgets_tui::Throbber;

pub fn ui(app: &mut App, f: &mut Frame<'_>) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(5),    // Cards
            Constraint::Length(3), // Status
            Constraint::Length(1), // Shortcuts hint
        ])
        .split(f.area().inner(Margin::new(2, 1)));

    render_header(app, f, layout[0]);
    if app.loading {
        render_loading(app, f, layout[1]);
    } else {
        cards::render_cards(app, f, layout[1]);
    }
    render_status(app, f, layout[2]);
    render_shortcuts(f, layout[3]);

    if app.show_help {
        let area = f.area();
        render_help_popup(f, area);
    }
}

fn render_header(app: &App, f: &mut Frame<'_>, area: Rect) {
    let last_loaded = app.last_loaded.map_or_else(
        || "never".to_string(),
        |time| time.format("%H:%M:%S").to_string(),
    );

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            app.source.title(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            "  {} cards  |  last loaded {last_loaded}",
            app.board.len()
        )),
    ]))
    .block(
        Block::default()
            .title("== Stock League ==")
            .title_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(header, area);
}

fn render_loading(app: &mut App, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(area).inner(Margin::new(1, 1));
    f.render_widget(block, area);

    let throbber = Throbber::default()
        .label(LOADING_MESSAGE)
        .style(Style::default().fg(Color::White))
        .throbber_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
    f.render_stateful_widget(throbber, inner, &mut app.throbber);
}

fn render_status(app: &App, f: &mut Frame<'_>, area: Rect) {
    let color = if app.status_message.starts_with("Error") {
        Color::Red
    } else {
        Color::Green
    };

    let status = Paragraph::new(Line::from(vec![
        Span::styled(app.status_message.as_str(), Style::default().fg(color)),
        Span::styled(
            format!("  ({})", app.api_label),
            Style::default().fg(Color::DarkGray),
        ),
    ]))
    .block(Block::default().title("Status").borders(Borders::ALL));

    f.render_widget(status, area);
}

fn render_shortcuts(f: &mut Frame<'_>, area: Rect) {
    let hint = Paragraph::new(Line::from(Span::styled(
        "↑/↓ select  Enter toggle score  r reload  ? help  q quit",
        Style::default().fg(Color::DarkGray),
    )));
    f.render_widget(hint, area);
}
