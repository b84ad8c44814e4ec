use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use stock_league_core::BoardCard;

use crate::app::App;
use crate::ui::widgets::scroll::card_scroll_offset;

/// What the image slot shows: the URL, or a marker once on the placeholder.
pub fn image_text(card: &BoardCard) -> String {
    if card.shows_placeholder() {
        format!("placeholder ({})", card.card().image.ticker)
    } else {
        card.image_src().to_string()
    }
}

pub fn card_lines(card: &BoardCard, selected: bool) -> Vec<Line<'static>> {
    let view = card.card();
    let title_style = if selected {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };
    let marker = if selected { "▶ " } else { "  " };

    let mut lines = vec![Line::from(vec![
        Span::styled(marker, title_style),
        Span::styled(view.title.clone(), title_style),
    ])];

    if let Some(subtitle) = &view.subtitle {
        lines.push(Line::from(Span::styled(
            format!("    {subtitle}"),
            Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::ITALIC),
        )));
    }
    lines.push(Line::from(format!("    {}", view.earnings)));

    let image_style = if card.shows_placeholder() {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Blue)
    };
    lines.push(Line::from(vec![
        Span::raw("    Image: "),
        Span::styled(image_text(card), image_style),
    ]));

    let open = card.panel().is_visible();
    lines.push(Line::from(Span::styled(
        format!("    [{}] {}", if open { '-' } else { '+' }, view.score_label),
        Style::default().fg(Color::Magenta),
    )));

    if open {
        lines.extend(view.details.iter().map(|line| {
            Line::from(vec![
                Span::styled(
                    format!("        {}:", line.label),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!(" {}", line.value)),
            ])
        }));
    }

    lines.push(Line::default());
    lines
}

pub fn render_cards(app: &App, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default().title("Cards").borders(Borders::ALL);

    if app.board.is_empty() {
        f.render_widget(Paragraph::new("No companies to show").block(block), area);
        return;
    }

    let mut lines = Vec::new();
    let mut selected_range = (0, 0);
    for (index, card) in app.board.cards().iter().enumerate() {
        let start = lines.len();
        lines.extend(card_lines(card, index == app.selected));
        if index == app.selected {
            selected_range = (start, lines.len());
        }
    }

    let height = usize::from(block.inner(area).height);
    let offset = card_scroll_offset(selected_range, height);

    let paragraph = Paragraph::new(lines)
        .block(block)
        .scroll((u16::try_from(offset).unwrap_or(u16::MAX), 0));
    f.render_widget(paragraph, area);
}
