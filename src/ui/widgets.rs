//! Shared widgets: hero banner, metric cards, sidebar, key hints

use ratatui::{
    layout::Alignment,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use super::pages::Page;
use super::theme::Theme;

/// Full-width banner at the top of every page.
pub fn hero(title: &str, subtitle: &str) -> Paragraph<'static> {
    let lines = vec![
        Line::from(Span::styled(title.to_string(), Theme::hero())),
        Line::from(Span::styled(subtitle.to_string(), Theme::text())),
    ];

    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Theme::SECONDARY)),
        )
}

/// Headline number with a label above and a caption below.
pub fn metric_card(label: &str, value: String, caption: &str, color: Color) -> Paragraph<'static> {
    let lines = vec![
        Line::from(Span::styled(label.to_uppercase(), Theme::muted())),
        Line::from(Span::styled(value, Theme::accent(color))),
        Line::from(Span::styled(caption.to_string(), Theme::text())),
    ];

    Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(color)),
    )
}

/// Titled block of wrapped text.
pub fn info_card(title: &str, lines: Vec<Line<'static>>) -> Paragraph<'static> {
    Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border())
            .title(Span::styled(format!(" {title} "), Theme::title())),
    )
}

/// Bulleted lines, optionally with a bold lead-in before a colon.
pub fn bullets(items: &[&str]) -> Vec<Line<'static>> {
    items
        .iter()
        .map(|item| match item.split_once(": ") {
            Some((lead, rest)) => Line::from(vec![
                Span::styled("• ", Theme::muted()),
                Span::styled(format!("{lead}: "), Theme::strong()),
                Span::styled(rest.to_string(), Theme::text()),
            ]),
            None => Line::from(vec![
                Span::styled("• ", Theme::muted()),
                Span::styled(item.to_string(), Theme::text()),
            ]),
        })
        .collect()
}

/// One-line notice with a severity style.
pub fn notice(text: String, style: Style) -> Paragraph<'static> {
    Paragraph::new(Line::from(Span::styled(text, style))).wrap(Wrap { trim: true })
}

pub fn sidebar(current: Page, focused: bool) -> Paragraph<'static> {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled("Home Price", Theme::title())),
        Line::from(Span::styled("Predictor", Theme::title())),
        Line::from(""),
    ];

    for page in Page::ALL {
        let selected = page == current;
        let (prefix, style) = if selected {
            ("▶ ", Theme::highlight())
        } else {
            ("  ", Theme::text())
        };
        lines.push(Line::from(vec![
            Span::styled(prefix, style),
            Span::styled(page.title(), style),
        ]));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled("────────────────", Theme::muted())));
    lines.push(Line::from(Span::styled("Built with", Theme::muted())));
    lines.push(Line::from(Span::styled("Rust & ONNX Runtime", Theme::strong())));

    let border = if focused {
        Theme::border_focused()
    } else {
        Theme::border()
    };

    Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border)
            .title(Span::styled(" Navigate ", Theme::title())),
    )
}

/// Key hints for the bottom line; pairs of (keys, action).
pub fn hints(pairs: &[(&str, &str)]) -> Paragraph<'static> {
    let mut spans = Vec::with_capacity(pairs.len() * 2);
    for (keys, action) in pairs {
        spans.push(Span::styled(keys.to_string(), Theme::strong()));
        spans.push(Span::styled(format!("  {action}    "), Theme::muted()));
    }
    Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
}
