use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Paragraph},
};

use super::helpers::{label_color, to_term_color};
use super::theme::Theme;
use crate::app::App;
use crate::types::Palette;

/// Fills `area` with one swatch per color, left to right, each labelled with its `rgb(...)`.
pub fn render_swatches(frame: &mut Frame, area: Rect, palette: &Palette) {
    if palette.is_empty() || area.width == 0 {
        return;
    }
    let count = palette.len() as u32;
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(palette.iter().map(|_| Constraint::Ratio(1, count)))
        .split(area);

    for (color, column) in palette.iter().zip(columns.iter()) {
        let style = Style::default()
            .bg(to_term_color(*color))
            .fg(label_color(*color));
        let label_row = column.height.saturating_sub(1) / 2;
        let mut lines = vec![Line::from(""); label_row as usize];
        lines.push(Line::from(color.to_string()));
        let swatch = Paragraph::new(Text::from(lines))
            .alignment(Alignment::Center)
            .block(Block::default().style(style));
        frame.render_widget(swatch, *column);
    }
}

/// The placeholder shown before anything has been generated.
pub fn build_empty_text() -> Text<'static> {
    Text::from(vec![
        Line::from(""),
        Line::from(Span::styled(
            "No palette yet.",
            Style::default()
                .fg(Theme::accent())
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Press 'n' to generate one from a name or 'r' for a random palette.",
            Style::default().fg(Theme::dim()),
        )),
    ])
}

/// A one-line miniature of `palette` for list views.
pub fn mini_swatch_spans(palette: &Palette, cell_width: usize) -> Vec<Span<'static>> {
    palette
        .iter()
        .map(|color| {
            Span::styled(
                " ".repeat(cell_width),
                Style::default().bg(to_term_color(*color)),
            )
        })
        .collect()
}

/// Actions are only offered once a palette exists.
pub fn action_bar(app: &App) -> Option<Line<'static>> {
    if app.palette.is_none() {
        return None;
    }
    let key = |k: &'static str| {
        Span::styled(
            k,
            Style::default()
                .fg(Theme::highlight())
                .add_modifier(Modifier::BOLD),
        )
    };
    let label = |text: &'static str, enabled: bool| {
        let color = if enabled { Theme::text() } else { Theme::dim() };
        Span::styled(text, Style::default().fg(color))
    };
    Some(Line::from(vec![
        Span::raw("  "),
        key("c"),
        label(" Copy   ", app.clipboard_available()),
        key("s"),
        label(" Save   ", true),
        key("x"),
        label(" Share   ", app.share_available()),
        key("j"),
        label(" Export JSON   ", true),
        key("i"),
        label(" Export image", !app.image_export.is_loading()),
    ]))
}
