use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span, Text},
};

use super::swatches::mini_swatch_spans;
use super::theme::Theme;
use crate::app::App;

pub fn build_saved_text(app: &App) -> Text<'_> {
    if let Some(error) = &app.saved_error {
        return Text::from(error.as_str());
    }
    if app.saved_palettes.is_empty() {
        return Text::from("No saved palettes yet. Generate one and press 's' to keep it.");
    }

    let mut lines = app
        .saved_palettes
        .iter()
        .enumerate()
        .map(|(index, palette)| {
            let selected = index == app.selected_saved_index;
            let marker_style = if selected {
                Style::default()
                    .fg(Theme::selection_marker())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Theme::dim())
            };
            let mut spans = vec![
                Span::styled(if selected { "> " } else { "  " }, marker_style),
                Span::styled(
                    format!("#{:<3} ", index + 1),
                    Style::default().fg(Theme::accent()),
                ),
            ];
            spans.extend(mini_swatch_spans(palette, 3));
            spans.push(Span::styled(
                format!("  {} colors", palette.len()),
                Style::default().fg(Theme::dim()),
            ));
            Line::from(spans)
        })
        .collect::<Vec<_>>();

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Enter: Use palette   esc: Back",
        Style::default().fg(Theme::dim()),
    )));

    Text::from(lines)
}
