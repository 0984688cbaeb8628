use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span, Text},
};

use super::theme::Theme;

pub fn build_help_text() -> Text<'static> {
    let mut lines = Vec::new();

    lines.push(Line::from(Span::styled(
        "Key bindings",
        Style::default()
            .fg(Theme::accent())
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));

    lines.push(section_title("Global"));
    lines.extend(section_lines(&[
        "q: Quit",
        "?: Toggle help",
        "g: Generator   v: Saved palettes",
        "esc: Back (or cancel a pending image export)",
    ]));

    lines.push(Line::from(""));
    lines.push(section_title("Generate"));
    lines.extend(section_lines(&[
        "n: Palette from a name (Tab switches between name and size)",
        "r: Random palette, 4 to 16 colors (empty size means 5)",
    ]));

    lines.push(Line::from(""));
    lines.push(section_title("Current palette"));
    lines.extend(section_lines(&[
        "c: Copy colors to the clipboard",
        "s: Save to local history",
        "x: Share through the configured share command",
        "j: Export palette.json",
        "i: Export palette_with_watermark.png",
    ]));

    lines.push(Line::from(""));
    lines.push(section_title("Saved"));
    lines.extend(section_lines(&["Up/Down: Move selection", "Enter: Use palette"]));

    lines.push(Line::from(""));
    lines.push(section_title("Popups"));
    lines.extend(section_lines(&[
        "Enter: Submit or dismiss",
        "Esc: Cancel",
    ]));

    Text::from(lines)
}

fn section_title(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!("  {title}"),
        Style::default()
            .fg(Theme::secondary())
            .add_modifier(Modifier::BOLD),
    ))
}

fn section_lines(items: &[&str]) -> Vec<Line<'static>> {
    items
        .iter()
        .map(|item| {
            Line::from(Span::styled(
                format!("  - {item}"),
                Style::default().fg(Theme::text()),
            ))
        })
        .collect()
}
