use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Color as TermColor,
};

use crate::types::Color;

pub fn to_term_color(color: Color) -> TermColor {
    TermColor::Rgb(color.r, color.g, color.b)
}

/// Black or white, whichever reads better on `background`.
pub fn label_color(background: Color) -> TermColor {
    let luma = 299 * u32::from(background.r) + 587 * u32::from(background.g) + 114 * u32::from(background.b);
    if luma >= 128_000 {
        TermColor::Black
    } else {
        TermColor::White
    }
}

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
