mod help;
mod helpers;
mod saved;
mod swatches;
mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    prelude::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

use crate::app::{App, AppView, NameField, NoticeKind};
use crate::types::PaletteSource;
use helpers::centered_rect;
use theme::Theme;

/// Renders the entire UI for a single frame.
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(3),
        ])
        .split(area);

    let header_lines = vec![Line::from(vec![
        Span::styled(
            "  Palettr  ",
            Style::default().fg(Color::Black).bg(Theme::primary()),
        ),
        Span::raw(" "),
        Span::styled(
            "color palette generator",
            Style::default()
                .fg(Theme::secondary())
                .add_modifier(Modifier::BOLD),
        ),
    ])];
    let header = Paragraph::new(Text::from(header_lines))
        .alignment(Alignment::Left)
        .block(rounded_block());
    frame.render_widget(header, layout[0]);

    match app.view {
        AppView::Generator => draw_generator(frame, layout[1], app),
        AppView::Saved => draw_text_view(frame, layout[1], " Saved ", saved::build_saved_text(app)),
        AppView::Help => draw_text_view(frame, layout[1], " Help ", help::build_help_text()),
    }

    let footer = Paragraph::new(Text::from(status_line(app)))
        .alignment(Alignment::Left)
        .block(rounded_block());
    frame.render_widget(footer, layout[2]);

    if let Some(popup) = &app.name_popup {
        render_name_popup(frame, popup);
    }
    if let Some(popup) = &app.random_popup {
        render_random_popup(frame, popup);
    }
    if let Some(notice) = &app.notice {
        render_notice(frame, notice);
    }
}

fn rounded_block() -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .style(Style::default().fg(Theme::secondary()))
}

fn draw_generator(frame: &mut Frame, area: Rect, app: &App) {
    let block = rounded_block().title(" Palette ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(2),
        ])
        .split(inner);

    frame.render_widget(Paragraph::new(source_line(app)), rows[0]);
    match &app.palette {
        Some(palette) => swatches::render_swatches(frame, rows[1], palette),
        None => frame.render_widget(
            Paragraph::new(swatches::build_empty_text()).alignment(Alignment::Center),
            rows[1],
        ),
    }
    if let Some(actions) = swatches::action_bar(app) {
        frame.render_widget(Paragraph::new(actions), rows[2]);
    }
    frame.render_widget(Paragraph::new(Text::from(keybinds_lines(app))), rows[3]);
}

fn draw_text_view(frame: &mut Frame, area: Rect, title: &'static str, text: Text<'_>) {
    let mut lines = vec![Line::from("")];
    lines.extend(text.lines);
    let body = Paragraph::new(Text::from(lines))
        .style(Style::default().fg(Theme::text()))
        .alignment(Alignment::Left)
        .block(rounded_block().title(title));
    frame.render_widget(body, area);
}

fn source_line(app: &App) -> Line<'_> {
    let Some(palette) = &app.palette else {
        return Line::from("");
    };
    let description = match &app.palette_source {
        Some(PaletteSource::Named { name }) => format!("from \"{name}\""),
        Some(PaletteSource::Random) => "random".to_string(),
        Some(PaletteSource::Saved { index }) => format!("saved #{}", index + 1),
        None => String::new(),
    };
    Line::from(vec![
        Span::styled(
            format!("  {} colors ", palette.len()),
            Style::default()
                .fg(Theme::accent())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(description, Style::default().fg(Theme::dim())),
    ])
}

fn keybinds_lines(app: &App) -> Vec<Line<'static>> {
    let secondary = if app.palette.is_some() {
        "v: Saved  ?: Help  q: Quit"
    } else {
        "v: Saved  ?: Help  q: Quit  (actions appear once a palette exists)"
    };
    vec![
        Line::from(Span::styled(
            "  n: From name  r: Randomize",
            Style::default().fg(Theme::highlight()),
        )),
        Line::from(Span::styled(
            format!("  {secondary}"),
            Style::default().fg(Theme::dim()),
        )),
    ]
}

fn status_line(app: &App) -> Line<'_> {
    if app.image_export.is_loading() {
        return Line::from(Span::styled(
            "● Loading watermark... (esc: cancel)",
            Style::default().fg(Theme::warn()).add_modifier(Modifier::BOLD),
        ));
    }
    match &app.status {
        Some(status) => Line::from(Span::styled(
            status.as_str(),
            Style::default().fg(Theme::text()),
        )),
        None => Line::from(Span::styled(
            format!("● Exports go to {}", app.export_dir().display()),
            Style::default().fg(Theme::dim()),
        )),
    }
}

fn field_styles(active: bool) -> (Style, Style) {
    if active {
        let style = Style::default()
            .fg(Theme::highlight())
            .add_modifier(Modifier::BOLD);
        (style, style)
    } else {
        (
            Style::default().fg(Theme::dim()),
            Style::default().fg(Theme::text()),
        )
    }
}

fn render_name_popup(frame: &mut Frame, popup: &crate::app::NamePalettePopup) {
    let area = centered_rect(60, 40, frame.area());
    frame.render_widget(Clear, area);

    let (name_title, name_value) = field_styles(popup.field == NameField::Name);
    let (size_title, size_value) = field_styles(popup.field == NameField::Size);

    let lines = vec![
        Line::from(Span::styled(
            "Palette from a name",
            Style::default()
                .fg(Theme::accent())
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Name: ", name_title),
            Span::styled(popup.name.as_str(), name_value),
        ]),
        Line::from(vec![
            Span::styled("Size: ", size_title),
            Span::styled(popup.size.as_str(), size_value),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Type to edit. Tab: switch field. Enter: generate. Esc: cancel.",
            Style::default().fg(Theme::dim()),
        )),
    ];

    let widget = Paragraph::new(Text::from(lines))
        .alignment(Alignment::Left)
        .block(rounded_block().title(" Name "));
    frame.render_widget(widget, area);
}

fn render_random_popup(frame: &mut Frame, popup: &crate::app::RandomPalettePopup) {
    let area = centered_rect(60, 35, frame.area());
    frame.render_widget(Clear, area);

    let size_display = if popup.size.is_empty() {
        Span::styled("5", Style::default().fg(Theme::dim()))
    } else {
        Span::styled(
            popup.size.as_str(),
            Style::default()
                .fg(Theme::highlight())
                .add_modifier(Modifier::BOLD),
        )
    };
    let lines = vec![
        Line::from(Span::styled(
            "Random palette",
            Style::default()
                .fg(Theme::accent())
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Size (4-16): ", Style::default().fg(Theme::dim())),
            size_display,
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Enter: randomize. Esc: cancel.",
            Style::default().fg(Theme::dim()),
        )),
    ];

    let widget = Paragraph::new(Text::from(lines))
        .alignment(Alignment::Left)
        .block(rounded_block().title(" Randomize "));
    frame.render_widget(widget, area);
}

fn render_notice(frame: &mut Frame, notice: &crate::app::Notice) {
    let area = centered_rect(60, 30, frame.area());
    frame.render_widget(Clear, area);

    let (title, color) = match notice.kind {
        NoticeKind::Info => (" Done ", Theme::success()),
        NoticeKind::Error => (" Error ", Theme::error()),
    };
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            notice.message.as_str(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Press ", Style::default().fg(Theme::dim())),
            Span::styled(
                "Enter",
                Style::default()
                    .fg(Theme::highlight())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to continue", Style::default().fg(Theme::dim())),
        ]),
    ];

    let widget = Paragraph::new(Text::from(lines))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(rounded_block().title(title));
    frame.render_widget(widget, area);
}
