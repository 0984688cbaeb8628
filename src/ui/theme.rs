use ratatui::style::Color;

/// Unified color theme for the application chrome; swatches use their own colors.
pub struct Theme;

impl Theme {
    /// Primary branding color
    pub fn primary() -> Color {
        Color::Magenta
    }

    /// Borders and section titles
    pub fn secondary() -> Color {
        Color::Cyan
    }

    /// Successful notices
    pub fn success() -> Color {
        Color::Green
    }

    /// Failed notices and validation errors
    pub fn error() -> Color {
        Color::LightRed
    }

    /// Pending work, e.g. a watermark still loading
    pub fn warn() -> Color {
        Color::Yellow
    }

    /// Active popup field
    pub fn highlight() -> Color {
        Color::Cyan
    }

    pub fn selection_marker() -> Color {
        Color::Green
    }

    pub fn dim() -> Color {
        Color::DarkGray
    }

    pub fn text() -> Color {
        Color::White
    }

    pub fn accent() -> Color {
        Color::LightBlue
    }
}
