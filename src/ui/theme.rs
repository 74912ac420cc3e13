//! Colors and styles

use ratatui::style::{Color, Modifier, Style};

/// Indigo-to-violet dashboard theme.
///
/// Cards cycle through the accent colors; warnings are amber and errors
/// coral so they stand out against the indigo chrome.
pub struct Theme;

impl Theme {
    // Core palette
    pub const PRIMARY: Color = Color::Rgb(102, 126, 234);
    pub const SECONDARY: Color = Color::Rgb(118, 75, 162);
    pub const TEXT: Color = Color::Rgb(226, 232, 240);
    pub const MUTED: Color = Color::Rgb(113, 128, 150);

    // Accents
    pub const PINK: Color = Color::Rgb(240, 147, 251);
    pub const CORAL: Color = Color::Rgb(245, 87, 108);
    pub const SKY: Color = Color::Rgb(79, 172, 254);
    pub const MINT: Color = Color::Rgb(168, 237, 234);
    pub const AMBER: Color = Color::Rgb(246, 201, 14);
    pub const GREEN: Color = Color::Rgb(72, 187, 120);

    /// Metric card accents, in card order
    pub const CARDS: [Color; 4] = [Self::PRIMARY, Self::CORAL, Self::SKY, Self::MINT];

    /// Default full-screen style.
    pub fn base() -> Style {
        Style::default().fg(Self::TEXT)
    }

    pub fn border() -> Style {
        Style::default().fg(Self::PRIMARY)
    }

    /// Border of the region that owns the keyboard.
    pub fn border_focused() -> Style {
        Style::default()
            .fg(Self::PINK)
            .add_modifier(Modifier::BOLD)
    }

    pub fn title() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Hero banner text.
    pub fn hero() -> Style {
        Style::default()
            .fg(Color::White)
            .bg(Self::SECONDARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn text() -> Style {
        Style::default().fg(Self::TEXT)
    }

    pub fn muted() -> Style {
        Style::default().fg(Self::MUTED)
    }

    pub fn strong() -> Style {
        Style::default()
            .fg(Self::TEXT)
            .add_modifier(Modifier::BOLD)
    }

    pub fn accent(color: Color) -> Style {
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }

    pub fn highlight() -> Style {
        Style::default()
            .fg(Color::White)
            .bg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn ok() -> Style {
        Self::accent(Self::GREEN)
    }

    pub fn warn() -> Style {
        Self::accent(Self::AMBER)
    }

    pub fn error() -> Style {
        Self::accent(Self::CORAL)
    }

    pub fn info() -> Style {
        Style::default().fg(Self::SKY)
    }
}
