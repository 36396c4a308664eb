//! Color themes for the adlens TUI.
//!
//! The palette is chosen once from configuration; there is no runtime
//! switching or persistence.

use adlens_config::ThemeChoice;
use ratatui::style::Color;

/// Color palette for a theme.
#[derive(Debug, Clone)]
pub struct ThemeColors {
    /// Title and focused borders
    pub header: Color,
    /// Hotkey hints
    pub hotkey: Color,
    /// Normal text
    pub text: Color,
    /// Secondary text (timestamp, status line, placeholders)
    pub text_dim: Color,
    /// Unfocused borders
    pub border_dim: Color,
    /// Focus indicator for controls and the table cursor
    pub focus_highlight: Color,
    /// Primary button background
    pub primary: Color,
    /// Secondary button accent
    pub secondary: Color,
    /// Disabled controls
    pub disabled: Color,
    /// Region rows beneath an expanded channel
    pub region_text: Color,
    /// Inline validation errors
    pub error: Color,
    /// Modal and overlay background
    pub overlay_bg: Color,
}

/// Complete theme definition.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Which palette this is
    pub name: ThemeChoice,
    /// Color palette
    pub colors: ThemeColors,
}

impl Theme {
    /// The default palette.
    pub fn default_theme() -> Self {
        Self {
            name: ThemeChoice::Default,
            colors: ThemeColors {
                header: Color::Cyan,
                hotkey: Color::Yellow,
                text: Color::White,
                text_dim: Color::Gray,
                border_dim: Color::DarkGray,
                focus_highlight: Color::Cyan,
                primary: Color::Blue,
                secondary: Color::Gray,
                disabled: Color::Rgb(80, 80, 80),
                region_text: Color::Gray,
                error: Color::Red,
                overlay_bg: Color::Black,
            },
        }
    }

    /// Higher contrast for dark terminals.
    pub fn dark_theme() -> Self {
        Self {
            name: ThemeChoice::Dark,
            colors: ThemeColors {
                header: Color::LightBlue,
                hotkey: Color::LightYellow,
                text: Color::White,
                text_dim: Color::DarkGray,
                border_dim: Color::Black,
                focus_highlight: Color::LightYellow,
                primary: Color::LightBlue,
                secondary: Color::LightCyan,
                disabled: Color::Rgb(60, 60, 60),
                region_text: Color::DarkGray,
                error: Color::LightRed,
                overlay_bg: Color::Black,
            },
        }
    }

    /// For bright terminal backgrounds.
    pub fn light_theme() -> Self {
        Self {
            name: ThemeChoice::Light,
            colors: ThemeColors {
                header: Color::Blue,
                hotkey: Color::DarkGray,
                text: Color::Black,
                text_dim: Color::DarkGray,
                border_dim: Color::Gray,
                focus_highlight: Color::Rgb(0, 100, 255),
                primary: Color::Blue,
                secondary: Color::DarkGray,
                disabled: Color::Rgb(160, 160, 160),
                region_text: Color::DarkGray,
                error: Color::Red,
                overlay_bg: Color::White,
            },
        }
    }

    /// Get a theme by configured name.
    pub fn by_name(name: ThemeChoice) -> Self {
        match name {
            ThemeChoice::Default => Self::default_theme(),
            ThemeChoice::Dark => Self::dark_theme(),
            ThemeChoice::Light => Self::light_theme(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_theme()
    }
}
