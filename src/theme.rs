//! Color theme system
//!
//! Styling is process-wide read-only configuration: the server resolves one
//! [`ColorScheme`] at startup and hands it to the renderer of every session.

use ratatui::style::{Color, Modifier, Style};
use std::fmt;

/// Available color themes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    /// Cyan/magenta on black (default)
    Neon,
    /// Amber CRT - orange/amber text on black
    AmberCrt,
    /// Green Phosphor - green text on black
    GreenPhosphor,
}

impl Theme {
    /// Parse theme name from string
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "neon" | "default" => Ok(Theme::Neon),
            "amber" | "ambercrt" | "amber-crt" => Ok(Theme::AmberCrt),
            "green" | "greenphosphor" | "green-phosphor" => Ok(Theme::GreenPhosphor),
            _ => Err(format!(
                "Unknown theme '{}'. Available: neon, amber-crt, green-phosphor",
                s
            )),
        }
    }

    /// Get the color scheme for this theme
    pub fn colors(&self) -> ColorScheme {
        match self {
            Theme::Neon => ColorScheme::neon(),
            Theme::AmberCrt => ColorScheme::amber_crt(),
            Theme::GreenPhosphor => ColorScheme::green_phosphor(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::Neon
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Neon => write!(f, "neon"),
            Theme::AmberCrt => write!(f, "amber-crt"),
            Theme::GreenPhosphor => write!(f, "green-phosphor"),
        }
    }
}

/// Color scheme for a theme
#[derive(Debug, Clone, Copy)]
pub struct ColorScheme {
    /// Titles, banners and the selected menu entry
    pub primary: Color,
    /// Cursor arrow and accents
    pub secondary: Color,
    /// Regular text
    pub text: Color,
    /// Help lines and descriptions
    pub muted: Color,
    pub success: Color,
    pub error: Color,
    /// Box borders
    pub border: Color,
    /// Snake head / food
    pub snake_head: Color,
    pub food: Color,
}

impl ColorScheme {
    /// Neon theme (default)
    pub fn neon() -> Self {
        Self {
            primary: Color::Indexed(51),
            secondary: Color::Indexed(198),
            text: Color::Indexed(255),
            muted: Color::Indexed(243),
            success: Color::Indexed(46),
            error: Color::Indexed(196),
            border: Color::Indexed(51),
            snake_head: Color::Indexed(46),
            food: Color::Indexed(198),
        }
    }

    /// Amber CRT theme - Retro terminal
    pub fn amber_crt() -> Self {
        let amber = Color::Rgb(255, 176, 0);
        let amber_bright = Color::Rgb(255, 200, 100);
        let amber_dim = Color::Rgb(180, 120, 0);

        Self {
            primary: amber_bright,
            secondary: amber,
            text: amber,
            muted: amber_dim,
            success: Color::Rgb(100, 255, 100),
            error: Color::Red,
            border: amber_dim,
            snake_head: amber_bright,
            food: Color::Rgb(255, 100, 255),
        }
    }

    /// Green Phosphor theme - Classic green screen
    pub fn green_phosphor() -> Self {
        let green = Color::Rgb(0, 255, 0);
        let green_dim = Color::Rgb(0, 180, 0);
        let green_bright = Color::Rgb(100, 255, 100);

        Self {
            primary: green_bright,
            secondary: green,
            text: green,
            muted: green_dim,
            success: green_bright,
            error: Color::Red,
            border: green_dim,
            snake_head: green_bright,
            food: Color::Cyan,
        }
    }

    pub fn title(&self) -> Style {
        Style::default().fg(self.primary).add_modifier(Modifier::BOLD)
    }

    pub fn item(&self) -> Style {
        Style::default().fg(self.text)
    }

    pub fn item_selected(&self) -> Style {
        Style::default().fg(self.primary).add_modifier(Modifier::BOLD)
    }

    pub fn arrow(&self) -> Style {
        Style::default().fg(self.secondary).add_modifier(Modifier::BOLD)
    }

    pub fn help(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn label(&self) -> Style {
        Style::default().fg(self.secondary).add_modifier(Modifier::BOLD)
    }

    pub fn ok(&self) -> Style {
        Style::default().fg(self.success).add_modifier(Modifier::BOLD)
    }

    pub fn err(&self) -> Style {
        Style::default().fg(self.error).add_modifier(Modifier::BOLD)
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::neon()
    }
}
