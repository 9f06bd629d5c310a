//! Centralized theme and styling for the TUI
//!
//! Single source of truth for the colors and styles used by the calculator
//! tabs, so the ceiling highlight and error messages look the same everywhere.
//!
//! # Usage
//! ```rust
//! use bdcalc::theme::{Colors, Styles, Theme};
//! use bdcalc::types::CommissionLevel;
//! use ratatui::style::Style;
//!
//! let style = Style::default().fg(Colors::PRIMARY);
//! let title_style = Styles::title();
//! let headline = Theme::commission_style(CommissionLevel::AboveCeiling);
//! ```

use ratatui::style::{Color, Modifier, Style};

use crate::types::CommissionLevel;

// =============================================================================
// COLOR PALETTE
// =============================================================================

/// Core color palette for the application
pub struct Colors;

impl Colors {
    // -------------------------------------------------------------------------
    // Base Colors (backgrounds, foregrounds)
    // -------------------------------------------------------------------------

    /// Primary dark background - used for most panels and dialogs
    pub const BG_PRIMARY: Color = Color::Rgb(20, 20, 30);

    /// Background behind an above-ceiling commission
    pub const BG_DANGER: Color = Color::Rgb(60, 20, 20);

    /// Background behind a within-ceiling commission
    pub const BG_OK: Color = Color::Rgb(20, 50, 25);

    /// Default foreground text color
    pub const FG_PRIMARY: Color = Color::White;

    /// Disabled/inactive text color
    pub const FG_MUTED: Color = Color::DarkGray;

    // -------------------------------------------------------------------------
    // Accent Colors (branding, emphasis)
    // -------------------------------------------------------------------------

    /// Primary accent color - used for borders, titles, highlights
    pub const PRIMARY: Color = Color::Cyan;

    /// Secondary accent color - used for selected items, emphasis
    pub const SECONDARY: Color = Color::Yellow;

    // -------------------------------------------------------------------------
    // Semantic Colors (status, feedback)
    // -------------------------------------------------------------------------

    pub const SUCCESS: Color = Color::Green;

    pub const ERROR: Color = Color::Red;

    pub const INFO: Color = Color::LightBlue;

    // -------------------------------------------------------------------------
    // UI Element Colors
    // -------------------------------------------------------------------------

    pub const BORDER_ACTIVE: Color = Color::Cyan;

    pub const BORDER_INACTIVE: Color = Color::DarkGray;

    /// Selected item highlight
    pub const SELECTED_BG: Color = Color::Yellow;

    /// Selected item text (for contrast on yellow bg)
    pub const SELECTED_FG: Color = Color::Black;

    pub const NAV_HINT: Color = Color::DarkGray;
}

// =============================================================================
// PRE-BUILT STYLES
// =============================================================================

/// Pre-built styles for common UI patterns
pub struct Styles;

impl Styles {
    /// Default text style
    pub fn text() -> Style {
        Style::default().fg(Colors::FG_PRIMARY)
    }

    /// Muted/secondary text
    pub fn text_muted() -> Style {
        Style::default().fg(Colors::FG_MUTED)
    }

    /// Title style (bold primary)
    pub fn title() -> Style {
        Style::default()
            .fg(Colors::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border_active() -> Style {
        Style::default().fg(Colors::BORDER_ACTIVE)
    }

    pub fn border_inactive() -> Style {
        Style::default().fg(Colors::BORDER_INACTIVE)
    }

    /// Focused form field
    pub fn focused() -> Style {
        Style::default()
            .fg(Colors::SELECTED_FG)
            .bg(Colors::SELECTED_BG)
            .add_modifier(Modifier::BOLD)
    }

    pub fn success() -> Style {
        Style::default().fg(Colors::SUCCESS)
    }

    pub fn error() -> Style {
        Style::default()
            .fg(Colors::ERROR)
            .add_modifier(Modifier::BOLD)
    }

    pub fn info() -> Style {
        Style::default().fg(Colors::INFO)
    }

    pub fn nav_hint() -> Style {
        Style::default().fg(Colors::NAV_HINT)
    }
}

// =============================================================================
// SEMANTIC STYLES
// =============================================================================

/// Status message severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

/// Semantic style lookups
pub struct Theme;

impl Theme {
    pub fn severity_style(severity: Severity) -> Style {
        match severity {
            Severity::Info => Styles::info(),
            Severity::Success => Styles::success(),
            Severity::Error => Styles::error(),
        }
    }

    /// Headline style for an effective commission: red above the ceiling, green otherwise.
    pub fn commission_style(level: CommissionLevel) -> Style {
        match level {
            CommissionLevel::AboveCeiling => Style::default()
                .fg(Colors::ERROR)
                .bg(Colors::BG_DANGER)
                .add_modifier(Modifier::BOLD),
            CommissionLevel::WithinCeiling => Style::default()
                .fg(Colors::SUCCESS)
                .bg(Colors::BG_OK)
                .add_modifier(Modifier::BOLD),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commission_style_colors() {
        assert_eq!(
            Theme::commission_style(CommissionLevel::AboveCeiling).fg,
            Some(Colors::ERROR)
        );
        assert_eq!(
            Theme::commission_style(CommissionLevel::WithinCeiling).fg,
            Some(Colors::SUCCESS)
        );
    }

    #[test]
    fn test_severity_style() {
        assert_eq!(Theme::severity_style(Severity::Error).fg, Some(Colors::ERROR));
    }
}
