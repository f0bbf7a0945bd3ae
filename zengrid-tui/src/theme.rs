//! Neon-on-charcoal theme tokens for the ZenGrid TUI.
//!
//! # Color Palette
//! - **Accent**: Electric cyan (focus, headline numbers)
//! - **Positive**: Neon green (hits, ready states)
//! - **Negative**: Hot pink (misses, failures)
//! - **Warning**: Neon orange (shortfalls, stale data)
//! - **Neutral**: Cool purple (neutral bias, secondary info)
//! - **Muted**: Steel blue (hints, disabled)

use ratatui::style::{Color, Modifier, Style};

use zengrid_core::domain::ForecastBias;

pub const ACCENT: Color = Color::Rgb(0, 255, 255);
pub const POSITIVE: Color = Color::Rgb(0, 255, 128);
pub const NEGATIVE: Color = Color::Rgb(255, 20, 147);
pub const WARNING: Color = Color::Rgb(255, 140, 0);
pub const NEUTRAL: Color = Color::Rgb(147, 112, 219);
pub const MUTED: Color = Color::Rgb(100, 149, 237);
pub const TEXT: Color = Color::White;

pub fn accent() -> Style {
    Style::default().fg(ACCENT)
}

pub fn accent_bold() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn positive() -> Style {
    Style::default().fg(POSITIVE)
}

pub fn negative() -> Style {
    Style::default().fg(NEGATIVE)
}

pub fn warning() -> Style {
    Style::default().fg(WARNING)
}

pub fn neutral() -> Style {
    Style::default().fg(NEUTRAL)
}

pub fn muted() -> Style {
    Style::default().fg(MUTED)
}

pub fn text() -> Style {
    Style::default().fg(TEXT)
}

pub fn panel_border(active: bool) -> Style {
    if active {
        accent()
    } else {
        muted()
    }
}

pub fn panel_title(active: bool) -> Style {
    if active {
        accent_bold()
    } else {
        muted()
    }
}

/// Style for an accuracy percentage (gradient from warning to positive).
pub fn accuracy_style(pct: f64) -> Style {
    match pct {
        p if p >= 60.0 => positive(),
        p if p >= 50.0 => accent(),
        p if p >= 40.0 => neutral(),
        _ => warning(),
    }
}

/// Style for a forecast bias label.
pub fn bias_style(bias: &ForecastBias) -> Style {
    match bias {
        ForecastBias::Bullish => positive(),
        ForecastBias::Bearish => negative(),
        ForecastBias::Neutral => neutral(),
        ForecastBias::Other(_) => muted(),
    }
}

/// Style for a hit/miss flag.
pub fn hit_style(hit: bool) -> Style {
    if hit {
        positive()
    } else {
        negative()
    }
}

/// Style for a readiness check.
pub fn check_style(ok: bool) -> Style {
    if ok {
        positive()
    } else {
        warning()
    }
}
