//! Dark and light palettes with semantic styles.
//!
//! The active variant is process-wide so every widget can call the style
//! helpers directly; `t` flips it at runtime.

use std::sync::atomic::{AtomicBool, Ordering};

use clap::ValueEnum;
use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ThemeVariant {
    #[default]
    Dark,
    Light,
}

impl ThemeVariant {
    /// Config value to variant; anything but "light" is dark.
    pub fn from_config(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("light") {
            Self::Light
        } else {
            Self::Dark
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

/// Colour roles used by the styles below.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub accent: Color,
    pub title: Color,
    pub text: Color,
    pub muted: Color,
    pub border: Color,
    pub highlight_bg: Color,
    pub surface: Color,
    pub positive: Color,
    pub negative: Color,
    pub warning: Color,
    /// Bar colours, cycled per chart point.
    pub series: [Color; 6],
}

const DARK: Palette = Palette {
    accent: Color::Rgb(225, 53, 255),
    title: Color::Rgb(128, 255, 234),
    text: Color::Rgb(189, 193, 207),
    muted: Color::Rgb(98, 114, 164),
    border: Color::Rgb(98, 114, 164),
    highlight_bg: Color::Rgb(40, 42, 54),
    surface: Color::Rgb(30, 31, 41),
    positive: Color::Rgb(80, 250, 123),
    negative: Color::Rgb(255, 99, 99),
    warning: Color::Rgb(241, 250, 140),
    series: [
        Color::Rgb(128, 255, 234),
        Color::Rgb(255, 106, 193),
        Color::Rgb(225, 53, 255),
        Color::Rgb(80, 250, 123),
        Color::Rgb(241, 250, 140),
        Color::Rgb(139, 233, 253),
    ],
};

const LIGHT: Palette = Palette {
    accent: Color::Rgb(124, 58, 237),
    title: Color::Rgb(14, 116, 144),
    text: Color::Rgb(31, 41, 55),
    muted: Color::Rgb(107, 114, 128),
    border: Color::Rgb(156, 163, 175),
    highlight_bg: Color::Rgb(229, 231, 235),
    surface: Color::Rgb(249, 250, 251),
    positive: Color::Rgb(21, 128, 61),
    negative: Color::Rgb(185, 28, 28),
    warning: Color::Rgb(180, 83, 9),
    series: [
        Color::Rgb(14, 116, 144),
        Color::Rgb(190, 24, 93),
        Color::Rgb(124, 58, 237),
        Color::Rgb(21, 128, 61),
        Color::Rgb(180, 83, 9),
        Color::Rgb(37, 99, 235),
    ],
};

static LIGHT_ACTIVE: AtomicBool = AtomicBool::new(false);

pub fn set_variant(variant: ThemeVariant) {
    LIGHT_ACTIVE.store(variant == ThemeVariant::Light, Ordering::Relaxed);
}

pub fn variant() -> ThemeVariant {
    if LIGHT_ACTIVE.load(Ordering::Relaxed) {
        ThemeVariant::Light
    } else {
        ThemeVariant::Dark
    }
}

pub fn palette() -> &'static Palette {
    match variant() {
        ThemeVariant::Dark => &DARK,
        ThemeVariant::Light => &LIGHT,
    }
}

/// Colour for the `i`th chart point.
pub fn series_color(i: usize) -> Color {
    let series = &palette().series;
    series[i % series.len()]
}

// ── Semantic styles ───────────────────────────────────────────────────

pub fn title_style() -> Style {
    Style::default().fg(palette().title).add_modifier(Modifier::BOLD)
}

pub fn border_focused() -> Style {
    Style::default().fg(palette().accent)
}

pub fn border_default() -> Style {
    Style::default().fg(palette().border)
}

pub fn table_header() -> Style {
    Style::default()
        .fg(palette().title)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

pub fn text() -> Style {
    Style::default().fg(palette().text)
}

pub fn table_selected() -> Style {
    let p = palette();
    Style::default()
        .fg(p.accent)
        .bg(p.highlight_bg)
        .add_modifier(Modifier::BOLD)
}

pub fn tab_active() -> Style {
    Style::default().fg(palette().accent).add_modifier(Modifier::BOLD)
}

pub fn tab_inactive() -> Style {
    Style::default().fg(palette().text)
}

pub fn key_hint() -> Style {
    Style::default().fg(palette().muted)
}

pub fn key_hint_key() -> Style {
    Style::default().fg(palette().title).add_modifier(Modifier::BOLD)
}

/// Background for popups and overlays.
pub fn surface() -> Style {
    Style::default().bg(palette().surface).fg(palette().text)
}

pub fn success() -> Style {
    Style::default().fg(palette().positive)
}

pub fn error() -> Style {
    Style::default().fg(palette().negative).add_modifier(Modifier::BOLD)
}

pub fn warning() -> Style {
    Style::default().fg(palette().warning)
}

/// Green for gains, red for losses.
pub fn signed(value: f64) -> Style {
    if value < 0.0 { error() } else { success() }
}
