//! Style tokens for the dashboard.
//!
//! Series colors follow the web dashboard's chart palette; the actual-price
//! reference line is drawn in white to stand apart from every model series.

use ratatui::style::{Color, Modifier, Style};

pub const ACCENT: Color = Color::Cyan;
pub const WARNING: Color = Color::Rgb(255, 140, 0);
pub const NEGATIVE: Color = Color::Rgb(255, 20, 147);
pub const ACTUAL: Color = Color::White;

const SERIES: [Color; 6] = [
    Color::Rgb(255, 99, 132),
    Color::Rgb(54, 162, 235),
    Color::Rgb(255, 206, 86),
    Color::Rgb(75, 192, 192),
    Color::Rgb(153, 102, 255),
    Color::Rgb(255, 159, 64),
];

/// Color for the n-th selected source, cycling past six.
pub fn series_color(index: usize) -> Color {
    SERIES[index % SERIES.len()]
}

pub fn muted() -> Style {
    Style::default().fg(Color::Rgb(100, 149, 237))
}

pub fn accent() -> Style {
    Style::default().fg(ACCENT)
}

pub fn accent_bold() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn warning() -> Style {
    Style::default().fg(WARNING)
}

pub fn negative() -> Style {
    Style::default().fg(NEGATIVE)
}

pub fn panel_border(active: bool) -> Style {
    if active {
        Style::default().fg(ACCENT)
    } else {
        muted()
    }
}

pub fn panel_title(active: bool) -> Style {
    if active {
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
    } else {
        muted()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_colors_cycle() {
        assert_eq!(series_color(0), series_color(6));
        assert_ne!(series_color(0), series_color(1));
    }
}
