//! Panel 1 — Sources: stored uploads with selection toggles and meta.

use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(vec![
        Span::styled("Selected: ", theme::muted()),
        Span::styled(
            format!("{}/{}", app.selected.len(), app.available.len()),
            theme::accent(),
        ),
        Span::styled("  [Space]toggle [f]ilter dates [R]eset [r]efresh", theme::muted()),
    ]));
    if let Some(range) = app.range {
        lines.push(Line::from(Span::styled(
            format!("Date filter: {} .. {}", range.start, range.end),
            theme::warning(),
        )));
    }
    lines.push(Line::from(""));

    if app.available.is_empty() {
        lines.push(Line::from(Span::styled(
            format!(
                "No sources in {}. Import CSVs with `priceboard import` or run `priceboard sample`.",
                app.store.dir().display()
            ),
            theme::muted(),
        )));
    }

    for (row, meta) in app.available.iter().enumerate() {
        let is_cursor = row == app.cursor;
        let selected = app.is_selected(&meta.name);
        let marker = if selected { "[x]" } else { "[ ]" };

        let label = format!(
            "{marker} {:<20} {:>6} rows  {} .. {}  {}",
            meta.name,
            meta.rows,
            meta.first_date,
            meta.last_date,
            meta.short_fingerprint()
        );

        let style = if is_cursor {
            theme::accent().add_modifier(Modifier::REVERSED)
        } else if selected {
            // Match the source's chart color so the list keys the legend.
            let index = app
                .selected
                .iter()
                .position(|s| s == &meta.name)
                .unwrap_or(0);
            ratatui::style::Style::default().fg(theme::series_color(index))
        } else {
            theme::muted()
        };
        lines.push(Line::from(Span::styled(label, style)));
    }

    f.render_widget(Paragraph::new(lines), area);
}
