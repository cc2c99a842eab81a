//! Panel 3 — Table: merged spreadsheet view, one row per (date, time).

use ratatui::layout::{Constraint, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Cell, Paragraph, Row, Table};
use ratatui::Frame;

use priceboard_core::domain::format_display_date;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    if app.selected.is_empty() || app.rows.is_empty() {
        f.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "No rows to display. Select sources (panel 1) or widen the date filter.",
                theme::muted(),
            ))),
            area,
        );
        return;
    }

    let mut header_cells = vec![
        Cell::from("Date"),
        Cell::from("Time"),
        Cell::from("Actual"),
    ];
    for (i, name) in app.selected.iter().enumerate() {
        header_cells.push(Cell::from(Span::styled(
            name.clone(),
            ratatui::style::Style::default().fg(theme::series_color(i)),
        )));
    }
    let header = Row::new(header_cells).style(theme::accent());

    // Window the rows to what fits; header + border take 2 lines.
    let visible = area.height.saturating_sub(2) as usize;
    let rows = app
        .rows
        .iter()
        .skip(app.table_offset)
        .take(visible.max(1))
        .map(|row| {
            let mut cells = vec![
                Cell::from(format_display_date(row.date)),
                Cell::from(row.time.format("%H:%M").to_string()),
                Cell::from(format!("${:.2}", row.actual_price)),
            ];
            for forecast in &row.forecasts {
                cells.push(match forecast {
                    Some(value) => Cell::from(format!("${value:.2}")),
                    None => Cell::from(Span::styled("-", theme::muted())),
                });
            }
            Row::new(cells)
        });

    let mut widths = vec![
        Constraint::Length(10),
        Constraint::Length(6),
        Constraint::Length(10),
    ];
    widths.extend(app.selected.iter().map(|_| Constraint::Min(12)));

    let table = Table::new(rows, widths).header(header).footer(Row::new([
        Cell::from(Span::styled(
            format!(
                "{}-{} of {}",
                app.table_offset + 1,
                (app.table_offset + visible).min(app.rows.len()),
                app.rows.len()
            ),
            theme::muted(),
        )),
    ]));

    f.render_widget(table, area);
}
