//! Panel 4 — Stats: pooled accuracy metrics over the current selection.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    if app.selected.is_empty() {
        f.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "Select at least one source to compute statistics.",
                theme::muted(),
            ))),
            area,
        );
        return;
    }

    let mut lines = Vec::new();
    lines.push(Line::from(Span::styled(
        format!("Pooled over {} source(s)", app.selected.len()),
        theme::muted(),
    )));
    lines.push(Line::default());

    for (label, value) in app.stats.rows() {
        lines.push(Line::from(vec![
            Span::styled(format!("{label:<18}"), theme::accent()),
            Span::raw(value),
        ]));
    }

    if app.stats.mape_excluded > 0 {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            format!(
                "{} observation(s) with zero actual price excluded from MAPE",
                app.stats.mape_excluded
            ),
            theme::warning(),
        )));
    }

    f.render_widget(Paragraph::new(lines), area);
}
