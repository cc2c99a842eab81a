//! Panel 2 — Chart: per-day averaged forecast lines plus the actual-price
//! reference series.

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Chart, Dataset, GraphType, Paragraph};
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    if app.chart.is_empty() {
        render_empty(f, area);
        return;
    }
    render_chart(f, area, app);
}

fn render_empty(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            "Select at least one source to display data.",
            theme::muted(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Go to Sources (press 1) and toggle entries with Space.",
            theme::muted(),
        )),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

fn render_chart(f: &mut Frame, area: Rect, app: &AppState) {
    let view = &app.chart;
    let (min_y, max_y) = view.value_bounds().unwrap_or((0.0, 1.0));
    let padding = (max_y - min_y).abs().max(1.0) * 0.05;
    let y_min = min_y - padding;
    let y_max = max_y + padding;
    let x_max = (view.dates.len().saturating_sub(1) as f64).max(1.0);

    // One point list per series; x is the axis index.
    let point_sets: Vec<Vec<(f64, f64)>> = view
        .series
        .iter()
        .map(|s| index_points(&s.points))
        .collect();
    let actual_points = index_points(&view.actual);

    let mut datasets: Vec<Dataset> = view
        .series
        .iter()
        .zip(point_sets.iter())
        .enumerate()
        .map(|(i, (series, points))| {
            Dataset::default()
                .name(series.name.clone())
                .marker(symbols::Marker::Braille)
                .style(Style::default().fg(theme::series_color(i)))
                .graph_type(GraphType::Line)
                .data(points)
        })
        .collect();
    datasets.push(
        Dataset::default()
            .name("actual")
            .marker(symbols::Marker::Dot)
            .style(Style::default().fg(theme::ACTUAL))
            .graph_type(GraphType::Line)
            .data(&actual_points),
    );

    // First, middle, and last date labels.
    let mid = view.labels.len() / 2;
    let x_labels = vec![
        Span::styled(view.labels.first().cloned().unwrap_or_default(), theme::muted()),
        Span::styled(view.labels.get(mid).cloned().unwrap_or_default(), theme::muted()),
        Span::styled(view.labels.last().cloned().unwrap_or_default(), theme::muted()),
    ];

    let chart = Chart::new(datasets)
        .x_axis(
            Axis::default()
                .title(Span::styled("Date", theme::muted()))
                .style(theme::muted())
                .bounds([0.0, x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled("Price", theme::muted()))
                .style(theme::muted())
                .bounds([y_min, y_max])
                .labels(vec![
                    Span::styled(format!("{y_min:.0}"), theme::muted()),
                    Span::styled(format!("{y_max:.0}"), theme::muted()),
                ]),
        );

    f.render_widget(chart, area);
}

fn index_points(values: &[f64]) -> Vec<(f64, f64)> {
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| (i as f64, v))
        .collect()
}
