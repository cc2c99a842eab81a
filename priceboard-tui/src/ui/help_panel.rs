//! Panel 5 — Help: keyboard shortcuts.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, _app: &AppState) {
    let mut lines: Vec<Line> = Vec::new();

    section(&mut lines, "Global Navigation");
    key(&mut lines, "1-5", "Switch to panel by number");
    key(&mut lines, "Tab / Shift+Tab", "Cycle panels forward / back");
    key(&mut lines, "f", "Set a date filter (YYYYMMDD [YYYYMMDD])");
    key(&mut lines, "R", "Reset date filter and selection");
    key(&mut lines, "r", "Re-scan the data directory");
    key(&mut lines, "Esc", "Dismiss the status message");
    key(&mut lines, "q", "Quit");
    lines.push(Line::from(""));

    section(&mut lines, "Panel 1 — Sources");
    key(&mut lines, "j / k", "Move cursor down / up");
    key(&mut lines, "Space / Enter", "Toggle source selection");
    lines.push(Line::from(""));

    section(&mut lines, "Panel 2 — Chart");
    key(&mut lines, "", "Daily forecast averages per source, actuals in white");
    lines.push(Line::from(""));

    section(&mut lines, "Panel 3 — Table");
    key(&mut lines, "j / k", "Scroll one row");
    key(&mut lines, "PgDn / PgUp", "Scroll a page");
    key(&mut lines, "g / G", "Jump to top / bottom");
    lines.push(Line::from(""));

    section(&mut lines, "Panel 4 — Stats");
    key(&mut lines, "", "Pooled metrics over all selected sources");
    lines.push(Line::from(""));

    section(&mut lines, "Importing Data");
    key(&mut lines, "priceboard import <csv>", "Add a source from a CSV file");
    key(&mut lines, "priceboard sample", "Generate synthetic demo sources");

    f.render_widget(Paragraph::new(lines), area);
}

fn section<'a>(lines: &mut Vec<Line<'a>>, title: &str) {
    lines.push(Line::from(Span::styled(title.to_string(), theme::accent_bold())));
}

fn key<'a>(lines: &mut Vec<Line<'a>>, keys: &str, desc: &str) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {:>24}  ", keys), theme::accent()),
        Span::styled(desc.to_string(), theme::muted()),
    ]));
}
