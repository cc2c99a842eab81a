//! Overlay widgets — date filter input.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::theme;
use crate::ui::centered_rect;

/// Date filter entry popup. Accepts one or two compact dates.
pub fn render_date_filter(f: &mut Frame, area: Rect, input: &str) {
    let popup = centered_rect(50, 25, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Date Filter ")
        .title_style(theme::accent_bold());

    let text = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("  > ", theme::accent()),
            Span::raw(input.to_string()),
            Span::styled("_", theme::accent()),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "  YYYYMMDD for a single day, YYYYMMDD YYYYMMDD for a range",
            theme::muted(),
        )),
        Line::from(Span::styled(
            "  [Enter] apply   [Esc] cancel",
            theme::muted(),
        )),
    ];

    f.render_widget(Paragraph::new(text).block(block), popup);
}
