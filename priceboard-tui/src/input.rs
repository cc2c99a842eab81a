//! Keyboard input dispatch — overlays first, then global keys, then
//! panel-specific handlers.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{AppState, Overlay, Panel};

/// Handle a key event.
pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // 1. Overlays consume input first.
    if app.overlay == Overlay::DateFilter {
        handle_date_filter_overlay(app, key);
        return;
    }

    // 2. Global keys.
    match key.code {
        KeyCode::Char('q') => {
            app.running = false;
            return;
        }
        KeyCode::Char('1') => {
            app.active_panel = Panel::Sources;
            return;
        }
        KeyCode::Char('2') => {
            app.active_panel = Panel::Chart;
            return;
        }
        KeyCode::Char('3') => {
            app.active_panel = Panel::Table;
            return;
        }
        KeyCode::Char('4') => {
            app.active_panel = Panel::Stats;
            return;
        }
        KeyCode::Char('5') => {
            app.active_panel = Panel::Help;
            return;
        }
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.active_panel = app.active_panel.prev();
            } else {
                app.active_panel = app.active_panel.next();
            }
            return;
        }
        KeyCode::BackTab => {
            app.active_panel = app.active_panel.prev();
            return;
        }
        KeyCode::Char('f') => {
            app.open_date_filter();
            return;
        }
        KeyCode::Char('R') => {
            app.reset_filters();
            return;
        }
        KeyCode::Char('r') => {
            app.refresh_sources();
            app.set_status("sources refreshed".to_string());
            return;
        }
        KeyCode::Esc => {
            app.dismiss_status();
            return;
        }
        _ => {}
    }

    // 3. Panel-specific keys.
    match app.active_panel {
        Panel::Sources => handle_sources_key(app, key),
        Panel::Table => handle_table_key(app, key),
        // Display only.
        Panel::Chart | Panel::Stats | Panel::Help => {}
    }
}

fn handle_sources_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.cursor_down(),
        KeyCode::Char('k') | KeyCode::Up => app.cursor_up(),
        KeyCode::Char(' ') | KeyCode::Enter => app.toggle_cursor_source(),
        _ => {}
    }
}

fn handle_table_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.scroll_table(1),
        KeyCode::Char('k') | KeyCode::Up => app.scroll_table(-1),
        KeyCode::PageDown => app.scroll_table(20),
        KeyCode::PageUp => app.scroll_table(-20),
        KeyCode::Char('g') | KeyCode::Home => app.table_offset = 0,
        KeyCode::Char('G') | KeyCode::End => {
            app.table_offset = app.rows.len().saturating_sub(1)
        }
        _ => {}
    }
}

fn handle_date_filter_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.overlay = Overlay::None;
            app.filter_input.clear();
        }
        KeyCode::Enter => app.apply_date_filter_input(),
        KeyCode::Backspace => {
            app.filter_input.pop();
        }
        KeyCode::Char(c) if c.is_ascii_digit() || c == ' ' => {
            app.filter_input.push(c);
        }
        _ => {}
    }
}
