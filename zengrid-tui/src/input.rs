//! Keyboard input dispatch — global keys → overlays → panel-specific keys.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{AppState, Overlay, Panel};

/// Handle a key event.
pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // 1. Overlays consume input first.
    match app.overlay {
        Overlay::Welcome => {
            app.overlay = Overlay::None;
            return;
        }
        Overlay::ErrorHistory => {
            handle_error_overlay(app, key);
            return;
        }
        Overlay::None => {}
    }

    // 2. Global keys.
    match key.code {
        KeyCode::Char('q') => {
            app.running = false;
            return;
        }
        KeyCode::Char('r') => {
            app.request_refresh();
            return;
        }
        KeyCode::Char('a') => {
            app.toggle_auto_refresh();
            return;
        }
        KeyCode::Char('e') => {
            app.error_scroll = 0;
            app.overlay = Overlay::ErrorHistory;
            return;
        }
        KeyCode::Char(c @ '1'..='7') => {
            let idx = c as usize - '1' as usize;
            if let Some(panel) = Panel::from_index(idx) {
                app.active_panel = panel;
            }
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
        _ => {}
    }

    // 3. Panel-specific keys: j/k scrolls the panels with tables.
    let scroll = match app.active_panel {
        Panel::Live => Some(&mut app.live_scroll),
        Panel::News => Some(&mut app.news_scroll),
        _ => None,
    };
    if let Some(scroll) = scroll {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => *scroll += 1,
            KeyCode::Char('k') | KeyCode::Up => *scroll = scroll.saturating_sub(1),
            KeyCode::Char('g') | KeyCode::Home => *scroll = 0,
            _ => {}
        }
    }
}

fn handle_error_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('e') => {
            app.overlay = Overlay::None;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            if app.error_scroll + 1 < app.error_history.len() {
                app.error_scroll += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.error_scroll = app.error_scroll.saturating_sub(1);
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::mpsc;

    fn test_app() -> AppState {
        let (cmd_tx, _cmd_rx) = mpsc::channel();
        let (_resp_tx, resp_rx) = mpsc::channel();
        let mut app = AppState::new(cmd_tx, resp_rx, PathBuf::from("/tmp/x.json"), true);
        app.overlay = Overlay::None;
        app
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn number_keys_switch_panels() {
        let mut app = test_app();
        handle_key(&mut app, press(KeyCode::Char('4')));
        assert_eq!(app.active_panel, Panel::News);
        handle_key(&mut app, press(KeyCode::Char('7')));
        assert_eq!(app.active_panel, Panel::Help);
    }

    #[test]
    fn tab_cycles_forward() {
        let mut app = test_app();
        handle_key(&mut app, press(KeyCode::Tab));
        assert_eq!(app.active_panel, Panel::Backtest);
        handle_key(&mut app, press(KeyCode::BackTab));
        assert_eq!(app.active_panel, Panel::Live);
    }

    #[test]
    fn quit_key_stops_the_app() {
        let mut app = test_app();
        handle_key(&mut app, press(KeyCode::Char('q')));
        assert!(!app.running);
    }

    #[test]
    fn welcome_overlay_swallows_first_key() {
        let mut app = test_app();
        app.overlay = Overlay::Welcome;
        handle_key(&mut app, press(KeyCode::Char('4')));
        assert_eq!(app.overlay, Overlay::None);
        assert_eq!(app.active_panel, Panel::Live);
    }

    #[test]
    fn error_overlay_scrolls_within_bounds() {
        let mut app = test_app();
        app.push_error(crate::app::ErrorCategory::Other, "one", "t");
        app.push_error(crate::app::ErrorCategory::Other, "two", "t");
        app.overlay = Overlay::ErrorHistory;

        handle_key(&mut app, press(KeyCode::Char('j')));
        assert_eq!(app.error_scroll, 1);
        handle_key(&mut app, press(KeyCode::Char('j')));
        assert_eq!(app.error_scroll, 1);
        handle_key(&mut app, press(KeyCode::Esc));
        assert_eq!(app.overlay, Overlay::None);
    }

    #[test]
    fn scrolling_only_applies_to_table_panels() {
        let mut app = test_app();
        app.active_panel = Panel::Live;
        handle_key(&mut app, press(KeyCode::Char('j')));
        handle_key(&mut app, press(KeyCode::Char('j')));
        assert_eq!(app.live_scroll, 2);
        handle_key(&mut app, press(KeyCode::Char('g')));
        assert_eq!(app.live_scroll, 0);

        app.active_panel = Panel::Backtest;
        handle_key(&mut app, press(KeyCode::Char('j')));
        assert_eq!(app.live_scroll, 0);
    }
}
