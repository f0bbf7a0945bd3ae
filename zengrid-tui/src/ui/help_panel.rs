//! Panel 7 — Help: keyboard shortcuts.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, _app: &AppState) {
    let entries: &[(&str, &str)] = &[
        ("1-7", "jump to a panel"),
        ("Tab / Shift-Tab", "next / previous panel"),
        ("r", "refresh now"),
        ("a", "toggle auto-refresh"),
        ("e", "error history overlay"),
        ("j / k", "scroll tables"),
        ("g", "scroll to top"),
        ("q", "quit"),
    ];

    let mut lines = vec![
        Line::from(Span::styled("Keys", theme::accent_bold())),
        Line::from(""),
    ];
    for (key, action) in entries {
        lines.push(Line::from(vec![
            Span::styled(format!("  {key:<16}"), theme::accent()),
            Span::styled(*action, theme::muted()),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Every refresh re-reads the warehouse and the newest artifact",
        theme::muted(),
    )));
    lines.push(Line::from(Span::styled(
        "files; nothing is cached between passes.",
        theme::muted(),
    )));

    f.render_widget(Paragraph::new(lines), area);
}
