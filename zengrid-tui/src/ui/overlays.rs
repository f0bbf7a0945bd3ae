//! Overlays — welcome splash and the error history viewer.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;
use crate::ui::centered_rect;

pub fn render_welcome(f: &mut Frame, area: Rect) {
    let popup = centered_rect(60, 50, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(true))
        .title(" ZenGrid ")
        .title_style(theme::panel_title(true));
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Trading-forecast performance dashboard.",
            theme::text(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Press ", theme::muted()),
            Span::styled("r", theme::accent()),
            Span::styled(" to load data, ", theme::muted()),
            Span::styled("1-7", theme::accent()),
            Span::styled(" to switch panels, ", theme::muted()),
            Span::styled("q", theme::accent()),
            Span::styled(" to quit.", theme::muted()),
        ]),
        Line::from(""),
        Line::from(Span::styled("Any key to dismiss.", theme::muted())),
    ];
    f.render_widget(Paragraph::new(lines), inner);
}

pub fn render_error_history(f: &mut Frame, area: Rect, app: &AppState) {
    let popup = centered_rect(80, 70, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(true))
        .title(format!(" Errors ({}) ", app.error_history.len()))
        .title_style(theme::panel_title(true));
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let mut lines: Vec<Line> = Vec::new();
    if app.error_history.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "No errors this session.",
            theme::muted(),
        )));
    } else {
        let visible = inner.height.saturating_sub(1) as usize;
        for record in app.error_history.iter().skip(app.error_scroll).take(visible) {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{} ", record.timestamp.format("%H:%M:%S")),
                    theme::muted(),
                ),
                Span::styled(format!("[{:<4}] ", record.category.label()), theme::warning()),
                Span::styled(record.message.as_str(), theme::negative()),
                Span::styled(format!("  ({})", record.context), theme::muted()),
            ]));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "[j/k] scroll  [Esc] close",
            theme::muted(),
        )));
    }
    f.render_widget(Paragraph::new(lines), inner);
}
