//! Bottom status bar — panel hints, refresh state, last message.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{AppState, StatusLevel};
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut spans: Vec<Span> = Vec::new();

    spans.push(Span::styled(
        " 1:Live 2:Backtest 3:Bias 4:News 5:Corpus 6:Status 7:Help",
        theme::muted(),
    ));

    if app.refreshing {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled("refreshing...", theme::warning()));
    } else if app.auto_refresh {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(
            format!("auto {}s", app.refresh_interval_secs),
            theme::accent(),
        ));
    }

    if let Some((msg, level)) = &app.status_message {
        let style = match level {
            StatusLevel::Info => theme::accent(),
            StatusLevel::Warning => theme::warning(),
            StatusLevel::Error => theme::negative(),
        };
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg.as_str(), style));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
