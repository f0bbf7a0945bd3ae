//! Top-level UI layout — seven-panel frame with status bar.

pub mod backtest_panel;
pub mod bias_panel;
pub mod corpus_panel;
pub mod help_panel;
pub mod live_panel;
pub mod news_panel;
pub mod overlays;
pub mod status_bar;
pub mod status_panel;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders};
use ratatui::Frame;

use zengrid_runner::SectionState;

use crate::app::{AppState, Overlay, Panel};
use crate::theme;

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    // Split: main area + 1-line status bar.
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(f.area());

    let main_area = chunks[0];
    let status_area = chunks[1];

    draw_panel(f, main_area, app);
    status_bar::render(f, status_area, app);

    match app.overlay {
        Overlay::Welcome => overlays::render_welcome(f, main_area),
        Overlay::ErrorHistory => overlays::render_error_history(f, main_area, app),
        Overlay::None => {}
    }
}

/// Draw the active panel with its border.
fn draw_panel(f: &mut Frame, area: Rect, app: &AppState) {
    let panel = app.active_panel;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(true))
        .title(format!(" {} [{}] ", panel.label(), panel.index() + 1))
        .title_style(theme::panel_title(true));

    let inner = block.inner(area);
    f.render_widget(block, area);

    match panel {
        Panel::Live => live_panel::render(f, inner, app),
        Panel::Backtest => backtest_panel::render(f, inner, app),
        Panel::Bias => bias_panel::render(f, inner, app),
        Panel::News => news_panel::render(f, inner, app),
        Panel::Corpus => corpus_panel::render(f, inner, app),
        Panel::Status => status_panel::render(f, inner, app),
        Panel::Help => help_panel::render(f, inner, app),
    }
}

/// Lines for a section that has no data to chart: the notice, and the
/// command that produces the data when one applies.
pub fn section_placeholder<'a, T>(section: &'a SectionState<T>) -> Option<Vec<Line<'a>>> {
    let mut lines = vec![Line::from("")];
    match section {
        SectionState::Ready(_) => return None,
        SectionState::Empty {
            notice,
            remediation,
        } => {
            lines.push(Line::from(Span::styled(notice.as_str(), theme::muted())));
            if let Some(command) = remediation {
                lines.push(Line::from(""));
                lines.push(Line::from(vec![
                    Span::styled("run: ", theme::muted()),
                    Span::styled(command.as_str(), theme::warning()),
                ]));
            }
        }
        SectionState::Skipped(reason) => {
            lines.push(Line::from(Span::styled(reason.as_str(), theme::muted())));
        }
        SectionState::Failed(message) => {
            lines.push(Line::from(vec![
                Span::styled("error: ", theme::negative()),
                Span::styled(message.as_str(), theme::negative()),
            ]));
        }
    }
    Some(lines)
}

/// Lines shown before the first snapshot arrives.
pub fn waiting_lines() -> Vec<Line<'static>> {
    vec![
        Line::from(""),
        Line::from(Span::styled(
            "No data yet. Press r to refresh.",
            theme::muted(),
        )),
    ]
}

/// Compute a centered rect for overlays.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
