//! Panel 3 — Bias: per-bias accuracy table with proportion bars.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use zengrid_runner::SectionState;

use crate::app::AppState;
use crate::theme;
use crate::ui::{section_placeholder, waiting_lines};

/// Width of the proportion bar, in cells.
const BAR_WIDTH: usize = 24;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let Some(snapshot) = &app.snapshot else {
        f.render_widget(Paragraph::new(waiting_lines()), area);
        return;
    };

    let distribution = match &snapshot.bias {
        SectionState::Ready(distribution) => distribution,
        other => {
            if let Some(placeholder) = section_placeholder(other) {
                f.render_widget(Paragraph::new(placeholder), area);
            }
            return;
        }
    };

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(vec![
        Span::styled(
            format!("{} records from ", distribution.total),
            theme::muted(),
        ),
        Span::styled(distribution.source_file.as_str(), theme::accent()),
    ]));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!(
            "{:<10} {:>6} {:>6} {:>9}   share",
            "Bias", "Count", "Hits", "Accuracy"
        ),
        theme::accent_bold(),
    )));

    for group in &distribution.groups {
        let share = if distribution.total == 0 {
            0.0
        } else {
            group.count as f64 / distribution.total as f64
        };
        let filled = (share * BAR_WIDTH as f64).round() as usize;
        let bar = format!(
            "{}{}",
            "█".repeat(filled.min(BAR_WIDTH)),
            "░".repeat(BAR_WIDTH - filled.min(BAR_WIDTH))
        );

        lines.push(Line::from(vec![
            Span::styled(
                format!("{:<10} ", group.bias.label()),
                theme::bias_style(&group.bias),
            ),
            Span::styled(format!("{:>6} ", group.count), theme::text()),
            Span::styled(format!("{:>6} ", group.hits), theme::text()),
            Span::styled(
                format!("{:>8.1}% ", group.accuracy_pct),
                theme::accuracy_style(group.accuracy_pct),
            ),
            Span::styled("  ", theme::muted()),
            Span::styled(bar, theme::bias_style(&group.bias)),
            Span::styled(format!(" {:.0}%", share * 100.0), theme::muted()),
        ]));
    }

    f.render_widget(Paragraph::new(lines), area);
}
