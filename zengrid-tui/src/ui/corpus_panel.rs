//! Panel 5 — Corpus: learning-corpus readiness and size against the
//! training threshold.

use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use zengrid_runner::{SectionState, CORPUS_READY_MIN};

use crate::app::AppState;
use crate::theme;
use crate::ui::{section_placeholder, waiting_lines};

const GAUGE_WIDTH: usize = 40;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let Some(snapshot) = &app.snapshot else {
        f.render_widget(Paragraph::new(waiting_lines()), area);
        return;
    };

    let corpus = match &snapshot.corpus {
        SectionState::Ready(corpus) => corpus,
        other => {
            if let Some(placeholder) = section_placeholder(other) {
                f.render_widget(Paragraph::new(placeholder), area);
            }
            return;
        }
    };

    let mut lines: Vec<Line> = Vec::new();

    if corpus.ready {
        lines.push(Line::from(Span::styled(
            "READY",
            theme::positive().add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            format!(
                "{} entries on hand (threshold {})",
                corpus.size, CORPUS_READY_MIN
            ),
            theme::muted(),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "NOT READY",
            theme::warning().add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(vec![
            Span::styled(
                format!("{} of {} entries — ", corpus.size, CORPUS_READY_MIN),
                theme::muted(),
            ),
            Span::styled(
                format!("{} more needed", corpus.shortfall),
                theme::warning(),
            ),
        ]));
    }

    // Fill gauge toward the threshold.
    let fill = (corpus.size.min(CORPUS_READY_MIN) * GAUGE_WIDTH) / CORPUS_READY_MIN;
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("[", theme::muted()),
        Span::styled(
            "█".repeat(fill),
            if corpus.ready {
                theme::positive()
            } else {
                theme::warning()
            },
        ),
        Span::styled("░".repeat(GAUGE_WIDTH - fill), theme::muted()),
        Span::styled("]", theme::muted()),
    ]));

    if let Some(file) = &corpus.source_file {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("source: ", theme::muted()),
            Span::styled(file.as_str(), theme::accent()),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "The corpus feeds the adaptive-parameter system; forecasts keep",
        theme::muted(),
    )));
    lines.push(Line::from(Span::styled(
        "running while it fills, but parameter updates wait for READY.",
        theme::muted(),
    )));

    f.render_widget(Paragraph::new(lines), area);
}
