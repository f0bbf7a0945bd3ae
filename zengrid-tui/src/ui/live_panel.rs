//! Panel 1 — Live: forecast accuracy cards, latest market closes, recent
//! forecast rows, and published summary levels.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use zengrid_core::domain::INSTRUMENTS;
use zengrid_runner::SectionState;

use crate::app::AppState;
use crate::theme;
use crate::ui::{section_placeholder, waiting_lines};

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let Some(snapshot) = &app.snapshot else {
        f.render_widget(Paragraph::new(waiting_lines()), area);
        return;
    };

    let mut lines: Vec<Line> = Vec::new();

    // Accuracy cards.
    match &snapshot.live {
        SectionState::Ready(live) => {
            lines.push(Line::from(vec![
                Span::styled("Accuracy ", theme::muted()),
                Span::styled(
                    format!("{:.1}%", live.stats.accuracy_pct),
                    theme::accuracy_style(live.stats.accuracy_pct).add_modifier(
                        ratatui::style::Modifier::BOLD,
                    ),
                ),
                Span::styled("   Hits ", theme::muted()),
                Span::styled(format!("{}", live.stats.hits), theme::positive()),
                Span::styled("   Misses ", theme::muted()),
                Span::styled(format!("{}", live.stats.misses), theme::negative()),
                Span::styled("   Forecasts ", theme::muted()),
                Span::styled(format!("{}", live.stats.total), theme::accent()),
            ]));
        }
        other => {
            if let Some(placeholder) = section_placeholder(other) {
                lines.extend(placeholder);
            }
        }
    }

    // Latest closes on one line.
    if let SectionState::Ready(market) = &snapshot.market {
        if let Some(latest) = market.last() {
            let mut spans = vec![Span::styled(
                format!("{}  ", latest.date),
                theme::muted(),
            )];
            for inst in INSTRUMENTS {
                spans.push(Span::styled(format!("{inst} "), theme::muted()));
                match latest.close(inst) {
                    Some(close) => {
                        spans.push(Span::styled(format!("{close:.2}  "), theme::text()))
                    }
                    None => spans.push(Span::styled("--  ", theme::muted())),
                }
            }
            lines.push(Line::from(""));
            lines.push(Line::from(spans));
        }
    }

    // Recent forecasts table.
    lines.push(Line::from(""));
    if let SectionState::Ready(live) = &snapshot.live {
        lines.push(Line::from(Span::styled(
            format!(
                "{:<12} {:<8} {:<9} {:>10} {:>6}",
                "Date", "Symbol", "Bias", "Close", "Hit"
            ),
            theme::accent_bold(),
        )));
        for record in live.recent.iter().skip(app.live_scroll) {
            let close = record
                .actual_close
                .map(|c| format!("{c:.2}"))
                .unwrap_or_else(|| "--".into());
            lines.push(Line::from(vec![
                Span::styled(format!("{:<12} ", record.date.to_string()), theme::text()),
                Span::styled(format!("{:<8} ", record.symbol), theme::text()),
                Span::styled(
                    format!("{:<9} ", record.bias.label()),
                    theme::bias_style(&record.bias),
                ),
                Span::styled(format!("{close:>10} "), theme::text()),
                Span::styled(
                    if record.hit { "   HIT" } else { "  MISS" },
                    theme::hit_style(record.hit),
                ),
            ]));
        }
    }

    // Latest published summary.
    match &snapshot.summaries {
        SectionState::Ready(summaries) => {
            if let Some(summary) = summaries.first() {
                lines.push(Line::from(""));
                lines.push(Line::from(vec![
                    Span::styled("Summary ", theme::accent_bold()),
                    Span::styled(
                        format!("{} {} ", summary.date, summary.symbol),
                        theme::muted(),
                    ),
                    Span::styled(summary.bias.label(), theme::bias_style(&summary.bias)),
                ]));
                lines.push(Line::from(vec![
                    Span::styled("  support ", theme::muted()),
                    Span::styled(join_levels(&summary.support_levels), theme::positive()),
                    Span::styled("  resistance ", theme::muted()),
                    Span::styled(join_levels(&summary.resistance_levels), theme::negative()),
                    Span::styled("  straddle ", theme::muted()),
                    Span::styled(
                        summary
                            .atm_straddle
                            .map(|s| format!("{s:.1}"))
                            .unwrap_or_else(|| "--".into()),
                        theme::neutral(),
                    ),
                ]));
                if !summary.notes.is_empty() {
                    lines.push(Line::from(Span::styled(
                        format!("  {}", summary.notes),
                        theme::muted(),
                    )));
                }
            }
        }
        other => {
            if let Some(placeholder) = section_placeholder(other) {
                lines.extend(placeholder);
            }
        }
    }

    f.render_widget(Paragraph::new(lines), area);
}

fn join_levels(levels: &[f64]) -> String {
    if levels.is_empty() {
        return "--".into();
    }
    levels
        .iter()
        .map(|l| format!("{l:.1}"))
        .collect::<Vec<_>>()
        .join("/")
}
