//! Panel 2 — Backtest: rolling accuracy line chart with the target
//! reference line, plus the overall accuracy for the loaded export.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Chart, Dataset, GraphType, Paragraph};
use ratatui::Frame;

use zengrid_runner::{BacktestTrend, SectionState, ROLLING_WINDOW};

use crate::app::AppState;
use crate::theme;
use crate::ui::{section_placeholder, waiting_lines};

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let Some(snapshot) = &app.snapshot else {
        f.render_widget(Paragraph::new(waiting_lines()), area);
        return;
    };

    match &snapshot.backtest {
        SectionState::Ready(trend) => render_trend(f, area, trend),
        other => {
            if let Some(placeholder) = section_placeholder(other) {
                f.render_widget(Paragraph::new(placeholder), area);
            }
        }
    }
}

fn render_trend(f: &mut Frame, area: Rect, trend: &BacktestTrend) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(4)])
        .split(area);

    // Header: overall stats plus provenance.
    let header = vec![
        Line::from(vec![
            Span::styled("Overall ", theme::muted()),
            Span::styled(
                format!("{:.1}%", trend.stats.accuracy_pct),
                theme::accuracy_style(trend.stats.accuracy_pct),
            ),
            Span::styled(
                format!(
                    "  ({} hits / {} records, {}-period rolling)",
                    trend.stats.hits, trend.stats.total, ROLLING_WINDOW
                ),
                theme::muted(),
            ),
        ]),
        Line::from(Span::styled(
            format!("source: {}", trend.source_file),
            theme::muted(),
        )),
    ];
    f.render_widget(Paragraph::new(header), chunks[0]);

    // Defined rolling points as (index, pct).
    let rolling: Vec<(f64, f64)> = trend
        .rolling_pct
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.map(|pct| (i as f64, pct)))
        .collect();

    if rolling.is_empty() {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                format!(
                    "Not enough records for the rolling window ({} of {} needed).",
                    trend.rolling_pct.len(),
                    ROLLING_WINDOW
                ),
                theme::muted(),
            )),
        ];
        f.render_widget(Paragraph::new(lines), chunks[1]);
        return;
    }

    let x_max = (trend.rolling_pct.len().saturating_sub(1)) as f64;
    let target: Vec<(f64, f64)> = vec![(0.0, trend.target_pct), (x_max.max(1.0), trend.target_pct)];

    let datasets = vec![
        Dataset::default()
            .name("rolling accuracy")
            .marker(symbols::Marker::Braille)
            .style(Style::default().fg(theme::ACCENT))
            .graph_type(GraphType::Line)
            .data(&rolling),
        Dataset::default()
            .name(format!("target {:.0}%", trend.target_pct))
            .marker(symbols::Marker::Dot)
            .style(Style::default().fg(theme::WARNING))
            .graph_type(GraphType::Line)
            .data(&target),
    ];

    let first_date = trend.dates.first().map(|d| d.to_string()).unwrap_or_default();
    let last_date = trend.dates.last().map(|d| d.to_string()).unwrap_or_default();

    let chart = Chart::new(datasets)
        .x_axis(
            Axis::default()
                .title(Span::styled("Date", theme::muted()))
                .style(theme::muted())
                .bounds([0.0, x_max.max(1.0)])
                .labels(vec![
                    Span::styled(first_date, theme::muted()),
                    Span::styled(last_date, theme::muted()),
                ]),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled("Accuracy %", theme::muted()))
                .style(theme::muted())
                .bounds([0.0, 100.0])
                .labels(vec![
                    Span::styled("0", theme::muted()),
                    Span::styled("50", theme::muted()),
                    Span::styled("100", theme::muted()),
                ]),
        );

    f.render_widget(chart, chunks[1]);
}
