//! Panel 4 — News: source ranking table plus an impact-score bar chart.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Bar, BarChart, BarGroup, Paragraph};
use ratatui::Frame;

use zengrid_runner::SectionState;

use crate::app::AppState;
use crate::theme;
use crate::ui::{section_placeholder, waiting_lines};

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let Some(snapshot) = &app.snapshot else {
        f.render_widget(Paragraph::new(waiting_lines()), area);
        return;
    };

    let ranking = match &snapshot.news {
        SectionState::Ready(ranking) => ranking,
        other => {
            if let Some(placeholder) = section_placeholder(other) {
                f.render_widget(Paragraph::new(placeholder), area);
            }
            return;
        }
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(8)])
        .split(area);

    let mut lines: Vec<Line> = Vec::new();
    let generated = ranking
        .generated_at
        .map(|ts| ts.to_string())
        .unwrap_or_else(|| "unknown".into());
    lines.push(Line::from(vec![
        Span::styled(
            format!(
                "{}/{} sources ok, generated ",
                ranking.success_count, ranking.feed_count
            ),
            theme::muted(),
        ),
        Span::styled(generated, theme::accent()),
    ]));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!(
            "{:>3} {:<16} {:>7} {:>12} {:>9}",
            "#", "Source", "Impact", "High-impact", "Articles"
        ),
        theme::accent_bold(),
    )));

    for (i, feed) in ranking.top.iter().enumerate().skip(app.news_scroll) {
        lines.push(Line::from(vec![
            Span::styled(format!("{:>3} ", i + 1), theme::muted()),
            Span::styled(format!("{:<16} ", truncate(&feed.name, 16)), theme::text()),
            Span::styled(
                format!("{:>7.1} ", feed.avg_impact_score),
                impact_style(feed.avg_impact_score),
            ),
            Span::styled(format!("{:>12} ", feed.high_impact_articles), theme::text()),
            Span::styled(format!("{:>9}", feed.total_articles), theme::text()),
        ]));
    }
    f.render_widget(Paragraph::new(lines), chunks[0]);

    // Impact bar chart over the ranked sources.
    let bars: Vec<Bar> = ranking
        .top
        .iter()
        .map(|feed| {
            Bar::default()
                .label(Line::from(truncate(&feed.name, 8)))
                .value((feed.avg_impact_score * 10.0).round() as u64)
                .text_value(format!("{:.1}", feed.avg_impact_score))
                .style(impact_style(feed.avg_impact_score))
        })
        .collect();

    let chart = BarChart::default()
        .data(BarGroup::default().bars(&bars))
        .bar_width(9)
        .bar_gap(1)
        .max(100);

    f.render_widget(chart, chunks[1]);
}

fn impact_style(score: f64) -> ratatui::style::Style {
    match score {
        s if s >= 7.0 => theme::negative(),
        s if s >= 5.0 => theme::warning(),
        s if s >= 3.0 => theme::accent(),
        _ => theme::muted(),
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        format!("{}.", &s[..max - 1])
    }
}
