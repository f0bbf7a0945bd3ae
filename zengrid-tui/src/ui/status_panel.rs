//! Panel 6 — Status: system-readiness checklist, per-source states, and
//! snapshot provenance.

use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use zengrid_runner::{DashboardSnapshot, SectionState};

use crate::app::AppState;
use crate::theme;
use crate::ui::waiting_lines;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let Some(snapshot) = &app.snapshot else {
        f.render_widget(Paragraph::new(waiting_lines()), area);
        return;
    };

    let mut lines: Vec<Line> = Vec::new();

    // Readiness checklist.
    let readiness = &snapshot.readiness;
    let headline = if readiness.all_ready() {
        Span::styled(
            "ALL SYSTEMS READY",
            theme::positive().add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(
            format!("{}/4 CHECKS MET", readiness.met_count()),
            theme::warning().add_modifier(Modifier::BOLD),
        )
    };
    lines.push(Line::from(headline));
    lines.push(Line::from(""));

    for (label, ok) in readiness.checks() {
        lines.push(Line::from(vec![
            Span::styled(if ok { "  [x] " } else { "  [ ] " }, theme::check_style(ok)),
            Span::styled(label, theme::text()),
        ]));
    }

    // Per-source states.
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Sources", theme::accent_bold())));
    push_source_line(&mut lines, "forecast postmortem", &snapshot.live, |live| {
        format!("{} rows", live.stats.total)
    });
    push_source_line(&mut lines, "daily market data", &snapshot.market, |m| {
        format!("{} rows", m.len())
    });
    push_source_line(&mut lines, "forecast summaries", &snapshot.summaries, |s| {
        format!("{} rows", s.len())
    });
    push_source_line(&mut lines, "backtest results", &snapshot.backtest, |t| {
        format!("{} records ({})", t.stats.total, t.source_file)
    });
    push_source_line(&mut lines, "learning corpus", &snapshot.corpus, |c| {
        format!("{} entries", c.size)
    });
    push_source_line(&mut lines, "news analysis", &snapshot.news, |n| {
        format!("{}/{} sources ok", n.success_count, n.feed_count)
    });

    // Provenance footer.
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("refreshed ", theme::muted()),
        Span::styled(snapshot.refreshed_at.to_string(), theme::text()),
        Span::styled("   data ", theme::muted()),
        Span::styled(short_fingerprint(snapshot), theme::accent()),
    ]));
    lines.push(Line::from(vec![
        Span::styled("auto-refresh ", theme::muted()),
        if app.auto_refresh {
            Span::styled(
                format!("on ({}s)", app.refresh_interval_secs),
                theme::positive(),
            )
        } else {
            Span::styled("off", theme::muted())
        },
        Span::styled("   mode ", theme::muted()),
        if app.demo {
            Span::styled("demo", theme::warning())
        } else {
            Span::styled("live", theme::positive())
        },
    ]));

    f.render_widget(Paragraph::new(lines), area);
}

fn push_source_line<T>(
    lines: &mut Vec<Line>,
    label: &'static str,
    section: &SectionState<T>,
    describe: impl Fn(&T) -> String,
) {
    let (state_span, detail) = match section {
        SectionState::Ready(value) => (
            Span::styled("  ok    ", theme::positive()),
            Span::styled(describe(value), theme::muted()),
        ),
        SectionState::Empty { notice, .. } => (
            Span::styled("  empty ", theme::warning()),
            Span::styled(notice.clone(), theme::muted()),
        ),
        SectionState::Skipped(reason) => (
            Span::styled("  skip  ", theme::muted()),
            Span::styled(reason.clone(), theme::muted()),
        ),
        SectionState::Failed(message) => (
            Span::styled("  FAIL  ", theme::negative()),
            Span::styled(message.clone(), theme::negative()),
        ),
    };
    lines.push(Line::from(vec![
        state_span,
        Span::styled(format!("{label:<20} "), theme::text()),
        detail,
    ]));
}

fn short_fingerprint(snapshot: &DashboardSnapshot) -> String {
    snapshot.fingerprint.chars().take(16).collect()
}
