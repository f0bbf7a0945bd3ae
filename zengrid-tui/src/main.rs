//! ZenGrid TUI — seven-panel terminal dashboard.
//!
//! Panels:
//! 1. Live — live forecast accuracy, latest closes, published summary
//! 2. Backtest — rolling accuracy trend vs. the target line
//! 3. Bias — per-bias breakdown with proportion bars
//! 4. News — news-source impact ranking
//! 5. Corpus — learning-corpus readiness
//! 6. Status — system checklist, source states, provenance
//! 7. Help — keyboard shortcuts

mod app;
mod input;
mod persistence;
mod theme;
mod ui;
mod worker;

use std::io::{self, stdout};
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use zengrid_runner::SectionState;

use crate::app::{AppState, ErrorCategory};
use crate::worker::{spawn_worker, WorkerCommand, WorkerContext, WorkerResponse};

#[derive(Parser)]
#[command(
    name = "zengrid-tui",
    about = "ZenGrid — trading-forecast performance dashboard"
)]
struct Cli {
    /// TOML secrets file with a [snowflake] table. Defaults to
    /// ~/.config/zengrid/secrets.toml when that file exists.
    #[arg(long)]
    secrets: Option<PathBuf>,

    /// Directory holding the exported artifact files.
    #[arg(long, default_value = "artifacts")]
    artifacts: PathBuf,

    /// Run on generated demo data (no warehouse, no artifact files).
    #[arg(long, default_value_t = false)]
    demo: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Install a panic hook that restores the terminal before printing.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    let config_dir = dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("zengrid");
    let state_path = config_dir.join("state.json");

    let secrets_path = if cli.demo {
        None
    } else {
        cli.secrets.or_else(|| {
            let default = config_dir.join("secrets.toml");
            default.exists().then_some(default)
        })
    };

    let ctx = WorkerContext {
        secrets_path,
        artifact_dir: cli.artifacts,
        demo: cli.demo,
    };

    // Worker channels. The worker also gets a clone of its own command
    // sender so the auto-refresh timer can enqueue refreshes.
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (resp_tx, resp_rx) = mpsc::channel();
    let worker_handle = spawn_worker(ctx, cmd_rx, resp_tx, cmd_tx.clone());

    let mut app = AppState::new(cmd_tx.clone(), resp_rx, state_path.clone(), cli.demo);
    persistence::apply(&mut app, persistence::load(&state_path));

    if app.auto_refresh {
        let _ = cmd_tx.send(WorkerCommand::SetAutoRefresh(Some(Duration::from_secs(
            app.refresh_interval_secs,
        ))));
    }
    app.request_refresh();

    // Setup terminal.
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    // Save UI preferences before exit.
    let _ = persistence::save(&state_path, &persistence::extract(&app));

    // Shutdown worker.
    let _ = cmd_tx.send(WorkerCommand::Shutdown);
    let _ = worker_handle.join();

    // Restore terminal.
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        // 1. Render.
        terminal.draw(|f| ui::draw(f, app))?;

        // 2. Drain worker responses (non-blocking).
        while let Ok(resp) = app.worker_rx.try_recv() {
            handle_worker_response(app, resp);
        }

        // 3. Poll for input events (50ms timeout for ~20 FPS tick).
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key);
            }
        }

        // 4. Check quit.
        if !app.running {
            break;
        }
    }
    Ok(())
}

fn handle_worker_response(app: &mut AppState, resp: WorkerResponse) {
    match resp {
        WorkerResponse::Snapshot(snapshot) => {
            app.refreshing = false;

            let failed = [
                section_failed(&snapshot.live),
                section_failed(&snapshot.market),
                section_failed(&snapshot.summaries),
                section_failed(&snapshot.backtest),
                section_failed(&snapshot.bias),
                section_failed(&snapshot.news),
                section_failed(&snapshot.corpus),
            ]
            .iter()
            .filter(|f| **f)
            .count();

            let stamp = snapshot.refreshed_at.format("%H:%M:%S");
            if failed == 0 {
                app.set_status(format!("refreshed {stamp}"));
            } else {
                app.set_warning(format!("refreshed {stamp} — {failed} section(s) failed"));
            }
            app.snapshot = Some(*snapshot);
        }
        WorkerResponse::Error {
            category,
            message,
            context,
        } => {
            app.push_error(ErrorCategory::from_str(&category), message, context);
        }
    }
}

fn section_failed<T>(section: &SectionState<T>) -> bool {
    matches!(section, SectionState::Failed(_))
}
