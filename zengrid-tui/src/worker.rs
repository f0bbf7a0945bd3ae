//! Background worker thread — every refresh pass runs here.
//!
//! The main thread stays responsive; the worker does the blocking work
//! (warehouse login, queries, artifact reads) and ships back a complete
//! snapshot. The auto-refresh timer also lives here: its ticks loop back
//! into the worker's own command channel, so a timer tick and a manual
//! refresh take exactly the same path.

use std::path::PathBuf;
use std::sync::mpsc::{Receiver, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use zengrid_core::warehouse::{SnowflakeClient, Warehouse, WarehouseConfig};
use zengrid_runner::{build_snapshot, demo_sources, load_sources, DashboardSnapshot, RefreshTimer};

/// Commands sent from the TUI (or the timer) to the worker.
#[derive(Debug)]
pub enum WorkerCommand {
    Refresh,
    SetAutoRefresh(Option<Duration>),
    Shutdown,
}

/// Responses sent from the worker back to the TUI.
#[derive(Debug)]
pub enum WorkerResponse {
    Snapshot(Box<DashboardSnapshot>),
    Error {
        category: String,
        message: String,
        context: String,
    },
}

/// Everything the worker needs to run a pass.
#[derive(Debug, Clone)]
pub struct WorkerContext {
    pub secrets_path: Option<PathBuf>,
    pub artifact_dir: PathBuf,
    pub demo: bool,
}

/// Spawn the background worker thread.
///
/// `self_tx` is a clone of the sender feeding `rx`; the auto-refresh timer
/// uses it to enqueue `Refresh` commands.
pub fn spawn_worker(
    ctx: WorkerContext,
    rx: Receiver<WorkerCommand>,
    tx: Sender<WorkerResponse>,
    self_tx: Sender<WorkerCommand>,
) -> JoinHandle<()> {
    thread::Builder::new()
        .name("zengrid-worker".into())
        .spawn(move || worker_loop(ctx, rx, tx, self_tx))
        .expect("failed to spawn worker thread")
}

fn worker_loop(
    ctx: WorkerContext,
    rx: Receiver<WorkerCommand>,
    tx: Sender<WorkerResponse>,
    self_tx: Sender<WorkerCommand>,
) {
    let mut timer: Option<RefreshTimer> = None;

    loop {
        match rx.recv() {
            Ok(WorkerCommand::Refresh) => run_refresh(&ctx, &tx),
            Ok(WorkerCommand::SetAutoRefresh(Some(interval))) => {
                let tick_tx = self_tx.clone();
                timer = Some(RefreshTimer::start(interval, move || {
                    let _ = tick_tx.send(WorkerCommand::Refresh);
                }));
            }
            Ok(WorkerCommand::SetAutoRefresh(None)) => {
                // Dropping the timer stops its thread.
                timer = None;
            }
            Ok(WorkerCommand::Shutdown) | Err(_) => break,
        }
    }
    drop(timer);
}

/// One full refresh pass: open a warehouse session, load every source,
/// build the snapshot, drop the session.
fn run_refresh(ctx: &WorkerContext, tx: &Sender<WorkerResponse>) {
    if ctx.demo {
        let snapshot = build_snapshot(&demo_sources());
        let _ = tx.send(WorkerResponse::Snapshot(Box::new(snapshot)));
        return;
    }

    let config = match &ctx.secrets_path {
        Some(path) => match WarehouseConfig::from_file(path) {
            Ok(config) => Some(config),
            Err(e) => {
                let _ = tx.send(WorkerResponse::Error {
                    category: "config".into(),
                    message: e.to_string(),
                    context: path.display().to_string(),
                });
                None
            }
        },
        None => None,
    };

    // The client lives exactly as long as this pass; Drop closes the
    // session on every exit path.
    let client = config.and_then(|config| match SnowflakeClient::connect(&config) {
        Ok(client) => Some(client),
        Err(e) => {
            let _ = tx.send(WorkerResponse::Error {
                category: "warehouse".into(),
                message: e.to_string(),
                context: "connect".into(),
            });
            None
        }
    });

    let warehouse = client.as_ref().map(|c| c as &dyn Warehouse);
    let sources = load_sources(warehouse, &ctx.artifact_dir);
    let snapshot = build_snapshot(&sources);
    let _ = tx.send(WorkerResponse::Snapshot(Box::new(snapshot)));
}
