//! Application state — single-owner, main-thread only.
//!
//! All TUI state lives here. The worker thread communicates via channels;
//! the snapshot it sends back is the only data the panels render.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::mpsc::{Receiver, Sender};
use std::time::Duration;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use zengrid_runner::DashboardSnapshot;

use crate::worker::{WorkerCommand, WorkerResponse};

/// Default auto-refresh interval.
pub const DEFAULT_REFRESH_SECS: u64 = 60;

/// Cap on the error history kept for the overlay.
const ERROR_HISTORY_CAP: usize = 100;

/// Which panel is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Panel {
    Live,
    Backtest,
    Bias,
    News,
    Corpus,
    Status,
    Help,
}

impl Panel {
    pub const COUNT: usize = 7;

    pub fn index(self) -> usize {
        match self {
            Panel::Live => 0,
            Panel::Backtest => 1,
            Panel::Bias => 2,
            Panel::News => 3,
            Panel::Corpus => 4,
            Panel::Status => 5,
            Panel::Help => 6,
        }
    }

    pub fn from_index(i: usize) -> Option<Self> {
        match i {
            0 => Some(Panel::Live),
            1 => Some(Panel::Backtest),
            2 => Some(Panel::Bias),
            3 => Some(Panel::News),
            4 => Some(Panel::Corpus),
            5 => Some(Panel::Status),
            6 => Some(Panel::Help),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Panel::Live => "Live",
            Panel::Backtest => "Backtest",
            Panel::Bias => "Bias",
            Panel::News => "News",
            Panel::Corpus => "Corpus",
            Panel::Status => "Status",
            Panel::Help => "Help",
        }
    }

    pub fn next(self) -> Panel {
        Panel::from_index((self.index() + 1) % Self::COUNT).unwrap()
    }

    pub fn prev(self) -> Panel {
        Panel::from_index((self.index() + Self::COUNT - 1) % Self::COUNT).unwrap()
    }
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// Error category for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Warehouse,
    Artifact,
    Config,
    Other,
}

impl ErrorCategory {
    pub fn label(self) -> &'static str {
        match self {
            ErrorCategory::Warehouse => "WH",
            ErrorCategory::Artifact => "FILE",
            ErrorCategory::Config => "CFG",
            ErrorCategory::Other => "ERR",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "warehouse" => ErrorCategory::Warehouse,
            "artifact" => ErrorCategory::Artifact,
            "config" => ErrorCategory::Config,
            _ => ErrorCategory::Other,
        }
    }
}

/// An error record for the error history overlay.
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub timestamp: NaiveDateTime,
    pub category: ErrorCategory,
    pub message: String,
    pub context: String,
}

/// Active overlay, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    Welcome,
    ErrorHistory,
    None,
}

/// Top-level TUI state.
pub struct AppState {
    pub running: bool,
    pub active_panel: Panel,
    pub overlay: Overlay,

    pub snapshot: Option<DashboardSnapshot>,
    pub refreshing: bool,
    pub auto_refresh: bool,
    pub refresh_interval_secs: u64,

    pub status_message: Option<(String, StatusLevel)>,
    pub error_history: VecDeque<ErrorRecord>,
    pub error_scroll: usize,

    pub live_scroll: usize,
    pub news_scroll: usize,

    pub worker_tx: Sender<WorkerCommand>,
    pub worker_rx: Receiver<WorkerResponse>,
    pub state_path: PathBuf,
    pub demo: bool,
}

impl AppState {
    pub fn new(
        worker_tx: Sender<WorkerCommand>,
        worker_rx: Receiver<WorkerResponse>,
        state_path: PathBuf,
        demo: bool,
    ) -> Self {
        Self {
            running: true,
            active_panel: Panel::Live,
            overlay: Overlay::None,
            snapshot: None,
            refreshing: false,
            auto_refresh: false,
            refresh_interval_secs: DEFAULT_REFRESH_SECS,
            status_message: None,
            error_history: VecDeque::new(),
            error_scroll: 0,
            live_scroll: 0,
            news_scroll: 0,
            worker_tx,
            worker_rx,
            state_path,
            demo,
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some((message.into(), StatusLevel::Info));
    }

    pub fn set_warning(&mut self, message: impl Into<String>) {
        self.status_message = Some((message.into(), StatusLevel::Warning));
    }

    pub fn push_error(
        &mut self,
        category: ErrorCategory,
        message: impl Into<String>,
        context: impl Into<String>,
    ) {
        let message = message.into();
        self.status_message = Some((message.clone(), StatusLevel::Error));
        self.error_history.push_front(ErrorRecord {
            timestamp: chrono::Local::now().naive_local(),
            category,
            message,
            context: context.into(),
        });
        self.error_history.truncate(ERROR_HISTORY_CAP);
    }

    /// Kick off a refresh pass on the worker.
    pub fn request_refresh(&mut self) {
        if self.refreshing {
            return;
        }
        self.refreshing = true;
        self.set_status("refreshing...");
        let _ = self.worker_tx.send(WorkerCommand::Refresh);
    }

    /// Flip auto-refresh and tell the worker to start or stop its timer.
    pub fn toggle_auto_refresh(&mut self) {
        self.auto_refresh = !self.auto_refresh;
        let interval = if self.auto_refresh {
            Some(Duration::from_secs(self.refresh_interval_secs))
        } else {
            None
        };
        let _ = self.worker_tx.send(WorkerCommand::SetAutoRefresh(interval));
        if self.auto_refresh {
            self.set_status(format!(
                "auto-refresh on ({}s)",
                self.refresh_interval_secs
            ));
        } else {
            self.set_status("auto-refresh off");
        }
    }
}
