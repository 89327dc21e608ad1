use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use crate::config::Config;
use crate::stats::Stats;
use crate::ui::window::WindowWidgets;

/// Events sent from the check worker to the GTK main thread. Every
/// event carries the generation of the run that produced it; events
/// from a cancelled run are dropped on arrival.
#[derive(Debug, Clone)]
pub enum BackendEvent {
    /// One adapted HTML fragment, ready to append to the output.
    Fragment { generation: u64, html: String },
    /// 1-based count of input chars scanned so far.
    Progress { generation: u64, chars_done: usize },
    /// The run aborted; no further events will follow.
    CheckFailed { generation: u64, error: String },
    /// The scan completed, trailing fragment included.
    CheckFinished { generation: u64 },
}

/// Application status.
#[derive(Debug, Clone, PartialEq)]
pub enum AppStatus {
    Idle,
    Checking,
}

/// Central application state. Lives on the GTK main thread inside Rc<RefCell<>>.
pub struct AppState {
    pub status: AppStatus,
    pub config: Config,
    pub stats: Stats,
    pub tokio_rt: tokio::runtime::Runtime,
    pub backend_sender: async_channel::Sender<BackendEvent>,

    // Check-run state
    pub generation: u64,
    pub cancel_flag: Option<Arc<AtomicBool>>,
    pub total_chars: usize,
    /// Adapted HTML accumulated this run; source of truth for save,
    /// copy, and history.
    pub output_html: String,
    /// Pango rendering of `output_html`, what the label shows.
    pub output_pango: String,

    // UI handles
    pub window: Option<WindowWidgets>,
}

impl AppState {
    pub fn new(sender: async_channel::Sender<BackendEvent>) -> Self {
        let config = Config::load();
        let stats = Stats::load();
        let tokio_rt = tokio::runtime::Runtime::new()
            .expect("Failed to create tokio runtime");

        Self {
            status: AppStatus::Idle,
            config,
            stats,
            tokio_rt,
            backend_sender: sender,
            generation: 0,
            cancel_flag: None,
            total_chars: 0,
            output_html: String::new(),
            output_pango: String::new(),
            window: None,
        }
    }
}

/// Helper to update status and the header subtitle together.
pub fn update_status(
    state: &std::rc::Rc<std::cell::RefCell<AppState>>,
    status: AppStatus,
    subtitle: &str,
) {
    let mut s = state.borrow_mut();
    s.status = status;
    if let Some(ref win) = s.window {
        win.window_title.set_subtitle(subtitle);
    }
}
