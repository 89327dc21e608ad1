use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use gtk4::prelude::*;

use super::state::{AppState, AppStatus, BackendEvent, update_status};
use crate::segmenter::{self, ScanEvent};
use crate::speller::{SpellClient, SpellError};

/// Start a check run over the current input text.
///
/// A run already in flight is cancelled and replaced: its flag is set,
/// the generation counter bumps, and its remaining events are dropped
/// by the handler.
pub fn start_check(state: &Rc<RefCell<AppState>>) {
    let text = {
        let s = state.borrow();
        let Some(ref win) = s.window else { return };
        let buffer = win.input_view.buffer();
        buffer
            .text(&buffer.start_iter(), &buffer.end_iter(), false)
            .to_string()
    };

    if text.trim().is_empty() {
        update_status(state, AppStatus::Idle, "Nothing to check");
        return;
    }

    let cancel = Arc::new(AtomicBool::new(false));
    let (generation, client, sender) = {
        let mut s = state.borrow_mut();
        if s.status == AppStatus::Checking {
            log::info!("Check already in flight, restarting");
        }
        if let Some(flag) = s.cancel_flag.take() {
            flag.store(true, Ordering::Relaxed);
        }
        s.generation += 1;
        s.cancel_flag = Some(cancel.clone());
        s.total_chars = text.chars().count();
        s.output_html.clear();
        s.output_pango.clear();
        s.status = AppStatus::Checking;

        if let Some(ref win) = s.window {
            win.output_label.set_markup("");
            win.output_label.set_sensitive(false);
            win.progress_bar.set_fraction(0.0);
            win.progress_bar.set_text(Some(&format!("0 / {}", s.total_chars)));
            win.window_title.set_subtitle("Checking\u{2026}");
        }

        (s.generation, SpellClient::new(&s.config), s.backend_sender.clone())
    };

    log::info!("Check {generation} started: {} chars", text.chars().count());

    state.borrow().tokio_rt.spawn(run_check(client, text, generation, cancel, sender));
}

/// Cancel the run in flight, if any. Stale events are dropped because
/// the generation moves past them.
pub fn cancel_check(state: &Rc<RefCell<AppState>>) {
    let mut s = state.borrow_mut();
    if let Some(flag) = s.cancel_flag.take() {
        log::info!("Cancelling check {}", s.generation);
        flag.store(true, Ordering::Relaxed);
        s.generation += 1;
        s.status = AppStatus::Idle;
    }
}

/// Reset both views and abandon any run in flight.
pub fn clear_all(state: &Rc<RefCell<AppState>>) {
    cancel_check(state);
    let mut s = state.borrow_mut();
    s.output_html.clear();
    s.output_pango.clear();
    s.total_chars = 0;
    s.status = AppStatus::Idle;
    if let Some(ref win) = s.window {
        win.input_view.buffer().set_text("");
        win.output_label.set_markup("");
        win.output_label.set_sensitive(true);
        win.progress_bar.set_fraction(0.0);
        win.progress_bar.set_text(None);
        win.window_title.set_subtitle("Idle");
    }
}

/// The worker: scan the input, dispatch each sentence to the speller,
/// and stream fragments and progress back in scan order.
async fn run_check(
    client: SpellClient,
    text: String,
    generation: u64,
    cancel: Arc<AtomicBool>,
    sender: async_channel::Sender<BackendEvent>,
) {
    for ev in segmenter::scan(&text) {
        if cancel.load(Ordering::Relaxed) {
            log::debug!("Check {generation} cancelled mid-scan");
            return;
        }
        match ev {
            ScanEvent::Sentence(segment) => {
                match client.check(&segment, &cancel).await {
                    Ok(html) => {
                        let _ = sender
                            .send(BackendEvent::Fragment {
                                generation,
                                html: format!("{html} "),
                            })
                            .await;
                    }
                    Err(SpellError::Cancelled) => return,
                    Err(e) => {
                        let _ = sender
                            .send(BackendEvent::CheckFailed {
                                generation,
                                error: e.to_string(),
                            })
                            .await;
                        return;
                    }
                }
            }
            ScanEvent::LineBreak(_) => {
                let _ = sender
                    .send(BackendEvent::Fragment {
                        generation,
                        html: "<br>".into(),
                    })
                    .await;
            }
            ScanEvent::Progress(chars_done) => {
                let _ = sender
                    .send(BackendEvent::Progress { generation, chars_done })
                    .await;
            }
        }
    }

    let _ = sender.send(BackendEvent::CheckFinished { generation }).await;
}
