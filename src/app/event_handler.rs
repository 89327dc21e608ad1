use std::cell::RefCell;
use std::rc::Rc;

use gtk4::prelude::*;

use super::state::{AppState, AppStatus, BackendEvent, update_status};
use crate::markup;
use crate::ui::window::show_toast;

/// Handle a worker event on the GTK main thread. This is the only
/// place display state is mutated during a run.
pub fn handle_backend_event(state: &Rc<RefCell<AppState>>, event: BackendEvent) {
    let generation = event_generation(&event);
    if generation != state.borrow().generation {
        log::debug!("Dropping stale event from check {generation}");
        return;
    }

    match event {
        BackendEvent::Fragment { html, .. } => {
            let mut s = state.borrow_mut();
            s.output_html.push_str(&html);
            s.output_pango.push_str(&markup::to_pango(&html));
            if let Some(ref win) = s.window {
                win.output_label.set_markup(&s.output_pango);
            }
        }
        BackendEvent::Progress { chars_done, .. } => {
            let total = state.borrow().total_chars;
            {
                let s = state.borrow();
                if let Some(ref win) = s.window {
                    if total > 0 {
                        win.progress_bar.set_fraction(chars_done as f64 / total as f64);
                    }
                    win.progress_bar.set_text(Some(&format!("{chars_done} / {total}")));
                }
            }
            // The output unlocks exactly when the last char is scanned;
            // a trailing unterminated fragment may still arrive after.
            if chars_done == total {
                if let Some(ref win) = state.borrow().window {
                    win.output_label.set_sensitive(true);
                }
                update_status(state, AppStatus::Idle, "Idle");
            }
        }
        BackendEvent::CheckFailed { error, .. } => {
            log::error!("Check failed: {error}");
            {
                let mut s = state.borrow_mut();
                s.cancel_flag = None;
                if let Some(ref win) = s.window {
                    win.output_label.set_sensitive(true);
                    show_toast(win, &format!("Check failed: {error}"));
                }
            }
            update_status(state, AppStatus::Idle, "Check failed");
        }
        BackendEvent::CheckFinished { generation } => {
            log::info!("Check {generation} finished");
            on_check_finished(state);
        }
    }
}

fn event_generation(event: &BackendEvent) -> u64 {
    match event {
        BackendEvent::Fragment { generation, .. }
        | BackendEvent::Progress { generation, .. }
        | BackendEvent::CheckFailed { generation, .. }
        | BackendEvent::CheckFinished { generation } => *generation,
    }
}

/// Finalize a run once the trailing fragment is in: record history and
/// refresh the persisted totals.
fn on_check_finished(state: &Rc<RefCell<AppState>>) {
    let mut s = state.borrow_mut();
    s.cancel_flag = None;

    let plain = markup::to_plain(&s.output_html);
    let chars = s.total_chars;
    s.stats.record_check(chars, &plain);
    if let Err(e) = s.stats.save() {
        log::warn!("Failed to save stats: {e}");
    }

    if let Some(ref win) = s.window {
        show_toast(win, "Check complete");
    }
}
