use std::cell::RefCell;
use std::fs;
use std::rc::Rc;

use gtk4::gio;
use gtk4::prelude::*;

use super::check::clear_all;
use super::state::AppState;
use crate::markup;
use crate::ui::window::show_toast;

/// Pick a text file and load it into the input view, replacing the
/// current session.
pub fn open_file(state: &Rc<RefCell<AppState>>) {
    let Some(window) = parent_window(state) else { return };

    let dialog = gtk4::FileDialog::builder().title("Open Text File").build();
    dialog.set_filters(Some(&text_filters()));

    let state_clone = state.clone();
    dialog.open(Some(&window), gio::Cancellable::NONE, move |result| {
        let file = match result {
            Ok(file) => file,
            Err(e) => {
                log::debug!("Open dialog dismissed: {e}");
                return;
            }
        };
        let Some(path) = file.path() else { return };

        match fs::read_to_string(&path) {
            Ok(text) => {
                clear_all(&state_clone);
                let s = state_clone.borrow();
                if let Some(ref win) = s.window {
                    win.input_view.buffer().set_text(&text);
                }
                log::info!("Loaded {}", path.display());
            }
            Err(e) => {
                log::error!("Failed to read {}: {e}", path.display());
                if let Some(ref win) = state_clone.borrow().window {
                    show_toast(win, &format!("Failed to open file: {e}"));
                }
            }
        }
    });
}

/// Save the checked text (markup stripped) to a file.
pub fn save_file(state: &Rc<RefCell<AppState>>) {
    let Some(window) = parent_window(state) else { return };

    let plain = markup::to_plain(&state.borrow().output_html);
    if plain.is_empty() {
        if let Some(ref win) = state.borrow().window {
            show_toast(win, "Nothing to save yet");
        }
        return;
    }

    let dialog = gtk4::FileDialog::builder()
        .title("Save Checked Text")
        .initial_name("checked.txt")
        .build();
    dialog.set_filters(Some(&text_filters()));

    let state_clone = state.clone();
    dialog.save(Some(&window), gio::Cancellable::NONE, move |result| {
        let file = match result {
            Ok(file) => file,
            Err(e) => {
                log::debug!("Save dialog dismissed: {e}");
                return;
            }
        };
        let Some(path) = file.path() else { return };

        let message = match fs::write(&path, &plain) {
            Ok(()) => {
                log::info!("Saved {}", path.display());
                format!("Saved to {}", path.display())
            }
            Err(e) => {
                log::error!("Failed to write {}: {e}", path.display());
                format!("Failed to save: {e}")
            }
        };
        if let Some(ref win) = state_clone.borrow().window {
            show_toast(win, &message);
        }
    });
}

fn parent_window(state: &Rc<RefCell<AppState>>) -> Option<libadwaita::ApplicationWindow> {
    state.borrow().window.as_ref().map(|w| w.window.clone())
}

fn text_filters() -> gio::ListStore {
    let txt = gtk4::FileFilter::new();
    txt.set_name(Some("Text files"));
    txt.add_pattern("*.txt");

    let all = gtk4::FileFilter::new();
    all.set_name(Some("All files"));
    all.add_pattern("*");

    let store = gio::ListStore::new::<gtk4::FileFilter>();
    store.append(&txt);
    store.append(&all);
    store
}
