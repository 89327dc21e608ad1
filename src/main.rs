mod app;
mod clipboard;
mod config;
mod markup;
mod segmenter;
mod speller;
mod stats;
mod ui;
mod wm;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gtk4::prelude::*;

use app::{AppState, BackendEvent};
use ui::window::{show_toast, WINDOW_TITLE};

fn main() {
    env_logger::init();
    log::info!("Speller Pad starting");

    let application = libadwaita::Application::builder()
        .application_id("com.github.spellerpad.speller-pad")
        .build();

    application.connect_activate(on_activate);
    application.run();
}

fn on_activate(app: &libadwaita::Application) {
    // Async channel for worker → UI communication
    let (backend_tx, backend_rx) = async_channel::unbounded::<BackendEvent>();

    let state = Rc::new(RefCell::new(AppState::new(backend_tx)));

    let widgets = ui::window::build_window(app, state.borrow().config.keep_on_top);

    // Wire up the Check button
    {
        let state_clone = state.clone();
        widgets.check_button.connect_clicked(move |_| {
            app::start_check(&state_clone);
        });
    }

    // Wire up the Clear button
    {
        let state_clone = state.clone();
        widgets.clear_button.connect_clicked(move |_| {
            app::clear_all(&state_clone);
        });
    }

    // Wire up file load/save
    {
        let state_clone = state.clone();
        widgets.load_button.connect_clicked(move |_| {
            app::open_file(&state_clone);
        });
    }
    {
        let state_clone = state.clone();
        widgets.save_button.connect_clicked(move |_| {
            app::save_file(&state_clone);
        });
    }

    // Wire up the Copy button
    {
        let state_clone = state.clone();
        widgets.copy_button.connect_clicked(move |_| {
            let s = state_clone.borrow();
            let Some(ref win) = s.window else { return };
            let plain = markup::to_plain(&s.output_html);
            if plain.is_empty() {
                show_toast(win, "Nothing to copy yet");
                return;
            }
            match clipboard::copy_to_clipboard(&plain) {
                Ok(()) => show_toast(win, "Checked text copied"),
                Err(e) => {
                    log::error!("Clipboard error: {e}");
                    show_toast(win, &format!("Clipboard error: {e}"));
                }
            }
        });
    }

    // Wire up the keep-on-top toggle
    if wm::is_wayland_session() {
        widgets.pin_button.set_sensitive(false);
        widgets
            .pin_button
            .set_tooltip_text(Some("Keep on top requires an X11 session"));
    } else {
        let state_clone = state.clone();
        let reverting = Rc::new(Cell::new(false));
        widgets.pin_button.connect_toggled(move |btn| {
            if reverting.get() {
                return;
            }
            let on = btn.is_active();
            match wm::set_keep_above(WINDOW_TITLE, on) {
                Ok(()) => {
                    let mut s = state_clone.borrow_mut();
                    s.config.keep_on_top = on;
                    if let Err(e) = s.config.save() {
                        log::warn!("Failed to save config: {e}");
                    }
                }
                Err(e) => {
                    log::warn!("Keep-on-top failed: {e}");
                    let s = state_clone.borrow();
                    if let Some(ref win) = s.window {
                        show_toast(win, &format!("Keep on top failed: {e}"));
                    }
                    drop(s);
                    reverting.set(true);
                    btn.set_active(!on);
                    reverting.set(false);
                }
            }
        });
    }

    // Wire up the History button
    {
        let state_clone = state.clone();
        widgets.history_button.connect_clicked(move |_| {
            let s = state_clone.borrow();
            if let Some(ref win) = s.window {
                ui::history::show_history_window(&win.window, &s.stats);
            }
        });
    }

    // Store UI handles in state and show the window
    state.borrow_mut().window = Some(widgets);
    state.borrow().window.as_ref().unwrap().window.present();

    // Attach the worker event handler
    {
        let state_clone = state.clone();
        gtk4::glib::spawn_future_local(async move {
            while let Ok(event) = backend_rx.recv().await {
                app::handle_backend_event(&state_clone, event);
            }
        });
    }

    // Re-apply a persisted keep-on-top preference once the window maps
    if state.borrow().config.keep_on_top && !wm::is_wayland_session() {
        gtk4::glib::timeout_add_local_once(
            std::time::Duration::from_millis(300),
            move || {
                if let Err(e) = wm::set_keep_above(WINDOW_TITLE, true) {
                    log::warn!("Keep-on-top failed at startup: {e}");
                }
            },
        );
    }
}
