use gtk4::prelude::*;
use libadwaita::prelude::*;

use crate::markup;

/// wmctrl matches the window by this exact title.
pub const WINDOW_TITLE: &str = "Speller Pad";

/// Handles returned from building the main window.
pub struct WindowWidgets {
    pub window: libadwaita::ApplicationWindow,
    pub window_title: libadwaita::WindowTitle,
    pub input_view: gtk4::TextView,
    pub output_label: gtk4::Label,
    pub progress_bar: gtk4::ProgressBar,
    pub check_button: gtk4::Button,
    pub clear_button: gtk4::Button,
    pub load_button: gtk4::Button,
    pub save_button: gtk4::Button,
    pub copy_button: gtk4::Button,
    pub history_button: gtk4::Button,
    pub pin_button: gtk4::ToggleButton,
    pub toast_overlay: libadwaita::ToastOverlay,
}

/// Raise a short-lived toast over the main window.
pub fn show_toast(widgets: &WindowWidgets, message: &str) {
    let toast = libadwaita::Toast::new(message);
    toast.set_timeout(2);
    widgets.toast_overlay.add_toast(toast);
}

/// Build the main window.
pub fn build_window(
    app: &libadwaita::Application,
    initial_on_top: bool,
) -> WindowWidgets {
    let window = libadwaita::ApplicationWindow::builder()
        .application(app)
        .title(WINDOW_TITLE)
        .default_width(760)
        .default_height(420)
        .build();

    let toolbar_view = libadwaita::ToolbarView::new();
    let header = libadwaita::HeaderBar::new();

    let window_title = libadwaita::WindowTitle::new(WINDOW_TITLE, "Idle");
    header.set_title_widget(Some(&window_title));

    let check_button = gtk4::Button::with_label("Check");
    check_button.add_css_class("suggested-action");
    header.pack_start(&check_button);

    let clear_button = gtk4::Button::with_label("Clear");
    header.pack_start(&clear_button);

    let load_button = gtk4::Button::from_icon_name("document-open-symbolic");
    load_button.set_tooltip_text(Some("Load a text file"));
    header.pack_start(&load_button);

    let pin_button = gtk4::ToggleButton::new();
    pin_button.set_icon_name("view-pin-symbolic");
    pin_button.set_active(initial_on_top);
    pin_button.set_tooltip_text(Some("Keep window on top"));
    header.pack_end(&pin_button);

    let history_button = gtk4::Button::from_icon_name("document-open-recent-symbolic");
    history_button.set_tooltip_text(Some("Check history"));
    header.pack_end(&history_button);

    let copy_button = gtk4::Button::from_icon_name("edit-copy-symbolic");
    copy_button.set_tooltip_text(Some("Copy checked text"));
    header.pack_end(&copy_button);

    let save_button = gtk4::Button::from_icon_name("document-save-symbolic");
    save_button.set_tooltip_text(Some("Save checked text"));
    header.pack_end(&save_button);

    toolbar_view.add_top_bar(&header);

    let content = gtk4::Box::new(gtk4::Orientation::Vertical, 12);
    content.set_margin_start(12);
    content.set_margin_end(12);
    content.set_margin_top(8);
    content.set_margin_bottom(8);

    // --- Input and output panes, side by side ---
    let panes = gtk4::Box::new(gtk4::Orientation::Horizontal, 12);
    panes.set_vexpand(true);
    panes.set_homogeneous(true);

    let input_view = gtk4::TextView::new();
    input_view.set_wrap_mode(gtk4::WrapMode::WordChar);
    input_view.set_top_margin(6);
    input_view.set_bottom_margin(6);
    input_view.set_left_margin(6);
    input_view.set_right_margin(6);

    let input_scroll = gtk4::ScrolledWindow::builder()
        .hscrollbar_policy(gtk4::PolicyType::Never)
        .child(&input_view)
        .build();
    input_scroll.add_css_class("card");
    panes.append(&input_scroll);

    let output_label = gtk4::Label::new(None);
    output_label.set_use_markup(true);
    output_label.set_wrap(true);
    output_label.set_wrap_mode(gtk4::pango::WrapMode::WordChar);
    output_label.set_xalign(0.0);
    output_label.set_yalign(0.0);
    output_label.set_selectable(true);
    output_label.set_margin_top(6);
    output_label.set_margin_bottom(6);
    output_label.set_margin_start(6);
    output_label.set_margin_end(6);
    output_label.set_tooltip_markup(Some(&legend_markup()));

    let output_scroll = gtk4::ScrolledWindow::builder()
        .hscrollbar_policy(gtk4::PolicyType::Never)
        .child(&output_label)
        .build();
    output_scroll.add_css_class("card");
    panes.append(&output_scroll);

    content.append(&panes);

    // --- Progress bar ---
    let progress_bar = gtk4::ProgressBar::new();
    progress_bar.set_show_text(true);
    content.append(&progress_bar);

    let toast_overlay = libadwaita::ToastOverlay::new();
    toast_overlay.set_child(Some(&content));
    toolbar_view.set_content(Some(&toast_overlay));
    window.set_content(Some(&toolbar_view));

    WindowWidgets {
        window,
        window_title,
        input_view,
        output_label,
        progress_bar,
        check_button,
        clear_button,
        load_button,
        save_button,
        copy_button,
        history_button,
        pin_button,
        toast_overlay,
    }
}

/// Tooltip legend for the annotation colors.
fn legend_markup() -> String {
    markup::LEGEND
        .iter()
        .map(|(color, name)| {
            format!("<span foreground=\"{color}\" weight=\"bold\">{name}</span>")
        })
        .collect::<Vec<_>>()
        .join("\n")
}
