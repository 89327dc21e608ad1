use gtk4::prelude::*;
use libadwaita::prelude::*;

use crate::stats::{CheckRecord, Stats};

/// Show a window listing past check runs and overall totals.
pub fn show_history_window(parent: &impl IsA<gtk4::Window>, stats: &Stats) {
    let window = libadwaita::Window::builder()
        .title("Check History")
        .default_width(500)
        .default_height(550)
        .transient_for(parent)
        .modal(true)
        .build();

    let toast_overlay = libadwaita::ToastOverlay::new();

    let toolbar_view = libadwaita::ToolbarView::new();
    let header = libadwaita::HeaderBar::new();

    let back_btn = gtk4::Button::from_icon_name("go-previous-symbolic");
    back_btn.set_tooltip_text(Some("Back to main"));
    let win_for_back = window.clone();
    back_btn.connect_clicked(move |_| {
        win_for_back.close();
    });
    header.pack_start(&back_btn);

    toolbar_view.add_top_bar(&header);

    let content = gtk4::Box::new(gtk4::Orientation::Vertical, 0);
    content.set_margin_start(16);
    content.set_margin_end(16);
    content.set_margin_top(12);
    content.set_margin_bottom(12);

    // --- Totals group ---
    let totals_group = libadwaita::PreferencesGroup::new();
    totals_group.set_title("Totals");

    let checks_row = libadwaita::ActionRow::builder().title("Checks Run").build();
    let checks_label = gtk4::Label::new(Some(&stats.total_checks.to_string()));
    checks_label.add_css_class("dim-label");
    checks_row.add_suffix(&checks_label);
    totals_group.add(&checks_row);

    let chars_row = libadwaita::ActionRow::builder()
        .title("Characters Checked")
        .build();
    let chars_label = gtk4::Label::new(Some(&stats.total_chars.to_string()));
    chars_label.add_css_class("dim-label");
    chars_row.add_suffix(&chars_label);
    totals_group.add(&chars_row);

    content.append(&totals_group);

    // --- History list ---
    if stats.history.is_empty() {
        let empty_label = gtk4::Label::new(Some("No checks recorded yet."));
        empty_label.add_css_class("dim-label");
        empty_label.set_vexpand(true);
        empty_label.set_valign(gtk4::Align::Center);
        content.append(&empty_label);
    } else {
        let group = libadwaita::PreferencesGroup::new();
        group.set_title("Recent Checks");
        group.set_margin_top(12);

        for record in stats.history.iter().rev() {
            let row = build_check_row(record, &toast_overlay);
            group.add(&row);
        }

        content.append(&group);
    }

    let scrolled = gtk4::ScrolledWindow::builder()
        .hscrollbar_policy(gtk4::PolicyType::Never)
        .child(&content)
        .build();
    toolbar_view.set_content(Some(&scrolled));
    toast_overlay.set_child(Some(&toolbar_view));
    window.set_content(Some(&toast_overlay));
    window.present();
}

/// Build an ExpanderRow for a single check record.
fn build_check_row(
    record: &CheckRecord,
    toast_overlay: &libadwaita::ToastOverlay,
) -> libadwaita::ExpanderRow {
    let row = libadwaita::ExpanderRow::builder()
        .title(&record.timestamp)
        .build();

    // Truncated subtitle preview; char-based, the text is mostly Hangul
    let preview: String = if record.text.chars().count() > 100 {
        let head: String = record.text.chars().take(100).collect();
        format!("{head}...")
    } else {
        record.text.clone()
    };
    row.set_subtitle(&preview);

    let count_label = gtk4::Label::new(Some(&format!("{} chars", record.char_count)));
    count_label.add_css_class("dim-label");
    row.add_suffix(&count_label);

    let copy_btn = gtk4::Button::from_icon_name("edit-copy-symbolic");
    copy_btn.set_valign(gtk4::Align::Center);
    copy_btn.set_tooltip_text(Some("Copy to clipboard"));

    let text_for_copy = record.text.clone();
    let toast_for_copy = toast_overlay.clone();
    copy_btn.connect_clicked(move |_| {
        let _ = crate::clipboard::copy_to_clipboard(&text_for_copy);
        let toast = libadwaita::Toast::new("Checked text copied to clipboard");
        toast.set_timeout(2);
        toast_for_copy.add_toast(toast);
    });
    row.add_suffix(&copy_btn);

    // Full text child row (visible when expanded)
    let full_text_row = libadwaita::ActionRow::new();
    let label = gtk4::Label::new(Some(&record.text));
    label.set_wrap(true);
    label.set_xalign(0.0);
    label.set_margin_top(4);
    label.set_margin_bottom(4);
    label.set_margin_start(8);
    label.set_margin_end(8);
    label.set_selectable(true);
    full_text_row.set_child(Some(&label));
    row.add_row(&full_text_row);

    row
}
