use pretty_assertions::assert_eq;

use vendui::{
    action::{Action, Severity, Toast},
    components::{Component, StatusBar},
};

#[test]
fn test_toast_is_shown_and_auto_dismissed() {
    let mut status_bar = StatusBar::new();
    assert_eq!(status_bar.toast(), None);

    status_bar
        .update(Action::Notify(Toast::success("Vendor deleted successfully.")))
        .expect("notify");
    assert_eq!(
        status_bar.toast().map(|t| t.message.as_str()),
        Some("Vendor deleted successfully.")
    );

    // Ticks count the toast down; it survives for a while, then vanishes.
    for _ in 0..23 {
        status_bar.update(Action::Tick).expect("tick");
    }
    assert!(status_bar.toast().is_some());
    status_bar.update(Action::Tick).expect("tick");
    assert_eq!(status_bar.toast(), None);
}

#[test]
fn test_newer_toast_replaces_older() {
    let mut status_bar = StatusBar::new();
    status_bar
        .update(Action::Notify(Toast::success("first")))
        .expect("notify");
    status_bar
        .update(Action::Notify(Toast::error("second")))
        .expect("notify");
    let toast = status_bar.toast().expect("toast");
    assert_eq!(toast.message, "second");
    assert_eq!(toast.severity, Severity::Error);
}

#[test]
fn test_draw_errors_surface_as_toasts() {
    let mut status_bar = StatusBar::new();
    status_bar
        .update(Action::Error("Failed to draw".into()))
        .expect("error");
    let toast = status_bar.toast().expect("toast");
    assert_eq!(toast.severity, Severity::Error);
}
