use crossterm::event::{KeyCode, KeyEvent};
use pretty_assertions::assert_eq;

use vendui::{
    action::Action,
    components::{Component, VendorForm},
    vendor::{Category, Field, Vendor, VendorDraft},
};

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::from(code)
}

fn type_str(form: &mut VendorForm, text: &str) {
    for c in text.chars() {
        form.handle_key_events(key(KeyCode::Char(c))).expect("key");
    }
}

fn next_field(form: &mut VendorForm) {
    form.handle_key_events(key(KeyCode::Tab)).expect("key");
}

/// Fills every text field of a freshly opened form with a valid draft.
fn fill_valid(form: &mut VendorForm) {
    type_str(form, "Acme");
    next_field(form);
    type_str(form, "Jo");
    next_field(form);
    type_str(form, "jo@acme.com");
    next_field(form);
    type_str(form, "555");
    next_field(form);
    type_str(form, "1 Acme Way");
}

#[test]
fn test_add_flow_submits_draft() {
    let mut form = VendorForm::new();
    form.update(Action::OpenAddForm).expect("open");
    assert!(form.is_active());

    fill_valid(&mut form);
    let submitted = form.handle_key_events(key(KeyCode::Enter)).expect("submit");

    let expected = VendorDraft {
        name: "Acme".into(),
        contact: "Jo".into(),
        email: "jo@acme.com".into(),
        phone: "555".into(),
        address: "1 Acme Way".into(),
        category: Category::Utensils,
    };
    assert_eq!(submitted, Some(Action::SubmitCreate(expected)));
    assert!(form.is_submitting());
}

#[test]
fn test_invalid_draft_never_submits() {
    let mut form = VendorForm::new();
    form.update(Action::OpenAddForm).expect("open");

    // Name left blank.
    next_field(&mut form);
    type_str(&mut form, "Jo");
    next_field(&mut form);
    type_str(&mut form, "jo@acme.com");
    next_field(&mut form);
    type_str(&mut form, "555");
    next_field(&mut form);
    type_str(&mut form, "1 Acme Way");

    let submitted = form.handle_key_events(key(KeyCode::Enter)).expect("submit");
    assert_eq!(submitted, None);
    assert!(!form.is_submitting());
    assert_eq!(
        form.errors().get(&Field::Name).map(String::as_str),
        Some("Name is required.")
    );
}

#[test]
fn test_malformed_email_blocks_submission() {
    let mut form = VendorForm::new();
    form.update(Action::OpenAddForm).expect("open");
    fill_valid(&mut form);

    // Corrupt the email field.
    form.handle_key_events(key(KeyCode::BackTab)).expect("key");
    form.handle_key_events(key(KeyCode::BackTab)).expect("key");
    type_str(&mut form, " broken");

    let submitted = form.handle_key_events(key(KeyCode::Enter)).expect("submit");
    assert_eq!(submitted, None);
    assert_eq!(
        form.errors().get(&Field::Email).map(String::as_str),
        Some("Valid email is required.")
    );
}

#[test]
fn test_submit_is_disabled_while_in_flight() {
    let mut form = VendorForm::new();
    form.update(Action::OpenAddForm).expect("open");
    fill_valid(&mut form);

    let first = form.handle_key_events(key(KeyCode::Enter)).expect("submit");
    assert!(matches!(first, Some(Action::SubmitCreate(_))));

    // A second Enter while the request is outstanding does nothing.
    let second = form.handle_key_events(key(KeyCode::Enter)).expect("submit");
    assert_eq!(second, None);

    // Failure re-enables the form for another attempt.
    form.update(Action::SubmitFailed("Failed to add vendor.".into()))
        .expect("failed");
    assert!(!form.is_submitting());
    let third = form.handle_key_events(key(KeyCode::Enter)).expect("submit");
    assert!(matches!(third, Some(Action::SubmitCreate(_))));
}

#[test]
fn test_category_cycles_through_closed_set() {
    let mut form = VendorForm::new();
    form.update(Action::OpenAddForm).expect("open");
    fill_valid(&mut form);

    // Move focus to the category selector (last in order).
    next_field(&mut form);
    form.handle_key_events(key(KeyCode::Right)).expect("key");
    assert_eq!(form.draft().category, Category::Packaging);
    form.handle_key_events(key(KeyCode::Right)).expect("key");
    assert_eq!(form.draft().category, Category::Containers);
    form.handle_key_events(key(KeyCode::Left)).expect("key");
    assert_eq!(form.draft().category, Category::Packaging);
}

#[test]
fn test_edit_flow_loads_then_submits_update() {
    let mut form = VendorForm::new();
    form.update(Action::EditVendor(7)).expect("edit");
    assert!(form.is_active());

    // Keys are ignored while the vendor is loading.
    type_str(&mut form, "ignored");
    assert_eq!(form.draft().name, "");

    let vendor = Vendor {
        id: 7,
        name: "Acme".into(),
        contact: "Jo".into(),
        email: "jo@acme.com".into(),
        phone: "555".into(),
        address: "1 Acme Way".into(),
        category: Category::Packaging,
    };
    form.update(Action::VendorFetched(Box::new(vendor.clone())))
        .expect("fetched");
    assert_eq!(form.draft(), vendor.draft());

    // Tweak the name and submit a whole-record update.
    type_str(&mut form, "!");
    let submitted = form.handle_key_events(key(KeyCode::Enter)).expect("submit");
    match submitted {
        Some(Action::SubmitUpdate(7, draft)) => assert_eq!(draft.name, "Acme!"),
        other => panic!("expected SubmitUpdate, got {other:?}"),
    }
}

#[test]
fn test_not_found_deactivates_form() {
    let mut form = VendorForm::new();
    form.update(Action::EditVendor(404)).expect("edit");
    form.update(Action::EditTargetMissing).expect("missing");
    assert!(!form.is_active());
}

#[test]
fn test_escape_closes_without_submitting() {
    let mut form = VendorForm::new();
    form.update(Action::OpenAddForm).expect("open");
    fill_valid(&mut form);
    let action = form.handle_key_events(key(KeyCode::Esc)).expect("esc");
    assert_eq!(action, Some(Action::CloseForm));
    form.update(Action::CloseForm).expect("close");
    assert!(!form.is_active());
}

#[test]
fn test_success_resets_form() {
    let mut form = VendorForm::new();
    form.update(Action::OpenAddForm).expect("open");
    fill_valid(&mut form);
    form.handle_key_events(key(KeyCode::Enter)).expect("submit");

    let created = Vendor {
        id: 1,
        name: "Acme".into(),
        contact: "Jo".into(),
        email: "jo@acme.com".into(),
        phone: "555".into(),
        address: "1 Acme Way".into(),
        category: Category::Utensils,
    };
    form.update(Action::VendorCreated(Box::new(created)))
        .expect("created");
    assert!(!form.is_active());
    assert!(!form.is_submitting());
    assert_eq!(form.draft(), VendorDraft::default());
}
