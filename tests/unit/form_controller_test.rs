//! Unit tests for the form controller state machine.
//!
//! The controller runs against `PageState` and `AlertQueue`, so every
//! scenario is observable without a display.

use std::cell::Cell;
use std::rc::Rc;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Duration, TimeZone, Utc};

use shelfmark::managers::form_controller::{
    EventOutcome, FormController, FormEvent, FormState, SubmitOutcome,
};
use shelfmark::managers::page_state::{AlertQueue, PageState};
use shelfmark::services::storage::{MemoryStorage, StorageTrait};
use shelfmark::services::view_renderer::ViewRenderer;
use shelfmark::types::bookmark::{Bookmark, FormFields, UserId};
use shelfmark::types::errors::{StorageError, SubmitRejection, ValidationError};
use shelfmark::types::view::ListEntry;

/// Memory storage that counts writes and can be told to fail them.
struct ProbeStorage {
    inner: MemoryStorage,
    writes: Rc<Cell<usize>>,
    fail_reads: bool,
    fail_writes: bool,
}

impl StorageTrait for ProbeStorage {
    fn get_user_ids(&self) -> Result<Vec<UserId>, StorageError> {
        self.inner.get_user_ids()
    }

    fn get_data(&self, user_id: &UserId) -> Result<Option<Vec<Bookmark>>, StorageError> {
        if self.fail_reads {
            return Err(StorageError::DatabaseError("read failed".to_string()));
        }
        self.inner.get_data(user_id)
    }

    fn set_data(&mut self, user_id: &UserId, bookmarks: &[Bookmark]) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(StorageError::DatabaseError("write failed".to_string()));
        }
        self.writes.set(self.writes.get() + 1);
        self.inner.set_data(user_id, bookmarks)
    }
}

type Controller = FormController<ProbeStorage, PageState, AlertQueue>;

fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

fn existing(url: &str, timestamp: &str) -> Bookmark {
    Bookmark {
        url: url.to_string(),
        title: "Existing".to_string(),
        description: "Already saved".to_string(),
        timestamp: timestamp.to_string(),
    }
}

fn controller_with(storage: MemoryStorage) -> (Controller, Rc<Cell<usize>>) {
    let writes = Rc::new(Cell::new(0));
    let probe = ProbeStorage {
        inner: storage,
        writes: writes.clone(),
        fail_reads: false,
        fail_writes: false,
    };
    let mut controller = FormController::new(
        probe,
        PageState::new(),
        AlertQueue::new(),
        ViewRenderer::default(),
    )
    .with_clock(fixed_time);
    controller.initialize().unwrap();
    (controller, writes)
}

fn users() -> Vec<UserId> {
    vec![UserId::from("1"), UserId::from("2")]
}

fn fill(controller: &mut Controller, title: &str, url: &str, description: &str) {
    controller.view_mut().set_fields(FormFields {
        title: title.to_string(),
        url: url.to_string(),
        description: description.to_string(),
    });
}

fn result_titles(controller: &Controller) -> Vec<String> {
    controller
        .view()
        .results
        .iter()
        .map(|e| match e {
            ListEntry::Bookmark(b) => b.link.text.clone(),
            ListEntry::Placeholder { text } => text.clone(),
        })
        .collect()
}

// ─── Initial render ───

#[test]
fn test_initialize_populates_dropdown_and_disables_inputs() {
    let (controller, _) = controller_with(MemoryStorage::new(vec![
        UserId::from("b"),
        UserId::from("a"),
    ]));
    let page = controller.view();
    let labels: Vec<&str> = page.users.iter().map(|u| u.label.as_str()).collect();
    assert_eq!(labels, vec!["User b", "User a"]);
    assert_eq!(page.users[0].value, "b");
    assert!(!page.inputs_enabled);
    assert_eq!(controller.state(), &FormState::NoUserSelected);
}

// ─── Selection ───

#[test]
fn test_selecting_user_enables_inputs_and_renders_placeholder() {
    let (mut controller, _) = controller_with(MemoryStorage::new(users()));
    let outcome = controller
        .handle_event(FormEvent::SelectionChanged("1".to_string()))
        .unwrap();

    assert_eq!(
        outcome,
        EventOutcome::SelectionApplied(FormState::UserSelected(UserId::from("1")))
    );
    assert!(controller.view().inputs_enabled);
    assert_eq!(result_titles(&controller), vec!["No bookmarks for this user."]);
}

#[test]
fn test_clearing_selection_disables_inputs_and_empties_results() {
    let storage = MemoryStorage::new(users())
        .with_data(UserId::from("1"), vec![existing("https://a.example", "2023-01-01T00:00:00.000Z")]);
    let (mut controller, _) = controller_with(storage);

    controller.select_user("1");
    assert_eq!(controller.view().results.len(), 1);

    controller.select_user("");
    assert!(!controller.view().inputs_enabled);
    assert!(controller.view().results.is_empty());
    assert_eq!(controller.state(), &FormState::NoUserSelected);
}

#[test]
fn test_read_failure_renders_as_no_bookmarks() {
    let mut inner = MemoryStorage::new(users());
    inner
        .set_data(&UserId::from("1"), &[existing("https://a.example", "2023-01-01T00:00:00.000Z")])
        .unwrap();
    let probe = ProbeStorage {
        inner,
        writes: Rc::new(Cell::new(0)),
        fail_reads: true,
        fail_writes: false,
    };
    let mut controller = FormController::new(
        probe,
        PageState::new(),
        AlertQueue::new(),
        ViewRenderer::default(),
    );
    controller.initialize().unwrap();

    controller.select_user("1");

    assert_eq!(result_titles(&controller), vec!["No bookmarks for this user."]);
    assert!(controller.notifier_mut().pending().is_empty(), "read failures are silent");
}

// ─── Submission ───

#[test]
fn test_submit_without_user_alerts() {
    let (mut controller, writes) = controller_with(MemoryStorage::new(users()));
    fill(&mut controller, "T", "https://example.com", "D");

    let outcome = controller.handle_event(FormEvent::Submit).unwrap();

    assert_eq!(
        outcome,
        EventOutcome::Submitted(SubmitOutcome::Rejected(SubmitRejection::NoUserSelected))
    );
    assert_eq!(controller.notifier_mut().drain(), vec!["Please select a user first."]);
    assert_eq!(writes.get(), 0);
}

#[test]
fn test_submit_with_missing_field_alerts() {
    let (mut controller, writes) = controller_with(MemoryStorage::new(users()));
    controller.select_user("1");
    fill(&mut controller, "T", "https://example.com", "   ");

    controller.submit().unwrap();

    assert_eq!(
        controller.notifier_mut().drain(),
        vec!["Please fill out all fields before saving."]
    );
    assert_eq!(writes.get(), 0);
    assert_eq!(controller.view().fields.description, "   ", "fields are kept for correction");
}

#[test]
fn test_submit_with_invalid_url_alerts_and_does_not_write() {
    let (mut controller, writes) = controller_with(MemoryStorage::new(users()));
    controller.select_user("1");
    fill(&mut controller, "T", "not-a-url", "D");

    let outcome = controller.submit().unwrap();

    assert!(matches!(
        outcome,
        SubmitOutcome::Rejected(SubmitRejection::Invalid(ValidationError::InvalidUrl(_)))
    ));
    assert_eq!(
        controller.notifier_mut().drain(),
        vec!["Invalid URL format. Please enter a valid one (e.g., https://example.com)."]
    );
    assert_eq!(writes.get(), 0);
}

#[test]
fn test_submit_duplicate_url_alerts_and_does_not_write() {
    let storage = MemoryStorage::new(users()).with_data(
        UserId::from("1"),
        vec![existing("https://example.com", "2023-01-01T00:00:00.000Z")],
    );
    let (mut controller, writes) = controller_with(storage);
    controller.select_user("1");
    fill(&mut controller, "T", "https://example.com", "D");

    let outcome = controller.submit().unwrap();

    assert_eq!(
        outcome,
        SubmitOutcome::Rejected(SubmitRejection::Duplicate("https://example.com".to_string()))
    );
    assert_eq!(
        controller.notifier_mut().drain(),
        vec!["This bookmark already exists for this user."]
    );
    assert_eq!(writes.get(), 0);
}

#[test]
fn test_duplicate_check_is_per_user() {
    let storage = MemoryStorage::new(users()).with_data(
        UserId::from("1"),
        vec![existing("https://example.com", "2023-01-01T00:00:00.000Z")],
    );
    let (mut controller, writes) = controller_with(storage);
    controller.select_user("2");
    fill(&mut controller, "T", "https://example.com", "D");

    assert!(matches!(controller.submit().unwrap(), SubmitOutcome::Saved(_)));
    assert_eq!(writes.get(), 1);
}

#[test]
fn test_valid_submit_persists_resets_and_rerenders() {
    let storage = MemoryStorage::new(users()).with_data(
        UserId::from("1"),
        vec![existing("https://old.example", "2023-01-01T00:00:00.000Z")],
    );
    let (mut controller, writes) = controller_with(storage);
    controller.select_user("1");
    fill(&mut controller, "  New  ", " https://new.example ", " fresh ");

    let outcome = controller.submit().unwrap();

    let expected = Bookmark {
        url: "https://new.example".to_string(),
        title: "New".to_string(),
        description: "fresh".to_string(),
        timestamp: "2024-06-01T12:00:00.000Z".to_string(),
    };
    assert_eq!(outcome, SubmitOutcome::Saved(expected.clone()));
    assert_eq!(writes.get(), 1);

    let stored = controller.storage().get_data(&UserId::from("1")).unwrap().unwrap();
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[1], expected, "candidate is appended");

    assert_eq!(controller.view().fields, FormFields::default());
    assert_eq!(result_titles(&controller), vec!["New", "Existing"]);
    assert!(controller.notifier_mut().pending().is_empty());
}

#[test]
fn test_write_failure_propagates() {
    let probe = ProbeStorage {
        inner: MemoryStorage::new(users()),
        writes: Rc::new(Cell::new(0)),
        fail_reads: false,
        fail_writes: true,
    };
    let mut controller = FormController::new(
        probe,
        PageState::new(),
        AlertQueue::new(),
        ViewRenderer::default(),
    );
    controller.initialize().unwrap();
    controller.select_user("1");
    fill(&mut controller, "T", "https://example.com", "D");

    let err = controller.handle_event(FormEvent::Submit).unwrap_err();
    assert!(matches!(err, StorageError::DatabaseError(_)));
    assert!(controller.notifier_mut().pending().is_empty());
}

// ─── Keyboard ───

#[test]
fn test_enter_key_takes_submit_path() {
    let (mut controller, writes) = controller_with(MemoryStorage::new(users()));
    controller.select_user("1");
    fill(&mut controller, "T", "https://example.com", "D");

    let outcome = controller
        .handle_event(FormEvent::KeyDown("Enter".to_string()))
        .unwrap();

    assert!(outcome.prevents_default());
    assert!(matches!(outcome, EventOutcome::Submitted(SubmitOutcome::Saved(_))));
    assert_eq!(writes.get(), 1);
}

#[test]
fn test_enter_without_user_alerts_like_submit() {
    let (mut controller, _) = controller_with(MemoryStorage::new(users()));
    let outcome = controller
        .handle_event(FormEvent::KeyDown("Enter".to_string()))
        .unwrap();
    assert!(outcome.prevents_default());
    assert_eq!(controller.notifier_mut().drain(), vec!["Please select a user first."]);
}

#[test]
fn test_other_keys_are_ignored() {
    let (mut controller, writes) = controller_with(MemoryStorage::new(users()));
    controller.select_user("1");
    fill(&mut controller, "T", "https://example.com", "D");

    let outcome = controller.handle_event(FormEvent::KeyDown("a".to_string())).unwrap();

    assert_eq!(outcome, EventOutcome::Ignored);
    assert!(!outcome.prevents_default());
    assert_eq!(writes.get(), 0);
}

// ─── Ordering across several saves ───

#[test]
fn test_successive_saves_render_newest_first() {
    let start = fixed_time();
    let minutes = AtomicI64::new(0);
    let mut controller = FormController::new(
        MemoryStorage::new(users()),
        PageState::new(),
        AlertQueue::new(),
        ViewRenderer::default(),
    )
    .with_clock(move || start + Duration::minutes(minutes.fetch_add(1, Ordering::SeqCst)));
    controller.initialize().unwrap();
    controller.select_user("1");

    for (title, url) in [("A", "https://a.example"), ("B", "https://b.example"), ("C", "https://c.example")] {
        controller.view_mut().set_fields(FormFields {
            title: title.to_string(),
            url: url.to_string(),
            description: "d".to_string(),
        });
        assert!(matches!(controller.submit().unwrap(), SubmitOutcome::Saved(_)));
    }

    let titles: Vec<String> = controller
        .view()
        .results
        .iter()
        .filter_map(|e| match e {
            ListEntry::Bookmark(b) => Some(b.link.text.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(titles, vec!["C", "B", "A"]);
}
