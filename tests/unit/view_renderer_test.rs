//! Unit tests for rendering bookmark lists.

use shelfmark::services::view_renderer::{DisplaySurface, ViewRenderer, INVALID_DATE};
use shelfmark::types::bookmark::Bookmark;
use shelfmark::types::settings::{DisplaySettings, TimeZoneMode};
use shelfmark::types::view::{ListEntry, EMPTY_PLACEHOLDER};

fn utc_renderer() -> ViewRenderer {
    ViewRenderer::new(DisplaySettings {
        date_format: "%-m/%-d/%Y, %-I:%M:%S %p".to_string(),
        time_zone: TimeZoneMode::Utc,
    })
}

fn bookmark(title: &str, timestamp: &str) -> Bookmark {
    Bookmark {
        url: format!("https://{}.example", title.to_lowercase()),
        title: title.to_string(),
        description: format!("About {}", title),
        timestamp: timestamp.to_string(),
    }
}

#[test]
fn test_empty_list_renders_single_placeholder() {
    let mut surface: Vec<ListEntry> = Vec::new();
    utc_renderer().render(&mut surface, vec![]);
    assert_eq!(surface.len(), 1);
    assert_eq!(
        surface[0],
        ListEntry::Placeholder {
            text: EMPTY_PLACEHOLDER.to_string()
        }
    );
    assert_eq!(surface[0].to_string(), "No bookmarks for this user.");
}

#[test]
fn test_render_clears_previous_entries() {
    let mut surface: Vec<ListEntry> = vec![ListEntry::placeholder(), ListEntry::placeholder()];
    utc_renderer().render(&mut surface, vec![bookmark("One", "2023-01-01T10:00:00.000Z")]);
    assert_eq!(surface.len(), 1);
}

#[test]
fn test_entries_are_newest_first_with_link_fields() {
    let mut surface: Vec<ListEntry> = Vec::new();
    utc_renderer().render(
        &mut surface,
        vec![
            bookmark("First", "2023-01-01T10:00:00.000Z"),
            bookmark("Second", "2023-01-02T10:00:00.000Z"),
        ],
    );

    let entries: Vec<_> = surface
        .iter()
        .map(|e| match e {
            ListEntry::Bookmark(b) => b.clone(),
            other => panic!("unexpected entry {other:?}"),
        })
        .collect();

    assert_eq!(entries[0].link.text, "Second");
    assert_eq!(entries[0].link.href, "https://second.example");
    assert_eq!(entries[0].link.target, "_blank");
    assert_eq!(entries[0].description, "About Second");
    assert_eq!(entries[1].link.text, "First");
}

#[test]
fn test_saved_on_uses_configured_format() {
    let renderer = utc_renderer();
    assert_eq!(
        renderer.format_saved_on("2023-01-02T15:04:05.000Z"),
        "1/2/2023, 3:04:05 PM"
    );

    let iso = ViewRenderer::new(DisplaySettings {
        date_format: "%Y-%m-%d %H:%M".to_string(),
        time_zone: TimeZoneMode::Utc,
    });
    assert_eq!(iso.format_saved_on("2023-01-02T15:04:05.000Z"), "2023-01-02 15:04");
}

#[test]
fn test_unparseable_timestamp_renders_invalid_date() {
    assert_eq!(utc_renderer().format_saved_on("last tuesday"), INVALID_DATE);
}

#[test]
fn test_saved_on_accepts_iso_dates_without_offset() {
    let utc = utc_renderer();
    assert_eq!(utc.format_saved_on("2023-01-05"), "1/5/2023, 12:00:00 AM");
    assert_eq!(utc.format_saved_on("2023-01-05T10:00Z"), "1/5/2023, 10:00:00 AM");

    // offset-less date-times are local wall-clock times
    let local = ViewRenderer::new(DisplaySettings {
        date_format: "%-m/%-d/%Y, %-I:%M:%S %p".to_string(),
        time_zone: TimeZoneMode::Local,
    });
    assert_eq!(local.format_saved_on("2023-01-05T10:00:00"), "1/5/2023, 10:00:00 AM");
}

#[test]
fn test_date_only_entry_sorts_by_its_date() {
    let mut surface: Vec<ListEntry> = Vec::new();
    utc_renderer().render(
        &mut surface,
        vec![
            bookmark("Old", "2001-01-01T00:00:00.000Z"),
            bookmark("New", "2023-01-05"),
        ],
    );
    let titles: Vec<String> = surface
        .iter()
        .filter_map(|e| match e {
            ListEntry::Bookmark(b) => Some(b.link.text.clone()),
            ListEntry::Placeholder { .. } => None,
        })
        .collect();
    assert_eq!(titles, vec!["New", "Old"]);
}

#[test]
fn test_bad_format_pattern_falls_back() {
    let renderer = ViewRenderer::new(DisplaySettings {
        date_format: "%Q%".to_string(),
        time_zone: TimeZoneMode::Utc,
    });
    let out = renderer.format_saved_on("2023-01-02T15:04:05.000Z");
    assert!(out.contains("2023"), "fallback should still show the date: {out}");
}

#[test]
fn test_custom_surface_receives_clear_then_entries() {
    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl DisplaySurface for Recorder {
        fn clear(&mut self) {
            self.calls.push("clear".to_string());
        }

        fn append(&mut self, entry: ListEntry) {
            self.calls.push(match entry {
                ListEntry::Placeholder { .. } => "placeholder".to_string(),
                ListEntry::Bookmark(b) => b.link.text,
            });
        }
    }

    let mut rec = Recorder::default();
    utc_renderer().render(&mut rec, vec![bookmark("Only", "2023-01-01T10:00:00.000Z")]);
    assert_eq!(rec.calls, vec!["clear", "Only"]);
}
