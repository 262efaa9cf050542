//! Renders a user's bookmarks into a results list.

use std::fmt::Write as _;

use chrono::Local;

use crate::services::sorter::sort_bookmarks;
use crate::types::bookmark::{parse_timestamp, Bookmark};
use crate::types::settings::{DisplaySettings, TimeZoneMode};
use crate::types::view::{BookmarkEntry, Link, ListEntry, LINK_TARGET_NEW_CONTEXT};

/// Shown in place of a save date that cannot be parsed.
pub const INVALID_DATE: &str = "Invalid Date";

/// A list the renderer can write entries into.
pub trait DisplaySurface {
    /// Removes every entry.
    fn clear(&mut self);
    /// Appends one entry at the end.
    fn append(&mut self, entry: ListEntry);
}

impl DisplaySurface for Vec<ListEntry> {
    fn clear(&mut self) {
        Vec::clear(self);
    }

    fn append(&mut self, entry: ListEntry) {
        self.push(entry);
    }
}

/// Turns bookmark sequences into list entries.
#[derive(Debug, Clone, Default)]
pub struct ViewRenderer {
    display: DisplaySettings,
}

impl ViewRenderer {
    pub fn new(display: DisplaySettings) -> Self {
        Self { display }
    }

    /// Clears `surface` and renders `bookmarks` newest first, or the
    /// placeholder entry when there are none.
    pub fn render(&self, surface: &mut dyn DisplaySurface, bookmarks: Vec<Bookmark>) {
        surface.clear();

        if bookmarks.is_empty() {
            surface.append(ListEntry::placeholder());
            return;
        }

        for bookmark in sort_bookmarks(bookmarks) {
            surface.append(self.entry_for(bookmark));
        }
    }

    fn entry_for(&self, bookmark: Bookmark) -> ListEntry {
        let saved_on = self.format_saved_on(&bookmark.timestamp);
        ListEntry::Bookmark(BookmarkEntry {
            link: Link {
                text: bookmark.title,
                href: bookmark.url,
                target: LINK_TARGET_NEW_CONTEXT.to_string(),
            },
            description: bookmark.description,
            saved_on,
        })
    }

    /// Formats an ISO-8601 timestamp with the configured pattern and zone.
    pub fn format_saved_on(&self, timestamp: &str) -> String {
        let Some(utc) = parse_timestamp(timestamp) else {
            return INVALID_DATE.to_string();
        };

        let mut out = String::new();
        let written = match self.display.time_zone {
            TimeZoneMode::Local => write!(
                out,
                "{}",
                utc.with_timezone(&Local).format(&self.display.date_format)
            ),
            TimeZoneMode::Utc => write!(out, "{}", utc.format(&self.display.date_format)),
        };

        match written {
            Ok(()) => out,
            // bad strftime pattern in settings
            Err(_) => utc.to_rfc2822(),
        }
    }
}
