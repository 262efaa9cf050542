use std::fmt;

use serde::{Deserialize, Serialize};

/// Text of the single entry shown when a user has no bookmarks.
pub const EMPTY_PLACEHOLDER: &str = "No bookmarks for this user.";

/// Browsing context a rendered link opens in.
pub const LINK_TARGET_NEW_CONTEXT: &str = "_blank";

/// A clickable link in the results list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub text: String,
    pub href: String,
    pub target: String,
}

/// One rendered bookmark.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkEntry {
    pub link: Link,
    pub description: String,
    /// Human-readable save date.
    pub saved_on: String,
}

/// An entry of the results list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ListEntry {
    Placeholder { text: String },
    Bookmark(BookmarkEntry),
}

impl ListEntry {
    pub fn placeholder() -> Self {
        ListEntry::Placeholder {
            text: EMPTY_PLACEHOLDER.to_string(),
        }
    }
}

impl fmt::Display for ListEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListEntry::Placeholder { text } => write!(f, "{}", text),
            ListEntry::Bookmark(entry) => write!(
                f,
                "{} <{}>\n{}\nSaved on: {}",
                entry.link.text, entry.link.href, entry.description, entry.saved_on
            ),
        }
    }
}
