//! Reverse-chronological ordering of bookmarks.

use std::cmp::Ordering;

use crate::types::bookmark::Bookmark;

/// Orders bookmarks newest first by parsed `timestamp`.
///
/// The sort is stable, so equal timestamps keep their input order.
/// Bookmarks whose timestamp does not parse go after all others.
pub fn sort_bookmarks(mut bookmarks: Vec<Bookmark>) -> Vec<Bookmark> {
    bookmarks.sort_by(newest_first);
    bookmarks
}

/// Comparator behind [`sort_bookmarks`].
pub fn newest_first(a: &Bookmark, b: &Bookmark) -> Ordering {
    match (a.saved_at(), b.saved_at()) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
