//! Bookmark validation and deduplication.

use url::Url;

use crate::types::bookmark::Bookmark;
use crate::types::errors::ValidationError;

/// Checks field presence, then URL well-formedness.
///
/// Blank fields are reported before a malformed URL. Scheme and reachability
/// are not checked.
pub fn check_bookmark(bookmark: &Bookmark) -> Result<(), ValidationError> {
    let blank = [&bookmark.url, &bookmark.title, &bookmark.description]
        .iter()
        .any(|field| field.trim().is_empty());
    if blank {
        return Err(ValidationError::MissingFields);
    }

    Url::parse(&bookmark.url).map_err(|e| ValidationError::InvalidUrl(e.to_string()))?;
    Ok(())
}

/// Returns `true` if the bookmark passes [`check_bookmark`].
pub fn validate_bookmark(bookmark: &Bookmark) -> bool {
    check_bookmark(bookmark).is_ok()
}

/// Returns `true` if any existing bookmark has exactly the candidate's url.
pub fn is_duplicate(existing: &[Bookmark], candidate: &Bookmark) -> bool {
    existing.iter().any(|b| b.url == candidate.url)
}
