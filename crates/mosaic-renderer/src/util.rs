//! Shared utility functions for document rendering.

/// Output tag for a document heading.
///
/// The page title occupies the top heading level outside the document, so
/// every document heading moves down one level. Level 6 has no deeper
/// equivalent and stays at `h6`, which makes levels 5 and 6 collide.
#[must_use]
pub fn demoted_heading_tag(level: u8) -> &'static str {
    match level {
        0 | 1 => "h2",
        2 => "h3",
        3 => "h4",
        4 => "h5",
        _ => "h6",
    }
}
