//! Site error type.

/// Error returned when the content graph cannot be resolved or a page
/// cannot be rendered.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// No entity carries a reserved slug.
    #[error("Well-known entity not found: {0}")]
    MissingWellKnownEntity(String),
    /// More than one entity carries a reserved slug.
    #[error("Well-known slug {slug} matches {count} entities")]
    DuplicateWellKnownEntity { slug: String, count: usize },
    /// Two entities derive the same canonical path.
    #[error("Path {path} is claimed by both {first} and {second}")]
    DuplicatePath {
        path: String,
        first: String,
        second: String,
    },
    /// An entity's path does not name a single output directory.
    #[error("Path {path} of {id} is not a valid page path")]
    InvalidPath { path: String, id: String },
    /// No entity is addressed by the requested path.
    #[error("Page not found: {0}")]
    PageNotFound(String),
}
