//! Rich-text document renderer.
//!
//! [`DocumentRenderer`] walks a [`mosaic_model::Document`] depth-first and
//! produces a [`Markup`] tree, which serializes to HTML with
//! [`Markup::to_html`].
//!
//! Every node kind maps to one rendering rule. Embedded references are
//! rendered according to the kind of entity they point at; references the
//! snapshot could not resolve render with empty title and media instead of
//! failing.
//!
//! # Example
//!
//! ```
//! use mosaic_model::{Document, MediaMode};
//! use mosaic_renderer::DocumentRenderer;
//! use serde_json::json;
//!
//! let document: Document = serde_json::from_value(json!({
//!     "nodeType": "document",
//!     "content": [{
//!         "nodeType": "heading-1",
//!         "content": [{"nodeType": "text", "value": "Hello", "marks": []}]
//!     }]
//! }))
//! .unwrap();
//!
//! let html = DocumentRenderer::new(MediaMode::Remote).render_html(&document);
//! assert!(html.starts_with("<h2>"));
//! ```

mod html;
mod markup;
mod renderer;
mod util;

pub use html::escape_html;
pub use markup::{Element, Markup};
pub use renderer::DocumentRenderer;
pub use util::demoted_heading_tag;
