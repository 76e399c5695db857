//! Recursive document tree renderer.

use mosaic_model::{ContactMethodFields, Document, Entity, Link, MediaMode, Node, Text};

use crate::markup::{Element, Markup};
use crate::util::demoted_heading_tag;

/// Inline style keeping authored line breaks visible.
const PRESERVE_WHITESPACE: &str = "white-space: pre-line";

/// Renders rich-text documents into [`Markup`].
///
/// Each node kind maps to exactly one rule. References are rendered from
/// whatever the snapshot inlined: an unresolved target yields no title,
/// media or href, never an error.
///
/// The walk is a pure depth-first traversal; siblings share no state, so one
/// renderer can be used from many threads at once.
#[derive(Clone, Debug, Default)]
pub struct DocumentRenderer {
    media: MediaMode,
}

impl DocumentRenderer {
    #[must_use]
    pub fn new(media: MediaMode) -> Self {
        Self { media }
    }

    #[must_use]
    pub fn media(&self) -> &MediaMode {
        &self.media
    }

    /// Render a document's top-level blocks without a wrapper.
    #[must_use]
    pub fn render(&self, document: &Document) -> Markup {
        Markup::Fragment(self.render_nodes(&document.content))
    }

    /// Render a document straight to HTML.
    #[must_use]
    pub fn render_html(&self, document: &Document) -> String {
        self.render(document).to_html()
    }

    /// Render a single node and its subtree.
    #[must_use]
    pub fn render_node(&self, node: &Node) -> Markup {
        match node {
            Node::Heading { level, content } => self.wrap(demoted_heading_tag(*level), content),
            Node::Paragraph(content) => self.wrap("p", content),
            Node::Quote(content) => self.wrap("blockquote", content),
            Node::HorizontalRule => Element::new("hr").into(),
            Node::Text(text) => render_text(text),
            Node::EmbeddedEntryBlock(target) | Node::EmbeddedAssetBlock(target) => {
                self.render_embedded_block(target)
            }
            Node::EmbeddedEntryInline(target) => {
                let entity = target.entity();
                Element::new("a")
                    .attr_opt("href", entity.and_then(|e| e.media_src(&self.media)))
                    .attr("class", "entry-title")
                    .children(entity.and_then(Entity::title).map(Markup::from))
                    .into()
            }
            Node::EntryHyperlink { target, content } | Node::AssetHyperlink { target, content } => {
                Element::new("a")
                    .attr_opt("href", self.target_src(target))
                    .children(self.render_nodes(content))
                    .into()
            }
            Node::ExternalHyperlink { uri, content } => Element::new("a")
                .attr_opt("href", safe_uri(uri))
                .children(self.render_nodes(content))
                .into(),
            Node::Other { node_type, content } => {
                tracing::warn!(node_type = %node_type, "Unknown rich-text node, rendering children only");
                Markup::Fragment(self.render_nodes(content))
            }
        }
    }

    /// Render a block-level reference.
    ///
    /// The rule depends on the target's kind, not on whether the node was an
    /// entry or asset block:
    /// - contact method: new-tab link with its big icon and QR code
    /// - activity: link to the activity wrapping its logo
    /// - image asset: image with the asset title as alt text
    /// - anything else: button-style link labelled with the target title
    #[must_use]
    pub fn render_embedded_block(&self, target: &Link) -> Markup {
        let Some(entity) = target.entity() else {
            return entry_button(None, None);
        };

        match entity {
            Entity::ContactMethod(contact) => self.render_contact_method(&contact.fields),
            Entity::Activity(activity) => {
                let logo_src = activity
                    .fields
                    .logo
                    .as_ref()
                    .and_then(Link::entity)
                    .and_then(|logo| logo.media_src(&self.media));
                Element::new("a")
                    .attr_opt("href", entity.media_src(&self.media))
                    .child(
                        Element::new("img")
                            .attr_opt("src", logo_src)
                            .attr("alt", activity.fields.name.as_str()),
                    )
                    .into()
            }
            Entity::MediaAsset(asset) if asset.fields.is_image() => Element::new("img")
                .attr_opt("src", entity.media_src(&self.media))
                .attr_opt("alt", entity.title())
                .into(),
            _ => entry_button(entity.media_src(&self.media), entity.title()),
        }
    }

    fn render_contact_method(&self, fields: &ContactMethodFields) -> Markup {
        let icons = [&fields.big_icon, &fields.qr_code]
            .into_iter()
            .filter_map(|icon| icon.as_ref()?.entity())
            .map(|asset| {
                Markup::from(
                    Element::new("img")
                        .attr_opt("src", asset.media_src(&self.media))
                        .attr("class", "contact-method-icon"),
                )
            });

        Element::new("a")
            .attr_opt("href", fields.link.as_deref().and_then(safe_uri))
            .attr("target", "_blank")
            .attr("class", "contact-method")
            .children(icons)
            .into()
    }

    fn target_src(&self, target: &Link) -> Option<String> {
        target.entity().and_then(|e| e.media_src(&self.media))
    }

    fn wrap(&self, tag: &'static str, content: &[Node]) -> Markup {
        Element::new(tag).children(self.render_nodes(content)).into()
    }

    fn render_nodes(&self, nodes: &[Node]) -> Vec<Markup> {
        nodes.iter().map(|node| self.render_node(node)).collect()
    }
}

fn render_text(text: &Text) -> Markup {
    let tag = if text.is_bold() { "strong" } else { "span" };
    Element::new(tag)
        .attr("style", PRESERVE_WHITESPACE)
        .child(text.value.as_str())
        .into()
}

/// URI schemes external links may use.
const ALLOWED_SCHEMES: &[&str] = &["http", "https", "mailto", "tel"];

/// `uri` if it is relative or uses an allowed scheme.
///
/// Browsers ignore ASCII whitespace and control characters inside the
/// scheme, so they are stripped before it is compared.
fn safe_uri(uri: &str) -> Option<&str> {
    let cleaned: String = uri
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && !c.is_control())
        .collect();
    let scheme_end = cleaned.find([':', '/', '?', '#']);
    let allowed = match scheme_end {
        Some(end) if cleaned[end..].starts_with(':') => {
            let scheme = cleaned[..end].to_ascii_lowercase();
            ALLOWED_SCHEMES.contains(&scheme.as_str())
        }
        _ => true,
    };
    if allowed {
        Some(uri)
    } else {
        tracing::warn!(uri, "Dropping link with disallowed URI scheme");
        None
    }
}

fn entry_button(href: Option<String>, title: Option<&str>) -> Markup {
    Element::new("a")
        .attr_opt("href", href)
        .attr("class", "entry-title button")
        .children(title.map(Markup::from))
        .into()
}
