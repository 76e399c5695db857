//! Rich-text document trees.
//!
//! Nodes arrive tagged by a `nodeType` string. Parsing maps every known tag
//! onto a closed [`Node`] variant; unrecognized tags become [`Node::Other`]
//! so rendering can fall back to their children.

use serde::Deserialize;

use crate::link::Link;

/// Root of a rich-text tree.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(from = "RawNode")]
pub struct Document {
    /// Top-level blocks in document order.
    pub content: Vec<Node>,
}

impl Document {
    /// Visit every link target in the tree, in document order.
    pub(crate) fn for_each_link_mut(&mut self, f: &mut dyn FnMut(&mut Link)) {
        for node in &mut self.content {
            node.for_each_link_mut(f);
        }
    }
}

/// A rich-text node.
///
/// Embedded blocks carry only their target; any inline content the source
/// attached to them is dropped.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(from = "RawNode")]
pub enum Node {
    /// Heading with level 1 to 6.
    Heading { level: u8, content: Vec<Node> },
    Paragraph(Vec<Node>),
    Quote(Vec<Node>),
    HorizontalRule,
    EmbeddedEntryBlock(Link),
    EmbeddedAssetBlock(Link),
    EmbeddedEntryInline(Link),
    EntryHyperlink { target: Link, content: Vec<Node> },
    AssetHyperlink { target: Link, content: Vec<Node> },
    ExternalHyperlink { uri: String, content: Vec<Node> },
    Text(Text),
    /// Node type outside the known set.
    Other { node_type: String, content: Vec<Node> },
}

/// Text leaf.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Text {
    pub value: String,
    pub marks: Vec<Mark>,
}

impl Node {
    fn for_each_link_mut(&mut self, f: &mut dyn FnMut(&mut Link)) {
        let children = match self {
            Self::EmbeddedEntryBlock(target)
            | Self::EmbeddedAssetBlock(target)
            | Self::EmbeddedEntryInline(target) => {
                f(target);
                return;
            }
            Self::EntryHyperlink { target, content } | Self::AssetHyperlink { target, content } => {
                f(target);
                content
            }
            Self::Heading { content, .. }
            | Self::Paragraph(content)
            | Self::Quote(content)
            | Self::ExternalHyperlink { content, .. }
            | Self::Other { content, .. } => content,
            Self::HorizontalRule | Self::Text(_) => return,
        };
        for child in children {
            child.for_each_link_mut(f);
        }
    }
}

impl Text {
    #[must_use]
    pub fn is_bold(&self) -> bool {
        self.marks.contains(&Mark::Bold)
    }
}

/// Style mark on a text leaf.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(from = "RawMark")]
pub enum Mark {
    Bold,
    Italic,
    Underline,
    Code,
    Other(String),
}

#[derive(Deserialize)]
struct RawMark {
    #[serde(rename = "type")]
    mark_type: String,
}

impl From<RawMark> for Mark {
    fn from(raw: RawMark) -> Self {
        match raw.mark_type.as_str() {
            "bold" => Self::Bold,
            "italic" => Self::Italic,
            "underline" => Self::Underline,
            "code" => Self::Code,
            _ => Self::Other(raw.mark_type),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawNode {
    node_type: String,
    #[serde(default)]
    data: RawNodeData,
    #[serde(default)]
    content: Vec<Node>,
    #[serde(default)]
    value: String,
    #[serde(default)]
    marks: Vec<Mark>,
}

#[derive(Default, Deserialize)]
struct RawNodeData {
    #[serde(default)]
    target: Option<Link>,
    #[serde(default)]
    uri: Option<String>,
}

impl From<RawNode> for Document {
    fn from(raw: RawNode) -> Self {
        if raw.node_type != "document" {
            tracing::debug!(node_type = %raw.node_type, "Document root has unexpected node type");
        }
        Self {
            content: raw.content,
        }
    }
}

impl From<RawNode> for Node {
    fn from(raw: RawNode) -> Self {
        let RawNode {
            node_type,
            data,
            content,
            value,
            marks,
        } = raw;

        match node_type.as_str() {
            "text" => Self::Text(Text { value, marks }),
            "paragraph" => Self::Paragraph(content),
            "blockquote" => Self::Quote(content),
            "hr" => Self::HorizontalRule,
            "embedded-entry-block" => Self::EmbeddedEntryBlock(data.target.unwrap_or_default()),
            "embedded-asset-block" => Self::EmbeddedAssetBlock(data.target.unwrap_or_default()),
            "embedded-entry-inline" => Self::EmbeddedEntryInline(data.target.unwrap_or_default()),
            "entry-hyperlink" => Self::EntryHyperlink {
                target: data.target.unwrap_or_default(),
                content,
            },
            "asset-hyperlink" => Self::AssetHyperlink {
                target: data.target.unwrap_or_default(),
                content,
            },
            "hyperlink" => Self::ExternalHyperlink {
                uri: data.uri.unwrap_or_default(),
                content,
            },
            tag => match heading_level(tag) {
                Some(level) => Self::Heading { level, content },
                None => Self::Other { node_type, content },
            },
        }
    }
}

fn heading_level(tag: &str) -> Option<u8> {
    tag.strip_prefix("heading-")?
        .parse()
        .ok()
        .filter(|level| (1..=6).contains(level))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn text(value: &str) -> serde_json::Value {
        json!({"nodeType": "text", "value": value, "marks": [], "data": {}})
    }

    #[test]
    fn test_parse_paragraph_with_bold_text() {
        let doc: Document = serde_json::from_value(json!({
            "nodeType": "document",
            "data": {},
            "content": [{
                "nodeType": "paragraph",
                "data": {},
                "content": [{"nodeType": "text", "value": "hi", "marks": [{"type": "bold"}], "data": {}}]
            }]
        }))
        .unwrap();

        assert_eq!(
            doc,
            Document {
                content: vec![Node::Paragraph(vec![Node::Text(Text {
                    value: "hi".to_owned(),
                    marks: vec![Mark::Bold],
                })])],
            }
        );
    }

    #[test]
    fn test_parse_heading_levels() {
        for level in 1..=6u8 {
            let node: Node = serde_json::from_value(json!({
                "nodeType": format!("heading-{level}"),
                "content": [text("x")]
            }))
            .unwrap();
            assert!(matches!(node, Node::Heading { level: l, .. } if l == level));
        }
    }

    #[test]
    fn test_parse_heading_out_of_range_is_other() {
        let node: Node =
            serde_json::from_value(json!({"nodeType": "heading-7", "content": []})).unwrap();
        assert!(matches!(node, Node::Other { ref node_type, .. } if node_type == "heading-7"));
    }

    #[test]
    fn test_parse_unknown_node_keeps_children() {
        let node: Node = serde_json::from_value(json!({
            "nodeType": "table",
            "content": [text("a"), text("b")]
        }))
        .unwrap();

        let Node::Other { node_type, content } = node else {
            panic!("expected Other");
        };
        assert_eq!(node_type, "table");
        assert_eq!(content.len(), 2);
    }

    #[test]
    fn test_parse_hyperlink_uri() {
        let node: Node = serde_json::from_value(json!({
            "nodeType": "hyperlink",
            "data": {"uri": "https://example.com"},
            "content": [text("site")]
        }))
        .unwrap();

        assert_eq!(
            node,
            Node::ExternalHyperlink {
                uri: "https://example.com".to_owned(),
                content: vec![Node::Text(Text {
                    value: "site".to_owned(),
                    marks: Vec::new(),
                })],
            }
        );
    }

    #[test]
    fn test_parse_embedded_block_drops_content() {
        let node: Node = serde_json::from_value(json!({
            "nodeType": "embedded-entry-block",
            "data": {"target": {"sys": {"type": "Link", "linkType": "Entry", "id": "e1"}}},
            "content": [text("ignored")]
        }))
        .unwrap();

        let Node::EmbeddedEntryBlock(target) = node else {
            panic!("expected embedded entry block");
        };
        assert_eq!(target.id(), "e1");
        assert!(!target.is_resolved());
    }

    #[test]
    fn test_parse_embedded_block_without_target() {
        let node: Node =
            serde_json::from_value(json!({"nodeType": "embedded-asset-block", "data": {}}))
                .unwrap();
        assert_eq!(node, Node::EmbeddedAssetBlock(Link::default()));
    }

    #[test]
    fn test_parse_marks() {
        let node: Node = serde_json::from_value(json!({
            "nodeType": "text",
            "value": "x",
            "marks": [{"type": "italic"}, {"type": "strikethrough"}]
        }))
        .unwrap();

        let Node::Text(text) = node else {
            panic!("expected text");
        };
        assert_eq!(
            text.marks,
            vec![Mark::Italic, Mark::Other("strikethrough".to_owned())]
        );
        assert!(!text.is_bold());
    }
}
