//! References between records.

use std::sync::Arc;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::entity::Entity;

/// Identifier stub of a reference whose target was not inlined.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LinkStub {
    /// Target identifier (empty if the stub carried none).
    pub id: String,
    /// `Entry` or `Asset`, as declared by the stub.
    pub link_type: String,
}

impl LinkStub {
    fn from_value(value: &Value) -> Self {
        let text = |pointer: &str| value.pointer(pointer).and_then(Value::as_str);
        Self {
            id: text("/sys/id").unwrap_or_default().to_owned(),
            link_type: text("/sys/linkType")
                .or_else(|| text("/sys/type"))
                .unwrap_or_default()
                .to_owned(),
        }
    }
}

/// Reference to an entity or media asset.
///
/// A reference is resolved when the target record was inlined in the
/// snapshot and classifies as a known kind. Anything else is kept as a stub
/// and never dereferenced further. Resolved targets are shared, so every
/// link to the same record at the same depth points at one entity.
#[derive(Clone, Debug, PartialEq)]
pub enum Link {
    Resolved(Arc<Entity>),
    Unresolved(LinkStub),
}

impl Default for Link {
    fn default() -> Self {
        Self::Unresolved(LinkStub::default())
    }
}

impl Link {
    /// Build a link from an inlined record or a stub.
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        let stub = LinkStub::from_value(&value);
        match Entity::from_value(value) {
            Some(entity) => Self::Resolved(Arc::new(entity)),
            None => Self::Unresolved(stub),
        }
    }

    /// Target entity, if resolved.
    #[must_use]
    pub fn entity(&self) -> Option<&Entity> {
        match self {
            Self::Resolved(entity) => Some(entity),
            Self::Unresolved(_) => None,
        }
    }

    /// Target identifier, for both resolved and unresolved references.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Resolved(entity) => entity.id(),
            Self::Unresolved(stub) => &stub.id,
        }
    }

    #[must_use]
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    /// Stub of an unresolved reference.
    #[must_use]
    pub fn stub(&self) -> Option<&LinkStub> {
        match self {
            Self::Resolved(_) => None,
            Self::Unresolved(stub) => Some(stub),
        }
    }
}

impl<'de> Deserialize<'de> for Link {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(Self::from_value)
    }
}
