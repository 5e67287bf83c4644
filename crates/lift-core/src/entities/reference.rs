use serde::{Deserialize, Serialize};

use crate::enums::ResourceKind;

/// A typed link to a remote entity, embedded in composite records.
///
/// Serializes to the remote store's link envelope:
/// `{"sys": {"type": "Link", "linkType": "Asset", "id": "..."}}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceRef {
    sys: LinkSys,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
struct LinkSys {
    #[serde(rename = "type")]
    kind: LinkMarker,
    #[serde(rename = "linkType")]
    link_type: ResourceKind,
    id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
enum LinkMarker {
    Link,
}

impl ResourceRef {
    #[must_use]
    pub fn new(kind: ResourceKind, id: impl Into<String>) -> Self {
        Self {
            sys: LinkSys {
                kind: LinkMarker::Link,
                link_type: kind,
                id: id.into(),
            },
        }
    }

    #[must_use]
    pub fn asset(id: impl Into<String>) -> Self {
        Self::new(ResourceKind::Asset, id)
    }

    #[must_use]
    pub fn entry(id: impl Into<String>) -> Self {
        Self::new(ResourceKind::Entry, id)
    }

    #[must_use]
    pub const fn kind(&self) -> ResourceKind {
        self.sys.link_type
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.sys.id
    }
}
