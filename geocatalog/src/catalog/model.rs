//! Resource value types.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier for a catalog resource, unique within its kind.
pub type ResourceId = u64;

/// The kinds of resource the catalog holds.
///
/// Only layers and maps carry a spatio-temporal index; documents exist in
/// the catalog but are not indexable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Layer,
    Map,
    Document,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Layer => write!(f, "layer"),
            ResourceKind::Map => write!(f, "map"),
            ResourceKind::Document => write!(f, "document"),
        }
    }
}

/// A resource owner's account and contact details.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Owner {
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    /// Name from a linked contact record, preferred for display when set.
    #[serde(default)]
    pub contact_name: Option<String>,
}

impl Owner {
    /// Display name: the linked contact's name when present, otherwise
    /// first and last name concatenated.
    pub fn display_name(&self) -> String {
        match &self.contact_name {
            Some(name) => name.clone(),
            None => format!("{} {}", self.first_name, self.last_name),
        }
    }
}

/// A geographic layer served from a local data store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerResource {
    pub id: ResourceId,
    /// Catalog-wide identifier matching external metadata documents.
    pub uuid: String,
    /// Qualified layer name, e.g. `base:roads`.
    pub typename: String,
    pub title: String,
    #[serde(default, rename = "abstract")]
    pub abstract_text: String,
    #[serde(default)]
    pub owner: Option<Owner>,
    /// Display name of the metadata author, shown as the result owner.
    #[serde(default)]
    pub metadata_author: String,
    #[serde(default)]
    pub topic_category: String,
    /// Backing store kind, `dataStore` (vector) or `coverageStore` (raster).
    pub store_type: String,
    /// Whitespace-separated keyword string; empty means no keywords.
    #[serde(default)]
    pub keywords: String,
    /// Publication date, used as the layer's last-modified timestamp.
    pub date: DateTime<Utc>,
}

impl LayerResource {
    /// Human label for the layer's backing store kind.
    pub fn display_type(&self) -> &'static str {
        match self.store_type.as_str() {
            "dataStore" => "Vector Data",
            "coverageStore" => "Raster Data",
            _ => "Data",
        }
    }
}

/// A map composing catalog layers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapResource {
    pub id: ResourceId,
    pub title: String,
    #[serde(default, rename = "abstract")]
    pub abstract_text: String,
    pub owner: Owner,
    pub last_modified: DateTime<Utc>,
    /// Typenames of member layers. Names with no catalog entry are remote
    /// layers and resolve to nothing locally.
    #[serde(default)]
    pub layer_names: Vec<String>,
}

/// A non-geographic document. Present in the catalog, never indexed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentResource {
    pub id: ResourceId,
    pub title: String,
}

/// A catalog resource of any kind.
#[derive(Debug, Clone)]
pub enum Resource {
    Layer(LayerResource),
    Map(MapResource),
    Document(DocumentResource),
}

impl Resource {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Resource::Layer(_) => ResourceKind::Layer,
            Resource::Map(_) => ResourceKind::Map,
            Resource::Document(_) => ResourceKind::Document,
        }
    }

    pub fn id(&self) -> ResourceId {
        match self {
            Resource::Layer(l) => l.id,
            Resource::Map(m) => m.id,
            Resource::Document(d) => d.id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Resource::Layer(l) => &l.title,
            Resource::Map(m) => &m.title,
            Resource::Document(d) => &d.title,
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({:?})", self.kind(), self.id(), self.title())
    }
}
