//! Wire types for entries, assets, and collections.
//!
//! Field values are localized: every field is an object keyed by locale tag,
//! e.g. `{"title": {"en-US": "Blue Dream"}}`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// System metadata carried by every remote record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sys {
    pub id: String,
    #[serde(default)]
    pub version: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_version: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<ContentTypeLink>,
}

/// `sys.contentType` of an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentTypeLink {
    pub sys: ContentTypeSys,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentTypeSys {
    pub id: String,
}

/// Localized field map: field id → locale → value.
pub type Fields = Map<String, Value>;

/// A remote entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub sys: Sys,
    #[serde(default)]
    pub fields: Fields,
}

/// A remote asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub sys: Sys,
    #[serde(default)]
    pub fields: Fields,
}

macro_rules! localized_accessors {
    ($ty:ty) => {
        impl $ty {
            #[must_use]
            pub fn id(&self) -> &str {
                &self.sys.id
            }

            #[must_use]
            pub const fn is_published(&self) -> bool {
                self.sys.published_version.is_some()
            }

            /// Value of `field` in the `locale` slot.
            #[must_use]
            pub fn field(&self, field: &str, locale: &str) -> Option<&Value> {
                self.fields.get(field)?.get(locale)
            }

            /// Set `field` in the `locale` slot, keeping other locales.
            pub fn set_field(&mut self, field: &str, locale: &str, value: Value) {
                let slot = self
                    .fields
                    .entry(field.to_string())
                    .or_insert_with(|| Value::Object(Map::new()));
                if !slot.is_object() {
                    *slot = Value::Object(Map::new());
                }
                if let Value::Object(locales) = slot {
                    locales.insert(locale.to_string(), value);
                }
            }
        }
    };
}

localized_accessors!(Entry);
localized_accessors!(Asset);

impl Entry {
    /// Content type id, when the API reported one.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.sys.content_type.as_ref().map(|ct| ct.sys.id.as_str())
    }
}

impl Asset {
    /// Whether the uploaded file has been processed into a hosted URL.
    #[must_use]
    pub fn is_processed(&self, locale: &str) -> bool {
        self.field("file", locale)
            .and_then(|file| file.get("url"))
            .is_some()
    }
}

/// Paged list response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default)]
    pub total: u64,
}

/// Description of an asset to upload from a public URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAsset {
    pub title: String,
    pub file_name: String,
    pub content_type: String,
    pub upload_url: String,
}

/// Filter for listing entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryQuery {
    pub content_type: Option<String>,
    pub limit: u32,
    pub skip: u32,
}

impl Default for EntryQuery {
    fn default() -> Self {
        Self {
            content_type: None,
            limit: 100,
            skip: 0,
        }
    }
}

impl EntryQuery {
    /// Query string for the entries endpoint, including the leading `?`.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut query = format!("?limit={}&skip={}", self.limit, self.skip);
        if let Some(content_type) = &self.content_type {
            query.push_str("&content_type=");
            query.push_str(&urlencoding::encode(content_type));
        }
        query
    }
}

/// Builder for a localized field map written under a single locale.
#[derive(Debug, Clone)]
pub struct LocalizedFields {
    locale: String,
    fields: Fields,
}

impl LocalizedFields {
    #[must_use]
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            fields: Map::new(),
        }
    }

    /// Set `field` to `value` under the builder's locale.
    #[must_use]
    pub fn with(mut self, field: &str, value: impl Into<Value>) -> Self {
        let mut slot = Map::new();
        slot.insert(self.locale.clone(), value.into());
        self.fields.insert(field.to_string(), Value::Object(slot));
        self
    }

    /// Like [`Self::with`], serializing `value` first. Unserializable values
    /// become `null`.
    #[must_use]
    pub fn with_serialized<T: Serialize>(self, field: &str, value: &T) -> Self {
        let value = serde_json::to_value(value).unwrap_or(Value::Null);
        self.with(field, value)
    }

    #[must_use]
    pub fn build(self) -> Fields {
        self.fields
    }
}
