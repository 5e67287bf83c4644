use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ResourceRef;

/// A fully assembled `reviewPost`, ready for remote creation.
///
/// Every sub-object of the source post has been replaced by a
/// [`ResourceRef`] with a concrete remote id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogPost {
    pub title: String,
    pub date: Option<String>,
    pub excerpt: Option<String>,
    pub slug: String,
    pub template_name: Option<String>,
    pub seo: ResourceRef,
    pub product_info: ResourceRef,
    pub short_review: Option<String>,
    pub long_review: Option<String>,
    pub photos: Vec<ResourceRef>,
    pub scores: ResourceRef,
    pub previous_post: Option<Value>,
    pub next_post: Option<Value>,
}
