use serde::{Deserialize, Serialize};

/// Remote ids of the three sub-entries created for one source post.
///
/// Checkpointed under the post's own id; field names match the checkpoint
/// file format (`seoId`, `productInfoId`, `scoresId`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkedEntryIds {
    pub seo_id: String,
    pub product_info_id: String,
    pub scores_id: String,
}
