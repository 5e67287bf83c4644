use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Top-level shape of the static export file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Export {
    #[serde(default)]
    pub entries: Vec<Post>,
}

/// One migratable post from the export. Read-only for the life of a run.
///
/// Every nested object defaults when absent so a sparse record still loads;
/// coercion of individual values happens when remote fields are built.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Post {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub template_name: Option<String>,
    #[serde(default)]
    pub photos: Vec<Photo>,
    #[serde(default)]
    pub seo: Seo,
    #[serde(default)]
    pub product_info: ProductInfo,
    #[serde(default)]
    pub scores: Scores,
    #[serde(default)]
    pub review: Review,
    #[serde(default)]
    pub navigation: Navigation,
}

impl Post {
    /// Source URLs of every photo carrying an image, in export order.
    pub fn image_urls(&self) -> impl Iterator<Item = &str> {
        self.photos
            .iter()
            .filter_map(|photo| photo.image.as_ref())
            .filter_map(|image| image.url.as_deref())
            .filter(|url| !url.is_empty())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Photo {
    #[serde(default)]
    pub image: Option<Image>,
}

/// Image descriptor inside a photo. `url` is the only field used for matching.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Image {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Seo {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub og_title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub featured_image: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

/// Product attributes. Numeric fields stay raw until coerced.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProductInfo {
    #[serde(default)]
    pub product_type: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub strain: Option<String>,
    #[serde(default)]
    pub price: Option<Value>,
    #[serde(default)]
    pub cost: Option<Value>,
    #[serde(default)]
    pub weight: Option<Value>,
    #[serde(default)]
    pub listed_thc_percentage: Option<Value>,
    #[serde(default)]
    pub package_date: Option<String>,
    #[serde(default)]
    pub purchase_date: Option<String>,
    #[serde(default)]
    pub dispensary: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Scores {
    #[serde(default)]
    pub strength: Option<Value>,
    #[serde(default)]
    pub strength_notes: Option<String>,
    #[serde(default)]
    pub taste: Option<Value>,
    #[serde(default)]
    pub taste_notes: Option<String>,
    #[serde(default)]
    pub quality: Option<Value>,
    #[serde(default)]
    pub quality_notes: Option<String>,
    #[serde(default)]
    pub overall_score: Option<Value>,
    #[serde(default)]
    pub overall_notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Review {
    #[serde(default)]
    pub short_review: Option<String>,
    #[serde(default)]
    pub long_review: Option<String>,
}

/// Neighbour links as exported; passed through untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Navigation {
    #[serde(default)]
    pub previous_post: Option<Value>,
    #[serde(default)]
    pub next_post: Option<Value>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {other}"
        ))),
    }
}
