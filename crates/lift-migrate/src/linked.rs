//! Creation of the three sub-entries each blog post links to.

use lift_cms::{CmsError, Entry, Fields, LocalizedFields};
use lift_core::coerce::{float_or_zero, int_or_zero, iso_date};
use lift_core::entities::{LinkedEntryIds, Post, ResourceRef};
use serde_json::Value;

use crate::checkpoint::Checkpoint;
use crate::report::PhaseReport;
use crate::resolver::bound_asset;
use crate::retry::with_backoff;
use crate::session::Session;

pub const SEO_TYPE: &str = "seo";
pub const PRODUCT_INFO_TYPE: &str = "productInfo";
pub const SCORES_TYPE: &str = "scores";

/// SEO fields. `featured_image` is an asset link, or null when unbound.
#[must_use]
pub fn seo_fields(post: &Post, featured_image: Option<&str>, locale: &str) -> Fields {
    let featured = featured_image.map_or(Value::Null, |id| {
        serde_json::to_value(ResourceRef::asset(id)).unwrap_or(Value::Null)
    });
    LocalizedFields::new(locale)
        .with("title", post.seo.title.clone())
        .with("og_title", post.seo.og_title.clone())
        .with("description", post.seo.description.clone())
        .with("featured_image", featured)
        .with("link", post.seo.link.clone())
        .build()
}

/// Product attributes with numeric and date coercion.
#[must_use]
pub fn product_info_fields(post: &Post, locale: &str) -> Fields {
    let info = &post.product_info;
    LocalizedFields::new(locale)
        .with("title", format!("Product Info for {}", post.title))
        .with("product_type", info.product_type.clone())
        .with("brand", info.brand.clone())
        .with("strain", info.strain.clone())
        .with("price", info.price.clone())
        .with("cost", float_or_zero(info.cost.as_ref()))
        .with("weight", float_or_zero(info.weight.as_ref()))
        .with(
            "listed_thc_percentage",
            float_or_zero(info.listed_thc_percentage.as_ref()),
        )
        .with("package_date", iso_date(info.package_date.as_deref()))
        .with("purchase_date", iso_date(info.purchase_date.as_deref()))
        .with("dispensary", info.dispensary.clone())
        .build()
}

/// Integer scores and their free-text notes.
#[must_use]
pub fn scores_fields(post: &Post, locale: &str) -> Fields {
    let scores = &post.scores;
    LocalizedFields::new(locale)
        .with("title", format!("Scores for {}", post.title))
        .with("strength", int_or_zero(scores.strength.as_ref()))
        .with("strength_notes", scores.strength_notes.clone())
        .with("taste", int_or_zero(scores.taste.as_ref()))
        .with("taste_notes", scores.taste_notes.clone())
        .with("quality", int_or_zero(scores.quality.as_ref()))
        .with("quality_notes", scores.quality_notes.clone())
        .with("overall_score", int_or_zero(scores.overall_score.as_ref()))
        .with("overall_notes", scores.overall_notes.clone())
        .build()
}

/// Create and publish the SEO, product info, and scores entries for every
/// post not yet in `linked`, checkpointing the id triple per post.
///
/// A failure abandons the rest of that post and moves on to the next.
pub async fn create_linked_entries(
    session: &Session,
    posts: &[Post],
    assets: &Checkpoint<String>,
    linked: &mut Checkpoint<LinkedEntryIds>,
) -> PhaseReport {
    let mut report = PhaseReport::default();

    for post in posts {
        if linked.has(&post.id) {
            tracing::debug!(post_id = %post.id, "linked entries already created");
            report.skipped += 1;
            continue;
        }

        let ids = match create_for_post(session, post, assets).await {
            Ok(ids) => ids,
            Err(error) => {
                tracing::error!(post_id = %post.id, %error, "failed to create linked entries");
                report.failed += 1;
                continue;
            }
        };

        match linked.record(post.id.clone(), ids) {
            Ok(()) => {
                tracing::info!(post_id = %post.id, "linked entries created");
                report.completed += 1;
            }
            Err(error) => {
                tracing::error!(post_id = %post.id, %error, "failed to save linked entries checkpoint");
                report.failed += 1;
            }
        }
    }
    report
}

async fn create_for_post(
    session: &Session,
    post: &Post,
    assets: &Checkpoint<String>,
) -> Result<LinkedEntryIds, CmsError> {
    let locale = session.locale();
    let featured = post
        .seo
        .featured_image
        .as_deref()
        .and_then(|url| bound_asset(assets, url));

    let seo = create_published(session, SEO_TYPE, seo_fields(post, featured, locale)).await?;
    let product_info =
        create_published(session, PRODUCT_INFO_TYPE, product_info_fields(post, locale)).await?;
    let scores = create_published(session, SCORES_TYPE, scores_fields(post, locale)).await?;

    Ok(LinkedEntryIds {
        seo_id: seo.sys.id,
        product_info_id: product_info.sys.id,
        scores_id: scores.sys.id,
    })
}

/// Create an entry and publish it straight away, both under the write policy.
pub(crate) async fn create_published(
    session: &Session,
    content_type: &str,
    fields: Fields,
) -> Result<Entry, CmsError> {
    let store = session.store();
    let draft = with_backoff(&session.write, content_type, || {
        store.create_entry(content_type, fields.clone())
    })
    .await?;
    with_backoff(&session.write, content_type, || store.publish_entry(&draft)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use lift_core::entities::{ProductInfo, Scores, Seo};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn sample() -> Post {
        Post {
            id: "42".into(),
            title: "Blue Dream".into(),
            seo: Seo {
                title: Some("Blue Dream Review".into()),
                featured_image: Some("https://x/hero.jpg".into()),
                ..Default::default()
            },
            product_info: ProductInfo {
                brand: Some("Acme".into()),
                price: Some(json!("$40")),
                cost: Some(json!("abc")),
                weight: Some(json!("3.5")),
                listed_thc_percentage: Some(json!(22.5)),
                package_date: Some("3/9/23".into()),
                purchase_date: Some(String::new()),
                ..Default::default()
            },
            scores: Scores {
                strength: Some(json!("8")),
                taste: Some(json!("7.9")),
                quality: None,
                overall_score: Some(json!("n/a")),
                strength_notes: Some("<p>Heavy</p>".into()),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn seo_links_featured_image_or_null() {
        let fields = seo_fields(&sample(), Some("asset-1"), "en-US");
        assert_eq!(
            fields["featured_image"],
            json!({ "en-US": { "sys": { "type": "Link", "linkType": "Asset", "id": "asset-1" } } })
        );
        assert_eq!(fields["title"], json!({ "en-US": "Blue Dream Review" }));
        assert_eq!(fields["link"], json!({ "en-US": null }));

        let unbound = seo_fields(&sample(), None, "en-US");
        assert_eq!(unbound["featured_image"], json!({ "en-US": null }));
    }

    #[test]
    fn product_info_coerces_numbers_and_dates() {
        let fields = product_info_fields(&sample(), "en-US");
        assert_eq!(fields["title"], json!({ "en-US": "Product Info for Blue Dream" }));
        assert_eq!(fields["price"], json!({ "en-US": "$40" }));
        assert_eq!(fields["cost"], json!({ "en-US": 0.0 }));
        assert_eq!(fields["weight"], json!({ "en-US": 3.5 }));
        assert_eq!(fields["listed_thc_percentage"], json!({ "en-US": 22.5 }));
        assert_eq!(fields["package_date"], json!({ "en-US": "2023-03-09" }));
        assert_eq!(fields["purchase_date"], json!({ "en-US": null }));
    }

    #[test]
    fn scores_take_leading_integers() {
        let fields = scores_fields(&sample(), "de-DE");
        assert_eq!(fields["title"], json!({ "de-DE": "Scores for Blue Dream" }));
        assert_eq!(fields["strength"], json!({ "de-DE": 8 }));
        assert_eq!(fields["taste"], json!({ "de-DE": 7 }));
        assert_eq!(fields["quality"], json!({ "de-DE": 0 }));
        assert_eq!(fields["overall_score"], json!({ "de-DE": 0 }));
        assert_eq!(fields["strength_notes"], json!({ "de-DE": "<p>Heavy</p>" }));
    }
}
