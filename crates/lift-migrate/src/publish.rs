//! Creation and publishing of the top-level blog post entries.

use lift_cms::{Fields, LocalizedFields};
use lift_core::entities::BlogPost;

use crate::checkpoint::Checkpoint;
use crate::linked::create_published;
use crate::report::PhaseReport;
use crate::session::{Session, pause};

pub const REVIEW_POST_TYPE: &str = "reviewPost";

/// Localized fields of a `reviewPost` entry.
#[must_use]
pub fn blog_post_fields(post: &BlogPost, locale: &str) -> Fields {
    LocalizedFields::new(locale)
        .with("title", post.title.clone())
        .with("date", post.date.clone())
        .with("excerpt", post.excerpt.clone())
        .with("slug", post.slug.clone())
        .with("template_name", post.template_name.clone())
        .with_serialized("seo", &post.seo)
        .with_serialized("product_info", &post.product_info)
        .with("short_review", post.short_review.clone())
        .with("long_review", post.long_review.clone())
        .with_serialized("photos", &post.photos)
        .with_serialized("scores", &post.scores)
        .with("previous_post", post.previous_post.clone())
        .with("next_post", post.next_post.clone())
        .build()
}

/// Create and publish every blog post whose slug is not in `published`.
///
/// After each attempted post, successful or not, waits the configured
/// publish delay before moving on.
pub async fn publish_posts(
    session: &Session,
    posts: &[BlogPost],
    published: &mut Checkpoint<String>,
) -> PhaseReport {
    let mut report = PhaseReport::default();

    for post in posts {
        let slug = post.slug.as_str();
        if published.has(slug) {
            tracing::debug!(slug, "blog post already published");
            report.skipped += 1;
            continue;
        }

        let fields = blog_post_fields(post, session.locale());
        match create_published(session, REVIEW_POST_TYPE, fields).await {
            Ok(entry) => match published.record(slug, entry.sys.id.clone()) {
                Ok(()) => {
                    tracing::info!(slug, entry_id = %entry.sys.id, "created and published blog post");
                    report.completed += 1;
                }
                Err(error) => {
                    tracing::error!(slug, %error, "failed to save blog post checkpoint");
                    report.failed += 1;
                }
            },
            Err(error) => {
                tracing::error!(slug, title = %post.title, %error, "failed to create blog post");
                report.failed += 1;
            }
        }

        pause(session.throttle.publish()).await;
    }
    report
}
