//! Pure transform from source posts to composite blog posts.
//!
//! No remote calls happen here: every reference comes from the in-memory
//! checkpoint maps.

use lift_core::coerce::slugify;
use lift_core::entities::{BlogPost, LinkedEntryIds, Post, ResourceRef};

use crate::checkpoint::Checkpoint;
use crate::error::MigrateError;
use crate::report::PhaseReport;
use crate::resolver::bound_asset;

/// The post's own slug, or one derived from its title.
#[must_use]
pub fn post_slug(post: &Post) -> String {
    post.slug
        .as_deref()
        .filter(|slug| !slug.is_empty())
        .map_or_else(|| slugify(&post.title), str::to_string)
}

/// Build the composite record for one post.
///
/// Photos without a bound asset are dropped.
///
/// # Errors
///
/// Returns [`MigrateError::MissingLinkedEntries`] when the post's sub-entries
/// were never created.
pub fn assemble_post(
    post: &Post,
    assets: &Checkpoint<String>,
    linked: &Checkpoint<LinkedEntryIds>,
) -> Result<BlogPost, MigrateError> {
    let ids = linked
        .get(&post.id)
        .ok_or_else(|| MigrateError::MissingLinkedEntries {
            post_id: post.id.clone(),
        })?;

    let photos = post
        .image_urls()
        .filter_map(|url| bound_asset(assets, url))
        .map(ResourceRef::asset)
        .collect();

    Ok(BlogPost {
        title: post.title.clone(),
        date: post.date.clone(),
        excerpt: post.excerpt.clone(),
        slug: post_slug(post),
        template_name: post.template_name.clone(),
        seo: ResourceRef::entry(&ids.seo_id),
        product_info: ResourceRef::entry(&ids.product_info_id),
        short_review: post.review.short_review.clone(),
        long_review: post.review.long_review.clone(),
        photos,
        scores: ResourceRef::entry(&ids.scores_id),
        previous_post: post.navigation.previous_post.clone(),
        next_post: post.navigation.next_post.clone(),
    })
}

/// Assemble every post whose linked entries exist, in input order.
pub fn assemble_posts(
    posts: &[Post],
    assets: &Checkpoint<String>,
    linked: &Checkpoint<LinkedEntryIds>,
) -> (Vec<BlogPost>, PhaseReport) {
    let mut report = PhaseReport::default();
    let mut assembled = Vec::with_capacity(posts.len());

    for post in posts {
        match assemble_post(post, assets, linked) {
            Ok(blog_post) => {
                report.completed += 1;
                assembled.push(blog_post);
            }
            Err(error) => {
                tracing::warn!(post_id = %post.id, %error, "skipping post");
                report.missed += 1;
            }
        }
    }
    (assembled, report)
}
