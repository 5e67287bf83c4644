//! # lift-cms
//!
//! Remote content store access for postlift.
//!
//! [`ContentStore`] is the capability contract the migration core consumes:
//! asset lookup and creation, entry CRUD, publish and unpublish. [`CmsClient`]
//! implements it against a Contentful-style management REST API, scoped to one
//! space environment and one locale.
//!
//! Failures are classified by [`CmsError`] so callers can tell rate limiting
//! (HTTP 429) and optimistic version conflicts (HTTP 409) apart from
//! everything else.

mod assets;
mod client;
mod entries;
mod error;
mod http;
mod store;
mod types;

pub use client::CmsClient;
pub use error::CmsError;
pub use store::ContentStore;
pub use types::{
    Asset, Collection, ContentTypeLink, ContentTypeSys, Entry, EntryQuery, Fields,
    LocalizedFields, NewAsset, Sys,
};
