//! Entity structs for postlift.
//!
//! [`Post`] and its nested types mirror the static export. [`BlogPost`] is the
//! composite record pushed to the remote store, linked to its sub-entries and
//! assets through [`ResourceRef`]s.

mod composite;
mod linked;
mod post;
mod reference;

pub use composite::BlogPost;
pub use linked::LinkedEntryIds;
pub use post::{Export, Image, Navigation, Photo, Post, ProductInfo, Review, Scores, Seo};
pub use reference::ResourceRef;
