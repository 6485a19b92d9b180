//! Core data types.
//!
//! - [`Resource`]: the canonical learning item, one of a closed set of
//!   [`ResourceKind`]s sharing the same base fields.
//! - [`Tag`] / [`Category`]: labels and their loose grouping.
//! - [`ResourceTag`]: resource/tag association records.
//! - [`Video`]: the flat record served by the video endpoints, adapted into a
//!   `Resource` at the boundary.

pub mod category;
pub mod resource;
pub mod resource_tag;
pub mod tag;
pub mod video;

pub use category::{create_category, Category};
pub use resource::{
    create_article_resource, create_book_resource, create_resource, create_video_resource,
    BookMetadata, Metadata, NewResource, Resource, ResourceDetails, ResourceKind, VideoMetadata,
};
pub use resource_tag::{
    add_tags_to_resource, create_resource_tag, resource_tag_ids, tag_resource_ids, ResourceTag,
};
pub use tag::{create_tag, Tag, TagUpdate};
pub use video::Video;
