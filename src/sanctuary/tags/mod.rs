//! Tag support for sanctuary.
//!
//! Tags label resources and may be grouped under a category. There is exactly
//! one authoritative tag collection, the [`TagStore`], owned by the
//! application coordinator. Views read it directly or subscribe to its
//! [`TagEvent`]s; nothing keeps a second copy of the list.
//!
//! ## Rules
//!
//! - `id` and `name` are required and non-blank; ids are unique.
//! - No two tags share a lower-cased name within the same category. Tags
//!   without a category form a single "uncategorized" bucket.
//! - An empty category label means "uncategorized". Any other label, even one
//!   made of spaces, is a category of its own.
//! - Categories are never stored on their own. [`TagStore::get_all_categories`]
//!   derives them from the current tags on every call.
//!
//! ## Persistence
//!
//! Every successful mutation rewrites the whole `tags` key. Storage failures are
//! logged by [`crate::storage::Persistence`]; the in-memory collection stays
//! authoritative either way.

pub mod store;

use crate::model::Tag;

pub use store::TagStore;

/// Committed change to the tag collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagEvent {
    Added(Tag),
    Updated(Tag),
    Removed(String),
    Loaded(usize),
    Cleared,
}
