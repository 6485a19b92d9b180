//! State slices and their transitions.
//!
//! Each slice has a state struct, an action enum and a `reduce` function
//! taking the current state and one action and returning the next state.
//! Actions use the `{ "type": "SET_VIDEOS", "payload": ... }` envelope on the
//! wire. A kind no slice knows deserializes to that slice's `Unknown` action,
//! which leaves the state as it was.
//!
//! - [`video`]: the video page (videos, active video, search, tag selection,
//!   add-video modal).
//! - [`resource`]: resource CRUD with loading/error flags and filters.
//! - [`tag`]: tag loading/error flags and filters. The tag list itself lives in
//!   [`crate::tags::TagStore`]; this reducer forwards mutations to it.
//!
//! Reducers never touch storage. Persisting the result of a mutation is the
//! job of whoever dispatches, see [`crate::app`].

pub mod resource;
pub mod tag;
pub mod video;

pub use resource::{ResourceAction, ResourceFilterUpdate, ResourceState};
pub use tag::{TagAction, TagFilterUpdate, TagState};
pub use video::{VideoAction, VideoState};

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::{json, Value};

#[derive(Deserialize)]
struct Envelope {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    payload: Value,
}

/// Reads an action envelope with `decode`, the slice's derived decoder.
///
/// The kind alone is decoded first so an unknown kind becomes `unknown`
/// whatever its payload looks like.
fn decode_action<'de, D, A>(
    deserializer: D,
    decode: fn(Value) -> serde_json::Result<A>,
    unknown: A,
) -> std::result::Result<A, D::Error>
where
    D: Deserializer<'de>,
    A: PartialEq,
{
    let envelope = Envelope::deserialize(deserializer)?;
    match decode(json!({ "type": &envelope.kind })) {
        Ok(action) if action == unknown || envelope.payload.is_null() => return Ok(action),
        _ => {}
    }
    decode(json!({ "type": envelope.kind, "payload": envelope.payload }))
        .map_err(D::Error::custom)
}
