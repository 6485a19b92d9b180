use crate::filter::filter_videos;
use crate::model::Video;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::trace;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoState {
    pub videos: Vec<Video>,
    /// Id of the video open in the player
    pub active_video: Option<String>,
    pub search_term: String,
    pub selected_tags: Vec<String>,
    pub is_add_video_modal_open: bool,
    pub loading: bool,
    pub error: Option<String>,
}

impl VideoState {
    /// Videos matching the current search term and tag selection.
    pub fn visible_videos(&self) -> Vec<&Video> {
        filter_videos(&self.videos, &self.search_term, &self.selected_tags)
    }

    pub fn active(&self) -> Option<&Video> {
        let id = self.active_video.as_deref()?;
        self.videos.iter().find(|v| v.id == id)
    }

    /// Distinct tags across all loaded videos, in first-seen order.
    pub fn all_tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = Vec::new();
        for tag in self.videos.iter().flat_map(|v| v.tags.iter()) {
            if !tags.contains(&tag.as_str()) {
                tags.push(tag);
            }
        }
        tags
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    remote = "Self",
    tag = "type",
    content = "payload",
    rename_all = "SCREAMING_SNAKE_CASE"
)]
pub enum VideoAction {
    SetVideos(Vec<Video>),
    /// Opens the player on a video id; `None` closes it
    SetActiveVideo(Option<String>),
    SetSearchTerm(String),
    SetSelectedTags(Vec<String>),
    /// Deselects the tag if selected, otherwise appends it to the selection
    ToggleTag(String),
    SetIsAddVideoModalOpen(bool),
    SetLoading(bool),
    SetError(Option<String>),
    #[serde(other)]
    Unknown,
}

impl Serialize for VideoAction {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        VideoAction::serialize(self, serializer)
    }
}

impl<'de> Deserialize<'de> for VideoAction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        super::decode_action(deserializer, VideoAction::deserialize, VideoAction::Unknown)
    }
}

pub fn reduce(state: VideoState, action: VideoAction) -> VideoState {
    match action {
        VideoAction::SetVideos(videos) => VideoState { videos, ..state },
        VideoAction::SetActiveVideo(active_video) => VideoState {
            active_video,
            ..state
        },
        VideoAction::SetSearchTerm(search_term) => VideoState {
            search_term,
            ..state
        },
        VideoAction::SetSelectedTags(selected_tags) => VideoState {
            selected_tags,
            ..state
        },
        VideoAction::ToggleTag(tag) => {
            let mut selected_tags = state.selected_tags;
            if selected_tags.contains(&tag) {
                selected_tags.retain(|t| *t != tag);
            } else {
                selected_tags.push(tag);
            }
            VideoState {
                selected_tags,
                ..state
            }
        }
        VideoAction::SetIsAddVideoModalOpen(open) => VideoState {
            is_add_video_modal_open: open,
            ..state
        },
        VideoAction::SetLoading(loading) => VideoState { loading, ..state },
        VideoAction::SetError(error) => VideoState { error, ..state },
        VideoAction::Unknown => {
            trace!("ignoring unknown video action");
            state
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn video(id: &str, title: &str, tags: &[&str]) -> Video {
        serde_json::from_value(json!({"id": id, "title": title, "tags": tags})).unwrap()
    }

    #[test]
    fn toggle_tag_twice_is_identity() {
        let state = VideoState {
            selected_tags: vec!["ai".into(), "ml".into()],
            ..Default::default()
        };

        let once = reduce(state.clone(), VideoAction::ToggleTag("llm".into()));
        assert_eq!(once.selected_tags, vec!["ai", "ml", "llm"]);
        let twice = reduce(once, VideoAction::ToggleTag("llm".into()));
        assert_eq!(twice, state);

        let removed = reduce(state.clone(), VideoAction::ToggleTag("ai".into()));
        assert_eq!(removed.selected_tags, vec!["ml"]);
        let restored = reduce(removed, VideoAction::ToggleTag("ai".into()));
        let mut a = restored.selected_tags.clone();
        let mut b = state.selected_tags.clone();
        a.sort();
        b.sort();
        assert_eq!(a, b);
    }

    #[test]
    fn active_video_sets_and_clears() {
        let v = video("dQw4w9WgXcQ", "Intro", &[]);
        let state = reduce(VideoState::default(), VideoAction::SetVideos(vec![v.clone()]));
        let state = reduce(state, VideoAction::SetActiveVideo(Some(v.id.clone())));
        assert_eq!(state.active_video.as_deref(), Some("dQw4w9WgXcQ"));
        assert_eq!(state.active(), Some(&v));
        let state = reduce(state, VideoAction::SetActiveVideo(None));
        assert_eq!(state.active_video, None);
        assert_eq!(state.active(), None);
    }

    #[test]
    fn unknown_action_keeps_state() {
        let state = VideoState {
            search_term: "gpt".into(),
            ..Default::default()
        };
        let action: VideoAction =
            serde_json::from_value(json!({"type": "SOMETHING_ELSE"})).unwrap();
        assert_eq!(action, VideoAction::Unknown);
        assert_eq!(reduce(state.clone(), action), state);
    }

    #[test]
    fn unknown_action_with_payload_keeps_state() {
        let state = VideoState {
            search_term: "gpt".into(),
            ..Default::default()
        };
        let action: VideoAction =
            serde_json::from_value(json!({"type": "RESET", "payload": {"x": 1}})).unwrap();
        assert_eq!(action, VideoAction::Unknown);
        assert_eq!(reduce(state.clone(), action), state);
    }

    #[test]
    fn actions_serialize_as_envelopes() {
        let value = serde_json::to_value(VideoAction::SetSearchTerm("gpt".into())).unwrap();
        assert_eq!(value, json!({"type": "SET_SEARCH_TERM", "payload": "gpt"}));
    }

    #[test]
    fn actions_parse_from_envelopes() {
        let action: VideoAction =
            serde_json::from_value(json!({"type": "SET_SEARCH_TERM", "payload": "gpt"})).unwrap();
        assert_eq!(action, VideoAction::SetSearchTerm("gpt".into()));

        let action: VideoAction =
            serde_json::from_value(json!({"type": "SET_ACTIVE_VIDEO", "payload": null})).unwrap();
        assert_eq!(action, VideoAction::SetActiveVideo(None));

        let action: VideoAction = serde_json::from_value(
            json!({"type": "SET_IS_ADD_VIDEO_MODAL_OPEN", "payload": true}),
        )
        .unwrap();
        assert_eq!(action, VideoAction::SetIsAddVideoModalOpen(true));
    }

    #[test]
    fn visible_videos_follow_search_and_selection() {
        let state = reduce(
            VideoState::default(),
            VideoAction::SetVideos(vec![
                video("a", "GPT explained", &["llm"]),
                video("b", "Diffusion", &["image"]),
            ]),
        );
        assert_eq!(state.visible_videos().len(), 2);
        assert_eq!(state.all_tags(), vec!["llm", "image"]);

        let state = reduce(state, VideoAction::ToggleTag("image".into()));
        let visible: Vec<&str> = state.visible_videos().iter().map(|v| v.id.as_str()).collect();
        assert_eq!(visible, vec!["b"]);

        let state = reduce(state, VideoAction::SetSearchTerm("gpt".into()));
        assert!(state.visible_videos().is_empty());
    }
}
