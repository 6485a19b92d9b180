use super::{resources, CmdMessage, CmdResult};
use crate::app::{App, VideoPage};
use crate::error::{Result, SanctuaryError};
use crate::model::Video;
use crate::reducers::VideoAction;
use crate::remote::VideoSource;
use crate::submit::AddVideoForm;
use tracing::warn;

/// Loads the video list and narrows it by title search and tags.
///
/// A failed load is reported as an error message; videos loaded earlier on
/// the same page stay listed.
pub async fn list(
    page: &mut VideoPage,
    source: &dyn VideoSource,
    search: String,
    tags: Vec<String>,
) -> Result<CmdResult> {
    page.load(source).await;
    page.dispatch(VideoAction::SetSearchTerm(search));
    page.dispatch(VideoAction::SetSelectedTags(tags));

    let state = page.state();
    let listed: Vec<Video> = state.visible_videos().into_iter().cloned().collect();
    let mut result = CmdResult::default();
    if let Some(error) = &state.error {
        result.add_message(CmdMessage::error(error.clone()));
    } else if listed.is_empty() && !state.videos.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "{} videos, none match",
            state.videos.len()
        )));
    }
    Ok(result.with_listed_videos(listed))
}

/// Opens the player on `id`. The page must already hold the video.
pub fn open(page: &mut VideoPage, id: &str) -> Result<CmdResult> {
    page.open_video(id);
    let video = page
        .state()
        .active()
        .cloned()
        .ok_or_else(|| SanctuaryError::VideoNotFound(id.to_string()))?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::info(video.embed_url()));
    Ok(result.with_listed_videos(vec![video]))
}

/// Submits a YouTube URL with tags through the add-video form.
///
/// The URL is checked before anything is sent. After a successful submit
/// the list is reloaded and returned.
pub async fn submit(
    page: &mut VideoPage,
    source: &dyn VideoSource,
    url: String,
    tags: Vec<String>,
) -> Result<CmdResult> {
    let mut form = AddVideoForm::new();
    form.set_url(url.clone());
    for tag in &tags {
        if !form.selected_tags.contains(tag) {
            form.toggle_tag(tag);
        }
    }

    page.open_add_video();
    if let Err(e) = page.submit_video(&mut form, source).await {
        page.close_add_video(&mut form);
        return Err(e);
    }

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Submitted {}", url)));
    if let Some(error) = &page.state().error {
        result.add_message(CmdMessage::warning(format!(
            "Could not reload videos: {}",
            error
        )));
    }
    let listed = page.state().videos.clone();
    Ok(result.with_listed_videos(listed))
}

/// Adapts every loaded video into a `video` resource and adds the ones
/// whose id is not taken yet.
pub async fn import(
    app: &mut App,
    page: &mut VideoPage,
    source: &dyn VideoSource,
) -> Result<CmdResult> {
    page.load(source).await;
    if let Some(error) = &page.state().error {
        let mut result = CmdResult::default();
        result.add_message(CmdMessage::error(error.clone()));
        return Ok(result);
    }

    let videos = page.state().videos.clone();
    let mut imported = Vec::new();
    let mut skipped = 0;
    for video in &videos {
        let resource = match video.to_resource() {
            Ok(resource) => resource,
            Err(e) => {
                warn!(id = %video.id, error = %e, "video cannot become a resource");
                skipped += 1;
                continue;
            }
        };
        if resources::import(app, resource.clone()) {
            imported.push(resource);
        } else {
            skipped += 1;
        }
    }

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Imported {} videos",
        imported.len()
    )));
    if skipped > 0 {
        result.add_message(CmdMessage::info(format!("Skipped {}", skipped)));
    }
    Ok(result.with_affected_resources(imported))
}
