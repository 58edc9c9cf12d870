use std::collections::HashMap;

use crate::models::{Interaction, Video};

/// Boost added to a tag each time the user interacts with a video carrying it
pub const INTERACTION_TAG_BOOST: f64 = 0.5;

/// Video lookup by id. Later entries win on duplicate ids.
pub type VideoIndex<'a> = HashMap<&'a str, &'a Video>;

pub fn index_videos(videos: &[Video]) -> VideoIndex<'_> {
    videos.iter().map(|v| (v.id.as_str(), v)).collect()
}

/// Per-video boost derived from the user's interaction history
///
/// Every tag on a video the user interacted with accumulates
/// [`INTERACTION_TAG_BOOST`]. Each catalog video then scores the sum of the
/// accumulated boosts of its own tags, so a tag touched once lifts every
/// video sharing it, including the one interacted with.
///
/// Interactions pointing at videos no longer in the catalog are skipped.
pub fn graph_scores<'a>(
    user_id: &str,
    interactions: &[Interaction],
    videos_by_id: &VideoIndex<'a>,
) -> HashMap<&'a str, f64> {
    let mut tag_boost: HashMap<String, f64> = HashMap::new();

    for interaction in interactions.iter().filter(|i| i.user_id == user_id) {
        let Some(video) = videos_by_id.get(interaction.video_id.as_str()) else {
            continue;
        };
        for tag in &video.tags {
            *tag_boost.entry(tag.to_lowercase()).or_default() += INTERACTION_TAG_BOOST;
        }
    }

    videos_by_id
        .iter()
        .map(|(&id, video)| {
            let score: f64 = video
                .tags
                .iter()
                .map(|tag| tag_boost.get(&tag.to_lowercase()).copied().unwrap_or(0.0))
                .sum();
            (id, score)
        })
        .collect()
}
