use crate::models::{Interaction, User, Video};

use super::content::UserProfile;
use super::graph::{graph_scores, index_videos};
use super::EngineError;

/// A ranked video paired with a score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredVideo<'a> {
    pub score: f64,
    pub video: &'a Video,
}

/// Recommends videos for a user, best first, at most `limit` of them
pub fn rank<'a>(
    user: &User,
    videos: &'a [Video],
    interactions: &[Interaction],
    limit: usize,
) -> Result<Vec<&'a Video>, EngineError> {
    check_limit(limit)?;

    Ok(ranked_candidates(user, videos, interactions)
        .into_iter()
        .take(limit)
        .map(|scored| scored.video)
        .collect())
}

/// Same ordering as [`rank`], with each score rescaled to a 0..=100 percentage
///
/// The maximum is taken over the mood-filtered candidate list before
/// truncation. When that maximum is not positive every percentage is zero.
pub fn rank_with_scores<'a>(
    user: &User,
    videos: &'a [Video],
    interactions: &[Interaction],
    limit: usize,
) -> Result<Vec<ScoredVideo<'a>>, EngineError> {
    check_limit(limit)?;

    let ranked = ranked_candidates(user, videos, interactions);
    let max_score = ranked
        .iter()
        .map(|scored| scored.score)
        .fold(f64::NEG_INFINITY, f64::max);

    Ok(ranked
        .into_iter()
        .take(limit)
        .map(|scored| ScoredVideo {
            score: percentage(scored.score, max_score),
            video: scored.video,
        })
        .collect())
}

/// Keeps only videos matching the mood, unless none do
///
/// Without a mood the candidates pass through untouched. Order is preserved.
pub fn mood_fallback<'a>(mood: Option<&str>, candidates: Vec<ScoredVideo<'a>>) -> Vec<ScoredVideo<'a>> {
    let Some(mood) = mood.filter(|m| !m.is_empty()) else {
        return candidates;
    };

    let preferred: Vec<ScoredVideo<'a>> = candidates
        .iter()
        .filter(|scored| scored.video.mood_matches(mood))
        .copied()
        .collect();

    if preferred.is_empty() {
        candidates
    } else {
        preferred
    }
}

// Raw scores, stable descending sort, then mood fallback. Shared by both
// entry points so their orderings cannot drift apart.
fn ranked_candidates<'a>(
    user: &User,
    videos: &'a [Video],
    interactions: &[Interaction],
) -> Vec<ScoredVideo<'a>> {
    let profile = UserProfile::new(user);
    let videos_by_id = index_videos(videos);
    let boosts = graph_scores(&user.id, interactions, &videos_by_id);

    let mut scored: Vec<ScoredVideo<'a>> = videos
        .iter()
        .map(|video| {
            let boost = boosts.get(video.id.as_str()).copied().unwrap_or(0.0);
            ScoredVideo {
                score: profile.score(video) + boost,
                video,
            }
        })
        .collect();

    // `sort_by` is stable: equal scores keep catalog order
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));

    mood_fallback(user.mood.as_deref(), scored)
}

fn percentage(score: f64, max_score: f64) -> f64 {
    if max_score <= 0.0 {
        0.0
    } else {
        score / max_score * 100.0
    }
}

fn check_limit(limit: usize) -> Result<(), EngineError> {
    if limit == 0 {
        return Err(EngineError::InvalidLimit(limit));
    }
    Ok(())
}
