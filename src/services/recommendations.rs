use serde::Serialize;

use crate::{
    engine::{self, DEFAULT_LIMIT},
    error::{AppError, AppResult},
    models::Video,
    services::catalog::{paginate, validate_page},
    store::Repository,
};

/// Number of ranked candidates computed before paging
pub const CANDIDATE_POOL: usize = 1000;

/// Largest `limit` a client may ask for
pub const MAX_LIMIT: usize = 100;

/// Paging and presentation options for a recommendation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecommendationParams {
    pub limit: usize,
    pub page: usize,
    pub page_size: usize,
    /// Attach match percentages to each video
    pub details: bool,
}

impl Default for RecommendationParams {
    fn default() -> Self {
        Self::with_page_size(10)
    }
}

impl RecommendationParams {
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            page: 1,
            page_size,
            details: true,
        }
    }

    fn validate(&self) -> AppResult<()> {
        if self.limit == 0 || self.limit > MAX_LIMIT {
            return Err(AppError::InvalidInput(format!(
                "limit must be between 1 and {MAX_LIMIT}"
            )));
        }
        validate_page(self.page, self.page_size)
    }
}

/// A recommended video with its match percentage, rounded to one decimal
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ScoredVideoResponse {
    #[serde(flatten)]
    pub video: Video,
    pub score: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum Recommendations {
    Scored(Vec<ScoredVideoResponse>),
    Plain(Vec<Video>),
}

impl Recommendations {
    pub fn len(&self) -> usize {
        match self {
            Recommendations::Scored(items) => items.len(),
            Recommendations::Plain(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Ranks the catalog for a user, then pages and truncates the result
///
/// The ranking runs over one repository snapshot. The page is cut from the
/// full candidate pool first and then capped at `limit`.
pub async fn recommend_for_user(
    repository: &dyn Repository,
    user_id: &str,
    params: RecommendationParams,
) -> AppResult<Recommendations> {
    params.validate()?;

    let snapshot = repository.snapshot().await?;
    let user = snapshot
        .user(user_id)
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let recommendations = if params.details {
        let ranked = engine::rank_with_scores(
            user,
            &snapshot.videos,
            &snapshot.interactions,
            CANDIDATE_POOL,
        )?;
        let (page_items, _) = paginate(ranked, params.page, params.page_size);
        Recommendations::Scored(
            page_items
                .into_iter()
                .take(params.limit)
                .map(|scored| ScoredVideoResponse {
                    video: scored.video.clone(),
                    score: round_one_decimal(scored.score),
                })
                .collect(),
        )
    } else {
        let ranked = engine::rank(user, &snapshot.videos, &snapshot.interactions, CANDIDATE_POOL)?;
        let (page_items, _) = paginate(ranked, params.page, params.page_size);
        Recommendations::Plain(
            page_items
                .into_iter()
                .take(params.limit)
                .cloned()
                .collect(),
        )
    };

    tracing::info!(
        user_id = %user_id,
        candidates = snapshot.videos.len(),
        returned = recommendations.len(),
        details = params.details,
        "Recommendations computed"
    );

    Ok(recommendations)
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
