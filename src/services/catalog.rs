use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, AppResult},
    models::Video,
    store::Repository,
};

/// Largest page a client may ask for
pub const MAX_PAGE_SIZE: usize = 100;

/// Mood vocabulary offered even when no video carries it yet
pub const DEFAULT_MOODS: [&str; 6] = [
    "adventurous",
    "romance",
    "focused",
    "cheerful",
    "energetic",
    "calm",
];

/// Filters for listing the catalog
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VideoFilter {
    /// Exact, case-sensitive tag membership
    pub tag: Option<String>,
    /// Case-insensitive mood equality
    pub mood: Option<String>,
}

/// Tags and moods present in the catalog, for building pickers
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CatalogMeta {
    pub tags: Vec<String>,
    pub moods: Vec<String>,
}

/// Checks `page >= 1` and `1 <= page_size <= MAX_PAGE_SIZE`
pub fn validate_page(page: usize, page_size: usize) -> AppResult<()> {
    if page == 0 {
        return Err(AppError::InvalidInput("page must be at least 1".to_string()));
    }
    if page_size == 0 || page_size > MAX_PAGE_SIZE {
        return Err(AppError::InvalidInput(format!(
            "page_size must be between 1 and {MAX_PAGE_SIZE}"
        )));
    }
    Ok(())
}

/// Returns the requested 1-based page and the total item count
///
/// Pages past the end are empty.
pub fn paginate<T>(items: Vec<T>, page: usize, page_size: usize) -> (Vec<T>, usize) {
    let total = items.len();
    let start = page.saturating_sub(1).saturating_mul(page_size);
    let page_items = items.into_iter().skip(start).take(page_size).collect();
    (page_items, total)
}

pub fn filter_videos(videos: Vec<Video>, filter: &VideoFilter) -> Vec<Video> {
    videos
        .into_iter()
        .filter(|v| filter.tag.as_ref().map_or(true, |tag| v.tags.contains(tag)))
        .filter(|v| {
            filter.mood.as_ref().map_or(true, |mood| {
                v.mood.as_deref().unwrap_or_default().to_lowercase() == mood.to_lowercase()
            })
        })
        .collect()
}

/// Lists a filtered page of the catalog in insertion order
pub async fn list_videos(
    repository: &dyn Repository,
    filter: &VideoFilter,
    page: usize,
    page_size: usize,
) -> AppResult<Vec<Video>> {
    validate_page(page, page_size)?;

    let videos = filter_videos(repository.list_videos().await?, filter);
    let (page_items, _) = paginate(videos, page, page_size);
    Ok(page_items)
}

pub fn catalog_meta(videos: &[Video]) -> CatalogMeta {
    let tags: BTreeSet<String> = videos
        .iter()
        .flat_map(|v| v.tags.iter())
        .map(|t| t.to_lowercase())
        .collect();

    let moods: BTreeSet<String> = DEFAULT_MOODS
        .iter()
        .map(|m| m.to_string())
        .chain(videos.iter().filter_map(|v| v.mood.as_deref()).map(str::to_lowercase))
        .collect();

    CatalogMeta {
        tags: tags.into_iter().collect(),
        moods: moods.into_iter().collect(),
    }
}
