use serde::Serialize;

use crate::{error::AppResult, services::providers::CatalogProvider, store::Repository};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SyncOutcome {
    pub fetched: usize,
    pub added: usize,
}

/// Pulls the external catalog and merges videos with unseen ids
///
/// A failing provider is logged and treated as an empty catalog; only local
/// storage errors are returned.
pub async fn sync_external(
    repository: &dyn Repository,
    provider: &dyn CatalogProvider,
) -> AppResult<SyncOutcome> {
    let videos = match provider.fetch_videos().await {
        Ok(videos) => videos,
        Err(e) => {
            tracing::warn!(
                provider = provider.name(),
                error = %e,
                "External catalog fetch failed"
            );
            Vec::new()
        }
    };

    let fetched = videos.len();
    let added = if fetched > 0 {
        repository.merge_videos(videos).await?
    } else {
        0
    };

    tracing::info!(provider = provider.name(), fetched, added, "External sync finished");
    Ok(SyncOutcome { fetched, added })
}
