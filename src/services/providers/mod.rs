/// External catalog sources
///
/// A provider fetches third-party video metadata that gets merged into the
/// local catalog. Providers report failures as errors; the sync step decides
/// that a failed fetch simply contributes nothing.
use crate::{error::AppResult, models::Video};

pub mod http_catalog;

pub use http_catalog::HttpCatalogProvider;

/// Trait for external catalog providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Fetch the provider's current catalog
    ///
    /// Items that cannot be mapped to a [`Video`] are dropped, not reported.
    async fn fetch_videos(&self) -> AppResult<Vec<Video>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
