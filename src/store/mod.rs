use async_trait::async_trait;
use serde::Serialize;

use crate::{
    error::AppResult,
    models::{Interaction, User, UserUpdate, Video},
};

pub mod json_file;

pub use json_file::JsonFileRepository;

/// Consistent copy of every collection, taken under a single read
///
/// Videos are in catalog insertion order, which the ranker relies on to
/// break ties.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub videos: Vec<Video>,
    pub users: Vec<User>,
    pub interactions: Vec<Interaction>,
}

impl Snapshot {
    pub fn user(&self, user_id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == user_id)
    }
}

/// Collection sizes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Counts {
    pub videos: usize,
    pub users: usize,
    pub interactions: usize,
}

/// Storage for the catalog, users and interaction log
///
/// Implementations serialize writers so readers always observe a consistent
/// state. The recommendation core never talks to a repository directly; it
/// receives a [`Snapshot`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Repository: Send + Sync {
    /// All videos in insertion order
    async fn list_videos(&self) -> AppResult<Vec<Video>>;

    async fn get_video(&self, video_id: &str) -> AppResult<Option<Video>>;

    /// Fails with `Conflict` when the id is taken
    async fn create_video(&self, video: Video) -> AppResult<Video>;

    /// Fails with `NotFound` when absent. Interactions referencing the video are kept.
    async fn delete_video(&self, video_id: &str) -> AppResult<()>;

    /// Inserts videos whose id is not yet present, in order, and returns how many were added
    async fn merge_videos(&self, videos: Vec<Video>) -> AppResult<usize>;

    async fn get_user(&self, user_id: &str) -> AppResult<Option<User>>;

    /// Fails with `Conflict` when the id is taken
    async fn create_user(&self, user: User) -> AppResult<User>;

    /// Applies a partial update. Fails with `NotFound` when absent.
    async fn update_user(&self, user_id: &str, update: UserUpdate) -> AppResult<User>;

    /// Appends to the log after checking that user and video exist
    async fn record_interaction(&self, interaction: Interaction) -> AppResult<()>;

    async fn snapshot(&self) -> AppResult<Snapshot>;

    async fn counts(&self) -> AppResult<Counts>;
}
