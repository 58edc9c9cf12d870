use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::RwLock;

use crate::{
    error::{AppError, AppResult},
    models::{Interaction, User, UserUpdate, Video},
};

use super::{Counts, Repository, Snapshot};

const VIDEOS_FILE: &str = "videos.json";
const USERS_FILE: &str = "users.json";
const INTERACTIONS_FILE: &str = "interactions.json";

#[derive(Debug, Default)]
struct Collections {
    videos: Vec<Video>,
    users: Vec<User>,
    interactions: Vec<Interaction>,
}

impl Collections {
    fn has_video(&self, video_id: &str) -> bool {
        self.videos.iter().any(|v| v.id == video_id)
    }

    fn has_user(&self, user_id: &str) -> bool {
        self.users.iter().any(|u| u.id == user_id)
    }
}

/// Repository holding everything in memory and mirroring each collection to
/// a pretty-printed JSON file after every mutation
///
/// One `RwLock` guards all three collections, so there is one writer at a time
/// and snapshots never mix states.
pub struct JsonFileRepository {
    data_dir: Option<PathBuf>,
    inner: RwLock<Collections>,
}

impl JsonFileRepository {
    /// Opens (or initializes) the collections under `data_dir`
    ///
    /// Missing files are created as empty arrays. A file that cannot be read
    /// or parsed loads as empty, with a warning.
    pub async fn open(data_dir: impl Into<PathBuf>) -> AppResult<Self> {
        let data_dir = data_dir.into();
        tokio::fs::create_dir_all(&data_dir).await?;

        let collections = Collections {
            videos: load_collection(&data_dir.join(VIDEOS_FILE)).await?,
            users: load_collection(&data_dir.join(USERS_FILE)).await?,
            interactions: load_collection(&data_dir.join(INTERACTIONS_FILE)).await?,
        };

        tracing::info!(
            data_dir = %data_dir.display(),
            videos = collections.videos.len(),
            users = collections.users.len(),
            interactions = collections.interactions.len(),
            "Loaded collections"
        );

        Ok(Self {
            data_dir: Some(data_dir),
            inner: RwLock::new(collections),
        })
    }

    /// A repository that never touches disk
    pub fn in_memory() -> Self {
        Self {
            data_dir: None,
            inner: RwLock::new(Collections::default()),
        }
    }

    async fn persist<T: Serialize>(&self, file: &str, items: &[T]) -> AppResult<()> {
        let Some(dir) = &self.data_dir else {
            return Ok(());
        };
        let json = serde_json::to_string_pretty(items)?;
        tokio::fs::write(dir.join(file), json).await?;
        Ok(())
    }
}

async fn load_collection<T: DeserializeOwned>(path: &Path) -> AppResult<Vec<T>> {
    if !tokio::fs::try_exists(path).await? {
        tokio::fs::write(path, "[]").await?;
        return Ok(Vec::new());
    }

    let data = match tokio::fs::read_to_string(path).await {
        Ok(data) => data,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Unreadable collection, starting empty");
            return Ok(Vec::new());
        }
    };

    match serde_json::from_str(&data) {
        Ok(items) => Ok(items),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Malformed collection, starting empty");
            Ok(Vec::new())
        }
    }
}

fn require_id(kind: &str, id: &str) -> AppResult<()> {
    if id.trim().is_empty() {
        return Err(AppError::InvalidInput(format!("{kind} id cannot be empty")));
    }
    Ok(())
}

#[async_trait]
impl Repository for JsonFileRepository {
    async fn list_videos(&self) -> AppResult<Vec<Video>> {
        Ok(self.inner.read().await.videos.clone())
    }

    async fn get_video(&self, video_id: &str) -> AppResult<Option<Video>> {
        let inner = self.inner.read().await;
        Ok(inner.videos.iter().find(|v| v.id == video_id).cloned())
    }

    async fn create_video(&self, video: Video) -> AppResult<Video> {
        require_id("Video", &video.id)?;

        let mut inner = self.inner.write().await;
        if inner.has_video(&video.id) {
            return Err(AppError::Conflict("Video already exists".to_string()));
        }
        inner.videos.push(video.clone());
        self.persist(VIDEOS_FILE, &inner.videos).await?;

        tracing::info!(video_id = %video.id, "Video created");
        Ok(video)
    }

    async fn delete_video(&self, video_id: &str) -> AppResult<()> {
        let mut inner = self.inner.write().await;
        let position = inner
            .videos
            .iter()
            .position(|v| v.id == video_id)
            .ok_or_else(|| AppError::NotFound("Video not found".to_string()))?;
        inner.videos.remove(position);
        self.persist(VIDEOS_FILE, &inner.videos).await?;

        tracing::info!(video_id = %video_id, "Video deleted");
        Ok(())
    }

    async fn merge_videos(&self, videos: Vec<Video>) -> AppResult<usize> {
        let mut inner = self.inner.write().await;
        let mut added = 0;

        for video in videos {
            if video.id.trim().is_empty() || inner.has_video(&video.id) {
                continue;
            }
            inner.videos.push(video);
            added += 1;
        }

        if added > 0 {
            self.persist(VIDEOS_FILE, &inner.videos).await?;
        }

        tracing::info!(added, total = inner.videos.len(), "Videos merged");
        Ok(added)
    }

    async fn get_user(&self, user_id: &str) -> AppResult<Option<User>> {
        let inner = self.inner.read().await;
        Ok(inner.users.iter().find(|u| u.id == user_id).cloned())
    }

    async fn create_user(&self, user: User) -> AppResult<User> {
        require_id("User", &user.id)?;

        let mut inner = self.inner.write().await;
        if inner.has_user(&user.id) {
            return Err(AppError::Conflict("User already exists".to_string()));
        }
        inner.users.push(user.clone());
        self.persist(USERS_FILE, &inner.users).await?;

        tracing::info!(user_id = %user.id, "User created");
        Ok(user)
    }

    async fn update_user(&self, user_id: &str, update: UserUpdate) -> AppResult<User> {
        let mut inner = self.inner.write().await;
        let user = inner
            .users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
        user.apply(update);
        let updated = user.clone();
        self.persist(USERS_FILE, &inner.users).await?;

        tracing::info!(user_id = %user_id, "User updated");
        Ok(updated)
    }

    async fn record_interaction(&self, interaction: Interaction) -> AppResult<()> {
        let mut inner = self.inner.write().await;
        if !inner.has_user(&interaction.user_id) {
            return Err(AppError::NotFound("User not found".to_string()));
        }
        if !inner.has_video(&interaction.video_id) {
            return Err(AppError::NotFound("Video not found".to_string()));
        }

        tracing::info!(
            user_id = %interaction.user_id,
            video_id = %interaction.video_id,
            action = %interaction.action,
            "Interaction recorded"
        );

        inner.interactions.push(interaction);
        self.persist(INTERACTIONS_FILE, &inner.interactions).await
    }

    async fn snapshot(&self) -> AppResult<Snapshot> {
        let inner = self.inner.read().await;
        Ok(Snapshot {
            videos: inner.videos.clone(),
            users: inner.users.clone(),
            interactions: inner.interactions.clone(),
        })
    }

    async fn counts(&self) -> AppResult<Counts> {
        let inner = self.inner.read().await;
        Ok(Counts {
            videos: inner.videos.len(),
            users: inner.users.len(),
            interactions: inner.interactions.len(),
        })
    }
}
