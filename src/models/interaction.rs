use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single user action on a video. Append-only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Interaction {
    pub user_id: String,
    pub video_id: String,
    /// Free-form, conventionally like | view | watch | share
    pub action: String,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Interaction {
    pub fn new(
        user_id: impl Into<String>,
        video_id: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            video_id: video_id.into(),
            action: action.into(),
            created_at: Utc::now(),
        }
    }
}

/// Request body for recording an interaction
#[derive(Debug, Clone, Deserialize)]
pub struct NewInteraction {
    pub user_id: String,
    pub video_id: String,
    pub action: String,
}

impl From<NewInteraction> for Interaction {
    fn from(new: NewInteraction) -> Self {
        Interaction::new(new.user_id, new.video_id, new.action)
    }
}
