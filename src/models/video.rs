use serde::{Deserialize, Serialize};

/// A catalog entry that can be recommended
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Video {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Matched case-insensitively; original casing is kept for display
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub mood: Option<String>,
}

impl Video {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            tags: Vec::new(),
            mood: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_mood(mut self, mood: impl Into<String>) -> Self {
        self.mood = Some(mood.into());
        self
    }

    /// Case-insensitive mood comparison. A missing mood never matches.
    pub fn mood_matches(&self, mood: &str) -> bool {
        self.mood
            .as_deref()
            .is_some_and(|own| own.to_lowercase() == mood.to_lowercase())
    }
}

/// Request body for creating a video
#[derive(Debug, Clone, Deserialize)]
pub struct NewVideo {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub mood: Option<String>,
}

impl From<NewVideo> for Video {
    fn from(new: NewVideo) -> Self {
        Self {
            id: new.id,
            title: new.title,
            description: new.description,
            tags: new.tags,
            mood: new.mood,
        }
    }
}
