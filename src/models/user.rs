use serde::{Deserialize, Deserializer, Serialize};

/// A viewer whose declared interests and mood drive recommendations
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub mood: Option<String>,
}

impl User {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            interests: Vec::new(),
            mood: None,
        }
    }

    pub fn with_interests<I, S>(mut self, interests: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.interests = interests.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_mood(mut self, mood: impl Into<String>) -> Self {
        self.mood = Some(mood.into());
        self
    }

    /// Applies a partial update in place
    ///
    /// `name` and `interests` change only when present. `mood` follows the
    /// tri-state contract of [`UserUpdate::mood`].
    pub fn apply(&mut self, update: UserUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(interests) = update.interests {
            self.interests = interests;
        }
        if let Some(mood) = update.mood {
            self.mood = mood;
        }
    }
}

/// Request body for creating a user
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub mood: Option<String>,
}

impl From<NewUser> for User {
    fn from(new: NewUser) -> Self {
        Self {
            id: new.id,
            name: new.name,
            interests: new.interests,
            mood: new.mood,
        }
    }
}

/// Partial update for a user
///
/// `mood` is tri-state: omitted leaves it unchanged, `null` clears it,
/// a string sets it.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct UserUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub interests: Option<Vec<String>>,
    #[serde(default, deserialize_with = "present")]
    pub mood: Option<Option<String>>,
}

/// Request body for the dedicated mood endpoint, same contract as [`UserUpdate::mood`]
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct MoodUpdate {
    #[serde(default, deserialize_with = "present")]
    pub mood: Option<Option<String>>,
}

impl From<MoodUpdate> for UserUpdate {
    fn from(update: MoodUpdate) -> Self {
        Self {
            mood: update.mood,
            ..Default::default()
        }
    }
}

// Distinguishes an explicit `null` from a missing field.
fn present<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
