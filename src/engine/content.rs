use std::collections::HashMap;

use crate::models::{User, Video};

use super::tokenizer::tokenize;

/// Weight contributed by each declared interest
pub const INTEREST_WEIGHT: f64 = 1.0;
/// Weight contributed by each token of the user's name
pub const NAME_TOKEN_WEIGHT: f64 = 0.2;
/// Multiplier applied to weights matched in title and description text
pub const TEXT_MATCH_FACTOR: f64 = 0.1;
/// Flat bonus when user and video moods agree
pub const MOOD_BONUS: f64 = 0.5;

/// Per-user token weights, built once per ranking request
///
/// Scoring a whole catalog against the same user reuses this table instead
/// of rebuilding it for every video.
#[derive(Debug, Clone, Default)]
pub struct UserProfile {
    weights: HashMap<String, f64>,
    mood: Option<String>,
}

impl UserProfile {
    pub fn new(user: &User) -> Self {
        let mut weights: HashMap<String, f64> = HashMap::new();

        for interest in &user.interests {
            *weights.entry(interest.to_lowercase()).or_default() += INTEREST_WEIGHT;
        }
        for token in tokenize(user.name.as_str()) {
            *weights.entry(token).or_default() += NAME_TOKEN_WEIGHT;
        }

        Self {
            weights,
            mood: normalized_mood(user.mood.as_deref()),
        }
    }

    /// Weight for a lowercase token, zero when the user has none
    pub fn weight(&self, token: &str) -> f64 {
        self.weights.get(token).copied().unwrap_or(0.0)
    }

    /// Lowercased mood, if the user has a non-empty one
    pub fn mood(&self) -> Option<&str> {
        self.mood.as_deref()
    }

    /// Affinity between this profile and a video. Never negative.
    pub fn score(&self, video: &Video) -> f64 {
        let mut score = 0.0;

        for tag in &video.tags {
            score += self.weight(&tag.to_lowercase());
        }

        let text_tokens = tokenize(video.title.as_str())
            .into_iter()
            .chain(tokenize(video.description.as_deref()));
        for token in text_tokens {
            score += TEXT_MATCH_FACTOR * self.weight(&token);
        }

        if let (Some(own), Some(theirs)) = (self.mood(), normalized_mood(video.mood.as_deref())) {
            if own == theirs {
                score += MOOD_BONUS;
            }
        }

        score
    }
}

/// Scores a single user/video pair
pub fn content_score(user: &User, video: &Video) -> f64 {
    UserProfile::new(user).score(video)
}

// Empty moods count as absent.
pub(crate) fn normalized_mood(mood: Option<&str>) -> Option<String> {
    mood.filter(|m| !m.is_empty()).map(str::to_lowercase)
}
