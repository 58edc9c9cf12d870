use serde::Serialize;

use crate::{error::AppResult, models::Video, store::Repository};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeedOutcome {
    pub seeded: usize,
    pub total: usize,
}

/// Ten sample videos spanning the default mood vocabulary
pub fn sample_videos() -> Vec<Video> {
    vec![
        Video::new("adv_1", "Mountain Trek")
            .with_description("Adventure in the Alps")
            .with_tags(["adventure", "travel", "nature"])
            .with_mood("adventurous"),
        Video::new("adv_2", "River Rafting")
            .with_description("Whitewater thrills")
            .with_tags(["adventure", "water"])
            .with_mood("adventurous"),
        Video::new("rom_1", "Paris Love Story")
            .with_description("Romance in Paris")
            .with_tags(["romance", "drama"])
            .with_mood("romance"),
        Video::new("rom_2", "Sunset Date")
            .with_description("Beach romance")
            .with_tags(["romance", "beach"])
            .with_mood("romance"),
        Video::new("edu_1", "ML Basics")
            .with_description("Intro to Machine Learning")
            .with_tags(["ml", "education", "ai"])
            .with_mood("focused"),
        Video::new("edu_2", "Algebra Refresher")
            .with_description("Learn algebra")
            .with_tags(["math", "education"])
            .with_mood("focused"),
        Video::new("fun_1", "Comedy Skit")
            .with_description("Laughs guaranteed")
            .with_tags(["comedy", "fun"])
            .with_mood("cheerful"),
        Video::new("fun_2", "Pranks")
            .with_description("Harmless pranks")
            .with_tags(["fun", "viral"])
            .with_mood("cheerful"),
        Video::new("fit_1", "HIIT Workout")
            .with_description("Quick cardio")
            .with_tags(["fitness", "health"])
            .with_mood("energetic"),
        Video::new("calm_1", "Ocean Waves")
            .with_description("Relaxing sounds")
            .with_tags(["relax", "nature"])
            .with_mood("calm"),
    ]
}

/// Adds the sample videos that are not in the catalog yet
pub async fn seed_videos(repository: &dyn Repository) -> AppResult<SeedOutcome> {
    let seeded = repository.merge_videos(sample_videos()).await?;
    let total = repository.counts().await?.videos;
    Ok(SeedOutcome { seeded, total })
}
