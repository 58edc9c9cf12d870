mod interaction;
mod user;
mod video;

pub use interaction::{Interaction, NewInteraction};
pub use user::{MoodUpdate, NewUser, User, UserUpdate};
pub use video::{NewVideo, Video};
