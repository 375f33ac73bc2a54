pub mod media;
pub mod stats;
pub mod watch_entry;

pub use media::{MediaType, MovieRecord};
pub use stats::{GoalProgress, WatchStats};
pub use watch_entry::WatchEntry;
