pub mod cache;
pub mod debounce;
pub mod error;
pub mod search;
pub mod stats;
pub mod store;
pub mod tracker;

pub use cache::SearchCache;
pub use debounce::Debouncer;
pub use error::TrackerError;
pub use search::SearchProxy;
pub use stats::aggregate;
pub use store::WatchStore;
pub use tracker::{ProviderStatus, Tracker, TrackerOptions};
