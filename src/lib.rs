pub mod error;
pub mod history;
pub mod location;
pub mod overrides;
pub mod replay;
pub mod tracker;

pub use error::NavigationError;
pub use history::{History, HistoryEntry, MAX_DEPTH};
pub use location::{Location, NavigationEvent, NavigationType, DEFAULT_KEY};
pub use overrides::{CategoryId, CategoryMetadata, CategoryMetadataOverrides, CategoryMetadataPatch};
pub use replay::Replay;
pub use tracker::{NavigationHistoryTracker, SubscriptionId};
