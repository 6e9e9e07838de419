pub mod error;
pub mod snapshot;
pub mod content;
pub mod feed;
pub mod reload;

#[cfg(test)]
pub(crate) mod fixture;

pub use error::ReloadError;
pub use snapshot::{Feeds, Snapshot};
pub use content::{build_archives, load, search};
pub use reload::{GitUpdater, SnapshotStore, SourceUpdater, Watcher, WatcherConfig, Webhook};
