//! Storage abstractions for the station list and the notified snapshot.
//!
//! ## Directory Structure
//!
//! ```text
//! storage/
//! ├── config.toml           # Bot configuration
//! ├── list.txt              # Station directory: "<name> <id>" per line
//! └── sent_buses.txt        # Notified snapshot: one station name per line
//! ```

pub mod local;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{NotifiedSet, StationDirectory};

// Re-export for convenience
pub use local::LocalStorage;

/// Trait for bot storage backends.
#[async_trait]
pub trait BotStorage: Send + Sync {
    /// Load the station directory. A missing list is an empty directory.
    async fn load_stations(&self) -> Result<StationDirectory>;

    /// Overwrite the station list with `directory`.
    async fn save_stations(&self, directory: &StationDirectory) -> Result<()>;

    /// Load the notified snapshot. A missing snapshot is an empty set.
    async fn load_notified(&self) -> Result<NotifiedSet>;

    /// Overwrite the notified snapshot with `notified`.
    async fn save_notified(&self, notified: &NotifiedSet) -> Result<()>;
}
