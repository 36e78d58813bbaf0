pub mod binding;
pub mod error;
pub mod gateway;
pub mod locator;
pub mod reader;

// Re-export key types
pub use binding::{Snapshot, SourceBinding};
pub use error::SourceError;
pub use gateway::SyncGateway;
pub use locator::{bind_explicit, FileLocator};
pub use reader::{has_training_data, read_data, REQUIRED_KEY};
