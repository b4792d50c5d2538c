/*!
 * Core Module
 * Backing store, configuration, and error handling
 */

pub mod config;
pub mod errors;
pub mod sequence;

// Re-export for convenience
pub use config::{BackoffConfig, StressConfig};
pub use errors::{HarnessError, HarnessResult, ListError, ListResult};
pub use sequence::{Sequence, StoreMonitor};
