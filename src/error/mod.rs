/// Centralized error handling for bundleforge
pub mod bundle;
pub mod config;
pub mod task;

pub use bundle::{BundleError, BundleResult};
pub use config::{ConfigError, ConfigResult};
pub use task::{TaskError, TaskResult};
