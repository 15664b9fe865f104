pub mod constants;
pub mod project;

pub use project::{PackageInfo, ProjectConfig};
