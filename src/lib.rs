pub mod bundle;
pub mod cli;
pub mod config;
pub mod driver;
pub mod error;
pub mod logging;
pub mod mode;
pub mod tasks;
pub mod util;
