/// Configuration error types
use crate::bundle::{OutputFormat, PluginKind, Variant};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Override for '{variant}' sets unknown key '{path}'")]
    UnknownKey { variant: Variant, path: String },
    #[error("Override for '{variant}' does not describe a valid configuration: {source}")]
    InvalidOverride {
        variant: Variant,
        #[source]
        source: serde_json::Error,
    },
    #[error("Deriving '{variant}' left the base configuration unchanged")]
    NoopOverride { variant: Variant },
    #[error("Cannot derive '{variant}': plugin '{plugin}' is not in the chain")]
    MissingPlugin { variant: Variant, plugin: PluginKind },
    #[error("'{variant}' must produce {expected} output, but is configured for {found}")]
    WrongFormat {
        variant: Variant,
        expected: OutputFormat,
        found: OutputFormat,
    },
    #[error("'{variant}' must run plugin '{plugin}' directly after '{after}'")]
    MisplacedPlugin {
        variant: Variant,
        plugin: PluginKind,
        after: PluginKind,
    },
    #[error("Universal bundle '{variant}' needs an export name")]
    MissingExportName { variant: Variant },
    #[error("Export name is only valid for universal bundles, but '{variant}' sets one")]
    UnexpectedExportName { variant: Variant },
}

/// Result type alias for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
