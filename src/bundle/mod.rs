//! Bundle configurations: the data model, the base factory and the variants
//! derived from it.

pub mod factory;
pub mod options;
pub mod patch;
pub mod plugin;
pub mod variant;
pub mod warning;

pub use options::{BuildConfiguration, OutputDescriptor, OutputFormat, OutputOverride};
pub use plugin::{
    BabelOptions, BabelPreset, CommonJsOptions, CompressOptions, Plugin, PluginChain, PluginKind,
    ResolveOptions, UglifyOptions,
};
pub use variant::{Variant, VariantSet, derive_cjs, derive_minified_umd};
pub use warning::{Warning, WarningCode, WarningFilter};
