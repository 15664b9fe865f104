use crate::bundle::{PluginChain, PluginKind, Variant, WarningFilter};
use crate::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Es,
    Cjs,
    /// Universal module definition
    Umd,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Es => "es",
            OutputFormat::Cjs => "cjs",
            OutputFormat::Umd => "umd",
        }
    }

    pub fn needs_export_name(&self) -> bool {
        matches!(self, OutputFormat::Umd)
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputDescriptor {
    pub format: OutputFormat,
    pub file: PathBuf,
    /// Global export name, universal bundles only
    pub name: Option<String>,
    pub strict: bool,
}

/// One complete set of instructions for the bundler
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildConfiguration {
    pub entry_point: PathBuf,
    pub plugins: PluginChain,
    pub warning_filter: WarningFilter,
    pub legacy: bool,
    pub output: OutputDescriptor,
}

/// Fields of [`OutputDescriptor`] a derived variant replaces
#[derive(Debug, Clone, Default)]
pub struct OutputOverride {
    format: Option<OutputFormat>,
    file: Option<PathBuf>,
}

impl OutputOverride {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn format(mut self, format: OutputFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = Some(file.into());
        self
    }

    fn apply(self, output: &mut OutputDescriptor) {
        if let Some(format) = self.format {
            output.format = format;
        }
        if let Some(file) = self.file {
            output.file = file;
        }
    }
}

impl BuildConfiguration {
    /// Clone this configuration and replace output fields. Fails when the
    /// result is identical to `self`, which would silently duplicate the base.
    pub fn derive(&self, variant: Variant, output: OutputOverride) -> ConfigResult<Self> {
        let mut derived = self.clone();
        output.apply(&mut derived.output);

        if derived == *self {
            return Err(ConfigError::NoopOverride { variant });
        }
        Ok(derived)
    }

    /// Check the rules every configuration of `variant` must satisfy: its
    /// fixed output format, the export name of universal bundles and, for the
    /// minified bundle, the minifier directly after CommonJS interop.
    pub fn validate(&self, variant: Variant) -> ConfigResult<()> {
        if self.output.format != variant.format() {
            return Err(ConfigError::WrongFormat {
                variant,
                expected: variant.format(),
                found: self.output.format,
            });
        }

        if variant == Variant::MinifiedUmd {
            let commonjs = self.plugins.position(PluginKind::Commonjs);
            let uglify = self.plugins.position(PluginKind::Uglify);
            match (commonjs, uglify) {
                (Some(c), Some(u)) if u == c + 1 => {}
                _ => {
                    return Err(ConfigError::MisplacedPlugin {
                        variant,
                        plugin: PluginKind::Uglify,
                        after: PluginKind::Commonjs,
                    });
                }
            }
        }

        match (self.output.format.needs_export_name(), &self.output.name) {
            (true, None) => Err(ConfigError::MissingExportName { variant }),
            (false, Some(_)) => Err(ConfigError::UnexpectedExportName { variant }),
            _ => Ok(()),
        }
    }
}
