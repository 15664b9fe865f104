use crate::bundle::{
    BuildConfiguration, OutputFormat, OutputOverride, Plugin, PluginKind, UglifyOptions, factory,
    patch,
};
use crate::config::ProjectConfig;
use crate::error::{ConfigError, ConfigResult};
use crate::mode::BuildOptions;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    Es,
    Cjs,
    Umd,
    MinifiedUmd,
}

impl Variant {
    /// Everything except the minified bundle
    pub const STANDARD: [Variant; 3] = [Variant::Es, Variant::Cjs, Variant::Umd];

    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Es => "es",
            Variant::Cjs => "cjs",
            Variant::Umd => "umd",
            Variant::MinifiedUmd => "minified-umd",
        }
    }

    /// The output format this variant always produces
    pub fn format(&self) -> OutputFormat {
        match self {
            Variant::Es => OutputFormat::Es,
            Variant::Cjs => OutputFormat::Cjs,
            Variant::Umd | Variant::MinifiedUmd => OutputFormat::Umd,
        }
    }

    /// The variant this one is derived from, if any
    pub fn base(&self) -> Option<Variant> {
        match self {
            Variant::Cjs => Some(Variant::Es),
            Variant::MinifiedUmd => Some(Variant::Umd),
            Variant::Es | Variant::Umd => None,
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// CommonJS build: the ES build with a different output format and file
pub fn derive_cjs(
    es: &BuildConfiguration,
    project: &ProjectConfig,
) -> ConfigResult<BuildConfiguration> {
    es.derive(
        Variant::Cjs,
        OutputOverride::new()
            .format(OutputFormat::Cjs)
            .file(project.bundle_file(".cjs.js")),
    )
}

/// Minified universal build: the universal build written to a `.min.js`
/// file, with the minifier running right after CommonJS interop
pub fn derive_minified_umd(
    umd: &BuildConfiguration,
    project: &ProjectConfig,
) -> ConfigResult<BuildConfiguration> {
    let mut minified = umd.derive(
        Variant::MinifiedUmd,
        OutputOverride::new().file(project.bundle_file(".min.js")),
    )?;

    if !minified
        .plugins
        .insert_after(PluginKind::Commonjs, Plugin::Uglify(UglifyOptions::default()))
    {
        return Err(ConfigError::MissingPlugin {
            variant: Variant::MinifiedUmd,
            plugin: PluginKind::Commonjs,
        });
    }

    Ok(minified)
}

/// All four configurations, derived and validated
#[derive(Debug, Clone)]
pub struct VariantSet {
    configs: IndexMap<Variant, BuildConfiguration>,
}

impl VariantSet {
    pub fn build(options: &BuildOptions, project: &ProjectConfig) -> ConfigResult<Self> {
        let es = factory::es(options, project);
        let cjs = derive_cjs(&es, project)?;
        let umd = factory::umd(options, project);
        let minified = derive_minified_umd(&umd, project)?;

        let mut configs = IndexMap::new();
        configs.insert(Variant::Es, es);
        configs.insert(Variant::Cjs, cjs);
        configs.insert(Variant::Umd, umd);
        configs.insert(Variant::MinifiedUmd, minified);

        for (variant, overrides) in &project.overrides {
            if let Some(config) = configs.get_mut(variant) {
                *config = patch::apply_patch(config, *variant, overrides)?;
            }
        }

        for (variant, config) in &configs {
            config.validate(*variant)?;
            if let Some(base) = variant.base().and_then(|base| configs.get(&base)) {
                if base == config {
                    return Err(ConfigError::NoopOverride { variant: *variant });
                }
            }
            debug!(
                "Configured {}: {} -> {:?} ({} plugins)",
                variant,
                config.output.format,
                config.output.file,
                config.plugins.len()
            );
        }

        Ok(Self { configs })
    }

    pub fn get(&self, variant: Variant) -> Option<&BuildConfiguration> {
        self.configs.get(&variant)
    }

    /// Owned copies of the requested configurations, in request order
    pub fn select(&self, variants: &[Variant]) -> Vec<(Variant, BuildConfiguration)> {
        variants
            .iter()
            .filter_map(|v| self.configs.get(v).map(|config| (*v, config.clone())))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Variant, &BuildConfiguration)> {
        self.configs.iter()
    }
}
