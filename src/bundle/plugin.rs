//! Plugin chain handed to the bundler.
//!
//! Plugins are data: each variant names the rollup plugin and carries the
//! options it should be primed with. The bundler adapter turns them into the
//! option objects the plugins expect.

use crate::config::constants;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PluginKind {
    NodeResolve,
    Json,
    Commonjs,
    Babel,
    Uglify,
    Progress,
    Filesize,
}

impl PluginKind {
    /// Name the rollup CLI resolves the plugin package by
    pub fn as_str(&self) -> &'static str {
        match self {
            PluginKind::NodeResolve => "node-resolve",
            PluginKind::Json => "json",
            PluginKind::Commonjs => "commonjs",
            PluginKind::Babel => "babel",
            PluginKind::Uglify => "uglify",
            PluginKind::Progress => "progress",
            PluginKind::Filesize => "filesize",
        }
    }
}

impl fmt::Display for PluginKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolution of bare imports, preferring browser builds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveOptions {
    pub jsnext: bool,
    pub main: bool,
    pub browser: bool,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            jsnext: true,
            main: true,
            browser: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CommonJsOptions {
    pub sourcemap: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "preset", rename_all = "kebab-case")]
pub enum BabelPreset {
    Es3,
    Env { loose: bool, modules: bool },
}

impl BabelPreset {
    fn to_babel(&self) -> Value {
        match self {
            BabelPreset::Es3 => json!("es3"),
            BabelPreset::Env { loose, modules } => {
                let modules = if *modules { json!("auto") } else { json!(false) };
                json!(["env", { "loose": loose, "modules": modules }])
            }
        }
    }
}

/// Downlevel transform settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BabelOptions {
    pub babelrc: bool,
    pub exclude: Vec<String>,
    pub presets: Vec<BabelPreset>,
    pub plugins: Vec<String>,
}

impl Default for BabelOptions {
    fn default() -> Self {
        Self {
            babelrc: false,
            exclude: vec![constants::BABEL_EXCLUDE.to_string()],
            presets: vec![
                BabelPreset::Es3,
                BabelPreset::Env {
                    loose: true,
                    modules: false,
                },
            ],
            plugins: vec!["external-helpers".to_string()],
        }
    }
}

/// Compressor passes enabled for the minified bundle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompressOptions {
    pub sequences: bool,
    pub dead_code: bool,
    pub conditionals: bool,
    pub booleans: bool,
    pub unused: bool,
    pub if_return: bool,
    pub join_vars: bool,
    pub drop_console: bool,
}

impl Default for CompressOptions {
    fn default() -> Self {
        Self {
            sequences: true,
            dead_code: true,
            conditionals: true,
            booleans: true,
            unused: true,
            if_return: true,
            join_vars: true,
            drop_console: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UglifyOptions {
    pub mangle: bool,
    pub compress: CompressOptions,
}

impl Default for UglifyOptions {
    fn default() -> Self {
        Self {
            mangle: true,
            compress: CompressOptions::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "name", content = "options", rename_all = "kebab-case")]
pub enum Plugin {
    NodeResolve(ResolveOptions),
    Json,
    Commonjs(CommonJsOptions),
    Babel(BabelOptions),
    Uglify(UglifyOptions),
    Progress,
    Filesize,
}

impl Plugin {
    pub fn kind(&self) -> PluginKind {
        match self {
            Plugin::NodeResolve(_) => PluginKind::NodeResolve,
            Plugin::Json => PluginKind::Json,
            Plugin::Commonjs(_) => PluginKind::Commonjs,
            Plugin::Babel(_) => PluginKind::Babel,
            Plugin::Uglify(_) => PluginKind::Uglify,
            Plugin::Progress => PluginKind::Progress,
            Plugin::Filesize => PluginKind::Filesize,
        }
    }

    /// Options object in the shape the rollup plugin itself expects, if any
    pub fn plugin_options(&self) -> Option<Value> {
        match self {
            Plugin::NodeResolve(o) => Some(json!({
                "jsnext": o.jsnext,
                "main": o.main,
                "browser": o.browser,
            })),
            Plugin::Commonjs(o) => Some(json!({ "sourcemap": o.sourcemap })),
            Plugin::Babel(o) => Some(json!({
                "babelrc": o.babelrc,
                "exclude": o.exclude,
                "presets": o.presets.iter().map(BabelPreset::to_babel).collect::<Vec<_>>(),
                "plugins": o.plugins,
            })),
            Plugin::Uglify(o) => {
                let c = &o.compress;
                Some(json!({
                    "mangle": o.mangle,
                    "compress": {
                        "sequences": c.sequences,
                        "dead_code": c.dead_code,
                        "conditionals": c.conditionals,
                        "booleans": c.booleans,
                        "unused": c.unused,
                        "if_return": c.if_return,
                        "join_vars": c.join_vars,
                        "drop_console": c.drop_console,
                    },
                }))
            }
            Plugin::Json | Plugin::Progress | Plugin::Filesize => None,
        }
    }
}

/// Ordered plugin list; order is significant to the bundler
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PluginChain(Vec<Plugin>);

impl PluginChain {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn with(mut self, plugin: Plugin) -> Self {
        self.0.push(plugin);
        self
    }

    pub fn push(&mut self, plugin: Plugin) {
        self.0.push(plugin);
    }

    pub fn position(&self, kind: PluginKind) -> Option<usize> {
        self.0.iter().position(|p| p.kind() == kind)
    }

    pub fn contains(&self, kind: PluginKind) -> bool {
        self.position(kind).is_some()
    }

    /// Insert `plugin` directly after the first `anchor`. Returns false when
    /// the anchor is absent and leaves the chain untouched.
    pub fn insert_after(&mut self, anchor: PluginKind, plugin: Plugin) -> bool {
        match self.position(anchor) {
            Some(index) => {
                self.0.insert(index + 1, plugin);
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, kind: PluginKind) -> Option<Plugin> {
        let index = self.position(kind)?;
        Some(self.0.remove(index))
    }

    pub fn kinds(&self) -> Vec<PluginKind> {
        self.0.iter().map(Plugin::kind).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Plugin> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a PluginChain {
    type Item = &'a Plugin;
    type IntoIter = std::slice::Iter<'a, Plugin>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
