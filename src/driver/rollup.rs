//! [`Bundler`] backed by the rollup command line.
//!
//! The configuration is translated into rollup flags, the bundle is read back
//! from stdout and rollup's `(!)` warning blocks on stderr are routed through
//! the configuration's warning filter.

use crate::bundle::{BuildConfiguration, OutputDescriptor, Warning, WarningCode};
use crate::driver::{Bundle, Bundler};
use crate::error::{BundleError, BundleResult};
use crate::util::file::write_artifact;
use async_trait::async_trait;
use regex::Regex;
use std::path::PathBuf;
use std::process::Stdio;
use std::sync::LazyLock;
use tokio::process::Command;
use tracing::debug;

static WARNING_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\(!\) (.+)$").expect("warning header pattern is valid"));

pub struct RollupCli {
    program: PathBuf,
    root: PathBuf,
}

impl RollupCli {
    /// `root` is both the working directory of rollup and the base of the
    /// relative output paths.
    pub fn new(program: impl Into<PathBuf>, root: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            root: root.into(),
        }
    }
}

/// Rollup flags for one configuration; output goes to stdout
pub fn rollup_args(config: &BuildConfiguration) -> Vec<String> {
    let mut args = vec![
        "--input".to_string(),
        config.entry_point.display().to_string(),
        "--format".to_string(),
        config.output.format.to_string(),
    ];

    if let Some(name) = &config.output.name {
        args.push("--name".to_string());
        args.push(name.clone());
    }
    if !config.output.strict {
        args.push("--no-strict".to_string());
    }
    if config.legacy {
        args.push("--legacy".to_string());
    }

    for plugin in &config.plugins {
        let spec = match plugin.plugin_options() {
            Some(options) => format!("{}={}", plugin.kind(), options),
            None => plugin.kind().to_string(),
        };
        args.push("--plugin".to_string());
        args.push(spec);
    }

    args
}

/// Collect rollup's `(!) Title` warning blocks. Each block runs until the
/// next header or a blank line.
pub fn parse_warnings(stderr: &str) -> Vec<Warning> {
    let mut warnings = Vec::new();
    let mut current: Option<(String, Vec<String>)> = None;

    for line in stderr.lines().map(str::trim_end) {
        if let Some(caps) = WARNING_HEADER.captures(line) {
            if let Some(block) = current.take() {
                warnings.push(to_warning(block));
            }
            current = Some((caps[1].to_string(), Vec::new()));
        } else if line.is_empty() {
            if let Some(block) = current.take() {
                warnings.push(to_warning(block));
            }
        } else if let Some((_, body)) = current.as_mut() {
            body.push(line.to_string());
        } else {
            debug!("rollup: {}", line);
        }
    }

    if let Some(block) = current.take() {
        warnings.push(to_warning(block));
    }
    warnings
}

fn to_warning((title, body): (String, Vec<String>)) -> Warning {
    let code = match title.as_str() {
        "Unresolved dependencies" => WarningCode::UnresolvedImport,
        "Unused external imports" => WarningCode::UnusedExternalImport,
        other => WarningCode::Other(other.to_string()),
    };
    let message = if body.is_empty() {
        title
    } else {
        format!("{}\n{}", title, body.join("\n"))
    };
    Warning::new(code, message)
}

#[async_trait]
impl Bundler for RollupCli {
    async fn bundle(&self, config: &BuildConfiguration) -> BundleResult<Box<dyn Bundle>> {
        let args = rollup_args(config);
        debug!("Running {} {}", self.program.display(), args.join(" "));

        let output = Command::new(&self.program)
            .args(&args)
            .current_dir(&self.root)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| BundleError::Spawn {
                program: self.program.display().to_string(),
                source,
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        for warning in parse_warnings(&stderr) {
            config.warning_filter.on_warn(&warning);
        }

        if !output.status.success() {
            return Err(BundleError::rejected(output.status, stderr.trim()));
        }

        Ok(Box::new(RollupBundle {
            code: output.stdout,
            root: self.root.clone(),
        }))
    }
}

struct RollupBundle {
    code: Vec<u8>,
    root: PathBuf,
}

#[async_trait]
impl Bundle for RollupBundle {
    async fn write(&self, output: &OutputDescriptor) -> BundleResult<()> {
        write_artifact(&self.root.join(&output.file), &self.code).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::{Variant, VariantSet};
    use crate::config::ProjectConfig;
    use crate::mode::BuildOptions;

    fn configs() -> VariantSet {
        VariantSet::build(&BuildOptions::new(false, true, false), &ProjectConfig::default())
            .unwrap()
    }

    #[test]
    fn test_args_for_es() {
        let set = configs();
        let args = rollup_args(set.get(Variant::Es).unwrap());

        assert_eq!(&args[..4], ["--input", "src/main.js", "--format", "es"]);
        assert!(!args.contains(&"--name".to_string()));
        assert!(args.contains(&"--no-strict".to_string()));
        assert!(args.contains(&"--legacy".to_string()));
        assert!(args.contains(&"json".to_string()));
        assert!(args.iter().any(|a| a.starts_with("babel={")));
    }

    #[test]
    fn test_args_for_minified_umd() {
        let set = configs();
        let args = rollup_args(set.get(Variant::MinifiedUmd).unwrap());

        let name = args.iter().position(|a| a == "--name").unwrap();
        assert_eq!(args[name + 1], "main_module");

        let plugins: Vec<_> = args
            .windows(2)
            .filter(|w| w[0] == "--plugin")
            .map(|w| w[1].split('=').next().unwrap().to_string())
            .collect();
        assert_eq!(
            plugins,
            vec!["node-resolve", "json", "commonjs", "uglify", "babel", "filesize"]
        );
    }

    #[test]
    fn test_parse_warnings() {
        let stderr = "\
(!) Unresolved dependencies
https://rollupjs.org/guide/en#warning-treating-module-as-external-dependency
lodash (imported by src/main.js)

(!) Circular dependency
src/a.js -> src/b.js -> src/a.js
(!) Unused external imports
default imported from external module 'x' but never used
";
        let warnings = parse_warnings(stderr);

        assert_eq!(warnings.len(), 3);
        assert_eq!(warnings[0].code, WarningCode::UnresolvedImport);
        assert!(warnings[0].message.contains("lodash (imported by src/main.js)"));
        assert_eq!(
            warnings[1].code,
            WarningCode::Other("Circular dependency".to_string())
        );
        assert_eq!(
            warnings[1].message,
            "Circular dependency\nsrc/a.js -> src/b.js -> src/a.js"
        );
        assert_eq!(warnings[2].code, WarningCode::UnusedExternalImport);
    }

    #[test]
    fn test_parse_ignores_plain_output() {
        assert!(parse_warnings("created dist/main.js in 120ms\n").is_empty());
    }

    #[tokio::test]
    async fn test_missing_program_is_spawn_error() {
        let dir = tempfile::tempdir().unwrap();
        let rollup = RollupCli::new(dir.path().join("no-such-rollup"), dir.path());
        let set = configs();

        let result = rollup.bundle(set.get(Variant::Es).unwrap()).await;
        assert!(matches!(result, Err(BundleError::Spawn { .. })));
    }
}
