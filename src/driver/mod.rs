//! Runs the bundler over a set of configurations, once or continuously.

pub mod rollup;
pub mod watch;

use crate::bundle::{BuildConfiguration, OutputDescriptor, Variant};
use crate::error::{BundleError, BundleResult};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, error, info};

pub use rollup::RollupCli;
pub use watch::{VariantWatcher, WatchEvent, WatchSettings, run_watch};

/// The external bundling capability
#[async_trait]
pub trait Bundler: Send + Sync {
    async fn bundle(&self, config: &BuildConfiguration) -> BundleResult<Box<dyn Bundle>>;
}

/// A finished in-memory bundle
#[async_trait]
pub trait Bundle: Send + Sync {
    async fn write(&self, output: &OutputDescriptor) -> BundleResult<()>;
}

/// Bundle one configuration and write it to its output file
pub async fn build_variant(bundler: &dyn Bundler, config: &BuildConfiguration) -> BundleResult<()> {
    let bundle = bundler.bundle(config).await?;
    bundle.write(&config.output).await
}

/// Per-variant outcome of a one-shot run
#[derive(Debug, Default)]
pub struct BuildReport {
    outcomes: Vec<(Variant, BundleResult<()>)>,
}

impl BuildReport {
    pub fn outcomes(&self) -> &[(Variant, BundleResult<()>)] {
        &self.outcomes
    }

    pub fn failed(&self) -> Vec<Variant> {
        self.outcomes
            .iter()
            .filter(|(_, result)| result.is_err())
            .map(|(variant, _)| *variant)
            .collect()
    }

    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(|(_, result)| result.is_ok())
    }
}

/// Start every variant at once and wait for all of them. A failing variant
/// is logged and recorded; it never stops the others.
pub async fn run_once(
    bundler: Arc<dyn Bundler>,
    configs: Vec<(Variant, BuildConfiguration)>,
) -> BuildReport {
    let mut handles = Vec::with_capacity(configs.len());

    for (variant, config) in configs {
        let bundler = Arc::clone(&bundler);
        debug!("Issuing {} bundle -> {:?}", variant, config.output.file);
        let handle = tokio::spawn(async move {
            let result = build_variant(bundler.as_ref(), &config).await;
            match &result {
                Ok(()) => info!("Created {} bundle {}", variant, config.output.file.display()),
                Err(e) => error!("Failed to bundle {}: {}", variant, e),
            }
            result
        });
        handles.push((variant, handle));
    }

    let mut report = BuildReport::default();
    for (variant, handle) in handles {
        let result = handle.await.unwrap_or_else(|e| {
            error!("Bundle task for {} aborted: {}", variant, e);
            Err(BundleError::Join(e.to_string()))
        });
        report.outcomes.push((variant, result));
    }

    report
}
