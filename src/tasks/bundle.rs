use crate::bundle::{BuildConfiguration, Variant};
use crate::driver::{Bundler, run_once};
use crate::error::{TaskError, TaskResult};
use crate::tasks::Task;
use async_trait::async_trait;
use std::sync::Arc;

/// One-shot build of a fixed set of variants; fails if any of them failed
pub struct BundleTask {
    bundler: Arc<dyn Bundler>,
    configs: Vec<(Variant, BuildConfiguration)>,
}

impl BundleTask {
    pub fn new(bundler: Arc<dyn Bundler>, configs: Vec<(Variant, BuildConfiguration)>) -> Self {
        Self { bundler, configs }
    }
}

#[async_trait]
impl Task for BundleTask {
    fn name(&self) -> String {
        "bundle".to_string()
    }

    async fn run(&self) -> TaskResult<()> {
        let report = run_once(Arc::clone(&self.bundler), self.configs.clone()).await;
        if report.is_success() {
            Ok(())
        } else {
            Err(TaskError::BuildFailed {
                variants: report.failed(),
            })
        }
    }
}
