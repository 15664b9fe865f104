// Shared test doubles for the integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use bundleforge::bundle::{BuildConfiguration, OutputDescriptor};
use bundleforge::driver::{Bundle, Bundler};
use bundleforge::error::{BundleError, BundleResult};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Records every bundle and write call; fails bundles whose output file is
/// listed in `failing`
#[derive(Default, Clone)]
pub struct RecordingBundler {
    pub bundled: Arc<Mutex<Vec<BuildConfiguration>>>,
    pub writes: Arc<Mutex<Vec<BuildConfiguration>>>,
    pub failing: Vec<PathBuf>,
}

impl RecordingBundler {
    pub fn failing(files: &[&str]) -> Self {
        Self {
            failing: files.iter().map(PathBuf::from).collect(),
            ..Self::default()
        }
    }

    pub fn writes(&self) -> Vec<BuildConfiguration> {
        self.writes.lock().unwrap().clone()
    }

    pub fn bundled(&self) -> Vec<BuildConfiguration> {
        self.bundled.lock().unwrap().clone()
    }
}

#[async_trait]
impl Bundler for RecordingBundler {
    async fn bundle(&self, config: &BuildConfiguration) -> BundleResult<Box<dyn Bundle>> {
        self.bundled.lock().unwrap().push(config.clone());
        if self.failing.contains(&config.output.file) {
            return Err(BundleError::rejected("exit status: 1", "Could not resolve entry module"));
        }
        Ok(Box::new(RecordingBundle {
            config: config.clone(),
            writes: Arc::clone(&self.writes),
        }))
    }
}

struct RecordingBundle {
    config: BuildConfiguration,
    writes: Arc<Mutex<Vec<BuildConfiguration>>>,
}

#[async_trait]
impl Bundle for RecordingBundle {
    async fn write(&self, output: &OutputDescriptor) -> BundleResult<()> {
        assert_eq!(output, &self.config.output);
        self.writes.lock().unwrap().push(self.config.clone());
        Ok(())
    }
}
