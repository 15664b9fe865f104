use crate::error::TaskResult;
use crate::tasks::Task;
use crate::util::file::clean_dir;
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::info;

/// Empties output directories, keeping the directories themselves
pub struct CleanTask {
    targets: Vec<PathBuf>,
}

impl CleanTask {
    pub fn new(targets: Vec<PathBuf>) -> Self {
        Self { targets }
    }
}

#[async_trait]
impl Task for CleanTask {
    fn name(&self) -> String {
        "clean".to_string()
    }

    async fn run(&self) -> TaskResult<()> {
        for target in &self.targets {
            let removed = clean_dir(target).await?;
            info!("Cleaned {} ({} entries)", target.display(), removed);
        }
        Ok(())
    }
}
