//! Named task sequences, the outer `build` command among them.

pub mod bundle;
pub mod clean;

use crate::error::{TaskError, TaskResult};
use crate::util::time::format_duration;
use async_trait::async_trait;
use indexmap::IndexMap;
use std::time::Instant;
use tracing::{debug, info};

pub use bundle::BundleTask;
pub use clean::CleanTask;

#[async_trait]
pub trait Task: Send + Sync {
    fn name(&self) -> String;

    async fn run(&self) -> TaskResult<()>;
}

/// Registry of task sequences. Each step runs after the previous one
/// succeeded; the first failure ends the sequence.
#[derive(Default)]
pub struct TaskRunner {
    tasks: IndexMap<String, Vec<Box<dyn Task>>>,
}

impl TaskRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(mut self, name: &str, steps: Vec<Box<dyn Task>>) -> Self {
        debug!(
            "Registering task '{}' with steps {:?}",
            name,
            steps.iter().map(|s| s.name()).collect::<Vec<_>>()
        );
        self.tasks.insert(name.to_string(), steps);
        self
    }

    pub async fn run(&self, name: &str) -> TaskResult<()> {
        let steps = self
            .tasks
            .get(name)
            .ok_or_else(|| TaskError::UnknownTask(name.to_string()))?;

        let started = Instant::now();
        for step in steps {
            let step_started = Instant::now();
            info!("Running '{}'", step.name());
            step.run().await?;
            info!(
                "Finished '{}' in {}",
                step.name(),
                format_duration(step_started.elapsed())
            );
        }

        info!("Task '{}' done in {}", name, format_duration(started.elapsed()));
        Ok(())
    }
}
