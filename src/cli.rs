use crate::bundle::{Variant, VariantSet};
use crate::config::{PackageInfo, ProjectConfig, constants};
use crate::driver::{Bundler, RollupCli, WatchSettings, run_once, run_watch};
use crate::error::TaskError;
use crate::mode::{BuildOptions, Mode};
use crate::tasks::{BundleTask, CleanTask, Task, TaskRunner};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Subcommand, Debug)]
#[command(version, about, long_about = None)]
pub enum Commands {
    /// Bundle the library: es, cjs and umd, or only the minified umd
    Bundle {
        /// Rebuild es, cjs and umd whenever a source file changes
        #[clap(short, long)]
        watch: bool,
        /// Build only the minified umd bundle
        #[clap(short, long)]
        minify: bool,
        /// Show bundling progress (default, never in watch mode)
        #[clap(short, long, overrides_with = "no_progress")]
        progress: bool,
        /// Hide bundling progress
        #[clap(long = "no-progress", overrides_with = "progress")]
        no_progress: bool,
    },

    /// Clean previous output, then bundle es, cjs and umd
    Build,
}

/// bundleforge Command
#[derive(Parser, Debug)]
#[command(version, about = None)]
pub struct Cli {
    /// Project root
    #[clap(long, global = true, default_value = ".")]
    pub root: PathBuf,
    /// Project config file, relative to the root
    #[clap(long, global = true, default_value = constants::CONFIG_FILE)]
    pub config: PathBuf,
    #[command(subcommand)]
    pub cmd: Commands,
}

impl Commands {
    /// Flags of the `bundle` subcommand; `build` always bundles without progress
    pub fn build_options(&self) -> BuildOptions {
        match self {
            Commands::Bundle {
                watch,
                minify,
                progress,
                no_progress,
            } => BuildOptions::new(*watch, *minify, *progress || !*no_progress),
            Commands::Build => BuildOptions::new(false, false, false),
        }
    }
}

/// Project root plus its loaded configuration
#[derive(Debug, Clone)]
pub struct Project {
    pub root: PathBuf,
    pub config: ProjectConfig,
}

impl Project {
    pub fn new(root: impl Into<PathBuf>, config: ProjectConfig) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    pub fn load(root: &Path, config_file: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let config = ProjectConfig::load(&root.join(config_file))?;
        if let Some(package) = PackageInfo::read(root) {
            info!("Project {}", package.label());
        }
        Ok(Self::new(root, config))
    }

    pub fn bundler(&self) -> Arc<dyn Bundler> {
        Arc::new(RollupCli::new(
            self.config.rollup_bin(&self.root),
            &self.root,
        ))
    }

    pub fn clean_targets(&self) -> Vec<PathBuf> {
        self.config
            .clean_targets()
            .iter()
            .map(|dir| self.root.join(dir))
            .collect()
    }

    /// Watch the entry point's directory, never the build output
    pub fn watch_settings(&self) -> WatchSettings {
        let source_dir = self
            .config
            .entry
            .parent()
            .map(|dir| self.root.join(dir))
            .unwrap_or_else(|| self.root.clone());
        WatchSettings::new(source_dir).ignoring(self.clean_targets())
    }
}

pub async fn bundle_command(
    project: &Project,
    options: BuildOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    debug!("Starting bundle command");
    debug!("Options: {:?}", options);

    let configs = VariantSet::build(&options, &project.config)?;
    let mode = Mode::select(&options);
    run_mode(&mode, &configs, project.bundler(), project.watch_settings()).await
}

/// Execute the selected mode against already derived configurations
pub async fn run_mode(
    mode: &Mode,
    configs: &VariantSet,
    bundler: Arc<dyn Bundler>,
    settings: WatchSettings,
) -> Result<(), Box<dyn std::error::Error>> {
    match mode {
        Mode::OneShot(variants) => {
            let report = run_once(bundler, configs.select(variants)).await;
            if !report.is_success() {
                return Err(TaskError::BuildFailed {
                    variants: report.failed(),
                }
                .into());
            }
            info!("Bundled {} variant(s)", variants.len());
        }
        Mode::Watch(variants) => {
            info!("Entering watch mode...");
            run_watch(bundler, configs.select(variants), settings).await?;
        }
    }
    Ok(())
}

/// The `build` task: clean, then bundle every standard variant
pub fn build_runner(
    project: &Project,
    bundler: Arc<dyn Bundler>,
    configs: &VariantSet,
) -> TaskRunner {
    let steps: Vec<Box<dyn Task>> = vec![
        Box::new(CleanTask::new(project.clean_targets())),
        Box::new(BundleTask::new(bundler, configs.select(&Variant::STANDARD))),
    ];
    TaskRunner::new().register("build", steps)
}

pub async fn build_command(project: &Project) -> Result<(), Box<dyn std::error::Error>> {
    debug!("Starting build command");

    let options = Commands::Build.build_options();
    let configs = VariantSet::build(&options, &project.config)?;
    build_runner(project, project.bundler(), &configs)
        .run("build")
        .await?;
    Ok(())
}
