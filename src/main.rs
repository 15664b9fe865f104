use bundleforge::cli::{Cli, Commands, Project, build_command, bundle_command};
use bundleforge::logging;
use clap::Parser;
use tracing::{debug, error};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let log_path = logging::init();
    if let Some(path) = log_path {
        debug!("Logging to {}", path.display());
    }

    if let Err(e) = run().await {
        error!("{}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Cli::parse();
    let project = Project::load(&args.root, &args.config)?;
    match &args.cmd {
        Commands::Bundle { .. } => {
            bundle_command(&project, args.cmd.build_options()).await?;
        }
        Commands::Build => {
            build_command(&project).await?;
        }
    }
    Ok(())
}
