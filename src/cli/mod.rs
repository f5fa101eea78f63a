pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "vsh",
    version,
    about = "The virtual environment shell: create, enter and manage named Python virtual environments",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Enter a virtual environment, creating it first when missing
    Enter {
        /// Environment name, or a path to an environment directory
        name: String,

        /// Command to run inside the environment (default: interactive shell)
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,

        /// Python version or interpreter to use when creating
        #[arg(short, long)]
        python: Option<String>,

        /// Startup folder when entering (persisted in the environment config)
        #[arg(short, long)]
        working: Option<PathBuf>,

        /// Ignore the stored startup folder for this invocation
        #[arg(short = 'W', long)]
        ignore_working: bool,

        /// Remove the environment after the shell exits
        #[arg(short, long)]
        ephemeral: bool,

        /// With --ephemeral, remove the environment even when it existed
        /// before this invocation
        #[arg(short, long)]
        force: bool,
    },

    /// Create a virtual environment without entering it
    Create {
        /// Environment name, or a path to an environment directory
        name: String,

        /// Python version or interpreter to use
        #[arg(short, long)]
        python: Option<String>,

        /// Startup folder recorded for the environment
        #[arg(short, long)]
        working: Option<PathBuf>,

        /// Replace an existing environment
        #[arg(short, long)]
        overwrite: bool,

        /// Give the environment access to system site packages
        #[arg(long)]
        system_site_packages: bool,

        /// Do not seed pip into the environment
        #[arg(long)]
        no_seed: bool,
    },

    /// Remove a virtual environment and its configuration
    Remove {
        /// Environment name, or a path to an environment directory
        name: String,

        /// Remove even when the directory does not look like an environment
        #[arg(short, long)]
        force: bool,
    },

    /// List virtual environments
    List {
        /// Folder to search (default: the environments home)
        #[arg(long)]
        path: Option<PathBuf>,
    },

    /// Rebuild an environment with a new interpreter, keeping its config
    Upgrade {
        /// Environment name, or a path to an environment directory
        name: String,

        /// Python version or interpreter to rebuild with
        #[arg(short, long)]
        python: Option<String>,
    },

    /// Check environment and dependencies
    Doctor,
}

pub async fn run(cli: Cli) -> crate::core::error::Result<()> {
    match cli.command {
        Commands::Enter {
            name,
            command,
            python,
            working,
            ignore_working,
            ephemeral,
            force,
        } => {
            commands::enter::execute(
                name,
                command,
                python,
                working,
                ignore_working,
                ephemeral,
                force,
            )
            .await
        }

        Commands::Create {
            name,
            python,
            working,
            overwrite,
            system_site_packages,
            no_seed,
        } => {
            commands::create::execute(
                name,
                python,
                working,
                overwrite,
                system_site_packages,
                no_seed,
            )
            .await
        }

        Commands::Remove { name, force } => commands::remove::execute(name, force).await,

        Commands::List { path } => commands::list::execute(path).await,

        Commands::Upgrade { name, python } => commands::upgrade::execute(name, python).await,

        Commands::Doctor => commands::doctor::execute().await,
    }
}
