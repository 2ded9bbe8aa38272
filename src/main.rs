//! Formsync CLI
//!
//! Command-line front end for the users API:
//! - List users
//! - Create, update and delete users
//! - Interactive shell over the same form/table client

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use formsync::terminal::{self, StdinConfirm, TerminalView};
use formsync::{
    config, logging, AssumeYes, Config, Confirm, Deletion, FormSyncClient, HttpUsersApi,
};

#[derive(Parser)]
#[command(name = "formsync")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Form-bound CRUD client for user records")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Users API base URL (overrides config and FORMSYNC_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Config file (default: user config dir, then ./formsync.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all users
    List,

    /// Create a user
    Add {
        name: String,
        mail: String,
    },

    /// Replace a user's name and mail
    Update {
        id: u64,
        name: String,
        mail: String,
    },

    /// Delete a user
    Delete {
        id: u64,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Interactive session
    Shell,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Commands::Config { output } = &cli.command {
        let content = config::generate_default_config();
        match output {
            Some(path) => {
                std::fs::write(path, content)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                println!("Config written to {}", path.display());
            }
            None => print!("{}", content),
        }
        return Ok(());
    }

    let path = match &cli.config {
        Some(path) => Some(path.clone()),
        None => Config::find_config(&Config::default_paths()),
    };
    let loaded = match &path {
        Some(path) => Config::load_with_env(path),
        None => Ok(Config::from_env()),
    };

    // Logging comes up first, with defaults if the file is broken, so the
    // load error is reported through it
    let log_config = loaded
        .as_ref()
        .map(|config| config.logging.clone())
        .unwrap_or_default();
    logging::init(&log_config).context("Failed to initialize logging")?;

    let mut config = match loaded {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}", e);
            return Err(e.into());
        }
    };
    match &path {
        Some(path) => tracing::info!("Loaded config from {:?}", path),
        None => tracing::debug!("Using default config with environment overrides"),
    }
    if let Some(url) = cli.api_url.clone() {
        config.api.base_url = url;
    }

    tracing::debug!(base_url = %config.api.base_url, "Using users API");

    let api = HttpUsersApi::new(&config.api)?;
    let banner_timeout = config.ui.banner_timeout();

    if let Commands::Shell = cli.command {
        let mut client = FormSyncClient::new(api, TerminalView::stdio(true), StdinConfirm)
            .with_banner_timeout(banner_timeout);
        terminal::run_shell(&mut client, terminal::stdin_lines()).await?;
        return Ok(());
    }

    let confirm: Box<dyn Confirm> = match cli.command {
        Commands::Delete { yes: true, .. } => Box::new(AssumeYes),
        _ => Box::new(StdinConfirm),
    };
    let mut client = FormSyncClient::new(api, TerminalView::stdio(false), confirm)
        .with_banner_timeout(banner_timeout);

    // The banner already printed the failure
    let succeeded = match cli.command {
        Commands::List => client.refresh().await.is_ok(),
        Commands::Add { name, mail } => {
            client.set_name(name);
            client.set_mail(mail);
            match client.submit().await {
                Ok(record) => {
                    println!("Created user {}", record.id);
                    true
                }
                Err(_) => false,
            }
        }
        Commands::Update { id, name, mail } => {
            client.enter_edit_mode(id, name, mail);
            match client.submit().await {
                Ok(record) => {
                    println!("Updated user {}", record.id);
                    true
                }
                Err(_) => false,
            }
        }
        Commands::Delete { id, .. } => match client.request_delete(id).await {
            Ok(Deletion::Deleted) => {
                println!("Deleted user {}", id);
                true
            }
            Ok(Deletion::Cancelled) => {
                println!("Cancelled");
                true
            }
            Err(_) => false,
        },
        Commands::Shell | Commands::Config { .. } => true,
    };

    if !succeeded {
        std::process::exit(1);
    }
    Ok(())
}
