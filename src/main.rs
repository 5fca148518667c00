//! Folio CLI - serve and maintain the portfolio content API

use clap::{Args, Parser, Subcommand};
use folio::config::{self, FolioConfig};
use folio::seed::{self, SeedReport};
use folio::server::{self, ServerOptions};
use folio::storage::{self, ContentStore};
use folio::ui::{self, Icons};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "Portfolio content API - profile, skills, projects and contact messages")]
#[command(long_about = r#"
Folio serves a personal portfolio as a small JSON API:
  • GET  /api/profile, /api/skills, /api/projects, /api/experience, /api/education
  • POST /api/messages for the contact form

Without DATABASE_URL the content lives in memory for the life of the process.

Example usage:
  folio serve --port 5000
  DATABASE_URL=sqlite://data/folio.db folio serve --static-dir dist
  folio stats --database-url sqlite://data/folio.db
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone)]
struct StoreArgs {
    /// Connection string of the persistent store (sqlite://PATH)
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed the store and serve the API
    Serve {
        #[command(flatten)]
        store: StoreArgs,

        /// Address to bind
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long, env = "PORT")]
        port: Option<u16>,

        /// Built frontend to serve for non-API paths
        #[arg(long)]
        static_dir: Option<String>,
    },

    /// Seed the configured store and exit
    Seed {
        #[command(flatten)]
        store: StoreArgs,
    },

    /// Show row counts per collection
    Stats {
        #[command(flatten)]
        store: StoreArgs,
    },

    /// List received contact messages
    Messages {
        #[command(flatten)]
        store: StoreArgs,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a starter folio.toml
    Init {
        /// Connection string to record in the config
        #[arg(long)]
        database_url: Option<String>,

        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },
}

fn resolve_config(path: Option<&PathBuf>, overrides: FolioConfig) -> anyhow::Result<FolioConfig> {
    let file = config::load_config(path.map(PathBuf::as_path))?.unwrap_or_default();
    Ok(file.merge(overrides))
}

fn open_configured_store(config: &FolioConfig) -> anyhow::Result<Arc<dyn ContentStore>> {
    let store = storage::open_store(config.database_url())?;
    tracing::debug!("Using {} store", store.backend());
    Ok(store)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match cli.command {
        Commands::Serve { store, host, port, static_dir } => {
            let config = resolve_config(
                cli.config.as_ref(),
                FolioConfig { database_url: store.database_url, host, port, static_dir },
            )?;
            let options = ServerOptions {
                addr: config.socket_addr()?,
                static_dir: config.static_dir(),
            };
            let store = open_configured_store(&config)?;
            server::start_server(options, store).await?;
        }

        Commands::Seed { store } => {
            let config = resolve_config(
                cli.config.as_ref(),
                FolioConfig { database_url: store.database_url, ..FolioConfig::default() },
            )?;
            if config.database_url().is_none() {
                ui::warn("No DATABASE_URL configured; seeding an in-memory store that is discarded on exit");
            }
            let store = open_configured_store(&config)?;

            match seed::seed_store(store.as_ref())? {
                SeedReport::Skipped => ui::info("Seed", "profile already present, nothing to do"),
                report => ui::success(&format!("Seed complete: {}", report)),
            }
            store.close()?;
        }

        Commands::Stats { store } => {
            let config = resolve_config(
                cli.config.as_ref(),
                FolioConfig { database_url: store.database_url, ..FolioConfig::default() },
            )?;
            let store = open_configured_store(&config)?;
            let stats = store.stats()?;

            ui::status(Icons::DATABASE, "Store", store.backend());
            ui::section(&format!(" {} Folio Statistics ", Icons::STATS));
            println!("{}", ui::stats_table(&stats));
            store.close()?;
        }

        Commands::Messages { store, json } => {
            let config = resolve_config(
                cli.config.as_ref(),
                FolioConfig { database_url: store.database_url, ..FolioConfig::default() },
            )?;
            let store = open_configured_store(&config)?;
            let messages = store.messages()?;

            if json {
                println!("{}", serde_json::to_string_pretty(&messages)?);
            } else if messages.is_empty() {
                ui::info("Messages", "none received");
            } else {
                for message in &messages {
                    println!(
                        "{} #{} {} <{}> {}",
                        Icons::MAIL,
                        message.id,
                        message.name,
                        message.email,
                        ui::muted(&message.created_at.to_rfc3339())
                    );
                    println!("   {}", ui::dim(&message.message));
                }
                ui::summary_row("Total:", &messages.len().to_string());
            }
            store.close()?;
        }

        Commands::Init { database_url, force } => {
            let path = cli.config.unwrap_or_else(config::default_config_path);
            let starter = FolioConfig {
                database_url,
                host: Some(config::DEFAULT_HOST.to_string()),
                port: Some(config::DEFAULT_PORT),
                static_dir: None,
            };
            config::write_config(&path, &starter, force)?;
            ui::success(&format!("{} Wrote {}", Icons::SPARKLE, path.display()));
        }
    }

    Ok(())
}
