//! Presentation glue: clap subcommands over the domain core. Each handler
//! loads the catalog from the durable store, mutates it through the store
//! operations, saves, and prints a table.

pub mod classify;
pub mod dashboard;
pub mod documents;
pub mod exporter;
pub mod orders;
pub mod products;
pub mod ui;

use anyhow::{Context, Result};
use clap::Subcommand;

use crate::config::AppConfig;
use crate::core::catalog::Catalog;
use crate::store::{CatalogStore, DiskStore};

#[derive(Subcommand)]
pub enum Commands {
    /// Create default configuration
    Setup,
    /// Show compliance and catalog metrics
    Dashboard,
    /// Classify a product with the HS code assistant
    Classify {
        /// Free-text query, e.g. "cotton t-shirts to USA"
        query: String,
        /// Commit the result without prompting
        #[arg(long)]
        yes: bool,
    },
    /// Manage the product catalog
    #[command(subcommand)]
    Products(products::ProductsCommand),
    /// Create and track export orders
    #[command(subcommand)]
    Orders(orders::OrdersCommand),
    /// Generate and inspect export documents
    #[command(subcommand)]
    Documents(documents::DocumentsCommand),
    /// Maintain the exporter profile
    #[command(subcommand)]
    Exporter(exporter::ExporterCommand),
}

/// Loaded application state shared by the command handlers.
pub struct App {
    pub config: AppConfig,
    pub catalog: Catalog,
    store: DiskStore,
}

impl App {
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let config = match config_path {
            Some(path) => AppConfig::load_from_path(path)?,
            None => AppConfig::load()?,
        };
        let store = DiskStore::open(&config.data_path()?)?;
        let catalog = store.load()?;
        Ok(Self {
            config,
            catalog,
            store,
        })
    }

    pub fn save(&self) -> Result<()> {
        self.store.save(&self.catalog)
    }
}

pub async fn run(command: Commands, config_path: Option<&str>) -> Result<()> {
    if let Commands::Setup = command {
        return setup();
    }

    let mut app = App::load(config_path)?;
    match command {
        Commands::Setup => unreachable!("handled above"),
        Commands::Dashboard => dashboard::run(&app),
        Commands::Classify { query, yes } => classify::run(&mut app, &query, yes).await,
        Commands::Products(cmd) => products::run(&mut app, cmd),
        Commands::Orders(cmd) => orders::run(&mut app, cmd),
        Commands::Documents(cmd) => documents::run(&mut app, cmd),
        Commands::Exporter(cmd) => exporter::run(&mut app, cmd),
    }
}

fn setup() -> Result<()> {
    let path = AppConfig::default_config_path()?;

    if path.exists() {
        anyhow::bail!("Configuration file already exists at {}", path.display());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let default_config = r#"---
classifier:
  base_url: "https://generativelanguage.googleapis.com"
  model: "gemini-1.5-flash"
  # api_key: "..."        # or set GEMINI_API_KEY
  timeout_secs: 30

# data_path: "/path/to/catalog"
"#;

    std::fs::write(&path, default_config)
        .with_context(|| format!("Failed to write config file to {}", path.display()))?;

    tracing::info!("Created default configuration at {}", path.display());
    println!("Created default configuration at {}", path.display());
    Ok(())
}
