use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use larder::config::Config;
use larder_shared::RecipeSelection;
use larder_shopping::{CheckedItems, CleanupOutcome, ShoppingSession, export_text};

/// larder - Grocery lists from your recipes
#[derive(Parser)]
#[command(name = "larder")]
#[command(about = "Build store-organized grocery lists from recipes", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Build a grocery list from a JSON file of recipes
    List {
        /// JSON array of recipes
        #[arg(long)]
        recipes: PathBuf,

        /// Run the list through the cleanup service
        #[arg(long)]
        organize: bool,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Item keys (name-unit-amount) to leave out of the text export
        #[arg(long)]
        checked: Vec<String>,

        /// Keep only the recipes with these ids
        #[arg(long)]
        only: Vec<String>,

        /// Write the resulting recipe selection to this file
        #[arg(long)]
        save_selection: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

#[derive(Debug)]
struct ListOptions {
    organize: bool,
    format: OutputFormat,
    checked: Vec<String>,
    only: Vec<String>,
    save_selection: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    larder::observability::init_observability(
        "larder",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
    )?;

    match cli.command {
        Commands::Serve { host, port } => serve_command(config, host, port).await,
        Commands::List {
            recipes,
            organize,
            format,
            checked,
            only,
            save_selection,
        } => {
            let options = ListOptions {
                organize,
                format,
                checked,
                only,
                save_selection,
            };
            list_command(config, recipes, options).await
        }
    }
}

#[tracing::instrument(skip(config))]
async fn serve_command(
    config: Config,
    host_override: Option<String>,
    port_override: Option<u16>,
) -> Result<()> {
    tracing::info!("Starting larder server...");

    let app = larder::create_app(&config)?;

    let host = host_override.unwrap_or(config.server.host);
    let port = port_override.unwrap_or(config.server.port);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}

#[tracing::instrument(skip(config))]
async fn list_command(config: Config, recipes_path: PathBuf, options: ListOptions) -> Result<()> {
    let content = tokio::fs::read_to_string(&recipes_path)
        .await
        .with_context(|| format!("failed to read {}", recipes_path.display()))?;
    let mut selection = RecipeSelection::from_json(&content)
        .with_context(|| format!("failed to parse recipes in {}", recipes_path.display()))?;

    if !options.only.is_empty() {
        let dropped = selection
            .recipes()
            .iter()
            .filter(|r| !options.only.contains(&r.id))
            .map(|r| r.id.clone())
            .collect::<Vec<_>>();

        for id in dropped {
            selection.remove(&id);
        }
    }

    if let Some(path) = &options.save_selection {
        tokio::fs::write(path, selection.to_json()?)
            .await
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    let mut session = ShoppingSession::new(selection);

    if options.organize {
        let organizer = larder::cleanup_organizer(&config)?;

        match session.organize(&organizer).await {
            CleanupOutcome::Applied => tracing::info!("grocery list organized"),
            CleanupOutcome::Failed(err) => {
                tracing::warn!(err = %err, "keeping the unorganized grocery list")
            }
            CleanupOutcome::Discarded => tracing::warn!("cleanup result discarded"),
        }
    }

    match options.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(session.list())?),
        OutputFormat::Text => {
            let checked = options.checked.into_iter().collect::<CheckedItems>();
            println!(
                "{}",
                export_text(&session.selection().titles(), session.list(), &checked)
            );
        }
    }

    Ok(())
}
