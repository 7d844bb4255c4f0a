//! Elle API - Minimal API documentation portal with a searchable endpoint catalog

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use elle_api::api::{self, AppState};
use elle_api::catalog::{Catalog, CatalogState};
use elle_api::config::Config;
use elle_api::routes::REGISTRY;
use elle_api::ui::CounterAnimation;

#[derive(Parser)]
#[command(name = "elle-api")]
#[command(about = "Minimal API documentation portal with a searchable endpoint catalog")]
#[command(version)]
struct Cli {
    /// Path to a TOML config file (default: ./elle.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Descriptor file to use instead of the configured one
    #[arg(long, global = true)]
    descriptor: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server (default)
    Serve {
        /// Port to listen on (overrides PORT and the config file)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// List registered route modules
    Routes,

    /// List documented endpoints
    List {
        /// Only show one category
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Search documented endpoints by name, description or category
    Search {
        /// Search query
        query: String,

        /// Restrict to one category
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Show catalog statistics
    Stats,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            format!("elle_api={},tower_http=debug", log_level).into()
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment
    let _ = dotenvy::dotenv();

    // Load config
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(descriptor) = cli.descriptor {
        config.descriptor_path = descriptor;
    }

    match cli.command.unwrap_or(Commands::Serve { port: None }) {
        Commands::Serve { port } => {
            if let Some(port) = port {
                config.port = port;
            }
            serve(config).await?;
        }

        Commands::Routes => {
            for module in REGISTRY {
                println!("• {}", module.id());
            }
            println!("\nTotal routes: {}", REGISTRY.len());
        }

        Commands::List { category } => {
            let catalog = Catalog::load(&config.descriptor_path)?;
            let state = CatalogState::from_params(category.as_deref(), None);
            print_matches(&catalog, &state);
        }

        Commands::Search { query, category } => {
            let catalog = Catalog::load(&config.descriptor_path)?;
            let state = CatalogState::from_params(category.as_deref(), Some(&query));
            let matches = catalog.filter(&state);

            if matches.is_empty() {
                println!("No endpoints found for: {}", query);
            } else {
                println!("Found {} endpoints:\n", matches.len());
                print_matches(&catalog, &state);
            }
        }

        Commands::Stats => {
            let catalog = Catalog::load(&config.descriptor_path)?;
            let descriptor = catalog.descriptor();

            println!(
                "{} {}",
                descriptor.name.as_deref().unwrap_or("Elle UI"),
                descriptor.version.as_deref().unwrap_or("v1.0.0")
            );
            println!("==================");
            animate_count("Endpoints: ", catalog.len() as u64, &config).await?;
            animate_count("Categories:", catalog.category_count() as u64, &config).await?;
            println!("Routes:     {}", REGISTRY.len());
            println!("Creator:    {}", descriptor.creator());
        }
    }

    Ok(())
}

async fn serve(config: Config) -> anyhow::Result<()> {
    // Startup-fatal: the server never listens without a readable descriptor
    let catalog = Catalog::load(&config.descriptor_path)?;
    tracing::info!(
        endpoints = catalog.len(),
        categories = catalog.category_count(),
        "Loaded descriptor from {}",
        config.descriptor_path.display()
    );

    let addr = config.bind_addr();
    let port = config.port;
    let state = AppState::new(config, catalog.into_descriptor())?;
    let router = api::create_router(state)?;

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Elle API server running on port {} ({})", port, addr);

    println!("Elle API server running at http://localhost:{}", port);
    println!("  UI:       http://localhost:{}/", port);
    println!("  API Docs: http://localhost:{}/api/docs", port);
    println!("  Health:   http://localhost:{}/health", port);

    axum::serve(listener, router).await?;
    Ok(())
}

fn print_matches(catalog: &Catalog, state: &CatalogState) {
    let matches = catalog.filter(state);
    if matches.is_empty() {
        println!("No endpoints found");
        return;
    }

    for m in matches {
        let item = &m.record.item;
        println!(
            "• [{}] {} {} {} ({})",
            m.record.category,
            item.method(),
            item.display_path(),
            item.name,
            if item.is_ready() { "✓ Ready" } else { item.status.as_str() }
        );
        if !item.desc.is_empty() {
            println!("   {}", item.desc);
        }
    }
}

/// Count up to `target` on one terminal line
async fn animate_count(label: &str, target: u64, config: &Config) -> anyhow::Result<()> {
    let animation = CounterAnimation::new(target, config.ui.counter_steps, config.counter_interval());
    let mut ticker = tokio::time::interval(animation.interval());
    let mut stdout = std::io::stdout();

    for value in animation {
        ticker.tick().await;
        write!(stdout, "\r{} {}", label, value)?;
        stdout.flush()?;
    }
    writeln!(stdout)?;
    Ok(())
}
