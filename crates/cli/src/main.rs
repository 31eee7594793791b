//! Shoplytics CLI - Database migrations, seeding and reports.
//!
//! # Usage
//!
//! ```bash
//! # Create the tables and indexes
//! shop-cli migrate
//!
//! # Generate data (reproducible with --seed)
//! shop-cli seed --customers 100 --products 50 --orders 400 --reviews 200 --all-shipments
//!
//! # Ask what to generate, one table at a time
//! shop-cli seed --interactive
//!
//! # Row count per table
//! shop-cli counts
//!
//! # Run one report, or all of them
//! shop-cli report best-sellers
//! shop-cli report all --format json
//! ```
//!
//! # Commands
//!
//! - `migrate` - Apply the embedded schema migrations
//! - `seed` - Insert generated customers, products, orders, reviews and shipments
//! - `counts` - Show the number of rows in every table
//! - `report` - Run analytics reports
//!
//! # Environment Variables
//!
//! - `SHOP_DATABASE_URL` / `DATABASE_URL` - `PostgreSQL` connection string
//! - `DB_HOST`, `DB_PORT`, `DB_NAME`, `DB_USER`, `DB_PASSWORD` - Used when no URL is set
//! - `RUST_LOG` - Log filter (default: `shoplytics_cli=info,shoplytics_db=info`)
//! - `LOG_FORMAT` - `json` for structured logs, text otherwise

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shoplytics_db::{DatabaseConfig, create_pool};

mod commands;
mod formatter;
mod prompt;

use commands::report::ReportSelection;
use commands::seed::SeedArgs;
use formatter::OutputFormat;

#[derive(Parser)]
#[command(name = "shop-cli")]
#[command(author, version, about = "Shoplytics CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Insert generated data
    Seed(SeedArgs),
    /// Show row counts for every table
    Counts,
    /// Run an analytics report
    Report {
        /// Report name (e.g. `best-sellers`), or `all`
        name: ReportSelection,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "shoplytics_cli=info,shoplytics_db=info".into());

    // Logs go to stderr so report output on stdout stays machine-readable
    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    let json_layer = json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer = (!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = DatabaseConfig::from_env()?;
    let pool = create_pool(&config).await?;
    tracing::info!("Database pool created");

    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Commands::Migrate => commands::migrate::run(&pool).await?,
        Commands::Seed(args) => {
            let mut stdin = std::io::stdin().lock();
            commands::seed::run(&pool, &args, &mut stdin, &mut stdout).await?;
        }
        Commands::Counts => commands::counts::run(&pool, &mut stdout).await?,
        Commands::Report { name, format } => {
            commands::report::run(&pool, &name, format, &mut stdout).await?;
        }
    }

    pool.close().await;
    Ok(())
}
