//! Seed the database with generated data.
//!
//! # Usage
//!
//! ```bash
//! # Fixed counts
//! shop-cli seed --customers 100 --products 40 --orders 500 --reviews 250 --shipments 200
//!
//! # Reproducible run, one shipment per shipped/delivered order
//! shop-cli seed --customers 20 --products 10 --orders 50 --all-shipments --seed 7
//!
//! # Prompt for each table
//! shop-cli seed --interactive
//! ```
//!
//! Everything is inserted in one transaction. A final row-count table is
//! printed afterwards.

use std::io::{BufRead, Write};

use chrono::Utc;
use clap::Args;
use sqlx::PgPool;
use thiserror::Error;

use shoplytics_db::generator::DataGenerator;
use shoplytics_db::generator::seed::{self, SeedError, SeedPlan, ShipmentPlan};

use crate::formatter;
use crate::prompt::Prompter;

/// Errors that can occur during seeding.
#[derive(Debug, Error)]
pub enum SeedCommandError {
    #[error(transparent)]
    Seed(#[from] SeedError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Args, Debug, Clone, Default)]
pub struct SeedArgs {
    /// Customers to generate
    #[arg(long, default_value_t = 0)]
    pub customers: usize,

    /// Products to generate
    #[arg(long, default_value_t = 0)]
    pub products: usize,

    /// Orders to generate (each gets 1-4 line items)
    #[arg(long, default_value_t = 0)]
    pub orders: usize,

    /// Reviews to generate
    #[arg(long, default_value_t = 0)]
    pub reviews: usize,

    /// Maximum shipments to generate for shipped/delivered orders
    #[arg(long, conflicts_with = "all_shipments")]
    pub shipments: Option<usize>,

    /// Generate a shipment for every shipped/delivered order
    #[arg(long)]
    pub all_shipments: bool,

    /// RNG seed for a reproducible run
    #[arg(long)]
    pub seed: Option<u64>,

    /// Ask for each table instead of using the flags
    #[arg(short, long)]
    pub interactive: bool,
}

impl SeedArgs {
    /// The plan described by the flags.
    #[must_use]
    pub fn plan(&self) -> SeedPlan {
        let shipments = match (self.all_shipments, self.shipments) {
            (true, _) => ShipmentPlan::All,
            (false, Some(n)) if n > 0 => ShipmentPlan::UpTo(n),
            _ => ShipmentPlan::Skip,
        };
        SeedPlan {
            customers: self.customers,
            products: self.products,
            orders: self.orders,
            reviews: self.reviews,
            shipments,
        }
    }
}

/// Build a plan by asking about each table in insertion order.
///
/// # Errors
///
/// Returns `std::io::Error` if the prompts cannot be read or written.
pub fn prompt_plan<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
) -> std::io::Result<SeedPlan> {
    let customers = prompter.entity_count("customers")?;
    let products = prompter.entity_count("products")?;
    let orders = prompter.entity_count("orders")?;
    let reviews = prompter.entity_count("reviews")?;
    let shipments = match prompter.entity_count("shipments")? {
        0 => ShipmentPlan::Skip,
        n => ShipmentPlan::UpTo(n),
    };

    Ok(SeedPlan {
        customers,
        products,
        orders,
        reviews,
        shipments,
    })
}

/// Run the seed command.
///
/// # Errors
///
/// Returns `SeedCommandError` if seeding fails; nothing is committed then.
pub async fn run<R: BufRead, W: Write>(
    pool: &PgPool,
    args: &SeedArgs,
    input: &mut R,
    out: &mut W,
) -> Result<(), SeedCommandError> {
    let plan = if args.interactive {
        prompt_plan(&mut Prompter::new(input, &mut *out))?
    } else {
        args.plan()
    };

    if plan.is_empty() {
        tracing::warn!("Nothing to generate");
    } else {
        let now = Utc::now().naive_utc();
        let mut generator = match args.seed {
            Some(seed) => DataGenerator::seeded(seed, now),
            None => DataGenerator::new(now),
        };

        let summary = seed::seed(pool, plan, &mut generator).await?;
        tracing::info!(
            customers = summary.customers,
            products = summary.products,
            orders = summary.orders,
            order_items = summary.order_items,
            reviews = summary.reviews,
            shipments = summary.shipments,
            "Data generation complete"
        );
    }

    let counts = shoplytics_db::table_counts(pool).await;
    writeln!(out, "\nFinal table counts")?;
    writeln!(out, "{}", formatter::format_counts(&counts))?;
    Ok(())
}
