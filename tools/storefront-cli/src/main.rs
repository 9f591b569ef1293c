//! Storefront CLI - Browse a catalog, fill a cart and check out from the terminal.
//!
//! Commands:
//! - `storefront search` - Search the catalog
//! - `storefront view` - Show a product
//! - `storefront cart` - Show or change the cart
//! - `storefront wishlist` - Show or change the wish list
//! - `storefront checkout` - Place an order for the cart
//! - `storefront config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use storefront_observability::LogLevel;

use commands::{CartArgs, CheckoutArgs, ConfigArgs, SearchArgs, ViewArgs, WishlistArgs};

/// Storefront CLI - Browse, like and buy from a product catalog
#[derive(Parser)]
#[command(name = "storefront")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the catalog by product name
    Search(SearchArgs),

    /// Show a product
    View(ViewArgs),

    /// Show or change the cart
    Cart(CartArgs),

    /// Show or change the wish list
    Wishlist(WishlistArgs),

    /// Place an order for everything in the cart
    Checkout(CheckoutArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = match context::Context::load(config_path, output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    let level = if cli.verbose {
        LogLevel::Debug
    } else {
        ctx.config.logging.level
    };
    if let Err(e) = storefront_observability::init(level, ctx.config.logging.format) {
        ctx.output.debug(&e.to_string());
    }

    // Execute command
    let result = match cli.command {
        Commands::Search(args) => commands::search::run(args, &ctx).await,
        Commands::View(args) => commands::view::run(args, &ctx).await,
        Commands::Cart(args) => commands::cart::run(args, &ctx).await,
        Commands::Wishlist(args) => commands::wishlist::run(args, &ctx).await,
        Commands::Checkout(args) => commands::checkout::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
