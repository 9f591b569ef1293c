//! CLI command implementations.

pub mod cart;
pub mod checkout;
pub mod config;
pub mod search;
pub mod view;
pub mod wishlist;

use clap::{Args, Subcommand};

/// Arguments for the search command.
#[derive(Args)]
pub struct SearchArgs {
    /// Text to look for in product names.
    pub query: String,

    /// Maximum number of results (default: search.suggestion_limit).
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Only products in this category.
    #[arg(long)]
    pub category: Option<i64>,

    /// Only products in stock.
    #[arg(long)]
    pub in_stock: bool,

    /// Sort order: relevance, price-asc, price-desc, name-asc, name-desc.
    #[arg(short, long)]
    pub sort: Option<String>,
}

/// Arguments for the view command.
#[derive(Args)]
pub struct ViewArgs {
    /// Product ID.
    pub id: i64,
}

/// A cart line: product and size.
#[derive(Args)]
pub struct LineArgs {
    /// Product ID.
    pub id: i64,

    /// Size (omit for sizeless products).
    #[arg(short, long, default_value = "0")]
    pub size: u32,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show the cart.
    Show,
    /// Add one unit of a product.
    Add(LineArgs),
    /// Remove a line.
    Remove(LineArgs),
    /// Add one more unit to a line.
    Inc(LineArgs),
    /// Take one unit off a line.
    Dec(LineArgs),
    /// Empty the cart.
    Clear,
}

/// Arguments for the wishlist command.
#[derive(Args)]
pub struct WishlistArgs {
    #[command(subcommand)]
    pub command: Option<WishlistCommand>,
}

#[derive(Subcommand)]
pub enum WishlistCommand {
    /// Show liked products.
    Show,
    /// Like a product.
    Add {
        /// Product ID.
        id: i64,
    },
    /// Unlike a product.
    Remove {
        /// Product ID.
        id: i64,
    },
    /// Like or unlike a product.
    Toggle {
        /// Product ID.
        id: i64,
    },
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    /// Recipient name.
    #[arg(long)]
    pub name: String,

    /// Contact phone.
    #[arg(long)]
    pub phone: String,

    /// Delivery city.
    #[arg(long)]
    pub city: String,

    /// Delivery office (branch number or address).
    #[arg(long)]
    pub office: String,

    /// Email for the receipt.
    #[arg(long)]
    pub email: Option<String>,

    /// Comment for the order.
    #[arg(long)]
    pub comment: Option<String>,

    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file and the catalog it points at.
    Validate,
}
