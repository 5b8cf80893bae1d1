//! CLI command implementations.

pub mod admin;
pub mod catalog;
pub mod config;
pub mod lead;
pub mod order;
pub mod seo;

use clap::{Args, Subcommand};

/// Arguments for the catalog command.
#[derive(Args)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: CatalogCommand,
}

#[derive(Subcommand)]
pub enum CatalogCommand {
    /// List products matching the given filters.
    List(ListArgs),
    /// Show one product with its page metadata.
    Show {
        /// Product ID.
        id: String,

        /// Read products from this JSON file instead of the API.
        #[arg(long)]
        file: Option<String>,
    },
}

/// Arguments for `catalog list`.
#[derive(Args, Default)]
pub struct ListArgs {
    /// Brand name contained in the product name (repeatable).
    #[arg(short, long)]
    pub brand: Vec<String>,

    /// RAM size, e.g. "4 ГБ" (repeatable).
    #[arg(short, long)]
    pub memory: Vec<String>,

    /// Storage size, e.g. "32 ГБ" (repeatable).
    #[arg(short, long)]
    pub storage: Vec<String>,

    /// Lowest price in rubles.
    #[arg(long)]
    pub min: Option<i64>,

    /// Highest price in rubles.
    #[arg(long)]
    pub max: Option<i64>,

    /// Only promotional products.
    #[arg(long)]
    pub special_offers: bool,

    /// Only products in stock.
    #[arg(long)]
    pub available: bool,

    /// Read products from this JSON file instead of the API.
    #[arg(long)]
    pub file: Option<String>,
}

/// Arguments for the admin command.
#[derive(Args)]
pub struct AdminArgs {
    #[command(subcommand)]
    pub command: AdminCommand,
}

#[derive(Subcommand)]
pub enum AdminCommand {
    /// Search the remote catalog.
    Search {
        /// Free-text query; lists everything when empty.
        #[arg(default_value = "")]
        query: String,
    },
    /// Create a product from a JSON file.
    Add {
        /// Product JSON file, in the catalog API format.
        product: String,
    },
    /// Replace a product with the contents of a JSON file.
    Update {
        /// Product ID.
        id: String,

        /// Product JSON file, in the catalog API format.
        product: String,
    },
    /// Delete a product.
    Delete {
        /// Product ID.
        id: String,

        /// Skip confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the order command.
#[derive(Args)]
pub struct OrderArgs {
    #[command(subcommand)]
    pub command: OrderCommand,
}

#[derive(Subcommand)]
pub enum OrderCommand {
    /// Print the order message without sending it.
    Preview(OrderDetails),
    /// Send the order message to the managers.
    Submit {
        #[command(flatten)]
        details: OrderDetails,

        /// Skip confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Cart contents and customer details.
#[derive(Args)]
pub struct OrderDetails {
    /// Product ID to add to the cart; repeat to add more or increase quantity.
    #[arg(short, long = "item", required = true)]
    pub items: Vec<String>,

    /// Customer full name.
    #[arg(long)]
    pub name: String,

    /// Phone number; "+7" is prefixed when missing.
    #[arg(long)]
    pub phone: String,

    /// Delivery address.
    #[arg(long)]
    pub address: String,

    /// Comment for the manager.
    #[arg(long, default_value = "")]
    pub comment: String,

    /// Delivery service: sdek or post.
    #[arg(long, default_value = "sdek")]
    pub delivery: String,

    /// Read products from this JSON file instead of the API.
    #[arg(long)]
    pub file: Option<String>,
}

/// Arguments for the lead command.
#[derive(Args, Default)]
pub struct LeadArgs {
    /// Phone number; "+7" is prefixed when missing.
    #[arg(long)]
    pub phone: String,

    /// Name of the form the request comes from.
    #[arg(long, default_value = "Поддержка")]
    pub form: String,

    /// What the customer wants to talk about.
    #[arg(long)]
    pub topic: Option<String>,

    /// Quiz answer: which TV the customer has (Smart TV, Обычный ТВ, Не знаю).
    /// Any quiz answer sends the request as the product-picker quiz.
    #[arg(long)]
    pub tv_type: Option<String>,

    /// Quiz answer: what the customer wants to watch.
    #[arg(long)]
    pub goal: Option<String>,

    /// Quiz answer: budget range.
    #[arg(long)]
    pub budget: Option<String>,

    /// Print the message without sending it.
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the seo command.
#[derive(Args)]
pub struct SeoArgs {
    #[command(subcommand)]
    pub command: SeoCommand,
}

#[derive(Subcommand)]
pub enum SeoCommand {
    /// Generate sitemap.xml for the site and every listed product.
    Sitemap {
        /// Write to this file instead of stdout.
        #[arg(short, long)]
        output: Option<String>,

        /// Read products from this JSON file instead of the API.
        #[arg(long)]
        file: Option<String>,
    },
    /// Generate robots.txt.
    Robots {
        /// Write to this file instead of stdout.
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Show page metadata for a top-level section (home, catalog, about).
    Meta {
        /// Section name; the home page when omitted.
        section: Option<String>,
    },
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
        /// File to create; a .json name writes JSON.
        #[arg(long, default_value = "tvbox.toml")]
        path: String,

        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}
