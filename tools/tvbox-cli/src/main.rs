//! tvbox CLI - Command line tool for the TV-box storefront.
//!
//! Commands:
//! - `tvbox catalog` - Browse and filter the product catalog
//! - `tvbox admin` - Search, create, update and delete catalog products
//! - `tvbox order` - Preview or submit an order
//! - `tvbox lead` - Send a callback request to the managers
//! - `tvbox seo` - Generate sitemap.xml, robots.txt and page metadata
//! - `tvbox config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tvbox_observability::{init_logging, LogLevel};

use commands::{AdminArgs, CatalogArgs, ConfigArgs, LeadArgs, OrderArgs, SeoArgs};

/// tvbox - Browse the catalog and forward orders of the TV-box storefront
#[derive(Parser)]
#[command(name = "tvbox")]
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
    /// Browse and filter the product catalog
    Catalog(CatalogArgs),

    /// Edit the remote catalog
    Admin(AdminArgs),

    /// Preview or submit an order
    Order(OrderArgs),

    /// Send a callback request to the managers
    Lead(LeadArgs),

    /// Generate SEO files
    Seo(SeoArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let output = output::Output::new(cli.verbose, cli.json);

    let config_path = cli.config.as_deref();
    let ctx = context::Context::load(config_path, output)?;

    let mut log_settings = ctx.config.logging.clone();
    if cli.verbose {
        log_settings.level = log_settings.level.min(LogLevel::Debug);
    }
    if let Err(e) = init_logging(&log_settings) {
        ctx.output.warn(&format!("Logging disabled: {}", e));
    }

    let result = match cli.command {
        Commands::Catalog(args) => commands::catalog::run(args, &ctx).await,
        Commands::Admin(args) => commands::admin::run(args, &ctx).await,
        Commands::Order(args) => commands::order::run(args, &ctx).await,
        Commands::Lead(args) => commands::lead::run(args, &ctx).await,
        Commands::Seo(args) => commands::seo::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
