//! Configuration management commands.

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CliConfig};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx).await,
        ConfigCommand::Init { path, force } => init_config(&path, force, ctx).await,
        ConfigCommand::Validate => validate_config(ctx).await,
    }
}

async fn show_config(ctx: &Context) -> Result<()> {
    let config = redacted(&ctx.config);

    if ctx.output.is_json() {
        ctx.output.json(&config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    ctx.output.info("");
    ctx.output.info("[api]");
    ctx.output.kv("base_url", &config.api.base_url);
    ctx.output.kv("timeout_secs", &config.api.timeout_secs.to_string());
    ctx.output.kv("max_retries", &config.api.max_retries.to_string());

    ctx.output.info("");
    ctx.output.info("[catalog]");
    if let Some(min) = config.catalog.price_min {
        ctx.output.kv("price_min", &min.to_string());
    }
    if let Some(max) = config.catalog.price_max {
        ctx.output.kv("price_max", &max.to_string());
    }
    if let Some(ref file) = config.catalog.source_file {
        ctx.output.kv("source_file", file);
    }
    if !config.catalog.hidden_products.is_empty() {
        ctx.output.kv("hidden_products", "");
        for name in &config.catalog.hidden_products {
            ctx.output.list_item(name);
        }
    }

    ctx.output.info("");
    ctx.output.info("[telegram]");
    ctx.output.kv("api_base", &config.telegram.api_base);
    ctx.output.kv(
        "bot_token",
        config.telegram.bot_token.as_deref().unwrap_or("(not set)"),
    );
    ctx.output.kv("chat_ids", &config.telegram.chat_ids.join(", "));

    ctx.output.info("");
    ctx.output.info("[site]");
    ctx.output.kv("name", &config.site.name);
    ctx.output.kv("description", &config.site.description);
    ctx.output.kv("base_url", &config.site.base_url);
    ctx.output.kv("sections", &config.site.sections.join(", "));

    ctx.output.info("");
    ctx.output.info("[logging]");
    ctx.output.kv("level", config.logging.level.as_directive());
    ctx.output.kv("format", &format!("{:?}", config.logging.format).to_lowercase());

    Ok(())
}

async fn init_config(path: &str, force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.resolve_path(path);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    if config_path.extension().is_some_and(|ext| ext == "json") {
        CliConfig::default().save(&config_path)?;
    } else {
        std::fs::write(&config_path, generate_default_config())?;
    }

    ctx.output
        .success(&format!("Created: {}", config_path.display()));

    Ok(())
}

async fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let report = ctx.config.check();

    if report.is_clean() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &report.errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    for warning in &report.warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !report.errors.is_empty() {
        bail!("Configuration has {} error(s)", report.errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}

/// Copy of the config safe to print.
fn redacted(config: &CliConfig) -> CliConfig {
    let mut config = config.clone();
    if let Some(token) = config.telegram.bot_token.as_mut() {
        *token = mask(token);
    }
    config
}

/// Keep the bot id before ':' and hide the secret part.
fn mask(token: &str) -> String {
    match token.split_once(':') {
        Some((bot_id, _)) => format!("{}:****", bot_id),
        None => "****".to_string(),
    }
}
