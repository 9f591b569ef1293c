//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};
use storefront_commerce::catalog::ProductCatalog;

use super::{ConfigArgs, ConfigCommand};
use crate::config::generate_default_config;
use crate::context::{Context, CONFIG_NAMES};

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    ctx.output.info("");
    ctx.output.info("[catalog]");
    ctx.output.kv(
        "path",
        &ctx.resolve_path(&ctx.config.catalog.path).display().to_string(),
    );

    ctx.output.info("");
    ctx.output.info("[session]");
    ctx.output.kv("id", &ctx.config.session.id);
    ctx.output.kv(
        "store_dir",
        &ctx.resolve_path(&ctx.config.session.store_dir).display().to_string(),
    );
    ctx.output.kv("currency", &ctx.config.session.currency);

    ctx.output.info("");
    ctx.output.info("[search]");
    ctx.output.kv(
        "suggestion_limit",
        &ctx.config.search.suggestion_limit.to_string(),
    );

    ctx.output.info("");
    ctx.output.info("[logging]");
    ctx.output.kv("level", ctx.config.logging.level.as_str());
    ctx.output.kv("format", ctx.config.logging.format.as_str());

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let mut errors: Vec<String> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();

    if let Err(e) = ctx.config.currency() {
        errors.push(format!("session.currency: {}", e));
    }

    if ctx.config.session.id.trim().is_empty() {
        errors.push("session.id must not be empty".to_string());
    }

    if ctx.config.search.suggestion_limit == 0 {
        warnings.push("search.suggestion_limit is 0, searches will show nothing".to_string());
    }

    match ctx.load_catalog() {
        Ok(catalog) => {
            if catalog.is_empty() {
                warnings.push("catalog is empty".to_string());
            }
            if let Ok(currency) = ctx.config.currency() {
                let foreign = catalog
                    .list()
                    .iter()
                    .filter(|p| p.price.currency != currency)
                    .count();
                if foreign > 0 {
                    warnings.push(format!(
                        "{} product(s) are not priced in {}",
                        foreign, currency
                    ));
                }
            }
        }
        Err(e) => errors.push(format!("catalog: {:#}", e)),
    }

    // Print results
    if errors.is_empty() && warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}
