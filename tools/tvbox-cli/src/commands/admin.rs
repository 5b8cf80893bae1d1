//! Edit the remote catalog.

use std::path::Path;

use anyhow::{bail, Context as _, Result};
use dialoguer::Confirm;
use tvbox_commerce::catalog::{prepare_for_save, Product};
use tvbox_commerce::ProductId;
use tvbox_data::{CatalogEditor, CatalogSource};

use super::catalog::print_table;
use super::{AdminArgs, AdminCommand};
use crate::context::Context;

/// Run the admin command.
pub async fn run(args: AdminArgs, ctx: &Context) -> Result<()> {
    match args.command {
        AdminCommand::Search { query } => search(&query, ctx).await,
        AdminCommand::Add { product } => add(&product, ctx).await,
        AdminCommand::Update { id, product } => update(&id, &product, ctx).await,
        AdminCommand::Delete { id, yes } => delete(&id, yes, ctx).await,
    }
}

async fn search(query: &str, ctx: &Context) -> Result<()> {
    let catalog = ctx.http_catalog()?;
    let spinner = ctx.output.spinner("Searching...");
    let result = catalog.search_products(query).await;
    spinner.finish_and_clear();
    let products = result.context("Failed to search catalog")?;

    if ctx.output.is_json() {
        ctx.output.json(&products);
        return Ok(());
    }

    ctx.output.header(&format!("Найдено: {}", products.len()));
    if !products.is_empty() {
        print_table(&products, ctx);
    }
    Ok(())
}

async fn add(path: &str, ctx: &Context) -> Result<()> {
    let product = read_product(&ctx.resolve_path(path))?;
    let catalog = ctx.http_catalog()?;

    let spinner = ctx.output.spinner("Saving...");
    let result = catalog.create_product(&product).await;
    spinner.finish_and_clear();
    let saved = result.context("Failed to create product")?;

    report_saved(saved.as_ref().unwrap_or(&product), "Товар создан", ctx);
    Ok(())
}

async fn update(id: &str, path: &str, ctx: &Context) -> Result<()> {
    let id = product_id(id)?;
    let mut product = read_product(&ctx.resolve_path(path))?;
    if product.id.is_blank() {
        product.id = id.clone();
    } else if product.id != id {
        bail!("File describes product {}, not {}", product.id, id);
    }

    let catalog = ctx.http_catalog()?;
    let spinner = ctx.output.spinner("Saving...");
    let result = catalog.update_product(&id, &product).await;
    spinner.finish_and_clear();
    let saved = result.with_context(|| format!("Failed to update product {}", id))?;

    report_saved(saved.as_ref().unwrap_or(&product), "Товар сохранен", ctx);
    Ok(())
}

async fn delete(id: &str, yes: bool, ctx: &Context) -> Result<()> {
    let id = product_id(id)?;
    let catalog = ctx.http_catalog()?;

    if !yes {
        let name = catalog
            .get_product(&id)
            .await
            .ok()
            .flatten()
            .map(|p| p.name)
            .unwrap_or_else(|| id.to_string());
        let confirmed = Confirm::new()
            .with_prompt(format!("Удалить товар {}?", name))
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Товар не удален");
            return Ok(());
        }
    }

    catalog
        .delete_product(&id)
        .await
        .with_context(|| format!("Failed to delete product {}", id))?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "deleted": id }));
    } else {
        ctx.output.success(&format!("Удалено: {}", id));
    }
    Ok(())
}

/// Read a product file and clean it for saving.
pub fn read_product(path: &Path) -> Result<Product> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let product: Product = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse product {}", path.display()))?;
    Ok(prepare_for_save(product)?)
}

fn product_id(id: &str) -> Result<ProductId> {
    let id = ProductId::new(id.trim());
    if id.is_blank() {
        bail!("Product ID is required");
    }
    Ok(id)
}

fn report_saved(product: &Product, message: &str, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(product);
        return;
    }
    ctx.output.success(message);
    if !product.id.is_blank() {
        ctx.output.kv("ID", product.id.as_str());
    }
    ctx.output.kv("Название", &product.name);
    ctx.output.kv("Цена", &product.price_money().display());
    ctx.output.kv("Характеристик", &product.specs.len().to_string());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_product_normalizes_specs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("product.json");
        std::fs::write(
            &path,
            r#"{
                "name": " VONTAR W2 ATV ",
                "price": "4000",
                "type": "Акционная",
                "specs": ["Оперативная память: 4 ГБ\n\nВстроенная память: 32 ГБ\n"]
            }"#,
        )
        .unwrap();

        let product = read_product(&path).unwrap();
        assert!(product.id.is_blank());
        assert_eq!(product.name, "VONTAR W2 ATV");
        assert_eq!(product.price, 4000);
        assert!(product.is_promotional());
        assert_eq!(
            product.specs,
            vec!["Оперативная память: 4 ГБ", "Встроенная память: 32 ГБ"]
        );
    }

    #[test]
    fn test_read_product_requires_price() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("product.json");
        std::fs::write(&path, r#"{"name": "ZTE B866"}"#).unwrap();

        let err = read_product(&path).unwrap_err();
        assert!(err.to_string().contains("Заполните название и цену"));
    }

    #[test]
    fn test_read_product_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_product(&dir.path().join("missing.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }

    #[test]
    fn test_product_id_required() {
        assert!(product_id("  ").is_err());
        assert_eq!(product_id(" 7 ").unwrap().as_str(), "7");
    }
}
