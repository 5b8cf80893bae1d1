//! Browse the product catalog.

use anyhow::{bail, Context as _, Result};
use serde_json::json;
use tvbox_commerce::catalog::Product;
use tvbox_commerce::search::{filter_products, FilterCriteria};
use tvbox_commerce::seo::{not_found_meta, product_page_meta, product_structured_data};
use tvbox_commerce::ProductId;

use super::{CatalogArgs, CatalogCommand, ListArgs};
use crate::config::CatalogConfig;
use crate::context::Context;
use crate::output::{price_line, truncate, type_badge};

const NAME_WIDTH: usize = 40;

/// Run the catalog command.
pub async fn run(args: CatalogArgs, ctx: &Context) -> Result<()> {
    match args.command {
        CatalogCommand::List(list) => list_products(list, ctx).await,
        CatalogCommand::Show { id, file } => show_product(&id, file.as_deref(), ctx).await,
    }
}

/// Filter criteria from command line flags and catalog defaults.
pub fn criteria(args: &ListArgs, catalog: &CatalogConfig) -> FilterCriteria {
    FilterCriteria {
        brand: args.brand.clone(),
        memory: args.memory.clone(),
        storage: args.storage.clone(),
        price_range: catalog.price_range(args.min, args.max),
        special_offers: args.special_offers,
        availability: args.available,
        features: Vec::new(),
    }
}

async fn list_products(args: ListArgs, ctx: &Context) -> Result<()> {
    let products = ctx.load_products(args.file.as_deref()).await?;
    let criteria = criteria(&args, &ctx.config.catalog);
    if criteria.availability {
        ctx.output
            .debug("Stock is not tracked; --available does not narrow the list");
    }

    let selected = filter_products(&products, &criteria);

    if ctx.output.is_json() {
        ctx.output.json(&selected);
        return Ok(());
    }

    ctx.output.header(&format!(
        "Каталог: {} из {}",
        selected.len(),
        products.len()
    ));

    if selected.is_empty() {
        ctx.output.info("Нет товаров, подходящих под выбранные фильтры");
        return Ok(());
    }

    print_table(&selected, ctx);
    Ok(())
}

/// Print products as a table, one row each.
pub(crate) fn print_table<'a>(products: impl IntoIterator<Item = &'a Product>, ctx: &Context) {
    ctx.output
        .table_row(&["ID", "Название", "Память", "Цена"], &[8, NAME_WIDTH, 10, 10]);
    for product in products {
        print_row(product, ctx);
    }
}

fn print_row(product: &Product, ctx: &Context) {
    let name = truncate(&product.name, NAME_WIDTH);
    let memory = product.attributes().summary().unwrap_or_default();
    let price = product.price_money().display();
    let row = [product.id.as_str(), name.as_str(), memory.as_str(), price.as_str()];
    ctx.output.table_row(&row, &[8, NAME_WIDTH, 10, 10]);

    let badge = type_badge(product.product_type);
    if !badge.is_empty() {
        ctx.output.kv("", &badge);
    }
}

async fn show_product(id: &str, file: Option<&str>, ctx: &Context) -> Result<()> {
    let id = ProductId::new(id.trim());
    if id.is_blank() {
        bail!("Product ID is required");
    }

    let source = ctx.catalog_source(file)?;
    let product = source
        .get_product(&id)
        .await
        .with_context(|| format!("Failed to load product {}", id))?;

    let Some(product) = product else {
        bail!("{}: {}", not_found_meta(&ctx.config.site).title, id);
    };

    let meta = product_page_meta(&product, &ctx.config.site);

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "product": product,
            "meta": meta,
            "structuredData": product_structured_data(&product, &ctx.config.site),
        }));
        return Ok(());
    }

    ctx.output.header(&product.name);
    ctx.output.kv("ID", product.id.as_str());
    ctx.output.kv("Цена", &price_line(&product));
    let badge = type_badge(product.product_type);
    if !badge.is_empty() {
        ctx.output.kv("Метка", &badge);
    }
    if let Some(summary) = product.attributes().summary() {
        ctx.output.kv("Память", &summary);
    }
    if let Some(description) = product.short_desc.as_deref().or(product.description.as_deref()) {
        ctx.output.kv("Описание", description);
    }

    if !product.specs.is_empty() {
        ctx.output.header("Характеристики");
        for spec in &product.specs {
            ctx.output.list_item(spec);
        }
    }

    ctx.output.header("SEO");
    ctx.output.page_meta(&meta);

    Ok(())
}
