//! Generate sitemap.xml, robots.txt and section metadata.

use anyhow::{Context as _, Result};
use chrono::Utc;
use tvbox_commerce::seo::{robots_txt, section_page_meta, PageMeta, SiteMeta, Sitemap};

use super::{SeoArgs, SeoCommand};
use crate::context::Context;

/// Run the seo command.
pub async fn run(args: SeoArgs, ctx: &Context) -> Result<()> {
    match args.command {
        SeoCommand::Sitemap { output, file } => {
            let products = ctx.load_products(file.as_deref()).await?;
            let sitemap = Sitemap::for_site(&ctx.config.site, &products, Utc::now());
            ctx.output.debug(&format!(
                "Sitemap has {} URLs ({} products)",
                sitemap.len(),
                products.len()
            ));
            emit(&sitemap.render(), output.as_deref(), ctx)
        }
        SeoCommand::Robots { output } => emit(&robots_txt(&ctx.config.site), output.as_deref(), ctx),
        SeoCommand::Meta { section } => {
            let meta = section_meta(section.as_deref(), &ctx.config.site);
            if ctx.output.is_json() {
                ctx.output.json(&meta);
            } else {
                ctx.output.header(&format!("Page: {}", section.as_deref().unwrap_or("home")));
                ctx.output.page_meta(&meta);
            }
            Ok(())
        }
    }
}

/// Metadata for a section name as typed on the command line.
pub fn section_meta(section: Option<&str>, site: &SiteMeta) -> PageMeta {
    let section = section.map(|s| s.trim().trim_matches('/').to_lowercase());
    section_page_meta(section.as_deref().unwrap_or("home"), site)
}

fn emit(content: &str, output: Option<&str>, ctx: &Context) -> Result<()> {
    match output {
        Some(path) => {
            let path = ctx.resolve_path(path);
            std::fs::write(&path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            ctx.output.success(&format!("Created: {}", path.display()));
        }
        None => ctx.output.raw(content),
    }
    Ok(())
}
