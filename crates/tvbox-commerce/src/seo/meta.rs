//! Page metadata.

use crate::catalog::Product;
use crate::money::Money;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Site-wide settings used to build absolute URLs and fallback titles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteMeta {
    pub name: String,
    pub description: String,
    /// Origin without a trailing slash.
    pub base_url: String,
    /// Top-level sections listed in the sitemap, besides the home page.
    pub sections: Vec<String>,
}

impl SiteMeta {
    /// Absolute URL for a site-relative path.
    pub fn url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        if path.is_empty() {
            base.to_string()
        } else {
            format!("{base}/{path}")
        }
    }

    /// Canonical URL of a product page.
    pub fn product_url(&self, product: &Product) -> String {
        self.url(&format!("product/{}", product.id))
    }
}

impl Default for SiteMeta {
    fn default() -> Self {
        Self {
            name: "SVB SHOP - ТВ без подписок".to_string(),
            description: "Smart TV приставки для комфортного просмотра контента".to_string(),
            base_url: "https://tv-bez-podpiski.ru".to_string(),
            sections: vec!["catalog".to_string(), "about".to_string()],
        }
    }
}

/// Metadata for one page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub og_image: Option<String>,
    pub canonical: Option<String>,
}

impl PageMeta {
    /// Keywords as a single comma separated value.
    pub fn keywords_line(&self) -> String {
        self.keywords.join(", ")
    }
}

/// Metadata for a product page.
///
/// Editor-supplied metadata wins; otherwise it is derived from the product.
pub fn product_page_meta(product: &Product, site: &SiteMeta) -> PageMeta {
    let canonical = Some(site.product_url(product));

    if let Some(meta) = &product.meta {
        return PageMeta {
            title: meta.title.clone(),
            description: meta.description.clone(),
            keywords: if meta.keywords.is_empty() {
                default_keywords(product)
            } else {
                meta.keywords.clone()
            },
            og_image: meta.og_image.clone(),
            canonical,
        };
    }

    let description = [&product.description, &product.short_desc]
        .into_iter()
        .flatten()
        .find(|d| !d.is_empty())
        .cloned()
        .unwrap_or_else(|| format!("Купить {} по выгодной цене", product.name));

    PageMeta {
        title: product.name.clone(),
        description,
        keywords: default_keywords(product),
        og_image: product.image.clone(),
        canonical,
    }
}

fn default_keywords(product: &Product) -> Vec<String> {
    [product.name.as_str(), "smart tv", "тв приставка", "купить", "цена"]
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Metadata for a product id the catalog does not know.
pub fn not_found_meta(site: &SiteMeta) -> PageMeta {
    PageMeta {
        title: format!("Товар не найден - {}", site.name),
        description: "Запрашиваемый товар не найден".to_string(),
        ..PageMeta::default()
    }
}

/// Fallback metadata for a top-level section (`home`, `catalog`, `about`).
pub fn section_page_meta(section: &str, site: &SiteMeta) -> PageMeta {
    let (title, description, path) = match section {
        "home" | "" => (site.name.clone(), site.description.clone(), ""),
        "catalog" => (
            format!("Каталог - {}", site.name),
            "Каталог Smart TV приставок".to_string(),
            "catalog",
        ),
        "about" => (
            format!("О нас - {}", site.name),
            "Информация о компании".to_string(),
            "about",
        ),
        other => (format!("{other} - {}", site.name), site.description.clone(), other),
    };
    let og_name = if path.is_empty() { "default" } else { path };

    PageMeta {
        title,
        description,
        keywords: Vec::new(),
        og_image: Some(site.url(&format!("og-{og_name}.jpg"))),
        canonical: Some(site.url(path)),
    }
}

/// schema.org `Product` JSON-LD for a product page.
pub fn product_structured_data(product: &Product, site: &SiteMeta) -> serde_json::Value {
    json!({
        "@context": "https://schema.org",
        "@type": "Product",
        "name": product.name,
        "description": product.description,
        "image": product.image,
        "url": site.product_url(product),
        "offers": {
            "@type": "Offer",
            "price": product.price,
            "priceCurrency": Money::CURRENCY_CODE,
            "seller": {
                "@type": "Organization",
                "name": site.name,
            },
        },
    })
}
