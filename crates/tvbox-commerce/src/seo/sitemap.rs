//! Sitemap and robots.txt generation.

use crate::catalog::Product;
use crate::seo::SiteMeta;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// How often a page is expected to change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFrequency {
    Daily,
    Weekly,
    Monthly,
}

impl ChangeFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeFrequency::Daily => "daily",
            ChangeFrequency::Weekly => "weekly",
            ChangeFrequency::Monthly => "monthly",
        }
    }
}

/// One `<url>` element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SitemapEntry {
    pub loc: String,
    pub last_modified: DateTime<Utc>,
    pub change_frequency: ChangeFrequency,
    pub priority: f32,
}

/// A sitemaps.org URL set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sitemap {
    pub entries: Vec<SitemapEntry>,
}

impl Sitemap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Home page, then every site section, then every product.
    pub fn for_site(site: &SiteMeta, products: &[Product], now: DateTime<Utc>) -> Self {
        let mut sitemap = Sitemap::new();
        sitemap.push(site.url(""), now, ChangeFrequency::Daily, 1.0);
        for section in &site.sections {
            sitemap.push(site.url(section), now, ChangeFrequency::Weekly, 0.8);
        }
        for product in products {
            sitemap.push(site.product_url(product), now, ChangeFrequency::Weekly, 0.7);
        }
        sitemap
    }

    pub fn push(
        &mut self,
        loc: impl Into<String>,
        last_modified: DateTime<Utc>,
        change_frequency: ChangeFrequency,
        priority: f32,
    ) {
        self.entries.push(SitemapEntry {
            loc: loc.into(),
            last_modified,
            change_frequency,
            priority,
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render as XML.
    pub fn render(&self) -> String {
        let mut xml = String::from(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
        );
        for entry in &self.entries {
            let _ = write!(
                xml,
                "  <url>\n    <loc>{}</loc>\n    <lastmod>{}</lastmod>\n    \
                 <changefreq>{}</changefreq>\n    <priority>{}</priority>\n  </url>\n",
                escape_xml(&entry.loc),
                entry.last_modified.to_rfc3339_opts(SecondsFormat::Millis, true),
                entry.change_frequency.as_str(),
                entry.priority,
            );
        }
        xml.push_str("</urlset>");
        xml
    }
}

fn escape_xml(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

/// robots.txt allowing the storefront and hiding the API and admin paths.
pub fn robots_txt(site: &SiteMeta) -> String {
    format!(
        "User-agent: *\nAllow: /\nDisallow: /api/\nDisallow: /admin/\n\nSitemap: {}",
        site.url("sitemap.xml")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_for_site_order_and_priorities() {
        let site = SiteMeta::default();
        let products = vec![Product::new("1", "VONTAR", 4000), Product::new("2", "ZTE", 2800)];
        let sitemap = Sitemap::for_site(&site, &products, now());

        assert_eq!(sitemap.len(), 5);
        assert_eq!(sitemap.entries[0].loc, "https://tv-bez-podpiski.ru");
        assert_eq!(sitemap.entries[0].change_frequency, ChangeFrequency::Daily);
        assert_eq!(sitemap.entries[1].loc, "https://tv-bez-podpiski.ru/catalog");
        assert_eq!(sitemap.entries[1].priority, 0.8);
        assert_eq!(sitemap.entries[4].loc, "https://tv-bez-podpiski.ru/product/2");
        assert_eq!(sitemap.entries[4].priority, 0.7);
    }

    #[test]
    fn test_render_xml() {
        let mut sitemap = Sitemap::new();
        sitemap.push("https://tv-bez-podpiski.ru", now(), ChangeFrequency::Daily, 1.0);
        let xml = sitemap.render();

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset"));
        assert!(xml.contains("<loc>https://tv-bez-podpiski.ru</loc>"));
        assert!(xml.contains("<lastmod>2025-03-01T12:00:00.000Z</lastmod>"));
        assert!(xml.contains("<changefreq>daily</changefreq>"));
        assert!(xml.contains("<priority>1</priority>"));
        assert!(xml.ends_with("</urlset>"));
    }

    #[test]
    fn test_render_escapes_locations() {
        let mut sitemap = Sitemap::new();
        sitemap.push("https://a.ru/?a=1&b=2", now(), ChangeFrequency::Weekly, 0.5);
        assert!(sitemap.render().contains("<loc>https://a.ru/?a=1&amp;b=2</loc>"));
    }

    #[test]
    fn test_robots() {
        let robots = robots_txt(&SiteMeta::default());
        assert_eq!(
            robots,
            "User-agent: *\nAllow: /\nDisallow: /api/\nDisallow: /admin/\n\n\
             Sitemap: https://tv-bez-podpiski.ru/sitemap.xml"
        );
    }
}
