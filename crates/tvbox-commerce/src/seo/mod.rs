//! SEO module.
//!
//! Contains page metadata, product structured data, the sitemap and
//! robots.txt.

mod meta;
mod sitemap;

pub use meta::{
    not_found_meta, product_page_meta, product_structured_data, section_page_meta, PageMeta,
    SiteMeta,
};
pub use sitemap::{robots_txt, ChangeFrequency, Sitemap, SitemapEntry};
