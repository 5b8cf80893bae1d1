//! Product catalog module.
//!
//! Contains the product record served by the catalog API and the parsing of
//! its free-text capability lines, and the cleanup applied before a
//! product is saved.

mod editor;
mod product;
mod specs;

pub use editor::{normalize_specs, prepare_for_save};
pub use product::{hide_products, Product, ProductMeta, ProductType};
pub use specs::{
    extract_size_tokens, find_spec_line, legacy_spec_matches, SpecAttributes, SpecKind,
};
