//! Conjunctive catalog filter.

use crate::catalog::{legacy_spec_matches, Product, SpecKind};
use crate::search::FilterCriteria;
use tracing::debug;

/// Return the products that satisfy every active category, in input order.
pub fn filter_products(products: &[Product], criteria: &FilterCriteria) -> Vec<Product> {
    filter_refs(products, criteria).into_iter().cloned().collect()
}

/// Borrowing variant of [`filter_products`].
pub fn filter_refs<'a>(products: &'a [Product], criteria: &FilterCriteria) -> Vec<&'a Product> {
    let brands: Vec<String> = criteria.brand.iter().map(|b| b.to_lowercase()).collect();
    let selected: Vec<&Product> = products
        .iter()
        .filter(|p| matches_with_brands(p, criteria, &brands))
        .collect();
    debug!(
        total = products.len(),
        matched = selected.len(),
        "filtered catalog"
    );
    selected
}

/// Single-product predicate behind [`filter_products`].
pub fn matches(product: &Product, criteria: &FilterCriteria) -> bool {
    let brands: Vec<String> = criteria.brand.iter().map(|b| b.to_lowercase()).collect();
    matches_with_brands(product, criteria, &brands)
}

fn matches_with_brands(product: &Product, criteria: &FilterCriteria, brands: &[String]) -> bool {
    if !brands.is_empty() {
        let name = product.name.to_lowercase();
        if !brands.iter().any(|b| name.contains(b.as_str())) {
            return false;
        }
    }

    if !criteria.memory.is_empty()
        && !legacy_spec_matches(&product.specs, SpecKind::Ram, &criteria.memory)
    {
        return false;
    }

    if !criteria.storage.is_empty()
        && !legacy_spec_matches(&product.specs, SpecKind::Storage, &criteria.storage)
    {
        return false;
    }

    if !criteria.price_range.contains(product.price) {
        return false;
    }

    if criteria.special_offers && !product.is_promotional() {
        return false;
    }

    // availability and features have no backing data yet
    true
}
