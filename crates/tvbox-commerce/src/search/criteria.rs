//! Filter criteria types.

use serde::{Deserialize, Serialize};

/// Closed price interval in whole rubles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: i64,
    pub max: i64,
}

impl PriceRange {
    pub fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    /// Range that admits every price.
    pub fn unbounded() -> Self {
        Self::new(i64::MIN, i64::MAX)
    }

    /// Inclusive on both ends. An inverted range contains nothing.
    pub fn contains(&self, price: i64) -> bool {
        price >= self.min && price <= self.max
    }

    pub fn is_unbounded(&self) -> bool {
        self.min == i64::MIN && self.max == i64::MAX
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self::unbounded()
    }
}

/// Active catalog filter selections.
///
/// Categories combine with AND; values inside one category combine with OR.
/// An empty list leaves its category unconstrained, so the default value
/// matches every product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterCriteria {
    /// Brand names, matched case-insensitively against the product name.
    pub brand: Vec<String>,
    /// RAM size tokens such as `"4 ГБ"`.
    pub memory: Vec<String>,
    /// Storage size tokens such as `"32 ГБ"`.
    pub storage: Vec<String>,
    pub price_range: PriceRange,
    /// Only promotional products.
    pub special_offers: bool,
    /// Accepted but not applied; products carry no stock data.
    pub availability: bool,
    /// Accepted but not applied; products carry no feature data.
    pub features: Vec<String>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand.push(brand.into());
        self
    }

    pub fn with_memory(mut self, memory: impl Into<String>) -> Self {
        self.memory.push(memory.into());
        self
    }

    pub fn with_storage(mut self, storage: impl Into<String>) -> Self {
        self.storage.push(storage.into());
        self
    }

    pub fn with_price_range(mut self, min: i64, max: i64) -> Self {
        self.price_range = PriceRange::new(min, max);
        self
    }

    pub fn with_special_offers(mut self, only: bool) -> Self {
        self.special_offers = only;
        self
    }

    pub fn with_availability(mut self, only: bool) -> Self {
        self.availability = only;
        self
    }

    pub fn with_feature(mut self, feature: impl Into<String>) -> Self {
        self.features.push(feature.into());
        self
    }

    /// True when no selection would reject a product.
    pub fn is_empty(&self) -> bool {
        self.brand.is_empty()
            && self.memory.is_empty()
            && self.storage.is_empty()
            && self.price_range.is_unbounded()
            && !self.special_offers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_range_inclusive() {
        let range = PriceRange::new(1000, 5000);
        assert!(range.contains(1000));
        assert!(range.contains(5000));
        assert!(!range.contains(999));
        assert!(!range.contains(5001));
    }

    #[test]
    fn test_inverted_range_is_empty() {
        let range = PriceRange::new(5000, 1000);
        assert!(!range.contains(3000));
    }

    #[test]
    fn test_default_range_is_unbounded() {
        let range = PriceRange::default();
        assert!(range.contains(i64::MIN));
        assert!(range.contains(0));
        assert!(range.contains(i64::MAX));
    }

    #[test]
    fn test_criteria_builder() {
        let criteria = FilterCriteria::new()
            .with_brand("VONTAR")
            .with_memory("4 ГБ")
            .with_price_range(1000, 5000)
            .with_special_offers(true);
        assert_eq!(criteria.brand, vec!["VONTAR"]);
        assert_eq!(criteria.memory, vec!["4 ГБ"]);
        assert_eq!(criteria.price_range, PriceRange::new(1000, 5000));
        assert!(!criteria.is_empty());
        assert!(FilterCriteria::default().is_empty());
        assert!(FilterCriteria::default().with_availability(true).is_empty());
    }

    #[test]
    fn test_criteria_from_partial_json() {
        let criteria: FilterCriteria =
            serde_json::from_str(r#"{"brand": ["ZTE"], "specialOffers": true}"#).unwrap();
        assert_eq!(criteria.brand, vec!["ZTE"]);
        assert!(criteria.special_offers);
        assert!(criteria.price_range.is_unbounded());
    }
}
