//! Cart and cart entry types.

use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A product snapshot held in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartEntry {
    /// Product this entry was added from.
    pub product_id: ProductId,
    /// Product name at the time of the last add.
    pub name: String,
    /// Unit price at the time of the last add.
    pub price: Money,
    /// Image at the time of the last add.
    pub image: Option<String>,
    /// Always at least 1.
    pub quantity: u32,
}

impl CartEntry {
    fn from_product(product: &Product) -> Self {
        Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            price: product.price_money(),
            image: product.image.clone(),
            quantity: 1,
        }
    }

    fn refresh(&mut self, product: &Product) {
        self.name = product.name.clone();
        self.price = product.price_money();
        self.image = product.image.clone();
    }

    /// Price times quantity, clamped at the numeric bounds.
    pub fn line_total(&self) -> Money {
        self.price.saturating_multiply(i64::from(self.quantity))
    }
}

/// A shopping cart.
///
/// Entries keep insertion order and there is at most one per product id.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    entries: Vec<CartEntry>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of a product.
    ///
    /// A repeat add increments the quantity by one and refreshes the stored
    /// name, price and image from `product`.
    ///
    /// Returns an error if the product id is blank; the cart is left as is.
    pub fn add_item(&mut self, product: &Product) -> Result<(), CommerceError> {
        if product.id.is_blank() {
            return Err(CommerceError::InvalidProduct(format!(
                "product '{}' has no id",
                product.name
            )));
        }

        if let Some(existing) = self.entries.iter_mut().find(|e| e.product_id == product.id) {
            existing.quantity = existing.quantity.saturating_add(1);
            existing.refresh(product);
            debug!(product_id = %product.id, quantity = existing.quantity, "incremented cart entry");
            return Ok(());
        }

        self.entries.push(CartEntry::from_product(product));
        debug!(product_id = %product.id, "added cart entry");
        Ok(())
    }

    /// Remove an entry. Returns false if it was not in the cart.
    pub fn remove_item(&mut self, product_id: &ProductId) -> bool {
        let len_before = self.entries.len();
        self.entries.retain(|e| &e.product_id != product_id);
        self.entries.len() < len_before
    }

    /// Set an entry's quantity.
    ///
    /// If quantity is <= 0, removes the entry. Returns false if the entry
    /// does not exist.
    pub fn set_quantity(&mut self, product_id: &ProductId, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove_item(product_id);
        }

        match self.entries.iter_mut().find(|e| &e.product_id == product_id) {
            Some(entry) => {
                entry.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
                true
            }
            None => false,
        }
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of distinct entries.
    pub fn item_count(&self) -> usize {
        self.entries.len()
    }

    /// Sum of quantities.
    pub fn total_units(&self) -> u64 {
        self.entries.iter().map(|e| u64::from(e.quantity)).sum()
    }

    /// Sum of snapshot price times quantity.
    pub fn total_price(&self) -> Money {
        self.entries
            .iter()
            .fold(Money::zero(), |acc, e| {
                acc.saturating_add(&e.line_total())
            })
    }

    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    pub fn get(&self, product_id: &ProductId) -> Option<&CartEntry> {
        self.entries.iter().find(|e| &e.product_id == product_id)
    }

    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.get(product_id).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
