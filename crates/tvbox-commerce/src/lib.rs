//! Domain core for the TV-box storefront.
//!
//! This crate holds everything the storefront computes locally, with no I/O:
//!
//! - **Catalog**: Products as served by the remote catalog API, spec-text parsing
//! - **Search**: Filter criteria and the conjunctive product filter
//! - **Cart**: Snapshotting cart aggregate with quantity and total arithmetic
//! - **Checkout**: Order and lead payloads forwarded to the messaging relay
//! - **SEO**: Page metadata, sitemap and robots.txt
//!
//! # Example
//!
//! ```rust
//! use tvbox_commerce::prelude::*;
//!
//! let products: Vec<Product> = serde_json::from_str(r#"[
//!     {"id": "1", "name": "VONTAR W2", "price": 4000, "type": "promotional",
//!      "specs": ["Оперативная память: 4 ГБ"]},
//!     {"id": "2", "name": "Tanix W2", "price": 9000, "type": "regular",
//!      "specs": ["Оперативная память: 2 ГБ"]}
//! ]"#).unwrap();
//!
//! let criteria = FilterCriteria::default().with_special_offers(true);
//! let offers = filter_products(&products, &criteria);
//! assert_eq!(offers.len(), 1);
//!
//! let mut cart = Cart::new();
//! cart.add_item(&offers[0]).unwrap();
//! cart.add_item(&offers[0]).unwrap();
//! assert_eq!(cart.total_price().display(), "8 000 ₽");
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod search;
pub mod seo;

pub use error::CommerceError;
pub use ids::*;
pub use money::Money;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::Money;

    // Catalog
    pub use crate::catalog::{
        hide_products, Product, ProductMeta, ProductType, SpecAttributes, SpecKind,
    };

    // Cart
    pub use crate::cart::{Cart, CartEntry};

    // Checkout
    pub use crate::checkout::{
        DeliveryService, LeadRequest, MessageKind, OrderForm, OrderSummary, QuizLead,
    };

    // Search
    pub use crate::search::{filter_products, filter_refs, matches, FilterCriteria, PriceRange};

    // SEO
    pub use crate::seo::{PageMeta, SiteMeta, Sitemap};
}
