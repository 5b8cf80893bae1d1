//! Data access layer for the TV-box storefront.
//!
//! This crate provides:
//! - `CatalogSource` - Async access to the product catalog
//! - `CatalogEditor` - Create, update and delete catalog products
//! - `HttpCatalog` - Remote catalog API client with timeout/retry
//! - `FileCatalog` - Catalog snapshot read from disk
//! - `TelegramRelay` - Forwards order and lead messages to managers
//! - `TimeoutConfig` / `RetryPolicy` - Outbound request policies

mod client;
mod error;
mod retry;
mod telegram;
mod timeout;

pub use client::*;
pub use error::*;
pub use retry::*;
pub use telegram::*;
pub use timeout::*;
