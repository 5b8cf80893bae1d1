//! Search module.
//!
//! Contains the catalog filter criteria and the conjunctive product filter.

mod criteria;
mod filter;

pub use criteria::{FilterCriteria, PriceRange};
pub use filter::{filter_products, filter_refs, matches};
