//! Shopping cart module.
//!
//! Contains the cart aggregate and its per-product entries.

mod cart;

pub use cart::{Cart, CartEntry};
