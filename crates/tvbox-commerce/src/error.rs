//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in storefront operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommerceError {
    /// Product shape violates the cart input contract (e.g. missing id).
    #[error("Invalid product: {0}")]
    InvalidProduct(String),

    /// A form field failed validation.
    #[error("Validation error on {field}: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    /// Order submitted with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,
}

impl CommerceError {
    /// Build a validation error for a named field.
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        CommerceError::Validation {
            field,
            message: message.into(),
        }
    }
}

