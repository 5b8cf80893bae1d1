//! Checkout module.
//!
//! Contains the order and lead forms and the plain-text messages they are
//! forwarded as. Delivery of those messages lives outside this crate.

mod lead;
mod order;
mod phone;

pub use lead::{
    LeadRequest, QuizLead, QUIZ_BUDGETS, QUIZ_FORM, QUIZ_TV_TYPES, QUIZ_USAGES,
};
pub use order::{DeliveryService, MessageKind, OrderForm, OrderSummary};
pub use phone::{normalize_phone, phone_digit_count, MAX_PHONE_LEN, MIN_PHONE_LEN};
