//! Order form and order message.

use crate::cart::Cart;
use crate::checkout::MIN_PHONE_LEN;
use crate::error::CommerceError;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// Delivery carrier chosen on the order form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryService {
    /// CDEK courier ("sdek" on the wire).
    #[default]
    Sdek,
    /// Russian Post.
    #[serde(alias = "post")]
    RussianPost,
}

impl DeliveryService {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryService::Sdek => "sdek",
            DeliveryService::RussianPost => "russianpost",
        }
    }

    /// Label printed in the order message.
    pub fn label(&self) -> &'static str {
        match self {
            DeliveryService::Sdek => "СДЭК",
            DeliveryService::RussianPost => "Почта России",
        }
    }
}

/// What a relayed message is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Order,
    Question,
}

impl MessageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKind::Order => "order",
            MessageKind::Question => "question",
        }
    }
}

/// Customer details collected at checkout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderForm {
    pub full_name: String,
    pub phone: String,
    pub address: String,
    #[serde(default)]
    pub comment: String,
    #[serde(default, rename = "deliveryService")]
    pub delivery: DeliveryService,
}

impl OrderForm {
    /// Check required fields, reporting the first one that fails.
    pub fn validate(&self) -> Result<(), CommerceError> {
        if self.full_name.trim().is_empty() {
            return Err(CommerceError::validation("full_name", "Введите ФИО"));
        }
        if self.phone.chars().count() < MIN_PHONE_LEN {
            return Err(CommerceError::validation(
                "phone",
                "Введите корректный номер телефона",
            ));
        }
        if self.address.trim().is_empty() {
            return Err(CommerceError::validation("address", "Введите адрес доставки"));
        }
        Ok(())
    }
}

/// Renders the order message sent to managers.
pub struct OrderSummary;

impl OrderSummary {
    /// Build the order text for a validated form and a non-empty cart.
    pub fn render(form: &OrderForm, cart: &Cart) -> Result<String, CommerceError> {
        form.validate()?;
        if cart.is_empty() {
            return Err(CommerceError::EmptyCart);
        }

        let comment = if form.comment.is_empty() {
            "Не указан"
        } else {
            form.comment.as_str()
        };

        let mut text = String::new();
        // Writing into a String cannot fail.
        let _ = writeln!(text, "🛒 НОВЫЙ ЗАКАЗ С САЙТА");
        let _ = writeln!(text);
        let _ = writeln!(text, "👤 ФИО: {}", form.full_name);
        let _ = writeln!(text, "📱 Телефон: {}", form.phone);
        let _ = writeln!(text, "📍 Адрес: {}", form.address);
        let _ = writeln!(text, "🚚 Служба доставки: {}", form.delivery.label());
        let _ = writeln!(text, "💬 Комментарий: {comment}");
        let _ = writeln!(text);
        let _ = writeln!(text, "🛍️ Товары:");
        for entry in cart.entries() {
            let _ = writeln!(
                text,
                "- {} x{} = {} ₽",
                entry.name,
                entry.quantity,
                entry.line_total().amount
            );
        }
        let _ = writeln!(text);
        let _ = write!(text, "💰 Итого: {} ₽", cart.total_price().amount);

        Ok(text)
    }
}
