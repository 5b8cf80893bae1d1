//! Product types.

use crate::catalog::SpecAttributes;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

/// Ratio the storefront applies to synthesize a crossed-out price for
/// promotional products that carry no explicit old price.
const PROMOTIONAL_PRICE_RATIO: f64 = 0.7;

/// Merchandising tag attached to a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProductType {
    /// On sale ("Акционная").
    Promotional,
    /// Best seller ("Хит").
    Hit,
    /// New model ("Новая").
    New,
    /// No tag ("Обычный").
    #[default]
    Regular,
}

impl ProductType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductType::Promotional => "promotional",
            ProductType::Hit => "hit",
            ProductType::New => "new",
            ProductType::Regular => "regular",
        }
    }

    /// Badge text shown on the product card, if any.
    pub fn badge(&self) -> Option<&'static str> {
        match self {
            ProductType::Promotional => Some("Акция"),
            ProductType::Hit => Some("Хит продаж"),
            ProductType::New => Some("Новая модель"),
            ProductType::Regular => None,
        }
    }
}

/// Parses a tag, accepting the legacy Cyrillic names.
impl FromStr for ProductType {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Акционная" => return Ok(ProductType::Promotional),
            "Хит" => return Ok(ProductType::Hit),
            "Новая" => return Ok(ProductType::New),
            "Обычный" => return Ok(ProductType::Regular),
            _ => {}
        }
        match s.trim().to_lowercase().as_str() {
            "promotional" => Ok(ProductType::Promotional),
            "hit" => Ok(ProductType::Hit),
            "new" => Ok(ProductType::New),
            "regular" => Ok(ProductType::Regular),
            _ => Err(CommerceError::validation(
                "type",
                format!("unknown product type: {s}"),
            )),
        }
    }
}

/// Unknown or missing tags read as `Regular`.
impl<'de> Deserialize<'de> for ProductType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw
            .and_then(|s| s.parse::<ProductType>().ok())
            .unwrap_or_default())
    }
}

/// SEO metadata an editor may attach to a product.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductMeta {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Either a JSON array or a comma separated string on the wire.
    #[serde(default, deserialize_with = "deserialize_keywords")]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub og_image: Option<String>,
}

/// A product as served by the catalog API.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product identifier. Blank when the record omitted it, and
    /// then left out of the serialized form.
    #[serde(default, skip_serializing_if = "ProductId::is_blank")]
    pub id: ProductId,
    /// Display name; brand filtering searches it.
    #[serde(default)]
    pub name: String,
    /// Price in whole rubles.
    #[serde(default, deserialize_with = "deserialize_price")]
    pub price: i64,
    /// Crossed-out price; a discount when greater than `price`.
    #[serde(default, deserialize_with = "deserialize_optional_price")]
    pub old_price: Option<i64>,
    /// Merchandising tag.
    #[serde(default, rename = "type")]
    pub product_type: ProductType,
    /// Free-text capability lines, e.g. "Оперативная память: 4 ГБ".
    #[serde(default, deserialize_with = "deserialize_specs")]
    pub specs: Vec<String>,
    /// Primary image URL.
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub additional_images: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub short_desc: Option<String>,
    #[serde(default)]
    pub meta: Option<ProductMeta>,
}

impl Product {
    /// Create a regular product with no specs.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: i64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            ..Self::default()
        }
    }

    /// Set the merchandising tag.
    pub fn with_type(mut self, product_type: ProductType) -> Self {
        self.product_type = product_type;
        self
    }

    /// Replace the capability lines.
    pub fn with_specs<I, S>(mut self, specs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.specs = specs.into_iter().map(Into::into).collect();
        self
    }

    /// Set the primary image URL.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Set the crossed-out price.
    pub fn with_old_price(mut self, old_price: i64) -> Self {
        self.old_price = Some(old_price);
        self
    }

    /// Price as money.
    pub fn price_money(&self) -> Money {
        Money::rub(self.price)
    }

    pub fn is_promotional(&self) -> bool {
        self.product_type == ProductType::Promotional
    }

    /// Crossed-out price to show next to the current one.
    ///
    /// Falls back to `price / 0.7` for promotional products without one.
    pub fn display_old_price(&self) -> Option<i64> {
        if let Some(old) = self.old_price.filter(|old| *old > 0) {
            return Some(old);
        }
        if self.is_promotional() {
            return Some((self.price as f64 / PROMOTIONAL_PRICE_RATIO).round() as i64);
        }
        None
    }

    /// Rounded discount percentage against the display old price.
    pub fn discount_percent(&self) -> Option<u32> {
        let old = self.display_old_price()?;
        if old <= self.price {
            return None;
        }
        let ratio = (old - self.price) as f64 / old as f64;
        Some((ratio * 100.0).round() as u32)
    }

    /// Structured RAM/storage figures parsed from labelled spec lines.
    pub fn attributes(&self) -> SpecAttributes {
        SpecAttributes::parse(&self.specs)
    }
}

/// Drop products whose exact name is in `hidden`, preserving order.
pub fn hide_products(products: Vec<Product>, hidden: &[String]) -> Vec<Product> {
    if hidden.is_empty() {
        return products;
    }
    products
        .into_iter()
        .filter(|p| !hidden.iter().any(|name| name == &p.name))
        .collect()
}

fn deserialize_price<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    Ok(deserialize_optional_price(deserializer)?.unwrap_or(0))
}

fn deserialize_optional_price<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<i64>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Float(f64),
        Text(String),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Int(n)) => Some(n),
        Some(Raw::Float(f)) if f.is_finite() => Some(f.round() as i64),
        Some(Raw::Text(s)) => s.trim().parse::<f64>().ok().map(|f| f.round() as i64),
        _ => None,
    })
}

fn deserialize_specs<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

fn deserialize_keywords<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        List(Vec<String>),
        Text(String),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::List(list)) => list,
        Some(Raw::Text(text)) => text
            .split(',')
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string)
            .collect(),
        None => Vec::new(),
    })
}
