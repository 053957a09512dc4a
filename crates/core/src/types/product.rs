//! Product records and add-form validation.
//!
//! A [`ProductDraft`] is the raw text of the add-product form. It becomes a
//! [`Product`] only once every field passes validation; a failed draft is
//! handed back untouched so the form can be re-rendered with what the user
//! typed.

use serde::{Deserialize, Serialize};

use super::price::{Price, PriceError};

/// Errors that can occur when parsing a product quantity.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum QuantityError {
    /// The input is empty or only whitespace.
    #[error("quantity cannot be empty")]
    Empty,
    /// The input is not a whole number.
    #[error("quantity must be a whole number")]
    NotANumber,
    /// The number is zero or negative.
    #[error("quantity must be greater than zero")]
    NotPositive,
    /// The number does not fit in a `u32`.
    #[error("quantity must be at most {max}")]
    TooLarge {
        /// Largest accepted quantity.
        max: u32,
    },
}

/// Reasons an add-product draft is rejected.
///
/// Users see a single message for all of these; the variant is kept for logs.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Name is empty after trimming.
    #[error("name cannot be empty")]
    EmptyName,
    /// Description is empty after trimming.
    #[error("description cannot be empty")]
    EmptyDescription,
    /// Category is empty after trimming.
    #[error("category cannot be empty")]
    EmptyCategory,
    /// Price is missing, not a number, or not positive.
    #[error("invalid price: {0}")]
    Price(#[from] PriceError),
    /// Quantity is missing, not a whole number, or not positive.
    #[error("invalid quantity: {0}")]
    Quantity(#[from] QuantityError),
}

impl ValidationError {
    /// The message shown to users for any validation failure.
    pub const USER_MESSAGE: &'static str = "Please provide valid input for all fields.";
}

/// A product record as persisted.
///
/// Records carry no identifier of their own; the inventory assigns one when
/// the record is created or loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Product name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Category label.
    pub category: String,
    /// Unit price, always greater than zero.
    pub price: Price,
    /// Units in stock, always greater than zero.
    pub quantity: u32,
}

impl Product {
    /// Value of this line: `price × quantity`.
    #[must_use]
    pub fn value(&self) -> rust_decimal::Decimal {
        self.price.times(self.quantity)
    }
}

/// Raw add-product form input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub quantity: String,
}

impl ProductDraft {
    /// Validate the draft into a product.
    ///
    /// Text fields are trimmed. Fields are checked in form order and the
    /// first failure is returned.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` naming the first field that failed.
    pub fn validate(&self) -> Result<Product, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }

        let description = self.description.trim();
        if description.is_empty() {
            return Err(ValidationError::EmptyDescription);
        }

        let category = self.category.trim();
        if category.is_empty() {
            return Err(ValidationError::EmptyCategory);
        }

        let price = Price::parse(&self.price)?;
        let quantity = parse_quantity(&self.quantity)?;

        Ok(Product {
            name: name.to_owned(),
            description: description.to_owned(),
            category: category.to_owned(),
            price,
            quantity,
        })
    }
}

/// Parse a quantity from form text.
///
/// # Errors
///
/// Returns a `QuantityError` if the input is empty, not a whole number, not
/// positive, or larger than `u32::MAX`.
pub fn parse_quantity(s: &str) -> Result<u32, QuantityError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(QuantityError::Empty);
    }

    let value: i64 = s.parse().map_err(|_| QuantityError::NotANumber)?;
    if value <= 0 {
        return Err(QuantityError::NotPositive);
    }

    u32::try_from(value).map_err(|_| QuantityError::TooLarge { max: u32::MAX })
}
