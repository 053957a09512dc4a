//! Aggregate figures for the dashboard.

use rust_decimal::Decimal;

use super::price::format_amount;
use super::product::Product;

/// Totals over the whole inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InventoryStats {
    /// Number of product records.
    pub total_products: usize,
    /// Sum of `price × quantity`, rounded to cents.
    pub total_value: Decimal,
}

impl InventoryStats {
    /// Compute totals over a sequence of products.
    pub fn from_products<'a>(products: impl IntoIterator<Item = &'a Product>) -> Self {
        let mut total_products = 0;
        let mut total_value = Decimal::ZERO;

        for product in products {
            total_products += 1;
            total_value = total_value.saturating_add(product.value());
        }

        Self {
            total_products,
            total_value: total_value
                .round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero),
        }
    }

    /// Total value with exactly two fraction digits (e.g. `"29.97"`).
    #[must_use]
    pub fn total_value_display(&self) -> String {
        format_amount(self.total_value)
    }
}
