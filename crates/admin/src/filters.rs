//! Custom Askama template filters.

use std::fmt::Display;

/// Renders a stock count as `"N units"`.
///
/// Usage in templates: `{{ product.quantity|units }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn units(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(format!("{value} units"))
}
