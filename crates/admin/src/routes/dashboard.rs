//! Dashboard view.
//!
//! Built from the workbench on every render; nothing here is cached.

use askama::Template;
use askama_web::WebTemplate;

use stockroom_core::{ProductDraft, ProductId};

use crate::filters;
use crate::models::{CurrentUser, Notice};
use crate::services::{InventoryEntry, Workbench};

/// Product card view for templates.
#[derive(Debug, Clone)]
pub struct ProductCardView {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: String,
    pub quantity: u32,
}

impl From<&InventoryEntry> for ProductCardView {
    fn from(entry: &InventoryEntry) -> Self {
        Self {
            id: entry.id,
            name: entry.product.name.clone(),
            description: entry.product.description.clone(),
            category: entry.product.category.clone(),
            price: entry.product.price.to_string(),
            quantity: entry.product.quantity,
        }
    }
}

/// Removal awaiting confirmation.
#[derive(Debug, Clone)]
pub struct PendingRemovalView {
    pub id: ProductId,
    pub name: String,
}

/// Dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard/index.html")]
pub struct DashboardTemplate {
    pub username: String,
    pub notice: Option<Notice>,
    pub currency: String,
    pub total_products: usize,
    pub total_value: String,
    pub products: Vec<ProductCardView>,
    pub draft: ProductDraft,
    pub pending: Option<PendingRemovalView>,
}

impl DashboardTemplate {
    /// Build the dashboard for `user` from the current workbench state.
    ///
    /// `draft` pre-fills the add-product form; pass the default for an
    /// empty form.
    #[must_use]
    pub fn build(
        workbench: &Workbench,
        user: &CurrentUser,
        currency: &str,
        notice: Option<Notice>,
        draft: ProductDraft,
    ) -> Self {
        let inventory = workbench.inventory();
        let stats = inventory.stats();

        let pending = inventory.pending_removal().and_then(|id| {
            inventory.get(id).map(|product| PendingRemovalView {
                id,
                name: product.name.clone(),
            })
        });

        Self {
            username: user.username.to_string(),
            notice,
            currency: currency.to_string(),
            total_products: stats.total_products,
            total_value: stats.total_value_display(),
            products: inventory.entries().iter().map(ProductCardView::from).collect(),
            draft,
            pending,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use secrecy::SecretString;

    use super::*;
    use crate::db::MemoryStore;

    fn signed_in() -> (Workbench, CurrentUser) {
        let mut wb = Workbench::open(Arc::new(MemoryStore::new()));
        let pw = SecretString::from("pw".to_owned());
        wb.register("alice", &pw).unwrap();
        let username = wb.login("alice", &pw).unwrap();
        (wb, CurrentUser { username })
    }

    fn widget() -> ProductDraft {
        ProductDraft {
            name: "Widget".to_owned(),
            description: "A widget".to_owned(),
            category: "Tools".to_owned(),
            price: "9.99".to_owned(),
            quantity: "3".to_owned(),
        }
    }

    #[test]
    fn test_build_empty_dashboard() {
        let (wb, user) = signed_in();
        let view = DashboardTemplate::build(&wb, &user, "M", None, ProductDraft::default());
        assert_eq!(view.total_products, 0);
        assert_eq!(view.total_value, "0.00");
        assert!(view.products.is_empty());
        assert!(view.pending.is_none());
    }

    #[test]
    fn test_build_with_products_and_pending_removal() {
        let (mut wb, user) = signed_in();
        let id = wb.add_product(&widget()).unwrap();
        wb.request_remove(id).unwrap();

        let view = DashboardTemplate::build(&wb, &user, "M", None, ProductDraft::default());
        assert_eq!(view.total_products, 1);
        assert_eq!(view.total_value, "29.97");
        assert_eq!(view.products[0].price, "9.99");
        assert_eq!(view.pending.as_ref().map(|p| p.name.as_str()), Some("Widget"));
    }

    #[test]
    fn test_render_shows_cards_and_totals() {
        let (mut wb, user) = signed_in();
        wb.add_product(&widget()).unwrap();

        let html = DashboardTemplate::build(&wb, &user, "M", None, ProductDraft::default())
            .render()
            .unwrap();
        assert!(html.contains("Inventory Dashboard"));
        assert!(html.contains("Widget"));
        assert!(html.contains("M 9.99"));
        assert!(html.contains("M 29.97"));
        assert!(html.contains("3 units"));
        assert!(!html.contains("Are you sure you want to remove this product?"));
    }

    #[test]
    fn test_render_escapes_product_text() {
        let (mut wb, user) = signed_in();
        wb.add_product(&ProductDraft {
            name: "<script>alert(1)</script>".to_owned(),
            ..widget()
        })
        .unwrap();

        let html = DashboardTemplate::build(&wb, &user, "M", None, ProductDraft::default())
            .render()
            .unwrap();
        assert!(!html.contains("<script>alert(1)</script>"));
    }
}
