//! Product table: load, search, create, edit, delete.
//!
//! DESIGN
//! ======
//! Mutations set `submitting`, then either re-fetch the list or raise an
//! alert and leave the list exactly as it was. Nothing is retried and no
//! optimistic edits are applied to the cached rows.

#[cfg(test)]
#[path = "products_test.rs"]
mod products_test;

use std::future::Future;

use super::form::ProductForm;
use super::view::{LoadState, fetch_protected, run_protected};
use crate::net::types::Product;
use crate::net::{ApiError, InventoryApi};
use crate::session::{AuthGateway, SessionToken};
use crate::util::stock::{filter_products, format_price};

pub const PRODUCTS_LOAD_FAILED: &str = "Failed to load products.";
pub const CREATE_FAILED: &str = "Failed to create product";
pub const UPDATE_FAILED: &str = "Failed to update product";
pub const DELETE_FAILED: &str = "Failed to delete product";
pub const NO_PRODUCTS: &str = "No products found.";

/// One rendered table row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProductRow {
    pub id: String,
    pub name: String,
    pub sku: String,
    pub quantity: u32,
    /// Quantity is rendered with the low-stock emphasis.
    pub low_stock: bool,
    pub selling_price: String,
}

impl From<&Product> for ProductRow {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            sku: product.sku.clone(),
            quantity: product.quantity_on_hand,
            low_stock: product.is_low_stock(),
            selling_price: format_price(product.selling_price),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct ProductsState {
    pub list: LoadState<Vec<Product>>,
    pub search: String,
    pub add_dialog_open: bool,
    /// Product currently open in the edit dialog.
    pub editing: Option<Product>,
    pub submitting: bool,
    /// Blocking message raised by the last failed mutation.
    pub alert: Option<String>,
}

impl ProductsState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// (Re-)fetch the list.
    pub async fn refresh(&mut self, api: &dyn InventoryApi, gateway: &AuthGateway) {
        self.list = LoadState::Loading;
        self.list = fetch_protected(gateway, PRODUCTS_LOAD_FAILED, |token| async move {
            api.list_products(&token).await
        })
        .await;
    }

    /// Products matching the search box.
    #[must_use]
    pub fn visible(&self) -> Vec<&Product> {
        self.list
            .data()
            .map(|products| filter_products(products, &self.search))
            .unwrap_or_default()
    }

    #[must_use]
    pub fn rows(&self) -> Vec<ProductRow> {
        self.visible().into_iter().map(ProductRow::from).collect()
    }

    /// Placeholder text when the list loaded but nothing matches.
    #[must_use]
    pub fn empty_message(&self) -> Option<&'static str> {
        (self.list.data().is_some() && self.visible().is_empty()).then_some(NO_PRODUCTS)
    }

    pub fn open_add_dialog(&mut self) {
        self.add_dialog_open = true;
    }

    pub fn close_add_dialog(&mut self) {
        self.add_dialog_open = false;
    }

    /// Open the edit dialog for `id`. Returns the prefilled form, or `None`
    /// when the product is not in the loaded list.
    pub fn begin_edit(&mut self, id: &str) -> Option<ProductForm> {
        let product = self.list.data()?.iter().find(|product| product.id == id)?.clone();
        let form = ProductForm::from_product(&product);
        self.editing = Some(product);
        Some(form)
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Create a product from `form`. Returns `true` when the server accepted it.
    pub async fn create(&mut self, api: &dyn InventoryApi, gateway: &AuthGateway, form: &ProductForm) -> bool {
        let input = match form.validate() {
            Ok(input) => input,
            Err(error) => {
                self.alert = Some(error.to_string());
                return false;
            }
        };

        let created = self
            .mutate(gateway, CREATE_FAILED, |token| async move { api.create_product(&token, &input).await })
            .await;
        if created {
            self.add_dialog_open = false;
            self.refresh(api, gateway).await;
        }
        created
    }

    /// Save `form` over the product being edited. Without an open edit
    /// dialog this does nothing.
    pub async fn update(&mut self, api: &dyn InventoryApi, gateway: &AuthGateway, form: &ProductForm) -> bool {
        let Some(id) = self.editing.as_ref().map(|product| product.id.clone()) else {
            return false;
        };
        let input = match form.validate() {
            Ok(input) => input,
            Err(error) => {
                self.alert = Some(error.to_string());
                return false;
            }
        };

        let updated = self
            .mutate(gateway, UPDATE_FAILED, |token| async move {
                api.update_product(&token, &id, &input).await
            })
            .await;
        if updated {
            self.editing = None;
            self.refresh(api, gateway).await;
        }
        updated
    }

    /// Delete `id` once the user has confirmed. Unconfirmed deletes are no-ops.
    pub async fn delete(&mut self, api: &dyn InventoryApi, gateway: &AuthGateway, id: &str, confirmed: bool) -> bool {
        if !confirmed {
            return false;
        }

        let deleted = self
            .mutate(gateway, DELETE_FAILED, |token| async move { api.delete_product(&token, id).await })
            .await;
        if deleted {
            self.refresh(api, gateway).await;
        }
        deleted
    }

    async fn mutate<F, Fut>(&mut self, gateway: &AuthGateway, failure: &'static str, request: F) -> bool
    where
        F: FnOnce(SessionToken) -> Fut,
        Fut: Future<Output = Result<(), ApiError>>,
    {
        self.begin_submit();
        let result = run_protected(gateway, request).await;
        self.finish_submit(result, failure)
    }

    /// Enter the `submitting` sub-state; it lasts until `finish_submit`.
    fn begin_submit(&mut self) {
        self.alert = None;
        self.submitting = true;
    }

    fn finish_submit(&mut self, result: Result<(), ApiError>, failure: &'static str) -> bool {
        self.submitting = false;
        match result {
            Ok(()) => true,
            Err(error) if error.is_unauthenticated() => {
                self.list = LoadState::Unauthenticated;
                false
            }
            Err(error) => {
                tracing::warn!(error = %error, "{failure}");
                self.alert = Some(failure.to_owned());
                false
            }
        }
    }
}
