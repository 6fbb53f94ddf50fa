//! In-memory `InventoryApi` for view tests.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::net::types::{
    Credentials, DashboardStats, LoginOutcome, Product, ProductInput, RegisterOutcome, Registration, Settings,
};
use crate::net::{ApiError, InventoryApi};
use crate::session::SessionToken;

/// Records every call and serves canned data. Operations named in `failing`
/// answer with HTTP 500.
pub(crate) struct MockApi {
    pub calls: Mutex<Vec<&'static str>>,
    pub tokens: Mutex<Vec<String>>,
    pub failing: Mutex<HashSet<&'static str>>,
    pub login_outcome: Mutex<LoginOutcome>,
    pub register_message: Option<String>,
    pub products: Mutex<Vec<Product>>,
    pub dashboard: DashboardStats,
    pub settings: Mutex<Settings>,
    pub last_input: Mutex<Option<ProductInput>>,
}

impl Default for MockApi {
    fn default() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            tokens: Mutex::new(Vec::new()),
            failing: Mutex::new(HashSet::new()),
            login_outcome: Mutex::new(LoginOutcome::Token(SessionToken::new("abc123"))),
            register_message: Some("Organization created".to_owned()),
            products: Mutex::new(Vec::new()),
            dashboard: DashboardStats::default(),
            settings: Mutex::new(Settings::default()),
            last_input: Mutex::new(None),
        }
    }
}

impl MockApi {
    pub fn with_products(products: Vec<Product>) -> Self {
        Self { products: Mutex::new(products), ..Self::default() }
    }

    pub fn fail(&self, operation: &'static str) {
        self.failing.lock().unwrap().insert(operation);
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    fn enter(&self, operation: &'static str, token: Option<&SessionToken>) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(operation);
        if let Some(token) = token {
            self.tokens.lock().unwrap().push(token.as_str().to_owned());
        }
        if self.failing.lock().unwrap().contains(operation) {
            return Err(ApiError::Status { status: 500, body: String::new() });
        }
        Ok(())
    }
}

pub(crate) fn product(id: &str, name: &str, sku: &str, quantity: u32, threshold: Option<u32>) -> Product {
    Product {
        id: id.to_owned(),
        organization_id: "org-1".to_owned(),
        name: name.to_owned(),
        sku: sku.to_owned(),
        description: None,
        quantity_on_hand: quantity,
        cost_price: None,
        selling_price: None,
        low_stock_threshold: threshold,
        created_at: String::new(),
        updated_at: String::new(),
    }
}

#[async_trait]
impl InventoryApi for MockApi {
    async fn login(&self, _credentials: &Credentials) -> Result<LoginOutcome, ApiError> {
        self.enter("login", None)?;
        Ok(self.login_outcome.lock().unwrap().clone())
    }

    async fn register(&self, _registration: &Registration) -> Result<RegisterOutcome, ApiError> {
        self.enter("register", None)?;
        Ok(RegisterOutcome { message: self.register_message.clone() })
    }

    async fn dashboard(&self, token: &SessionToken) -> Result<DashboardStats, ApiError> {
        self.enter("dashboard", Some(token))?;
        Ok(self.dashboard.clone())
    }

    async fn list_products(&self, token: &SessionToken) -> Result<Vec<Product>, ApiError> {
        self.enter("list_products", Some(token))?;
        Ok(self.products.lock().unwrap().clone())
    }

    async fn create_product(&self, token: &SessionToken, input: &ProductInput) -> Result<(), ApiError> {
        self.enter("create_product", Some(token))?;
        *self.last_input.lock().unwrap() = Some(input.clone());
        let mut products = self.products.lock().unwrap();
        let id = (products.len() + 1).to_string();
        let mut created = product(&id, &input.name, &input.sku, input.quantity_on_hand, input.low_stock_threshold);
        created.selling_price = input.selling_price;
        products.push(created);
        Ok(())
    }

    async fn update_product(&self, token: &SessionToken, id: &str, input: &ProductInput) -> Result<(), ApiError> {
        self.enter("update_product", Some(token))?;
        *self.last_input.lock().unwrap() = Some(input.clone());
        let mut products = self.products.lock().unwrap();
        if let Some(existing) = products.iter_mut().find(|product| product.id == id) {
            existing.name.clone_from(&input.name);
            existing.sku.clone_from(&input.sku);
            existing.quantity_on_hand = input.quantity_on_hand;
            existing.low_stock_threshold = input.low_stock_threshold;
        }
        Ok(())
    }

    async fn delete_product(&self, token: &SessionToken, id: &str) -> Result<(), ApiError> {
        self.enter("delete_product", Some(token))?;
        self.products.lock().unwrap().retain(|product| product.id != id);
        Ok(())
    }

    async fn settings(&self, token: &SessionToken) -> Result<Settings, ApiError> {
        self.enter("settings", Some(token))?;
        Ok(*self.settings.lock().unwrap())
    }

    async fn update_settings(&self, token: &SessionToken, settings: &Settings) -> Result<(), ApiError> {
        self.enter("update_settings", Some(token))?;
        *self.settings.lock().unwrap() = *settings;
        Ok(())
    }
}
