//! Persisted dataset
//!
//! The whole shop state as one JSON document:
//! `{ users[], items[], orders[], settings{} }`.

use serde::{Deserialize, Serialize};
use shared::models::{Item, Order, PaymentSettings, User};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default)]
    pub orders: Vec<Order>,
    pub settings: PaymentSettings,
}

impl Dataset {
    pub fn user(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn user_mut(&mut self, id: &str) -> Option<&mut User> {
        self.users.iter_mut().find(|u| u.id == id)
    }

    pub fn item(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn order(&self, id: &str) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == id)
    }

    pub fn order_mut(&mut self, id: &str) -> Option<&mut Order> {
        self.orders.iter_mut().find(|o| o.id == id)
    }

    /// Whether any order already carries this activation code
    pub fn activation_code_exists(&self, code: &str) -> bool {
        self.orders
            .iter()
            .any(|o| o.activation_code.as_deref() == Some(code))
    }

    /// Whether any user already carries this account code
    pub fn account_code_exists(&self, code: &str) -> bool {
        self.users.iter().any(|u| u.account_code == code)
    }

    pub fn email_exists(&self, email: &str) -> bool {
        self.users.iter().any(|u| u.email == email)
    }

    pub fn username_exists(&self, username: &str) -> bool {
        self.users.iter().any(|u| u.username == username)
    }
}
