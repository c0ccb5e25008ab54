//! User registry
//!
//! Registration, credential checks and profile reads. Password hashing
//! and verification run before or after the store cycle, never inside
//! the write gate.

use std::sync::Arc;

use shared::client::{ProfileResponse, UserInfo};
use shared::models::{Role, User};
use shared::ErrorCode;

use super::codes;
use crate::security_log;
use crate::store::{Dataset, Store};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_PASSWORD_LEN, require_field, validate_email, validate_required_text,
};
use crate::utils::{AppError, AppResult};

/// Registration input (already deserialized, fields may be missing)
#[derive(Debug, Clone, Default)]
pub struct Registration {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone)]
pub struct UserRegistry {
    store: Arc<Store>,
}

/// Username from the email local part, suffixed `2`, `3`, … until unique
pub fn derive_username(dataset: &Dataset, email: &str) -> String {
    let base = email.split('@').next().unwrap_or(email);
    if !dataset.username_exists(base) {
        return base.to_string();
    }
    (2..)
        .map(|n| format!("{}{}", base, n))
        .find(|candidate| !dataset.username_exists(candidate))
        .unwrap_or_else(|| format!("{}-{}", base, uuid::Uuid::new_v4()))
}

pub fn user_info(user: &User) -> UserInfo {
    UserInfo {
        id: user.id.clone(),
        email: user.email.clone(),
        name: user.name.clone(),
        role: user.role,
        ndck: user.account_code.clone(),
    }
}

impl UserRegistry {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Create a `user` account
    ///
    /// Fails with RequiredField / ValidationFailed on bad input and
    /// EmailExists on a duplicate email; nothing is saved on failure.
    pub async fn register(&self, input: Registration) -> AppResult<User> {
        let name = require_field(input.name.as_deref(), "name")?.to_string();
        let email = require_field(input.email.as_deref(), "email")?.to_string();
        let password = input
            .password
            .filter(|p| !p.is_empty())
            .ok_or_else(|| AppError::required_field("password"))?;
        validate_required_text(&name, "name", MAX_NAME_LEN)?;
        validate_email(&email)?;
        validate_required_text(&password, "password", MAX_PASSWORD_LEN)?;

        let password_hash = self.store.hasher().hash(&password)?;

        let user = self
            .store
            .mutate(move |ds| {
                if ds.email_exists(&email) {
                    return Err(AppError::new(ErrorCode::EmailExists).with_detail("email", email));
                }

                let user = User {
                    id: uuid::Uuid::new_v4().to_string(),
                    username: derive_username(ds, &email),
                    email,
                    name,
                    role: Role::User,
                    password_hash,
                    account_code: codes::account_code(|c| ds.account_code_exists(c)),
                    notifications: vec![],
                    unlocked_item_ids: vec![],
                };
                ds.users.push(user.clone());
                Ok(user)
            })
            .await?;

        tracing::info!(user_id = %user.id, username = %user.username, "User registered");
        Ok(user)
    }

    /// Check a login (email first, then username) and password
    ///
    /// Unknown login and wrong password fail identically. Admin accounts
    /// additionally require `as_admin`.
    pub async fn authenticate(&self, login: &str, password: &str, as_admin: bool) -> AppResult<User> {
        let dataset = self.store.load().await?;
        let login = login.trim();

        let user = dataset
            .users
            .iter()
            .find(|u| u.email == login)
            .or_else(|| dataset.users.iter().find(|u| u.username == login));

        let Some(user) = user else {
            security_log!("WARN", "login_failed", login = login.to_string(), reason = "unknown_login");
            return Err(AppError::invalid_credentials());
        };

        if !self.store.hasher().verify(password, &user.password_hash) {
            security_log!("WARN", "login_failed", user_id = user.id.clone(), reason = "bad_password");
            return Err(AppError::invalid_credentials());
        }

        if user.is_admin() && !as_admin {
            security_log!("WARN", "admin_login_unconfirmed", user_id = user.id.clone());
            return Err(AppError::new(ErrorCode::AdminConfirmationRequired));
        }

        security_log!("INFO", "login_success", user_id = user.id.clone(), role = user.role.to_string());
        Ok(user.clone())
    }

    /// Profile of the calling user
    pub async fn profile(&self, user_id: &str) -> AppResult<ProfileResponse> {
        let dataset = self.store.load().await?;
        let user = dataset
            .user(user_id)
            .ok_or_else(|| AppError::new(ErrorCode::UserNotFound).with_detail("user_id", user_id))?;

        Ok(ProfileResponse {
            id: user.id.clone(),
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role,
            ndck: user.account_code.clone(),
            unlocked_item_ids: user.unlocked_item_ids.clone(),
        })
    }
}
