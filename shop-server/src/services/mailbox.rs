//! Notification mailbox
//!
//! Per-user message list, newest first. Written by the order lifecycle,
//! read and cleared by its owner.

use std::sync::Arc;

use shared::models::{Notification, User};
use shared::ErrorCode;

use crate::store::Store;
use crate::utils::time::now_millis;
use crate::utils::{AppError, AppResult};

/// Prepend a new unread notification
pub fn deliver(user: &mut User, message: impl Into<String>) -> Notification {
    let notification = Notification {
        id: uuid::Uuid::new_v4().to_string(),
        message: message.into(),
        read: false,
        created_at: now_millis(),
    };
    user.notifications.insert(0, notification.clone());
    notification
}

pub fn unread_count(user: &User) -> usize {
    user.notifications.iter().filter(|n| !n.read).count()
}

#[derive(Debug, Clone)]
pub struct Mailbox {
    store: Arc<Store>,
}

fn user_not_found(user_id: &str) -> AppError {
    AppError::new(ErrorCode::UserNotFound).with_detail("user_id", user_id)
}

impl Mailbox {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// All notifications, newest first
    pub async fn list(&self, user_id: &str) -> AppResult<Vec<Notification>> {
        let dataset = self.store.load().await?;
        let user = dataset.user(user_id).ok_or_else(|| user_not_found(user_id))?;

        let mut notifications = user.notifications.clone();
        notifications.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(notifications)
    }

    pub async fn unread_count(&self, user_id: &str) -> AppResult<usize> {
        let dataset = self.store.load().await?;
        let user = dataset.user(user_id).ok_or_else(|| user_not_found(user_id))?;
        Ok(unread_count(user))
    }

    /// Mark every notification read; returns how many changed
    pub async fn mark_all_read(&self, user_id: &str) -> AppResult<usize> {
        let user_id = user_id.to_string();
        self.store
            .mutate(move |ds| {
                let user = ds.user_mut(&user_id).ok_or_else(|| user_not_found(&user_id))?;
                let mut changed = 0;
                for n in user.notifications.iter_mut().filter(|n| !n.read) {
                    n.read = true;
                    changed += 1;
                }
                Ok(changed)
            })
            .await
    }
}
