//! Catalog service
//!
//! Read access to the reference lists and items, admin item creation and
//! the access check in front of stored documents.

use std::sync::Arc;

use shared::models::{CatalogInfo, Item, ItemCreate, ItemQuery, PaymentSettings, catalog_info, subsection_name};
use shared::ErrorCode;

use super::codes;
use crate::auth::CurrentUser;
use crate::store::Store;
use crate::utils::validation::{MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, require_field, validate_required_text};
use crate::utils::{AppError, AppResult};

#[derive(Debug, Clone)]
pub struct CatalogService {
    store: Arc<Store>,
}

/// Resolve the admin-supplied price field
///
/// Absent or non-numeric falls back to a random seed price; a numeric
/// value must be positive.
pub fn resolve_price(raw: Option<&str>) -> AppResult<i64> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(codes::random_seed_price());
    };
    match raw.parse::<i64>() {
        Ok(price) if price > 0 => Ok(price),
        Ok(price) => Err(AppError::new(ErrorCode::ItemInvalidPrice).with_detail("price", price)),
        Err(_) => Ok(codes::random_seed_price()),
    }
}

/// Apply an item filter (exact match, AND)
pub fn filter_items<'a>(items: &'a [Item], query: &ItemQuery) -> Vec<&'a Item> {
    let category = query.category.as_deref().filter(|s| !s.is_empty());
    let sub = query.sub.as_deref().filter(|s| !s.is_empty());
    items
        .iter()
        .filter(|i| category.is_none_or(|c| i.category == c))
        .filter(|i| sub.is_none_or(|s| i.sub == s))
        .collect()
}

impl CatalogService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    pub fn reference_lists(&self) -> CatalogInfo {
        catalog_info()
    }

    pub async fn list_items(&self, query: &ItemQuery) -> AppResult<Vec<Item>> {
        let dataset = self.store.load().await?;
        Ok(filter_items(&dataset.items, query).into_iter().cloned().collect())
    }

    pub async fn settings(&self) -> AppResult<PaymentSettings> {
        Ok(self.store.load().await?.settings)
    }

    /// Create an item (admin only; enforced by the route layer)
    pub async fn add_item(&self, input: ItemCreate) -> AppResult<Item> {
        let category = require_field(input.category.as_deref(), "category")?.to_string();
        let sub = require_field(input.sub.as_deref(), "sub")?.to_string();
        let title = require_field(input.title.as_deref(), "title")?.to_string();
        validate_required_text(&category, "category", MAX_SHORT_TEXT_LEN)?;
        validate_required_text(&sub, "sub", MAX_SHORT_TEXT_LEN)?;
        validate_required_text(&title, "title", MAX_NAME_LEN)?;
        let price = resolve_price(input.price.as_deref())?;

        let item = Item {
            id: uuid::Uuid::new_v4().to_string(),
            sub_name: subsection_name(&sub),
            category,
            sub,
            title,
            price,
            file_path: input.file_path,
        };

        let created = item.clone();
        self.store
            .mutate(move |ds| {
                ds.items.push(item);
                Ok(())
            })
            .await?;

        tracing::info!(item_id = %created.id, price = created.price, "Item created");
        Ok(created)
    }

    /// Item whose stored document the caller may download
    ///
    /// Admins may read everything, users only what they unlocked.
    pub async fn document_for(&self, user: &CurrentUser, item_id: &str) -> AppResult<Item> {
        let dataset = self.store.load().await?;
        let item = dataset
            .item(item_id)
            .ok_or_else(|| AppError::new(ErrorCode::ItemNotFound).with_detail("item_id", item_id))?;

        if !user.is_admin() {
            let unlocked = dataset
                .user(&user.id)
                .is_some_and(|u| u.has_unlocked(item_id));
            if !unlocked {
                return Err(AppError::forbidden("Document has not been unlocked")
                    .with_detail("item_id", item_id));
            }
        }

        if item.file_path.is_none() {
            return Err(AppError::not_found("Document file").with_detail("item_id", item_id));
        }
        Ok(item.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, category: &str, sub: &str) -> Item {
        Item {
            id: id.to_string(),
            category: category.to_string(),
            sub: sub.to_string(),
            sub_name: subsection_name(sub),
            title: format!("t{}", id),
            price: 10_000,
            file_path: None,
        }
    }

    #[test]
    fn test_filter_items() {
        let items = vec![
            item("1", "nhi", "video"),
            item("2", "nhi", "lythuyet"),
            item("3", "ung bướu", "video"),
        ];

        let all = filter_items(&items, &ItemQuery::default());
        assert_eq!(all.len(), 3);

        let by_cat = filter_items(
            &items,
            &ItemQuery {
                category: Some("nhi".to_string()),
                sub: None,
            },
        );
        assert_eq!(by_cat.len(), 2);

        let both = filter_items(
            &items,
            &ItemQuery {
                category: Some("nhi".to_string()),
                sub: Some("video".to_string()),
            },
        );
        assert_eq!(both.len(), 1);
        assert_eq!(both[0].id, "1");

        let none = filter_items(
            &items,
            &ItemQuery {
                category: Some("Nhi".to_string()),
                sub: None,
            },
        );
        assert!(none.is_empty());
    }

    #[test]
    fn test_resolve_price() {
        assert_eq!(resolve_price(Some("30000")).unwrap(), 30_000);
        assert_eq!(resolve_price(Some(" 45000 ")).unwrap(), 45_000);

        let fallback = resolve_price(None).unwrap();
        assert!((10_000..=100_000).contains(&fallback));
        let fallback = resolve_price(Some("free")).unwrap();
        assert!((10_000..=100_000).contains(&fallback));

        let err = resolve_price(Some("0")).unwrap_err();
        assert_eq!(err.code, ErrorCode::ItemInvalidPrice);
        assert!(resolve_price(Some("-5")).is_err());
    }
}
