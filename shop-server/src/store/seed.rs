//! Seed dataset
//!
//! Synthesized the first time the data file is missing: one admin
//! account, two items per (category, subsection) pair, no orders and the
//! configured payment settings.

use shared::models::{CATEGORIES, Item, PaymentSettings, Role, SUBSECTIONS, User};

use super::Dataset;
use crate::auth::CredentialHasher;
use crate::services::codes;
use crate::utils::AppResult;

/// Fixed id of the seeded admin account
pub const ADMIN_USER_ID: &str = "u-admin";

/// Items generated per (category, subsection) pair
pub const ITEMS_PER_SUBSECTION: usize = 2;

/// Seeded admin account
#[derive(Debug, Clone)]
pub struct AdminSeed {
    pub username: String,
    pub email: String,
    pub name: String,
    pub password: String,
}

impl Default for AdminSeed {
    fn default() -> Self {
        Self {
            username: "bahana".to_string(),
            email: "bahana@local".to_string(),
            name: "Administrator".to_string(),
            password: "change-me-admin".to_string(),
        }
    }
}

/// Everything needed to synthesize the first dataset
#[derive(Debug, Clone)]
pub struct SeedConfig {
    pub admin: AdminSeed,
    pub settings: PaymentSettings,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            admin: AdminSeed::default(),
            settings: PaymentSettings {
                recipient_name: "SHOP OWNER".to_string(),
                recipient_phone: "0000000000".to_string(),
                qr_template: "https://api.qrserver.com/v1/create-qr-code/?size=320x320&data="
                    .to_string(),
            },
        }
    }
}

/// Catalog cross product with ids `"1".."120"`
pub fn seed_items() -> Vec<Item> {
    let mut items = Vec::with_capacity(CATEGORIES.len() * SUBSECTIONS.len() * ITEMS_PER_SUBSECTION);

    for category in CATEGORIES {
        for (key, name) in SUBSECTIONS {
            for i in 1..=ITEMS_PER_SUBSECTION {
                items.push(Item {
                    id: (items.len() + 1).to_string(),
                    category: category.to_string(),
                    sub: key.to_string(),
                    sub_name: name.to_string(),
                    title: format!("{} {} – {}", name, i, category),
                    price: codes::random_seed_price(),
                    file_path: None,
                });
            }
        }
    }

    items
}

/// Build the seed dataset
pub fn build_seed(config: &SeedConfig, hasher: &dyn CredentialHasher) -> AppResult<Dataset> {
    let admin = User {
        id: ADMIN_USER_ID.to_string(),
        username: config.admin.username.clone(),
        email: config.admin.email.clone(),
        name: config.admin.name.clone(),
        role: Role::Admin,
        password_hash: hasher.hash(&config.admin.password)?,
        account_code: codes::account_code(|_| false),
        notifications: vec![],
        unlocked_item_ids: vec![],
    };

    Ok(Dataset {
        users: vec![admin],
        items: seed_items(),
        orders: vec![],
        settings: config.settings.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Argon2Hasher;
    use std::collections::HashSet;

    #[test]
    fn test_seed_items_cover_cross_product() {
        let items = seed_items();
        assert_eq!(items.len(), 120);
        assert_eq!(items[0].id, "1");
        assert_eq!(items[119].id, "120");

        let ids: HashSet<_> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids.len(), items.len());

        for category in CATEGORIES {
            for (key, _) in SUBSECTIONS {
                let count = items
                    .iter()
                    .filter(|i| i.category == category && i.sub == key)
                    .count();
                assert_eq!(count, ITEMS_PER_SUBSECTION);
            }
        }
    }

    #[test]
    fn test_seed_item_shape() {
        let items = seed_items();
        let first = &items[0];
        assert_eq!(first.sub, "lythuyet");
        assert_eq!(first.sub_name, "Lý thuyết");
        assert_eq!(first.title, "Lý thuyết 1 – y học thể dục thể thao");
        assert!(first.file_path.is_none());

        for item in &items {
            assert!((10_000..=100_000).contains(&item.price));
            assert_eq!(item.price % 10_000, 0);
        }
    }

    #[test]
    fn test_build_seed_admin() {
        let hasher = Argon2Hasher;
        let dataset = build_seed(&SeedConfig::default(), &hasher).unwrap();

        assert_eq!(dataset.users.len(), 1);
        let admin = &dataset.users[0];
        assert_eq!(admin.id, ADMIN_USER_ID);
        assert!(admin.is_admin());
        assert!(admin.account_code.starts_with("AC-"));
        assert!(hasher.verify("change-me-admin", &admin.password_hash));
        assert!(dataset.orders.is_empty());
    }
}
