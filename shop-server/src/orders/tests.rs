use std::sync::Arc;

use shared::models::{OrderStatus, Role, User};
use shared::ErrorCode;

use super::lifecycle::{self, LifecycleError, OrderLifecycle};
use crate::auth::Argon2Hasher;
use crate::store::seed::{ADMIN_USER_ID, seed_items};
use crate::store::{Dataset, SeedConfig, Store};
use crate::services::codes::ACTIVATION_CODE_LEN;
use crate::utils::AppError;

fn test_user(id: &str) -> User {
    User {
        id: id.to_string(),
        username: id.to_string(),
        email: format!("{}@x.com", id),
        name: id.to_uppercase(),
        role: Role::User,
        password_hash: "hash".to_string(),
        account_code: format!("AC-{}", id.to_uppercase()),
        notifications: vec![],
        unlocked_item_ids: vec![],
    }
}

fn dataset() -> Dataset {
    Dataset {
        users: vec![test_user("alice"), test_user("bob")],
        items: seed_items(),
        orders: vec![],
        settings: SeedConfig::default().settings,
    }
}

/// Create + report + approve, returning (order id, code)
fn approved_order(ds: &mut Dataset, user_id: &str, item_id: &str) -> (String, String) {
    let order = lifecycle::create(ds, user_id, item_id).unwrap();
    lifecycle::report(ds, &order.id, user_id).unwrap();
    let code = lifecycle::approve(ds, &order.id).unwrap();
    (order.id, code)
}

// ========================================================================
// Create / Report
// ========================================================================

#[test]
fn test_create_snapshots_price() {
    let mut ds = dataset();
    let price = ds.item("7").unwrap().price;

    let order = lifecycle::create(&mut ds, "alice", "7").unwrap();
    assert_eq!(order.status, OrderStatus::New);
    assert_eq!(order.price, price);
    assert!(!order.seen_by_admin);
    assert!(order.activation_code.is_none());

    // later price edits do not touch the order
    ds.items.iter_mut().find(|i| i.id == "7").unwrap().price = price + 1;
    assert_eq!(ds.order(&order.id).unwrap().price, price);
}

#[test]
fn test_create_unknown_item() {
    let mut ds = dataset();
    let err = lifecycle::create(&mut ds, "alice", "nope").unwrap_err();
    assert_eq!(err, LifecycleError::ItemNotFound("nope".to_string()));
    assert!(ds.orders.is_empty());
}

#[test]
fn test_create_unknown_user() {
    let mut ds = dataset();
    let err = lifecycle::create(&mut ds, "ghost", "1").unwrap_err();
    assert_eq!(err, LifecycleError::UserNotFound("ghost".to_string()));
    assert!(ds.orders.is_empty());
    assert_eq!(AppError::from(err).code, ErrorCode::UserNotFound);
}

#[test]
fn test_report_is_owner_scoped() {
    let mut ds = dataset();
    let order = lifecycle::create(&mut ds, "alice", "1").unwrap();

    let err = lifecycle::report(&mut ds, &order.id, "bob").unwrap_err();
    assert!(matches!(err, LifecycleError::OrderNotFound(_)));
    assert_eq!(ds.order(&order.id).unwrap().status, OrderStatus::New);
}

#[test]
fn test_report_twice_is_idempotent_and_reraises_badge() {
    let mut ds = dataset();
    let order = lifecycle::create(&mut ds, "alice", "1").unwrap();

    lifecycle::report(&mut ds, &order.id, "alice").unwrap();
    lifecycle::list_pending(&mut ds);
    assert_eq!(lifecycle::pending_count(&ds), 0);

    let again = lifecycle::report(&mut ds, &order.id, "alice").unwrap();
    assert_eq!(again.status, OrderStatus::Reported);
    assert!(!again.seen_by_admin);
    assert_eq!(lifecycle::pending_count(&ds), 1);
}

#[test]
fn test_report_after_approval_is_rejected() {
    let mut ds = dataset();
    let (order_id, _) = approved_order(&mut ds, "alice", "1");

    let err = lifecycle::report(&mut ds, &order_id, "alice").unwrap_err();
    assert!(matches!(err, LifecycleError::AlreadyApproved(_)));
    assert_eq!(ds.order(&order_id).unwrap().status, OrderStatus::Approved);
}

// ========================================================================
// Pending view
// ========================================================================

#[test]
fn test_list_pending_sorted_and_marks_seen() {
    let mut ds = dataset();
    let first = lifecycle::create(&mut ds, "alice", "1").unwrap();
    let second = lifecycle::create(&mut ds, "bob", "2").unwrap();
    let unreported = lifecycle::create(&mut ds, "bob", "3").unwrap();

    lifecycle::report(&mut ds, &first.id, "alice").unwrap();
    lifecycle::report(&mut ds, &second.id, "bob").unwrap();
    ds.order_mut(&first.id).unwrap().reported_at = Some(1_000);
    ds.order_mut(&second.id).unwrap().reported_at = Some(2_000);
    assert_eq!(lifecycle::pending_count(&ds), 2);

    let pending = lifecycle::list_pending(&mut ds);
    assert_eq!(pending.len(), 2);
    assert_eq!(pending[0].order.id, second.id);
    assert_eq!(pending[1].order.id, first.id);
    assert!(pending.iter().all(|p| p.order.seen_by_admin));
    assert!(pending.iter().all(|p| p.order.id != unreported.id));

    let owner = pending[0].user.as_ref().unwrap();
    assert_eq!(owner.id, "bob");
    assert_eq!(pending[0].item.as_ref().unwrap().id, "2");

    assert_eq!(lifecycle::pending_count(&ds), 0);
}

#[test]
fn test_acknowledge_pending() {
    let mut ds = dataset();
    let a = lifecycle::create(&mut ds, "alice", "1").unwrap();
    let b = lifecycle::create(&mut ds, "alice", "2").unwrap();
    lifecycle::report(&mut ds, &a.id, "alice").unwrap();
    lifecycle::report(&mut ds, &b.id, "alice").unwrap();

    let flipped =
        lifecycle::acknowledge_pending(&mut ds, &[a.id.clone(), "missing".to_string()]);
    assert_eq!(flipped, 1);
    assert_eq!(lifecycle::pending_count(&ds), 1);

    // already seen
    assert_eq!(lifecycle::acknowledge_pending(&mut ds, &[a.id.clone()]), 0);
}

// ========================================================================
// Approve
// ========================================================================

#[test]
fn test_approve_issues_code_and_notifies_owner() {
    let mut ds = dataset();
    let (order_id, code) = approved_order(&mut ds, "alice", "1");

    assert_eq!(code.len(), ACTIVATION_CODE_LEN);
    let order = ds.order(&order_id).unwrap();
    assert_eq!(order.status, OrderStatus::Approved);
    assert_eq!(order.activation_code.as_deref(), Some(code.as_str()));
    assert!(order.approved_at.is_some());
    assert!(order.seen_by_admin);

    let alice = ds.user("alice").unwrap();
    assert_eq!(alice.notifications.len(), 1);
    let note = &alice.notifications[0];
    assert!(!note.read);
    assert_eq!(
        note.message,
        format!(
            "Order {} has been approved. Activation code: {}",
            &order_id[..8],
            code
        )
    );
    assert!(ds.user("bob").unwrap().notifications.is_empty());
}

#[test]
fn test_approve_requires_reported() {
    let mut ds = dataset();
    let order = lifecycle::create(&mut ds, "alice", "1").unwrap();

    let err = lifecycle::approve(&mut ds, &order.id).unwrap_err();
    assert!(matches!(err, LifecycleError::NotReported(_)));
    assert_eq!(ds.order(&order.id).unwrap().status, OrderStatus::New);
    assert!(ds.user("alice").unwrap().notifications.is_empty());
}

#[test]
fn test_approve_twice_is_rejected() {
    let mut ds = dataset();
    let (order_id, code) = approved_order(&mut ds, "alice", "1");

    let err = lifecycle::approve(&mut ds, &order_id).unwrap_err();
    assert!(matches!(err, LifecycleError::AlreadyApproved(_)));
    assert_eq!(
        ds.order(&order_id).unwrap().activation_code.as_deref(),
        Some(code.as_str())
    );
    assert_eq!(ds.user("alice").unwrap().notifications.len(), 1);
}

#[test]
fn test_approve_unknown_order() {
    let mut ds = dataset();
    let err = lifecycle::approve(&mut ds, "ghost").unwrap_err();
    assert_eq!(err, LifecycleError::OrderNotFound("ghost".to_string()));
}

// ========================================================================
// Activate
// ========================================================================

#[test]
fn test_activate_exactly_once() {
    let mut ds = dataset();
    let (_, code) = approved_order(&mut ds, "alice", "5");

    let item_id = lifecycle::activate(&mut ds, &code, "alice").unwrap();
    assert_eq!(item_id, "5");
    assert_eq!(ds.user("alice").unwrap().unlocked_item_ids, vec!["5".to_string()]);

    let err = lifecycle::activate(&mut ds, &code, "alice").unwrap_err();
    assert_eq!(err, LifecycleError::CodeUsed);
}

#[test]
fn test_activate_is_owner_scoped() {
    let mut ds = dataset();
    let (order_id, code) = approved_order(&mut ds, "alice", "5");

    let err = lifecycle::activate(&mut ds, &code, "bob").unwrap_err();
    assert_eq!(err, LifecycleError::InvalidCode);
    assert!(!ds.order(&order_id).unwrap().activation_used);
    assert!(ds.user("bob").unwrap().unlocked_item_ids.is_empty());
}

#[test]
fn test_activate_unknown_code() {
    let mut ds = dataset();
    approved_order(&mut ds, "alice", "5");
    let err = lifecycle::activate(&mut ds, "NOPE", "alice").unwrap_err();
    assert_eq!(err, LifecycleError::InvalidCode);
}

#[test]
fn test_activate_requires_approved_status() {
    let mut ds = dataset();
    let order = lifecycle::create(&mut ds, "alice", "5").unwrap();
    lifecycle::report(&mut ds, &order.id, "alice").unwrap();
    // a code on a not-yet-approved order can only come from a hand-edited file
    ds.order_mut(&order.id).unwrap().activation_code = Some("ABCDEFGHJKLM".to_string());

    let err = lifecycle::activate(&mut ds, "ABCDEFGHJKLM", "alice").unwrap_err();
    assert!(matches!(err, LifecycleError::NotApproved(_)));
    assert!(ds.user("alice").unwrap().unlocked_item_ids.is_empty());
}

#[test]
fn test_two_orders_for_same_item_unlock_once() {
    let mut ds = dataset();
    let (_, first) = approved_order(&mut ds, "alice", "9");
    let (_, second) = approved_order(&mut ds, "alice", "9");
    assert_ne!(first, second);

    lifecycle::activate(&mut ds, &first, "alice").unwrap();
    lifecycle::activate(&mut ds, &second, "alice").unwrap();
    assert_eq!(ds.user("alice").unwrap().unlocked_item_ids, vec!["9".to_string()]);
}

#[test]
fn test_orders_for_user() {
    let mut ds = dataset();
    lifecycle::create(&mut ds, "alice", "1").unwrap();
    lifecycle::create(&mut ds, "alice", "2").unwrap();
    lifecycle::create(&mut ds, "bob", "3").unwrap();

    let mine = lifecycle::orders_for_user(&ds, "alice");
    assert_eq!(mine.len(), 2);
    assert!(mine.iter().all(|o| o.order.user_id == "alice"));
    assert_eq!(mine[0].item.as_ref().unwrap().id, "1");
}

#[test]
fn test_error_codes() {

    let cases = [
        (LifecycleError::InvalidCode, ErrorCode::ActivationCodeInvalid),
        (LifecycleError::CodeUsed, ErrorCode::ActivationCodeUsed),
        (LifecycleError::NotApproved("o".into()), ErrorCode::OrderNotApproved),
        (LifecycleError::NotReported("o".into()), ErrorCode::OrderNotReported),
        (LifecycleError::AlreadyApproved("o".into()), ErrorCode::OrderAlreadyApproved),
        (LifecycleError::OrderNotFound("o".into()), ErrorCode::OrderNotFound),
        (LifecycleError::ItemNotFound("i".into()), ErrorCode::ItemNotFound),
    ];
    for (err, code) in cases {
        assert_eq!(AppError::from(err).code, code);
    }
}

// ========================================================================
// Store-backed flow
// ========================================================================

#[tokio::test]
async fn test_full_flow_through_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(Store::new(
        dir.path().join("db.json"),
        SeedConfig::default(),
        Arc::new(Argon2Hasher),
    ));
    store
        .mutate(|ds| {
            ds.users.push(test_user("alice"));
            Ok(())
        })
        .await
        .unwrap();

    let engine = OrderLifecycle::new(store.clone());
    let order = engine.create("alice", "12").await.unwrap();
    engine.report(&order.id, "alice").await.unwrap();
    assert_eq!(engine.pending_count().await.unwrap(), 1);

    let pending = engine.list_pending().await.unwrap();
    assert_eq!(pending.len(), 1);
    assert!(pending[0].order.seen_by_admin);
    assert_eq!(engine.pending_count().await.unwrap(), 0);

    let code = engine.approve(&order.id).await.unwrap();
    assert_eq!(code.len(), ACTIVATION_CODE_LEN);

    let err = engine.activate(&code, ADMIN_USER_ID).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ActivationCodeInvalid);

    assert_eq!(engine.activate(&code, "alice").await.unwrap(), "12");
    let err = engine.activate(&code, "alice").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ActivationCodeUsed);

    let dataset = store.load().await.unwrap();
    let alice = dataset.user("alice").unwrap();
    assert_eq!(alice.unlocked_item_ids, vec!["12".to_string()]);
    assert_eq!(alice.notifications.len(), 1);

    let mine = engine.orders_for_user("alice").await.unwrap();
    assert!(mine[0].order.activation_used);
}

#[tokio::test]
async fn test_concurrent_activations_unlock_once() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(Store::new(
        dir.path().join("db.json"),
        SeedConfig::default(),
        Arc::new(Argon2Hasher),
    ));
    let code = store
        .mutate(|ds| {
            ds.users.push(test_user("alice"));
            Ok(approved_order(ds, "alice", "3").1)
        })
        .await
        .unwrap();

    let engine = OrderLifecycle::new(store.clone());
    let mut handles = Vec::new();
    for _ in 0..8 {
        let engine = engine.clone();
        let code = code.clone();
        handles.push(tokio::spawn(async move { engine.activate(&code, "alice").await }));
    }

    let mut successes = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => successes += 1,
            Err(e) => assert_eq!(e.code, ErrorCode::ActivationCodeUsed),
        }
    }
    assert_eq!(successes, 1);

    let dataset = store.load().await.unwrap();
    assert_eq!(dataset.user("alice").unwrap().unlocked_item_ids.len(), 1);
}
