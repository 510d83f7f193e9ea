//! Shared test harness for store backend testing
//!
//! `entity_store_tests!` generates a test module that validates a `Stores`
//! bundle against the `EntityStore` contract: CRUD, presence-aware update,
//! idempotent delete, batched and field lookups, and concurrent access.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//!
//! entity_store_tests!(Stores::in_memory());
//! ```

#![allow(dead_code)]

use storefront::prelude::*;

pub fn new_product(name: &str, price: f64, stock: i32, category_id: Option<&RecordId>) -> NewProduct {
    NewProduct {
        name: name.to_string(),
        price,
        description: None,
        stock,
        category_id: category_id.cloned(),
    }
}

pub fn new_category(name: &str) -> NewCategory {
    NewCategory {
        name: name.to_string(),
        description: None,
    }
}

pub fn new_user(name: &str) -> NewUser {
    NewUser {
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
    }
}

pub fn new_order(user_id: &RecordId, product_ids: &[&RecordId]) -> NewOrder {
    NewOrder {
        user_id: user_id.clone(),
        product_ids: product_ids.iter().map(|id| (*id).clone()).collect(),
    }
}

/// Generate a full `EntityStore` conformance test suite.
///
/// `$factory` must evaluate to a fresh `Stores`; it is re-evaluated for each
/// test so that tests never share records.
#[macro_export]
macro_rules! entity_store_tests {
    ($factory:expr) => {
        mod entity_store_contract_tests {
            use super::*;
            use storefront::prelude::*;

            // ==================================================================
            // CRUD
            // ==================================================================

            #[tokio::test]
            async fn test_create_and_find_by_id() {
                let stores = $factory;
                let created = stores
                    .products
                    .create(new_product("Pen", 1.5, 10, Some(&RecordId::from("C1"))))
                    .await
                    .unwrap();

                let found = stores.products.find_by_id(&created.id).await.unwrap().unwrap();
                assert_eq!(found.name, "Pen");
                assert_eq!(found.price, 1.5);
                assert_eq!(found.stock, 10);
                assert_eq!(found.description, None);
                assert_eq!(found.category_id, Some(RecordId::from("C1")));
            }

            #[tokio::test]
            async fn test_find_by_id_missing() {
                let stores = $factory;
                let found = stores.users.find_by_id(&RecordId::generate()).await.unwrap();
                assert!(found.is_none());
            }

            #[tokio::test]
            async fn test_find_all() {
                let stores = $factory;
                assert!(stores.categories.find_all().await.unwrap().is_empty());

                for name in ["Office", "Garden", "Kitchen"] {
                    stores.categories.create(new_category(name)).await.unwrap();
                }

                let mut names: Vec<_> = stores
                    .categories
                    .find_all()
                    .await
                    .unwrap()
                    .into_iter()
                    .map(|c| c.name)
                    .collect();
                names.sort();
                assert_eq!(names, ["Garden", "Kitchen", "Office"]);
            }

            #[tokio::test]
            async fn test_order_round_trip_keeps_created_at() {
                let stores = $factory;
                let user = stores.users.create(new_user("Alice")).await.unwrap();
                let created = stores
                    .orders
                    .create(new_order(&user.id, &[&RecordId::from("P1"), &RecordId::from("P2")]))
                    .await
                    .unwrap();

                let found = stores.orders.find_by_id(&created.id).await.unwrap().unwrap();
                assert_eq!(found.user_id, user.id);
                assert_eq!(found.product_ids, created.product_ids);
                assert_eq!(
                    found.created_at.timestamp_millis(),
                    created.created_at.timestamp_millis()
                );
            }

            // ==================================================================
            // Update
            // ==================================================================

            #[tokio::test]
            async fn test_update_merges_present_fields_only() {
                let stores = $factory;
                let pen = stores
                    .products
                    .create(new_product("Pen", 1.5, 10, None))
                    .await
                    .unwrap();

                let patch = ProductPatch {
                    price: Patch::Set(2.0),
                    ..Default::default()
                };
                let updated = stores.products.update(&pen.id, patch).await.unwrap().unwrap();

                assert_eq!(updated.name, "Pen");
                assert_eq!(updated.price, 2.0);
                assert_eq!(updated.stock, 10);

                let stored = stores.products.find_by_id(&pen.id).await.unwrap().unwrap();
                assert_eq!(stored, updated);
            }

            #[tokio::test]
            async fn test_update_clears_optional_field() {
                let stores = $factory;
                let pen = stores
                    .products
                    .create(new_product("Pen", 1.5, 10, Some(&RecordId::from("C1"))))
                    .await
                    .unwrap();

                let patch = ProductPatch {
                    category_id: Patch::Set(None),
                    ..Default::default()
                };
                let updated = stores.products.update(&pen.id, patch).await.unwrap().unwrap();
                assert_eq!(updated.category_id, None);
                assert_eq!(updated.name, "Pen");
            }

            #[tokio::test]
            async fn test_empty_update_returns_record_unchanged() {
                let stores = $factory;
                let pen = stores
                    .products
                    .create(new_product("Pen", 1.5, 10, None))
                    .await
                    .unwrap();

                let updated = stores
                    .products
                    .update(&pen.id, ProductPatch::default())
                    .await
                    .unwrap();
                assert_eq!(updated, Some(pen));
            }

            #[tokio::test]
            async fn test_update_missing_returns_none() {
                let stores = $factory;
                let patch = ProductPatch {
                    name: Patch::Set("Ghost".to_string()),
                    ..Default::default()
                };
                let updated = stores.products.update(&RecordId::generate(), patch).await.unwrap();
                assert!(updated.is_none());
            }

            // ==================================================================
            // Delete
            // ==================================================================

            #[tokio::test]
            async fn test_delete_returns_record_then_none() {
                let stores = $factory;
                let pen = stores
                    .products
                    .create(new_product("Pen", 1.5, 10, None))
                    .await
                    .unwrap();

                let deleted = stores.products.delete(&pen.id).await.unwrap();
                assert_eq!(deleted, Some(pen.clone()));

                assert!(stores.products.delete(&pen.id).await.unwrap().is_none());
                assert!(stores.products.find_by_id(&pen.id).await.unwrap().is_none());
            }

            // ==================================================================
            // Lookups
            // ==================================================================

            #[tokio::test]
            async fn test_find_by_ids_skips_stale_ids() {
                let stores = $factory;
                let pen = stores.products.create(new_product("Pen", 1.5, 10, None)).await.unwrap();
                let ink = stores.products.create(new_product("Ink", 3.0, 5, None)).await.unwrap();

                let mut names: Vec<_> = stores
                    .products
                    .find_by_ids(&[ink.id.clone(), RecordId::generate(), pen.id.clone()])
                    .await
                    .unwrap()
                    .into_iter()
                    .map(|p| p.name)
                    .collect();
                names.sort();
                assert_eq!(names, ["Ink", "Pen"]);

                assert!(stores.products.find_by_ids(&[]).await.unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_find_by_field_on_references() {
                let stores = $factory;
                let alice = stores.users.create(new_user("Alice")).await.unwrap();
                let bob = stores.users.create(new_user("Bob")).await.unwrap();
                stores.orders.create(new_order(&alice.id, &[])).await.unwrap();
                stores.orders.create(new_order(&alice.id, &[])).await.unwrap();
                stores.orders.create(new_order(&bob.id, &[])).await.unwrap();

                let orders = stores
                    .orders
                    .find_by_field(Order::USER_ID, &FieldValue::Id(alice.id.clone()))
                    .await
                    .unwrap();
                assert_eq!(orders.len(), 2);
                assert!(orders.iter().all(|o| o.user_id == alice.id));

                let none = stores
                    .orders
                    .find_by_field(Order::USER_ID, &FieldValue::Id(RecordId::generate()))
                    .await
                    .unwrap();
                assert!(none.is_empty());
            }

            // ==================================================================
            // Concurrency
            // ==================================================================

            #[tokio::test]
            async fn test_concurrent_access() {
                let stores = $factory;
                let mut handles = Vec::new();

                for i in 0..10 {
                    let stores = stores.clone();
                    handles.push(tokio::spawn(async move {
                        stores
                            .products
                            .create(new_product(&format!("Product {}", i), 1.0, i, None))
                            .await
                            .unwrap()
                    }));
                }

                for handle in handles {
                    handle.await.unwrap();
                }

                assert_eq!(stores.products.find_all().await.unwrap().len(), 10);
            }
        }
    };
}
