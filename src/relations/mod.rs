//! Reference resolution across collections
//!
//! Each function computes one relational field from its parent record and
//! the store handles. Nothing is cached: every call goes back to the stores,
//! so a relation always reflects the collections at resolution time.
//!
//! References are soft. A missing or dangling id degrades the field to
//! `None` or an empty list; only a failing store yields `Err`.
//!
//! | Parent   | Field      | Lookup                                          |
//! |----------|------------|-------------------------------------------------|
//! | Product  | `category` | `categories.find_by_id(category_id)`            |
//! | Category | `products` | `products.find_by_field("categoryId", id)`      |
//! | User     | `orders`   | `orders.find_by_field("userId", id)`            |
//! | Order    | `userId`   | `users.find_by_id(user_id)`                     |
//! | Order    | `products` | one `products.find_by_ids(product_ids)` call    |
//!
//! Only `Order.products` is batched. The other relations are looked up once
//! per parent, so listing N products with their categories costs N category
//! lookups.

use crate::core::{FieldValue, RecordId, StoreResult, Stores};
use crate::entities::{Category, Order, Product, User};
use std::collections::{HashMap, HashSet};

/// `Product.category`
pub async fn product_category(stores: &Stores, product: &Product) -> StoreResult<Option<Category>> {
    let Some(category_id) = product.category_id.as_ref() else {
        return Ok(None);
    };

    let category = stores.categories.find_by_id(category_id).await?;
    if category.is_none() {
        tracing::warn!(
            product = %product.id,
            category = %category_id,
            "dangling category reference"
        );
    }

    Ok(category)
}

/// `Category.products`
pub async fn category_products(stores: &Stores, category: &Category) -> StoreResult<Vec<Product>> {
    tracing::debug!(category = %category.id, "resolving category products");
    stores
        .products
        .find_by_field(Product::CATEGORY_ID, &FieldValue::Id(category.id.clone()))
        .await
}

/// `User.orders`
pub async fn user_orders(stores: &Stores, user: &User) -> StoreResult<Vec<Order>> {
    tracing::debug!(user = %user.id, "resolving user orders");
    stores
        .orders
        .find_by_field(Order::USER_ID, &FieldValue::Id(user.id.clone()))
        .await
}

/// `Order.userId`
pub async fn order_user(stores: &Stores, order: &Order) -> StoreResult<Option<User>> {
    let user = stores.users.find_by_id(&order.user_id).await?;
    if user.is_none() {
        tracing::warn!(order = %order.id, user = %order.user_id, "dangling user reference");
    }

    Ok(user)
}

/// `Order.products`
///
/// The products whose id is a member of `product_ids`, each at most once,
/// in the order of first appearance. Stale ids are dropped.
pub async fn order_products(stores: &Stores, order: &Order) -> StoreResult<Vec<Product>> {
    if order.product_ids.is_empty() {
        return Ok(Vec::new());
    }

    let found = stores.products.find_by_ids(&order.product_ids).await?;
    let mut by_id: HashMap<RecordId, Product> =
        found.into_iter().map(|p| (p.id.clone(), p)).collect();

    let mut seen = HashSet::new();
    let mut stale = 0usize;
    let mut products = Vec::with_capacity(by_id.len());
    for id in order.product_ids.iter().filter(|id| seen.insert(*id)) {
        match by_id.remove(id) {
            Some(product) => products.push(product),
            None => stale += 1,
        }
    }

    if stale > 0 {
        tracing::warn!(order = %order.id, stale, "order references missing products");
    }

    Ok(products)
}
