//! GraphQL object types for the four records
//!
//! Scalar fields read straight from the wrapped record. Relational fields
//! call into `crate::relations` with the `Stores` found in the schema data,
//! so they are evaluated lazily, once per occurrence in the selection.

use async_graphql::{Context, ID, Object, Result};

use super::StoreResultExt;
use crate::core::Stores;
use crate::entities::{Category, Order, Product, User};
use crate::relations;

pub struct ProductObject(pub Product);

#[Object(name = "Product")]
impl ProductObject {
    async fn id(&self) -> ID {
        self.0.id.clone().into()
    }

    async fn name(&self) -> &str {
        &self.0.name
    }

    async fn price(&self) -> f64 {
        self.0.price
    }

    async fn description(&self) -> Option<&str> {
        self.0.description.as_deref()
    }

    async fn stock(&self) -> i32 {
        self.0.stock
    }

    /// Null when the product has no category or the category is gone
    async fn category(&self, ctx: &Context<'_>) -> Result<Option<CategoryObject>> {
        let stores = ctx.data::<Stores>()?;
        let category = relations::product_category(stores, &self.0).await.gql()?;
        Ok(category.map(CategoryObject))
    }
}

pub struct CategoryObject(pub Category);

#[Object(name = "Category")]
impl CategoryObject {
    async fn id(&self) -> ID {
        self.0.id.clone().into()
    }

    async fn name(&self) -> &str {
        &self.0.name
    }

    async fn description(&self) -> Option<&str> {
        self.0.description.as_deref()
    }

    async fn products(&self, ctx: &Context<'_>) -> Result<Vec<ProductObject>> {
        let stores = ctx.data::<Stores>()?;
        let products = relations::category_products(stores, &self.0).await.gql()?;
        Ok(products.into_iter().map(ProductObject).collect())
    }
}

pub struct UserObject(pub User);

#[Object(name = "User")]
impl UserObject {
    async fn id(&self) -> ID {
        self.0.id.clone().into()
    }

    async fn name(&self) -> &str {
        &self.0.name
    }

    async fn email(&self) -> &str {
        &self.0.email
    }

    async fn orders(&self, ctx: &Context<'_>) -> Result<Vec<OrderObject>> {
        let stores = ctx.data::<Stores>()?;
        let orders = relations::user_orders(stores, &self.0).await.gql()?;
        Ok(orders.into_iter().map(OrderObject).collect())
    }
}

pub struct OrderObject(pub Order);

#[Object(name = "Order")]
impl OrderObject {
    async fn id(&self) -> ID {
        self.0.id.clone().into()
    }

    /// The user who placed the order, or null if that user no longer exists
    #[graphql(name = "userId")]
    async fn user(&self, ctx: &Context<'_>) -> Result<Option<UserObject>> {
        let stores = ctx.data::<Stores>()?;
        let user = relations::order_user(stores, &self.0).await.gql()?;
        Ok(user.map(UserObject))
    }

    /// Stored product ids, including ids of products that no longer exist
    async fn product_ids(&self) -> Vec<ID> {
        self.0.product_ids.iter().cloned().map(ID::from).collect()
    }

    /// Products that still exist, in `productIds` order
    async fn products(&self, ctx: &Context<'_>) -> Result<Vec<ProductObject>> {
        let stores = ctx.data::<Stores>()?;
        let products = relations::order_products(stores, &self.0).await.gql()?;
        Ok(products.into_iter().map(ProductObject).collect())
    }

    /// RFC 3339 creation timestamp
    async fn created_at(&self) -> String {
        self.0.created_at.to_rfc3339()
    }
}
