//! Query root: list and get-by-id for every record type

use async_graphql::{Context, ID, Object, Result};

use super::StoreResultExt;
use super::objects::{CategoryObject, OrderObject, ProductObject, UserObject};
use crate::core::{RecordId, Stores};

#[derive(Default)]
pub struct QueryRoot;

#[Object]
impl QueryRoot {
    async fn products(&self, ctx: &Context<'_>) -> Result<Vec<ProductObject>> {
        let stores = ctx.data::<Stores>()?;
        let products = stores.products.find_all().await.gql()?;
        Ok(products.into_iter().map(ProductObject).collect())
    }

    async fn product(&self, ctx: &Context<'_>, id: ID) -> Result<Option<ProductObject>> {
        let stores = ctx.data::<Stores>()?;
        let product = stores.products.find_by_id(&RecordId::from(id)).await.gql()?;
        Ok(product.map(ProductObject))
    }

    async fn categories(&self, ctx: &Context<'_>) -> Result<Vec<CategoryObject>> {
        let stores = ctx.data::<Stores>()?;
        let categories = stores.categories.find_all().await.gql()?;
        Ok(categories.into_iter().map(CategoryObject).collect())
    }

    async fn category(&self, ctx: &Context<'_>, id: ID) -> Result<Option<CategoryObject>> {
        let stores = ctx.data::<Stores>()?;
        let category = stores.categories.find_by_id(&RecordId::from(id)).await.gql()?;
        Ok(category.map(CategoryObject))
    }

    async fn users(&self, ctx: &Context<'_>) -> Result<Vec<UserObject>> {
        let stores = ctx.data::<Stores>()?;
        let users = stores.users.find_all().await.gql()?;
        Ok(users.into_iter().map(UserObject).collect())
    }

    async fn user(&self, ctx: &Context<'_>, id: ID) -> Result<Option<UserObject>> {
        let stores = ctx.data::<Stores>()?;
        let user = stores.users.find_by_id(&RecordId::from(id)).await.gql()?;
        Ok(user.map(UserObject))
    }

    async fn orders(&self, ctx: &Context<'_>) -> Result<Vec<OrderObject>> {
        let stores = ctx.data::<Stores>()?;
        let orders = stores.orders.find_all().await.gql()?;
        Ok(orders.into_iter().map(OrderObject).collect())
    }

    async fn order(&self, ctx: &Context<'_>, id: ID) -> Result<Option<OrderObject>> {
        let stores = ctx.data::<Stores>()?;
        let order = stores.orders.find_by_id(&RecordId::from(id)).await.gql()?;
        Ok(order.map(OrderObject))
    }
}
