//! Mutation root
//!
//! Creation never checks that referenced ids exist. Product is the only
//! record that can be updated or deleted through this interface.

use async_graphql::{Context, ErrorExtensions, ID, MaybeUndefined, Object, Result};

use super::StoreResultExt;
use super::objects::{CategoryObject, OrderObject, ProductObject, UserObject};
use crate::core::{
    FieldValidationError, Patch, RecordId, Stores, StorefrontError, ValidationError,
};
use crate::entities::{NewCategory, NewOrder, NewProduct, NewUser, ProductPatch};

#[derive(Default)]
pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn add_category(
        &self,
        ctx: &Context<'_>,
        name: String,
        description: Option<String>,
    ) -> Result<CategoryObject> {
        let stores = ctx.data::<Stores>()?;
        let category = stores
            .categories
            .create(NewCategory { name, description })
            .await
            .gql()?;

        tracing::info!(id = %category.id, "category added");
        Ok(CategoryObject(category))
    }

    async fn add_user(&self, ctx: &Context<'_>, name: String, email: String) -> Result<UserObject> {
        let stores = ctx.data::<Stores>()?;
        let user = stores.users.create(NewUser { name, email }).await.gql()?;

        tracing::info!(id = %user.id, "user added");
        Ok(UserObject(user))
    }

    async fn add_product(
        &self,
        ctx: &Context<'_>,
        name: String,
        price: f64,
        description: Option<String>,
        stock: i32,
        category_id: ID,
    ) -> Result<ProductObject> {
        let stores = ctx.data::<Stores>()?;
        let product = stores
            .products
            .create(NewProduct {
                name,
                price,
                description,
                stock,
                category_id: Some(category_id.into()),
            })
            .await
            .gql()?;

        tracing::info!(id = %product.id, "product added");
        Ok(ProductObject(product))
    }

    /// Overwrite only the arguments that were supplied.
    ///
    /// An explicit null clears `description` or `categoryId`. For `name`,
    /// `price` and `stock` it is rejected by `RequiredArguments` before the
    /// operation starts, and again here for schemas built without it.
    #[allow(clippy::too_many_arguments)]
    async fn update_product(
        &self,
        ctx: &Context<'_>,
        id: ID,
        name: MaybeUndefined<String>,
        price: MaybeUndefined<f64>,
        description: MaybeUndefined<String>,
        stock: MaybeUndefined<i32>,
        category_id: MaybeUndefined<ID>,
    ) -> Result<Option<ProductObject>> {
        let patch = product_patch(name, price, description, stock, category_id)
            .map_err(|e| StorefrontError::from(e).extend())?;

        let stores = ctx.data::<Stores>()?;
        let id = RecordId::from(id);
        let product = stores.products.update(&id, patch).await.gql()?;

        match &product {
            Some(_) => tracing::info!(%id, "product updated"),
            None => tracing::debug!(%id, "update of unknown product"),
        }
        Ok(product.map(ProductObject))
    }

    /// Returns the removed product, or null if it did not exist
    async fn delete_product(&self, ctx: &Context<'_>, id: ID) -> Result<Option<ProductObject>> {
        let stores = ctx.data::<Stores>()?;
        let id = RecordId::from(id);
        let product = stores.products.delete(&id).await.gql()?;

        if product.is_some() {
            tracing::info!(%id, "product deleted");
        }
        Ok(product.map(ProductObject))
    }

    async fn add_order(
        &self,
        ctx: &Context<'_>,
        user_id: ID,
        product_ids: Vec<ID>,
    ) -> Result<OrderObject> {
        let stores = ctx.data::<Stores>()?;
        let order = stores
            .orders
            .create(NewOrder {
                user_id: user_id.into(),
                product_ids: product_ids.into_iter().map(RecordId::from).collect(),
            })
            .await
            .gql()?;

        tracing::info!(id = %order.id, "order added");
        Ok(OrderObject(order))
    }
}

/// Turn the tri-state arguments of `updateProduct` into a patch, reporting
/// every required field that was explicitly set to null.
fn product_patch(
    name: MaybeUndefined<String>,
    price: MaybeUndefined<f64>,
    description: MaybeUndefined<String>,
    stock: MaybeUndefined<i32>,
    category_id: MaybeUndefined<ID>,
) -> Result<ProductPatch, ValidationError> {
    let mut errors = Vec::new();
    let name = required(&mut errors, "name", name);
    let price = required(&mut errors, "price", price);
    let stock = required(&mut errors, "stock", stock);

    if !errors.is_empty() {
        return Err(ValidationError::FieldErrors(errors));
    }

    Ok(ProductPatch {
        name,
        price,
        description: Patch::nullable(description),
        stock,
        category_id: Patch::nullable(category_id.map_value(RecordId::from)),
    })
}

fn required<T>(
    errors: &mut Vec<FieldValidationError>,
    field: &str,
    value: MaybeUndefined<T>,
) -> Patch<T> {
    Patch::required(field, value).unwrap_or_else(|e| {
        errors.push(e);
        Patch::Keep
    })
}
