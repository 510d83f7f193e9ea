//! Storefront server
//!
//! Serves the GraphQL API on the configured address (default port 4000,
//! overridable with `PORT`). Pass a YAML config path as the first argument
//! to use another configuration; set `MONGODB_URI` (with the
//! `mongodb_backend` feature) to use MongoDB instead of in-memory stores.
//!
//! ```sh
//! cargo run --example storefront_server
//! cargo run --example storefront_server --features mongodb_backend -- storefront.yaml
//! ```
//!
//! With in-memory storage a few records are seeded, including a product
//! whose category was never created and an order pointing at a deleted
//! product, to show how dangling references resolve.

use anyhow::Result;
use storefront::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => ServerConfig::from_yaml_file(path)?,
        None => ServerConfig::default(),
    }
    .with_env_overrides()?;

    let mut builder = ServerBuilder::new();
    if config.storage == StorageConfig::InMemory {
        let stores = Stores::in_memory();
        seed(&stores).await?;
        builder = builder.with_stores(stores);
    }

    builder.with_config(config).serve().await
}

async fn seed(stores: &Stores) -> Result<()> {
    let office = stores
        .categories
        .create(NewCategory {
            name: "Office".to_string(),
            description: Some("Desk supplies".to_string()),
        })
        .await?;

    let pen = stores
        .products
        .create(NewProduct {
            name: "Pen".to_string(),
            price: 1.5,
            description: None,
            stock: 10,
            category_id: Some(office.id.clone()),
        })
        .await?;

    stores
        .products
        .create(NewProduct {
            name: "Stapler".to_string(),
            price: 12.0,
            description: Some("Uncategorized until the category exists".to_string()),
            stock: 3,
            category_id: Some(RecordId::from("missing-category")),
        })
        .await?;

    let discontinued = stores
        .products
        .create(NewProduct {
            name: "Fax paper".to_string(),
            price: 4.0,
            description: None,
            stock: 0,
            category_id: Some(office.id.clone()),
        })
        .await?;

    let alice = stores
        .users
        .create(NewUser {
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
        })
        .await?;

    stores
        .orders
        .create(NewOrder {
            user_id: alice.id.clone(),
            product_ids: vec![pen.id.clone(), discontinued.id.clone()],
        })
        .await?;

    stores.products.delete(&discontinued.id).await?;

    tracing::info!("seeded in-memory stores");
    Ok(())
}
