//! GraphQL API exposure
//!
//! `async-graphql` is the execution engine: it parses operations, checks
//! required arguments against the schema, and walks the selection tree,
//! calling the query/mutation roots and then the relational field resolvers
//! of `objects`. Sibling fields of a query are resolved concurrently;
//! mutation fields run in order.

mod mutation;
mod objects;
mod query;
mod validation;

pub use mutation::MutationRoot;
pub use objects::{CategoryObject, OrderObject, ProductObject, UserObject};
pub use query::QueryRoot;
pub use validation::RequiredArguments;

use crate::core::error::{STORE_UNAVAILABLE, VALIDATION_ERROR};
use crate::core::{StorefrontError, Stores};
use crate::server::host::ServerHost;
use async_graphql::http::{GraphQLPlaygroundConfig, playground_source};
use async_graphql::{EmptySubscription, ErrorExtensions, Request, Response, Schema, ServerError};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::extract::Extension;
use axum::response::{Html, IntoResponse};
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;

pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the schema with the given stores as resolver context
pub fn build_schema(stores: Stores) -> AppSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(stores)
        .extension(RequiredArguments)
        .finish()
}

/// Execute one operation.
///
/// Record-level absence already comes back as null. Any error that ends the
/// operation (an unavailable store, rejected input) replaces the whole
/// response with that single error and no data.
pub async fn execute(schema: &AppSchema, request: impl Into<Request>) -> Response {
    let response = schema.execute(request).await;

    match response.errors.iter().find(|e| is_operation_error(e)) {
        Some(error) => {
            tracing::error!(message = %error.message, "operation failed");
            Response::from_errors(vec![error.clone()])
        }
        None => response,
    }
}

fn is_operation_error(error: &ServerError) -> bool {
    error
        .extensions
        .as_ref()
        .and_then(|ext| ext.get("code"))
        .is_some_and(|code| match code {
            async_graphql::Value::String(code) => {
                code == STORE_UNAVAILABLE || code == VALIDATION_ERROR
            }
            _ => false,
        })
}

/// Map a store result into a GraphQL result carrying an error code
pub(crate) trait StoreResultExt<T> {
    fn gql(self) -> async_graphql::Result<T>;
}

impl<T, E: Into<StorefrontError>> StoreResultExt<T> for Result<T, E> {
    fn gql(self) -> async_graphql::Result<T> {
        self.map_err(|e| {
            let err: StorefrontError = e.into();
            err.extend()
        })
    }
}

/// GraphQL API exposure implementation
pub struct GraphQLExposure;

impl GraphQLExposure {
    /// Build the GraphQL router from a host
    ///
    /// Routes, relative to the configured path (default `/graphql`):
    /// - `POST {path}` - queries and mutations
    /// - `GET {path}/schema` - SDL export
    /// - `GET {path}/playground` - GraphQL playground, when enabled
    pub fn build_router(host: Arc<ServerHost>) -> Router {
        let path = host.config.graphql.path.clone();

        let mut router = Router::new()
            .route(&path, post(graphql_handler))
            .route(&format!("{}/schema", path), get(graphql_sdl));

        if host.config.graphql.playground {
            router = router.route(&format!("{}/playground", path), get(graphql_playground));
        }

        router.layer(Extension(host))
    }
}

async fn graphql_handler(
    Extension(host): Extension<Arc<ServerHost>>,
    request: GraphQLRequest,
) -> GraphQLResponse {
    execute(&host.schema, request.into_inner()).await.into()
}

async fn graphql_playground(Extension(host): Extension<Arc<ServerHost>>) -> impl IntoResponse {
    Html(playground_source(GraphQLPlaygroundConfig::new(
        &host.config.graphql.path,
    )))
}

async fn graphql_sdl(Extension(host): Extension<Arc<ServerHost>>) -> impl IntoResponse {
    (
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; charset=utf-8",
        )],
        host.schema.sdl(),
    )
}
