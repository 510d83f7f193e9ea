//! Rejection of explicit nulls on required `updateProduct` arguments
//!
//! The GraphQL types of `name`, `price` and `stock` on `updateProduct` are
//! nullable so that omission can be told apart from a value. An explicit
//! null on one of them is malformed input, and it is caught here, on the
//! parsed document, before the first root field of the operation runs.

use async_graphql::extensions::{Extension, ExtensionContext, ExtensionFactory, NextPrepareRequest};
use async_graphql::parser::Positioned;
use async_graphql::parser::types::{
    ExecutableDocument, OperationDefinition, OperationType, Selection, SelectionSet,
};
use async_graphql::{ErrorExtensions, Name, Pos, Request, ServerResult, Value, Variables};
use std::collections::HashSet;
use std::sync::Arc;

use crate::core::{FieldValidationError, StorefrontError, ValidationError};

/// `updateProduct` arguments that may be omitted but never set to null
pub const NON_NULL_UPDATE_ARGUMENTS: [&str; 3] = ["name", "price", "stock"];

const UPDATE_PRODUCT: &str = "updateProduct";

/// Schema extension running the null check once per request
pub struct RequiredArguments;

impl ExtensionFactory for RequiredArguments {
    fn create(&self) -> Arc<dyn Extension> {
        Arc::new(RequiredArgumentsExtension)
    }
}

struct RequiredArgumentsExtension;

#[async_trait::async_trait]
impl Extension for RequiredArgumentsExtension {
    async fn prepare_request(
        &self,
        ctx: &ExtensionContext<'_>,
        mut request: Request,
        next: NextPrepareRequest<'_>,
    ) -> ServerResult<Request> {
        let rejected = {
            let operation_name = request.operation_name.clone();
            let variables = request.variables.clone();
            match request.parsed_query() {
                Ok(document) => {
                    null_required_arguments(document, operation_name.as_deref(), &variables)
                }
                // Syntax errors are reported by the engine itself.
                Err(_) => None,
            }
        };

        if let Some((pos, errors)) = rejected {
            tracing::debug!(count = errors.len(), "explicit null on required argument");
            let err = StorefrontError::from(ValidationError::FieldErrors(errors));
            return Err(err.extend().into_server_error(pos));
        }

        next.run(ctx, request).await
    }
}

/// Find every required `updateProduct` argument explicitly set to null in
/// the operation that will run, with the position of the first one.
pub fn null_required_arguments(
    document: &ExecutableDocument,
    operation_name: Option<&str>,
    variables: &Variables,
) -> Option<(Pos, Vec<FieldValidationError>)> {
    let operation = select_operation(document, operation_name)?;
    if operation.node.ty != OperationType::Mutation {
        return None;
    }

    let mut scan = Scan {
        document,
        operation: &operation.node,
        variables,
        visited_fragments: HashSet::new(),
        first: None,
        fields: Vec::new(),
    };
    scan.selection_set(&operation.node.selection_set.node);

    let pos = scan.first?;
    let errors = scan
        .fields
        .into_iter()
        .map(|field| FieldValidationError::new(field, "cannot be null"))
        .collect();
    Some((pos, errors))
}

fn select_operation<'a>(
    document: &'a ExecutableDocument,
    operation_name: Option<&str>,
) -> Option<&'a Positioned<OperationDefinition>> {
    let mut operations = document.operations.iter();
    match operation_name {
        Some(wanted) => operations
            .find(|(name, _)| name.is_some_and(|name| name.as_str() == wanted))
            .map(|(_, operation)| operation),
        None => {
            let (_, operation) = operations.next()?;
            // Several operations and no name: the engine rejects the request.
            operations.next().is_none().then_some(operation)
        }
    }
}

struct Scan<'a> {
    document: &'a ExecutableDocument,
    operation: &'a OperationDefinition,
    variables: &'a Variables,
    visited_fragments: HashSet<&'a Name>,
    first: Option<Pos>,
    fields: Vec<&'static str>,
}

impl<'a> Scan<'a> {
    /// Root selections only: `updateProduct` is a field of the mutation root.
    fn selection_set(&mut self, set: &'a SelectionSet) {
        for selection in &set.items {
            match &selection.node {
                Selection::Field(field) => {
                    if field.node.name.node.as_str() != UPDATE_PRODUCT {
                        continue;
                    }
                    for (name, value) in &field.node.arguments {
                        let Some(required) = NON_NULL_UPDATE_ARGUMENTS
                            .into_iter()
                            .find(|required| *required == name.node.as_str())
                        else {
                            continue;
                        };
                        let resolved = value
                            .node
                            .clone()
                            .into_const_with(|variable| self.variable_value(&variable).ok_or(()));
                        if !matches!(resolved, Ok(Value::Null)) {
                            continue;
                        }
                        if self.first.is_none() {
                            self.first = Some(value.pos);
                        }
                        if !self.fields.contains(&required) {
                            self.fields.push(required);
                        }
                    }
                }
                Selection::InlineFragment(fragment) => {
                    self.selection_set(&fragment.node.selection_set.node);
                }
                Selection::FragmentSpread(spread) => {
                    let name = &spread.node.fragment_name.node;
                    if !self.visited_fragments.insert(name) {
                        continue;
                    }
                    if let Some(fragment) = self.document.fragments.get(name) {
                        self.selection_set(&fragment.node.selection_set.node);
                    }
                }
            }
        }
    }

    /// The supplied value of a variable, else its default. An unsupplied
    /// variable without default is left for the engine to report.
    fn variable_value(&self, variable: &Name) -> Option<Value> {
        if let Some(value) = self.variables.get(variable) {
            return Some(value.clone());
        }
        self.operation
            .variable_definitions
            .iter()
            .find(|definition| definition.node.name.node == *variable)
            .and_then(|definition| definition.node.default_value().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_graphql::parser::parse_query;

    fn check(query: &str, variables: serde_json::Value) -> Vec<String> {
        let document = parse_query(query).unwrap();
        null_required_arguments(&document, None, &Variables::from_json(variables))
            .map(|(_, errors)| errors.into_iter().map(|e| e.field).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_literal_nulls_are_reported_once_each() {
        let fields = check(
            r#"mutation {
                a: updateProduct(id: "1", name: null, price: 2.0) { id }
                b: updateProduct(id: "2", stock: null, name: null) { id }
            }"#,
            serde_json::json!({}),
        );
        assert_eq!(fields, ["name", "stock"]);
    }

    #[test]
    fn test_optional_arguments_may_be_null() {
        let fields = check(
            r#"mutation { updateProduct(id: "1", description: null, categoryId: null) { id } }"#,
            serde_json::json!({}),
        );
        assert!(fields.is_empty());
    }

    #[test]
    fn test_variables_and_defaults() {
        let query = r#"mutation($name: String, $price: Float = null, $stock: Int) {
            updateProduct(id: "1", name: $name, price: $price, stock: $stock) { id }
        }"#;

        assert_eq!(check(query, serde_json::json!({ "name": "Pen", "stock": 3 })), ["price"]);
        assert_eq!(check(query, serde_json::json!({ "name": null, "price": 1.0 })), ["name"]);
        assert!(check(query, serde_json::json!({ "name": "Pen", "price": 1.0 })).is_empty());
    }

    #[test]
    fn test_fragments_are_followed() {
        let fields = check(
            r#"mutation { ...Changes }
               fragment Changes on MutationRoot { updateProduct(id: "1", price: null) { id } }"#,
            serde_json::json!({}),
        );
        assert_eq!(fields, ["price"]);
    }

    #[test]
    fn test_queries_and_other_mutations_are_ignored() {
        assert!(check(r#"{ product(id: "1") { name } }"#, serde_json::json!({})).is_empty());
        assert!(check(r#"mutation { addCategory(name: "X") { id } }"#, serde_json::json!({})).is_empty());
    }

    #[test]
    fn test_named_operation_is_selected() {
        let document = parse_query(
            r#"mutation Bad { updateProduct(id: "1", name: null) { id } }
               mutation Good { updateProduct(id: "1", name: "Pen") { id } }"#,
        )
        .unwrap();
        let variables = Variables::default();

        assert!(null_required_arguments(&document, Some("Good"), &variables).is_none());
        assert!(null_required_arguments(&document, Some("Bad"), &variables).is_some());
        assert!(null_required_arguments(&document, None, &variables).is_none());
    }
}
