//! Product record

use crate::core::{FieldValue, Patch, Record, RecordId};
use serde::{Deserialize, Serialize};

/// A product for sale, optionally filed under a category.
///
/// `price` and `stock` are stored as given; no range checks are applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: RecordId,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub description: Option<String>,
    pub stock: i32,
    #[serde(default)]
    pub category_id: Option<RecordId>,
}

impl Product {
    /// Serialized name of the category reference
    pub const CATEGORY_ID: &'static str = "categoryId";
}

/// Creation input for a product
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    pub description: Option<String>,
    pub stock: i32,
    pub category_id: Option<RecordId>,
}

/// Presence-aware update of a product
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub name: Patch<String>,
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub price: Patch<f64>,
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub description: Patch<Option<String>>,
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub stock: Patch<i32>,
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub category_id: Patch<Option<RecordId>>,
}

impl Record for Product {
    type Draft = NewProduct;
    type Patch = ProductPatch;

    fn collection() -> &'static str {
        "products"
    }

    fn entity_type() -> &'static str {
        "product"
    }

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn from_draft(id: RecordId, draft: NewProduct) -> Self {
        Self {
            id,
            name: draft.name,
            price: draft.price,
            description: draft.description,
            stock: draft.stock,
            category_id: draft.category_id,
        }
    }

    fn apply_patch(&mut self, patch: ProductPatch) {
        patch.name.apply_to(&mut self.name);
        patch.price.apply_to(&mut self.price);
        patch.description.apply_to(&mut self.description);
        patch.stock.apply_to(&mut self.stock);
        patch.category_id.apply_to(&mut self.category_id);
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "id" => Some(FieldValue::Id(self.id.clone())),
            "name" => Some(FieldValue::String(self.name.clone())),
            "price" => Some(FieldValue::Float(self.price)),
            "description" => Some(
                self.description
                    .clone()
                    .map_or(FieldValue::Null, FieldValue::String),
            ),
            "stock" => Some(FieldValue::Integer(i64::from(self.stock))),
            Self::CATEGORY_ID => Some(FieldValue::from(self.category_id.as_ref())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pen() -> Product {
        Product::from_draft(
            RecordId::from("P1"),
            NewProduct {
                name: "Pen".to_string(),
                price: 1.5,
                description: Some("Blue ink".to_string()),
                stock: 10,
                category_id: Some(RecordId::from("C1")),
            },
        )
    }

    #[test]
    fn test_partial_update_keeps_omitted_fields() {
        let mut product = pen();
        product.apply_patch(ProductPatch {
            price: Patch::Set(2.0),
            ..Default::default()
        });

        assert_eq!(product.name, "Pen");
        assert_eq!(product.price, 2.0);
        assert_eq!(product.stock, 10);
        assert_eq!(product.description.as_deref(), Some("Blue ink"));
        assert_eq!(product.category_id, Some(RecordId::from("C1")));
    }

    #[test]
    fn test_explicit_null_clears_optional_fields() {
        let mut product = pen();
        product.apply_patch(ProductPatch {
            description: Patch::Set(None),
            category_id: Patch::Set(None),
            ..Default::default()
        });

        assert_eq!(product.description, None);
        assert_eq!(product.category_id, None);
        assert_eq!(product.name, "Pen");
    }

    #[test]
    fn test_field_value_for_category_reference() {
        let product = pen();
        assert_eq!(
            product.field_value(Product::CATEGORY_ID),
            Some(FieldValue::Id(RecordId::from("C1")))
        );
        assert_eq!(product.field_value("unknown"), None);
    }

    #[test]
    fn test_serialized_field_names() {
        let json = serde_json::to_value(pen()).unwrap();
        assert_eq!(json["categoryId"], "C1");
        assert_eq!(json["id"], "P1");
    }
}
