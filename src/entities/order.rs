//! Order record

use crate::core::{FieldValue, Patch, Record, RecordId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An order placed by a user for an ordered list of products.
///
/// `created_at` is set once, when the record is built from its draft, and no
/// patch can change it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: RecordId,
    pub user_id: RecordId,
    #[serde(default)]
    pub product_ids: Vec<RecordId>,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Serialized name of the user reference
    pub const USER_ID: &'static str = "userId";
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub user_id: RecordId,
    pub product_ids: Vec<RecordId>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPatch {
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub user_id: Patch<RecordId>,
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub product_ids: Patch<Vec<RecordId>>,
}

impl Record for Order {
    type Draft = NewOrder;
    type Patch = OrderPatch;

    fn collection() -> &'static str {
        "orders"
    }

    fn entity_type() -> &'static str {
        "order"
    }

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn from_draft(id: RecordId, draft: NewOrder) -> Self {
        Self {
            id,
            user_id: draft.user_id,
            product_ids: draft.product_ids,
            created_at: Utc::now(),
        }
    }

    fn apply_patch(&mut self, patch: OrderPatch) {
        patch.user_id.apply_to(&mut self.user_id);
        patch.product_ids.apply_to(&mut self.product_ids);
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "id" => Some(FieldValue::Id(self.id.clone())),
            Self::USER_ID => Some(FieldValue::Id(self.user_id.clone())),
            _ => None,
        }
    }
}
