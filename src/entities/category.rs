//! Category record

use crate::core::{FieldValue, Patch, Record, RecordId};
use serde::{Deserialize, Serialize};

/// A product category. Its products are derived, never stored here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewCategory {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPatch {
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub name: Patch<String>,
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub description: Patch<Option<String>>,
}

impl Record for Category {
    type Draft = NewCategory;
    type Patch = CategoryPatch;

    fn collection() -> &'static str {
        "categories"
    }

    fn entity_type() -> &'static str {
        "category"
    }

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn from_draft(id: RecordId, draft: NewCategory) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
        }
    }

    fn apply_patch(&mut self, patch: CategoryPatch) {
        patch.name.apply_to(&mut self.name);
        patch.description.apply_to(&mut self.description);
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "id" => Some(FieldValue::Id(self.id.clone())),
            "name" => Some(FieldValue::String(self.name.clone())),
            "description" => Some(
                self.description
                    .clone()
                    .map_or(FieldValue::Null, FieldValue::String),
            ),
            _ => None,
        }
    }
}
