//! User record

use crate::core::{FieldValue, Patch, Record, RecordId};
use serde::{Deserialize, Serialize};

/// A customer. Orders point at users; users hold no order ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: RecordId,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub name: Patch<String>,
    #[serde(skip_serializing_if = "Patch::is_keep")]
    pub email: Patch<String>,
}

impl Record for User {
    type Draft = NewUser;
    type Patch = UserPatch;

    fn collection() -> &'static str {
        "users"
    }

    fn entity_type() -> &'static str {
        "user"
    }

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn from_draft(id: RecordId, draft: NewUser) -> Self {
        Self {
            id,
            name: draft.name,
            email: draft.email,
        }
    }

    fn apply_patch(&mut self, patch: UserPatch) {
        patch.name.apply_to(&mut self.name);
        patch.email.apply_to(&mut self.email);
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "id" => Some(FieldValue::Id(self.id.clone())),
            "name" => Some(FieldValue::String(self.name.clone())),
            "email" => Some(FieldValue::String(self.email.clone())),
            _ => None,
        }
    }
}
