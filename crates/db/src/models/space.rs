use bson::{DateTime, oid::ObjectId};
use serde::{Deserialize, Serialize};

/// A workspace grouping users and their meetings under one administrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Space {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub description: Option<String>,
    pub admin_id: ObjectId,
    #[serde(default)]
    pub member_ids: Vec<ObjectId>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Space {
    pub const COLLECTION: &'static str = "spaces";
}
