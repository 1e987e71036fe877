use bson::{DateTime, oid::ObjectId};
use serde::{Deserialize, Serialize};

/// A scheduled meeting within a space.
///
/// The transcript/summary/action_items columns are the persistence target
/// of the recording pipeline. Each is written independently and
/// last-write-wins across repeated uploads for the same meeting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meeting {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub space_id: ObjectId,
    pub title: String,
    pub scheduled_at: Option<DateTime>,
    pub transcript: Option<String>,
    pub summary: Option<String>,
    pub action_items: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Meeting {
    pub const COLLECTION: &'static str = "meetings";
}
