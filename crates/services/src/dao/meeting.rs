use async_trait::async_trait;
use bson::{DateTime, doc, oid::ObjectId};
use meetspace_db::models::Meeting;
use meetspace_pipeline::MeetingStore;
use mongodb::Database;

use super::base::{BaseDao, DaoError, DaoResult};

pub struct MeetingDao {
    pub base: BaseDao<Meeting>,
}

impl MeetingDao {
    pub fn new(db: &Database) -> Self {
        Self {
            base: BaseDao::new(db, Meeting::COLLECTION),
        }
    }

    pub async fn create(
        &self,
        space_id: ObjectId,
        title: String,
        scheduled_at: Option<DateTime>,
    ) -> DaoResult<Meeting> {
        let now = DateTime::now();
        let meeting = Meeting {
            id: None,
            space_id,
            title,
            scheduled_at,
            transcript: None,
            summary: None,
            action_items: None,
            created_at: now,
            updated_at: now,
        };

        let id = self.base.insert_one(&meeting).await?;
        self.base.find_by_id(id).await
    }

    pub async fn exists(&self, id: ObjectId) -> DaoResult<bool> {
        let count = self.base.count(doc! { "_id": id }).await?;
        Ok(count > 0)
    }

    /// Overwrites the meeting's transcript. Last write wins across repeated
    /// uploads; fails with `NotFound` when the id matches no meeting.
    pub async fn set_transcript(&self, id: ObjectId, transcript: &str) -> DaoResult<()> {
        let result = self
            .base
            .update_by_id(id, doc! { "$set": { "transcript": transcript } })
            .await?;

        if result.matched_count == 0 {
            return Err(DaoError::NotFound);
        }
        Ok(())
    }

    /// Writes whichever summary artifacts were produced. Fields that are
    /// `None` are left untouched so an earlier successful value is never
    /// clobbered by a failed generation.
    pub async fn set_summary_artifacts(
        &self,
        id: ObjectId,
        summary: Option<&str>,
        action_items: Option<&str>,
    ) -> DaoResult<()> {
        let mut set = bson::Document::new();
        if let Some(summary) = summary {
            set.insert("summary", summary);
        }
        if let Some(action_items) = action_items {
            set.insert("action_items", action_items);
        }
        if set.is_empty() {
            return Ok(());
        }

        let result = self.base.update_by_id(id, doc! { "$set": set }).await?;

        if result.matched_count == 0 {
            return Err(DaoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl MeetingStore for MeetingDao {
    async fn exists(&self, meeting_id: ObjectId) -> anyhow::Result<bool> {
        Ok(MeetingDao::exists(self, meeting_id).await?)
    }

    async fn save_transcript(&self, meeting_id: ObjectId, transcript: &str) -> anyhow::Result<()> {
        Ok(self.set_transcript(meeting_id, transcript).await?)
    }

    async fn save_artifacts(
        &self,
        meeting_id: ObjectId,
        summary: Option<&str>,
        action_items: Option<&str>,
    ) -> anyhow::Result<()> {
        Ok(self
            .set_summary_artifacts(meeting_id, summary, action_items)
            .await?)
    }
}
