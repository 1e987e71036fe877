use bson::{DateTime, doc, oid::ObjectId};
use meetspace_db::models::Space;
use mongodb::Database;

use super::base::{BaseDao, DaoResult};

pub struct SpaceDao {
    pub base: BaseDao<Space>,
}

impl SpaceDao {
    pub fn new(db: &Database) -> Self {
        Self {
            base: BaseDao::new(db, Space::COLLECTION),
        }
    }

    pub async fn create(&self, name: String, admin_id: ObjectId) -> DaoResult<Space> {
        let now = DateTime::now();
        let space = Space {
            id: None,
            name,
            description: None,
            admin_id,
            member_ids: vec![admin_id],
            created_at: now,
            updated_at: now,
        };

        let id = self.base.insert_one(&space).await?;
        self.base.find_by_id(id).await
    }

    pub async fn add_member(&self, space_id: ObjectId, user_id: ObjectId) -> DaoResult<()> {
        self.base
            .update_by_id(space_id, doc! { "$addToSet": { "member_ids": user_id } })
            .await?;
        Ok(())
    }

    pub async fn is_member(&self, space_id: ObjectId, user_id: ObjectId) -> DaoResult<bool> {
        let count = self
            .base
            .count(doc! {
                "_id": space_id,
                "$or": [
                    { "admin_id": user_id },
                    { "member_ids": user_id },
                ],
            })
            .await?;
        Ok(count > 0)
    }
}
