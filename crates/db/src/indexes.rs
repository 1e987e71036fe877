use mongodb::{Database, IndexModel, options::IndexOptions};
use tracing::info;

pub async fn ensure_indexes(db: &Database) -> Result<(), mongodb::error::Error> {
    // Spaces
    create_indexes(
        db,
        "spaces",
        vec![
            index_unique(bson::doc! { "name": 1 }),
            index(bson::doc! { "admin_id": 1 }),
            index(bson::doc! { "member_ids": 1 }),
        ],
    )
    .await?;

    // Meetings
    create_indexes(
        db,
        "meetings",
        vec![
            index(bson::doc! { "space_id": 1, "scheduled_at": -1 }),
            index(bson::doc! { "space_id": 1, "created_at": -1 }),
        ],
    )
    .await?;

    info!("Indexes ensured");
    Ok(())
}

async fn create_indexes(
    db: &Database,
    collection: &str,
    indexes: Vec<IndexModel>,
) -> Result<(), mongodb::error::Error> {
    db.collection::<bson::Document>(collection)
        .create_indexes(indexes)
        .await?;
    Ok(())
}

fn index(keys: bson::Document) -> IndexModel {
    IndexModel::builder().keys(keys).build()
}

fn index_unique(keys: bson::Document) -> IndexModel {
    IndexModel::builder()
        .keys(keys)
        .options(IndexOptions::builder().unique(true).build())
        .build()
}
