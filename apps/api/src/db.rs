use anyhow::Result;
use mongodb::bson::{doc, Document};
use mongodb::options::IndexOptions;
use mongodb::{Client, Database, IndexModel};
use tracing::info;

/// Connects to MongoDB and ensures the unique index on the profile's
/// owning user (at most one profile per user).
pub async fn connect(uri: &str, db_name: &str) -> Result<Database> {
    info!("Connecting to MongoDB...");

    let client = Client::with_uri_str(uri).await?;
    let db = client.database(db_name);

    let unique_user = IndexModel::builder()
        .keys(doc! { "user": 1 })
        .options(IndexOptions::builder().unique(true).build())
        .build();
    db.collection::<Document>("profiles")
        .create_index(unique_user)
        .await?;

    info!("mongodb connected");
    Ok(db)
}
