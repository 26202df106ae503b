use std::time::Duration;

use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::options::{ClientOptions, IndexOptions, ServerApi, ServerApiVersion};
use mongodb::{Client, Database, IndexModel};

use super::{Collection, DocumentStore};
use crate::models::{DeleteOutcome, InsertOutcome, UpdateOutcome};
use crate::utils::document::bson_to_json;
use crate::utils::error::AppError;

#[derive(Clone)]
pub struct MongoDB {
    db: Database,
}

impl MongoDB {
    /// Builds the client. Connections are opened lazily by the driver, so
    /// this only fails on a bad URI or an unresolvable SRV record.
    pub async fn new(uri: &str, db_name: &str) -> Result<Self, mongodb::error::Error> {
        let mut client_options = ClientOptions::parse(uri).await?;

        client_options.server_api = Some(ServerApi::builder().version(ServerApiVersion::V1).build());
        client_options.app_name = Some("plateshare-api".to_string());

        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(2);
        client_options.max_idle_time = Some(Duration::from_secs(300));

        client_options.connect_timeout = Some(Duration::from_secs(5));
        client_options.server_selection_timeout = Some(Duration::from_secs(5));

        let client = Client::with_options(client_options)?;
        let db = client.database(db_name);

        Ok(Self { db })
    }

    /// Creates the indexes the routes rely on. Failures are logged only.
    pub async fn ensure_indexes(&self) {
        log::info!("🔧 Creating database indexes...");

        let indexes = [
            (
                Collection::Users,
                IndexModel::builder()
                    .keys(doc! { "email": 1 })
                    .options(IndexOptions::builder().unique(true).build())
                    .build(),
            ),
            (Collection::Foods, IndexModel::builder().keys(doc! { "createdAt": -1 }).build()),
            (Collection::Requests, IndexModel::builder().keys(doc! { "foodId": 1 }).build()),
            (
                Collection::Requests,
                IndexModel::builder().keys(doc! { "requester_email": 1 }).build(),
            ),
        ];

        for (collection, index) in indexes {
            let keys = index.keys.clone();
            match self.collection(collection).create_index(index).await {
                Ok(_) => log::info!("   ✅ Index ready: {}({})", collection, keys),
                Err(e) => log::warn!("   ⚠️  Index {}({}) not created: {}", collection, keys, e),
            }
        }
    }

    pub fn collection(&self, collection: Collection) -> mongodb::Collection<Document> {
        self.db.collection(collection.name())
    }
}

#[async_trait]
impl DocumentStore for MongoDB {
    async fn find_one(&self, collection: Collection, filter: Document)
        -> Result<Option<Document>, AppError> {
        Ok(self.collection(collection).find_one(filter).await?)
    }

    async fn find(
        &self,
        collection: Collection,
        filter: Document,
        sort: Option<Document>,
    ) -> Result<Vec<Document>, AppError> {
        let coll = self.collection(collection);
        let mut query = coll.find(filter);
        if let Some(sort) = sort {
            query = query.sort(sort);
        }

        let cursor = query.await?;
        let documents: Vec<Document> = cursor.try_collect().await?;
        Ok(documents)
    }

    async fn insert_one(&self, collection: Collection, document: Document)
        -> Result<InsertOutcome, AppError> {
        let result = self.collection(collection).insert_one(document).await?;
        Ok(InsertOutcome::new(bson_to_json(result.inserted_id)))
    }

    async fn update_one(
        &self,
        collection: Collection,
        filter: Document,
        fields: Document,
    ) -> Result<UpdateOutcome, AppError> {
        let result = self
            .collection(collection)
            .update_one(filter, doc! { "$set": fields })
            .await?;

        Ok(UpdateOutcome {
            acknowledged: true,
            matched_count: result.matched_count,
            modified_count: result.modified_count,
            upserted_count: u64::from(result.upserted_id.is_some()),
            upserted_id: result.upserted_id.map(bson_to_json),
        })
    }

    async fn delete_one(&self, collection: Collection, filter: Document)
        -> Result<DeleteOutcome, AppError> {
        let result = self.collection(collection).delete_one(filter).await?;
        Ok(DeleteOutcome::new(result.deleted_count))
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}
