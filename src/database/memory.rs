//! In-memory `DocumentStore` for route tests.
//!
//! Supports the subset of MongoDB the routes use: equality filters, a single
//! sort key and `$set` updates.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Bson, Document};

use super::{Collection, DocumentStore};
use crate::models::{DeleteOutcome, InsertOutcome, UpdateOutcome};
use crate::utils::document::bson_to_json;
use crate::utils::error::AppError;

#[derive(Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<Collection, Vec<Document>>>,
}

impl MemoryStore {
    pub fn documents(&self, collection: Collection) -> Vec<Document> {
        self.lock()
            .map(|c| c.get(&collection).cloned().unwrap_or_default())
            .unwrap_or_default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<Collection, Vec<Document>>>, AppError> {
        self.collections
            .lock()
            .map_err(|_| AppError::Database("memory store poisoned".into()))
    }
}

fn matches(doc: &Document, filter: &Document) -> bool {
    filter.iter().all(|(key, value)| doc.get(key) == Some(value))
}

fn compare(a: Option<&Bson>, b: Option<&Bson>) -> Ordering {
    match (a, b) {
        (Some(Bson::DateTime(a)), Some(Bson::DateTime(b))) => a.cmp(b),
        (Some(Bson::String(a)), Some(Bson::String(b))) => a.cmp(b),
        (Some(Bson::Int32(a)), Some(Bson::Int32(b))) => a.cmp(b),
        (Some(Bson::Int64(a)), Some(Bson::Int64(b))) => a.cmp(b),
        (Some(Bson::Double(a)), Some(Bson::Double(b))) => a.total_cmp(b),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find_one(&self, collection: Collection, filter: Document)
        -> Result<Option<Document>, AppError> {
        let collections = self.lock()?;
        Ok(collections
            .get(&collection)
            .and_then(|docs| docs.iter().find(|d| matches(d, &filter)).cloned()))
    }

    async fn find(
        &self,
        collection: Collection,
        filter: Document,
        sort: Option<Document>,
    ) -> Result<Vec<Document>, AppError> {
        let collections = self.lock()?;
        let mut found: Vec<Document> = collections
            .get(&collection)
            .map(|docs| docs.iter().filter(|d| matches(d, &filter)).cloned().collect())
            .unwrap_or_default();

        if let Some((key, direction)) = sort.as_ref().and_then(|s| s.iter().next()) {
            let descending = matches!(direction, Bson::Int32(d) if *d < 0)
                || matches!(direction, Bson::Int64(d) if *d < 0);
            found.sort_by(|a, b| {
                let ord = compare(a.get(key), b.get(key));
                if descending { ord.reverse() } else { ord }
            });
        }

        Ok(found)
    }

    async fn insert_one(&self, collection: Collection, mut document: Document)
        -> Result<InsertOutcome, AppError> {
        let id = match document.get("_id") {
            Some(id) => id.clone(),
            None => {
                let id = Bson::ObjectId(ObjectId::new());
                document.insert("_id", id.clone());
                id
            }
        };

        let mut collections = self.lock()?;
        let docs = collections.entry(collection).or_default();
        if docs.iter().any(|d| d.get("_id") == Some(&id)) {
            return Err(AppError::Database(format!("E11000 duplicate key error collection: {}", collection)));
        }
        docs.push(document);

        Ok(InsertOutcome::new(bson_to_json(id)))
    }

    async fn update_one(
        &self,
        collection: Collection,
        filter: Document,
        fields: Document,
    ) -> Result<UpdateOutcome, AppError> {
        if fields.is_empty() {
            return Err(AppError::Database("'$set' is empty. You must specify a field like so: {$set: {<field>: ...}}".into()));
        }

        let mut collections = self.lock()?;
        let target = collections
            .get_mut(&collection)
            .and_then(|docs| docs.iter_mut().find(|d| matches(d, &filter)));

        let Some(doc) = target else {
            return Ok(UpdateOutcome::unmatched());
        };

        let mut modified = false;
        for (key, value) in fields {
            if doc.get(&key) != Some(&value) {
                doc.insert(key, value);
                modified = true;
            }
        }

        Ok(UpdateOutcome::matched(u64::from(modified)))
    }

    async fn delete_one(&self, collection: Collection, filter: Document)
        -> Result<DeleteOutcome, AppError> {
        let mut collections = self.lock()?;
        let deleted = collections
            .get_mut(&collection)
            .and_then(|docs| {
                let pos = docs.iter().position(|d| matches(d, &filter))?;
                docs.remove(pos);
                Some(1)
            })
            .unwrap_or(0);

        Ok(DeleteOutcome::new(deleted))
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[tokio::test]
    async fn test_set_only_touches_given_fields() {
        let store = MemoryStore::default();
        store
            .insert_one(Collection::Foods, doc! { "title": "Bread", "qty": 2 })
            .await
            .unwrap();

        let outcome = store
            .update_one(Collection::Foods, doc! { "title": "Bread" }, doc! { "qty": 3 })
            .await
            .unwrap();
        assert_eq!((outcome.matched_count, outcome.modified_count), (1, 1));

        let docs = store.documents(Collection::Foods);
        assert_eq!(docs[0].get_str("title").unwrap(), "Bread");
        assert_eq!(docs[0].get_i32("qty").unwrap(), 3);
    }

    #[tokio::test]
    async fn test_same_value_is_matched_not_modified() {
        let store = MemoryStore::default();
        store.insert_one(Collection::Foods, doc! { "qty": 2 }).await.unwrap();

        let outcome = store
            .update_one(Collection::Foods, doc! {}, doc! { "qty": 2 })
            .await
            .unwrap();
        assert_eq!((outcome.matched_count, outcome.modified_count), (1, 0));
    }

    #[tokio::test]
    async fn test_sort_descending() {
        let store = MemoryStore::default();
        for n in [2, 5, 1] {
            store.insert_one(Collection::Foods, doc! { "n": n }).await.unwrap();
        }

        let docs = store
            .find(Collection::Foods, doc! {}, Some(doc! { "n": -1 }))
            .await
            .unwrap();
        let order: Vec<i32> = docs.iter().map(|d| d.get_i32("n").unwrap()).collect();
        assert_eq!(order, vec![5, 2, 1]);
    }
}
