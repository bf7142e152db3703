// In-memory DocumentStore used by handler tests
use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Bson, Document};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::RwLock;

use super::store::*;
use crate::utils::AppError;

#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn matches(doc: &Document, filter: &Document) -> bool {
        filter.iter().all(|(key, expected)| doc.get(key) == Some(expected))
    }

    fn with_id(doc: Document) -> (Bson, Document) {
        if let Some(id) = doc.get("_id").cloned() {
            return (id, doc);
        }

        let id = Bson::ObjectId(ObjectId::new());
        let mut stored = Document::new();
        stored.insert("_id", id.clone());
        stored.extend(doc);
        (id, stored)
    }

    fn poisoned() -> AppError {
        AppError::DatabaseError("memory store lock poisoned".into())
    }
}

/// Mongo's cross-type sort order, reduced to the types these tests store
fn type_rank(value: Option<&Bson>) -> u8 {
    match value {
        None | Some(Bson::Null) => 0,
        Some(Bson::Int32(_)) | Some(Bson::Int64(_)) | Some(Bson::Double(_)) => 1,
        Some(Bson::String(_)) => 2,
        Some(Bson::Document(_)) => 3,
        Some(Bson::Array(_)) => 4,
        Some(Bson::ObjectId(_)) => 5,
        Some(Bson::Boolean(_)) => 6,
        Some(Bson::DateTime(_)) => 7,
        Some(_) => 8,
    }
}

fn as_f64(value: &Bson) -> Option<f64> {
    match value {
        Bson::Int32(n) => Some(*n as f64),
        Bson::Int64(n) => Some(*n as f64),
        Bson::Double(n) => Some(*n),
        _ => None,
    }
}

fn compare_bson(a: Option<&Bson>, b: Option<&Bson>) -> Ordering {
    let rank = type_rank(a).cmp(&type_rank(b));
    if rank != Ordering::Equal {
        return rank;
    }

    match (a, b) {
        (Some(Bson::String(x)), Some(Bson::String(y))) => x.cmp(y),
        (Some(Bson::ObjectId(x)), Some(Bson::ObjectId(y))) => x.bytes().cmp(&y.bytes()),
        (Some(Bson::Boolean(x)), Some(Bson::Boolean(y))) => x.cmp(y),
        (Some(Bson::DateTime(x)), Some(Bson::DateTime(y))) => x.cmp(y),
        (Some(x), Some(y)) => match (as_f64(x), as_f64(y)) {
            (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
            _ => Ordering::Equal,
        },
        _ => Ordering::Equal,
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find(&self, collection: &str, spec: FindSpec) -> Result<Vec<Document>, AppError> {
        let collections = self.collections.read().map_err(|_| Self::poisoned())?;

        let mut found: Vec<Document> = collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|doc| Self::matches(doc, &spec.filter))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        if let Some(sort) = &spec.sort {
            found.sort_by(|a, b| {
                sort.iter()
                    .map(|(key, direction)| {
                        let ordering = compare_bson(a.get(key), b.get(key));
                        if as_f64(direction).unwrap_or(1.0) < 0.0 {
                            ordering.reverse()
                        } else {
                            ordering
                        }
                    })
                    .find(|ordering| *ordering != Ordering::Equal)
                    .unwrap_or(Ordering::Equal)
            });
        }

        if let Some(limit) = spec.limit {
            found.truncate(limit.max(0) as usize);
        }

        Ok(found)
    }

    async fn find_one(
        &self,
        collection: &str,
        filter: Document,
    ) -> Result<Option<Document>, AppError> {
        let collections = self.collections.read().map_err(|_| Self::poisoned())?;

        Ok(collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|doc| Self::matches(doc, &filter)).cloned()))
    }

    async fn insert_one(&self, collection: &str, doc: Document) -> Result<InsertResult, AppError> {
        let mut collections = self.collections.write().map_err(|_| Self::poisoned())?;

        let (id, stored) = Self::with_id(doc);
        collections.entry(collection.to_string()).or_default().push(stored);

        Ok(InsertResult {
            acknowledged: true,
            inserted_id: id_to_json(id),
        })
    }

    async fn replace_one(
        &self,
        collection: &str,
        filter: Document,
        replacement: Document,
    ) -> Result<UpdateResult, AppError> {
        let mut collections = self.collections.write().map_err(|_| Self::poisoned())?;

        let target = collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|doc| Self::matches(doc, &filter)));

        let Some(existing) = target else {
            return Ok(UpdateResult {
                acknowledged: true,
                matched_count: 0,
                modified_count: 0,
                upserted_id: None,
            });
        };

        let mut stored = Document::new();
        if let Some(id) = existing.get("_id") {
            stored.insert("_id", id.clone());
        }
        stored.extend(replacement);

        let modified = u64::from(*existing != stored);
        *existing = stored;

        Ok(UpdateResult {
            acknowledged: true,
            matched_count: 1,
            modified_count: modified,
            upserted_id: None,
        })
    }

    async fn upsert_one(
        &self,
        collection: &str,
        filter: Document,
        fields: Document,
    ) -> Result<UpdateResult, AppError> {
        let mut collections = self.collections.write().map_err(|_| Self::poisoned())?;
        let docs = collections.entry(collection.to_string()).or_default();

        if let Some(existing) = docs.iter_mut().find(|doc| Self::matches(doc, &filter)) {
            let before = existing.clone();
            existing.extend(fields);

            return Ok(UpdateResult {
                acknowledged: true,
                matched_count: 1,
                modified_count: u64::from(before != *existing),
                upserted_id: None,
            });
        }

        let mut created = filter;
        created.extend(fields);
        let (id, stored) = Self::with_id(created);
        docs.push(stored);

        Ok(UpdateResult {
            acknowledged: true,
            matched_count: 0,
            modified_count: 0,
            upserted_id: Some(id_to_json(id)),
        })
    }

    async fn delete_one(&self, collection: &str, filter: Document) -> Result<DeleteResult, AppError> {
        let mut collections = self.collections.write().map_err(|_| Self::poisoned())?;

        let position = collections
            .get(collection)
            .and_then(|docs| docs.iter().position(|doc| Self::matches(doc, &filter)));

        let deleted_count = match (position, collections.get_mut(collection)) {
            (Some(index), Some(docs)) => {
                docs.remove(index);
                1
            }
            _ => 0,
        };

        Ok(DeleteResult {
            acknowledged: true,
            deleted_count,
        })
    }
}
