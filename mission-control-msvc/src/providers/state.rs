use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;
use std::collections::BTreeMap;
use std::collections::HashMap;
use thiserror::Error;
use tokio::sync::RwLock;

type Document = Map<String, Value>;

#[derive(Debug, Error)]
pub enum StateImplError {
    #[error(transparent)]
    JsonSerializerImplError(#[from] serde_json::Error),
    #[error("document must serialize to a json object")]
    NotADocument,
    #[error("duplicate value for unique field {0}")]
    DuplicateKey(String),
}

#[derive(Default)]
struct Collection {
    last_id: i64,
    documents: BTreeMap<i64, Document>,
}

impl Collection {
    fn conflicts(
        &self,
        candidate: &Document,
        unique_fields: &[&str],
        skip_id: Option<i64>,
    ) -> Option<String> {
        unique_fields
            .iter()
            .find(|field| {
                candidate.get(**field).map_or(false, |value| {
                    self.documents
                        .iter()
                        .filter(|(id, _)| Some(**id) != skip_id)
                        .any(|(_, doc)| doc.get(**field) == Some(value))
                })
            })
            .map(|field| field.to_string())
    }
}

/// Document store kept in process memory. Documents are json objects grouped
/// in named collections and keyed by an auto-incremented integer `id`.
#[derive(Default)]
pub struct MemStateImpl {
    collections: RwLock<HashMap<String, Collection>>,
}

impl MemStateImpl {
    pub fn new() -> Self {
        Self::default()
    }
}

fn to_document<T: Serialize>(value: &T) -> Result<Document, StateImplError> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        _ => Err(StateImplError::NotADocument),
    }
}

fn from_document<T: DeserializeOwned>(document: &Document) -> Result<T, StateImplError> {
    Ok(serde_json::from_value(Value::Object(document.clone()))?)
}

impl MemStateImpl {
    pub async fn find_one_by_id<T: DeserializeOwned>(
        &self,
        collection_name: &str,
        id: i64,
    ) -> Result<Option<T>, StateImplError> {
        let collections = self.collections.read().await;

        match collections
            .get(collection_name)
            .and_then(|c| c.documents.get(&id))
        {
            Some(document) => Ok(Some(from_document(document)?)),
            None => Ok(None),
        }
    }

    pub async fn find_one_by_field<T: DeserializeOwned, V: Serialize>(
        &self,
        collection_name: &str,
        field_name: &str,
        field_value: V,
    ) -> Result<Option<T>, StateImplError> {
        let found = self
            .find_many_by_field::<T, V>(collection_name, field_name, field_value)
            .await?;

        Ok(found.into_iter().next())
    }

    /// Matching documents in ascending id order.
    pub async fn find_many_by_field<T: DeserializeOwned, V: Serialize>(
        &self,
        collection_name: &str,
        field_name: &str,
        field_value: V,
    ) -> Result<Vec<T>, StateImplError> {
        let field_value = serde_json::to_value(field_value)?;
        let collections = self.collections.read().await;

        match collections.get(collection_name) {
            Some(collection) => collection
                .documents
                .values()
                .filter(|doc| doc.get(field_name) == Some(&field_value))
                .map(from_document)
                .collect(),
            None => Ok(Vec::new()),
        }
    }

    pub async fn find_all<T: DeserializeOwned>(
        &self,
        collection_name: &str,
    ) -> Result<Vec<T>, StateImplError> {
        let collections = self.collections.read().await;

        match collections.get(collection_name) {
            Some(collection) => collection.documents.values().map(from_document).collect(),
            None => Ok(Vec::new()),
        }
    }

    /// Assigns the next id of the collection to `document` and stores it.
    /// Fails with `DuplicateKey` when any of `unique_fields` already holds the
    /// same value in another document.
    pub async fn insert_one<N: Serialize, T: DeserializeOwned>(
        &self,
        collection_name: &str,
        document: &N,
        unique_fields: &[&str],
    ) -> Result<T, StateImplError> {
        let mut document = to_document(document)?;
        let mut collections = self.collections.write().await;
        let collection = collections.entry(collection_name.to_string()).or_default();

        if let Some(field) = collection.conflicts(&document, unique_fields, None) {
            return Err(StateImplError::DuplicateKey(field));
        }

        collection.last_id += 1;
        let id = collection.last_id;
        document.insert("id".to_string(), Value::from(id));

        let inserted = from_document(&document)?;
        collection.documents.insert(id, document);

        Ok(inserted)
    }

    /// Sets every field present in `update` on the document with `id`.
    /// Returns `None` when there is no such document.
    pub async fn update_one<U: Serialize, T: DeserializeOwned>(
        &self,
        collection_name: &str,
        id: i64,
        update: &U,
        unique_fields: &[&str],
    ) -> Result<Option<T>, StateImplError> {
        let update = to_document(update)?;
        let mut collections = self.collections.write().await;

        let collection = match collections.get_mut(collection_name) {
            Some(collection) => collection,
            None => return Ok(None),
        };

        if !collection.documents.contains_key(&id) {
            return Ok(None);
        }

        if let Some(field) = collection.conflicts(&update, unique_fields, Some(id)) {
            return Err(StateImplError::DuplicateKey(field));
        }

        let mut document = match collection.documents.get(&id) {
            Some(document) => document.clone(),
            None => return Ok(None),
        };
        for (key, value) in update {
            if key != "id" {
                document.insert(key, value);
            }
        }

        let updated = from_document(&document)?;
        collection.documents.insert(id, document);

        Ok(Some(updated))
    }

    pub async fn delete_one(&self, collection_name: &str, id: i64) -> bool {
        let mut collections = self.collections.write().await;

        collections
            .get_mut(collection_name)
            .and_then(|c| c.documents.remove(&id))
            .is_some()
    }

    pub async fn delete_many_by_field<V: Serialize>(
        &self,
        collection_name: &str,
        field_name: &str,
        field_value: V,
    ) -> Result<usize, StateImplError> {
        let field_value = serde_json::to_value(field_value)?;
        let mut collections = self.collections.write().await;

        let collection = match collections.get_mut(collection_name) {
            Some(collection) => collection,
            None => return Ok(0),
        };

        let before = collection.documents.len();
        collection
            .documents
            .retain(|_, doc| doc.get(field_name) != Some(&field_value));

        Ok(before - collection.documents.len())
    }
}
