// BSON <-> JSON conversion for schemaless request and response bodies
use mongodb::bson::{self, Bson, Document};
use serde_json::{Map, Value};

use super::error::AppError;

/// Renders a stored document as relaxed Extended JSON, with top-level
/// ObjectIds flattened to their hex string (`"_id": "65f0..."`).
pub fn document_to_json(doc: Document) -> Value {
    let flattened: Document = doc
        .into_iter()
        .map(|(key, value)| match value {
            Bson::ObjectId(oid) => (key, Bson::String(oid.to_hex())),
            other => (key, other),
        })
        .collect();

    Bson::Document(flattened).into_relaxed_extjson()
}

pub fn documents_to_json(docs: Vec<Document>) -> Value {
    Value::Array(docs.into_iter().map(document_to_json).collect())
}

pub fn optional_document_to_json(doc: Option<Document>) -> Value {
    doc.map(document_to_json).unwrap_or(Value::Null)
}

/// Converts a JSON request body into a BSON document, verbatim.
pub fn json_to_document(body: Map<String, Value>) -> Result<Document, AppError> {
    bson::to_document(&body).map_err(|e| AppError::InvalidRequest(e.to_string()))
}
