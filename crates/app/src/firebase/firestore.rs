//! Firestore documents API.

use async_trait::async_trait;
use reqwest::StatusCode;
use rustc_hash::FxHashMap;
use serde::Deserialize;
use serde_json::{Map, Value, json};
use skillorbit::backend::{
    BackendError, Collection, Direction, Document, DocumentStore, Snapshot,
};

use super::{
    FirebaseClient, FirebaseError,
    values::{decode_fields, encode_fields, encode_value},
};

#[derive(Debug, Deserialize)]
struct FirestoreDocument {
    name: String,

    #[serde(default)]
    fields: Map<String, Value>,
}

impl FirestoreDocument {
    fn into_snapshot(self) -> Result<Snapshot, FirebaseError> {
        let id = document_id(&self.name)
            .ok_or_else(|| {
                FirebaseError::UnexpectedResponse(format!("bad document name: {}", self.name))
            })?
            .to_string();

        Ok(Snapshot {
            id,
            data: decode_fields(&self.fields)?,
        })
    }
}

#[derive(Debug, Deserialize)]
struct QueryRow {
    #[serde(default)]
    document: Option<FirestoreDocument>,
}

#[derive(Debug, Deserialize)]
struct BatchGetRow {
    #[serde(default)]
    found: Option<FirestoreDocument>,
}

/// Last path segment of a document name.
fn document_id(name: &str) -> Option<&str> {
    name.rsplit_once('/')
        .map(|(_, id)| id)
        .filter(|id| !id.is_empty())
}

fn fields_body(data: &Document) -> Value {
    json!({ "fields": encode_fields(data) })
}

fn array_union_body(document_name: &str, field: &str, values: &[Value]) -> Value {
    json!({
        "writes": [{
            "transform": {
                "document": document_name,
                "fieldTransforms": [{
                    "fieldPath": field,
                    "appendMissingElements": {
                        "values": values.iter().map(encode_value).collect::<Vec<_>>(),
                    },
                }],
            },
            "currentDocument": { "exists": true },
        }],
    })
}

fn ordered_query_body(collection: Collection, field: &str, direction: Direction) -> Value {
    let direction = match direction {
        Direction::Ascending => "ASCENDING",
        Direction::Descending => "DESCENDING",
    };

    json!({
        "structuredQuery": {
            "from": [{ "collectionId": collection.as_str() }],
            "orderBy": [{ "field": { "fieldPath": field }, "direction": direction }],
        },
    })
}

impl FirebaseClient {
    fn document_url(&self, collection: Collection, id: &str) -> String {
        format!(
            "{}/{}/{id}",
            self.config.documents_url(),
            collection.as_str()
        )
    }

    async fn try_get(
        &self,
        collection: Collection,
        id: &str,
    ) -> Result<Option<Document>, FirebaseError> {
        let request = self.authorized(self.http.get(self.document_url(collection, id)));

        match self.send::<FirestoreDocument>(request).await {
            Ok(document) => Ok(Some(decode_fields(&document.fields)?)),
            Err(FirebaseError::Api { status, .. }) if status == StatusCode::NOT_FOUND => Ok(None),
            Err(error) => Err(error),
        }
    }

    async fn try_set(
        &self,
        collection: Collection,
        id: &str,
        data: &Document,
    ) -> Result<(), FirebaseError> {
        let request = self.authorized(
            self.http
                .patch(self.document_url(collection, id))
                .json(&fields_body(data)),
        );

        self.send::<FirestoreDocument>(request).await?;

        Ok(())
    }

    async fn try_array_union(
        &self,
        collection: Collection,
        id: &str,
        field: &str,
        values: &[Value],
    ) -> Result<(), FirebaseError> {
        let name = self.config.document_name(collection.as_str(), id);
        let request = self.authorized(
            self.http
                .post(format!("{}:commit", self.config.documents_url()))
                .json(&array_union_body(&name, field, values)),
        );

        self.send::<Value>(request).await?;

        Ok(())
    }

    async fn try_add(&self, collection: Collection, data: &Document) -> Result<String, FirebaseError> {
        let request = self.authorized(
            self.http
                .post(format!(
                    "{}/{}",
                    self.config.documents_url(),
                    collection.as_str()
                ))
                .json(&fields_body(data)),
        );

        let document: FirestoreDocument = self.send(request).await?;

        Ok(document.into_snapshot()?.id)
    }

    async fn try_list_ordered(
        &self,
        collection: Collection,
        field: &str,
        direction: Direction,
    ) -> Result<Vec<Snapshot>, FirebaseError> {
        let request = self.authorized(
            self.http
                .post(format!("{}:runQuery", self.config.documents_url()))
                .json(&ordered_query_body(collection, field, direction)),
        );

        let rows: Vec<QueryRow> = self.send(request).await?;

        rows.into_iter()
            .filter_map(|row| row.document)
            .map(FirestoreDocument::into_snapshot)
            .collect()
    }

    async fn try_get_many(
        &self,
        collection: Collection,
        ids: &[String],
    ) -> Result<Vec<Snapshot>, FirebaseError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let names: Vec<String> = ids
            .iter()
            .map(|id| self.config.document_name(collection.as_str(), id))
            .collect();

        let request = self.authorized(
            self.http
                .post(format!("{}:batchGet", self.config.documents_url()))
                .json(&json!({ "documents": names })),
        );

        let rows: Vec<BatchGetRow> = self.send(request).await?;

        let mut found: FxHashMap<String, Snapshot> = FxHashMap::default();
        for document in rows.into_iter().filter_map(|row| row.found) {
            let snapshot = document.into_snapshot()?;
            found.insert(snapshot.id.clone(), snapshot);
        }

        // Responses arrive in any order; answer in the order asked.
        Ok(ids.iter().filter_map(|id| found.remove(id)).collect())
    }
}

#[async_trait]
impl DocumentStore for FirebaseClient {
    async fn get(
        &self,
        collection: Collection,
        id: &str,
    ) -> Result<Option<Document>, BackendError> {
        Ok(self.try_get(collection, id).await?)
    }

    async fn set(
        &self,
        collection: Collection,
        id: &str,
        data: Document,
    ) -> Result<(), BackendError> {
        Ok(self.try_set(collection, id, &data).await?)
    }

    async fn array_union(
        &self,
        collection: Collection,
        id: &str,
        field: &str,
        values: Vec<Value>,
    ) -> Result<(), BackendError> {
        Ok(self.try_array_union(collection, id, field, &values).await?)
    }

    async fn add(&self, collection: Collection, data: Document) -> Result<String, BackendError> {
        Ok(self.try_add(collection, &data).await?)
    }

    async fn list_ordered(
        &self,
        collection: Collection,
        field: &str,
        direction: Direction,
    ) -> Result<Vec<Snapshot>, BackendError> {
        Ok(self.try_list_ordered(collection, field, direction).await?)
    }

    async fn get_many(
        &self,
        collection: Collection,
        ids: &[String],
    ) -> Result<Vec<Snapshot>, BackendError> {
        Ok(self.try_get_many(collection, ids).await?)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn document_id_is_last_segment() {
        assert_eq!(
            document_id("projects/p/databases/(default)/documents/orders/abc123"),
            Some("abc123")
        );
        assert_eq!(document_id("orders/"), None);
        assert_eq!(document_id("plain"), None);
    }

    #[test]
    fn array_union_uses_append_missing_elements() {
        let body = array_union_body(
            "projects/p/databases/(default)/documents/users/u1",
            "enrolledCourses",
            &[Value::String("3".to_string())],
        );

        assert_eq!(
            body,
            json!({
                "writes": [{
                    "transform": {
                        "document": "projects/p/databases/(default)/documents/users/u1",
                        "fieldTransforms": [{
                            "fieldPath": "enrolledCourses",
                            "appendMissingElements": { "values": [{ "stringValue": "3" }] },
                        }],
                    },
                    "currentDocument": { "exists": true },
                }],
            })
        );
    }

    #[test]
    fn ordered_query_sorts_descending() {
        let body = ordered_query_body(Collection::Courses, "createdAt", Direction::Descending);

        assert_eq!(
            body.pointer("/structuredQuery/orderBy/0/direction"),
            Some(&json!("DESCENDING"))
        );
        assert_eq!(
            body.pointer("/structuredQuery/from/0/collectionId"),
            Some(&json!("courses"))
        );
    }

    #[test]
    fn query_rows_without_documents_are_skipped() -> TestResult {
        let rows: Vec<QueryRow> = serde_json::from_value(json!([
            { "readTime": "2024-01-01T00:00:00Z" },
            {
                "document": {
                    "name": "projects/p/databases/(default)/documents/courses/3",
                    "fields": { "title": { "stringValue": "Python" } },
                },
            },
        ]))?;

        let snapshots = rows
            .into_iter()
            .filter_map(|row| row.document)
            .map(FirestoreDocument::into_snapshot)
            .collect::<Result<Vec<_>, _>>()?;

        assert_eq!(snapshots.len(), 1);
        assert_eq!(snapshots.first().map(|s| s.id.as_str()), Some("3"));

        Ok(())
    }
}
