pub mod auth;
pub mod client;
pub mod credentials;
pub mod value;

pub use client::{ClientError, FirestoreClient};

use value::Fields;

/// The seam between seeding logic and transport. Production code talks to
/// [`FirestoreClient`]; tests inject an in-memory store.
///
/// Collections are addressed by slash-separated paths relative to the
/// database root, e.g. `estates/{id}/members`.
pub trait DocumentStore {
    /// Create a document with a store-assigned id; returns the new id.
    fn add_document(&self, collection: &str, fields: &Fields) -> Result<String, ClientError>;

    /// Create or replace the document at a caller-chosen id (last write
    /// wins).
    fn set_document(&self, collection: &str, doc_id: &str, fields: &Fields)
        -> Result<(), ClientError>;

    /// Like [`DocumentStore::add_document`], but the fields named by
    /// `stamp_paths` are filled with the store's own write-time clock.
    fn add_document_with_server_times(
        &self,
        collection: &str,
        fields: &Fields,
        stamp_paths: &[&str],
    ) -> Result<String, ClientError>;

    /// Every document id currently under the collection.
    fn list_document_ids(&self, collection: &str) -> Result<Vec<String>, ClientError>;

    fn delete_document(&self, collection: &str, doc_id: &str) -> Result<(), ClientError>;
}
