use std::collections::BTreeMap;
use std::sync::Mutex;

use lonepeak_seed::firestore::value::Fields;
use lonepeak_seed::firestore::{ClientError, DocumentStore};

/// In-memory stand-in for the document store: `collection path -> doc id
/// -> fields`. Auto-ids are sequential so "the first created estate" is
/// predictable in assertions.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    collections: BTreeMap<String, BTreeMap<String, Fields>>,
    next_id: u64,
}

impl MemoryStore {
    pub fn count(&self, collection: &str) -> usize {
        self.inner
            .lock()
            .unwrap()
            .collections
            .get(collection)
            .map_or(0, |docs| docs.len())
    }

    pub fn documents(&self, collection: &str) -> BTreeMap<String, Fields> {
        self.inner
            .lock()
            .unwrap()
            .collections
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }
}

impl DocumentStore for MemoryStore {
    fn add_document(&self, collection: &str, fields: &Fields) -> Result<String, ClientError> {
        let mut inner = self.inner.lock().unwrap();
        inner.next_id += 1;
        let id = format!("auto-{}", inner.next_id);
        inner
            .collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.clone(), fields.clone());
        Ok(id)
    }

    fn set_document(
        &self,
        collection: &str,
        doc_id: &str,
        fields: &Fields,
    ) -> Result<(), ClientError> {
        self.inner
            .lock()
            .unwrap()
            .collections
            .entry(collection.to_string())
            .or_default()
            .insert(doc_id.to_string(), fields.clone());
        Ok(())
    }

    fn add_document_with_server_times(
        &self,
        collection: &str,
        fields: &Fields,
        _stamp_paths: &[&str],
    ) -> Result<String, ClientError> {
        // The stamps are the store's concern; the double just records the
        // fields as given.
        self.add_document(collection, fields)
    }

    fn list_document_ids(&self, collection: &str) -> Result<Vec<String>, ClientError> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .collections
            .get(collection)
            .map_or_else(Vec::new, |docs| docs.keys().cloned().collect()))
    }

    fn delete_document(&self, collection: &str, doc_id: &str) -> Result<(), ClientError> {
        if let Some(docs) = self
            .inner
            .lock()
            .unwrap()
            .collections
            .get_mut(collection)
        {
            docs.remove(doc_id);
        }
        Ok(())
    }
}
