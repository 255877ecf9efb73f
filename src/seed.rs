//! Writes generated batches into the store and clears whole collections.
//! Every operation returns an [`OpReport`] instead of throwing away
//! failures, so callers can tell a full success from a partial one.

use crate::firestore::{ClientError, DocumentStore};
use crate::generate::estates::Estate;
use crate::generate::members::Member;
use crate::generate::notices::Notice;
use crate::generate::transactions::Transaction;

pub const ESTATES_COLLECTION: &str = "estates";

/// Metadata fields the store stamps at write time for transactions.
const SERVER_TIME_PATHS: [&str; 2] = ["metadata.createdAt", "metadata.updatedAt"];

pub fn members_collection(estate_id: &str) -> String {
    format!("estates/{estate_id}/members")
}

pub fn notices_collection(estate_id: &str) -> String {
    format!("estates/{estate_id}/notices")
}

pub fn transactions_collection(estate_id: &str) -> String {
    format!("estates/{estate_id}/transactions")
}

/// Outcome of one add or clear call.
#[derive(Debug, Default)]
pub struct OpReport {
    pub succeeded: usize,
    pub failures: Vec<ItemFailure>,
}

#[derive(Debug)]
pub struct ItemFailure {
    /// What was being written or deleted: an email, a title, a document id.
    pub key: String,
    pub error: ClientError,
}

impl OpReport {
    pub fn complete(&self) -> bool {
        self.failures.is_empty()
    }

    fn record(&mut self, key: &str, result: Result<(), ClientError>) {
        match result {
            Ok(()) => self.succeeded += 1,
            Err(error) => self.failures.push(ItemFailure {
                key: key.to_string(),
                error,
            }),
        }
    }
}

/// Write a member batch keyed by email, so re-running the seeder replaces
/// rather than duplicates members.
pub fn add_members(store: &impl DocumentStore, estate_id: &str, batch: &[Member]) -> OpReport {
    let collection = members_collection(estate_id);
    let mut report = OpReport::default();
    for member in batch {
        let result = store.set_document(&collection, &member.email, &member.to_fields());
        report.record(&member.email, result);
    }
    report
}

pub fn add_notices(store: &impl DocumentStore, estate_id: &str, batch: &[Notice]) -> OpReport {
    let collection = notices_collection(estate_id);
    let mut report = OpReport::default();
    for notice in batch {
        let result = store.add_document(&collection, &notice.to_fields()).map(|_| ());
        report.record(&notice.title, result);
    }
    report
}

pub fn add_transactions(
    store: &impl DocumentStore,
    estate_id: &str,
    batch: &[Transaction],
) -> OpReport {
    let collection = transactions_collection(estate_id);
    let mut report = OpReport::default();
    for transaction in batch {
        let result = store
            .add_document_with_server_times(&collection, &transaction.to_fields(), &SERVER_TIME_PATHS)
            .map(|_| ());
        report.record(&transaction.title, result);
    }
    report
}

/// Enumerate and delete every document under a collection. A delete that
/// fails is recorded and the sweep continues; a failed enumeration fails
/// the whole call since there is nothing to iterate.
pub fn clear_collection(
    store: &impl DocumentStore,
    collection: &str,
) -> Result<OpReport, ClientError> {
    let ids = store.list_document_ids(collection)?;
    let mut report = OpReport::default();
    for id in ids {
        let result = store.delete_document(collection, &id);
        report.record(&id, result);
    }
    Ok(report)
}

#[derive(Debug, Clone)]
pub struct CreatedEstate {
    pub id: String,
    pub name: String,
}

/// Create top-level estates; returns the created ids in creation order so
/// the caller can print them and optionally populate the first one.
pub fn add_estates(
    store: &impl DocumentStore,
    batch: &[Estate],
) -> (Vec<CreatedEstate>, OpReport) {
    let mut created = Vec::with_capacity(batch.len());
    let mut report = OpReport::default();
    for estate in batch {
        match store.add_document(ESTATES_COLLECTION, &estate.to_fields()) {
            Ok(id) => {
                report.succeeded += 1;
                created.push(CreatedEstate {
                    id,
                    name: estate.name.clone(),
                });
            }
            Err(error) => report.failures.push(ItemFailure {
                key: estate.name.clone(),
                error,
            }),
        }
    }
    (created, report)
}
