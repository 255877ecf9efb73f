//! Record synthesizers. Each is a pure function over an injected random
//! source, so tests can pin a seed while the CLI feeds `thread_rng()`.
//! None of them consult existing store contents.

pub mod estates;
pub mod members;
pub mod notices;
pub mod transactions;

use chrono::{DateTime, Utc};

use crate::firestore::value::{Fields, Value};

/// The `metadata` map every record carries: client-side creation and update
/// stamps. Transactions leave these to the store's write-time clock instead.
pub(crate) fn metadata(created_at: DateTime<Utc>, updated_at: DateTime<Utc>) -> Value {
    let mut fields = Fields::new();
    fields.insert("createdAt".into(), Value::Timestamp(created_at));
    fields.insert("updatedAt".into(), Value::Timestamp(updated_at));
    Value::map(fields)
}
