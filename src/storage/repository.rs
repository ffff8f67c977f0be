use chrono::Utc;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::catalog::seed::{seed_apis, seed_call_logs};
use crate::core::constants::storage_keys;
use crate::core::error::Result;
use crate::core::types::{ApiCallLogRecord, ApiDefinition};
use crate::reporting::logging;
use crate::storage::KeyValueStore;

/// A persisted collection.
///
/// `load` never fails: when the stored document is missing or unusable the
/// repository falls back to the built-in seed data.
pub trait Repository {
    type Item;

    fn load(&self) -> Vec<Self::Item>;
    fn save(&self, items: &[Self::Item]) -> Result<()>;
}

enum Stored<T> {
    Absent,
    Present(Vec<T>),
    Unusable(String),
}

fn read_collection<S: KeyValueStore, T: DeserializeOwned>(store: &S, key: &str) -> Stored<T> {
    match store.get(key) {
        Ok(None) => Stored::Absent,
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(items) => Stored::Present(items),
            Err(e) => Stored::Unusable(e.to_string()),
        },
        Err(e) => Stored::Unusable(e.to_string()),
    }
}

fn write_collection<S: KeyValueStore, T: Serialize>(
    store: &S,
    key: &str,
    items: &[T],
) -> Result<()> {
    let raw = serde_json::to_string(items)?;
    store.set(key, &raw)
}

/// API definitions stored under `user_apis`
#[derive(Debug, Clone)]
pub struct ApiRepository<S> {
    store: S,
}

impl<S: KeyValueStore> ApiRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S: KeyValueStore> Repository for ApiRepository<S> {
    type Item = ApiDefinition;

    fn load(&self) -> Vec<ApiDefinition> {
        match read_collection(&self.store, storage_keys::APIS) {
            Stored::Present(apis) => apis,
            Stored::Absent => seed_apis(),
            Stored::Unusable(reason) => {
                logging::log_storage_fallback(storage_keys::APIS, &reason);
                seed_apis()
            }
        }
    }

    fn save(&self, items: &[ApiDefinition]) -> Result<()> {
        write_collection(&self.store, storage_keys::APIS, items)
    }
}

/// Call logs stored under `api_analytics_logs`
#[derive(Debug, Clone)]
pub struct CallLogRepository<S> {
    store: S,
}

impl<S: KeyValueStore> CallLogRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S: KeyValueStore> Repository for CallLogRepository<S> {
    type Item = ApiCallLogRecord;

    /// A first start persists the seed logs; an unreadable document is
    /// replaced by the seed logs in memory only.
    fn load(&self) -> Vec<ApiCallLogRecord> {
        match read_collection(&self.store, storage_keys::CALL_LOGS) {
            Stored::Present(logs) => logs,
            Stored::Absent => {
                let logs = seed_call_logs(Utc::now());
                if let Err(e) = self.save(&logs) {
                    logging::log_error("Could not persist initial call logs", Some(&e));
                }
                logs
            }
            Stored::Unusable(reason) => {
                logging::log_storage_fallback(storage_keys::CALL_LOGS, &reason);
                seed_call_logs(Utc::now())
            }
        }
    }

    fn save(&self, items: &[ApiCallLogRecord]) -> Result<()> {
        write_collection(&self.store, storage_keys::CALL_LOGS, items)
    }
}
