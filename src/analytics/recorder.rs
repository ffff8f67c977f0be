use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::core::constants::limits;
use crate::core::error::Result;
use crate::core::types::{ApiCallLogRecord, NewCallLog};
use crate::reporting::logging;
use crate::storage::Repository;

/// Appends simulated calls to the persisted call log
pub struct CallLogRecorder<R> {
    logs: Arc<Vec<ApiCallLogRecord>>,
    repository: R,
}

impl<R: Repository<Item = ApiCallLogRecord>> CallLogRecorder<R> {
    pub fn load(repository: R) -> Self {
        let logs = Arc::new(repository.load());
        Self { logs, repository }
    }

    /// Current log, newest first.
    pub fn logs(&self) -> &Arc<Vec<ApiCallLogRecord>> {
        &self.logs
    }

    /// Stamp `entry` with a fresh id and the current time, prepend it and
    /// persist the log, keeping at most the 500 newest records.
    ///
    /// The in-memory log is left unchanged if persisting fails.
    pub fn record(&mut self, entry: NewCallLog) -> Result<ApiCallLogRecord> {
        let record = ApiCallLogRecord {
            id: Uuid::new_v4().to_string(),
            api_id: entry.api_id,
            endpoint_path: entry.endpoint_path,
            endpoint_method: entry.endpoint_method,
            user_id: entry.user_id,
            timestamp: Utc::now(),
        };

        let mut updated = Vec::with_capacity((self.logs.len() + 1).min(limits::MAX_CALL_LOGS));
        updated.push(record.clone());
        updated.extend(
            self.logs
                .iter()
                .take(limits::MAX_CALL_LOGS.saturating_sub(1))
                .cloned(),
        );

        self.repository.save(&updated)?;
        self.logs = Arc::new(updated);
        logging::log_call_recorded(&record);
        Ok(record)
    }
}
