//! apicatalog - browse, document and monitor a catalog of API definitions
//!
//! The crate keeps a persisted collection of API definitions, renders their
//! documentation, records simulated calls for usage analytics and asks a
//! generative language API for governance policy suggestions.

pub mod analytics;
pub mod catalog;
pub mod config;
pub mod core;
pub mod policy;
pub mod reporting;
pub mod storage;
pub mod ui;

// Re-export commonly used items
pub use crate::core::{
    ApiCallLogRecord, ApiDefinition, CatalogError, Endpoint, HttpMethod, NewCallLog, Result,
    SchemaNode, SchemaType,
};
pub use analytics::{AnalyticsSummary, CallLogRecorder, MemoizedAnalytics, aggregate};
pub use catalog::{Catalog, FieldErrors, NewApiData, NewEndpoint};
pub use config::{CliConfig, Config};
pub use policy::{PolicyRequest, PolicyState, generate_api_policy};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
