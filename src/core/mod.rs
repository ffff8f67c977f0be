//! Core types and foundational components
//!
//! This module contains the catalog data model, error handling,
//! and constants used throughout the application.

pub mod constants;
pub mod error;
pub mod types;

// Re-export commonly used items for convenience
pub use error::{CatalogError, Result};
pub use types::{
    ApiCallLogRecord, ApiDefinition, Endpoint, HttpMethod, MediaType, NewCallLog, OrderedMap,
    Parameter, ParameterLocation, RequestBody, ResponseObject, SchemaNode, SchemaType,
};
