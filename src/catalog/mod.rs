//! API definition catalog
//!
//! This module holds the collection of API definitions together with the
//! built-in seed data, the authoring form and the schema renderer used by
//! the documentation view.

pub mod blueprint;
pub mod schema;
pub mod seed;

pub use blueprint::{FieldErrors, NewApiData, NewEndpoint};
pub use schema::{SchemaView, render_schema, render_schema_html, schema_anchor};

use std::sync::Arc;
use uuid::Uuid;

use crate::core::error::{CatalogError, Result};
use crate::core::types::ApiDefinition;
use crate::storage::Repository;

/// Why a blueprint was not added
#[derive(Debug)]
pub enum AddApiError {
    /// One or more form rules failed
    Invalid(FieldErrors),
    /// The definition was valid but could not be persisted
    Storage(CatalogError),
}

impl std::fmt::Display for AddApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AddApiError::Invalid(errors) => write!(f, "Invalid API blueprint:\n{errors}"),
            AddApiError::Storage(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for AddApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AddApiError::Invalid(_) => None,
            AddApiError::Storage(e) => Some(e),
        }
    }
}

/// The loaded API definitions and the repository they persist to
pub struct Catalog<R> {
    apis: Arc<Vec<ApiDefinition>>,
    repository: R,
}

impl<R: Repository<Item = ApiDefinition>> Catalog<R> {
    /// Load the collection from the repository.
    pub fn load(repository: R) -> Self {
        let apis = Arc::new(repository.load());
        Self { apis, repository }
    }

    /// Shared handle to the current collection.
    ///
    /// A new handle is created on every mutation, so handle identity tells
    /// whether the collection changed.
    pub fn apis(&self) -> &Arc<Vec<ApiDefinition>> {
        &self.apis
    }

    pub fn find(&self, id: &str) -> Result<&ApiDefinition> {
        self.apis
            .iter()
            .find(|api| api.id == id)
            .ok_or_else(|| CatalogError::NotFound(format!("API '{id}'")))
    }

    /// Definitions whose name or description contains `query`, ignoring case.
    pub fn search(&self, query: &str) -> Vec<&ApiDefinition> {
        let needle = query.trim().to_lowercase();
        self.apis
            .iter()
            .filter(|api| {
                needle.is_empty()
                    || api.name.to_lowercase().contains(&needle)
                    || api.description.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Validate a blueprint, append it and persist the whole collection.
    pub fn add(&mut self, data: NewApiData) -> std::result::Result<ApiDefinition, AddApiError> {
        data.validate().map_err(AddApiError::Invalid)?;

        let api = data.into_definition(Uuid::new_v4().to_string());
        let mut updated = self.apis.as_ref().clone();
        updated.push(api.clone());

        self.repository
            .save(&updated)
            .map_err(AddApiError::Storage)?;
        self.apis = Arc::new(updated);
        Ok(api)
    }
}
