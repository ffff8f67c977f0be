//! API blueprints: the authoring form for new catalog entries
//!
//! A blueprint is validated as a whole. Every failing rule is reported under
//! the key of the field it concerns (`name`, `endpoints.0.path`, ...) and
//! nothing is added to the catalog until the blueprint is valid.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

use crate::core::constants::{form_rules, messages};
use crate::core::error::{CatalogError, Result};
use crate::core::types::{ApiDefinition, Endpoint, HttpMethod, OrderedMap};

static VERSION_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(form_rules::VERSION_PATTERN).expect("version pattern is a valid regex")
});

/// Whether `version` has the `MAJOR.MINOR.PATCH` shape.
pub fn is_semantic_version(version: &str) -> bool {
    VERSION_REGEX.is_match(version)
}

/// Field-keyed validation messages
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0
            .iter()
            .map(|(field, msgs)| (field.as_str(), msgs.as_slice()))
    }

    /// `Ok(())` when no rule failed, the collected errors otherwise.
    pub fn into_result(self) -> std::result::Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, msgs) in self.iter() {
            for msg in msgs {
                if !first {
                    writeln!(f)?;
                }
                write!(f, "{field}: {msg}")?;
                first = false;
            }
        }
        Ok(())
    }
}

/// One endpoint row of a blueprint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEndpoint {
    pub path: String,
    pub method: HttpMethod,
    pub summary: String,
}

impl NewEndpoint {
    pub fn new(method: HttpMethod, path: &str, summary: &str) -> Self {
        Self {
            path: path.to_string(),
            method,
            summary: summary.to_string(),
        }
    }

    /// Parse `"METHOD /path Summary text"`.
    pub fn parse(spec: &str) -> Result<Self> {
        let mut parts = spec.trim().splitn(3, char::is_whitespace);
        let method = parts.next().filter(|m| !m.is_empty()).ok_or_else(|| {
            CatalogError::InvalidArgument(format!(
                "Endpoint '{spec}' is empty. Expected 'METHOD /path Summary'"
            ))
        })?;
        let method = method
            .parse::<HttpMethod>()
            .map_err(|e| CatalogError::InvalidArgument(e.to_string()))?;
        let path = parts.next().unwrap_or_default();
        let summary = parts.next().unwrap_or_default().trim();

        Ok(Self::new(method, path, summary))
    }
}

/// Data of the API authoring form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewApiData {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub endpoints: Vec<NewEndpoint>,
}

impl Default for NewApiData {
    fn default() -> Self {
        Self {
            name: String::new(),
            version: "1.0.0".to_string(),
            description: String::new(),
            endpoints: vec![NewEndpoint::new(HttpMethod::Get, "/example", "Example endpoint")],
        }
    }
}

impl NewApiData {
    /// Load a blueprint from a JSON or TOML file, chosen by extension.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            CatalogError::InvalidArgument(format!(
                "Could not read blueprint file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let is_toml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        if is_toml {
            Ok(toml::from_str(&content)?)
        } else {
            Ok(serde_json::from_str(&content)?)
        }
    }

    /// Check every field rule and collect the failures.
    pub fn validate(&self) -> std::result::Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();

        if self.name.chars().count() < form_rules::API_NAME_MIN_CHARS {
            errors.add("name", messages::NAME_TOO_SHORT);
        }
        if !is_semantic_version(&self.version) {
            errors.add("version", messages::VERSION_FORMAT);
        }
        if self.description.chars().count() < form_rules::API_DESCRIPTION_MIN_CHARS {
            errors.add("description", messages::DESCRIPTION_TOO_SHORT);
        }
        if self.endpoints.is_empty() {
            errors.add("endpoints", messages::ENDPOINTS_REQUIRED);
        }
        for (index, endpoint) in self.endpoints.iter().enumerate() {
            if !endpoint.path.starts_with('/') {
                errors.add(
                    format!("endpoints.{index}.path"),
                    messages::PATH_MUST_START_WITH_SLASH,
                );
            }
            if endpoint.summary.is_empty() {
                errors.add(
                    format!("endpoints.{index}.summary"),
                    messages::SUMMARY_REQUIRED,
                );
            }
        }

        errors.into_result()
    }

    /// Build the catalog entry, filling endpoint defaults.
    ///
    /// Endpoints start without description, parameters, request body or
    /// responses, and the definition starts without schemas.
    pub fn into_definition(self, id: String) -> ApiDefinition {
        ApiDefinition {
            id,
            name: self.name,
            version: self.version,
            description: self.description,
            endpoints: self
                .endpoints
                .into_iter()
                .map(|endpoint| Endpoint {
                    path: endpoint.path,
                    method: endpoint.method,
                    summary: endpoint.summary,
                    description: String::new(),
                    parameters: Vec::new(),
                    request_body: None,
                    responses: OrderedMap::new(),
                })
                .collect(),
            schemas: OrderedMap::new(),
        }
    }
}
