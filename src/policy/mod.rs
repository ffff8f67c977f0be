//! AI-assisted governance policy suggestions
//!
//! A [`PolicyRequest`] describes an API in three free-text fields. It is
//! validated locally and, when valid, handed to a [`PolicyGenerator`]. The
//! outcome is always reported as a [`PolicyState`] carrying a user-facing
//! message; generator failures are logged and never surface as errors.

pub mod generator;

pub use generator::{HttpPolicyGenerator, PolicyGenerator, PolicySuggestion, build_prompt};

use serde::{Deserialize, Serialize};

use crate::catalog::FieldErrors;
use crate::core::constants::{form_rules, messages};
use crate::reporting::logging;

/// Input of the policy assistant
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyRequest {
    pub api_functionality: String,
    pub data_sensitivity: String,
    pub compliance_requirements: String,
}

impl PolicyRequest {
    pub fn validate(&self) -> std::result::Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.api_functionality.chars().count() < form_rules::FUNCTIONALITY_MIN_CHARS {
            errors.add("apiFunctionality", messages::FUNCTIONALITY_TOO_SHORT);
        }
        if self.data_sensitivity.chars().count() < form_rules::SENSITIVITY_MIN_CHARS {
            errors.add("dataSensitivity", messages::SENSITIVITY_TOO_SHORT);
        }
        if self.compliance_requirements.chars().count() < form_rules::COMPLIANCE_MIN_CHARS {
            errors.add("complianceRequirements", messages::COMPLIANCE_TOO_SHORT);
        }
        errors.into_result()
    }
}

/// Outcome of a policy request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PolicyState {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
}

impl PolicyState {
    fn message(message: &str) -> Self {
        Self {
            message: message.to_string(),
            ..Default::default()
        }
    }

    pub fn is_success(&self) -> bool {
        self.policy.is_some()
    }
}

/// Validate `request` and ask `generator` for policy suggestions.
///
/// The generator is not called when validation fails.
pub async fn generate_api_policy<G>(generator: &G, request: &PolicyRequest) -> PolicyState
where
    G: PolicyGenerator + ?Sized,
{
    if let Err(errors) = request.validate() {
        return PolicyState {
            errors: Some(errors),
            ..PolicyState::message(messages::POLICY_VALIDATION_FAILED)
        };
    }

    match generator.generate(request).await {
        Ok(suggestion) if !suggestion.suggested_policies.is_empty() => PolicyState {
            policy: Some(suggestion.suggested_policies),
            ..PolicyState::message(messages::POLICY_GENERATED)
        },
        Ok(_) => PolicyState::message(messages::POLICY_EMPTY),
        Err(e) => {
            logging::log_error("Policy generation failed", Some(&e));
            PolicyState::message(messages::POLICY_UNEXPECTED_ERROR)
        }
    }
}
