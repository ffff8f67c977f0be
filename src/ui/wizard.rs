//! Interactive blueprint wizard
//!
//! Walks the user through the API authoring form one field at a time. Each
//! answer is checked against the same rules as a blueprint file, and the
//! finished form is validated again as a whole before it is returned.

use crate::catalog::blueprint::is_semantic_version;
use crate::catalog::{NewApiData, NewEndpoint};
use crate::core::constants::{form_rules, messages};
use crate::core::error::{CatalogError, Result};
use crate::core::types::HttpMethod;
use crate::ui::color::{Colors, colorize};
use crate::ui::output::render_field_errors;
use dialoguer::{Confirm, Input, Select, theme::ColorfulTheme};

/// Guided creation of a [`NewApiData`]
pub struct BlueprintWizard {
    theme: ColorfulTheme,
}

impl Default for BlueprintWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl BlueprintWizard {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }

    /// Ask for a blueprint until it is valid or the user gives up.
    pub fn run(&self) -> Result<NewApiData> {
        self.display_welcome();

        let mut blueprint = NewApiData::default();
        loop {
            blueprint = self.collect_details(&blueprint)?;
            blueprint.endpoints = self.collect_endpoints(&blueprint.endpoints)?;

            match blueprint.validate() {
                Ok(()) => return Ok(blueprint),
                Err(errors) => {
                    println!("\n{}", render_field_errors(&errors));
                    let retry = Confirm::with_theme(&self.theme)
                        .with_prompt("Edit the blueprint again?")
                        .default(true)
                        .interact()?;
                    if !retry {
                        return Err(CatalogError::InvalidArgument(
                            "Blueprint creation cancelled".to_string(),
                        ));
                    }
                }
            }
        }
    }

    fn display_welcome(&self) {
        println!(
            "\n{}",
            colorize("📘 Create a new API blueprint", Colors::BRIGHT_CYAN)
        );
        println!(
            "{}\n",
            colorize(
                "Describe the API and list at least one endpoint.",
                Colors::CYAN
            )
        );
    }

    fn collect_details(&self, current: &NewApiData) -> Result<NewApiData> {
        let name: String = Input::with_theme(&self.theme)
            .with_prompt("API name")
            .with_initial_text(current.name.clone())
            .validate_with(|input: &String| validate_name(input))
            .interact_text()?;

        let version: String = Input::with_theme(&self.theme)
            .with_prompt("Version")
            .default(current.version.clone())
            .validate_with(|input: &String| validate_version(input))
            .interact_text()?;

        let description: String = Input::with_theme(&self.theme)
            .with_prompt("Description")
            .with_initial_text(current.description.clone())
            .validate_with(|input: &String| validate_description(input))
            .interact_text()?;

        Ok(NewApiData {
            name,
            version,
            description,
            endpoints: current.endpoints.clone(),
        })
    }

    fn collect_endpoints(&self, current: &[NewEndpoint]) -> Result<Vec<NewEndpoint>> {
        println!("\n{}", colorize("🔌 Endpoints", Colors::BRIGHT_WHITE));

        let mut endpoints = Vec::new();
        for (index, existing) in current.iter().enumerate() {
            let keep = Confirm::with_theme(&self.theme)
                .with_prompt(format!(
                    "Keep endpoint {} {} {}?",
                    index + 1,
                    existing.method,
                    existing.path
                ))
                .default(true)
                .interact()?;
            if keep {
                endpoints.push(existing.clone());
            }
        }

        loop {
            let add_more = endpoints.is_empty()
                || Confirm::with_theme(&self.theme)
                    .with_prompt("Add another endpoint?")
                    .default(false)
                    .interact()?;
            if !add_more {
                return Ok(endpoints);
            }
            endpoints.push(self.collect_endpoint()?);
        }
    }

    fn collect_endpoint(&self) -> Result<NewEndpoint> {
        let method_names: Vec<&str> = HttpMethod::ALL.iter().map(|m| m.as_str()).collect();
        let selection = Select::with_theme(&self.theme)
            .with_prompt("Method")
            .items(&method_names)
            .default(0)
            .interact()?;

        let path: String = Input::with_theme(&self.theme)
            .with_prompt("Path")
            .with_initial_text("/")
            .validate_with(|input: &String| validate_path(input))
            .interact_text()?;

        let summary: String = Input::with_theme(&self.theme)
            .with_prompt("Summary")
            .validate_with(|input: &String| validate_summary(input))
            .interact_text()?;

        Ok(NewEndpoint {
            path,
            method: HttpMethod::ALL[selection],
            summary,
        })
    }
}

fn validate_name(input: &str) -> std::result::Result<(), &'static str> {
    if input.chars().count() >= form_rules::API_NAME_MIN_CHARS {
        Ok(())
    } else {
        Err(messages::NAME_TOO_SHORT)
    }
}

fn validate_version(input: &str) -> std::result::Result<(), &'static str> {
    if is_semantic_version(input) {
        Ok(())
    } else {
        Err(messages::VERSION_FORMAT)
    }
}

fn validate_description(input: &str) -> std::result::Result<(), &'static str> {
    if input.chars().count() >= form_rules::API_DESCRIPTION_MIN_CHARS {
        Ok(())
    } else {
        Err(messages::DESCRIPTION_TOO_SHORT)
    }
}

fn validate_path(input: &str) -> std::result::Result<(), &'static str> {
    if input.starts_with('/') {
        Ok(())
    } else {
        Err(messages::PATH_MUST_START_WITH_SLASH)
    }
}

fn validate_summary(input: &str) -> std::result::Result<(), &'static str> {
    if input.is_empty() {
        Err(messages::SUMMARY_REQUIRED)
    } else {
        Ok(())
    }
}

/// Run the wizard with the default theme
pub fn run_blueprint_wizard() -> Result<NewApiData> {
    BlueprintWizard::new().run()
}
