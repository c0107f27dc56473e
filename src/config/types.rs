use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::types::ElementKind;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "catalogKinds[0]")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Settings controlling reconciliation behavior.
///
/// Which sites and content types participate in crossposting at all is
/// decided outside this crate; these settings only tell the resolver which
/// element kinds are catalog items (and therefore matched by catalog code
/// plus language instead of the identity association).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SyncSettings {
    /// Element kinds resolved by the catalog-code strategy.
    pub catalog_kinds: Vec<String>,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            catalog_kinds: vec![
                "post:product".to_string(),
                "post:product_variation".to_string(),
            ],
        }
    }
}

impl SyncSettings {
    /// Whether `kind` is resolved by catalog code.
    #[must_use]
    pub fn is_catalog_kind(&self, kind: &ElementKind) -> bool {
        self.catalog_kinds.iter().any(|catalog_kind| catalog_kind == kind.as_str())
    }

    /// # Errors
    /// - A catalog kind is empty
    /// - A catalog kind is missing the `family:name` separator
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        for (index, kind) in self.catalog_kinds.iter().enumerate() {
            if kind.is_empty() {
                errors.push(ValidationError::new(
                    format!("catalogKinds[{index}]"),
                    "The kind cannot be empty. Example: \"post:product\"",
                ));
            } else if !kind.contains(':') {
                errors.push(ValidationError::new(
                    format!("catalogKinds[{index}]"),
                    format!("Invalid kind '{kind}': expected \"family:name\", e.g. \"post:product\""),
                ));
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;

    #[rstest]
    fn validate_valid_settings() {
        let settings = SyncSettings::default();

        assert_that!(settings.validate(), ok(anything()));
    }

    #[rstest]
    fn deserialize_empty_settings() {
        let json = "{}";

        let settings: SyncSettings = serde_json::from_str(json).unwrap();

        assert_that!(
            settings.catalog_kinds,
            elements_are![eq("post:product"), eq("post:product_variation")]
        );
    }

    #[rstest]
    fn deserialize_overrides_catalog_kinds() {
        let json = r#"{"catalogKinds": ["post:book"]}"#;

        let settings: SyncSettings = serde_json::from_str(json).unwrap();

        assert_that!(settings.is_catalog_kind(&ElementKind::new("post:book")), eq(true));
        assert_that!(settings.is_catalog_kind(&ElementKind::new("post:product")), eq(false));
    }

    #[rstest]
    fn validate_invalid_catalog_kind_empty() {
        let settings = SyncSettings { catalog_kinds: vec![String::new()] };

        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![all![
                field!(ValidationError.field_path, eq("catalogKinds[0]")),
                field!(ValidationError.message, contains_substring("cannot be empty"))
            ]])
        );
    }

    #[rstest]
    fn validate_invalid_catalog_kind_missing_separator() {
        let settings = SyncSettings { catalog_kinds: vec!["product".to_string()] };

        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![all![
                field!(ValidationError.field_path, eq("catalogKinds[0]")),
                field!(ValidationError.message, contains_substring("family:name"))
            ]])
        );
    }

    #[rstest]
    fn config_error_validation_errors_format() {
        let settings = SyncSettings { catalog_kinds: vec![String::new(), "product".to_string()] };

        let errors = settings.validate().unwrap_err();
        let config_error = ConfigError::ValidationErrors(errors);

        let error_message = format!("{config_error}");
        assert_that!(error_message, contains_substring("Configuration validation failed"));
        assert_that!(error_message, contains_substring("1. catalogKinds[0]"));
        assert_that!(error_message, contains_substring("2. catalogKinds[1]"));
    }
}
