//! Field-level form errors returned by failed actions.

use std::collections::BTreeMap;

use serde::Serialize;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Message used when a required field is absent from the submission.
pub const REQUIRED_MESSAGE: &str = "Required";

/// Errors keyed by field name, plus errors not tied to a single field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FormErrors {
    pub form_errors: Vec<String>,
    pub field_errors: BTreeMap<String, Vec<String>>,
}

impl FormErrors {
    /// Single error on a single field.
    pub fn field(name: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.add(name, message);
        errors
    }

    pub fn add(&mut self, name: impl Into<String>, message: impl Into<String>) {
        self.field_errors
            .entry(name.into())
            .or_default()
            .push(message.into());
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.field_errors.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.form_errors.is_empty() && self.field_errors.is_empty()
    }

    /// Merge validator output, skipping fields that already carry an error.
    pub fn extend_from_validation(&mut self, errors: &ValidationErrors) {
        for (field, errs) in errors.field_errors().iter() {
            let field = field.to_string();
            if self.has_field(&field) {
                continue;
            }
            for e in errs.iter() {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field));
                self.add(field.clone(), message);
            }
        }
    }
}

/// Body of a failed action, mirroring what a form page re-renders from.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ActionData {
    pub errors: FormErrors,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Sample {
        #[validate(email(message = "Invalid email"))]
        email: String,
        #[validate(length(min = 8, message = "Please use a longer password"))]
        password: String,
    }

    #[test]
    fn test_serializes_flattened_shape() {
        let errors = FormErrors::field("email", "Invalid email");
        let json = serde_json::to_value(ActionData { errors }).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "errors": {
                    "formErrors": [],
                    "fieldErrors": { "email": ["Invalid email"] }
                }
            })
        );
    }

    #[test]
    fn test_extend_from_validation_collects_every_field() {
        let sample = Sample {
            email: "not-an-email".to_string(),
            password: "short".to_string(),
        };
        let mut errors = FormErrors::default();
        errors.extend_from_validation(&sample.validate().unwrap_err());

        assert_eq!(errors.field_errors["email"], vec!["Invalid email"]);
        assert_eq!(
            errors.field_errors["password"],
            vec!["Please use a longer password"]
        );
    }

    #[test]
    fn test_required_takes_precedence() {
        let sample = Sample {
            email: String::new(),
            password: "long-enough".to_string(),
        };
        let mut errors = FormErrors::field("email", REQUIRED_MESSAGE);
        errors.extend_from_validation(&sample.validate().unwrap_err());

        assert_eq!(errors.field_errors["email"], vec![REQUIRED_MESSAGE]);
        assert!(!errors.has_field("password"));
    }
}
