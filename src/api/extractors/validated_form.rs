//! Validated form extractor - Collects form fields, then validates them.
//!
//! Accepts `application/x-www-form-urlencoded` and `multipart/form-data`
//! bodies. Validation failures become `AppError::Fields`, which renders the
//! field error document with a 400.

use std::collections::HashMap;

use axum::{
    async_trait,
    extract::{FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
    Form,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use validator::Validate;

use crate::errors::AppError;
use crate::types::{FormErrors, REQUIRED_MESSAGE};

/// A typed form with a list of fields that must be present.
///
/// Missing required fields report `"Required"`; every other rule comes from
/// the `Validate` derive.
pub trait FormSchema: DeserializeOwned + Validate {
    const REQUIRED: &'static [&'static str] = &[];
}

/// Raw submitted fields. When a name repeats, the first value wins.
#[derive(Debug, Default, Clone)]
pub struct FormFields(pub HashMap<String, String>);

#[async_trait]
impl<S> FromRequest<S> for FormFields
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("multipart/form-data") {
            let mut multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| AppError::bad_request(e.body_text()))?;

            let mut fields = HashMap::new();
            while let Some(field) = multipart
                .next_field()
                .await
                .map_err(|e| AppError::bad_request(e.body_text()))?
            {
                // File uploads are not form values
                if field.file_name().is_some() {
                    continue;
                }
                let Some(name) = field.name().map(str::to_owned) else {
                    continue;
                };
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::bad_request(e.body_text()))?;
                fields.entry(name).or_insert(value);
            }

            Ok(FormFields(fields))
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state)
                .await
                .map_err(|e| AppError::bad_request(e.body_text()))?;

            let mut fields = HashMap::new();
            for (name, value) in pairs {
                fields.entry(name).or_insert(value);
            }

            Ok(FormFields(fields))
        } else {
            Err(AppError::bad_request(
                "Expected a urlencoded or multipart form submission",
            ))
        }
    }
}

impl FormFields {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Validate the fields into `T`.
    pub fn validate<T: FormSchema>(self) -> Result<T, AppError> {
        let mut errors = FormErrors::default();
        let mut object: Map<String, Value> = self
            .0
            .into_iter()
            .map(|(name, value)| (name, Value::String(value)))
            .collect();

        // Placeholders keep deserialization going so every field is reported
        for name in T::REQUIRED {
            if !object.contains_key(*name) {
                errors.add(*name, REQUIRED_MESSAGE);
                object.insert((*name).to_string(), Value::String(String::new()));
            }
        }

        let value: T = serde_json::from_value(Value::Object(object))
            .map_err(|e| AppError::bad_request(e.to_string()))?;

        if let Err(validation) = value.validate() {
            errors.extend_from_validation(&validation);
        }

        if errors.is_empty() {
            Ok(value)
        } else {
            Err(AppError::Fields(errors))
        }
    }
}

/// Validated form extractor.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Deserialize, Validate)]
/// struct NoteForm {
///     #[serde(default)]
///     #[validate(length(min = 1, message = "Title is required"))]
///     title: String,
/// }
///
/// impl FormSchema for NoteForm {}
///
/// async fn create(ValidatedForm(form): ValidatedForm<NoteForm>) {
///     // form is already validated
/// }
/// ```
pub struct ValidatedForm<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedForm<T>
where
    S: Send + Sync,
    T: FormSchema,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let fields = FormFields::from_request(req, state).await?;
        fields.validate().map(ValidatedForm)
    }
}

/// Checkbox semantics: `on`, `true`, `1` and `yes` mean checked.
pub fn is_checked(value: Option<&str>) -> bool {
    value
        .map(|v| v.trim().to_ascii_lowercase())
        .is_some_and(|v| matches!(v.as_str(), "on" | "true" | "1" | "yes"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    #[serde(rename_all = "camelCase")]
    struct Credentials {
        #[validate(email(message = "Invalid email"))]
        email: String,
        #[validate(length(min = 8, message = "Please use a longer password"))]
        password: String,
        #[serde(default)]
        redirect_to: Option<String>,
    }

    impl FormSchema for Credentials {
        const REQUIRED: &'static [&'static str] = &["email", "password"];
    }

    fn fields(pairs: &[(&str, &str)]) -> FormFields {
        FormFields(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    fn field_errors(result: Result<Credentials, AppError>) -> FormErrors {
        match result {
            Err(AppError::Fields(errors)) => errors,
            other => panic!("expected field errors, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_submission() {
        let form: Credentials = fields(&[
            ("email", "ada@example.com"),
            ("password", "correct horse"),
            ("redirectTo", "/notes"),
        ])
        .validate()
        .unwrap();

        assert_eq!(form.email, "ada@example.com");
        assert_eq!(form.redirect_to.as_deref(), Some("/notes"));
    }

    #[test]
    fn test_missing_fields_are_required() {
        let errors = field_errors(fields(&[]).validate());

        assert_eq!(errors.field_errors["email"], vec![REQUIRED_MESSAGE]);
        assert_eq!(errors.field_errors["password"], vec![REQUIRED_MESSAGE]);
    }

    #[test]
    fn test_rule_messages() {
        let errors = field_errors(
            fields(&[("email", "nope"), ("password", "short")]).validate(),
        );

        assert_eq!(errors.field_errors["email"], vec!["Invalid email"]);
        assert_eq!(
            errors.field_errors["password"],
            vec!["Please use a longer password"]
        );
    }

    #[test]
    fn test_checkbox_values() {
        assert!(is_checked(Some("on")));
        assert!(is_checked(Some("TRUE")));
        assert!(is_checked(Some("1")));
        assert!(is_checked(Some("yes")));
        assert!(!is_checked(Some("off")));
        assert!(!is_checked(Some("")));
        assert!(!is_checked(None));
    }
}
