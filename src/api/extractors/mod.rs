//! Custom extractors.

mod current_user;
mod validated_form;

pub use current_user::{OptionalUser, RequireUser};
pub use validated_form::{is_checked, FormFields, FormSchema, ValidatedForm};
