use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::category::{NewCategory, UpdateCategory};
use crate::forms::{NAME_MAX_LEN_VALIDATOR, sanitize_inline_text};

/// Result type returned by the category form helpers.
pub type CategoryFormResult<T> = Result<T, CategoryFormError>;

/// Errors that can occur while processing category payloads.
#[derive(Debug, Error)]
pub enum CategoryFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// The provided name is empty after sanitization.
    #[error("category name cannot be empty")]
    EmptyName,
}

/// Body of `POST /api/categories`.
#[derive(Debug, Deserialize, Validate)]
pub struct AddCategoryForm {
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub category_name: String,
}

impl AddCategoryForm {
    /// Validates and sanitizes the payload into a domain `NewCategory`.
    pub fn into_new_category(self) -> CategoryFormResult<NewCategory> {
        self.validate()?;

        let sanitized_name = sanitize_inline_text(&self.category_name);
        if sanitized_name.is_empty() {
            return Err(CategoryFormError::EmptyName);
        }

        Ok(NewCategory::new(sanitized_name))
    }
}

/// Body of `PUT /api/categories/{id}`; absent fields are left untouched.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct EditCategoryForm {
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    #[serde(default)]
    pub category_name: Option<String>,
}

impl EditCategoryForm {
    /// Validates and sanitizes the payload into a domain `UpdateCategory`.
    pub fn into_update_category(self) -> CategoryFormResult<UpdateCategory> {
        self.validate()?;

        let category_name = match self.category_name {
            Some(name) => {
                let sanitized = sanitize_inline_text(&name);
                if sanitized.is_empty() {
                    return Err(CategoryFormError::EmptyName);
                }
                Some(sanitized)
            }
            None => None,
        };

        Ok(UpdateCategory { category_name })
    }
}
