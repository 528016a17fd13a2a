use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::tag::{NewTag, UpdateTag};
use crate::forms::{NAME_MAX_LEN_VALIDATOR, double_option, sanitize_inline_text};

/// Result type returned by the tag form helpers.
pub type TagFormResult<T> = Result<T, TagFormError>;

/// Errors that can occur while processing tag payloads.
#[derive(Debug, Error)]
pub enum TagFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
}

/// Body of `POST /api/tags`.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct AddTagForm {
    #[validate(length(max = NAME_MAX_LEN_VALIDATOR))]
    #[serde(default)]
    pub tag_name: Option<String>,
    /// Products to attach the new tag to; omitted means none.
    #[serde(default)]
    pub product_ids: Vec<i32>,
}

impl AddTagForm {
    /// Validates and sanitizes the payload into a domain `NewTag`.
    ///
    /// A blank name is stored as no name at all.
    pub fn into_new_tag(self) -> TagFormResult<NewTag> {
        self.validate()?;

        Ok(NewTag {
            tag_name: self.tag_name.as_deref().and_then(sanitize_tag_name),
            product_ids: self.product_ids,
        })
    }
}

/// Body of `PUT /api/tags/{id}`; absent fields are left untouched.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct EditTagForm {
    /// `null` or a blank string clears the name.
    #[validate(length(max = NAME_MAX_LEN_VALIDATOR))]
    #[serde(default, deserialize_with = "double_option")]
    pub tag_name: Option<Option<String>>,
    /// Complete set of products the tag should be attached to.
    #[serde(default)]
    pub product_ids: Option<Vec<i32>>,
}

impl EditTagForm {
    /// Validates and sanitizes the payload into a domain `UpdateTag`.
    pub fn into_update_tag(self) -> TagFormResult<UpdateTag> {
        self.validate()?;

        Ok(UpdateTag {
            tag_name: self
                .tag_name
                .map(|name| name.as_deref().and_then(sanitize_tag_name)),
            product_ids: self.product_ids,
        })
    }
}

fn sanitize_tag_name(name: &str) -> Option<String> {
    let sanitized = sanitize_inline_text(name);
    (!sanitized.is_empty()).then_some(sanitized)
}
