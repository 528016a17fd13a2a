//! JSON request payloads and their conversion into domain types.

use serde::{Deserialize, Deserializer};

pub mod categories;
pub mod products;
pub mod tags;

/// Maximum allowed length for category, product and tag names.
pub(crate) const NAME_MAX_LEN: usize = 128;
pub(crate) const NAME_MAX_LEN_VALIDATOR: u64 = NAME_MAX_LEN as u64;

/// Distinguish an explicit `null` (`Some(None)`) from an absent field (`None`).
///
/// Use together with `#[serde(default)]`.
pub(crate) fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Trim the input, collapse whitespace runs into single spaces and drop control characters.
pub(crate) fn sanitize_inline_text(input: &str) -> String {
    let mut sanitized = String::with_capacity(input.len());
    let mut previous_whitespace = false;

    for ch in input.trim().chars() {
        if ch.is_whitespace() {
            if !previous_whitespace {
                sanitized.push(' ');
                previous_whitespace = true;
            }
        } else if ch.is_control() {
            continue;
        } else {
            sanitized.push(ch);
            previous_whitespace = false;
        }
    }

    sanitized
}
