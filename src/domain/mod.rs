use serde::Serialize;

use crate::domain::product_tag::{LinkChanges, ProductTag};

pub mod category;
pub mod product;
pub mod product_tag;
pub mod tag;

/// Result of creating a record that may carry product-tag links.
///
/// Serializes as the bare record when no links were requested and as the list
/// of created links otherwise.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum Created<T> {
    Record(T),
    Links(Vec<ProductTag>),
}

impl<T> Created<T> {
    /// Pick the response shape for a record and the links created with it.
    pub fn from_parts(record: T, links: Vec<ProductTag>) -> Self {
        if links.is_empty() {
            Created::Record(record)
        } else {
            Created::Links(links)
        }
    }
}

/// Outcome of an update issued against a single record.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct UpdateResult {
    /// Number of rows matched by the update.
    pub affected_rows: usize,
    /// Link changes applied while reconciling associations, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<LinkChanges>,
}

impl UpdateResult {
    pub fn rows(affected_rows: usize) -> Self {
        Self {
            affected_rows,
            links: None,
        }
    }

    pub fn with_links(mut self, links: LinkChanges) -> Self {
        self.links = Some(links);
        self
    }
}

/// Outcome of a delete issued against a single record.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct DeleteResult {
    /// Number of rows removed.
    pub affected_rows: usize,
}
