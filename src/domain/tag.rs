use serde::{Deserialize, Serialize};

use crate::domain::product::Product;

/// Domain representation of a reusable tag that can be attached to multiple products.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tag {
    /// Unique identifier of the tag.
    pub id: i32,
    /// Human-readable name of the tag.
    pub tag_name: Option<String>,
}

/// Tag together with every product it is attached to.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TagWithProducts {
    pub id: i32,
    pub tag_name: Option<String>,
    pub products: Vec<Product>,
}

impl TagWithProducts {
    pub fn new(tag: Tag, products: Vec<Product>) -> Self {
        Self {
            id: tag.id,
            tag_name: tag.tag_name,
            products,
        }
    }
}

/// Payload required to insert a new tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTag {
    /// Human-readable name of the tag.
    pub tag_name: Option<String>,
    /// Products the tag is attached to as part of its creation.
    pub product_ids: Vec<i32>,
}

impl NewTag {
    /// Construct a new tag payload with a trimmed name.
    pub fn new(tag_name: impl Into<String>) -> Self {
        let tag_name = tag_name.into().trim().to_string();
        Self {
            tag_name: Some(tag_name),
            product_ids: Vec::new(),
        }
    }

    pub fn with_product_ids(mut self, product_ids: impl Into<Vec<i32>>) -> Self {
        self.product_ids = product_ids.into();
        self
    }
}

/// Patch data applied when updating an existing tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTag {
    /// Updated name; `None` leaves the name untouched and `Some(None)` clears it.
    pub tag_name: Option<Option<String>>,
    /// Full set of products the tag should end up attached to; `None` keeps the
    /// current links.
    pub product_ids: Option<Vec<i32>>,
}

impl UpdateTag {
    pub fn has_no_column_changes(&self) -> bool {
        self.tag_name.is_none()
    }
}
