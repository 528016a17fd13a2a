use serde::{Deserialize, Serialize};

use crate::domain::product::Product;

/// Domain representation of a product category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    /// Unique identifier of the category.
    pub id: i32,
    /// Human-readable name of the category.
    pub category_name: String,
}

/// Category together with every product filed under it.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryWithProducts {
    pub id: i32,
    pub category_name: String,
    pub products: Vec<Product>,
}

impl CategoryWithProducts {
    pub fn new(category: Category, products: Vec<Product>) -> Self {
        Self {
            id: category.id,
            category_name: category.category_name,
            products,
        }
    }
}

/// Payload required to insert a new category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    /// Human-readable name of the category.
    pub category_name: String,
}

impl NewCategory {
    pub fn new(category_name: impl Into<String>) -> Self {
        Self {
            category_name: category_name.into(),
        }
    }
}

/// Patch data applied when updating an existing category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateCategory {
    /// Updated name; `None` leaves the name untouched.
    pub category_name: Option<String>,
}

impl UpdateCategory {
    /// Whether the patch carries no column changes.
    pub fn is_empty(&self) -> bool {
        self.category_name.is_none()
    }
}
