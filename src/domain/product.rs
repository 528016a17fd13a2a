use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::category::Category;
use crate::domain::tag::Tag;

/// Domain representation of a product row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Product {
    /// Unique identifier of the product.
    pub id: i32,
    /// Human-readable name of the product.
    pub product_name: String,
    /// Unit price with two fractional digits.
    pub price: Decimal,
    /// Units currently in stock.
    pub stock: i32,
    /// Category the product is filed under, if any.
    pub category_id: Option<i32>,
}

/// Product projection returned by the product endpoints: the scalar columns,
/// the owning category and every attached tag.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ProductDetails {
    pub id: i32,
    pub product_name: String,
    pub price: Decimal,
    pub stock: i32,
    pub category: Option<Category>,
    pub tags: Vec<Tag>,
}

impl ProductDetails {
    pub fn new(product: Product, category: Option<Category>, tags: Vec<Tag>) -> Self {
        Self {
            id: product.id,
            product_name: product.product_name,
            price: product.price,
            stock: product.stock,
            category,
            tags,
        }
    }
}

/// Payload required to insert a new product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    /// Human-readable name of the product.
    pub product_name: String,
    /// Unit price with two fractional digits.
    pub price: Decimal,
    /// Units in stock.
    pub stock: i32,
    /// Optional owning category.
    pub category_id: Option<i32>,
    /// Tags linked to the product as part of its creation.
    pub tag_ids: Vec<i32>,
}

impl NewProduct {
    /// Build a product payload with no stock, category or tags.
    pub fn new(product_name: impl Into<String>, price: Decimal) -> Self {
        Self {
            product_name: product_name.into(),
            price,
            stock: 0,
            category_id: None,
            tag_ids: Vec::new(),
        }
    }

    pub fn with_stock(mut self, stock: i32) -> Self {
        self.stock = stock;
        self
    }

    pub fn with_category_id(mut self, category_id: i32) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn with_tag_ids(mut self, tag_ids: impl Into<Vec<i32>>) -> Self {
        self.tag_ids = tag_ids.into();
        self
    }
}

/// Patch data applied when updating an existing product.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateProduct {
    /// Optional name update.
    pub product_name: Option<String>,
    /// Optional price update.
    pub price: Option<Decimal>,
    /// Optional stock update.
    pub stock: Option<i32>,
    /// Optional category update; `Some(None)` detaches the product.
    pub category_id: Option<Option<i32>>,
    /// Full set of tags the product should end up linked to; `None` keeps the
    /// current links.
    pub tag_ids: Option<Vec<i32>>,
}

impl UpdateProduct {
    /// Create a patch with no changes applied yet.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn product_name(mut self, product_name: impl Into<String>) -> Self {
        self.product_name = Some(product_name.into());
        self
    }

    pub fn price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    pub fn stock(mut self, stock: i32) -> Self {
        self.stock = Some(stock);
        self
    }

    /// Move the product to a category, using `None` to detach it.
    pub fn category_id(mut self, category_id: Option<i32>) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn tag_ids(mut self, tag_ids: impl Into<Vec<i32>>) -> Self {
        self.tag_ids = Some(tag_ids.into());
        self
    }

    /// Whether the patch leaves every product column untouched.
    pub fn has_no_column_changes(&self) -> bool {
        self.product_name.is_none()
            && self.price.is_none()
            && self.stock.is_none()
            && self.category_id.is_none()
    }
}
