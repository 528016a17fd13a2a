use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::product::{NewProduct, UpdateProduct};
use crate::forms::{NAME_MAX_LEN_VALIDATOR, double_option, sanitize_inline_text};
use crate::models::product::PRICE_SCALE;

/// Largest accepted unit price, 9 999 999.99.
const PRICE_MAX: Decimal = Decimal::from_parts(999_999_999, 0, 0, false, 2);

/// Result type returned by the product form helpers.
pub type ProductFormResult<T> = Result<T, ProductFormError>;

/// Errors that can occur while processing product payloads.
#[derive(Debug, Error)]
pub enum ProductFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// The provided name is empty after sanitization.
    #[error("product name cannot be empty")]
    EmptyName,
    /// The price is negative or above the supported maximum.
    #[error("invalid price `{value}`")]
    InvalidPrice { value: Decimal },
}

/// Body of `POST /api/products`.
#[derive(Debug, Deserialize, Validate)]
pub struct AddProductForm {
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub product_name: String,
    pub price: Decimal,
    #[validate(range(min = 0))]
    #[serde(default)]
    pub stock: i32,
    #[serde(default)]
    pub category_id: Option<i32>,
    /// Tags to link the new product to; omitted means none.
    #[serde(default, rename = "tagIds")]
    pub tag_ids: Vec<i32>,
}

impl AddProductForm {
    /// Validates and sanitizes the payload into a domain `NewProduct`.
    pub fn into_new_product(self) -> ProductFormResult<NewProduct> {
        self.validate()?;

        let sanitized_name = sanitize_inline_text(&self.product_name);
        if sanitized_name.is_empty() {
            return Err(ProductFormError::EmptyName);
        }

        let price = normalize_price(self.price)?;

        let mut new_product = NewProduct::new(sanitized_name, price)
            .with_stock(self.stock)
            .with_tag_ids(self.tag_ids);

        if let Some(category_id) = self.category_id {
            new_product = new_product.with_category_id(category_id);
        }

        Ok(new_product)
    }
}

/// Body of `PUT /api/products/{id}`; absent fields are left untouched.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct EditProductForm {
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[validate(range(min = 0))]
    #[serde(default)]
    pub stock: Option<i32>,
    /// `null` detaches the product from its category.
    #[serde(default, deserialize_with = "double_option")]
    pub category_id: Option<Option<i32>>,
    /// Complete set of tags the product should be linked to.
    #[serde(default, rename = "tagIds")]
    pub tag_ids: Option<Vec<i32>>,
}

impl EditProductForm {
    /// Validates and sanitizes the payload into a domain `UpdateProduct`.
    pub fn into_update_product(self) -> ProductFormResult<UpdateProduct> {
        self.validate()?;

        let product_name = match self.product_name {
            Some(name) => {
                let sanitized = sanitize_inline_text(&name);
                if sanitized.is_empty() {
                    return Err(ProductFormError::EmptyName);
                }
                Some(sanitized)
            }
            None => None,
        };

        let price = self.price.map(normalize_price).transpose()?;

        Ok(UpdateProduct {
            product_name,
            price,
            stock: self.stock,
            category_id: self.category_id,
            tag_ids: self.tag_ids,
        })
    }
}

fn normalize_price(price: Decimal) -> ProductFormResult<Decimal> {
    let rounded = price.round_dp(PRICE_SCALE);
    if rounded < Decimal::ZERO || rounded > PRICE_MAX {
        return Err(ProductFormError::InvalidPrice { value: price });
    }

    Ok(rounded)
}
