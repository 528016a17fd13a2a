use diesel::prelude::*;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::domain::product::{
    NewProduct as DomainNewProduct, Product as DomainProduct, UpdateProduct as DomainUpdateProduct,
};

/// Number of fractional digits kept for prices.
pub const PRICE_SCALE: u32 = 2;

#[derive(Debug, Clone, Identifiable, Queryable, Associations, Selectable)]
#[diesel(
    table_name = crate::schema::products,
    belongs_to(super::category::Category, foreign_key = category_id)
)]
pub struct Product {
    pub id: i32,
    pub product_name: String,
    pub price_cents: i64,
    pub stock: i32,
    pub category_id: Option<i32>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::products)]
pub struct NewProduct<'a> {
    pub product_name: &'a str,
    pub price_cents: i64,
    pub stock: i32,
    pub category_id: Option<i32>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::products)]
pub struct UpdateProduct<'a> {
    pub product_name: Option<&'a str>,
    pub price_cents: Option<i64>,
    pub stock: Option<i32>,
    pub category_id: Option<Option<i32>>,
}

/// Convert a price into the integer cents stored in the database.
///
/// Prices are validated against a maximum before reaching this point, so the
/// saturation only guards values that bypassed the forms.
pub fn price_to_cents(price: Decimal) -> i64 {
    (price.round_dp(PRICE_SCALE) * Decimal::ONE_HUNDRED)
        .trunc()
        .to_i64()
        .unwrap_or(if price.is_sign_negative() {
            i64::MIN
        } else {
            i64::MAX
        })
}

/// Convert stored cents back into a two-digit decimal price.
pub fn cents_to_price(cents: i64) -> Decimal {
    Decimal::new(cents, PRICE_SCALE)
}

impl From<Product> for DomainProduct {
    fn from(value: Product) -> Self {
        Self {
            id: value.id,
            product_name: value.product_name,
            price: cents_to_price(value.price_cents),
            stock: value.stock,
            category_id: value.category_id,
        }
    }
}

impl<'a> From<&'a DomainNewProduct> for NewProduct<'a> {
    fn from(value: &'a DomainNewProduct) -> Self {
        Self {
            product_name: value.product_name.as_str(),
            price_cents: price_to_cents(value.price),
            stock: value.stock,
            category_id: value.category_id,
        }
    }
}

impl<'a> From<&'a DomainUpdateProduct> for UpdateProduct<'a> {
    fn from(value: &'a DomainUpdateProduct) -> Self {
        Self {
            product_name: value.product_name.as_deref(),
            price_cents: value.price.map(price_to_cents),
            stock: value.stock,
            category_id: value.category_id,
        }
    }
}
