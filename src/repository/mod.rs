use crate::db::{DbConnection, DbPool};
use crate::domain::category::{Category, CategoryWithProducts, NewCategory, UpdateCategory};
use crate::domain::product::{NewProduct, Product, ProductDetails, UpdateProduct};
use crate::domain::product_tag::ProductTag;
use crate::domain::tag::{NewTag, Tag, TagWithProducts, UpdateTag};
use crate::domain::UpdateResult;
use crate::repository::errors::RepositoryResult;

pub mod category;
pub mod errors;
pub mod product;
pub mod product_tag;
pub mod tag;

#[cfg(test)]
pub mod mock;

#[derive(Clone)]
/// Diesel-backed repository implementation that wraps an r2d2 pool.
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository using the provided connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Read-only operations over category records.
pub trait CategoryReader {
    fn list_categories(&self) -> RepositoryResult<Vec<CategoryWithProducts>>;
    fn get_category_by_id(&self, id: i32) -> RepositoryResult<Option<CategoryWithProducts>>;
}

/// Write operations over category records.
///
/// Updates and deletes report the number of rows they matched.
pub trait CategoryWriter {
    fn create_category(&self, new_category: &NewCategory) -> RepositoryResult<Category>;
    fn update_category(
        &self,
        category_id: i32,
        updates: &UpdateCategory,
    ) -> RepositoryResult<usize>;
    fn delete_category(&self, category_id: i32) -> RepositoryResult<usize>;
}

/// Read-only operations over products, with their category and tags attached.
pub trait ProductReader {
    fn list_products(&self) -> RepositoryResult<Vec<ProductDetails>>;
    fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<ProductDetails>>;
}

/// Write operations over products and the links they own.
pub trait ProductWriter {
    /// Insert the product and link it to `new_product.tag_ids` in one transaction.
    fn create_product(
        &self,
        new_product: &NewProduct,
    ) -> RepositoryResult<(Product, Vec<ProductTag>)>;
    /// Apply the column changes and, when `updates.tag_ids` is set, reconcile the
    /// product's links to exactly that set, all in one transaction.
    fn update_product(
        &self,
        product_id: i32,
        updates: &UpdateProduct,
    ) -> RepositoryResult<UpdateResult>;
    fn delete_product(&self, product_id: i32) -> RepositoryResult<usize>;
}

/// Read-only operations over tags, with their products attached.
pub trait TagReader {
    fn list_tags(&self) -> RepositoryResult<Vec<TagWithProducts>>;
    fn get_tag_by_id(&self, id: i32) -> RepositoryResult<Option<TagWithProducts>>;
}

/// Write operations over tags and the links they own.
pub trait TagWriter {
    /// Insert the tag and link it to `new_tag.product_ids` in one transaction.
    fn create_tag(&self, new_tag: &NewTag) -> RepositoryResult<(Tag, Vec<ProductTag>)>;
    /// Apply the column changes and, when `updates.product_ids` is set,
    /// reconcile the tag's links to exactly that set, all in one transaction.
    fn update_tag(&self, tag_id: i32, updates: &UpdateTag) -> RepositoryResult<UpdateResult>;
    fn delete_tag(&self, tag_id: i32) -> RepositoryResult<usize>;
}
