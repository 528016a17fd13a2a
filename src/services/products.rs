use crate::domain::product::{Product, ProductDetails};
use crate::domain::{Created, DeleteResult, UpdateResult};
use crate::forms::products::{AddProductForm, EditProductForm};
use crate::repository::{ProductReader, ProductWriter};
use crate::services::{ServiceError, ServiceResult};

/// Lists every product with its category and tags.
pub fn list_products<R>(repo: &R) -> ServiceResult<Vec<ProductDetails>>
where
    R: ProductReader + ?Sized,
{
    repo.list_products().map_err(ServiceError::from)
}

/// Loads a single product with its category and tags.
pub fn load_product<R>(repo: &R, product_id: i32) -> ServiceResult<ProductDetails>
where
    R: ProductReader + ?Sized,
{
    repo.get_product_by_id(product_id)?
        .ok_or(ServiceError::NotFound)
}

/// Creates a product and links it to the requested tags.
///
/// Returns the created links when tags were requested and the product otherwise.
pub fn create_product<R>(repo: &R, form: AddProductForm) -> ServiceResult<Created<Product>>
where
    R: ProductWriter + ?Sized,
{
    let new_product = form
        .into_new_product()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let (product, links) = repo.create_product(&new_product)?;

    Ok(Created::from_parts(product, links))
}

/// Updates a product and, when `tagIds` is present, reconciles its tags to
/// exactly that set.
pub fn modify_product<R>(
    repo: &R,
    product_id: i32,
    form: EditProductForm,
) -> ServiceResult<UpdateResult>
where
    R: ProductWriter + ?Sized,
{
    let update = form
        .into_update_product()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let result = repo.update_product(product_id, &update)?;
    if result.affected_rows == 0 {
        return Err(ServiceError::NotFound);
    }

    Ok(result)
}

/// Deletes a product together with its tag links.
pub fn remove_product<R>(repo: &R, product_id: i32) -> ServiceResult<DeleteResult>
where
    R: ProductWriter + ?Sized,
{
    match repo.delete_product(product_id)? {
        0 => Err(ServiceError::NotFound),
        affected_rows => Ok(DeleteResult { affected_rows }),
    }
}
