use crate::domain::category::{Category, CategoryWithProducts};
use crate::domain::{DeleteResult, UpdateResult};
use crate::forms::categories::{AddCategoryForm, EditCategoryForm};
use crate::repository::{CategoryReader, CategoryWriter};
use crate::services::{ServiceError, ServiceResult};

/// Lists every category with its products.
pub fn list_categories<R>(repo: &R) -> ServiceResult<Vec<CategoryWithProducts>>
where
    R: CategoryReader + ?Sized,
{
    repo.list_categories().map_err(ServiceError::from)
}

/// Loads a single category with its products.
pub fn load_category<R>(repo: &R, category_id: i32) -> ServiceResult<CategoryWithProducts>
where
    R: CategoryReader + ?Sized,
{
    repo.get_category_by_id(category_id)?
        .ok_or(ServiceError::NotFound)
}

/// Creates a new category.
pub fn create_category<R>(repo: &R, form: AddCategoryForm) -> ServiceResult<Category>
where
    R: CategoryWriter + ?Sized,
{
    let new_category = form
        .into_new_category()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.create_category(&new_category).map_err(ServiceError::from)
}

/// Updates an existing category.
pub fn modify_category<R>(
    repo: &R,
    category_id: i32,
    form: EditCategoryForm,
) -> ServiceResult<UpdateResult>
where
    R: CategoryWriter + ?Sized,
{
    let update = form
        .into_update_category()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    match repo.update_category(category_id, &update)? {
        0 => Err(ServiceError::NotFound),
        affected_rows => Ok(UpdateResult::rows(affected_rows)),
    }
}

/// Deletes a category; its products stay and lose their category.
pub fn remove_category<R>(repo: &R, category_id: i32) -> ServiceResult<DeleteResult>
where
    R: CategoryWriter + ?Sized,
{
    match repo.delete_category(category_id)? {
        0 => Err(ServiceError::NotFound),
        affected_rows => Ok(DeleteResult { affected_rows }),
    }
}
