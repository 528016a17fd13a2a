use crate::domain::tag::{Tag, TagWithProducts};
use crate::domain::{Created, DeleteResult, UpdateResult};
use crate::forms::tags::{AddTagForm, EditTagForm};
use crate::repository::{TagReader, TagWriter};
use crate::services::{ServiceError, ServiceResult};

/// Lists every tag with the products it is attached to.
pub fn list_tags<R>(repo: &R) -> ServiceResult<Vec<TagWithProducts>>
where
    R: TagReader + ?Sized,
{
    repo.list_tags().map_err(ServiceError::from)
}

/// Loads a single tag with the products it is attached to.
pub fn load_tag<R>(repo: &R, tag_id: i32) -> ServiceResult<TagWithProducts>
where
    R: TagReader + ?Sized,
{
    repo.get_tag_by_id(tag_id)?.ok_or(ServiceError::NotFound)
}

/// Creates a tag and attaches it to the requested products.
pub fn create_tag<R>(repo: &R, form: AddTagForm) -> ServiceResult<Created<Tag>>
where
    R: TagWriter + ?Sized,
{
    let new_tag = form
        .into_new_tag()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let (tag, links) = repo.create_tag(&new_tag)?;

    Ok(Created::from_parts(tag, links))
}

/// Updates a tag and, when `product_ids` is present, reconciles its products
/// to exactly that set.
pub fn modify_tag<R>(repo: &R, tag_id: i32, form: EditTagForm) -> ServiceResult<UpdateResult>
where
    R: TagWriter + ?Sized,
{
    let update = form
        .into_update_tag()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let result = repo.update_tag(tag_id, &update)?;
    if result.affected_rows == 0 {
        return Err(ServiceError::NotFound);
    }

    Ok(result)
}

/// Deletes a tag together with its product links.
pub fn remove_tag<R>(repo: &R, tag_id: i32) -> ServiceResult<DeleteResult>
where
    R: TagWriter + ?Sized,
{
    match repo.delete_tag(tag_id)? {
        0 => Err(ServiceError::NotFound),
        affected_rows => Ok(DeleteResult { affected_rows }),
    }
}
