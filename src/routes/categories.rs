use actix_web::{HttpResponse, Responder, delete, get, post, put, web};

use crate::forms::categories::{AddCategoryForm, EditCategoryForm};
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::categories::{
    create_category, list_categories, load_category, modify_category, remove_category,
};

#[get("/categories")]
pub async fn show_categories(repo: web::Data<DieselRepository>) -> impl Responder {
    match list_categories(repo.get_ref()) {
        Ok(categories) => HttpResponse::Ok().json(categories),
        Err(err) => error_response("categories", err),
    }
}

#[get("/categories/{category_id}")]
pub async fn show_category(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let category_id = path.into_inner();

    match load_category(repo.get_ref(), category_id) {
        Ok(category) => HttpResponse::Ok().json(category),
        Err(err) => error_response(&format!("category {category_id}"), err),
    }
}

#[post("/categories")]
pub async fn add_category(
    repo: web::Data<DieselRepository>,
    form: web::Json<AddCategoryForm>,
) -> impl Responder {
    match create_category(repo.get_ref(), form.into_inner()) {
        Ok(category) => {
            log::info!("Created category {}", category.id);
            HttpResponse::Ok().json(category)
        }
        Err(err) => error_response("new category", err),
    }
}

#[put("/categories/{category_id}")]
pub async fn edit_category(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    form: web::Json<EditCategoryForm>,
) -> impl Responder {
    let category_id = path.into_inner();

    match modify_category(repo.get_ref(), category_id, form.into_inner()) {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(err) => error_response(&format!("category {category_id}"), err),
    }
}

#[delete("/categories/{category_id}")]
pub async fn delete_category(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let category_id = path.into_inner();

    match remove_category(repo.get_ref(), category_id) {
        Ok(result) => {
            log::info!("Deleted category {category_id}");
            HttpResponse::Ok().json(result)
        }
        Err(err) => error_response(&format!("category {category_id}"), err),
    }
}
