use actix_web::{HttpResponse, Responder, delete, get, post, put, web};

use crate::forms::tags::{AddTagForm, EditTagForm};
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::tags::{create_tag, list_tags, load_tag, modify_tag, remove_tag};

#[get("/tags")]
pub async fn show_tags(repo: web::Data<DieselRepository>) -> impl Responder {
    match list_tags(repo.get_ref()) {
        Ok(tags) => HttpResponse::Ok().json(tags),
        Err(err) => error_response("tags", err),
    }
}

#[get("/tags/{tag_id}")]
pub async fn show_tag(path: web::Path<i32>, repo: web::Data<DieselRepository>) -> impl Responder {
    let tag_id = path.into_inner();

    match load_tag(repo.get_ref(), tag_id) {
        Ok(tag) => HttpResponse::Ok().json(tag),
        Err(err) => error_response(&format!("tag {tag_id}"), err),
    }
}

#[post("/tags")]
pub async fn add_tag(
    repo: web::Data<DieselRepository>,
    form: web::Json<AddTagForm>,
) -> impl Responder {
    match create_tag(repo.get_ref(), form.into_inner()) {
        Ok(created) => HttpResponse::Ok().json(created),
        Err(err) => error_response("new tag", err),
    }
}

#[put("/tags/{tag_id}")]
pub async fn edit_tag(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    form: web::Json<EditTagForm>,
) -> impl Responder {
    let tag_id = path.into_inner();

    match modify_tag(repo.get_ref(), tag_id, form.into_inner()) {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(err) => error_response(&format!("tag {tag_id}"), err),
    }
}

#[delete("/tags/{tag_id}")]
pub async fn delete_tag(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let tag_id = path.into_inner();

    match remove_tag(repo.get_ref(), tag_id) {
        Ok(result) => {
            log::info!("Deleted tag {tag_id}");
            HttpResponse::Ok().json(result)
        }
        Err(err) => error_response(&format!("tag {tag_id}"), err),
    }
}
