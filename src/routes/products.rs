use actix_web::{HttpResponse, Responder, delete, get, post, put, web};

use crate::domain::Created;
use crate::forms::products::{AddProductForm, EditProductForm};
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::products::{
    create_product, list_products, load_product, modify_product, remove_product,
};

#[get("/products")]
pub async fn show_products(repo: web::Data<DieselRepository>) -> impl Responder {
    match list_products(repo.get_ref()) {
        Ok(products) => HttpResponse::Ok().json(products),
        Err(err) => error_response("products", err),
    }
}

#[get("/products/{product_id}")]
pub async fn show_product(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let product_id = path.into_inner();

    match load_product(repo.get_ref(), product_id) {
        Ok(product) => HttpResponse::Ok().json(product),
        Err(err) => error_response(&format!("product {product_id}"), err),
    }
}

/// Responds with the product, or with its tag links when `tagIds` was non-empty.
#[post("/products")]
pub async fn add_product(
    repo: web::Data<DieselRepository>,
    form: web::Json<AddProductForm>,
) -> impl Responder {
    match create_product(repo.get_ref(), form.into_inner()) {
        Ok(created) => {
            if let Created::Links(links) = &created {
                log::info!("Created product with {} tag links", links.len());
            }
            HttpResponse::Ok().json(created)
        }
        Err(err) => error_response("new product", err),
    }
}

#[put("/products/{product_id}")]
pub async fn edit_product(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    form: web::Json<EditProductForm>,
) -> impl Responder {
    let product_id = path.into_inner();

    match modify_product(repo.get_ref(), product_id, form.into_inner()) {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(err) => error_response(&format!("product {product_id}"), err),
    }
}

#[delete("/products/{product_id}")]
pub async fn delete_product(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let product_id = path.into_inner();

    match remove_product(repo.get_ref(), product_id) {
        Ok(result) => {
            log::info!("Deleted product {product_id}");
            HttpResponse::Ok().json(result)
        }
        Err(err) => error_response(&format!("product {product_id}"), err),
    }
}
