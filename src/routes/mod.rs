//! HTTP surface of the catalog, mounted under `/api`.

use actix_web::error::InternalError;
use actix_web::{HttpRequest, HttpResponse, web};
use serde::Serialize;

use crate::services::ServiceError;

pub mod categories;
pub mod products;
pub mod tags;

/// JSON body returned with every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Register the catalog routes, extractor configuration and the JSON 404 fallback.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(path_config())
        .service(
            web::scope("/api")
                .service(categories::show_categories)
                .service(categories::show_category)
                .service(categories::add_category)
                .service(categories::edit_category)
                .service(categories::delete_category)
                .service(products::show_products)
                .service(products::show_product)
                .service(products::add_product)
                .service(products::edit_product)
                .service(products::delete_product)
                .service(tags::show_tags)
                .service(tags::show_tag)
                .service(tags::add_tag)
                .service(tags::edit_tag)
                .service(tags::delete_tag),
        )
        .default_service(web::to(not_found));
}

/// Reject malformed or mistyped JSON bodies with `400 {"message": ...}`.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req: &HttpRequest| {
        let response = HttpResponse::BadRequest().json(ErrorBody::new(err.to_string()));
        InternalError::from_response(err, response).into()
    })
}

/// Answer non-numeric ids with the same JSON 404 as a missing record.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req: &HttpRequest| {
        let response = HttpResponse::NotFound().json(ErrorBody::new("resource not found"));
        InternalError::from_response(err, response).into()
    })
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorBody::new("route not found"))
}

/// Map a service failure to its status code and JSON body, logging it on the way.
///
/// `context` names the resource being handled, e.g. `"product 7"`.
pub(crate) fn error_response(context: &str, err: ServiceError) -> HttpResponse {
    match err {
        ServiceError::NotFound => {
            HttpResponse::NotFound().json(ErrorBody::new(format!("{context} not found")))
        }
        ServiceError::Form(message) | ServiceError::Constraint(message) => {
            log::warn!("Rejected request for {context}: {message}");
            HttpResponse::BadRequest().json(ErrorBody::new(message))
        }
        ServiceError::Repository(err) => {
            log::error!("Failed to handle {context}: {err}");
            HttpResponse::InternalServerError().json(ErrorBody::new("internal server error"))
        }
    }
}
