use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use serde_json::{Value, json};

use catalog_api::db::DbPool;
use catalog_api::repository::DieselRepository;
use catalog_api::routes::configure;

mod common;

fn build_app(
    pool: DbPool,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let repo = DieselRepository::new(pool);

    App::new()
        .app_data(web::Data::new(repo))
        .configure(configure)
}

/// Call the service and decode the JSON body, if any.
macro_rules! send {
    ($app:expr, $request:expr $(,)?) => {
        async {
            let response = test::call_service(&$app, $request.to_request()).await;
            read_response(response).await
        }
    };
}

async fn read_response<B: MessageBody>(response: ServiceResponse<B>) -> (StatusCode, Value) {
    let status = response.status();
    let body = test::read_body(response).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("response body should be JSON")
    };
    (status, value)
}

fn sorted_ids(items: &Value) -> Vec<i64> {
    let mut ids: Vec<i64> = items
        .as_array()
        .expect("expected an array")
        .iter()
        .filter_map(|item| item["id"].as_i64())
        .collect();
    ids.sort_unstable();
    ids
}

#[actix_web::test]
async fn test_widget_scenario() {
    let test_db = common::TestDb::new("test_widget_scenario.db");
    let app = test::init_service(build_app(test_db.pool())).await;

    let (status, category) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/categories")
            .set_json(json!({"category_name": "Gadgets"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(category["id"], 1);

    for name in ["rock music", "pop music"] {
        let (status, _) = send!(
            app,
            test::TestRequest::post()
                .uri("/api/tags")
                .set_json(json!({"tag_name": name, "product_ids": []})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, links) = send!(
        app,
        test::TestRequest::post().uri("/api/products").set_json(json!({
            "product_name": "Widget",
            "price": 9.99,
            "stock": 5,
            "category_id": 1,
            "tagIds": [1, 2]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let links = links.as_array().expect("expected created links");
    assert_eq!(links.len(), 2);
    let product_id = links[0]["product_id"].as_i64().expect("product id");

    let (status, product) = send!(
        app,
        test::TestRequest::get().uri(&format!("/api/products/{product_id}")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(product["product_name"], "Widget");
    assert_eq!(product["price"], "9.99");
    assert_eq!(product["stock"], 5);
    assert_eq!(product["category"]["id"], 1);
    assert_eq!(product["category"]["category_name"], "Gadgets");
    assert_eq!(sorted_ids(&product["tags"]), vec![1, 2]);
}

#[actix_web::test]
async fn test_create_without_tags_returns_record() {
    let test_db = common::TestDb::new("test_create_without_tags_returns_record.db");
    let app = test::init_service(build_app(test_db.pool())).await;

    let (status, product) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/products")
            .set_json(json!({"product_name": "Plain Tee", "price": "14.5"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(product["product_name"], "Plain Tee");
    assert_eq!(product["price"], "14.50");
    assert_eq!(product["stock"], 0);
    assert_eq!(product["category_id"], Value::Null);
}

#[actix_web::test]
async fn test_unknown_ids_return_not_found() {
    let test_db = common::TestDb::new("test_unknown_ids_return_not_found.db");
    let app = test::init_service(build_app(test_db.pool())).await;

    for resource in ["categories", "products", "tags"] {
        let uri = format!("/api/{resource}/999");

        let (status, body) = send!(app, test::TestRequest::get().uri(&uri)).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "GET {uri}");
        assert!(body["message"].is_string());

        let (status, _) = send!(
            app,
            test::TestRequest::put().uri(&uri).set_json(json!({})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND, "PUT {uri}");

        let (status, _) = send!(app, test::TestRequest::delete().uri(&uri)).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "DELETE {uri}");
    }

    let (status, body) = send!(app, test::TestRequest::get().uri("/api/unknown")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["message"].is_string());
}

#[actix_web::test]
async fn test_lists_are_empty_not_missing() {
    let test_db = common::TestDb::new("test_lists_are_empty_not_missing.db");
    let app = test::init_service(build_app(test_db.pool())).await;

    for resource in ["categories", "products", "tags"] {
        let (status, body) =
            send!(app, test::TestRequest::get().uri(&format!("/api/{resource}"))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }
}

#[actix_web::test]
async fn test_invalid_payloads_are_rejected() {
    let test_db = common::TestDb::new("test_invalid_payloads_are_rejected.db");
    let app = test::init_service(build_app(test_db.pool())).await;

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/categories")
            .set_json(json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());

    let (status, _) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/products")
            .set_json(json!({"product_name": "Broken", "price": -1})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/products")
            .set_json(json!({"product_name": "Dangling", "price": 1, "tagIds": [5]})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, products) = send!(app, test::TestRequest::get().uri("/api/products")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(products, json!([]));
}

#[actix_web::test]
async fn test_product_tag_reconciliation() {
    let test_db = common::TestDb::new("test_product_tag_reconciliation.db");
    let app = test::init_service(build_app(test_db.pool())).await;

    for name in ["one", "two", "three", "four"] {
        send!(
            app,
            test::TestRequest::post()
                .uri("/api/tags")
                .set_json(json!({"tag_name": name})),
        )
        .await;
    }

    send!(
        app,
        test::TestRequest::post().uri("/api/products").set_json(json!({
            "product_name": "Sneakers",
            "price": 59.9,
            "stock": 3,
            "tagIds": [1, 2, 3]
        })),
    )
    .await;

    let edit = || {
        test::TestRequest::put()
            .uri("/api/products/1")
            .set_json(json!({"tagIds": [2, 3, 4]}))
    };

    let (status, result) = send!(app, edit()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        result,
        json!({"affected_rows": 1, "links": {"added": 1, "removed": 1}})
    );

    let (status, result) = send!(app, edit()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["links"], json!({"added": 0, "removed": 0}));

    let (_, product) = send!(app, test::TestRequest::get().uri("/api/products/1")).await;
    assert_eq!(sorted_ids(&product["tags"]), vec![2, 3, 4]);

    let (status, _) = send!(
        app,
        test::TestRequest::put()
            .uri("/api/products/1")
            .set_json(json!({"stock": 7})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, product) = send!(app, test::TestRequest::get().uri("/api/products/1")).await;
    assert_eq!(product["stock"], 7);
    assert_eq!(sorted_ids(&product["tags"]), vec![2, 3, 4]);

    let (status, result) = send!(
        app,
        test::TestRequest::put()
            .uri("/api/products/1")
            .set_json(json!({"tagIds": []})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["links"]["removed"], 3);

    let (_, product) = send!(app, test::TestRequest::get().uri("/api/products/1")).await;
    assert_eq!(product["tags"], json!([]));
}

#[actix_web::test]
async fn test_delete_category_with_products() {
    let test_db = common::TestDb::new("test_delete_category_with_products.db");
    let app = test::init_service(build_app(test_db.pool())).await;

    send!(
        app,
        test::TestRequest::post()
            .uri("/api/categories")
            .set_json(json!({"category_name": "Music"})),
    )
    .await;
    send!(
        app,
        test::TestRequest::post().uri("/api/products").set_json(json!({
            "product_name": "Vinyl",
            "price": 25,
            "category_id": 1
        })),
    )
    .await;

    let (status, result) = send!(app, test::TestRequest::delete().uri("/api/categories/1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result, json!({"affected_rows": 1}));

    let (status, product) = send!(app, test::TestRequest::get().uri("/api/products/1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(product["category"], Value::Null);
}

#[actix_web::test]
async fn test_tag_endpoints_round_trip() {
    let test_db = common::TestDb::new("test_tag_endpoints_round_trip.db");
    let app = test::init_service(build_app(test_db.pool())).await;

    send!(
        app,
        test::TestRequest::post()
            .uri("/api/products")
            .set_json(json!({"product_name": "Vinyl", "price": 25})),
    )
    .await;

    let (status, links) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/tags")
            .set_json(json!({"tag_name": "vintage", "product_ids": [1]})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(links[0]["product_id"], 1);

    let (status, tag) = send!(app, test::TestRequest::get().uri("/api/tags/1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(tag["tag_name"], "vintage");
    assert_eq!(sorted_ids(&tag["products"]), vec![1]);

    let (status, _) = send!(
        app,
        test::TestRequest::put()
            .uri("/api/tags/1")
            .set_json(json!({"tag_name": "classic", "product_ids": []})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, tag) = send!(app, test::TestRequest::get().uri("/api/tags/1")).await;
    assert_eq!(tag["tag_name"], "classic");
    assert_eq!(tag["products"], json!([]));

    let (status, result) = send!(app, test::TestRequest::delete().uri("/api/tags/1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result, json!({"affected_rows": 1}));
}
