//! Product catalog handlers: list and create.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::app_state::AppState;
use crate::domain::Product;
use crate::error::{ApiError, ErrorResponse};

/// `GET /api/products` — List every product.
///
/// # Errors
///
/// Returns [`ApiError`] if the store cannot be read.
#[utoipa::path(
    get,
    path = "/api/products",
    tag = "Products",
    summary = "List products",
    description = "Returns every stored product. No pagination, filtering or sorting is applied.",
    responses(
        (status = 200, description = "All products", body = Vec<Product>),
        (status = 500, description = "Storage failure", body = ErrorResponse),
    )
)]
pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let products = state.product_service.list_products().await?;
    Ok(Json(products))
}

/// `POST /api/products` — Create a product, or replace the one with the
/// supplied `id`.
///
/// # Errors
///
/// Returns [`ApiError`] if the write fails.
#[utoipa::path(
    post,
    path = "/api/products",
    tag = "Products",
    summary = "Save a product",
    description = "Inserts the product when `id` is absent and returns it with its assigned id. When `id` is present the row with that id is overwritten, or created if missing.",
    request_body = Product,
    responses(
        (status = 200, description = "Stored product", body = Product),
        (status = 400, description = "Malformed JSON body"),
        (status = 422, description = "Body has a field of the wrong type"),
        (status = 500, description = "Storage failure", body = ErrorResponse),
    )
)]
pub async fn create_product(
    State(state): State<AppState>,
    Json(product): Json<Product>,
) -> Result<Json<Product>, ApiError> {
    let stored = state.product_service.save_product(product).await?;
    Ok(Json(stored))
}

/// Product routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/products", get(list_products).post(create_product))
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::sync::Arc;

    use axum::Router;
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::api::build_app;
    use crate::app_state::AppState;
    use crate::config::CorsPolicy;
    use crate::persistence::{InMemoryProductRepository, ProductRepository, UnavailableRepository};
    use crate::service::ProductService;

    fn app_with(repository: Arc<dyn ProductRepository>) -> Router {
        build_app(
            AppState::new(ProductService::new(repository)),
            &CorsPolicy::Permissive,
        )
    }

    fn app() -> Router {
        app_with(Arc::new(InMemoryProductRepository::new()))
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let Ok(response) = app.clone().oneshot(request).await else {
            panic!("router is infallible");
        };
        let status = response.status();
        let Ok(bytes) = axum::body::to_bytes(response.into_body(), usize::MAX).await else {
            panic!("readable body");
        };
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn post_json(body: &str) -> Request<Body> {
        let Ok(request) = Request::builder()
            .method(Method::POST)
            .uri("/api/products")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
        else {
            panic!("valid request");
        };
        request
    }

    fn get_products() -> Request<Body> {
        let Ok(request) = Request::builder()
            .uri("/api/products")
            .body(Body::empty())
        else {
            panic!("valid request");
        };
        request
    }

    #[tokio::test]
    async fn empty_catalog_lists_empty_array() {
        let app = app();
        let (status, body) = send(&app, get_products()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn create_assigns_id_and_list_returns_it() {
        let app = app();

        let (status, body) = send(&app, post_json(r#"{"name":"Apple","price":1.5}"#)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"id": 1, "name": "Apple", "price": 1.5}));

        let (status, body) = send(&app, get_products()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([{"id": 1, "name": "Apple", "price": 1.5}]));
    }

    #[tokio::test]
    async fn create_echoes_every_field() {
        let app = app();
        let payload = json!({
            "name": "Organic Honey",
            "description": "Raw forest honey",
            "price": 349.0,
            "originalPrice": 399.0,
            "imageUrl": "https://cdn.test/honey.png",
            "category": "pantry",
            "rating": 4.5,
            "reviews": 128
        });

        let (status, body) = send(&app, post_json(&payload.to_string())).await;
        assert_eq!(status, StatusCode::OK);

        let mut expected = payload;
        if let Some(obj) = expected.as_object_mut() {
            obj.insert("id".to_string(), json!(1));
        }
        assert_eq!(body, expected);
    }

    #[tokio::test]
    async fn create_with_existing_id_replaces_row() {
        let app = app();
        for payload in [r#"{"name":"Apple","price":1.5}"#, r#"{"name":"Pear","price":2.0}"#] {
            let (status, _) = send(&app, post_json(payload)).await;
            assert_eq!(status, StatusCode::OK);
        }

        let (status, body) =
            send(&app, post_json(r#"{"id":1,"name":"Red Apple","price":1.75}"#)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"id": 1, "name": "Red Apple", "price": 1.75}));

        let (_, body) = send(&app, get_products()).await;
        assert_eq!(
            body,
            json!([
                {"id": 1, "name": "Red Apple", "price": 1.75},
                {"id": 2, "name": "Pear", "price": 2.0}
            ])
        );
    }

    #[tokio::test]
    async fn malformed_json_is_client_error() {
        let app = app();
        let (status, _) = send(&app, post_json("{\"name\": ")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, body) = send(&app, get_products()).await;
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn wrong_field_type_is_client_error() {
        let app = app();
        let (status, _) = send(&app, post_json(r#"{"price":"cheap"}"#)).await;
        assert!(status.is_client_error());
    }

    #[tokio::test]
    async fn missing_content_type_is_client_error() {
        let app = app();
        let Ok(request) = Request::builder()
            .method(Method::POST)
            .uri("/api/products")
            .body(Body::from(r#"{"name":"Apple"}"#))
        else {
            panic!("valid request");
        };
        let (status, _) = send(&app, request).await;
        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[tokio::test]
    async fn storage_failure_is_server_error() {
        let app = app_with(Arc::new(UnavailableRepository));

        let (status, body) = send(&app, get_products()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.pointer("/error/code"), Some(&json!(3001)));

        let (status, _) = send(&app, post_json(r#"{"name":"Apple"}"#)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn unsupported_method_is_rejected() {
        let app = app();
        let Ok(request) = Request::builder()
            .method(Method::DELETE)
            .uri("/api/products")
            .body(Body::empty())
        else {
            panic!("valid request");
        };
        let (status, _) = send(&app, request).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }
}
