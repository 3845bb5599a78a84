use axum::{
    extract::Path,
    http::{header, HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};
use storefront_api::{ApiConfig, ErrorKind, StoreApiClient, StoreApiError};

const ACCESS_KEY: &str = "SWSCTESTKEY";
const NAVIGATION_ROUTE: &str = "/store-api/navigation/main-navigation/main-navigation";

/// Serve `app` on an ephemeral port and return the store API base URL
async fn spawn_backend(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/store-api", addr)
}

fn client_for(base_url: String) -> StoreApiClient {
    StoreApiClient::new(ApiConfig::new(base_url, ACCESS_KEY)).unwrap()
}

/// Navigation route that answers with a fixed status and raw body
fn navigation_backend(status: StatusCode, body: &'static str) -> Router {
    Router::new().route(
        NAVIGATION_ROUTE,
        post(move || async move { (status, [(header::CONTENT_TYPE, "application/json")], body) }),
    )
}

#[tokio::test]
async fn test_navigation_is_normalized() {
    let app = Router::new().route(
        NAVIGATION_ROUTE,
        post(|headers: HeaderMap, Json(body): Json<Value>| async move {
            if headers.get("sw-access-key").map(|v| v.as_bytes()) != Some(ACCESS_KEY.as_bytes()) {
                return (StatusCode::UNAUTHORIZED, Json(json!({ "errors": [] })));
            }
            if body["depth"] != json!(2) || body["buildTree"] != json!(true) {
                return (StatusCode::BAD_REQUEST, Json(json!({ "errors": [] })));
            }
            (
                StatusCode::OK,
                Json(json!([
                    {
                        "id": "1",
                        "name": "Damen",
                        "translated": {},
                        "children": [{ "id": "2", "name": "Schuhe", "children": [] }]
                    },
                    { "id": "3", "name": null, "children": [] }
                ])),
            )
        }),
    );
    let client = client_for(spawn_backend(app).await);

    let categories = client.fetch_navigation().await.unwrap();

    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].id, "1");
    assert_eq!(categories[0].name, "Damen");
    assert!(categories[0].has_children);
    assert_eq!(categories[0].children[0].name, "Schuhe");
    assert!(!categories[0].children[0].has_children);
}

#[tokio::test]
async fn test_navigation_single_object_is_one_root() {
    let app = navigation_backend(
        StatusCode::OK,
        r#"{"id":"1","translated":{"name":"Damen"},"children":[]}"#,
    );
    let client = client_for(spawn_backend(app).await);

    let categories = client.fetch_navigation().await.unwrap();

    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].name, "Damen");
}

#[tokio::test]
async fn test_navigation_server_error() {
    let app = navigation_backend(StatusCode::INTERNAL_SERVER_ERROR, r#"[{"id":"1","name":"x"}]"#);
    let client = client_for(spawn_backend(app).await);

    let err = client.fetch_navigation().await.unwrap_err();

    assert!(matches!(err, StoreApiError::HttpStatus { status: 500 }));
    assert_eq!(err.to_string(), "HTTP error! status: 500");
}

#[tokio::test]
async fn test_navigation_malformed_body() {
    let app = navigation_backend(StatusCode::OK, "<html>maintenance</html>");
    let client = client_for(spawn_backend(app).await);

    let err = client.fetch_navigation().await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Format);
    assert!(err.status().is_none());
}

#[tokio::test]
async fn test_navigation_scalar_body_is_bad_format() {
    let app = navigation_backend(StatusCode::OK, "42");
    let client = client_for(spawn_backend(app).await);

    let err = client.fetch_navigation().await.unwrap_err();

    assert!(matches!(err, StoreApiError::BadFormat(_)));
}

#[tokio::test]
async fn test_listing_passes_envelope_through() {
    let app = Router::new().route(
        "/store-api/product-listing/:category_id",
        post(
            |Path(category_id): Path<String>, headers: HeaderMap, Json(body): Json<Value>| async move {
                let seo = headers
                    .get("sw-include-seo-urls")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("missing")
                    .to_string();
                Json(json!({
                    "page": body["page"],
                    "total": 1,
                    "seo": seo,
                    "categoryId": category_id,
                    "elements": [{
                        "id": "p1",
                        "translated": { "name": "Sneaker" },
                        "calculatedPrices": [{ "unitPrice": 49.9 }],
                        "isNew": true
                    }]
                }))
            },
        ),
    );
    let client = client_for(spawn_backend(app).await);

    let listing = client.fetch_product_listing("a1b2c3").await.unwrap();

    assert_eq!(listing.raw()["page"], json!(1));
    assert_eq!(listing.raw()["seo"], json!("true"));
    assert_eq!(listing.raw()["categoryId"], json!("a1b2c3"));
    assert_eq!(listing.total(), Some(1));
    assert_eq!(listing.products()[0].display_name(), "Sneaker");
}

#[tokio::test]
async fn test_listing_category_id_is_one_path_segment() {
    let app = Router::new().route(
        "/store-api/product-listing/:category_id",
        post(|Path(category_id): Path<String>| async move {
            Json(json!({ "categoryId": category_id, "elements": [] }))
        }),
    );
    let client = client_for(spawn_backend(app).await);

    // Would be a 404 if the slash split the id into two segments
    let listing = client.fetch_product_listing("a/b c").await.unwrap();

    assert_eq!(listing.raw()["categoryId"], json!("a/b c"));
    assert!(listing.elements().is_empty());
}

#[tokio::test]
async fn test_listing_server_error() {
    let app = Router::new().route(
        "/store-api/product-listing/:category_id",
        post(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
    );
    let client = client_for(spawn_backend(app).await);

    let err = client.fetch_product_listing("a1b2c3").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::HttpStatus);
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn test_listing_malformed_body() {
    let app = Router::new().route(
        "/store-api/product-listing/:category_id",
        post(|| async { "{\"elements\": [" }),
    );
    let client = client_for(spawn_backend(app).await);

    let err = client.fetch_product_listing("a1b2c3").await.unwrap_err();

    assert!(matches!(err, StoreApiError::Parse(_)));
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_error() {
    // Grab a free port, then close it again
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(format!("http://{}/store-api", addr));
    let err = client.fetch_navigation().await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Transport);
}
