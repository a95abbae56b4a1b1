use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api_doc::ApiDoc;
use crate::handlers::{datasets_handler, health_handler, valid_values_handler};
use crate::request_id::{request_id_layer, request_id_propagation_layer};
use crate::routes;
use crate::state::AppState;

/// Build the application router with all endpoints and middleware
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route(routes::HEALTH, get(health_handler))
        .route(routes::DATASETS, get(datasets_handler))
        .route(routes::VALID_VALUES, get(valid_values_handler))
        .merge(SwaggerUi::new(routes::SWAGGER_UI).url(routes::OPENAPI_JSON, ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(request_id_propagation_layer())
        .layer(request_id_layer())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use crate::test_utils::{get, setup_test_app, RecordingCatalog};
    use axum::{body::Body, http::Request, http::StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_openapi_document_served() {
        let app = setup_test_app(Arc::new(RecordingCatalog::new()));

        let (status, body) = get(app, "/api-docs/openapi.json").await;
        assert_eq!(status, StatusCode::OK);

        let paths = body["paths"].as_object().unwrap();
        assert!(paths.contains_key("/datasets"));
        assert!(paths.contains_key("/valid_values"));
        assert!(paths.contains_key("/health"));
    }

    #[tokio::test]
    async fn test_request_id_generated() {
        let app = setup_test_app(Arc::new(RecordingCatalog::new()));

        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let request_id = response.headers().get("x-request-id").unwrap();
        assert!(uuid::Uuid::parse_str(request_id.to_str().unwrap()).is_ok());
    }

    #[tokio::test]
    async fn test_request_id_propagated() {
        let app = setup_test_app(Arc::new(RecordingCatalog::new()));

        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/datasets?limit=-1")
                    .header("x-request-id", "caller-supplied-id")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers()["x-request-id"].to_str().unwrap(),
            "caller-supplied-id"
        );
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let app = setup_test_app(Arc::new(RecordingCatalog::new()));

        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/tiles")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
