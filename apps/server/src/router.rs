use agrisk::domain::constants::{ASSESSMENT_TAG, HISTORY_TAG, SYSTEM_TAG, WARDS_TAG};
use agrisk::kernel::prelude::ApiState;
use agrisk::server::router::{api_router, start_clock, system_router};
use axum::Router;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable};

#[derive(OpenApi)]
#[openapi(
    info(title = "Gatundu North Sweet Potato Risk Dashboard"),
    tags(
        (name = SYSTEM_TAG, description = "Liveness"),
        (name = WARDS_TAG, description = "Ward catalogue, comparison and crop profile"),
        (name = ASSESSMENT_TAG, description = "Crop-stress estimates and premium guidance"),
        (name = HISTORY_TAG, description = "Synthesized yearly series and drought impact"),
    )
)]
struct ApiDoc;

/// Full application router: system and feature routes, request tracing, Scalar UI at `/api`.
pub fn init(state: ApiState) -> Router {
    start_clock();
    let api = ApiDoc::openapi();

    // Separate the OpenAPI routes and the API documentation object
    let (openapi_routes, api_doc) = OpenApiRouter::with_openapi(api)
        .merge(system_router())
        .merge(api_router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
        .split_for_parts();

    let scalar_routes = Scalar::with_url("/api", api_doc);

    Router::new().merge(openapi_routes).merge(scalar_routes)
}
