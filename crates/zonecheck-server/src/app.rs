use crate::state::AppState;
use crate::{api, logging};
use axum::http::HeaderValue;
use axum::middleware;
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "zonecheck API",
        description = "DNS health check service backed by a Zonemaster engine",
    ),
    tags(
        (name = "Health", description = "Service health"),
        (name = "DNS Checks", description = "Run and browse DNS checks")
    )
)]
struct ApiDoc;

fn cors_layer(state: &AppState) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if state.config.allows_any_origin() {
        return layer.allow_origin(Any);
    }
    let origins: Vec<HeaderValue> = state
        .config
        .cors_allowed_origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::warn!(origin = %o, error = %e, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(origins))
}

pub fn build_http_app(state: AppState) -> Router {
    let (public_router, public_doc) = api::public_routes().split_for_parts();
    let (check_router, check_doc) = api::check_routes().split_for_parts();

    let mut openapi = ApiDoc::openapi();
    openapi.merge(public_doc);
    openapi.merge(check_doc);

    let cors = cors_layer(&state);

    public_router
        .merge(check_router)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api/v1/openapi.json", openapi))
        .layer(cors)
        .layer(middleware::from_fn(logging::request_logging))
}
