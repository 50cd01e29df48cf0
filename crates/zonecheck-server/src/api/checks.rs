use crate::api::pagination::PaginationParams;
use crate::api::ApiError;
use crate::error::{CheckFailure, ServiceError};
use crate::state::AppState;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::Json;
use tracing::Instrument;
use utoipa_axum::{router::OpenApiRouter, routes};
use zonecheck_common::types::{validate_domain, CreateCheckRequest, DnsCheck, DnsCheckSummary};

/// Run a new DNS check.
///
/// Creates the check, runs a Zonemaster analysis of the domain, stores the
/// findings and returns the check with all of them.
#[utoipa::path(
    post,
    path = "/api/v1/checks/",
    tag = "DNS Checks",
    request_body = CreateCheckRequest,
    responses(
        (status = 201, description = "Check completed", body = DnsCheck),
        (status = 422, description = "Invalid domain", body = ApiError),
        (status = 503, description = "Analysis engine unavailable or failed", body = ApiError)
    )
)]
async fn create_check(
    State(state): State<AppState>,
    payload: Result<Json<CreateCheckRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(p) => p,
        Err(rejection) => {
            return ServiceError::InvalidRequest(rejection.body_text()).into_response();
        }
    };
    if let Err(e) = validate_domain(&req.domain) {
        return ServiceError::from(e).into_response();
    }

    // Runs to completion even if the client disconnects mid-analysis.
    let service = state.service.clone();
    let task = tokio::spawn(
        async move { service.run_check_and_save(&req.domain).await }.in_current_span(),
    );

    match task.await {
        Ok(Ok(check)) => (StatusCode::CREATED, Json(check)).into_response(),
        Ok(Err(e)) => e.into_response(),
        Err(join_err) => {
            ServiceError::from(CheckFailure::Task(join_err.to_string())).into_response()
        }
    }
}

/// Get a DNS check with all of its results.
#[utoipa::path(
    get,
    path = "/api/v1/checks/{id}",
    tag = "DNS Checks",
    params(("id" = i32, Path, description = "Check id")),
    responses(
        (status = 200, description = "Check with results", body = DnsCheck),
        (status = 404, description = "Unknown check", body = ApiError),
        (status = 422, description = "Malformed id", body = ApiError)
    )
)]
async fn get_check(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Response {
    let Path(id) = match id {
        Ok(p) => p,
        Err(rejection) => {
            return ServiceError::InvalidRequest(rejection.body_text()).into_response();
        }
    };
    match state.service.get_check(id).await {
        Ok(check) => Json(check).into_response(),
        Err(e) => e.into_response(),
    }
}

/// List DNS checks, newest first, with their result counts.
///
/// Summary view only: results themselves are not included.
#[utoipa::path(
    get,
    path = "/api/v1/checks/",
    tag = "DNS Checks",
    params(PaginationParams),
    responses(
        (status = 200, description = "Page of checks", body = Vec<DnsCheckSummary>),
        (status = 422, description = "Malformed skip/limit", body = ApiError)
    )
)]
async fn list_checks(
    State(state): State<AppState>,
    pagination: Result<Query<PaginationParams>, QueryRejection>,
) -> Response {
    let Query(pagination) = match pagination {
        Ok(q) => q,
        Err(rejection) => {
            return ServiceError::InvalidRequest(rejection.body_text()).into_response();
        }
    };
    let limit = pagination.limit(state.config.max_page_limit);
    match state.service.list_checks(pagination.skip(), limit).await {
        Ok(checks) => Json(checks).into_response(),
        Err(e) => e.into_response(),
    }
}

pub fn check_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(create_check, list_checks))
        .routes(routes!(get_check))
        .route("/api/v1/checks", post(create_check).get(list_checks))
}
