use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use tracing::{error, info};

use super::AppState;
use crate::{ImportRequest, ImportResponse, import_idea};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(import).options(preflight))
        .route("/fetch-idestrim-post", post(import).options(preflight))
        .route("/healthz", get(health))
}

async fn import(
    State(state): State<AppState>,
    payload: Result<Json<ImportRequest>, JsonRejection>,
) -> (StatusCode, Json<ImportResponse>) {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            info!(error = %rejection.body_text(), "unreadable import request body");
            return (
                StatusCode::BAD_REQUEST,
                Json(ImportResponse::failure(
                    "Request body must be JSON with a \"url\" field.",
                    "INVALID_REQUEST",
                )),
            );
        }
    };

    match import_idea(&state.client, &request).await {
        Ok(data) => {
            info!(url = %request.url, title = %data.title, "idea imported");
            (StatusCode::OK, Json(ImportResponse::success(data)))
        }
        Err(e) => {
            if e.is_link_error() {
                info!(url = %request.url, error = %e, "rejected import link");
            } else {
                error!(url = %request.url, error = ?e, "import failed");
            }
            let status =
                StatusCode::from_u16(e.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, Json(ImportResponse::from_error(&e)))
        }
    }
}

async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn health() -> &'static str {
    "ok"
}
