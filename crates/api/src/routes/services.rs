use axum::{extract::State, routing::get, Extension, Json, Router};
use melody_core::types::ServiceCatalog;
use melody_db::catalog;
use serde::Serialize;

use crate::{
    error::{ApiResult, AppError},
    state::{AppState, RequestId},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/services", get(list_services))
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct ServicesResponse {
    data: ServiceCatalog,
}

async fn list_services(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
) -> ApiResult<Json<ServicesResponse>> {
    let data = catalog::list_services(state.store.as_ref())
        .await
        .map_err(|err| AppError::from(err).with_request_id(&request_id.0))?;

    Ok(Json(ServicesResponse { data }))
}
