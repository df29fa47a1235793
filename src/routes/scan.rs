use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};

use crate::{
    error::AppResult, models::Product, response::ApiResponse, services::product_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/{code}", get(resolve_code))
}

#[utoipa::path(
    get,
    path = "/api/scan/{code}",
    params(
        ("code" = String, Path, description = "Decoded QR payload (the product code)")
    ),
    responses(
        (status = 200, description = "Resolve a scanned code to its product", body = ApiResponse<Product>),
        (status = 404, description = "Unknown code"),
    ),
    tag = "Scan"
)]
pub async fn resolve_code(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let resp = product_service::get_product_by_code(&state, &code).await?;
    Ok(Json(resp))
}
