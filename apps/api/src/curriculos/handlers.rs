use axum::{
    extract::{FromRequest, FromRequestParts, State},
    Json,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::models::curriculo::{Curriculo, CurriculoInput};
use crate::state::AppState;

/// `Json` whose rejection is an `AppError` (400 `INVALID_REQUEST`).
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);

/// `Path` whose rejection is an `AppError` (400 `INVALID_REQUEST`).
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct PathParam<T>(pub T);

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: &'static str,
    #[serde(rename = "deletedCurriculo")]
    pub deleted_curriculo: Vec<Curriculo>,
}

/// GET /
pub async fn handle_list(State(state): State<AppState>) -> Result<Json<Vec<Curriculo>>, AppError> {
    Ok(Json(state.curriculos.list().await?))
}

/// GET /curriculos/:id
pub async fn handle_get(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
) -> Result<Json<Vec<Curriculo>>, AppError> {
    Ok(Json(state.curriculos.get(id).await?))
}

/// POST /curriculos
pub async fn handle_create(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CurriculoInput>,
) -> Result<Json<Vec<Curriculo>>, AppError> {
    Ok(Json(state.curriculos.create_or_fetch(&input).await?))
}

/// PUT /curriculos/:id
pub async fn handle_update(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
    JsonBody(input): JsonBody<CurriculoInput>,
) -> Result<Json<Vec<Curriculo>>, AppError> {
    Ok(Json(state.curriculos.update(id, &input).await?))
}

/// DELETE /curriculos/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
) -> Result<Json<DeleteResponse>, AppError> {
    let deleted_curriculo = state.curriculos.delete(id).await?;
    Ok(Json(DeleteResponse {
        message: "Curriculo successfully deleted",
        deleted_curriculo,
    }))
}
