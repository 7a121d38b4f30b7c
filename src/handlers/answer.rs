use axum::{
    Json,
    extract::{Path, State},
};
use qna_board_api::{AnswerRequest, AnswerResponse, ToggleResponse};
use uuid::Uuid;

use crate::app::AppState;
use crate::auth::extractors::AuthUser;
use crate::db::repositories::toggle_repository::ToggleKind;
use crate::error::AppError;
use crate::handlers::{blocking, question::toggle};
use crate::response::AppResponse;

/// PUT /answers/{id}
pub async fn update_answer(
    user: AuthUser,
    State(state): State<AppState>,
    Path(answer_id): Path<Uuid>,
    Json(payload): Json<AnswerRequest>,
) -> Result<AppResponse<AnswerResponse>, AppError> {
    let service = state.board.clone();
    let answer = blocking(move || service.update_answer(user.id, answer_id, &payload)).await?;
    Ok(AppResponse::ok(answer))
}

/// DELETE /answers/{id}
pub async fn delete_answer(
    user: AuthUser,
    State(state): State<AppState>,
    Path(answer_id): Path<Uuid>,
) -> Result<AppResponse<()>, AppError> {
    let service = state.board.clone();
    blocking(move || service.delete_answer(user.id, answer_id)).await?;
    Ok(AppResponse::no_content())
}

/// POST /answers/{id}/like
pub async fn toggle_like(
    user: AuthUser,
    State(state): State<AppState>,
    Path(answer_id): Path<Uuid>,
) -> Result<AppResponse<ToggleResponse>, AppError> {
    toggle(user, state, ToggleKind::AnswerLike, answer_id).await
}

/// POST /answers/{id}/bookmark
pub async fn toggle_bookmark(
    user: AuthUser,
    State(state): State<AppState>,
    Path(answer_id): Path<Uuid>,
) -> Result<AppResponse<ToggleResponse>, AppError> {
    toggle(user, state, ToggleKind::AnswerBookmark, answer_id).await
}
