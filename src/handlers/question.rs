use axum::{
    Json,
    extract::{Path, Query, State},
};
use qna_board_api::{
    AnswerRequest, AnswerResponse, PageResponse, QuestionDetailQuery, QuestionDetailResponse,
    QuestionListQuery, QuestionRequest, QuestionResponse, ToggleResponse,
};
use uuid::Uuid;

use crate::app::AppState;
use crate::auth::extractors::{AuthUser, MaybeAuthUser};
use crate::board::listing::AnswerSort;
use crate::db::repositories::toggle_repository::ToggleKind;
use crate::error::AppError;
use crate::handlers::blocking;
use crate::response::AppResponse;

/// GET /questions?kw=&sort=&page=&per_page=
/// Unknown or malformed parameters are normalized, never rejected.
pub async fn list_questions(
    State(state): State<AppState>,
    Query(query): Query<QuestionListQuery>,
) -> Result<AppResponse<PageResponse<QuestionResponse>>, AppError> {
    let service = state.board.clone();
    let page = blocking(move || service.list_questions(&query)).await?;
    Ok(AppResponse::ok(page))
}

/// POST /questions
pub async fn create_question(
    user: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<QuestionRequest>,
) -> Result<AppResponse<QuestionResponse>, AppError> {
    tracing::debug!(username = %user.username, "Posting question");
    let service = state.board.clone();
    let question = blocking(move || service.create_question(user.id, &payload)).await?;
    Ok(AppResponse::created(question))
}

/// GET /questions/{id}?answer_sort=
/// Anonymous visitors can read; identified ones also get their view counted.
pub async fn question_detail(
    viewer: MaybeAuthUser,
    State(state): State<AppState>,
    Path(question_id): Path<Uuid>,
    Query(query): Query<QuestionDetailQuery>,
) -> Result<AppResponse<QuestionDetailResponse>, AppError> {
    let sort = AnswerSort::parse(query.answer_sort.as_deref());
    let service = state.board.clone();
    let detail = blocking(move || service.question_detail(question_id, viewer.id(), sort)).await?;
    Ok(AppResponse::ok(detail))
}

/// PUT /questions/{id}
pub async fn update_question(
    user: AuthUser,
    State(state): State<AppState>,
    Path(question_id): Path<Uuid>,
    Json(payload): Json<QuestionRequest>,
) -> Result<AppResponse<QuestionResponse>, AppError> {
    let service = state.board.clone();
    let question = blocking(move || service.update_question(user.id, question_id, &payload)).await?;
    Ok(AppResponse::ok(question))
}

/// DELETE /questions/{id}
pub async fn delete_question(
    user: AuthUser,
    State(state): State<AppState>,
    Path(question_id): Path<Uuid>,
) -> Result<AppResponse<()>, AppError> {
    let service = state.board.clone();
    blocking(move || service.delete_question(user.id, question_id)).await?;
    Ok(AppResponse::no_content())
}

/// POST /questions/{id}/like
pub async fn toggle_like(
    user: AuthUser,
    State(state): State<AppState>,
    Path(question_id): Path<Uuid>,
) -> Result<AppResponse<ToggleResponse>, AppError> {
    toggle(user, state, ToggleKind::QuestionLike, question_id).await
}

/// POST /questions/{id}/bookmark
pub async fn toggle_bookmark(
    user: AuthUser,
    State(state): State<AppState>,
    Path(question_id): Path<Uuid>,
) -> Result<AppResponse<ToggleResponse>, AppError> {
    toggle(user, state, ToggleKind::QuestionBookmark, question_id).await
}

/// Shared by the question and answer toggle routes.
pub(crate) async fn toggle(
    user: AuthUser,
    state: AppState,
    kind: ToggleKind,
    item_id: Uuid,
) -> Result<AppResponse<ToggleResponse>, AppError> {
    let service = state.board.clone();
    let toggled = blocking(move || service.toggle(user.id, kind, item_id)).await?;
    Ok(AppResponse::ok(toggled))
}

/// POST /questions/{id}/answers
pub async fn create_answer(
    user: AuthUser,
    State(state): State<AppState>,
    Path(question_id): Path<Uuid>,
    Json(payload): Json<AnswerRequest>,
) -> Result<AppResponse<AnswerResponse>, AppError> {
    let service = state.board.clone();
    let answer = blocking(move || service.create_answer(user.id, question_id, &payload)).await?;
    Ok(AppResponse::created(answer))
}
