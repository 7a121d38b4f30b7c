use axum::extract::State;
use qna_board_api::{ActivityResponse, UserResponse};

use crate::app::AppState;
use crate::auth::extractors::AuthUser;
use crate::board::listing::Relation;
use crate::error::AppError;
use crate::handlers::blocking;
use crate::response::AppResponse;

/// GET /users/me
/// Récupère le profil de l'utilisateur courant
pub async fn me(
    user: AuthUser,
    State(state): State<AppState>,
) -> Result<AppResponse<UserResponse>, AppError> {
    let service = state.auth.clone();
    let profile = blocking(move || service.profile(user.id)).await?;
    Ok(AppResponse::ok(profile))
}

/// GET /users/me/likes
pub async fn my_likes(
    user: AuthUser,
    State(state): State<AppState>,
) -> Result<AppResponse<ActivityResponse>, AppError> {
    activity(user, state, Relation::Likes).await
}

/// GET /users/me/bookmarks
pub async fn my_bookmarks(
    user: AuthUser,
    State(state): State<AppState>,
) -> Result<AppResponse<ActivityResponse>, AppError> {
    activity(user, state, Relation::Bookmarks).await
}

async fn activity(
    user: AuthUser,
    state: AppState,
    relation: Relation,
) -> Result<AppResponse<ActivityResponse>, AppError> {
    let service = state.board.clone();
    let items = blocking(move || service.activity(user.id, relation)).await?;
    Ok(AppResponse::ok(items))
}
