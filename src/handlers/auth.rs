// src/handlers/auth.rs

use axum::{
    Json,
    extract::{Path, State},
};
use qna_board_api::{
    CheckUsernameRequest, GoogleSignInRequest, LoginRequest, LoginResponse, SignupRequest,
    SignupResponse, UserResponse, UsernameAvailability,
};

use crate::app::AppState;
use crate::auth::google::GoogleError;
use crate::error::AppError;
use crate::handlers::blocking;
use crate::response::AppResponse;

/// POST /auth/signup
/// Inscription, immédiate ou en attente de vérification d'email
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> Result<AppResponse<SignupResponse>, AppError> {
    let service = state.auth.clone();
    let response = blocking(move || service.signup(&payload)).await?;
    Ok(AppResponse::created(response))
}

/// POST /auth/check-username
/// Disponibilité d'un nom d'utilisateur
pub async fn check_username(
    State(state): State<AppState>,
    Json(payload): Json<CheckUsernameRequest>,
) -> Result<AppResponse<UsernameAvailability>, AppError> {
    let service = state.auth.clone();
    let availability = blocking(move || service.check_username(&payload.username)).await?;
    Ok(AppResponse::ok(availability))
}

/// GET /auth/verify/{token}
/// Validation de l'adresse email
pub async fn verify_email(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<AppResponse<UserResponse>, AppError> {
    let service = state.auth.clone();
    let user = blocking(move || service.verify(&token)).await?;
    Ok(AppResponse::ok(user))
}

/// POST /auth/login
/// Connexion d'un utilisateur
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<AppResponse<LoginResponse>, AppError> {
    let service = state.auth.clone();
    let response = blocking(move || service.login(&payload.username, &payload.password)).await?;
    Ok(AppResponse::ok(response))
}

/// POST /auth/google
/// Connexion Google à partir de l'access token obtenu par le client
pub async fn google_sign_in(
    State(state): State<AppState>,
    Json(payload): Json<GoogleSignInRequest>,
) -> Result<AppResponse<LoginResponse>, AppError> {
    let identity = state
        .google
        .fetch_identity(&payload.access_token)
        .await
        .map_err(|e| match e {
            GoogleError::Rejected => AppError::InvalidToken("Google rejected the access token".to_string()),
            GoogleError::Client(e) => AppError::upstream(e.to_string()),
        })?;

    let service = state.auth.clone();
    let response = blocking(move || service.sign_in_with_identity(&identity)).await?;
    Ok(AppResponse::ok(response))
}
