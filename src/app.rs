// src/app.rs

use axum::{
    Router,
    extract::FromRef,
    http::{Method, header},
    routing::{get, post, put},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::auth::google::GoogleClient;
use crate::auth::jwt::JwtManager;
use crate::auth::services::AuthService;
use crate::board::services::BoardService;
use crate::handlers::health::health;
use crate::handlers::{answer, auth, question, user};

/// Shared by every handler; cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub jwt_manager: JwtManager,
    pub auth: Arc<AuthService>,
    pub board: Arc<BoardService>,
    pub google: GoogleClient,
}

/// Lets the auth extractors pull the token checker out of the state.
impl FromRef<AppState> for JwtManager {
    fn from_ref(state: &AppState) -> Self {
        state.jwt_manager.clone()
    }
}

/// Configure les routes d'authentification
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(auth::signup))
        .route("/check-username", post(auth::check_username))
        .route("/verify/{token}", get(auth::verify_email))
        .route("/login", post(auth::login))
        .route("/google", post(auth::google_sign_in))
}

/// Profil et activité de l'utilisateur courant
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(user::me))
        .route("/me/likes", get(user::my_likes))
        .route("/me/bookmarks", get(user::my_bookmarks))
}

pub fn question_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(question::list_questions).post(question::create_question),
        )
        .route(
            "/{id}",
            get(question::question_detail)
                .put(question::update_question)
                .delete(question::delete_question),
        )
        .route("/{id}/like", post(question::toggle_like))
        .route("/{id}/bookmark", post(question::toggle_bookmark))
        .route("/{id}/answers", post(question::create_answer))
}

pub fn answer_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/{id}",
            put(answer::update_answer).delete(answer::delete_answer),
        )
        .route("/{id}/like", post(answer::toggle_like))
        .route("/{id}/bookmark", post(answer::toggle_bookmark))
}

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}

/// Construit l'application complète
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/auth", auth_routes())
        .nest("/users", user_routes())
        .nest("/questions", question_routes())
        .nest("/answers", answer_routes())
        .with_state(state)
        .layer(cors())
        // Middleware global de tracing
        .layer(TraceLayer::new_for_http())
}
