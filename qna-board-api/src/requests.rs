use serde::{Deserialize, Serialize};

// -------- ACCOUNT --------
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SignupRequest {
    pub username: String,
    pub password: String, // Plain text
    pub password2: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CheckUsernameRequest {
    #[serde(default)]
    pub username: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LoginRequest {
    pub username: String,
    pub password: String, // Plain text
}

/// Access token obtained by the client from Google's OAuth consent screen.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct GoogleSignInRequest {
    pub access_token: String,
}

// -------- BOARD --------
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct QuestionRequest {
    pub subject: String,
    pub content: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AnswerRequest {
    pub content: String,
}

/// Query string of `GET /questions`.
///
/// Everything is kept as raw text: unknown or malformed values are normalized
/// by the server instead of being rejected.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct QuestionListQuery {
    #[serde(default)]
    pub kw: Option<String>,
    #[serde(default)]
    pub sort: Option<String>,
    #[serde(default)]
    pub page: Option<String>,
    #[serde(default)]
    pub per_page: Option<String>,
}

/// Query string of `GET /questions/{id}`.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct QuestionDetailQuery {
    #[serde(default)]
    pub answer_sort: Option<String>,
}
