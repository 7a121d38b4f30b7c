use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// -------- ACCOUNT --------
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: Option<String>,
    pub email_verified: bool,
    pub oauth_provider: Option<String>,
    pub create_date: DateTime<Utc>,
    pub verified_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct LoginResponse {
    pub access_token: String,
    pub expires_in: i64,
    pub user: UserResponse,
}

/// Outcome of a signup: either the account exists right away, or it waits
/// for the emailed verification link.
#[derive(Serialize, Deserialize, Debug)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SignupResponse {
    Created {
        user: UserResponse,
    },
    VerificationPending {
        email: String,
        email_sent: bool,
        /// Only present when the link could not be delivered.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        verify_link: Option<String>,
    },
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UsernameAvailability {
    pub available: bool,
    pub message: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct MessageResponse {
    pub message: String,
}

// -------- BOARD --------
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct QuestionResponse {
    pub id: Uuid,
    pub subject: String,
    pub content: String,
    pub create_date: DateTime<Utc>,
    pub author_id: Uuid,
    pub author_username: String,
    pub view_count: i32,
    pub like_count: i64,
    pub bookmark_count: i64,
    pub answer_count: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AnswerResponse {
    pub id: Uuid,
    pub question_id: Uuid,
    pub content: String,
    pub create_date: DateTime<Utc>,
    pub author_id: Uuid,
    pub author_username: String,
    pub like_count: i64,
    pub bookmark_count: i64,
    /// Whether the caller likes this answer (always false for anonymous callers)
    pub liked: bool,
    pub bookmarked: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct QuestionDetailResponse {
    pub question: QuestionResponse,
    pub answers: Vec<AnswerResponse>,
    pub liked: bool,
    pub bookmarked: bool,
    pub view_counted: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleResponse {
    pub active: bool,
    pub count: i64,
}

/// One entry of the page-number navigation list.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageLink {
    Page { number: i64 },
    Ellipsis,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PageResponse<T> {
    pub items: Vec<T>,
    pub page: i64,
    pub per_page: i64,
    pub total_items: i64,
    pub total_pages: i64,
    pub page_links: Vec<PageLink>,
}

/// Items a user liked or bookmarked, most recent toggle first.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct ActivityResponse {
    pub questions: Vec<QuestionResponse>,
    pub answers: Vec<AnswerResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signup_response_is_tagged_by_status() {
        let pending = SignupResponse::VerificationPending {
            email: "a@example.com".to_string(),
            email_sent: true,
            verify_link: None,
        };
        let json = serde_json::to_value(&pending).unwrap();
        assert_eq!(json["status"], "verification_pending");
        assert_eq!(json["email_sent"], true);
        assert!(json.get("verify_link").is_none());
    }

    #[test]
    fn ellipsis_serializes_without_number() {
        let json = serde_json::to_string(&PageLink::Ellipsis).unwrap();
        assert_eq!(json, r#"{"kind":"ellipsis"}"#);
    }
}
