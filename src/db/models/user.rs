use crate::db::schema::users;
use chrono::{DateTime, Utc};
use diesel::{Insertable, Queryable, Selectable};
use qna_board_api::UserResponse;
use uuid::Uuid;

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = users)]
pub struct NewUser {
    pub username: String,
    pub password_hash: Option<String>,
    pub email: Option<String>,
    pub oauth_provider: Option<String>,
    pub oauth_id: Option<String>,
    pub create_date: DateTime<Utc>,
    pub email_verified: bool,
    pub verified_at: Option<DateTime<Utc>>,
}

impl NewUser {
    /// Account created directly from the signup form (no email given).
    pub fn local(username: String, password_hash: String, now: DateTime<Utc>) -> Self {
        Self {
            username,
            password_hash: Some(password_hash),
            email: None,
            oauth_provider: None,
            oauth_id: None,
            create_date: now,
            email_verified: false,
            verified_at: None,
        }
    }
}

#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub password_hash: Option<String>,
    pub email: Option<String>,
    pub oauth_provider: Option<String>,
    pub oauth_id: Option<String>,
    pub create_date: DateTime<Utc>,
    pub email_verified: bool,
    pub verified_at: Option<DateTime<Utc>>,
}

impl User {
    /// Password login is refused while an attached email is unverified.
    pub fn awaits_email_verification(&self) -> bool {
        self.email.is_some() && !self.email_verified
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            username: user.username,
            email: user.email,
            email_verified: user.email_verified,
            oauth_provider: user.oauth_provider,
            create_date: user.create_date,
            verified_at: user.verified_at,
        }
    }
}
