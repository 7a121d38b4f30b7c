//! Rows produced by the listing queries: an item joined with its author and
//! aggregate counts.

use chrono::{DateTime, Utc};
use diesel::QueryableByName;
use diesel::sql_types::{BigInt, Int4, Text, Timestamptz, Uuid as SqlUuid};
use qna_board_api::{AnswerResponse, QuestionResponse};
use uuid::Uuid;

#[derive(QueryableByName, Debug, Clone)]
pub struct QuestionSummary {
    #[diesel(sql_type = SqlUuid)]
    pub id: Uuid,
    #[diesel(sql_type = Text)]
    pub subject: String,
    #[diesel(sql_type = Text)]
    pub content: String,
    #[diesel(sql_type = Timestamptz)]
    pub create_date: DateTime<Utc>,
    #[diesel(sql_type = SqlUuid)]
    pub user_id: Uuid,
    #[diesel(sql_type = Text)]
    pub author_username: String,
    #[diesel(sql_type = Int4)]
    pub view_count: i32,
    #[diesel(sql_type = BigInt)]
    pub like_count: i64,
    #[diesel(sql_type = BigInt)]
    pub bookmark_count: i64,
    #[diesel(sql_type = BigInt)]
    pub answer_count: i64,
}

impl From<QuestionSummary> for QuestionResponse {
    fn from(row: QuestionSummary) -> Self {
        QuestionResponse {
            id: row.id,
            subject: row.subject,
            content: row.content,
            create_date: row.create_date,
            author_id: row.user_id,
            author_username: row.author_username,
            view_count: row.view_count,
            like_count: row.like_count,
            bookmark_count: row.bookmark_count,
            answer_count: row.answer_count,
        }
    }
}

#[derive(QueryableByName, Debug, Clone)]
pub struct AnswerSummary {
    #[diesel(sql_type = SqlUuid)]
    pub id: Uuid,
    #[diesel(sql_type = SqlUuid)]
    pub question_id: Uuid,
    #[diesel(sql_type = Text)]
    pub content: String,
    #[diesel(sql_type = Timestamptz)]
    pub create_date: DateTime<Utc>,
    #[diesel(sql_type = SqlUuid)]
    pub user_id: Uuid,
    #[diesel(sql_type = Text)]
    pub author_username: String,
    #[diesel(sql_type = BigInt)]
    pub like_count: i64,
    #[diesel(sql_type = BigInt)]
    pub bookmark_count: i64,
}

impl AnswerSummary {
    /// Response with the caller's flags attached.
    pub fn into_response(self, liked: bool, bookmarked: bool) -> AnswerResponse {
        AnswerResponse {
            id: self.id,
            question_id: self.question_id,
            content: self.content,
            create_date: self.create_date,
            author_id: self.user_id,
            author_username: self.author_username,
            like_count: self.like_count,
            bookmark_count: self.bookmark_count,
            liked,
            bookmarked,
        }
    }
}

#[derive(QueryableByName, Debug, Clone, Copy)]
pub struct CountRow {
    #[diesel(sql_type = BigInt)]
    pub total: i64,
}
