use crate::db::schema::questions;
use chrono::{DateTime, Utc};
use diesel::{AsChangeset, Insertable, Queryable, Selectable};
use uuid::Uuid;

/// Lowercased text with every whitespace character removed.
///
/// Stored next to the subject and content and applied to search keywords,
/// so both sides of a keyword match go through the same code whatever the
/// database locale.
pub fn search_form(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = questions)]
pub struct NewQuestion {
    pub subject: String,
    pub content: String,
    pub subject_search: String,
    pub content_search: String,
    pub create_date: DateTime<Utc>,
    pub user_id: Uuid,
}

impl NewQuestion {
    pub fn new(subject: String, content: String, create_date: DateTime<Utc>, user_id: Uuid) -> Self {
        Self {
            subject_search: search_form(&subject),
            content_search: search_form(&content),
            subject,
            content,
            create_date,
            user_id,
        }
    }
}

/// Identity and owner; listings read through `QuestionSummary`.
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = questions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Question {
    pub id: Uuid,
    pub user_id: Uuid,
}

/// Editable fields; the owner never changes.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = questions)]
pub struct QuestionChanges {
    pub subject: String,
    pub content: String,
    pub subject_search: String,
    pub content_search: String,
    pub create_date: DateTime<Utc>,
}

impl QuestionChanges {
    pub fn new(subject: String, content: String, create_date: DateTime<Utc>) -> Self {
        Self {
            subject_search: search_form(&subject),
            content_search: search_form(&content),
            subject,
            content,
            create_date,
        }
    }
}
