use crate::db::schema::answers;
use chrono::{DateTime, Utc};
use diesel::{AsChangeset, Insertable, Queryable, Selectable};
use uuid::Uuid;

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = answers)]
pub struct NewAnswer {
    pub question_id: Uuid,
    pub content: String,
    pub create_date: DateTime<Utc>,
    pub user_id: Uuid,
}

/// Identity and owner; listings read through `AnswerSummary`.
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = answers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Answer {
    pub id: Uuid,
    pub user_id: Uuid,
}

#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = answers)]
pub struct AnswerChanges {
    pub content: String,
    pub create_date: DateTime<Utc>,
}
