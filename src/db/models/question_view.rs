use crate::db::schema::question_views;
use chrono::{DateTime, Utc};
use diesel::Insertable;
use uuid::Uuid;

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = question_views)]
pub struct NewQuestionView {
    pub question_id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}
