use crate::db::error::RepositoryError;
use crate::db::models::question_view::NewQuestionView;
use crate::db::schema::question_views;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

pub struct ViewRepository;

impl ViewRepository {
    /// Whether `user_id` has a counted view of the question strictly after `since`.
    pub fn seen_since(
        conn: &mut PgConnection,
        question_id: Uuid,
        user_id: Uuid,
        since: DateTime<Utc>,
    ) -> Result<bool, RepositoryError> {
        diesel::select(diesel::dsl::exists(
            question_views::table
                .filter(question_views::question_id.eq(question_id))
                .filter(question_views::user_id.eq(user_id))
                .filter(question_views::created_at.gt(since)),
        ))
        .get_result(conn)
        .map_err(Into::into)
    }

    pub fn create(conn: &mut PgConnection, view: &NewQuestionView) -> Result<(), RepositoryError> {
        diesel::insert_into(question_views::table)
            .values(view)
            .execute(conn)?;
        Ok(())
    }

    #[cfg(test)]
    pub fn count_for(
        conn: &mut PgConnection,
        question_id: Uuid,
        user_id: Uuid,
    ) -> Result<i64, RepositoryError> {
        question_views::table
            .filter(question_views::question_id.eq(question_id))
            .filter(question_views::user_id.eq(user_id))
            .count()
            .get_result(conn)
            .map_err(Into::into)
    }
}
