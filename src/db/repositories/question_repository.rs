use crate::db::error::RepositoryError;
use crate::db::models::question::{NewQuestion, Question, QuestionChanges};
use crate::db::schema::questions;
use diesel::prelude::*;
use uuid::Uuid;

pub struct QuestionRepository;

impl QuestionRepository {
    pub fn find_by_id(
        conn: &mut PgConnection,
        id: Uuid,
    ) -> Result<Option<Question>, RepositoryError> {
        questions::table
            .find(id)
            .select(Question::as_select())
            .first(conn)
            .optional()
            .map_err(Into::into)
    }

    pub fn create(
        conn: &mut PgConnection,
        new_question: &NewQuestion,
    ) -> Result<Question, RepositoryError> {
        diesel::insert_into(questions::table)
            .values(new_question)
            .returning(Question::as_returning())
            .get_result(conn)
            .map_err(Into::into)
    }

    pub fn update(
        conn: &mut PgConnection,
        id: Uuid,
        changes: &QuestionChanges,
    ) -> Result<Question, RepositoryError> {
        diesel::update(questions::table.find(id))
            .set(changes)
            .returning(Question::as_returning())
            .get_result(conn)
            .map_err(Into::into)
    }

    /// Answers, toggles and views go with it (ON DELETE CASCADE).
    pub fn delete(conn: &mut PgConnection, id: Uuid) -> Result<(), RepositoryError> {
        diesel::delete(questions::table.find(id)).execute(conn)?;
        Ok(())
    }

    /// Row-locks the question for the rest of the transaction.
    /// Returns `false` when it does not exist.
    pub fn lock(conn: &mut PgConnection, id: Uuid) -> Result<bool, RepositoryError> {
        let locked = questions::table
            .find(id)
            .select(questions::id)
            .for_update()
            .first::<Uuid>(conn)
            .optional()?;
        Ok(locked.is_some())
    }

    pub fn increment_view_count(conn: &mut PgConnection, id: Uuid) -> Result<(), RepositoryError> {
        let updated = diesel::update(questions::table.find(id))
            .set(questions::view_count.eq(questions::view_count + 1))
            .execute(conn)?;

        if updated == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
