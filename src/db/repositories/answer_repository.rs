use crate::db::error::RepositoryError;
use crate::db::models::answer::{Answer, AnswerChanges, NewAnswer};
use crate::db::schema::answers;
use diesel::prelude::*;
use uuid::Uuid;

pub struct AnswerRepository;

impl AnswerRepository {
    pub fn find_by_id(conn: &mut PgConnection, id: Uuid) -> Result<Option<Answer>, RepositoryError> {
        answers::table
            .find(id)
            .select(Answer::as_select())
            .first(conn)
            .optional()
            .map_err(Into::into)
    }

    pub fn create(conn: &mut PgConnection, new_answer: &NewAnswer) -> Result<Answer, RepositoryError> {
        diesel::insert_into(answers::table)
            .values(new_answer)
            .returning(Answer::as_returning())
            .get_result(conn)
            .map_err(Into::into)
    }

    pub fn update(
        conn: &mut PgConnection,
        id: Uuid,
        changes: &AnswerChanges,
    ) -> Result<Answer, RepositoryError> {
        diesel::update(answers::table.find(id))
            .set(changes)
            .returning(Answer::as_returning())
            .get_result(conn)
            .map_err(Into::into)
    }

    pub fn delete(conn: &mut PgConnection, id: Uuid) -> Result<(), RepositoryError> {
        diesel::delete(answers::table.find(id)).execute(conn)?;
        Ok(())
    }
}
