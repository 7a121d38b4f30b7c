use crate::db::error::RepositoryError;
use crate::db::models::question_view::NewQuestionView;
use crate::db::repositories::question_repository::QuestionRepository;
use crate::db::repositories::view_repository::ViewRepository;
use chrono::{DateTime, Duration, Utc};
use diesel::Connection;
use diesel::PgConnection;
use uuid::Uuid;

/// A user's repeat views inside this window are not counted again.
pub const DEDUP_WINDOW_SECONDS: i64 = 3600;

/// Earliest `created_at` (exclusive) that still suppresses a new view at `now`.
pub fn window_start(now: DateTime<Utc>) -> DateTime<Utc> {
    now - Duration::seconds(DEDUP_WINDOW_SECONDS)
}

/// Counts a view of `question_id` by `user_id` unless one was counted within
/// the last hour. Returns whether the view was counted.
pub fn record_view(
    conn: &mut PgConnection,
    question_id: Uuid,
    user_id: Uuid,
    now: DateTime<Utc>,
) -> Result<bool, RepositoryError> {
    conn.transaction(|conn| {
        // serializes concurrent first views by the same user
        if !QuestionRepository::lock(conn, question_id)? {
            return Err(RepositoryError::NotFound);
        }

        if ViewRepository::seen_since(conn, question_id, user_id, window_start(now))? {
            return Ok(false);
        }

        QuestionRepository::increment_view_count(conn, question_id)?;
        ViewRepository::create(
            conn,
            &NewQuestionView {
                question_id,
                user_id,
                created_at: now,
            },
        )?;

        tracing::debug!(%question_id, %user_id, "View counted");
        Ok(true)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connection::test_connection;
    use crate::db::models::question::NewQuestion;
    use crate::db::models::user::NewUser;
    use crate::db::repositories::user_repository::UserRepository;
    use crate::db::schema::questions;
    use diesel::prelude::*;

    #[test]
    fn window_is_one_hour() {
        let now = Utc::now();
        assert_eq!(now - window_start(now), Duration::hours(1));
    }

    fn setup(conn: &mut PgConnection) -> (Uuid, Uuid) {
        let name = format!("viewer{}", Uuid::new_v4().simple());
        let user = UserRepository::create(conn, &NewUser::local(name, "hash".to_string(), Utc::now()))
            .expect("create user");
        let question = QuestionRepository::create(
            conn,
            &NewQuestion::new("Viewed".to_string(), "Body".to_string(), Utc::now(), user.id),
        )
        .expect("create question");
        (question.id, user.id)
    }

    fn view_count(conn: &mut PgConnection, id: Uuid) -> i32 {
        questions::table
            .find(id)
            .select(questions::view_count)
            .first(conn)
            .expect("view count")
    }

    #[test]
    #[ignore = "requires DATABASE_URL pointing at PostgreSQL"]
    fn repeat_view_within_window_counts_once() {
        let mut conn = test_connection();
        let (question, user) = setup(&mut conn);
        let now = Utc::now();

        assert!(record_view(&mut conn, question, user, now).expect("first"));
        assert!(!record_view(&mut conn, question, user, now + Duration::minutes(59)).expect("second"));
        assert_eq!(view_count(&mut conn, question), 1);
        assert_eq!(ViewRepository::count_for(&mut conn, question, user).expect("count"), 1);
    }

    #[test]
    #[ignore = "requires DATABASE_URL pointing at PostgreSQL"]
    fn view_after_window_counts_again() {
        let mut conn = test_connection();
        let (question, user) = setup(&mut conn);
        let now = Utc::now();

        assert!(record_view(&mut conn, question, user, now).expect("first"));
        // exactly one hour later the earlier row is no longer strictly inside the window
        assert!(record_view(&mut conn, question, user, now + Duration::hours(1)).expect("second"));
        assert_eq!(view_count(&mut conn, question), 2);
    }

    #[test]
    #[ignore = "requires DATABASE_URL pointing at PostgreSQL"]
    fn unknown_question_is_not_found() {
        let mut conn = test_connection();
        let (_, user) = setup(&mut conn);

        let err = record_view(&mut conn, Uuid::new_v4(), user, Utc::now()).expect_err("missing");
        assert!(matches!(err, RepositoryError::NotFound));
    }
}
