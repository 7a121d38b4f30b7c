use crate::db::error::RepositoryError;
use crate::db::functions::lower;
use crate::db::models::unverified_user::{NewUnverifiedUser, UnverifiedUser};
use crate::db::schema::unverified_users;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

pub const PENDING_USERNAME_UNIQUE_INDEX: &str = "unverified_users_username_lower_key";

/// Pending signups waiting for their email to be confirmed.
pub struct UnverifiedUserRepository;

impl UnverifiedUserRepository {
    pub fn find_by_token(
        conn: &mut PgConnection,
        token: &str,
    ) -> Result<Option<UnverifiedUser>, RepositoryError> {
        unverified_users::table
            .filter(unverified_users::token.eq(token))
            .select(UnverifiedUser::as_select())
            .first(conn)
            .optional()
            .map_err(Into::into)
    }

    pub fn find_by_email(
        conn: &mut PgConnection,
        email: &str,
    ) -> Result<Option<UnverifiedUser>, RepositoryError> {
        unverified_users::table
            .filter(lower(unverified_users::email).eq(lower(email)))
            .select(UnverifiedUser::as_select())
            .first(conn)
            .optional()
            .map_err(Into::into)
    }

    pub fn find_by_username(
        conn: &mut PgConnection,
        username: &str,
    ) -> Result<Option<UnverifiedUser>, RepositoryError> {
        unverified_users::table
            .filter(lower(unverified_users::username).eq(lower(username)))
            .select(UnverifiedUser::as_select())
            .first(conn)
            .optional()
            .map_err(Into::into)
    }

    pub fn create(
        conn: &mut PgConnection,
        pending: &NewUnverifiedUser,
    ) -> Result<UnverifiedUser, RepositoryError> {
        diesel::insert_into(unverified_users::table)
            .values(pending)
            .returning(UnverifiedUser::as_returning())
            .get_result(conn)
            .map_err(Into::into)
    }

    /// Remplace username, mot de passe, token et date d'une inscription en attente
    pub fn refresh(
        conn: &mut PgConnection,
        id: Uuid,
        pending: &NewUnverifiedUser,
    ) -> Result<UnverifiedUser, RepositoryError> {
        diesel::update(unverified_users::table.find(id))
            .set(pending)
            .returning(UnverifiedUser::as_returning())
            .get_result(conn)
            .map_err(Into::into)
    }

    pub fn delete(conn: &mut PgConnection, id: Uuid) -> Result<(), RepositoryError> {
        diesel::delete(unverified_users::table.find(id)).execute(conn)?;
        Ok(())
    }

    /// Deletes pending signups created before `cutoff`, returning how many went.
    pub fn delete_created_before(
        conn: &mut PgConnection,
        cutoff: DateTime<Utc>,
    ) -> Result<usize, RepositoryError> {
        diesel::delete(unverified_users::table.filter(unverified_users::create_date.lt(cutoff)))
            .execute(conn)
            .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connection::test_connection;
    use chrono::Duration;

    fn pending(created: DateTime<Utc>) -> NewUnverifiedUser {
        let tag = Uuid::new_v4().simple().to_string();
        NewUnverifiedUser {
            username: format!("pending{tag}"),
            password_hash: "hash".to_string(),
            email: format!("pending_{tag}@example.com"),
            token: format!("token_{tag}"),
            create_date: created,
        }
    }

    #[test]
    #[ignore = "requires DATABASE_URL pointing at PostgreSQL"]
    fn find_by_token_and_email() {
        let mut conn = test_connection();
        let new_pending = pending(Utc::now());
        let created = UnverifiedUserRepository::create(&mut conn, &new_pending).expect("create");

        let by_token = UnverifiedUserRepository::find_by_token(&mut conn, &new_pending.token)
            .expect("query")
            .expect("pending row");
        assert_eq!(by_token.id, created.id);

        let by_email =
            UnverifiedUserRepository::find_by_email(&mut conn, &new_pending.email.to_uppercase())
                .expect("query");
        assert!(by_email.is_some());
    }

    #[test]
    #[ignore = "requires DATABASE_URL pointing at PostgreSQL"]
    fn refresh_replaces_the_token() {
        let mut conn = test_connection();
        let created = UnverifiedUserRepository::create(&mut conn, &pending(Utc::now()))
            .expect("create");

        let mut replacement = pending(Utc::now());
        replacement.email = created.email.clone();
        let refreshed = UnverifiedUserRepository::refresh(&mut conn, created.id, &replacement)
            .expect("refresh");

        assert_eq!(refreshed.id, created.id);
        assert_eq!(refreshed.token, replacement.token);
        assert!(
            UnverifiedUserRepository::find_by_token(&mut conn, &created.token)
                .expect("query")
                .is_none()
        );
    }

    #[test]
    #[ignore = "requires DATABASE_URL pointing at PostgreSQL"]
    fn delete_created_before_only_removes_stale_rows() {
        let mut conn = test_connection();
        let now = Utc::now();
        let stale = UnverifiedUserRepository::create(&mut conn, &pending(now - Duration::hours(30)))
            .expect("create stale");
        let fresh = UnverifiedUserRepository::create(&mut conn, &pending(now)).expect("create fresh");

        let removed =
            UnverifiedUserRepository::delete_created_before(&mut conn, now - Duration::hours(24))
                .expect("purge");
        assert!(removed >= 1);
        assert!(
            UnverifiedUserRepository::find_by_token(&mut conn, &stale.token)
                .expect("query")
                .is_none()
        );
        assert!(
            UnverifiedUserRepository::find_by_token(&mut conn, &fresh.token)
                .expect("query")
                .is_some()
        );
    }
}
