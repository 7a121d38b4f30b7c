use crate::db::error::RepositoryError;
use crate::db::functions::{lower, lower_nullable};
use crate::db::models::user::{NewUser, User};
use crate::db::schema::users;
use diesel::prelude::*;
use uuid::Uuid;

pub const USERNAME_UNIQUE_INDEX: &str = "users_username_lower_key";
pub const EMAIL_UNIQUE_INDEX: &str = "users_email_lower_key";

pub struct UserRepository;

impl UserRepository {
    /// Trouver un utilisateur par ID
    pub fn find_by_id(conn: &mut PgConnection, id: Uuid) -> Result<Option<User>, RepositoryError> {
        users::table
            .find(id)
            .select(User::as_select())
            .first(conn)
            .optional()
            .map_err(Into::into)
    }

    /// Usernames are unique ignoring case, so this matches at most one row.
    pub fn find_by_username(
        conn: &mut PgConnection,
        username: &str,
    ) -> Result<Option<User>, RepositoryError> {
        users::table
            .filter(lower(users::username).eq(lower(username)))
            .select(User::as_select())
            .first(conn)
            .optional()
            .map_err(Into::into)
    }

    pub fn find_by_email(
        conn: &mut PgConnection,
        email: &str,
    ) -> Result<Option<User>, RepositoryError> {
        users::table
            .filter(lower_nullable(users::email).eq(lower_nullable(email)))
            .select(User::as_select())
            .first(conn)
            .optional()
            .map_err(Into::into)
    }

    pub fn find_by_oauth(
        conn: &mut PgConnection,
        provider: &str,
        subject: &str,
    ) -> Result<Option<User>, RepositoryError> {
        users::table
            .filter(users::oauth_provider.eq(provider))
            .filter(users::oauth_id.eq(subject))
            .select(User::as_select())
            .first(conn)
            .optional()
            .map_err(Into::into)
    }

    pub fn username_taken(conn: &mut PgConnection, username: &str) -> Result<bool, RepositoryError> {
        diesel::select(diesel::dsl::exists(
            users::table.filter(lower(users::username).eq(lower(username))),
        ))
        .get_result(conn)
        .map_err(Into::into)
    }

    /// Créer un nouvel utilisateur
    pub fn create(conn: &mut PgConnection, new_user: &NewUser) -> Result<User, RepositoryError> {
        diesel::insert_into(users::table)
            .values(new_user)
            .returning(User::as_returning())
            .get_result(conn)
            .map_err(Into::into)
    }

    /// Attache une identité externe à un compte existant
    pub fn link_oauth(
        conn: &mut PgConnection,
        id: Uuid,
        provider: &str,
        subject: Option<&str>,
    ) -> Result<User, RepositoryError> {
        diesel::update(users::table.find(id))
            .set((
                users::oauth_provider.eq(Some(provider)),
                users::oauth_id.eq(subject),
            ))
            .returning(User::as_returning())
            .get_result(conn)
            .map_err(Into::into)
    }
}
