use crate::db::schema::unverified_users;
use chrono::{DateTime, Duration, Utc};
use diesel::{AsChangeset, Insertable, Queryable, Selectable};
use uuid::Uuid;

/// How long an emailed verification link stays valid.
pub const VERIFICATION_TTL_SECONDS: i64 = 86_400;

#[derive(Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = unverified_users)]
pub struct NewUnverifiedUser {
    pub username: String,
    pub password_hash: String,
    pub email: String,
    pub token: String,
    pub create_date: DateTime<Utc>,
}

#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = unverified_users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UnverifiedUser {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub email: String,
    pub token: String,
    pub create_date: DateTime<Utc>,
}

impl UnverifiedUser {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now - self.create_date > Duration::seconds(VERIFICATION_TTL_SECONDS)
    }
}

/// Oldest `create_date` a pending signup may have and still be valid at `now`.
pub fn expiry_cutoff(now: DateTime<Utc>) -> DateTime<Utc> {
    now - Duration::seconds(VERIFICATION_TTL_SECONDS)
}
