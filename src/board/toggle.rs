use crate::db::error::RepositoryError;
use crate::db::repositories::toggle_repository::{ToggleKind, ToggleTable, with_toggle_table};
use chrono::{DateTime, Utc};
use diesel::Connection;
use diesel::PgConnection;
use qna_board_api::ToggleResponse;
use uuid::Uuid;

/// State of a (user, item) toggle after an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleState {
    pub active: bool,
    /// Rows for the item across all users.
    pub count: i64,
}

impl From<ToggleState> for ToggleResponse {
    fn from(state: ToggleState) -> Self {
        ToggleResponse {
            active: state.active,
            count: state.count,
        }
    }
}

/// Flips the user's row for `item_id` in the table selected by `kind`.
pub fn toggle(
    conn: &mut PgConnection,
    kind: ToggleKind,
    item_id: Uuid,
    user_id: Uuid,
    now: DateTime<Utc>,
) -> Result<ToggleState, RepositoryError> {
    with_toggle_table!(kind, T => toggle_in::<T>(conn, item_id, user_id, now))
}

pub fn is_active(
    conn: &mut PgConnection,
    kind: ToggleKind,
    item_id: Uuid,
    user_id: Uuid,
) -> Result<bool, RepositoryError> {
    with_toggle_table!(kind, T => T::is_active(conn, item_id, user_id)).map_err(Into::into)
}

pub fn active_among(
    conn: &mut PgConnection,
    kind: ToggleKind,
    user_id: Uuid,
    item_ids: &[Uuid],
) -> Result<Vec<Uuid>, RepositoryError> {
    with_toggle_table!(kind, T => T::active_among(conn, user_id, item_ids)).map_err(Into::into)
}

fn toggle_in<T: ToggleTable>(
    conn: &mut PgConnection,
    item_id: Uuid,
    user_id: Uuid,
    now: DateTime<Utc>,
) -> Result<ToggleState, RepositoryError> {
    conn.transaction(|conn| {
        if !T::item_exists(conn, item_id)? {
            return Err(RepositoryError::NotFound);
        }

        let removed = T::deactivate(conn, item_id, user_id)?;
        if removed == 0 {
            let inserted = T::activate(conn, item_id, user_id, now).map_err(|e| {
                match RepositoryError::from(e) {
                    // item deleted between the existence check and the insert
                    RepositoryError::ForeignKeyViolation(_) => RepositoryError::NotFound,
                    other => other,
                }
            })?;
            if inserted == 0 {
                tracing::debug!(kind = ?T::KIND, %item_id, %user_id, "Concurrent toggle-on absorbed");
            }
        }

        let count = T::count(conn, item_id)?;
        let active = T::is_active(conn, item_id, user_id)?;

        tracing::debug!(kind = ?T::KIND, %item_id, %user_id, active, count, "Toggled");
        Ok(ToggleState { active, count })
    })
}
