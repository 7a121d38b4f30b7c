//! Storage for the four like/bookmark tables.
//!
//! The tables share one shape (`id`, item column, `user_id`, `create_date`)
//! and a unique `(item, user)` pair, so a single [`ToggleTable`] trait covers
//! them and `toggle_table!` stamps out one implementation per table.

use crate::db::schema::{
    answer_bookmarks, answer_likes, answers, question_bookmarks, question_likes, questions,
};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

/// Which toggle table an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleKind {
    QuestionLike,
    QuestionBookmark,
    AnswerLike,
    AnswerBookmark,
}

impl ToggleKind {
    pub fn table_name(self) -> &'static str {
        match self {
            ToggleKind::QuestionLike => "question_likes",
            ToggleKind::QuestionBookmark => "question_bookmarks",
            ToggleKind::AnswerLike => "answer_likes",
            ToggleKind::AnswerBookmark => "answer_bookmarks",
        }
    }

    /// Column holding the liked/bookmarked item's id.
    pub fn item_column(self) -> &'static str {
        if self.targets_question() {
            "question_id"
        } else {
            "answer_id"
        }
    }

    pub fn targets_question(self) -> bool {
        matches!(self, ToggleKind::QuestionLike | ToggleKind::QuestionBookmark)
    }

    pub fn item_label(self) -> &'static str {
        if self.targets_question() {
            "Question"
        } else {
            "Answer"
        }
    }
}

/// Row-level operations of one toggle table.
pub trait ToggleTable {
    const KIND: ToggleKind;

    fn item_exists(conn: &mut PgConnection, item_id: Uuid) -> QueryResult<bool>;

    fn is_active(conn: &mut PgConnection, item_id: Uuid, user_id: Uuid) -> QueryResult<bool>;

    /// Inserts the row; 0 means a concurrent writer already created it.
    fn activate(
        conn: &mut PgConnection,
        item_id: Uuid,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> QueryResult<usize>;

    /// Deletes the row; 0 means it was not there.
    fn deactivate(conn: &mut PgConnection, item_id: Uuid, user_id: Uuid) -> QueryResult<usize>;

    fn count(conn: &mut PgConnection, item_id: Uuid) -> QueryResult<i64>;

    /// Subset of `item_ids` the user has an active row for.
    fn active_among(
        conn: &mut PgConnection,
        user_id: Uuid,
        item_ids: &[Uuid],
    ) -> QueryResult<Vec<Uuid>>;
}

macro_rules! toggle_table {
    ($marker:ident, $kind:ident, $table:ident, $item:ident, $parent:ident) => {
        pub struct $marker;

        impl ToggleTable for $marker {
            const KIND: ToggleKind = ToggleKind::$kind;

            fn item_exists(conn: &mut PgConnection, item_id: Uuid) -> QueryResult<bool> {
                diesel::select(diesel::dsl::exists(
                    $parent::table.filter($parent::id.eq(item_id)),
                ))
                .get_result(conn)
            }

            fn is_active(
                conn: &mut PgConnection,
                item_id: Uuid,
                user_id: Uuid,
            ) -> QueryResult<bool> {
                diesel::select(diesel::dsl::exists(
                    $table::table
                        .filter($table::$item.eq(item_id))
                        .filter($table::user_id.eq(user_id)),
                ))
                .get_result(conn)
            }

            fn activate(
                conn: &mut PgConnection,
                item_id: Uuid,
                user_id: Uuid,
                now: DateTime<Utc>,
            ) -> QueryResult<usize> {
                diesel::insert_into($table::table)
                    .values((
                        $table::$item.eq(item_id),
                        $table::user_id.eq(user_id),
                        $table::create_date.eq(now),
                    ))
                    .on_conflict_do_nothing()
                    .execute(conn)
            }

            fn deactivate(
                conn: &mut PgConnection,
                item_id: Uuid,
                user_id: Uuid,
            ) -> QueryResult<usize> {
                diesel::delete(
                    $table::table
                        .filter($table::$item.eq(item_id))
                        .filter($table::user_id.eq(user_id)),
                )
                .execute(conn)
            }

            fn count(conn: &mut PgConnection, item_id: Uuid) -> QueryResult<i64> {
                $table::table
                    .filter($table::$item.eq(item_id))
                    .count()
                    .get_result(conn)
            }

            fn active_among(
                conn: &mut PgConnection,
                user_id: Uuid,
                item_ids: &[Uuid],
            ) -> QueryResult<Vec<Uuid>> {
                if item_ids.is_empty() {
                    return Ok(Vec::new());
                }
                $table::table
                    .filter($table::user_id.eq(user_id))
                    .filter($table::$item.eq_any(item_ids.to_vec()))
                    .select($table::$item)
                    .load(conn)
            }
        }
    };
}

toggle_table!(QuestionLikes, QuestionLike, question_likes, question_id, questions);
toggle_table!(QuestionBookmarks, QuestionBookmark, question_bookmarks, question_id, questions);
toggle_table!(AnswerLikes, AnswerLike, answer_likes, answer_id, answers);
toggle_table!(AnswerBookmarks, AnswerBookmark, answer_bookmarks, answer_id, answers);

/// Runs `$body` with `$t` bound to the marker type matching `$kind`.
macro_rules! with_toggle_table {
    ($kind:expr, $t:ident => $body:expr) => {
        match $kind {
            $crate::db::repositories::toggle_repository::ToggleKind::QuestionLike => {
                type $t = $crate::db::repositories::toggle_repository::QuestionLikes;
                $body
            }
            $crate::db::repositories::toggle_repository::ToggleKind::QuestionBookmark => {
                type $t = $crate::db::repositories::toggle_repository::QuestionBookmarks;
                $body
            }
            $crate::db::repositories::toggle_repository::ToggleKind::AnswerLike => {
                type $t = $crate::db::repositories::toggle_repository::AnswerLikes;
                $body
            }
            $crate::db::repositories::toggle_repository::ToggleKind::AnswerBookmark => {
                type $t = $crate::db::repositories::toggle_repository::AnswerBookmarks;
                $body
            }
        }
    };
}

pub(crate) use with_toggle_table;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_map_to_their_tables() {
        assert_eq!(QuestionLikes::KIND.table_name(), "question_likes");
        assert_eq!(QuestionBookmarks::KIND.table_name(), "question_bookmarks");
        assert_eq!(AnswerLikes::KIND.item_column(), "answer_id");
        assert_eq!(AnswerBookmarks::KIND.item_column(), "answer_id");
        assert_eq!(ToggleKind::QuestionBookmark.item_column(), "question_id");
    }

    #[test]
    fn dispatch_selects_matching_marker() {
        for kind in [
            ToggleKind::QuestionLike,
            ToggleKind::QuestionBookmark,
            ToggleKind::AnswerLike,
            ToggleKind::AnswerBookmark,
        ] {
            let dispatched = with_toggle_table!(kind, T => T::KIND);
            assert_eq!(dispatched, kind);
        }
    }
}
