//! Question and answer listings.
//!
//! Listings join each item with its author and the grouped toggle/answer
//! counts. Grouped counts come from LEFT OUTER JOINs so items nobody liked
//! still show up with a zero count. Keyword search matches against the
//! `*_search` columns written with [`search_form`]; the keyword only ever
//! travels as a bind parameter.

use crate::db::error::RepositoryError;
use crate::db::models::question::search_form;
use crate::db::models::summary::{AnswerSummary, CountRow, QuestionSummary};
use crate::db::repositories::toggle_repository::ToggleKind;
use crate::board::pagination::build_page;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Text, Uuid as SqlUuid};
use qna_board_api::{PageResponse, QuestionListQuery, QuestionResponse};
use uuid::Uuid;

pub const PER_PAGE_CHOICES: [i64; 4] = [10, 30, 50, 100];
pub const DEFAULT_PER_PAGE: i64 = 10;

const QUESTION_SELECT: &str = "\
SELECT q.id, q.subject, q.content, q.create_date, q.user_id, \
u.username AS author_username, q.view_count, \
COALESCE(ql.cnt, 0) AS like_count, \
COALESCE(qb.cnt, 0) AS bookmark_count, \
COALESCE(qa.cnt, 0) AS answer_count \
FROM questions q \
JOIN users u ON u.id = q.user_id \
LEFT OUTER JOIN (SELECT question_id, COUNT(*) AS cnt FROM question_likes GROUP BY question_id) ql \
ON ql.question_id = q.id \
LEFT OUTER JOIN (SELECT question_id, COUNT(*) AS cnt FROM question_bookmarks GROUP BY question_id) qb \
ON qb.question_id = q.id \
LEFT OUTER JOIN (SELECT question_id, COUNT(*) AS cnt FROM answers GROUP BY question_id) qa \
ON qa.question_id = q.id";

const ANSWER_SELECT: &str = "\
SELECT a.id, a.question_id, a.content, a.create_date, a.user_id, \
u.username AS author_username, \
COALESCE(al.cnt, 0) AS like_count, \
COALESCE(ab.cnt, 0) AS bookmark_count \
FROM answers a \
JOIN users u ON u.id = a.user_id \
LEFT OUTER JOIN (SELECT answer_id, COUNT(*) AS cnt FROM answer_likes GROUP BY answer_id) al \
ON al.answer_id = a.id \
LEFT OUTER JOIN (SELECT answer_id, COUNT(*) AS cnt FROM answer_bookmarks GROUP BY answer_id) ab \
ON ab.answer_id = a.id";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuestionSort {
    #[default]
    Recent,
    Oldest,
    LikesDesc,
    LikesAsc,
    BookmarksDesc,
    BookmarksAsc,
    ViewsDesc,
    ViewsAsc,
}

impl QuestionSort {
    /// Unknown or missing values fall back to [`QuestionSort::Recent`].
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("oldest") => Self::Oldest,
            Some("likes_desc") => Self::LikesDesc,
            Some("likes_asc") => Self::LikesAsc,
            Some("bookmarks_desc") => Self::BookmarksDesc,
            Some("bookmarks_asc") => Self::BookmarksAsc,
            Some("views_desc") => Self::ViewsDesc,
            Some("views_asc") => Self::ViewsAsc,
            _ => Self::Recent,
        }
    }

    fn order_by(self) -> &'static str {
        match self {
            Self::Recent => "q.create_date DESC, q.id DESC",
            Self::Oldest => "q.create_date ASC, q.id ASC",
            Self::LikesDesc => "COALESCE(ql.cnt, 0) DESC, q.create_date DESC, q.id DESC",
            Self::LikesAsc => "COALESCE(ql.cnt, 0) ASC, q.create_date DESC, q.id DESC",
            Self::BookmarksDesc => "COALESCE(qb.cnt, 0) DESC, q.create_date DESC, q.id DESC",
            Self::BookmarksAsc => "COALESCE(qb.cnt, 0) ASC, q.create_date DESC, q.id DESC",
            Self::ViewsDesc => "q.view_count DESC, q.create_date DESC, q.id DESC",
            Self::ViewsAsc => "q.view_count ASC, q.create_date DESC, q.id DESC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnswerSort {
    #[default]
    Recent,
    LikesDesc,
    LikesAsc,
}

impl AnswerSort {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("likes_desc") => Self::LikesDesc,
            Some("likes_asc") => Self::LikesAsc,
            _ => Self::Recent,
        }
    }

    fn order_by(self) -> &'static str {
        match self {
            Self::Recent => "a.create_date DESC, a.id DESC",
            Self::LikesDesc => "COALESCE(al.cnt, 0) DESC, a.create_date DESC, a.id DESC",
            Self::LikesAsc => "COALESCE(al.cnt, 0) ASC, a.create_date DESC, a.id DESC",
        }
    }
}

/// Whether an activity listing follows likes or bookmarks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Likes,
    Bookmarks,
}

impl Relation {
    pub fn question_kind(self) -> ToggleKind {
        match self {
            Relation::Likes => ToggleKind::QuestionLike,
            Relation::Bookmarks => ToggleKind::QuestionBookmark,
        }
    }

    pub fn answer_kind(self) -> ToggleKind {
        match self {
            Relation::Likes => ToggleKind::AnswerLike,
            Relation::Bookmarks => ToggleKind::AnswerBookmark,
        }
    }
}

pub fn normalize_per_page(raw: Option<&str>) -> i64 {
    raw.and_then(|value| value.trim().parse::<i64>().ok())
        .filter(|value| PER_PAGE_CHOICES.contains(value))
        .unwrap_or(DEFAULT_PER_PAGE)
}

pub fn normalize_page(raw: Option<&str>) -> i64 {
    raw.and_then(|value| value.trim().parse::<i64>().ok())
        .unwrap_or(1)
        .max(1)
}

/// Lowercased keyword with every whitespace character removed, or `None`
/// when nothing is left.
pub fn normalize_keyword(raw: Option<&str>) -> Option<String> {
    let squeezed = search_form(raw?);
    (!squeezed.is_empty()).then_some(squeezed)
}

/// A normalized question listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionListing {
    pub keyword: Option<String>,
    pub sort: QuestionSort,
    pub page: i64,
    pub per_page: i64,
}

impl Default for QuestionListing {
    fn default() -> Self {
        Self {
            keyword: None,
            sort: QuestionSort::Recent,
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl From<&QuestionListQuery> for QuestionListing {
    fn from(query: &QuestionListQuery) -> Self {
        Self {
            keyword: normalize_keyword(query.kw.as_deref()),
            sort: QuestionSort::parse(query.sort.as_deref()),
            page: normalize_page(query.page.as_deref()),
            per_page: normalize_per_page(query.per_page.as_deref()),
        }
    }
}

impl QuestionListing {
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.per_page)
    }

    fn filter_sql(&self) -> &'static str {
        if self.keyword.is_some() {
            " WHERE (strpos(q.subject_search, $1) > 0 OR strpos(q.content_search, $1) > 0)"
        } else {
            ""
        }
    }

    fn page_sql(&self) -> String {
        let (limit, offset) = if self.keyword.is_some() {
            ("$2", "$3")
        } else {
            ("$1", "$2")
        };
        format!(
            "{QUESTION_SELECT}{} ORDER BY {} LIMIT {limit} OFFSET {offset}",
            self.filter_sql(),
            self.sort.order_by()
        )
    }

    fn count_sql(&self) -> String {
        format!("SELECT COUNT(*) AS total FROM questions q{}", self.filter_sql())
    }

    pub fn count(&self, conn: &mut PgConnection) -> Result<i64, RepositoryError> {
        let mut query = diesel::sql_query(self.count_sql()).into_boxed::<Pg>();
        if let Some(keyword) = &self.keyword {
            query = query.bind::<Text, _>(keyword.clone());
        }
        let row: CountRow = query.get_result(conn)?;
        Ok(row.total)
    }

    pub fn fetch(
        &self,
        conn: &mut PgConnection,
    ) -> Result<PageResponse<QuestionResponse>, RepositoryError> {
        let total = self.count(conn)?;

        let mut query = diesel::sql_query(self.page_sql()).into_boxed::<Pg>();
        if let Some(keyword) = &self.keyword {
            query = query.bind::<Text, _>(keyword.clone());
        }
        let rows: Vec<QuestionSummary> = query
            .bind::<BigInt, _>(self.per_page)
            .bind::<BigInt, _>(self.offset())
            .load(conn)?;

        tracing::debug!(
            keyword = ?self.keyword,
            sort = ?self.sort,
            page = self.page,
            per_page = self.per_page,
            total,
            "Listed questions"
        );

        Ok(build_page(
            rows.into_iter().map(QuestionResponse::from).collect(),
            self.page,
            self.per_page,
            total,
        ))
    }
}

pub fn fetch_question(
    conn: &mut PgConnection,
    id: Uuid,
) -> Result<Option<QuestionSummary>, RepositoryError> {
    diesel::sql_query(format!("{QUESTION_SELECT} WHERE q.id = $1"))
        .bind::<SqlUuid, _>(id)
        .get_result(conn)
        .optional()
        .map_err(Into::into)
}

fn toggled_join(kind: ToggleKind, alias: &str) -> String {
    format!(
        " JOIN {table} t ON t.{column} = {alias}.id AND t.user_id = $1",
        table = kind.table_name(),
        column = kind.item_column(),
    )
}

/// Questions the user liked or bookmarked, most recently toggled first.
pub fn fetch_toggled_questions(
    conn: &mut PgConnection,
    relation: Relation,
    user_id: Uuid,
) -> Result<Vec<QuestionSummary>, RepositoryError> {
    let sql = format!(
        "{QUESTION_SELECT}{} ORDER BY t.create_date DESC, q.id DESC",
        toggled_join(relation.question_kind(), "q")
    );
    diesel::sql_query(sql)
        .bind::<SqlUuid, _>(user_id)
        .load(conn)
        .map_err(Into::into)
}

pub fn fetch_answers(
    conn: &mut PgConnection,
    question_id: Uuid,
    sort: AnswerSort,
) -> Result<Vec<AnswerSummary>, RepositoryError> {
    let sql = format!(
        "{ANSWER_SELECT} WHERE a.question_id = $1 ORDER BY {}",
        sort.order_by()
    );
    diesel::sql_query(sql)
        .bind::<SqlUuid, _>(question_id)
        .load(conn)
        .map_err(Into::into)
}

pub fn fetch_answer(
    conn: &mut PgConnection,
    id: Uuid,
) -> Result<Option<AnswerSummary>, RepositoryError> {
    diesel::sql_query(format!("{ANSWER_SELECT} WHERE a.id = $1"))
        .bind::<SqlUuid, _>(id)
        .get_result(conn)
        .optional()
        .map_err(Into::into)
}

/// Answers the user liked or bookmarked, most recently toggled first.
pub fn fetch_toggled_answers(
    conn: &mut PgConnection,
    relation: Relation,
    user_id: Uuid,
) -> Result<Vec<AnswerSummary>, RepositoryError> {
    let sql = format!(
        "{ANSWER_SELECT}{} ORDER BY t.create_date DESC, a.id DESC",
        toggled_join(relation.answer_kind(), "a")
    );
    diesel::sql_query(sql)
        .bind::<SqlUuid, _>(user_id)
        .load(conn)
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn per_page_outside_choices_falls_back() {
        assert_eq!(normalize_per_page(Some("7")), 10);
        assert_eq!(normalize_per_page(Some("abc")), 10);
        assert_eq!(normalize_per_page(None), 10);
        assert_eq!(normalize_per_page(Some("50")), 50);
        assert_eq!(normalize_per_page(Some(" 100 ")), 100);
    }

    #[test]
    fn page_below_one_is_one() {
        assert_eq!(normalize_page(Some("0")), 1);
        assert_eq!(normalize_page(Some("-3")), 1);
        assert_eq!(normalize_page(Some("x")), 1);
        assert_eq!(normalize_page(None), 1);
        assert_eq!(normalize_page(Some("4")), 4);
    }

    #[test]
    fn keyword_is_squeezed_and_lowercased() {
        assert_eq!(normalize_keyword(Some("Hello World")), Some("helloworld".to_string()));
        assert_eq!(normalize_keyword(Some("  \t\n ")), None);
        assert_eq!(normalize_keyword(Some("")), None);
        assert_eq!(normalize_keyword(Some("\u{3000}\u{00a0}")), None);
        assert_eq!(normalize_keyword(Some("Nb\u{00a0}Sp")), Some("nbsp".to_string()));
        assert_eq!(normalize_keyword(None), None);
    }

    #[test]
    fn unknown_sort_is_recent() {
        assert_eq!(QuestionSort::parse(Some("popular")), QuestionSort::Recent);
        assert_eq!(QuestionSort::parse(None), QuestionSort::Recent);
        assert_eq!(QuestionSort::parse(Some("views_asc")), QuestionSort::ViewsAsc);
        assert_eq!(AnswerSort::parse(Some("oldest")), AnswerSort::Recent);
        assert_eq!(AnswerSort::parse(Some("likes_desc")), AnswerSort::LikesDesc);
    }

    #[test]
    fn query_parameters_are_normalized() {
        let query = QuestionListQuery {
            kw: Some(" Rust  Axum ".to_string()),
            sort: Some("likes_desc".to_string()),
            page: Some("3".to_string()),
            per_page: Some("30".to_string()),
        };
        let listing = QuestionListing::from(&query);
        assert_eq!(listing.keyword.as_deref(), Some("rustaxum"));
        assert_eq!(listing.sort, QuestionSort::LikesDesc);
        assert_eq!(listing.offset(), 60);

        let defaults = QuestionListing::from(&QuestionListQuery::default());
        assert_eq!(defaults, QuestionListing::default());
        assert_eq!(defaults.offset(), 0);
    }

    #[test]
    fn plain_listing_binds_limit_first() {
        let sql = QuestionListing::default().page_sql();
        assert!(!sql.contains("WHERE"));
        assert!(sql.ends_with("ORDER BY q.create_date DESC, q.id DESC LIMIT $1 OFFSET $2"));
    }

    #[test]
    fn keyword_listing_filters_subject_or_content() {
        let listing = QuestionListing {
            keyword: Some("helloworld".to_string()),
            ..QuestionListing::default()
        };
        let sql = listing.page_sql();
        assert!(sql.contains("strpos(q.subject_search, $1) > 0"));
        assert!(sql.contains("OR strpos(q.content_search, $1) > 0"));
        assert!(sql.ends_with("LIMIT $2 OFFSET $3"));
        assert!(listing.count_sql().contains("WHERE"));
    }

    #[test]
    fn aggregate_sorts_break_ties_by_date() {
        for sort in [
            QuestionSort::LikesDesc,
            QuestionSort::LikesAsc,
            QuestionSort::BookmarksDesc,
            QuestionSort::BookmarksAsc,
            QuestionSort::ViewsDesc,
            QuestionSort::ViewsAsc,
        ] {
            assert!(sort.order_by().ends_with("q.create_date DESC, q.id DESC"));
        }
        assert!(QUESTION_SELECT.contains("LEFT OUTER JOIN (SELECT question_id, COUNT(*) AS cnt FROM question_likes"));
    }

    #[test]
    fn toggled_join_uses_kind_table() {
        let join = toggled_join(Relation::Bookmarks.answer_kind(), "a");
        assert_eq!(
            join,
            " JOIN answer_bookmarks t ON t.answer_id = a.id AND t.user_id = $1"
        );
    }
}

#[cfg(test)]
mod store_tests {
    use super::*;
    use crate::board::toggle::toggle;
    use crate::board::views::record_view;
    use crate::db::connection::test_connection;
    use crate::db::models::question::NewQuestion;
    use crate::db::models::user::NewUser;
    use crate::db::repositories::question_repository::QuestionRepository;
    use crate::db::repositories::user_repository::UserRepository;
    use chrono::{DateTime, Duration, Utc};

    fn create_user(conn: &mut PgConnection) -> Uuid {
        let name = format!("lister{}", Uuid::new_v4().simple());
        UserRepository::create(conn, &NewUser::local(name, "hash".to_string(), Utc::now()))
            .expect("create user")
            .id
    }

    fn create_question(
        conn: &mut PgConnection,
        owner: Uuid,
        subject: &str,
        created: DateTime<Utc>,
    ) -> Uuid {
        QuestionRepository::create(
            conn,
            &NewQuestion::new(subject.to_string(), "content".to_string(), created, owner),
        )
        .expect("create question")
        .id
    }

    fn listing(keyword: Option<&str>, sort: QuestionSort) -> QuestionListing {
        QuestionListing {
            keyword: normalize_keyword(keyword),
            sort,
            page: 1,
            per_page: 100,
        }
    }

    #[test]
    #[ignore = "requires DATABASE_URL pointing at PostgreSQL"]
    fn keyword_ignores_whitespace_and_case() {
        let mut conn = test_connection();
        let owner = create_user(&mut conn);
        let tag = Uuid::new_v4().simple().to_string();
        let spaced = create_question(&mut conn, owner, &format!("Hello   World {tag}"), Utc::now());
        let joined = create_question(&mut conn, owner, &format!("helloworld {tag}"), Utc::now());
        let other = create_question(&mut conn, owner, &format!("goodbye {tag}"), Utc::now());

        let page = listing(Some(&format!("hello world {tag}")), QuestionSort::Recent)
            .fetch(&mut conn)
            .expect("list");
        let ids: Vec<Uuid> = page.items.iter().map(|q| q.id).collect();
        assert!(ids.contains(&spaced));
        assert!(ids.contains(&joined));
        assert!(!ids.contains(&other));
        assert_eq!(page.total_items, 2);
    }

    fn ids(page: &PageResponse<QuestionResponse>) -> Vec<Uuid> {
        page.items.iter().map(|q| q.id).collect()
    }

    #[test]
    #[ignore = "requires DATABASE_URL pointing at PostgreSQL"]
    fn keyword_folds_accents_and_unicode_spaces() {
        let mut conn = test_connection();
        let owner = create_user(&mut conn);
        let tag = Uuid::new_v4().simple().to_string();
        let accented = create_question(&mut conn, owner, &format!("ÉCOLE{tag}"), Utc::now());
        let ideographic =
            create_question(&mut conn, owner, &format!("hello\u{3000}world{tag}"), Utc::now());
        let no_break = create_question(&mut conn, owner, &format!("nb\u{00a0}sp{tag}"), Utc::now());

        for (keyword, expected) in [
            (format!("école{tag}"), accented),
            (format!("hello world{tag}"), ideographic),
            (format!("nb sp{tag}"), no_break),
        ] {
            let page = listing(Some(&keyword), QuestionSort::Recent)
                .fetch(&mut conn)
                .expect("list");
            assert_eq!(page.total_items, 1, "keyword {keyword:?}");
            assert_eq!(ids(&page), vec![expected]);
        }
    }

    #[test]
    #[ignore = "requires DATABASE_URL pointing at PostgreSQL"]
    fn oldest_lists_earliest_first() {
        let mut conn = test_connection();
        let owner = create_user(&mut conn);
        let tag = Uuid::new_v4().simple().to_string();
        let now = Utc::now();
        let middle = create_question(&mut conn, owner, &format!("middle {tag}"), now - Duration::hours(2));
        let newest = create_question(&mut conn, owner, &format!("newest {tag}"), now);
        let oldest = create_question(&mut conn, owner, &format!("oldest {tag}"), now - Duration::hours(5));

        let page = listing(Some(&tag), QuestionSort::Oldest).fetch(&mut conn).expect("list");
        assert_eq!(ids(&page), vec![oldest, middle, newest]);

        let page = listing(Some(&tag), QuestionSort::Recent).fetch(&mut conn).expect("list");
        assert_eq!(ids(&page), vec![newest, middle, oldest]);
    }

    #[test]
    #[ignore = "requires DATABASE_URL pointing at PostgreSQL"]
    fn bookmark_sorts_follow_bookmark_count() {
        let mut conn = test_connection();
        let owner = create_user(&mut conn);
        let reader = create_user(&mut conn);
        let tag = Uuid::new_v4().simple().to_string();
        let now = Utc::now();
        let none = create_question(&mut conn, owner, &format!("none {tag}"), now - Duration::hours(1));
        let one = create_question(&mut conn, owner, &format!("one {tag}"), now - Duration::hours(2));
        let two = create_question(&mut conn, owner, &format!("two {tag}"), now - Duration::hours(3));
        toggle(&mut conn, ToggleKind::QuestionBookmark, one, reader, now).expect("bookmark");
        toggle(&mut conn, ToggleKind::QuestionBookmark, two, reader, now).expect("bookmark");
        toggle(&mut conn, ToggleKind::QuestionBookmark, two, owner, now).expect("bookmark");

        let page = listing(Some(&tag), QuestionSort::BookmarksDesc)
            .fetch(&mut conn)
            .expect("list");
        assert_eq!(ids(&page), vec![two, one, none]);
        assert_eq!(page.items[0].bookmark_count, 2);

        let page = listing(Some(&tag), QuestionSort::BookmarksAsc)
            .fetch(&mut conn)
            .expect("list");
        assert_eq!(ids(&page), vec![none, one, two]);
    }

    #[test]
    #[ignore = "requires DATABASE_URL pointing at PostgreSQL"]
    fn view_sorts_follow_view_count() {
        let mut conn = test_connection();
        let owner = create_user(&mut conn);
        let reader = create_user(&mut conn);
        let tag = Uuid::new_v4().simple().to_string();
        let now = Utc::now();
        let unseen = create_question(&mut conn, owner, &format!("unseen {tag}"), now - Duration::hours(1));
        let seen_once = create_question(&mut conn, owner, &format!("once {tag}"), now - Duration::hours(2));
        let seen_twice = create_question(&mut conn, owner, &format!("twice {tag}"), now - Duration::hours(3));
        record_view(&mut conn, seen_once, reader, now).expect("view");
        record_view(&mut conn, seen_twice, reader, now).expect("view");
        record_view(&mut conn, seen_twice, owner, now).expect("view");

        let page = listing(Some(&tag), QuestionSort::ViewsDesc)
            .fetch(&mut conn)
            .expect("list");
        assert_eq!(ids(&page), vec![seen_twice, seen_once, unseen]);
        assert_eq!(page.items[0].view_count, 2);

        let page = listing(Some(&tag), QuestionSort::ViewsAsc)
            .fetch(&mut conn)
            .expect("list");
        assert_eq!(ids(&page), vec![unseen, seen_once, seen_twice]);
    }

    #[test]
    #[ignore = "requires DATABASE_URL pointing at PostgreSQL"]
    fn likes_desc_puts_unliked_last_by_date() {
        let mut conn = test_connection();
        let owner = create_user(&mut conn);
        let tag = Uuid::new_v4().simple().to_string();
        let now = Utc::now();
        let older = create_question(&mut conn, owner, &format!("older {tag}"), now - Duration::hours(2));
        let newer = create_question(&mut conn, owner, &format!("newer {tag}"), now - Duration::hours(1));
        let liked = create_question(&mut conn, owner, &format!("liked {tag}"), now - Duration::hours(3));
        toggle(&mut conn, ToggleKind::QuestionLike, liked, owner, now).expect("like");

        let page = listing(Some(&tag), QuestionSort::LikesDesc)
            .fetch(&mut conn)
            .expect("list");
        let ids: Vec<Uuid> = page.items.iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![liked, newer, older]);
        assert_eq!(page.items[0].like_count, 1);
        assert_eq!(page.items[2].like_count, 0);
    }

    #[test]
    #[ignore = "requires DATABASE_URL pointing at PostgreSQL"]
    fn page_past_the_end_is_empty() {
        let mut conn = test_connection();
        let owner = create_user(&mut conn);
        let tag = Uuid::new_v4().simple().to_string();
        create_question(&mut conn, owner, &format!("only {tag}"), Utc::now());

        let page = QuestionListing {
            keyword: Some(tag),
            sort: QuestionSort::Recent,
            page: 5,
            per_page: 10,
        }
        .fetch(&mut conn)
        .expect("list");
        assert!(page.items.is_empty());
        assert_eq!(page.total_items, 1);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    #[ignore = "requires DATABASE_URL pointing at PostgreSQL"]
    fn toggled_questions_newest_first() {
        let mut conn = test_connection();
        let owner = create_user(&mut conn);
        let first = create_question(&mut conn, owner, "first", Utc::now());
        let second = create_question(&mut conn, owner, "second", Utc::now());
        let now = Utc::now();
        toggle(&mut conn, ToggleKind::QuestionBookmark, first, owner, now).expect("bookmark");
        toggle(&mut conn, ToggleKind::QuestionBookmark, second, owner, now + Duration::seconds(1))
            .expect("bookmark");

        let rows = fetch_toggled_questions(&mut conn, Relation::Bookmarks, owner).expect("list");
        let ids: Vec<Uuid> = rows.iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![second, first]);
        assert!(fetch_toggled_questions(&mut conn, Relation::Likes, owner).expect("list").is_empty());
    }
}
