use crate::board::listing::{
    self, AnswerSort, QuestionListing, Relation, fetch_answer, fetch_answers, fetch_question,
};
use crate::board::{toggle, views};
use crate::db::DbPool;
use crate::db::connection::get_connection;
use crate::db::error::RepositoryError;
use crate::db::models::answer::{AnswerChanges, NewAnswer};
use crate::db::models::question::{NewQuestion, QuestionChanges};
use crate::db::models::summary::AnswerSummary;
use crate::db::repositories::answer_repository::AnswerRepository;
use crate::db::repositories::question_repository::QuestionRepository;
use crate::db::repositories::toggle_repository::ToggleKind;
use crate::error::AppError;
use chrono::Utc;
use diesel::{Connection, PgConnection};
use qna_board_api::{
    ActivityResponse, AnswerRequest, AnswerResponse, PageResponse, QuestionDetailResponse,
    QuestionListQuery, QuestionRequest, QuestionResponse, ToggleResponse,
};
use std::collections::HashSet;
use uuid::Uuid;

pub const SUBJECT_MAX_LEN: usize = 200;

/// Questions, answers, toggles and activity listings.
/// Every call takes the caller explicitly and runs in its own transaction.
pub struct BoardService {
    pool: DbPool,
}

/// Trimmed subject and content, or the reason they are rejected.
fn validate_question(request: &QuestionRequest) -> Result<(String, String), AppError> {
    let subject = request.subject.trim();
    let content = request.content.trim();

    if subject.is_empty() {
        return Err(AppError::validation("Subject is required"));
    }
    if subject.chars().count() > SUBJECT_MAX_LEN {
        return Err(AppError::validation("Subject must be at most 200 characters"));
    }
    if content.is_empty() {
        return Err(AppError::validation("Content is required"));
    }
    Ok((subject.to_string(), content.to_string()))
}

fn validate_answer(request: &AnswerRequest) -> Result<String, AppError> {
    let content = request.content.trim();
    if content.is_empty() {
        return Err(AppError::validation("Content is required"));
    }
    Ok(content.to_string())
}

fn ensure_owner(owner: Uuid, caller: Uuid, what: &str) -> Result<(), AppError> {
    if owner == caller {
        Ok(())
    } else {
        Err(AppError::forbidden(format!("Only the author may modify this {what}")))
    }
}

/// Attaches the caller's like/bookmark flags to each answer.
fn with_flags(
    conn: &mut PgConnection,
    answers: Vec<AnswerSummary>,
    viewer: Option<Uuid>,
) -> Result<Vec<AnswerResponse>, AppError> {
    let (liked, bookmarked) = match viewer {
        Some(user_id) => {
            let ids: Vec<Uuid> = answers.iter().map(|a| a.id).collect();
            let liked: HashSet<Uuid> =
                toggle::active_among(conn, ToggleKind::AnswerLike, user_id, &ids)?
                    .into_iter()
                    .collect();
            let bookmarked: HashSet<Uuid> =
                toggle::active_among(conn, ToggleKind::AnswerBookmark, user_id, &ids)?
                    .into_iter()
                    .collect();
            (liked, bookmarked)
        }
        None => (HashSet::new(), HashSet::new()),
    };

    Ok(answers
        .into_iter()
        .map(|answer| {
            let id = answer.id;
            answer.into_response(liked.contains(&id), bookmarked.contains(&id))
        })
        .collect())
}

impl BoardService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn list_questions(
        &self,
        query: &QuestionListQuery,
    ) -> Result<PageResponse<QuestionResponse>, AppError> {
        let listing = QuestionListing::from(query);
        let mut conn = get_connection(&self.pool)?;
        Ok(listing.fetch(&mut conn)?)
    }

    /// Question with its answers. Identified callers get their view counted
    /// (once per hour) and their like/bookmark flags.
    pub fn question_detail(
        &self,
        question_id: Uuid,
        viewer: Option<Uuid>,
        answer_sort: AnswerSort,
    ) -> Result<QuestionDetailResponse, AppError> {
        let mut conn = get_connection(&self.pool)?;

        conn.transaction(|conn| {
            let view_counted = match viewer {
                Some(user_id) => views::record_view(conn, question_id, user_id, Utc::now())
                    .map_err(|e| match e {
                        RepositoryError::NotFound => AppError::not_found("Question not found"),
                        other => other.into(),
                    })?,
                None => false,
            };

            let question = fetch_question(conn, question_id)?
                .ok_or_else(|| AppError::not_found("Question not found"))?;

            let (liked, bookmarked) = match viewer {
                Some(user_id) => (
                    toggle::is_active(conn, ToggleKind::QuestionLike, question_id, user_id)?,
                    toggle::is_active(conn, ToggleKind::QuestionBookmark, question_id, user_id)?,
                ),
                None => (false, false),
            };

            let answers = fetch_answers(conn, question_id, answer_sort)?;
            let answers = with_flags(conn, answers, viewer)?;

            Ok(QuestionDetailResponse {
                question: question.into(),
                answers,
                liked,
                bookmarked,
                view_counted,
            })
        })
    }

    pub fn create_question(
        &self,
        author: Uuid,
        request: &QuestionRequest,
    ) -> Result<QuestionResponse, AppError> {
        let (subject, content) = validate_question(request)?;
        let mut conn = get_connection(&self.pool)?;

        conn.transaction(|conn| {
            let question = QuestionRepository::create(
                conn,
                &NewQuestion::new(subject, content, Utc::now(), author),
            )?;
            tracing::info!(question_id = %question.id, %author, "Question created");

            fetch_question(conn, question.id)?
                .map(QuestionResponse::from)
                .ok_or_else(|| AppError::internal("Created question vanished"))
        })
    }

    /// Owner-only edit; the edit time becomes the new `create_date`.
    pub fn update_question(
        &self,
        caller: Uuid,
        question_id: Uuid,
        request: &QuestionRequest,
    ) -> Result<QuestionResponse, AppError> {
        let (subject, content) = validate_question(request)?;
        let mut conn = get_connection(&self.pool)?;

        conn.transaction(|conn| {
            let question = QuestionRepository::find_by_id(conn, question_id)?
                .ok_or_else(|| AppError::not_found("Question not found"))?;
            ensure_owner(question.user_id, caller, "question")?;

            QuestionRepository::update(
                conn,
                question_id,
                &QuestionChanges::new(subject, content, Utc::now()),
            )?;
            tracing::info!(%question_id, "Question modified");

            fetch_question(conn, question_id)?
                .map(QuestionResponse::from)
                .ok_or_else(|| AppError::not_found("Question not found"))
        })
    }

    pub fn delete_question(&self, caller: Uuid, question_id: Uuid) -> Result<(), AppError> {
        let mut conn = get_connection(&self.pool)?;

        conn.transaction(|conn| {
            let question = QuestionRepository::find_by_id(conn, question_id)?
                .ok_or_else(|| AppError::not_found("Question not found"))?;
            ensure_owner(question.user_id, caller, "question")?;

            QuestionRepository::delete(conn, question_id)?;
            tracing::info!(%question_id, "Question deleted");
            Ok(())
        })
    }

    pub fn create_answer(
        &self,
        author: Uuid,
        question_id: Uuid,
        request: &AnswerRequest,
    ) -> Result<AnswerResponse, AppError> {
        let content = validate_answer(request)?;
        let mut conn = get_connection(&self.pool)?;

        conn.transaction(|conn| {
            if QuestionRepository::find_by_id(conn, question_id)?.is_none() {
                return Err(AppError::not_found("Question not found"));
            }

            let answer = AnswerRepository::create(
                conn,
                &NewAnswer {
                    question_id,
                    content,
                    create_date: Utc::now(),
                    user_id: author,
                },
            )?;
            tracing::info!(answer_id = %answer.id, %question_id, %author, "Answer created");

            fetch_answer(conn, answer.id)?
                .map(|summary| summary.into_response(false, false))
                .ok_or_else(|| AppError::internal("Created answer vanished"))
        })
    }

    pub fn update_answer(
        &self,
        caller: Uuid,
        answer_id: Uuid,
        request: &AnswerRequest,
    ) -> Result<AnswerResponse, AppError> {
        let content = validate_answer(request)?;
        let mut conn = get_connection(&self.pool)?;

        conn.transaction(|conn| {
            let answer = AnswerRepository::find_by_id(conn, answer_id)?
                .ok_or_else(|| AppError::not_found("Answer not found"))?;
            ensure_owner(answer.user_id, caller, "answer")?;

            AnswerRepository::update(
                conn,
                answer_id,
                &AnswerChanges {
                    content,
                    create_date: Utc::now(),
                },
            )?;
            tracing::info!(%answer_id, "Answer modified");

            let summary = fetch_answer(conn, answer_id)?
                .ok_or_else(|| AppError::not_found("Answer not found"))?;
            let mut flagged = with_flags(conn, vec![summary], Some(caller))?;
            flagged
                .pop()
                .ok_or_else(|| AppError::internal("Answer flags missing"))
        })
    }

    pub fn delete_answer(&self, caller: Uuid, answer_id: Uuid) -> Result<(), AppError> {
        let mut conn = get_connection(&self.pool)?;

        conn.transaction(|conn| {
            let answer = AnswerRepository::find_by_id(conn, answer_id)?
                .ok_or_else(|| AppError::not_found("Answer not found"))?;
            ensure_owner(answer.user_id, caller, "answer")?;

            AnswerRepository::delete(conn, answer_id)?;
            tracing::info!(%answer_id, "Answer deleted");
            Ok(())
        })
    }

    pub fn toggle(
        &self,
        caller: Uuid,
        kind: ToggleKind,
        item_id: Uuid,
    ) -> Result<ToggleResponse, AppError> {
        let mut conn = get_connection(&self.pool)?;
        toggle::toggle(&mut conn, kind, item_id, caller, Utc::now())
            .map(ToggleResponse::from)
            .map_err(|e| match AppError::from(e) {
                AppError::NotFound(_) => AppError::not_found(format!("{} not found", kind.item_label())),
                other => other,
            })
    }

    /// Questions and answers the caller liked or bookmarked, newest toggle first.
    pub fn activity(&self, caller: Uuid, relation: Relation) -> Result<ActivityResponse, AppError> {
        let mut conn = get_connection(&self.pool)?;

        conn.transaction(|conn| {
            let questions = listing::fetch_toggled_questions(conn, relation, caller)?
                .into_iter()
                .map(QuestionResponse::from)
                .collect();
            let answers = listing::fetch_toggled_answers(conn, relation, caller)?;
            let answers = with_flags(conn, answers, Some(caller))?;

            Ok(ActivityResponse { questions, answers })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connection::lazy_pool;

    fn question(subject: &str, content: &str) -> QuestionRequest {
        QuestionRequest {
            subject: subject.to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn question_fields_are_trimmed_and_bounded() {
        assert_eq!(
            validate_question(&question("  Why?  ", " Because ")).expect("valid"),
            ("Why?".to_string(), "Because".to_string())
        );
        assert!(validate_question(&question("   ", "body")).is_err());
        assert!(validate_question(&question("subject", "\n")).is_err());
        assert!(validate_question(&question(&"s".repeat(200), "body")).is_ok());
        assert!(validate_question(&question(&"s".repeat(201), "body")).is_err());
    }

    #[test]
    fn empty_answer_is_rejected() {
        let request = AnswerRequest {
            content: "  ".to_string(),
        };
        assert!(matches!(validate_answer(&request), Err(AppError::Validation(_))));
    }

    #[test]
    fn only_owner_may_modify() {
        let owner = Uuid::new_v4();
        assert!(ensure_owner(owner, owner, "question").is_ok());
        assert!(matches!(
            ensure_owner(owner, Uuid::new_v4(), "answer"),
            Err(AppError::Forbidden(_))
        ));
    }

    #[test]
    fn invalid_input_fails_before_connecting() {
        let service = BoardService::new(lazy_pool());
        let err = service
            .create_question(Uuid::new_v4(), &question("", "body"))
            .expect_err("empty subject");
        assert!(matches!(err, AppError::Validation(_)));
    }
}

#[cfg(test)]
mod store_tests {
    use super::*;
    use crate::db::connection::test_pool;
    use crate::db::models::user::NewUser;
    use crate::db::repositories::user_repository::UserRepository;

    fn service() -> BoardService {
        BoardService::new(test_pool())
    }

    fn create_user(service: &BoardService) -> Uuid {
        let mut conn = get_connection(&service.pool).expect("connection");
        let name = format!("board{}", Uuid::new_v4().simple());
        UserRepository::create(&mut conn, &NewUser::local(name, "hash".to_string(), Utc::now()))
            .expect("create user")
            .id
    }

    fn request(subject: &str) -> QuestionRequest {
        QuestionRequest {
            subject: subject.to_string(),
            content: "content".to_string(),
        }
    }

    #[test]
    #[ignore = "requires DATABASE_URL pointing at PostgreSQL"]
    fn non_owner_cannot_modify_or_delete() {
        let service = service();
        let owner = create_user(&service);
        let stranger = create_user(&service);
        let question = service.create_question(owner, &request("Owned")).expect("create");

        assert!(matches!(
            service.update_question(stranger, question.id, &request("Hijacked")),
            Err(AppError::Forbidden(_))
        ));
        assert!(matches!(
            service.delete_question(stranger, question.id),
            Err(AppError::Forbidden(_))
        ));

        let updated = service
            .update_question(owner, question.id, &request("Edited"))
            .expect("owner edit");
        assert_eq!(updated.subject, "Edited");
        assert!(updated.create_date >= question.create_date);

        service.delete_question(owner, question.id).expect("owner delete");
        assert!(matches!(
            service.question_detail(question.id, None, AnswerSort::Recent),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    #[ignore = "requires DATABASE_URL pointing at PostgreSQL"]
    fn detail_counts_views_and_reports_flags() {
        let service = service();
        let owner = create_user(&service);
        let reader = create_user(&service);
        let question = service.create_question(owner, &request("Detail")).expect("create");
        let answer = service
            .create_answer(
                owner,
                question.id,
                &AnswerRequest {
                    content: "Answer".to_string(),
                },
            )
            .expect("answer");

        service
            .toggle(reader, ToggleKind::AnswerLike, answer.id)
            .expect("like answer");
        service
            .toggle(reader, ToggleKind::QuestionBookmark, question.id)
            .expect("bookmark question");

        let anonymous = service
            .question_detail(question.id, None, AnswerSort::Recent)
            .expect("anonymous detail");
        assert!(!anonymous.view_counted);
        assert!(!anonymous.answers[0].liked);

        let first = service
            .question_detail(question.id, Some(reader), AnswerSort::LikesDesc)
            .expect("detail");
        assert!(first.view_counted);
        assert!(first.bookmarked);
        assert!(!first.liked);
        assert!(first.answers[0].liked);
        assert_eq!(first.question.view_count, 1);
        assert_eq!(first.question.answer_count, 1);

        let second = service
            .question_detail(question.id, Some(reader), AnswerSort::Recent)
            .expect("detail");
        assert!(!second.view_counted);
        assert_eq!(second.question.view_count, 1);

        let bookmarks = service.activity(reader, Relation::Bookmarks).expect("activity");
        assert_eq!(bookmarks.questions.len(), 1);
        let likes = service.activity(reader, Relation::Likes).expect("activity");
        assert_eq!(likes.answers.len(), 1);
        assert!(likes.answers[0].liked);
    }

    #[test]
    #[ignore = "requires DATABASE_URL pointing at PostgreSQL"]
    fn toggling_missing_answer_names_the_item() {
        let service = service();
        let user = create_user(&service);
        let err = service
            .toggle(user, ToggleKind::AnswerLike, Uuid::new_v4())
            .expect_err("missing");
        assert!(matches!(err, AppError::NotFound(m) if m == "Answer not found"));
    }
}
