pub mod answer_repository;
pub mod question_repository;
pub mod toggle_repository;
pub mod unverified_user_repository;
pub mod user_repository;
pub mod view_repository;
