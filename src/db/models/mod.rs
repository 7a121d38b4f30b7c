pub mod answer;
pub mod question;
pub mod question_view;
pub mod summary;
pub mod unverified_user;
pub mod user;
