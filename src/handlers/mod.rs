pub mod answer;
pub mod auth;
pub mod health;
pub mod question;
pub mod user;

use crate::error::AppError;

/// Runs synchronous diesel work on tokio's blocking pool.
pub async fn blocking<F, T>(work: F) -> Result<T, AppError>
where
    F: FnOnce() -> Result<T, AppError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work).await?
}
