use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Successful JSON response with an explicit status code.
///
/// # Examples
///
/// ```rust,ignore
/// use crate::response::AppResponse;
///
/// AppResponse::ok(page)
/// AppResponse::created(question)
/// AppResponse::no_content()
/// ```
pub struct AppResponse<T> {
    status: StatusCode,
    data: Option<T>,
}

impl<T> AppResponse<T>
where
    T: Serialize,
{
    fn new(status: StatusCode, data: Option<T>) -> Self {
        Self { status, data }
    }

    /// 200 OK with data
    pub fn ok(data: T) -> Self {
        Self::new(StatusCode::OK, Some(data))
    }

    /// 201 Created with data
    pub fn created(data: T) -> Self {
        Self::new(StatusCode::CREATED, Some(data))
    }
}

impl AppResponse<()> {
    /// 204 No Content
    pub fn no_content() -> Self {
        Self::new(StatusCode::NO_CONTENT, None)
    }
}

impl<T> IntoResponse for AppResponse<T>
where
    T: Serialize,
{
    fn into_response(self) -> Response {
        match self.data {
            Some(data) => (self.status, Json(data)).into_response(),
            None => self.status.into_response(),
        }
    }
}
