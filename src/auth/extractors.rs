use axum::extract::{FromRef, FromRequestParts};
use axum::http::{HeaderValue, header, request::Parts};
use uuid::Uuid;

use crate::auth::jwt::JwtManager;
use crate::error::AppError;

const BEARER: &str = "Bearer ";

/// Caller identity for protected routes.
/// Valide `Authorization: Bearer <JWT>` via le `JwtManager` de l'état.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: Uuid,
    pub username: String,
}

/// Caller identity for routes that also serve anonymous visitors.
/// A missing header yields `None`; a present but bad one is still rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaybeAuthUser(pub Option<AuthUser>);

fn authenticate(value: &HeaderValue, jwt_manager: &JwtManager) -> Result<AuthUser, AppError> {
    let raw = value.to_str().map_err(|_| AppError::MalformedAuthHeader)?;
    let token = raw
        .strip_prefix(BEARER)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(AppError::MalformedAuthHeader)?;

    let claims = jwt_manager.verify_token(token)?;
    Ok(AuthUser {
        id: claims.sub,
        username: claims.username,
    })
}

impl<S> FromRequestParts<S> for AuthUser
where
    JwtManager: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or(AppError::MissingToken)?;

        authenticate(value, &JwtManager::from_ref(state))
    }
}

impl<S> FromRequestParts<S> for MaybeAuthUser
where
    JwtManager: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match parts.headers.get(header::AUTHORIZATION) {
            None => Ok(MaybeAuthUser(None)),
            Some(value) => authenticate(value, &JwtManager::from_ref(state)).map(|u| MaybeAuthUser(Some(u))),
        }
    }
}

impl MaybeAuthUser {
    pub fn id(&self) -> Option<Uuid> {
        self.0.as_ref().map(|user| user.id)
    }
}
