// src/auth/services.rs

use crate::auth::credentials::{PasswordManager, is_valid_email, password_problem, username_problem};
use crate::auth::google::{GoogleIdentity, PROVIDER};
use crate::auth::jwt::JwtManager;
use crate::auth::mailer::Mailer;
use crate::auth::verification::{generate_token, verify_url};
use crate::db::DbPool;
use crate::db::connection::get_connection;
use crate::db::error::RepositoryError;
use crate::db::models::unverified_user::{NewUnverifiedUser, expiry_cutoff};
use crate::db::models::user::{NewUser, User};
use crate::db::repositories::unverified_user_repository::{
    PENDING_USERNAME_UNIQUE_INDEX, UnverifiedUserRepository,
};
use crate::db::repositories::user_repository::{
    EMAIL_UNIQUE_INDEX, USERNAME_UNIQUE_INDEX, UserRepository,
};
use crate::error::AppError;
use chrono::{DateTime, Utc};
use diesel::{Connection, PgConnection};
use qna_board_api::{LoginResponse, SignupRequest, SignupResponse, UserResponse, UsernameAvailability};
use std::sync::Arc;
use uuid::Uuid;

const USERNAME_TAKEN: &str = "Username is already taken";
const EMAIL_TAKEN: &str = "Email is already registered";
/// Username used when an email has no usable local part.
const FALLBACK_USERNAME: &str = "user";

/// Account operations: signup, verification, login and Google sign-in.
pub struct AuthService {
    pool: DbPool,
    jwt_manager: JwtManager,
    mailer: Arc<dyn Mailer>,
    public_base_url: String,
}

/// Result of following a verification link.
enum Verification {
    Verified(User),
    Expired,
}

impl AuthService {
    pub fn new(
        pool: DbPool,
        jwt_manager: JwtManager,
        mailer: Arc<dyn Mailer>,
        public_base_url: impl Into<String>,
    ) -> Self {
        Self {
            pool,
            jwt_manager,
            mailer,
            public_base_url: public_base_url.into(),
        }
    }

    /// Disponibilité d'un nom d'utilisateur (comptes et inscriptions en attente)
    pub fn check_username(&self, username: &str) -> Result<UsernameAvailability, AppError> {
        let username = username.trim();
        if let Some(problem) = username_problem(username) {
            return Ok(UsernameAvailability {
                available: false,
                message: problem.to_string(),
            });
        }

        let mut conn = get_connection(&self.pool)?;
        let taken = UserRepository::username_taken(&mut conn, username)?
            || UnverifiedUserRepository::find_by_username(&mut conn, username)?.is_some();

        Ok(if taken {
            UsernameAvailability {
                available: false,
                message: USERNAME_TAKEN.to_string(),
            }
        } else {
            UsernameAvailability {
                available: true,
                message: "Username is available".to_string(),
            }
        })
    }

    /// Inscription: immédiate sans email, sinon en attente de vérification
    pub fn signup(&self, request: &SignupRequest) -> Result<SignupResponse, AppError> {
        let username = request.username.trim();
        let email = request
            .email
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty());

        if let Some(problem) = username_problem(username) {
            return Err(AppError::validation(problem));
        }
        if let Some(problem) = password_problem(&request.password, &request.password2) {
            return Err(AppError::validation(problem));
        }
        if let Some(email) = email
            && !is_valid_email(email)
        {
            return Err(AppError::validation("Invalid email format"));
        }

        let password_hash = PasswordManager::hash(&request.password)?;
        let now = Utc::now();
        let mut conn = get_connection(&self.pool)?;

        match email {
            None => {
                let user = conn.transaction(|conn| {
                    Self::ensure_available(conn, username, None, now)?;
                    UserRepository::create(
                        conn,
                        &NewUser::local(username.to_string(), password_hash, now),
                    )
                    .map_err(signup_conflict)
                })?;

                tracing::info!(user_id = %user.id, username = %user.username, "User signed up");
                Ok(SignupResponse::Created { user: user.into() })
            }
            Some(email) => {
                let pending = NewUnverifiedUser {
                    username: username.to_string(),
                    password_hash,
                    email: email.to_string(),
                    token: generate_token(),
                    create_date: now,
                };

                conn.transaction(|conn| {
                    Self::ensure_available(conn, username, Some(email), now)?;
                    let saved = match UnverifiedUserRepository::find_by_email(conn, email)? {
                        Some(existing) => UnverifiedUserRepository::refresh(conn, existing.id, &pending),
                        None => UnverifiedUserRepository::create(conn, &pending),
                    };
                    saved.map_err(signup_conflict)
                })?;

                drop(conn);

                let link = verify_url(&self.public_base_url, &pending.token);
                let email_sent = self.mailer.send_verification(email, &link);
                tracing::info!(%username, email_sent, "Signup pending email verification");

                Ok(SignupResponse::VerificationPending {
                    email: email.to_string(),
                    email_sent,
                    verify_link: (!email_sent).then_some(link),
                })
            }
        }
    }

    /// Purges expired pending rows, then rejects names and addresses already in use.
    fn ensure_available(
        conn: &mut PgConnection,
        username: &str,
        email: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<(), AppError> {
        let purged = UnverifiedUserRepository::delete_created_before(conn, expiry_cutoff(now))?;
        if purged > 0 {
            tracing::debug!(purged, "Expired pending signups removed");
        }

        if UserRepository::username_taken(conn, username)? {
            return Err(AppError::conflict(USERNAME_TAKEN));
        }

        if let Some(pending) = UnverifiedUserRepository::find_by_username(conn, username)? {
            // the same address may re-submit and refresh its own pending row
            let same_owner = match email {
                Some(email) => UnverifiedUserRepository::find_by_email(conn, email)?
                    .is_some_and(|by_email| by_email.id == pending.id),
                None => false,
            };
            if !same_owner {
                return Err(AppError::conflict(USERNAME_TAKEN));
            }
        }

        if let Some(email) = email
            && UserRepository::find_by_email(conn, email)?.is_some()
        {
            return Err(AppError::conflict(EMAIL_TAKEN));
        }
        Ok(())
    }

    /// Valide un lien de vérification et crée le compte définitif
    pub fn verify(&self, token: &str) -> Result<UserResponse, AppError> {
        let now = Utc::now();
        let mut conn = get_connection(&self.pool)?;

        let outcome = conn.transaction(|conn| {
            let pending = UnverifiedUserRepository::find_by_token(conn, token)?
                .ok_or_else(|| AppError::not_found("Verification link not found"))?;

            if pending.is_expired(now) {
                UnverifiedUserRepository::delete(conn, pending.id)?;
                return Ok::<_, AppError>(Verification::Expired);
            }

            let user = UserRepository::create(
                conn,
                &NewUser {
                    username: pending.username.clone(),
                    password_hash: Some(pending.password_hash.clone()),
                    email: Some(pending.email.clone()),
                    oauth_provider: None,
                    oauth_id: None,
                    create_date: now,
                    email_verified: true,
                    verified_at: Some(now),
                },
            )
            .map_err(signup_conflict)?;
            UnverifiedUserRepository::delete(conn, pending.id)?;
            Ok(Verification::Verified(user))
        })?;

        match outcome {
            Verification::Verified(user) => {
                tracing::info!(user_id = %user.id, "Email verified");
                Ok(user.into())
            }
            Verification::Expired => {
                tracing::info!("Expired verification link used");
                Err(AppError::VerificationExpired)
            }
        }
    }

    /// Connexion par nom d'utilisateur et mot de passe
    pub fn login(&self, username: &str, password: &str) -> Result<LoginResponse, AppError> {
        let mut conn = get_connection(&self.pool)?;
        let user = UserRepository::find_by_username(&mut conn, username.trim())?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        let Some(password_hash) = user.password_hash.as_deref() else {
            return Err(AppError::PasswordLoginUnavailable);
        };
        if !PasswordManager::verify(password, password_hash)? {
            tracing::debug!(user_id = %user.id, "Wrong password");
            return Err(AppError::InvalidCredentials);
        }
        if user.awaits_email_verification() {
            return Err(AppError::EmailNotVerified);
        }

        tracing::info!(user_id = %user.id, "User logged in");
        self.issue(user)
    }

    /// Connexion Google: compte retrouvé par sujet, puis par email, sinon créé
    pub fn sign_in_with_identity(&self, identity: &GoogleIdentity) -> Result<LoginResponse, AppError> {
        let email = identity
            .email
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .ok_or_else(|| AppError::validation("Google account has no email address"))?;

        let now = Utc::now();
        let mut conn = get_connection(&self.pool)?;

        let user = conn.transaction(|conn| {
            if let Some(user) = UserRepository::find_by_oauth(conn, PROVIDER, &identity.sub)? {
                return Ok::<_, AppError>(user);
            }

            if let Some(user) = UserRepository::find_by_email(conn, email)? {
                tracing::info!(user_id = %user.id, "Linking Google identity to existing account");
                return Ok(UserRepository::link_oauth(conn, user.id, PROVIDER, Some(&identity.sub))?);
            }

            Self::create_oauth_user(conn, email, &identity.sub, now)
        })?;

        self.issue(user)
    }

    fn create_oauth_user(
        conn: &mut PgConnection,
        email: &str,
        subject: &str,
        now: DateTime<Utc>,
    ) -> Result<User, AppError> {
        for candidate in username_candidates(email_local_part(email)) {
            if UserRepository::username_taken(conn, &candidate)? {
                continue;
            }

            let new_user = NewUser {
                username: candidate,
                password_hash: None,
                email: Some(email.to_string()),
                oauth_provider: Some(PROVIDER.to_string()),
                oauth_id: Some(subject.to_string()),
                create_date: now,
                email_verified: false,
                verified_at: None,
            };

            // savepoint so a lost race on the username leaves the transaction usable
            match conn.transaction(|conn| UserRepository::create(conn, &new_user)) {
                Ok(user) => {
                    tracing::info!(user_id = %user.id, username = %user.username, "Account created from Google sign-in");
                    return Ok(user);
                }
                Err(e) if e.violates(USERNAME_UNIQUE_INDEX) => {}
                Err(e) => return Err(signup_conflict(e)),
            }
        }
        Err(AppError::internal("Username candidates exhausted"))
    }

    pub fn profile(&self, user_id: Uuid) -> Result<UserResponse, AppError> {
        let mut conn = get_connection(&self.pool)?;
        UserRepository::find_by_id(&mut conn, user_id)?
            .map(UserResponse::from)
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    fn issue(&self, user: User) -> Result<LoginResponse, AppError> {
        let access_token = self
            .jwt_manager
            .generate_access_token(user.id, &user.username)?;
        Ok(LoginResponse {
            access_token,
            expires_in: self.jwt_manager.expires_in(),
            user: user.into(),
        })
    }
}

/// Maps a raced unique violation to the conflict the user can act on.
fn signup_conflict(err: RepositoryError) -> AppError {
    if err.violates(USERNAME_UNIQUE_INDEX) || err.violates(PENDING_USERNAME_UNIQUE_INDEX) {
        AppError::conflict(USERNAME_TAKEN)
    } else if err.violates(EMAIL_UNIQUE_INDEX) {
        AppError::conflict(EMAIL_TAKEN)
    } else {
        err.into()
    }
}

fn email_local_part(email: &str) -> &str {
    let local = email.split('@').next().unwrap_or_default();
    if local.is_empty() { FALLBACK_USERNAME } else { local }
}

/// `base`, then `base1`, `base2`, ...
fn username_candidates(base: &str) -> impl Iterator<Item = String> + '_ {
    std::iter::once(base.to_string()).chain((1u32..).map(move |i| format!("{base}{i}")))
}
