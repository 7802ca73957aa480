//! Auth service: registration and login.

use crate::{
    auth::{jwt::JwtService, password::PasswordHasher},
    error::AppError,
    models::user::{LoginRequest, LoginResponse, NewUser, RegisterRequest, User},
    repository::CredentialStore,
};
use std::sync::Arc;
use validator::Validate;

pub struct AuthService {
    store: Arc<dyn CredentialStore>,
    jwt_service: Arc<JwtService>,
    hasher: PasswordHasher,
}

impl AuthService {
    pub fn new(store: Arc<dyn CredentialStore>, jwt_service: Arc<JwtService>) -> Self {
        Self {
            store,
            jwt_service,
            hasher: PasswordHasher::new(),
        }
    }

    /// Register a new account.
    ///
    /// Validation fails fast with no partial write; the duplicate check is
    /// an explicit probe so the caller gets a distinct error rather than a
    /// constraint violation. No token is issued: registration is followed by
    /// a separate login.
    pub async fn register(&self, req: RegisterRequest) -> Result<User, AppError> {
        req.validate().map_err(|e| AppError::Validation(e.to_string()))?;

        if self.store.email_exists(&req.email).await? {
            tracing::info!(email = %req.email, "Registration rejected: email taken");
            return Err(AppError::DuplicateEmail);
        }

        let password_hash = self.hasher.hash(&req.password)?;

        let user = self
            .store
            .insert(&NewUser {
                name: req.name,
                email: req.email,
                password_hash,
                phone: req.phone,
                college: req.college,
                role: req.role,
            })
            .await?;

        tracing::info!(user_id = user.id, "User registered");

        Ok(user)
    }

    /// Log in with email and password, returning a session token plus a
    /// sanitized identity summary.
    ///
    /// Unknown email and wrong password collapse into the same
    /// `InvalidCredentials` failure so responses cannot be used to probe
    /// which accounts exist.
    pub async fn login(&self, req: LoginRequest) -> Result<LoginResponse, AppError> {
        let user = self
            .store
            .find_by_email(&req.email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !self.hasher.verify(&req.password, &user.password_hash) {
            tracing::info!(user_id = user.id, "Login rejected: password mismatch");
            return Err(AppError::InvalidCredentials);
        }

        let token = self.jwt_service.issue(&user)?;

        tracing::info!(user_id = user.id, "Login succeeded");

        Ok(LoginResponse::new(user, token))
    }
}
