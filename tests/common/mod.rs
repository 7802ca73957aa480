//! Shared test helpers: test configuration, an in-memory credential store,
//! and application-state construction that needs no database.

use async_trait::async_trait;
use chrono::Utc;
use secrecy::Secret;
use skillforge::{
    auth::{jwt::JwtService, policy::AccessPolicy},
    config::{AppConfig, DatabaseConfig, LoggingConfig, SecurityConfig, ServerConfig},
    error::AppError,
    middleware::AppState,
    models::user::{NewUser, User},
    repository::CredentialStore,
    services::AuthService,
};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

/// Secret used across the integration suites; long enough for HS256.
pub const TEST_JWT_SECRET: &str = "test_secret_key_32_characters_long!";

/// Create a test configuration. The database URL is a placeholder: these
/// suites run against the in-memory store.
pub fn create_test_config() -> AppConfig {
    AppConfig {
        server: ServerConfig {
            addr: "127.0.0.1:0".to_string(),
            graceful_shutdown_timeout_secs: 5,
            cors_allowed_origin: "http://localhost:3000".to_string(),
        },
        database: DatabaseConfig {
            url: Secret::new("postgresql://localhost/skillforge_test".to_string()),
            max_connections: 5,
            min_connections: 1,
            acquire_timeout_secs: 5,
            idle_timeout_secs: 300,
            max_lifetime_secs: 1800,
        },
        logging: LoggingConfig {
            level: "debug".to_string(),
            format: "pretty".to_string(),
        },
        security: SecurityConfig {
            jwt_secret: Secret::new(TEST_JWT_SECRET.to_string()),
            token_ttl_secs: 3600,
        },
    }
}

/// In-memory credential store implementing the same adapter contract as the
/// Postgres repository.
pub struct MemoryCredentialStore {
    users: Mutex<Vec<User>>,
    next_id: AtomicI64,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }

    pub fn user_count(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    pub fn find_stored(&self, email: &str) -> Option<User> {
        self.users.lock().unwrap().iter().find(|u| u.email == email).cloned()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.email == email).cloned())
    }

    async fn email_exists(&self, email: &str) -> Result<bool, AppError> {
        Ok(self.users.lock().unwrap().iter().any(|u| u.email == email))
    }

    async fn insert(&self, new_user: &NewUser) -> Result<User, AppError> {
        let user = User {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            name: Some(new_user.name.clone()),
            email: new_user.email.clone(),
            password_hash: new_user.password_hash.clone(),
            phone: new_user.phone.clone(),
            college: new_user.college.clone(),
            role: Some(new_user.role.clone()),
            created_at: Utc::now(),
        };

        self.users.lock().unwrap().push(user.clone());
        Ok(user)
    }
}

/// Build application state over the given store
pub fn create_test_state(store: Arc<MemoryCredentialStore>) -> Arc<AppState> {
    let config = create_test_config();
    let jwt_service =
        Arc::new(JwtService::from_config(&config).expect("Failed to create JWT service"));
    let auth_service = Arc::new(AuthService::new(
        store as Arc<dyn CredentialStore>,
        jwt_service.clone(),
    ));

    Arc::new(AppState {
        config,
        auth_service,
        jwt_service,
        policy: Arc::new(AccessPolicy::learning_platform()),
    })
}
