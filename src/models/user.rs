//! User account models and auth DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

/// User account row. The stored `role` is a free string; it is only
/// interpreted through [`Role::normalize`] at token issuance and at identity
/// construction, never rewritten in place. `name` and `role` are nullable
/// because legacy rows predate the registration validation.
///
/// Deliberately not `Serialize`: the password hash must never leave the
/// process. Outbound shapes are [`LoginResponse`] and the `/auth/me` echo.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub name: Option<String>,
    pub email: String,
    pub password_hash: String,
    pub phone: Option<String>,
    pub college: Option<String>,
    pub role: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a new account, produced by the auth service after
/// validation and hashing.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: Option<String>,
    pub college: Option<String>,
    pub role: String,
}

/// Closed role enumeration. Stored role strings are folded into this exactly
/// once: empty or missing becomes `Student`, anything unrecognized becomes
/// `Unknown` (which no policy rule ever allows).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Student,
    Instructor,
    Admin,
    Unknown,
}

impl Role {
    /// Normalize a raw role tag: trim, case-fold, default on empty.
    pub fn normalize(raw: Option<&str>) -> Self {
        let trimmed = raw.map(str::trim).unwrap_or("");
        if trimmed.is_empty() {
            return Role::Student;
        }
        match trimmed.to_ascii_uppercase().as_str() {
            "STUDENT" => Role::Student,
            "INSTRUCTOR" => Role::Instructor,
            "ADMIN" => Role::Admin,
            _ => Role::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Student => "STUDENT",
            Role::Instructor => "INSTRUCTOR",
            Role::Admin => "ADMIN",
            Role::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Registration request.
///
/// Required fields default to empty strings under deserialization so a
/// missing field reports as a validation error rather than a 422 from the
/// JSON extractor.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[serde(default)]
    #[validate(email(message = "A valid email is required"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,

    pub phone: Option<String>,
    pub college: Option<String>,

    #[serde(default)]
    #[validate(length(min = 1, message = "Role is required"))]
    pub role: String,
}

/// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response: the token plus a sanitized identity summary. The password
/// hash never appears here.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub id: i64,
    pub token: String,
    pub role: Role,
    pub email: String,
    pub name: String,
}

impl LoginResponse {
    pub fn new(user: User, token: String) -> Self {
        Self {
            id: user.id,
            token,
            role: Role::normalize(user.role.as_deref()),
            email: user.email,
            name: user.name.unwrap_or_else(|| "User".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_normalize_known_tags() {
        assert_eq!(Role::normalize(Some("INSTRUCTOR")), Role::Instructor);
        assert_eq!(Role::normalize(Some("admin")), Role::Admin);
        assert_eq!(Role::normalize(Some("  student  ")), Role::Student);
    }

    #[test]
    fn test_role_normalize_defaults_to_student() {
        assert_eq!(Role::normalize(None), Role::Student);
        assert_eq!(Role::normalize(Some("")), Role::Student);
        assert_eq!(Role::normalize(Some("   ")), Role::Student);
    }

    #[test]
    fn test_role_normalize_unrecognized_is_unknown() {
        assert_eq!(Role::normalize(Some("SUPERUSER")), Role::Unknown);
        assert_eq!(Role::normalize(Some("root")), Role::Unknown);
    }

    #[test]
    fn test_role_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&Role::Instructor).unwrap(), "\"INSTRUCTOR\"");
    }

    #[test]
    fn test_register_request_missing_fields_fail_validation() {
        let req: RegisterRequest = serde_json::from_str(r#"{"email": "a@x.com"}"#).unwrap();
        assert!(req.validate().is_err());

        let req: RegisterRequest = serde_json::from_str(
            r#"{"name": "Ann", "email": "a@x.com", "password": "pw123", "role": "STUDENT"}"#,
        )
        .unwrap();
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_register_request_rejects_bad_email() {
        let req: RegisterRequest = serde_json::from_str(
            r#"{"name": "Ann", "email": "not-an-email", "password": "pw123", "role": "STUDENT"}"#,
        )
        .unwrap();
        assert!(req.validate().is_err());
    }
}
