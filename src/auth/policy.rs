//! Role-based access policy.
//!
//! A static, ordered table of path-prefix rules consulted once per request,
//! after the authentication filter has had its chance to install an
//! identity. First matching prefix wins; paths matching no rule require
//! some authenticated identity, any role.

use crate::{auth::middleware::AuthContext, error::AppError, models::user::Role};
use axum::http::Method;

/// Access requirement attached to a path prefix
#[derive(Debug, Clone)]
pub enum Access {
    /// No identity required
    Public,
    /// Any authenticated identity
    Authenticated,
    /// Identity whose role is in the set
    Roles(&'static [Role]),
}

/// One policy rule: a path prefix and who may pass it
#[derive(Debug, Clone)]
pub struct PolicyRule {
    pub prefix: &'static str,
    pub access: Access,
}

/// Ordered rule table with an implicit authenticated-only default
pub struct AccessPolicy {
    rules: Vec<PolicyRule>,
}

impl AccessPolicy {
    pub fn new(rules: Vec<PolicyRule>) -> Self {
        Self { rules }
    }

    /// The learning-platform table: registration and login are open,
    /// catalog management is for instructors and admins, dashboards are
    /// per-role, everything else needs a login.
    pub fn learning_platform() -> Self {
        const INSTRUCTOR_OR_ADMIN: &[Role] = &[Role::Instructor, Role::Admin];

        Self::new(vec![
            PolicyRule { prefix: "/auth/register", access: Access::Public },
            PolicyRule { prefix: "/auth/login", access: Access::Public },
            PolicyRule { prefix: "/health", access: Access::Public },
            PolicyRule { prefix: "/courses", access: Access::Roles(INSTRUCTOR_OR_ADMIN) },
            PolicyRule { prefix: "/subjects", access: Access::Roles(INSTRUCTOR_OR_ADMIN) },
            PolicyRule { prefix: "/topics", access: Access::Roles(INSTRUCTOR_OR_ADMIN) },
            PolicyRule { prefix: "/student", access: Access::Roles(&[Role::Student]) },
            PolicyRule { prefix: "/admin", access: Access::Roles(&[Role::Admin]) },
        ])
    }

    /// Decide whether a request may proceed. Pre-flight probes pass
    /// unconditionally; everything else is matched against the table.
    /// Missing identity on a protected rule is a 401; a present identity
    /// with the wrong role is a 403.
    pub fn check(
        &self,
        method: &Method,
        path: &str,
        identity: Option<&AuthContext>,
    ) -> Result<(), AppError> {
        if method == Method::OPTIONS {
            return Ok(());
        }

        // Paths matching no rule require some identity, any role
        const DEFAULT_ACCESS: Access = Access::Authenticated;

        let access = self
            .rules
            .iter()
            .find(|rule| prefix_matches(rule.prefix, path))
            .map(|rule| &rule.access)
            .unwrap_or(&DEFAULT_ACCESS);

        match access {
            Access::Public => Ok(()),
            Access::Authenticated => {
                if identity.is_some() {
                    Ok(())
                } else {
                    Err(AppError::Unauthorized)
                }
            }
            Access::Roles(allowed) => match identity {
                None => Err(AppError::Unauthorized),
                Some(ctx) if allowed.contains(&ctx.role) => Ok(()),
                Some(ctx) => {
                    tracing::warn!(
                        user_id = ctx.user_id,
                        role = %ctx.role,
                        path = %path,
                        "Role not permitted for path"
                    );
                    Err(AppError::Forbidden)
                }
            },
        }
    }
}

/// Prefix match on path-segment boundaries, so "/courses" covers
/// "/courses/7" but not "/coursesmith".
fn prefix_matches(prefix: &str, path: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}
