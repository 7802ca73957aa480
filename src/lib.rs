//! Learning-platform backend: authentication and authorization core.
//!
//! Domain CRUD (courses, subjects, topics, quizzes) lives in a separate
//! layer; this crate owns credential registration, login, token validation
//! and the role-based access policy applied to every request.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repository;
pub mod routes;
pub mod services;
pub mod telemetry;
