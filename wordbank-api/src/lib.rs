//! Wordbank API - REST Layer for the Vocabulary Backend
//!
//! This crate exposes the user and vocabulary endpoints over Axum. Every
//! handler validates its input and then calls exactly one MySQL stored
//! procedure through a [`wordbank_core::ProcedureGateway`]; the database owns
//! all business rules.

pub mod config;
pub mod db;
pub mod error;
pub mod extractors;
pub mod routes;
pub mod telemetry;
pub mod types;
pub mod validation;

// Re-export commonly used types
pub use config::ApiConfig;
pub use db::{DbClient, DbConfig, MySqlGateway};
pub use error::{ApiError, ApiResult, ErrorCode};
pub use routes::create_api_router;
pub use types::*;
