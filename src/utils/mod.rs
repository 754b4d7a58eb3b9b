//! Utility module - shared helpers and types
//!
//! - [`AppError`] / [`AppResult`] - application error types
//! - [`slug`] - URL slug derivation
//! - [`logger`] - logging setup

pub mod error;
pub mod logger;
pub mod slug;

pub use error::{AppError, AppResponse, AppResult};
