//! Shared types, errors, and configuration for Hearth.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - Decimal amount parsing for form input and stored rows
//! - Inclusive date ranges for calendar-month scoping
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, DisplayConfig, OutputFormat};
pub use error::{AppError, AppResult};
