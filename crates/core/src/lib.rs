//! Core budget logic for Hearth.
//!
//! This crate turns a household's raw budgets, categories and transactions
//! into the figures a household sees: income, expenses, balance, and how much
//! of each budget has been spent. It has no web or database dependencies.
//!
//! # Modules
//!
//! - `budget` - Domain types, aggregation, write-boundary validation and display
//! - `source` - Reading household data from memory or snapshot files

pub mod budget;
pub mod source;
