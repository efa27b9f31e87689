//! FinDash - Personal finance tracker for the terminal
//!
//! Import bank CSV exports, categorize transactions with priority-ordered
//! rules (plus a builtin keyword fallback), set monthly budgets, and review
//! spending from a dashboard. Multi-user with password-hashed accounts.
//!
//! # Architecture
//!
//! - `config`: path resolution and user settings
//! - `error`: the application error type
//! - `models`: core data models (users, transactions, rules, budgets)
//! - `storage`: typed repositories over a tabular row store
//! - `auth`: password hashing, input validation, session file
//! - `rules`: rule evaluation and the keyword table
//! - `services`: business logic on top of storage
//! - `display`: terminal table renderers
//! - `cli`: clap command handlers

pub mod auth;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod rules;
pub mod services;
pub mod storage;

pub use error::{FinDashError, FinDashResult};
