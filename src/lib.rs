//! Libraria Library Lending Server
//!
//! A Rust REST JSON API for managing a small library: book and member
//! catalogs plus the borrow/return workflow with stock limits, a
//! per-member borrow cap and a late-return penalty.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
