//! Library Store
//!
//! Catalogue (books and DVDs) and membership (students and civilians) of a
//! small lending library, persisted to two flat text files, with the
//! borrow/return state machine that keeps both sides of a loan consistent.

pub mod codec;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
