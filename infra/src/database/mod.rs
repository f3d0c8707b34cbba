//! Database module - MySQL implementations using SQLx
//!
//! This module provides database access layer implementations including:
//! - Connection pool management
//! - Verification repository with atomic conditional writes
//! - Schema bootstrap for the verification table

pub mod connection;
pub mod repositories;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use connection::{DatabasePool, PoolStatistics};
pub use repositories::MySqlVerificationRepository;
