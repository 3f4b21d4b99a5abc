//! # The Jar Core Library
//!
//! This library provides the capacity accounting behind The Jar's weekly
//! planning board. The application shell (pages, persistence, realtime
//! subscriptions) supplies a profile and a snapshot of commitments; the core
//! turns them into a view-model and never holds state of its own.
//!
//! ## Architecture
//!
//! - **Capacity Engine**: pure functions computing real capacity, overhead
//!   ("water"), Rock/Pebble/Sand totals, overload flags and the fill level
//! - **Week scoping**: ISO-week helpers for the Monday-to-Friday board
//! - **Storage**: TOML configuration and JSON snapshot loading
//!
//! ## Key Components
//!
//! - [`CapacityEngine`]: Computes a [`CapacityResult`] per call
//! - [`CommitmentRecord`]: Ingestion boundary for raw persistence records
//! - [`Config`]: Application configuration management

pub mod capacity;
pub mod storage;
pub mod error;

pub use capacity::{
    BarSegments, BucketTotals, BucketType, CapacityEngine, CapacityProfile, CapacityResult,
    CapacityThresholds, Commitment, CommitmentRecord, DailyBreakdown, LoadStatus,
};
pub use storage::{Config, Snapshot};
pub use error::{CapacityError, ConfigError, CoreError, ParseError};
