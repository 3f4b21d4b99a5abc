//! Capacity accounting for the jar.
//!
//! Converts a [`CapacityProfile`] and a snapshot of [`Commitment`]s into a
//! [`CapacityResult`]: real capacity after overhead, Rock/Pebble/Sand totals,
//! weekly load, overload flags and the 0-100 fill level.

mod bucket;
mod commitment;
mod engine;
mod profile;
mod segments;
pub mod week;

pub use bucket::{BucketType, PEBBLE_HOURS, ROCK_HOURS, SAND_HOURS};
pub use commitment::{ingest_records, Commitment, CommitmentRecord};
pub use engine::{
    aggregate_by_bucket, checked_fill_level, compute_daily_breakdown, compute_fill_level,
    compute_real_capacity, compute_water_hours, compute_weekly_load, is_day_overloaded,
    is_overloaded, BucketTotals, CapacityEngine, CapacityResult, CapacityThresholds,
    DailyBreakdown, LoadStatus, DAILY_OVERLOAD_HOURS, MAX_FILL_LEVEL, OVERLOAD_THRESHOLD_RATIO,
};
pub use profile::{CapacityProfile, DEFAULT_NOMINAL_WEEKLY_HOURS, DEFAULT_OVERHEAD_FACTOR};
pub use segments::{bar_segments, BarSegments, DEFAULT_BAR_WIDTH};
