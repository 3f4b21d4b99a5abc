//! Capacity engine: derives the jar view-model from a profile and commitments.
//!
//! Every function here is pure. Callers re-run the engine whenever the
//! profile or the commitment snapshot changes; nothing is cached.
//!
//! Formulas:
//! - water = nominal × overhead
//! - real capacity = nominal − water
//! - overloaded when weekly load > real capacity × [`OVERLOAD_THRESHOLD_RATIO`]
//! - a day is overloaded when its load > [`DAILY_OVERLOAD_HOURS`]
//! - fill level = round(min(100, load / real × 100))

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::bucket::BucketType;
use super::commitment::Commitment;
use super::profile::{CapacityProfile, DEFAULT_NOMINAL_WEEKLY_HOURS, DEFAULT_OVERHEAD_FACTOR};
use super::week::{business_days, scope_to_week, week_start};
use crate::error::CapacityError;

/// Share of real capacity above which a week counts as overloaded.
pub const OVERLOAD_THRESHOLD_RATIO: f64 = 0.8;

/// Committed hours above which a single day counts as overloaded.
pub const DAILY_OVERLOAD_HOURS: f64 = 8.0;

/// Upper bound of the fill level.
pub const MAX_FILL_LEVEL: u8 = 100;

/// Deep-work capacity for `nominal_hours` after the default overhead.
///
/// Absent, non-finite or non-positive input falls back to
/// [`DEFAULT_NOMINAL_WEEKLY_HOURS`].
pub fn compute_real_capacity(nominal_hours: Option<f64>) -> f64 {
    let nominal = match nominal_hours {
        Some(hours) if hours.is_finite() && hours > 0.0 => hours,
        Some(hours) => {
            tracing::warn!(
                nominal_hours = hours,
                fallback = DEFAULT_NOMINAL_WEEKLY_HOURS,
                "invalid nominal hours, using default"
            );
            DEFAULT_NOMINAL_WEEKLY_HOURS
        }
        None => DEFAULT_NOMINAL_WEEKLY_HOURS,
    };
    nominal - compute_water_hours(nominal, DEFAULT_OVERHEAD_FACTOR)
}

/// Hours reserved for the whirlwind.
pub fn compute_water_hours(nominal_hours: f64, overhead_factor: f64) -> f64 {
    nominal_hours * overhead_factor
}

/// Hour totals (and counts) per bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BucketTotals {
    pub rock_hours: f64,
    pub pebble_hours: f64,
    pub sand_hours: f64,
    pub rock_count: usize,
    pub pebble_count: usize,
    pub sand_count: usize,
}

impl BucketTotals {
    pub fn hours_for(&self, bucket: BucketType) -> f64 {
        match bucket {
            BucketType::Rock => self.rock_hours,
            BucketType::Pebble => self.pebble_hours,
            BucketType::Sand => self.sand_hours,
        }
    }

    pub fn count_for(&self, bucket: BucketType) -> usize {
        match bucket {
            BucketType::Rock => self.rock_count,
            BucketType::Pebble => self.pebble_count,
            BucketType::Sand => self.sand_count,
        }
    }

    pub fn total_hours(&self) -> f64 {
        self.rock_hours + self.pebble_hours + self.sand_hours
    }

    fn record(&mut self, commitment: &Commitment) {
        let hours = commitment.hours();
        match commitment.bucket {
            BucketType::Rock => {
                self.rock_hours += hours;
                self.rock_count += 1;
            }
            BucketType::Pebble => {
                self.pebble_hours += hours;
                self.pebble_count += 1;
            }
            BucketType::Sand => {
                self.sand_hours += hours;
                self.sand_count += 1;
            }
        }
    }
}

/// Sum hours grouped by bucket.
pub fn aggregate_by_bucket(commitments: &[Commitment]) -> BucketTotals {
    let mut totals = BucketTotals::default();
    for commitment in commitments {
        totals.record(commitment);
    }
    totals
}

/// Sum of hours across all buckets.
pub fn compute_weekly_load(commitments: &[Commitment]) -> f64 {
    commitments.iter().map(Commitment::hours).sum()
}

/// Weekly overload check against [`OVERLOAD_THRESHOLD_RATIO`] of real capacity.
pub fn is_overloaded(weekly_load: f64, real_capacity: f64) -> bool {
    CapacityThresholds::default().is_overloaded(weekly_load, real_capacity)
}

/// Per-day overload check against [`DAILY_OVERLOAD_HOURS`].
pub fn is_day_overloaded(day_load: f64) -> bool {
    CapacityThresholds::default().is_day_overloaded(day_load)
}

/// Fill level, or [`CapacityError::DegenerateCapacity`] when `real_capacity`
/// is not a positive finite number.
pub fn checked_fill_level(weekly_load: f64, real_capacity: f64) -> Result<u8, CapacityError> {
    if !real_capacity.is_finite() || real_capacity <= 0.0 {
        return Err(CapacityError::DegenerateCapacity { real_capacity });
    }
    if !weekly_load.is_finite() {
        return Ok(if weekly_load > 0.0 { MAX_FILL_LEVEL } else { 0 });
    }
    let percent = (weekly_load / real_capacity * 100.0).clamp(0.0, 100.0);
    Ok(percent.round() as u8)
}

/// Fill level in 0..=100. Degenerate capacity fails closed to a full jar.
pub fn compute_fill_level(weekly_load: f64, real_capacity: f64) -> u8 {
    checked_fill_level(weekly_load, real_capacity).unwrap_or_else(|err| {
        tracing::warn!(%err, weekly_load, "fill level failed closed");
        MAX_FILL_LEVEL
    })
}

/// Per-day loads for the business days of one week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyBreakdown {
    /// Monday of the week
    pub week_start: NaiveDate,
    /// Monday to Friday, zero-hour days included
    pub daily_loads: BTreeMap<NaiveDate, f64>,
    pub overloaded_days: Vec<NaiveDate>,
}

impl DailyBreakdown {
    pub fn load_on(&self, date: NaiveDate) -> f64 {
        self.daily_loads.get(&date).copied().unwrap_or(0.0)
    }

    pub fn is_overloaded_on(&self, date: NaiveDate) -> bool {
        self.overloaded_days.contains(&date)
    }
}

/// Daily loads for Monday to Friday of the week containing `week_start`.
pub fn compute_daily_breakdown(commitments: &[Commitment], week_start: NaiveDate) -> DailyBreakdown {
    CapacityThresholds::default().daily_breakdown(commitments, week_start)
}

/// Tunable overload thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapacityThresholds {
    /// Share of real capacity above which the week is overloaded
    pub overload_ratio: f64,
    /// Hours above which a day is overloaded
    pub daily_overload_hours: f64,
}

impl Default for CapacityThresholds {
    fn default() -> Self {
        Self {
            overload_ratio: OVERLOAD_THRESHOLD_RATIO,
            daily_overload_hours: DAILY_OVERLOAD_HOURS,
        }
    }
}

impl CapacityThresholds {
    pub fn validate(&self) -> Result<(), CapacityError> {
        if !self.overload_ratio.is_finite() || self.overload_ratio <= 0.0 {
            return Err(CapacityError::profile(format!(
                "overload ratio must be positive, got {}",
                self.overload_ratio
            )));
        }
        if !self.daily_overload_hours.is_finite() || self.daily_overload_hours <= 0.0 {
            return Err(CapacityError::profile(format!(
                "daily overload hours must be positive, got {}",
                self.daily_overload_hours
            )));
        }
        Ok(())
    }

    pub fn is_overloaded(&self, weekly_load: f64, real_capacity: f64) -> bool {
        weekly_load > real_capacity * self.overload_ratio
    }

    pub fn is_day_overloaded(&self, day_load: f64) -> bool {
        day_load > self.daily_overload_hours
    }

    fn daily_breakdown(&self, commitments: &[Commitment], start: NaiveDate) -> DailyBreakdown {
        let monday = week_start(start);
        if monday != start {
            tracing::debug!(%start, %monday, "daily breakdown normalized to monday");
        }

        let mut daily_loads: BTreeMap<NaiveDate, f64> =
            business_days(monday).into_iter().map(|d| (d, 0.0)).collect();
        for commitment in commitments {
            if let Some(load) = daily_loads.get_mut(&commitment.date) {
                *load += commitment.hours();
            }
        }

        let overloaded_days = daily_loads
            .iter()
            .filter(|(_, load)| self.is_day_overloaded(**load))
            .map(|(date, _)| *date)
            .collect();

        DailyBreakdown {
            week_start: monday,
            daily_loads,
            overloaded_days,
        }
    }
}

/// Shield state shown next to the jar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadStatus {
    /// Below the overload threshold
    Clear,
    /// Past the overload threshold but within real capacity
    Warning,
    /// More hours committed than real capacity
    Overloaded,
}

impl LoadStatus {
    fn classify(weekly_load: f64, real_capacity: f64, overloaded: bool) -> Self {
        if weekly_load > real_capacity {
            LoadStatus::Overloaded
        } else if overloaded {
            LoadStatus::Warning
        } else {
            LoadStatus::Clear
        }
    }
}

/// Derived capacity view-model. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityResult {
    pub nominal_hours: f64,
    pub real_capacity: f64,
    pub water_hours: f64,
    pub totals: BucketTotals,
    pub weekly_load: f64,
    /// Real capacity left, floored at zero
    pub weekly_remaining: f64,
    /// Hours committed beyond real capacity
    pub overflow_hours: f64,
    pub completed_hours: f64,
    pub is_overloaded: bool,
    pub load_status: LoadStatus,
    pub fill_level: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily: Option<DailyBreakdown>,
}

impl CapacityResult {
    pub fn has_overloaded_days(&self) -> bool {
        self.daily
            .as_ref()
            .is_some_and(|d| !d.overloaded_days.is_empty())
    }
}

/// Computes [`CapacityResult`]s with a fixed set of thresholds.
#[derive(Debug, Clone, Copy, Default)]
pub struct CapacityEngine {
    thresholds: CapacityThresholds,
}

impl CapacityEngine {
    /// Engine with the default thresholds
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_thresholds(thresholds: CapacityThresholds) -> Result<Self, CapacityError> {
        thresholds.validate()?;
        Ok(Self { thresholds })
    }

    pub fn thresholds(&self) -> &CapacityThresholds {
        &self.thresholds
    }

    /// Compute the view-model over every commitment given.
    ///
    /// # Errors
    ///
    /// Returns [`CapacityError::InvalidCapacityProfile`] if `profile` fails
    /// validation.
    pub fn compute(
        &self,
        profile: &CapacityProfile,
        commitments: &[Commitment],
    ) -> Result<CapacityResult, CapacityError> {
        profile.validate()?;

        let water_hours = compute_water_hours(profile.nominal_weekly_hours, profile.overhead_factor);
        let real_capacity = profile.nominal_weekly_hours - water_hours;
        let totals = aggregate_by_bucket(commitments);
        let weekly_load = compute_weekly_load(commitments);
        let completed_hours = commitments
            .iter()
            .filter(|c| c.completed)
            .map(Commitment::hours)
            .sum();
        let is_overloaded = self.thresholds.is_overloaded(weekly_load, real_capacity);
        let fill_level = compute_fill_level(weekly_load, real_capacity);

        tracing::debug!(
            commitments = commitments.len(),
            weekly_load,
            real_capacity,
            fill_level,
            is_overloaded,
            "capacity computed"
        );

        Ok(CapacityResult {
            nominal_hours: profile.nominal_weekly_hours,
            real_capacity,
            water_hours,
            totals,
            weekly_load,
            weekly_remaining: (real_capacity - weekly_load).max(0.0),
            overflow_hours: (weekly_load - real_capacity).max(0.0),
            completed_hours,
            is_overloaded,
            load_status: LoadStatus::classify(weekly_load, real_capacity, is_overloaded),
            fill_level,
            daily: None,
        })
    }

    /// Compute over the ISO week containing `week_start`, with the daily
    /// breakdown attached.
    pub fn compute_for_week(
        &self,
        profile: &CapacityProfile,
        commitments: &[Commitment],
        week_start: NaiveDate,
    ) -> Result<CapacityResult, CapacityError> {
        let scoped = scope_to_week(commitments, week_start);
        let mut result = self.compute(profile, &scoped)?;
        result.daily = Some(self.daily_breakdown(&scoped, week_start));
        Ok(result)
    }

    pub fn daily_breakdown(&self, commitments: &[Commitment], week_start: NaiveDate) -> DailyBreakdown {
        self.thresholds.daily_breakdown(commitments, week_start)
    }
}
