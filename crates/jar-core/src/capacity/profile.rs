//! Weekly capacity profile of a single user.

use serde::{Deserialize, Serialize};

use crate::error::CapacityError;

/// Nominal weekly hours assumed when a profile carries none.
pub const DEFAULT_NOMINAL_WEEKLY_HOURS: f64 = 40.0;

/// Share of nominal hours consumed by unplanned work ("water").
pub const DEFAULT_OVERHEAD_FACTOR: f64 = 0.2;

/// A user's weekly capacity setting.
///
/// Construct through [`CapacityProfile::new`] so that both fields are checked;
/// deserialized values should be passed through [`CapacityProfile::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapacityProfile {
    /// Configured weekly hours, overhead included
    pub nominal_weekly_hours: f64,
    /// Fraction in (0, 1) reserved for the whirlwind
    pub overhead_factor: f64,
}

impl Default for CapacityProfile {
    fn default() -> Self {
        Self {
            nominal_weekly_hours: DEFAULT_NOMINAL_WEEKLY_HOURS,
            overhead_factor: DEFAULT_OVERHEAD_FACTOR,
        }
    }
}

impl CapacityProfile {
    /// Build a validated profile.
    ///
    /// # Errors
    ///
    /// Returns [`CapacityError::InvalidCapacityProfile`] when the nominal hours
    /// are not a positive finite number or the overhead factor is outside (0, 1).
    pub fn new(nominal_weekly_hours: f64, overhead_factor: f64) -> Result<Self, CapacityError> {
        let profile = Self {
            nominal_weekly_hours,
            overhead_factor,
        };
        profile.validate()?;
        Ok(profile)
    }

    /// Profile with the given nominal hours and the default overhead factor.
    pub fn with_nominal_hours(nominal_weekly_hours: f64) -> Result<Self, CapacityError> {
        Self::new(nominal_weekly_hours, DEFAULT_OVERHEAD_FACTOR)
    }

    pub fn validate(&self) -> Result<(), CapacityError> {
        if !self.nominal_weekly_hours.is_finite() || self.nominal_weekly_hours <= 0.0 {
            return Err(CapacityError::profile(format!(
                "nominal weekly hours must be positive, got {}",
                self.nominal_weekly_hours
            )));
        }
        if !self.overhead_factor.is_finite()
            || self.overhead_factor <= 0.0
            || self.overhead_factor >= 1.0
        {
            return Err(CapacityError::profile(format!(
                "overhead factor must be within (0, 1), got {}",
                self.overhead_factor
            )));
        }
        Ok(())
    }

    /// Hours reserved for overhead.
    pub fn water_hours(&self) -> f64 {
        self.nominal_weekly_hours * self.overhead_factor
    }

    /// Deep-work hours left after overhead.
    pub fn real_capacity(&self) -> f64 {
        self.nominal_weekly_hours - self.water_hours()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profile_is_forty_hours_twenty_percent() {
        let profile = CapacityProfile::default();
        assert_eq!(profile.nominal_weekly_hours, 40.0);
        assert_eq!(profile.overhead_factor, 0.2);
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn real_capacity_subtracts_water() {
        let profile = CapacityProfile::new(40.0, 0.2).unwrap();
        assert!((profile.water_hours() - 8.0).abs() < 1e-9);
        assert!((profile.real_capacity() - 32.0).abs() < 1e-9);
    }

    #[test]
    fn rejects_non_positive_hours() {
        assert!(matches!(
            CapacityProfile::new(0.0, 0.2),
            Err(CapacityError::InvalidCapacityProfile { .. })
        ));
        assert!(CapacityProfile::new(-5.0, 0.2).is_err());
        assert!(CapacityProfile::new(f64::NAN, 0.2).is_err());
        assert!(CapacityProfile::new(f64::INFINITY, 0.2).is_err());
    }

    #[test]
    fn rejects_overhead_outside_open_unit_interval() {
        assert!(CapacityProfile::new(40.0, 0.0).is_err());
        assert!(CapacityProfile::new(40.0, 1.0).is_err());
        assert!(CapacityProfile::new(40.0, 1.5).is_err());
        assert!(CapacityProfile::new(40.0, 0.99).is_ok());
    }
}
