pub mod bar;
pub mod capacity;
pub mod config;
pub mod daily;

use chrono::NaiveDate;
use std::path::Path;

use jar_core::capacity::week::parse_date;
use jar_core::{CapacityEngine, CapacityProfile, CapacityResult, Commitment, Config, Snapshot};

/// Validated inputs read from a snapshot file plus the configured engine.
pub struct Inputs {
    pub engine: CapacityEngine,
    pub profile: CapacityProfile,
    pub commitments: Vec<Commitment>,
}

impl Inputs {
    pub fn load(file: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let config = Config::load_or_default();
        let engine = config.engine()?;
        let defaults = config.profile()?;
        let (profile, commitments) = Snapshot::load(file)?.resolve(&defaults)?;
        tracing::debug!(
            file = %file.display(),
            nominal_hours = profile.nominal_weekly_hours,
            commitments = commitments.len(),
            "inputs loaded"
        );
        Ok(Self {
            engine,
            profile,
            commitments,
        })
    }

    /// Whole snapshot, or one ISO week when `week` is given.
    pub fn compute(&self, week: Option<NaiveDate>) -> Result<CapacityResult, Box<dyn std::error::Error>> {
        let result = match week {
            Some(start) => self
                .engine
                .compute_for_week(&self.profile, &self.commitments, start)?,
            None => self.engine.compute(&self.profile, &self.commitments)?,
        };
        Ok(result)
    }
}

pub fn parse_week(value: Option<&str>) -> Result<Option<NaiveDate>, Box<dyn std::error::Error>> {
    Ok(value.map(parse_date).transpose()?)
}

pub fn format_hours(hours: f64) -> String {
    if hours.fract() == 0.0 {
        format!("{hours:.0}h")
    } else {
        format!("{hours:.1}h")
    }
}
