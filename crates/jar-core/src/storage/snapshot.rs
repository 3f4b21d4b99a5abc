//! JSON snapshot of one user's capacity inputs.
//!
//! A snapshot is what the persistence layer hands over per recomputation:
//! an optional profile and the raw commitment records.
//!
//! ```json
//! {
//!   "profile": { "nominal_weekly_hours": 40, "overhead_factor": 0.2 },
//!   "commitments": [
//!     { "id": "c-1", "date": "2024-01-15", "bucket_type": "rock", "hours_value": 4 }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::capacity::{ingest_records, CapacityProfile, Commitment, CommitmentRecord};
use crate::error::{CapacityError, CoreError, Result};

/// Profile fields as stored; absent fields take the configured defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileRecord {
    #[serde(default)]
    pub nominal_weekly_hours: Option<f64>,
    #[serde(default)]
    pub overhead_factor: Option<f64>,
}

impl ProfileRecord {
    /// Fill absent fields from `defaults`, then validate.
    ///
    /// Present but invalid values are rejected rather than replaced.
    pub fn resolve(&self, defaults: &CapacityProfile) -> std::result::Result<CapacityProfile, CapacityError> {
        CapacityProfile::new(
            self.nominal_weekly_hours
                .unwrap_or(defaults.nominal_weekly_hours),
            self.overhead_factor.unwrap_or(defaults.overhead_factor),
        )
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub profile: Option<ProfileRecord>,
    #[serde(default)]
    pub commitments: Vec<CommitmentRecord>,
}

impl Snapshot {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| CoreError::SnapshotRead {
            path: path.to_path_buf(),
            source,
        })?;
        let snapshot = Self::from_json(&content)?;
        tracing::debug!(
            path = %path.display(),
            commitments = snapshot.commitments.len(),
            "snapshot loaded"
        );
        Ok(snapshot)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Validate the snapshot into engine inputs.
    pub fn resolve(
        self,
        defaults: &CapacityProfile,
    ) -> std::result::Result<(CapacityProfile, Vec<Commitment>), CapacityError> {
        let profile = match &self.profile {
            Some(record) => record.resolve(defaults)?,
            None => *defaults,
        };
        let commitments = ingest_records(self.commitments)?;
        Ok((profile, commitments))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capacity::BucketType;

    #[test]
    fn parses_full_snapshot() {
        let snapshot = Snapshot::from_json(
            r#"{
                "profile": { "nominal_weekly_hours": 30 },
                "commitments": [
                    { "id": "a", "date": "2024-01-15", "bucket_type": "Rock", "hours_value": 4 },
                    { "date": "2024-01-16", "bucket_type": "sand", "completed": true }
                ]
            }"#,
        )
        .unwrap();

        let (profile, commitments) = snapshot.resolve(&CapacityProfile::default()).unwrap();
        assert_eq!(profile.nominal_weekly_hours, 30.0);
        assert_eq!(profile.overhead_factor, 0.2);
        assert_eq!(commitments.len(), 2);
        assert_eq!(commitments[0].bucket, BucketType::Rock);
        assert!(commitments[1].completed);
    }

    #[test]
    fn missing_profile_uses_defaults() {
        let snapshot = Snapshot::from_json(r#"{ "commitments": [] }"#).unwrap();
        let defaults = CapacityProfile::new(35.0, 0.3).unwrap();
        let (profile, commitments) = snapshot.resolve(&defaults).unwrap();
        assert_eq!(profile, defaults);
        assert!(commitments.is_empty());
    }

    #[test]
    fn invalid_profile_is_rejected() {
        let snapshot =
            Snapshot::from_json(r#"{ "profile": { "nominal_weekly_hours": -1 } }"#).unwrap();
        assert!(matches!(
            snapshot.resolve(&CapacityProfile::default()),
            Err(CapacityError::InvalidCapacityProfile { .. })
        ));
    }

    #[test]
    fn invalid_commitment_is_rejected() {
        let snapshot = Snapshot::from_json(
            r#"{ "commitments": [ { "id": "x", "date": "2024-01-15", "bucket_type": "boulder" } ] }"#,
        )
        .unwrap();
        assert!(matches!(
            snapshot.resolve(&CapacityProfile::default()),
            Err(CapacityError::InvalidCommitment { .. })
        ));
    }

    #[test]
    fn repeated_record_is_rejected() {
        let snapshot = Snapshot::from_json(
            r#"{ "commitments": [
                { "id": "r1", "date": "2024-01-15", "bucket_type": "rock", "hours_value": 4 },
                { "id": "r1", "date": "2024-01-15", "bucket_type": "rock", "hours_value": 4 }
            ] }"#,
        )
        .unwrap();
        let err = snapshot.resolve(&CapacityProfile::default()).unwrap_err();
        assert_eq!(
            err,
            CapacityError::InvalidCommitment {
                id: "r1".to_string(),
                reason: "duplicate id".to_string(),
            }
        );
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Snapshot::load(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, CoreError::SnapshotRead { .. }));
    }
}
