//! Time-boxed commitments and the ingestion boundary for raw records.
//!
//! The persistence layer hands over [`CommitmentRecord`]s with string bucket
//! names and a precomputed hour value. Everything is checked here, once, so
//! the engine can assume well-formed input.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

use super::bucket::BucketType;
use super::week::parse_date;
use crate::error::{CapacityError, ParseError};

const HOURS_TOLERANCE: f64 = 1e-9;

/// A validated commitment booked on a calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commitment {
    pub id: String,
    pub date: NaiveDate,
    pub bucket: BucketType,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Commitment {
    /// New open commitment with a generated id.
    pub fn new(date: NaiveDate, bucket: BucketType) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            date,
            bucket,
            completed: false,
            title: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn completed(mut self) -> Self {
        self.completed = true;
        self
    }

    /// Hours booked, always taken from the bucket lookup.
    pub fn hours(&self) -> f64 {
        self.bucket.hours()
    }
}

/// Raw commitment as stored by the persistence layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitmentRecord {
    #[serde(default)]
    pub id: Option<String>,
    pub date: String,
    pub bucket_type: String,
    #[serde(default)]
    pub hours_value: Option<f64>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub title: Option<String>,
}

impl CommitmentRecord {
    /// Validate into a typed [`Commitment`].
    ///
    /// # Errors
    ///
    /// Returns [`CapacityError::InvalidCommitment`] for an empty id, a
    /// malformed date, an unknown bucket, or an hours value that is negative,
    /// non-finite or disagrees with the bucket lookup.
    pub fn into_commitment(self) -> Result<Commitment, CapacityError> {
        let id = match self.id {
            Some(id) if id.trim().is_empty() => {
                return Err(CapacityError::commitment("", "id must not be empty"));
            }
            Some(id) => id,
            None => Uuid::new_v4().to_string(),
        };

        let date = parse_date(&self.date)
            .map_err(|err| CapacityError::commitment(&id, err.to_string()))?;
        let bucket: BucketType = self
            .bucket_type
            .parse()
            .map_err(|err: ParseError| CapacityError::commitment(&id, err.to_string()))?;

        if let Some(hours) = self.hours_value {
            if !hours.is_finite() || hours < 0.0 {
                return Err(CapacityError::commitment(
                    &id,
                    format!("hours value must be a non-negative number, got {hours}"),
                ));
            }
            if (hours - bucket.hours()).abs() > HOURS_TOLERANCE {
                return Err(CapacityError::commitment(
                    &id,
                    format!(
                        "hours value {hours} does not match {bucket} ({}h)",
                        bucket.hours()
                    ),
                ));
            }
        }

        Ok(Commitment {
            id,
            date,
            bucket,
            completed: self.completed,
            title: self.title,
        })
    }
}

impl TryFrom<CommitmentRecord> for Commitment {
    type Error = CapacityError;

    fn try_from(record: CommitmentRecord) -> Result<Self, Self::Error> {
        record.into_commitment()
    }
}

/// Validate a batch of records, stopping at the first invalid one.
///
/// Ids must be unique within the batch; a repeated id is rejected so the
/// same commitment is never counted twice.
pub fn ingest_records<I>(records: I) -> Result<Vec<Commitment>, CapacityError>
where
    I: IntoIterator<Item = CommitmentRecord>,
{
    let mut seen = HashSet::new();
    records
        .into_iter()
        .map(|record| {
            let commitment = record.into_commitment()?;
            if !seen.insert(commitment.id.clone()) {
                return Err(CapacityError::commitment(commitment.id, "duplicate id"));
            }
            Ok(commitment)
        })
        .collect()
}
