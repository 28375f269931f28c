//! Core application types for placement-tracker.
//!
//! This module defines the records kept by the tracker, the form used to
//! create them, and the summary counts derived from a collection.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Pipeline position of an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    /// Application submitted, nothing heard back yet.
    Applied,
    /// Online assessment or coding test.
    #[serde(rename = "Online Assessment (OA)")]
    OnlineAssessment,
    /// One or more interview rounds.
    Interview,
    /// An offer was extended.
    Offer,
    /// The application was turned down.
    Rejected,
}

impl Stage {
    /// All stages in pipeline order.
    pub const ALL: [Self; 5] = [
        Self::Applied,
        Self::OnlineAssessment,
        Self::Interview,
        Self::Offer,
        Self::Rejected,
    ];

    /// Whether this stage means the candidate reached an interview.
    ///
    /// An offer implies an interview took place.
    #[must_use]
    pub fn reached_interview(self) -> bool {
        matches!(self, Self::Interview | Self::Offer)
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Applied => write!(f, "Applied"),
            Self::OnlineAssessment => write!(f, "Online Assessment (OA)"),
            Self::Interview => write!(f, "Interview"),
            Self::Offer => write!(f, "Offer"),
            Self::Rejected => write!(f, "Rejected"),
        }
    }
}

/// Outcome of the current stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Waiting on the company.
    Pending,
    /// The stage was passed.
    Cleared,
    /// The stage was failed.
    Rejected,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "Pending"),
            Self::Cleared => write!(f, "Cleared"),
            Self::Rejected => write!(f, "Rejected"),
        }
    }
}

/// A tracked job application.
///
/// Records are never edited in place; they are created by
/// [`ApplicationStore::add`](crate::store::ApplicationStore::add) and removed
/// by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRecord {
    /// Unique identifier, the creation time in epoch milliseconds.
    pub id: i64,

    /// Name of the company applied to.
    pub company_name: String,

    /// Position applied for.
    pub role: String,

    /// Where the application currently is in the pipeline.
    pub stage: Stage,

    /// Outcome of the current stage.
    pub result: Outcome,

    /// Date the application was sent.
    pub applied_date: NaiveDate,
}

/// The fields submitted to create a new application.
///
/// Every field may be missing; [`NewApplication::validate`] turns a complete
/// form into a record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewApplication {
    /// Company name, trimmed before validation.
    pub company_name: String,
    /// Role, trimmed before validation.
    pub role: String,
    /// Selected stage.
    pub stage: Option<Stage>,
    /// Selected outcome.
    pub result: Option<Outcome>,
    /// Date applied.
    pub applied_date: Option<NaiveDate>,
}

impl NewApplication {
    /// Create a complete form.
    #[must_use]
    pub fn new(
        company_name: impl Into<String>,
        role: impl Into<String>,
        stage: Stage,
        result: Outcome,
        applied_date: NaiveDate,
    ) -> Self {
        Self {
            company_name: company_name.into(),
            role: role.into(),
            stage: Some(stage),
            result: Some(result),
            applied_date: Some(applied_date),
        }
    }

    /// Names of the required fields that are missing or blank.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.company_name.trim().is_empty() {
            missing.push("companyName");
        }
        if self.role.trim().is_empty() {
            missing.push("role");
        }
        if self.stage.is_none() {
            missing.push("stage");
        }
        if self.result.is_none() {
            missing.push("result");
        }
        if self.applied_date.is_none() {
            missing.push("appliedDate");
        }
        missing
    }

    /// Validate the form and build a record with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming every missing field.
    pub fn validate(self, id: i64) -> Result<ApplicationRecord> {
        match (self.stage, self.result, self.applied_date) {
            (Some(stage), Some(result), Some(applied_date))
                if !self.company_name.trim().is_empty() && !self.role.trim().is_empty() =>
            {
                Ok(ApplicationRecord {
                    id,
                    company_name: self.company_name.trim().to_string(),
                    role: self.role.trim().to_string(),
                    stage,
                    result,
                    applied_date,
                })
            }
            _ => Err(Error::validation(self.missing_fields())),
        }
    }
}

/// Aggregate counts over a collection of applications.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// Number of applications.
    pub total_applications: usize,
    /// Applications at the interview stage or beyond (offers included).
    pub total_interviews: usize,
    /// Applications that reached an offer.
    pub total_offers: usize,
    /// Applications whose current result is a rejection, whatever the stage.
    pub total_rejections: usize,
}

impl Summary {
    /// Compute the summary for the given records.
    #[must_use]
    pub fn from_records(records: &[ApplicationRecord]) -> Self {
        records.iter().fold(
            Self {
                total_applications: records.len(),
                ..Self::default()
            },
            |mut summary, record| {
                if record.stage.reached_interview() {
                    summary.total_interviews += 1;
                }
                if record.stage == Stage::Offer {
                    summary.total_offers += 1;
                }
                if record.result == Outcome::Rejected {
                    summary.total_rejections += 1;
                }
                summary
            },
        )
    }
}
