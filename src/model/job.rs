//! Job model and status lifecycle

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Job lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobStatus {
    Pending,
    Accepted,
    InProgress,
    Completed,
    Cancelled,
}

impl JobStatus {
    /// Statuses counted as active on the dashboard
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            JobStatus::Pending | JobStatus::Accepted | JobStatus::InProgress
        )
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            JobStatus::Pending => "Pending",
            JobStatus::Accepted => "Accepted",
            JobStatus::InProgress => "In Progress",
            JobStatus::Completed => "Completed",
            JobStatus::Cancelled => "Cancelled",
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for JobStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "pending" => Ok(JobStatus::Pending),
            "accepted" => Ok(JobStatus::Accepted),
            "inprogress" => Ok(JobStatus::InProgress),
            "completed" => Ok(JobStatus::Completed),
            "cancelled" | "canceled" => Ok(JobStatus::Cancelled),
            _ => Err(Error::Validation(format!("Unknown job status: {}", s))),
        }
    }
}

/// A customer's requested shipment from a start location to a destination
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    /// Store-assigned identity (0 until persisted)
    #[serde(default)]
    pub id: u32,
    pub customer_id: u32,
    pub start_location: String,
    pub destination: String,
    #[serde(default)]
    pub description: Option<String>,
    /// When the customer wants the shipment picked up
    pub request_date: DateTime<Utc>,
    #[serde(default)]
    pub schedule_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completion_date: Option<DateTime<Utc>>,
    pub status: JobStatus,
    pub cost: Decimal,
    pub created_at: DateTime<Utc>,
}

impl Job {
    pub fn new(
        customer_id: u32,
        start_location: impl Into<String>,
        destination: impl Into<String>,
        cost: Decimal,
    ) -> Self {
        Self {
            id: 0,
            customer_id,
            start_location: start_location.into(),
            destination: destination.into(),
            description: None,
            request_date: Utc::now(),
            schedule_date: None,
            completion_date: None,
            status: JobStatus::Pending,
            cost,
            created_at: Utc::now(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_status(mut self, status: JobStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_request_date(mut self, request_date: DateTime<Utc>) -> Self {
        self.request_date = request_date;
        self
    }

    /// Display name, e.g. "Job 12 - Colombo -> Kandy"
    pub fn display_name(&self) -> String {
        format!("Job {} - {} -> {}", self.id, self.start_location, self.destination)
    }
}
