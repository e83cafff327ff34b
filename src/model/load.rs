//! Load model and status lifecycle

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Load lifecycle status
///
/// Pending -> Assigned -> Delivered, with Assigned -> Pending possible
/// when a load is released back to no unit. Delivered is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoadStatus {
    Pending,
    Assigned,
    Delivered,
}

impl LoadStatus {
    pub fn label(&self) -> &'static str {
        match self {
            LoadStatus::Pending => "Pending",
            LoadStatus::Assigned => "Assigned",
            LoadStatus::Delivered => "Delivered",
        }
    }
}

impl std::fmt::Display for LoadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for LoadStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(LoadStatus::Pending),
            "assigned" => Ok(LoadStatus::Assigned),
            "delivered" => Ok(LoadStatus::Delivered),
            _ => Err(Error::Validation(format!("Unknown load status: {}", s))),
        }
    }
}

/// A concrete cargo item attached to a job, optionally assigned to a
/// transport unit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Load {
    /// Store-assigned identity (0 until persisted)
    #[serde(default)]
    pub id: u32,
    /// Owning job (required)
    pub job_id: u32,
    /// Assigned transport unit, if any
    #[serde(default)]
    pub transport_unit_id: Option<u32>,
    pub description: String,
    /// Weight in kg
    pub weight: Decimal,
    /// Volume in m3
    pub volume: Decimal,
    #[serde(default)]
    pub category: Option<String>,
    pub status: LoadStatus,
    pub created_at: DateTime<Utc>,
}

impl Load {
    pub fn new(
        job_id: u32,
        description: impl Into<String>,
        weight: Decimal,
        volume: Decimal,
    ) -> Self {
        Self {
            id: 0,
            job_id,
            transport_unit_id: None,
            description: description.into(),
            weight,
            volume,
            category: None,
            status: LoadStatus::Pending,
            created_at: Utc::now(),
        }
    }

    pub fn with_unit(mut self, unit_id: u32) -> Self {
        self.transport_unit_id = Some(unit_id);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_status(mut self, status: LoadStatus) -> Self {
        self.status = status;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse() {
        assert_eq!("Assigned".parse::<LoadStatus>().unwrap(), LoadStatus::Assigned);
        assert_eq!("delivered".parse::<LoadStatus>().unwrap(), LoadStatus::Delivered);
        assert!("lost".parse::<LoadStatus>().is_err());
    }

    #[test]
    fn test_new_load_defaults() {
        let load = Load::new(1, "Furniture", Decimal::from(500), Decimal::from(3));
        assert_eq!(load.status, LoadStatus::Pending);
        assert!(load.transport_unit_id.is_none());
    }
}
