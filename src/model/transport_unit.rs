//! Transport unit model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A vehicle plus driver/assistant resource that can carry loads
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportUnit {
    /// Store-assigned identity (0 until persisted)
    #[serde(default)]
    pub id: u32,
    /// Vehicle classification, e.g. "Lorry", "Mini Truck"
    pub unit_type: String,
    pub license_plate: String,
    /// Maximum payload weight in kg
    pub max_weight: Decimal,
    /// Maximum payload volume in m3
    pub max_volume: Decimal,
    pub driver_name: String,
    pub assistant_name: String,
    #[serde(default)]
    pub driver_phone: Option<String>,
    /// False while an assigned load holds this unit
    #[serde(default = "default_true")]
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

impl TransportUnit {
    pub fn new(
        unit_type: impl Into<String>,
        license_plate: impl Into<String>,
        max_weight: Decimal,
        max_volume: Decimal,
        driver_name: impl Into<String>,
        assistant_name: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            unit_type: unit_type.into(),
            license_plate: license_plate.into(),
            max_weight,
            max_volume,
            driver_name: driver_name.into(),
            assistant_name: assistant_name.into(),
            driver_phone: None,
            is_available: true,
            created_at: Utc::now(),
        }
    }

    pub fn with_driver_phone(mut self, phone: impl Into<String>) -> Self {
        self.driver_phone = Some(phone.into());
        self
    }

    /// Advisory capacity check. Assignment never enforces this; the
    /// query layer reports loads that exceed their unit's limits.
    pub fn can_carry(&self, weight: Decimal, volume: Decimal) -> bool {
        weight <= self.max_weight && volume <= self.max_volume
    }
}
