//! Customer model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered customer who can submit shipment jobs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    /// Store-assigned identity (0 until persisted)
    #[serde(default)]
    pub id: u32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    pub username: String,
    /// Stored verbatim; authentication flows are outside the core
    pub password: String,
    /// When the customer registered
    pub registered_at: DateTime<Utc>,
}

impl Customer {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            phone: None,
            address: None,
            username: username.into(),
            password: password.into(),
            registered_at: Utc::now(),
        }
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Display name, e.g. "Jane Perera"
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name() {
        let c = Customer::new("Jane", "Perera", "jane@example.com", "jane", "secret");
        assert_eq!(c.full_name(), "Jane Perera");
        assert_eq!(c.id, 0);
    }
}
