//! Error types for eshift

use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration directory not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),
}

#[derive(Debug, Error)]
pub enum Error {
    /// Required field missing, blank, or malformed. Raised before any
    /// mutation; the store is untouched when this surfaces.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A referenced entity does not exist
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: u32 },

    /// The transport unit is already committed to another assigned load
    #[error("Transport unit {unit_id} is not available")]
    UnitUnavailable { unit_id: u32 },

    /// Delivered loads cannot transition to another status
    #[error("Load {load_id} is delivered and cannot change status")]
    DeliveredIsTerminal { load_id: u32 },

    /// Underlying store not accessible
    #[error("Store error: {0}")]
    Store(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, Error>;
