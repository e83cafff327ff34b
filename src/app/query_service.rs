//! Query Service - Read-Side Access to Stored Data
//!
//! Read-only wrappers over the data store for UI-style consumers:
//! entity listings, dashboard stats, revenue, and the advisory
//! capacity check. Nothing here mutates state.

use std::path::PathBuf;

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::config::Config;
use crate::model::{Customer, Job, Load, LoadStatus, TransportUnit};
use crate::store::{DashboardStats, DataStore};

/// Errors specific to the query service
#[derive(Debug, Error)]
pub enum QueryServiceError {
    #[error("Store not accessible: {0}")]
    StoreError(String),
}

impl From<crate::error::Error> for QueryServiceError {
    fn from(err: crate::error::Error) -> Self {
        QueryServiceError::StoreError(err.to_string())
    }
}

impl From<QueryServiceError> for crate::error::Error {
    fn from(err: QueryServiceError) -> Self {
        crate::error::Error::Store(err.to_string())
    }
}

type Result<T> = std::result::Result<T, QueryServiceError>;

fn open_store(config: &Config) -> Result<DataStore> {
    let dir: PathBuf = config
        .data_dir()
        .map_err(|e| QueryServiceError::StoreError(format!("Failed to get data directory: {}", e)))?;
    DataStore::open(dir)
        .map_err(|e| QueryServiceError::StoreError(format!("Failed to open store: {}", e)))
}

// ============================================================================
// Listings
// ============================================================================

pub fn get_customers(config: &Config) -> Result<Vec<Customer>> {
    let store = open_store(config)?;
    Ok(store.customers().into_iter().cloned().collect())
}

pub fn get_transport_units(config: &Config, available_only: bool) -> Result<Vec<TransportUnit>> {
    let store = open_store(config)?;
    let units = if available_only {
        store.available_units()
    } else {
        store.units()
    };
    Ok(units.into_iter().cloned().collect())
}

pub fn get_jobs(config: &Config, customer_id: Option<u32>) -> Result<Vec<Job>> {
    let store = open_store(config)?;
    let jobs = match customer_id {
        Some(id) => store.jobs_by_customer(id),
        None => store.jobs(),
    };
    Ok(jobs.into_iter().cloned().collect())
}

pub fn get_recent_jobs(config: &Config, limit: usize) -> Result<Vec<Job>> {
    let store = open_store(config)?;
    Ok(store.recent_jobs(limit).into_iter().cloned().collect())
}

pub fn get_loads(config: &Config, job_id: Option<u32>) -> Result<Vec<Load>> {
    let store = open_store(config)?;
    let loads = match job_id {
        Some(id) => store.loads_by_job(id),
        None => store.loads(),
    };
    Ok(loads.into_iter().cloned().collect())
}

// ============================================================================
// Analytics
// ============================================================================

pub fn get_dashboard_stats(config: &Config) -> Result<DashboardStats> {
    let store = open_store(config)?;
    Ok(store.dashboard_stats())
}

pub fn get_total_revenue(config: &Config) -> Result<Decimal> {
    let store = open_store(config)?;
    Ok(store.total_revenue())
}

// ============================================================================
// Capacity check (advisory)
// ============================================================================

/// A load that exceeds its assigned unit's capacity
#[derive(Debug, Clone, Serialize)]
pub struct OverloadedLoad {
    pub load: Load,
    pub unit: TransportUnit,
    /// Weight over the unit's limit, if any
    pub excess_weight: Option<Decimal>,
    /// Volume over the unit's limit, if any
    pub excess_volume: Option<Decimal>,
}

/// Loads whose weight or volume exceed their unit's limits.
///
/// Advisory only: assignment never rejects on capacity. Loads with a
/// dangling unit reference are skipped.
pub fn find_overloaded_loads(store: &DataStore) -> Vec<OverloadedLoad> {
    store
        .loads()
        .iter()
        .filter(|l| l.status != LoadStatus::Delivered)
        .filter_map(|load| {
            let unit = load.transport_unit_id.and_then(|id| store.unit(id))?;
            if unit.can_carry(load.weight, load.volume) {
                return None;
            }
            let excess_weight = (load.weight > unit.max_weight)
                .then(|| load.weight - unit.max_weight);
            let excess_volume = (load.volume > unit.max_volume)
                .then(|| load.volume - unit.max_volume);
            Some(OverloadedLoad {
                load: (*load).clone(),
                unit: unit.clone(),
                excess_weight,
                excess_volume,
            })
        })
        .collect()
}

pub fn get_overloaded_loads(config: &Config) -> Result<Vec<OverloadedLoad>> {
    let store = open_store(config)?;
    Ok(find_overloaded_loads(&store))
}
