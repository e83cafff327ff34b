//! Job status propagation from load delivery
//!
//! Delivering any load of a job marks the whole job Completed. This
//! mirrors the shipped behavior of the admin workflow: the job does
//! not wait for its remaining loads. Nothing propagates on load
//! deletion or when a job's load list shrinks to empty.

use crate::model::JobStatus;
use crate::store::DataStore;

/// Mark the owning job Completed after one of its loads was delivered.
///
/// Unconditional: other loads of the job are not consulted. No-op when
/// the job no longer exists.
pub fn on_load_delivered(store: &mut DataStore, job_id: u32) {
    store.set_job_status(job_id, JobStatus::Completed);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Customer, Job};
    use rust_decimal::Decimal;
    use tempfile::tempdir;

    #[test]
    fn test_delivery_completes_job() {
        let tmp = tempdir().expect("Failed to create temp dir");
        let mut store = DataStore::open(tmp.path().to_path_buf()).expect("Failed to open store");
        let customer = store.add_customer(Customer::new("Jane", "Perera", "j@e.lk", "jane", "pw"));
        let job = store.add_job(Job::new(customer.id, "Colombo", "Kandy", Decimal::from(25000)));

        on_load_delivered(&mut store, job.id);

        let job = store.job(job.id).expect("Job not found");
        assert_eq!(job.status, JobStatus::Completed);
        assert!(job.completion_date.is_some());
    }

    #[test]
    fn test_missing_job_is_noop() {
        let tmp = tempdir().expect("Failed to create temp dir");
        let mut store = DataStore::open(tmp.path().to_path_buf()).expect("Failed to open store");
        on_load_delivered(&mut store, 42);
    }
}
