//! Load assignment transactions
//!
//! The only place where a load, its transport unit's availability, and
//! its job's status change together. Every operation validates before
//! touching the store, applies its in-memory mutations, then commits
//! once, so a failed operation never leaves a partially applied state
//! on disk.

use rust_decimal::Decimal;

use crate::error::{Error, Result};
use crate::model::{Load, LoadStatus};
use crate::service::{availability, job_status};
use crate::store::DataStore;

/// Fields for creating a load
#[derive(Debug, Clone)]
pub struct NewLoad {
    pub job_id: u32,
    pub transport_unit_id: Option<u32>,
    pub description: String,
    pub weight: Decimal,
    pub volume: Decimal,
    pub category: Option<String>,
    pub status: LoadStatus,
}

/// Whole-record replacement fields for updating a load
#[derive(Debug, Clone)]
pub struct LoadUpdate {
    pub job_id: u32,
    pub transport_unit_id: Option<u32>,
    pub description: String,
    pub weight: Decimal,
    pub volume: Decimal,
    pub category: Option<String>,
    pub status: LoadStatus,
}

impl LoadUpdate {
    /// Start from an existing load's fields, for partial edits
    pub fn from_load(load: &Load) -> Self {
        Self {
            job_id: load.job_id,
            transport_unit_id: load.transport_unit_id,
            description: load.description.clone(),
            weight: load.weight,
            volume: load.volume,
            category: load.category.clone(),
            status: load.status,
        }
    }

    pub fn with_unit(mut self, unit_id: Option<u32>) -> Self {
        self.transport_unit_id = unit_id;
        self
    }

    pub fn with_status(mut self, status: LoadStatus) -> Self {
        self.status = status;
        self
    }
}

fn validate_fields(
    store: &DataStore,
    job_id: u32,
    unit_id: Option<u32>,
    description: &str,
    weight: Decimal,
    volume: Decimal,
) -> Result<()> {
    if description.trim().is_empty() {
        return Err(Error::Validation("Load description is required".into()));
    }
    if weight < Decimal::ZERO || volume < Decimal::ZERO {
        return Err(Error::Validation(
            "Load weight and volume must be non-negative".into(),
        ));
    }
    if store.job(job_id).is_none() {
        return Err(Error::NotFound { entity: "Job", id: job_id });
    }
    if let Some(id) = unit_id {
        if store.unit(id).is_none() {
            return Err(Error::NotFound { entity: "Transport unit", id });
        }
    }
    Ok(())
}

/// Create a load. When it comes in Assigned with a unit, the unit must
/// be free and is marked unavailable in the same transaction.
pub fn create_load(store: &mut DataStore, new: NewLoad) -> Result<Load> {
    validate_fields(
        store,
        new.job_id,
        new.transport_unit_id,
        &new.description,
        new.weight,
        new.volume,
    )?;

    if new.status == LoadStatus::Assigned {
        if let Some(unit_id) = new.transport_unit_id {
            if !availability::is_available(store, unit_id) {
                return Err(Error::UnitUnavailable { unit_id });
            }
        }
    }

    let mut load = Load::new(new.job_id, new.description, new.weight, new.volume)
        .with_status(new.status);
    load.transport_unit_id = new.transport_unit_id;
    load.category = new.category;
    let load = store.add_load(load);

    if load.status == LoadStatus::Assigned {
        availability::on_load_assigned(store, load.transport_unit_id);
    }

    store.commit()?;
    Ok(load)
}

/// Update a load, keeping unit availability and job status consistent.
///
/// Side effects, in order: the previous unit is released when the unit
/// changed; the new unit is consumed when the new status is Assigned;
/// delivery releases the unit and completes the owning job.
pub fn update_load(store: &mut DataStore, load_id: u32, update: LoadUpdate) -> Result<Load> {
    let previous = store
        .load(load_id)
        .cloned()
        .ok_or(Error::NotFound { entity: "Load", id: load_id })?;

    if previous.status == LoadStatus::Delivered && update.status != LoadStatus::Delivered {
        return Err(Error::DeliveredIsTerminal { load_id });
    }

    validate_fields(
        store,
        update.job_id,
        update.transport_unit_id,
        &update.description,
        update.weight,
        update.volume,
    )?;

    // A load keeping its own assignment is not double-booking itself
    let keeps_own_assignment = previous.status == LoadStatus::Assigned
        && previous.transport_unit_id == update.transport_unit_id;
    if update.status == LoadStatus::Assigned && !keeps_own_assignment {
        if let Some(unit_id) = update.transport_unit_id {
            if !availability::is_available(store, unit_id) {
                return Err(Error::UnitUnavailable { unit_id });
            }
        }
    }

    let mut load = previous.clone();
    load.job_id = update.job_id;
    load.transport_unit_id = update.transport_unit_id;
    load.description = update.description;
    load.weight = update.weight;
    load.volume = update.volume;
    load.category = update.category;
    load.status = update.status;
    store.update_load(load.clone());

    // The previous unit is released when the unit reference changed or
    // the load's status left Assigned while keeping the unit.
    let left_assignment = previous.status == LoadStatus::Assigned
        && !(load.status == LoadStatus::Assigned
            && load.transport_unit_id == previous.transport_unit_id);
    if previous.transport_unit_id != load.transport_unit_id || left_assignment {
        availability::on_load_released(store, previous.transport_unit_id);
    }
    if load.status == LoadStatus::Assigned {
        availability::on_load_assigned(store, load.transport_unit_id);
    }
    // Delivery side effects fire once, on the transition into Delivered.
    // An edit to an already-delivered load must not restamp the job.
    if load.status == LoadStatus::Delivered && previous.status != LoadStatus::Delivered {
        availability::on_load_released(
            store,
            load.transport_unit_id.or(previous.transport_unit_id),
        );
        job_status::on_load_delivered(store, load.job_id);
    }

    store.commit()?;
    Ok(load)
}

/// Delete a load. Absent ids are an Ok no-op. A named unit is released
/// regardless of the deleted load's status; release recomputes from
/// the remaining loads, so a unit held elsewhere stays unavailable.
pub fn delete_load(store: &mut DataStore, load_id: u32) -> Result<bool> {
    let Some(load) = store.load(load_id).cloned() else {
        return Ok(false);
    };

    store.remove_load(load_id);
    if load.transport_unit_id.is_some() {
        availability::on_load_released(store, load.transport_unit_id);
    }

    store.commit()?;
    Ok(true)
}

/// Delete a job together with its loads, releasing any units those
/// loads held. Absent ids are an Ok no-op.
pub fn delete_job(store: &mut DataStore, job_id: u32) -> Result<bool> {
    if store.job(job_id).is_none() {
        return Ok(false);
    }

    let owned: Vec<(u32, Option<u32>)> = store
        .loads_by_job(job_id)
        .iter()
        .map(|l| (l.id, l.transport_unit_id))
        .collect();
    for (load_id, unit_id) in owned {
        store.remove_load(load_id);
        availability::on_load_released(store, unit_id);
    }
    store.remove_job(job_id);

    store.commit()?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Customer, Job, JobStatus, TransportUnit};
    use tempfile::tempdir;

    struct Fixture {
        _tmp: tempfile::TempDir,
        store: DataStore,
        customer_id: u32,
    }

    fn fixture() -> Fixture {
        let tmp = tempdir().expect("Failed to create temp dir");
        let mut store = DataStore::open(tmp.path().to_path_buf()).expect("Failed to open store");
        let customer = store.add_customer(Customer::new("Jane", "Perera", "j@e.lk", "jane", "pw"));
        let customer_id = customer.id;
        Fixture { _tmp: tmp, store, customer_id }
    }

    fn add_job(f: &mut Fixture) -> u32 {
        f.store
            .add_job(Job::new(f.customer_id, "Colombo", "Kandy", Decimal::from(25000)))
            .id
    }

    fn add_unit(f: &mut Fixture, plate: &str) -> u32 {
        f.store
            .add_unit(TransportUnit::new(
                "Lorry",
                plate,
                Decimal::from(10000),
                Decimal::from(40),
                "Sunil",
                "Kasun",
            ))
            .id
    }

    fn new_load(job_id: u32, unit_id: Option<u32>, status: LoadStatus) -> NewLoad {
        NewLoad {
            job_id,
            transport_unit_id: unit_id,
            description: "Furniture".to_string(),
            weight: Decimal::from(500),
            volume: Decimal::from(3),
            category: Some("Household".to_string()),
            status,
        }
    }

    #[test]
    fn test_assigned_create_consumes_unit() {
        // Scenario 1: creating an assigned load makes its unit unavailable
        let mut f = fixture();
        let job = add_job(&mut f);
        let unit = add_unit(&mut f, "WP CAB-1234");

        let load = create_load(&mut f.store, new_load(job, Some(unit), LoadStatus::Assigned))
            .expect("create failed");
        assert_eq!(load.status, LoadStatus::Assigned);
        assert!(!f.store.unit(unit).unwrap().is_available);
    }

    #[test]
    fn test_delivery_completes_job_and_frees_unit() {
        // Scenario 2: delivering the load completes the job and frees the unit
        let mut f = fixture();
        let job = add_job(&mut f);
        let unit = add_unit(&mut f, "WP CAB-1234");
        let load = create_load(&mut f.store, new_load(job, Some(unit), LoadStatus::Assigned))
            .expect("create failed");

        let update = LoadUpdate::from_load(&load).with_status(LoadStatus::Delivered);
        update_load(&mut f.store, load.id, update).expect("update failed");

        assert_eq!(f.store.job(job).unwrap().status, JobStatus::Completed);
        assert!(f.store.unit(unit).unwrap().is_available);
    }

    #[test]
    fn test_unassigned_pending_load_touches_no_unit() {
        // Scenario 3
        let mut f = fixture();
        let job = add_job(&mut f);
        let unit = add_unit(&mut f, "WP CAB-1234");

        create_load(&mut f.store, new_load(job, None, LoadStatus::Pending))
            .expect("create failed");
        assert!(f.store.unit(unit).unwrap().is_available);
    }

    #[test]
    fn test_delete_after_release_is_noop_on_unit() {
        // Scenario 4: the unit was already freed by delivery; deleting the
        // load neither errors nor flips anything
        let mut f = fixture();
        let job = add_job(&mut f);
        let unit = add_unit(&mut f, "WP CAB-1234");
        let load = create_load(&mut f.store, new_load(job, Some(unit), LoadStatus::Assigned))
            .expect("create failed");
        update_load(
            &mut f.store,
            load.id,
            LoadUpdate::from_load(&load).with_status(LoadStatus::Delivered),
        )
        .expect("update failed");

        assert!(delete_load(&mut f.store, load.id).expect("delete failed"));
        assert!(f.store.unit(unit).unwrap().is_available);
        assert!(f.store.load(load.id).is_none());
    }

    #[test]
    fn test_reassignment_moves_availability() {
        // P5: moving a load from unit A to unit B frees A and consumes B
        let mut f = fixture();
        let job = add_job(&mut f);
        let unit_a = add_unit(&mut f, "WP CAB-1111");
        let unit_b = add_unit(&mut f, "WP CAB-2222");
        let load = create_load(&mut f.store, new_load(job, Some(unit_a), LoadStatus::Assigned))
            .expect("create failed");

        let update = LoadUpdate::from_load(&load).with_unit(Some(unit_b));
        update_load(&mut f.store, load.id, update).expect("update failed");

        assert!(f.store.unit(unit_a).unwrap().is_available);
        assert!(!f.store.unit(unit_b).unwrap().is_available);
    }

    #[test]
    fn test_release_to_no_unit_returns_to_pending_pairing() {
        // Assigned -> Pending via reassignment to no unit
        let mut f = fixture();
        let job = add_job(&mut f);
        let unit = add_unit(&mut f, "WP CAB-1234");
        let load = create_load(&mut f.store, new_load(job, Some(unit), LoadStatus::Assigned))
            .expect("create failed");

        let update = LoadUpdate::from_load(&load)
            .with_unit(None)
            .with_status(LoadStatus::Pending);
        let load = update_load(&mut f.store, load.id, update).expect("update failed");

        assert_eq!(load.status, LoadStatus::Pending);
        assert!(load.transport_unit_id.is_none());
        assert!(f.store.unit(unit).unwrap().is_available);
    }

    #[test]
    fn test_status_leaving_assigned_frees_kept_unit() {
        let mut f = fixture();
        let job = add_job(&mut f);
        let unit = add_unit(&mut f, "WP CAB-1234");
        let load = create_load(&mut f.store, new_load(job, Some(unit), LoadStatus::Assigned))
            .expect("create failed");

        // Back to Pending while still naming the unit
        let update = LoadUpdate::from_load(&load).with_status(LoadStatus::Pending);
        update_load(&mut f.store, load.id, update).expect("update failed");
        assert!(f.store.unit(unit).unwrap().is_available);
    }

    #[test]
    fn test_double_booking_rejected() {
        let mut f = fixture();
        let job = add_job(&mut f);
        let unit = add_unit(&mut f, "WP CAB-1234");
        create_load(&mut f.store, new_load(job, Some(unit), LoadStatus::Assigned))
            .expect("create failed");

        let err = create_load(&mut f.store, new_load(job, Some(unit), LoadStatus::Assigned))
            .expect_err("second assignment must fail");
        assert!(matches!(err, Error::UnitUnavailable { unit_id } if unit_id == unit));
        // Rejection left no load behind
        assert_eq!(f.store.loads_by_job(job).len(), 1);
    }

    #[test]
    fn test_update_keeping_own_assignment_is_allowed() {
        let mut f = fixture();
        let job = add_job(&mut f);
        let unit = add_unit(&mut f, "WP CAB-1234");
        let load = create_load(&mut f.store, new_load(job, Some(unit), LoadStatus::Assigned))
            .expect("create failed");

        // Editing other fields while staying assigned to the same unit
        let mut update = LoadUpdate::from_load(&load);
        update.description = "Furniture and boxes".to_string();
        let load = update_load(&mut f.store, load.id, update).expect("update failed");
        assert_eq!(load.description, "Furniture and boxes");
        assert!(!f.store.unit(unit).unwrap().is_available);
    }

    #[test]
    fn test_assigning_pending_load_checks_unit() {
        // A pending load naming a busy unit cannot transition to Assigned
        let mut f = fixture();
        let job = add_job(&mut f);
        let unit = add_unit(&mut f, "WP CAB-1234");
        create_load(&mut f.store, new_load(job, Some(unit), LoadStatus::Assigned))
            .expect("create failed");
        let pending = create_load(&mut f.store, new_load(job, Some(unit), LoadStatus::Pending))
            .expect("pending create failed");

        let update = LoadUpdate::from_load(
            f.store.load(pending.id).expect("load missing"),
        )
        .with_status(LoadStatus::Assigned);
        let err = update_load(&mut f.store, pending.id, update)
            .expect_err("assignment must fail");
        assert!(matches!(err, Error::UnitUnavailable { .. }));
    }

    #[test]
    fn test_deleting_pending_load_cannot_steal_unit() {
        // The unit is held by an assigned load; deleting an unrelated
        // pending load naming the same unit must not free it
        let mut f = fixture();
        let job = add_job(&mut f);
        let unit = add_unit(&mut f, "WP CAB-1234");
        create_load(&mut f.store, new_load(job, Some(unit), LoadStatus::Assigned))
            .expect("create failed");
        let pending = create_load(&mut f.store, new_load(job, Some(unit), LoadStatus::Pending))
            .expect("pending create failed");

        assert!(delete_load(&mut f.store, pending.id).expect("delete failed"));
        assert!(!f.store.unit(unit).unwrap().is_available);
    }

    #[test]
    fn test_delete_missing_load_is_noop() {
        // P3
        let mut f = fixture();
        assert!(!delete_load(&mut f.store, 999).expect("delete must not error"));
    }

    #[test]
    fn test_delivered_is_terminal() {
        let mut f = fixture();
        let job = add_job(&mut f);
        let load = create_load(&mut f.store, new_load(job, None, LoadStatus::Pending))
            .expect("create failed");
        let load = update_load(
            &mut f.store,
            load.id,
            LoadUpdate::from_load(&load).with_status(LoadStatus::Delivered),
        )
        .expect("delivery failed");

        let err = update_load(
            &mut f.store,
            load.id,
            LoadUpdate::from_load(&load).with_status(LoadStatus::Pending),
        )
        .expect_err("leaving Delivered must fail");
        assert!(matches!(err, Error::DeliveredIsTerminal { .. }));
    }

    #[test]
    fn test_editing_delivered_load_does_not_redeliver() {
        let mut f = fixture();
        let job = add_job(&mut f);
        let load = create_load(&mut f.store, new_load(job, None, LoadStatus::Pending))
            .expect("create failed");
        let load = update_load(
            &mut f.store,
            load.id,
            LoadUpdate::from_load(&load).with_status(LoadStatus::Delivered),
        )
        .expect("delivery failed");
        let stamped = f.store.job(job).unwrap().completion_date;

        // An admin reopens the job after delivery; a later field edit on
        // the delivered load must not snap it back to Completed
        f.store.set_job_status(job, JobStatus::InProgress);
        let mut update = LoadUpdate::from_load(&load);
        update.description = "Furniture (fragile)".to_string();
        let load = update_load(&mut f.store, load.id, update).expect("update failed");

        assert_eq!(load.description, "Furniture (fragile)");
        assert_eq!(f.store.job(job).unwrap().status, JobStatus::InProgress);
        assert_eq!(f.store.job(job).unwrap().completion_date, stamped);
    }

    #[test]
    fn test_single_delivery_completes_job_with_other_loads_open() {
        // P4: one delivered load completes the job regardless of siblings
        let mut f = fixture();
        let job = add_job(&mut f);
        let first = create_load(&mut f.store, new_load(job, None, LoadStatus::Pending))
            .expect("create failed");
        create_load(&mut f.store, new_load(job, None, LoadStatus::Pending))
            .expect("create failed");

        update_load(
            &mut f.store,
            first.id,
            LoadUpdate::from_load(&first).with_status(LoadStatus::Delivered),
        )
        .expect("delivery failed");

        assert_eq!(f.store.job(job).unwrap().status, JobStatus::Completed);
    }

    #[test]
    fn test_validation_happens_before_mutation() {
        let mut f = fixture();
        let job = add_job(&mut f);

        let mut bad = new_load(job, None, LoadStatus::Pending);
        bad.description = "  ".to_string();
        assert!(matches!(
            create_load(&mut f.store, bad),
            Err(Error::Validation(_))
        ));

        let mut negative = new_load(job, None, LoadStatus::Pending);
        negative.weight = Decimal::from(-1);
        assert!(matches!(
            create_load(&mut f.store, negative),
            Err(Error::Validation(_))
        ));

        assert!(matches!(
            create_load(&mut f.store, new_load(999, None, LoadStatus::Pending)),
            Err(Error::NotFound { entity: "Job", .. })
        ));
        assert!(matches!(
            create_load(&mut f.store, new_load(job, Some(77), LoadStatus::Pending)),
            Err(Error::NotFound { entity: "Transport unit", .. })
        ));

        assert!(f.store.loads().is_empty());
    }

    #[test]
    fn test_delete_job_cascades_and_releases_units() {
        let mut f = fixture();
        let job = add_job(&mut f);
        let unit = add_unit(&mut f, "WP CAB-1234");
        create_load(&mut f.store, new_load(job, Some(unit), LoadStatus::Assigned))
            .expect("create failed");
        create_load(&mut f.store, new_load(job, None, LoadStatus::Pending))
            .expect("create failed");

        assert!(delete_job(&mut f.store, job).expect("delete failed"));
        assert!(f.store.job(job).is_none());
        assert!(f.store.loads().is_empty());
        assert!(f.store.unit(unit).unwrap().is_available);
    }

    #[test]
    fn test_delete_missing_job_is_noop() {
        let mut f = fixture();
        assert!(!delete_job(&mut f.store, 5).expect("delete must not error"));
    }

    #[test]
    fn test_deleting_referenced_unit_leaves_dangling_load() {
        // Scenario 6: unit deletion is not guarded; the load keeps its id
        let mut f = fixture();
        let job = add_job(&mut f);
        let unit = add_unit(&mut f, "WP CAB-1234");
        let load = create_load(&mut f.store, new_load(job, Some(unit), LoadStatus::Assigned))
            .expect("create failed");

        assert!(f.store.remove_unit(unit));
        assert_eq!(
            f.store.load(load.id).unwrap().transport_unit_id,
            Some(unit)
        );
    }
}
