//! Transport unit availability resolution
//!
//! A unit is unavailable exactly while at least one load in Assigned
//! status references it. The stored `is_available` flag is a cached
//! view of that rule; the hooks here keep it in sync as loads change.

use crate::model::LoadStatus;
use crate::store::DataStore;

/// True iff no load in Assigned status references the unit.
///
/// This is the authoritative computation behind the stored flag.
pub fn is_available(store: &DataStore, unit_id: u32) -> bool {
    !store
        .loads()
        .iter()
        .any(|l| l.status == LoadStatus::Assigned && l.transport_unit_id == Some(unit_id))
}

/// Mark a unit unavailable after a load was assigned to it.
///
/// No-op when no unit is named or the unit no longer exists.
pub fn on_load_assigned(store: &mut DataStore, unit_id: Option<u32>) {
    if let Some(id) = unit_id {
        store.set_unit_availability(id, false);
    }
}

/// Recompute a unit's availability after a load left the
/// Assigned-to-this-unit pairing (delivered, reassigned, or deleted).
///
/// The flag is recomputed from the remaining loads rather than flipped
/// to available unconditionally: a unit another assigned load still
/// references stays unavailable. No-op when no unit is named.
pub fn on_load_released(store: &mut DataStore, unit_id: Option<u32>) {
    if let Some(id) = unit_id {
        let free = is_available(store, id);
        store.set_unit_availability(id, free);
    }
}
