//! Entity models for the e-Shift domain

pub mod customer;
pub mod job;
pub mod load;
pub mod transport_unit;

pub use customer::Customer;
pub use job::{Job, JobStatus};
pub use load::{Load, LoadStatus};
pub use transport_unit::TransportUnit;
