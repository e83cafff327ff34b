//! Domain services keeping unit availability and job status consistent
//! with load assignments

pub mod assignment;
pub mod availability;
pub mod job_status;
