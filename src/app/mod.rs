//! Application service layer - read-side queries and reporting

pub mod query_service;
pub mod report;
