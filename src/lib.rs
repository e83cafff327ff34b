//! e-Shift Core Library
//!
//! Job, load, and transport-unit lifecycle management for the e-Shift
//! transport company: customers submit shipment jobs, admins attach
//! loads and transport units, and the services keep unit availability
//! and job status consistent across edits.

pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod output;
pub mod service;
pub mod store;
