//! JSON-file-backed store for e-Shift entities
//!
//! One file per entity kind under the data directory, loaded into
//! memory on open. Mutations update memory only; `commit` rewrites the
//! files, so one operation's mutations land on disk together.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{Customer, Job, JobStatus, Load, TransportUnit};

const CUSTOMERS_FILE: &str = "customers.json";
const UNITS_FILE: &str = "transport_units.json";
const JOBS_FILE: &str = "jobs.json";
const LOADS_FILE: &str = "loads.json";
const META_FILE: &str = "meta.json";

/// Identity counters, persisted so deleted ids are never reused
#[derive(Debug, Clone, Serialize, Deserialize)]
struct NextIds {
    customer: u32,
    unit: u32,
    job: u32,
    load: u32,
}

impl Default for NextIds {
    fn default() -> Self {
        Self { customer: 1, unit: 1, job: 1, load: 1 }
    }
}

/// Counts shown on the admin dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_customers: usize,
    pub active_jobs: usize,
    pub transport_units: usize,
    pub completed_jobs: usize,
}

/// Persistent store for customers, transport units, jobs, and loads
#[derive(Debug)]
pub struct DataStore {
    dir: PathBuf,
    customers: HashMap<u32, Customer>,
    units: HashMap<u32, TransportUnit>,
    jobs: HashMap<u32, Job>,
    loads: HashMap<u32, Load>,
    next_ids: NextIds,
}

fn read_map<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<HashMap<u32, T>> {
    if path.exists() {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        // A corrupted file must surface, not read as empty: the next
        // commit would rewrite the file from the empty map.
        Ok(serde_json::from_reader(reader)?)
    } else {
        Ok(HashMap::new())
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, value)?;
    Ok(())
}

impl DataStore {
    /// Create or load a store rooted at `dir`
    pub fn open(dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&dir)?;

        let customers = read_map(&dir.join(CUSTOMERS_FILE))?;
        let units = read_map(&dir.join(UNITS_FILE))?;
        let jobs = read_map(&dir.join(JOBS_FILE))?;
        let loads = read_map(&dir.join(LOADS_FILE))?;

        let meta_path = dir.join(META_FILE);
        let mut next_ids: NextIds = if meta_path.exists() {
            let file = File::open(&meta_path)?;
            serde_json::from_reader(BufReader::new(file))?
        } else {
            NextIds::default()
        };

        // Recover counters from a store whose meta file went missing
        fn floor(counter: &mut u32, max_id: Option<u32>) {
            if let Some(max) = max_id {
                if *counter <= max {
                    *counter = max + 1;
                }
            }
        }
        floor(&mut next_ids.customer, customers.keys().max().copied());
        floor(&mut next_ids.unit, units.keys().max().copied());
        floor(&mut next_ids.job, jobs.keys().max().copied());
        floor(&mut next_ids.load, loads.keys().max().copied());

        Ok(Self { dir, customers, units, jobs, loads, next_ids })
    }

    /// Write all entity files to disk
    pub fn commit(&self) -> Result<()> {
        write_json(&self.dir.join(CUSTOMERS_FILE), &self.customers)?;
        write_json(&self.dir.join(UNITS_FILE), &self.units)?;
        write_json(&self.dir.join(JOBS_FILE), &self.jobs)?;
        write_json(&self.dir.join(LOADS_FILE), &self.loads)?;
        write_json(&self.dir.join(META_FILE), &self.next_ids)?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Customers
    // ------------------------------------------------------------------

    /// Add a customer, assigning its identity. Returns the stored record.
    pub fn add_customer(&mut self, mut customer: Customer) -> Customer {
        customer.id = self.next_ids.customer;
        self.next_ids.customer += 1;
        self.customers.insert(customer.id, customer.clone());
        customer
    }

    /// Replace a customer record. Returns false if the id is unknown.
    pub fn update_customer(&mut self, customer: Customer) -> bool {
        if self.customers.contains_key(&customer.id) {
            self.customers.insert(customer.id, customer);
            true
        } else {
            false
        }
    }

    /// Remove by id. No-op returning false when absent.
    pub fn remove_customer(&mut self, id: u32) -> bool {
        self.customers.remove(&id).is_some()
    }

    pub fn customer(&self, id: u32) -> Option<&Customer> {
        self.customers.get(&id)
    }

    /// All customers sorted by id
    pub fn customers(&self) -> Vec<&Customer> {
        let mut all: Vec<_> = self.customers.values().collect();
        all.sort_by_key(|c| c.id);
        all
    }

    pub fn customer_by_email(&self, email: &str) -> Option<&Customer> {
        self.customers.values().find(|c| c.email == email)
    }

    pub fn customer_by_username(&self, username: &str) -> Option<&Customer> {
        self.customers.values().find(|c| c.username == username)
    }

    // ------------------------------------------------------------------
    // Transport units
    // ------------------------------------------------------------------

    /// Add a transport unit, assigning its identity
    pub fn add_unit(&mut self, mut unit: TransportUnit) -> TransportUnit {
        unit.id = self.next_ids.unit;
        self.next_ids.unit += 1;
        self.units.insert(unit.id, unit.clone());
        unit
    }

    pub fn update_unit(&mut self, unit: TransportUnit) -> bool {
        if self.units.contains_key(&unit.id) {
            self.units.insert(unit.id, unit);
            true
        } else {
            false
        }
    }

    /// Remove by id. Loads referencing the unit keep their (now
    /// dangling) reference; the store does not enforce it.
    pub fn remove_unit(&mut self, id: u32) -> bool {
        self.units.remove(&id).is_some()
    }

    pub fn unit(&self, id: u32) -> Option<&TransportUnit> {
        self.units.get(&id)
    }

    /// All transport units sorted by id
    pub fn units(&self) -> Vec<&TransportUnit> {
        let mut all: Vec<_> = self.units.values().collect();
        all.sort_by_key(|u| u.id);
        all
    }

    /// Units whose availability flag is set
    pub fn available_units(&self) -> Vec<&TransportUnit> {
        let mut all: Vec<_> = self.units.values().filter(|u| u.is_available).collect();
        all.sort_by_key(|u| u.id);
        all
    }

    /// Flip a unit's availability flag. No-op when the unit is absent.
    pub fn set_unit_availability(&mut self, id: u32, is_available: bool) -> bool {
        match self.units.get_mut(&id) {
            Some(unit) => {
                unit.is_available = is_available;
                true
            }
            None => false,
        }
    }

    // ------------------------------------------------------------------
    // Jobs
    // ------------------------------------------------------------------

    /// Add a job, assigning its identity
    pub fn add_job(&mut self, mut job: Job) -> Job {
        job.id = self.next_ids.job;
        self.next_ids.job += 1;
        self.jobs.insert(job.id, job.clone());
        job
    }

    pub fn update_job(&mut self, job: Job) -> bool {
        if self.jobs.contains_key(&job.id) {
            self.jobs.insert(job.id, job);
            true
        } else {
            false
        }
    }

    pub fn remove_job(&mut self, id: u32) -> bool {
        self.jobs.remove(&id).is_some()
    }

    pub fn job(&self, id: u32) -> Option<&Job> {
        self.jobs.get(&id)
    }

    /// All jobs sorted by id
    pub fn jobs(&self) -> Vec<&Job> {
        let mut all: Vec<_> = self.jobs.values().collect();
        all.sort_by_key(|j| j.id);
        all
    }

    pub fn jobs_by_customer(&self, customer_id: u32) -> Vec<&Job> {
        let mut jobs: Vec<_> = self
            .jobs
            .values()
            .filter(|j| j.customer_id == customer_id)
            .collect();
        jobs.sort_by_key(|j| j.id);
        jobs
    }

    /// Latest jobs by creation time
    pub fn recent_jobs(&self, limit: usize) -> Vec<&Job> {
        let mut jobs: Vec<_> = self.jobs.values().collect();
        jobs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        jobs.truncate(limit);
        jobs
    }

    /// Set a job's status. Stamps the completion date when the status
    /// becomes Completed. No-op when the job is absent.
    pub fn set_job_status(&mut self, id: u32, status: JobStatus) -> bool {
        match self.jobs.get_mut(&id) {
            Some(job) => {
                job.status = status;
                if status == JobStatus::Completed {
                    job.completion_date = Some(Utc::now());
                }
                true
            }
            None => false,
        }
    }

    // ------------------------------------------------------------------
    // Loads
    // ------------------------------------------------------------------

    /// Add a load, assigning its identity
    pub fn add_load(&mut self, mut load: Load) -> Load {
        load.id = self.next_ids.load;
        self.next_ids.load += 1;
        self.loads.insert(load.id, load.clone());
        load
    }

    pub fn update_load(&mut self, load: Load) -> bool {
        if self.loads.contains_key(&load.id) {
            self.loads.insert(load.id, load);
            true
        } else {
            false
        }
    }

    pub fn remove_load(&mut self, id: u32) -> bool {
        self.loads.remove(&id).is_some()
    }

    pub fn load(&self, id: u32) -> Option<&Load> {
        self.loads.get(&id)
    }

    /// All loads sorted by id
    pub fn loads(&self) -> Vec<&Load> {
        let mut all: Vec<_> = self.loads.values().collect();
        all.sort_by_key(|l| l.id);
        all
    }

    pub fn loads_by_job(&self, job_id: u32) -> Vec<&Load> {
        let mut loads: Vec<_> = self.loads.values().filter(|l| l.job_id == job_id).collect();
        loads.sort_by_key(|l| l.id);
        loads
    }

    /// Loads whose owning job belongs to the customer
    pub fn loads_by_customer(&self, customer_id: u32) -> Vec<&Load> {
        let mut loads: Vec<_> = self
            .loads
            .values()
            .filter(|l| {
                self.jobs
                    .get(&l.job_id)
                    .map(|j| j.customer_id == customer_id)
                    .unwrap_or(false)
            })
            .collect();
        loads.sort_by_key(|l| l.id);
        loads
    }

    // ------------------------------------------------------------------
    // Analytics
    // ------------------------------------------------------------------

    pub fn dashboard_stats(&self) -> DashboardStats {
        DashboardStats {
            total_customers: self.customers.len(),
            active_jobs: self.jobs.values().filter(|j| j.status.is_active()).count(),
            transport_units: self.units.len(),
            completed_jobs: self
                .jobs
                .values()
                .filter(|j| j.status == JobStatus::Completed)
                .count(),
        }
    }

    /// Sum of cost over completed jobs
    pub fn total_revenue(&self) -> Decimal {
        self.jobs
            .values()
            .filter(|j| j.status == JobStatus::Completed)
            .map(|j| j.cost)
            .sum()
    }
}
