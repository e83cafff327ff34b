//! CLI definition using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Output format for results
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Parser)]
#[command(name = "eshift")]
#[command(version)]
#[command(about = "Job, load, and transport-unit management for e-Shift logistics")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Data directory override
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage customers
    Customer {
        #[command(subcommand)]
        command: CustomerCommands,
    },

    /// Manage transport units
    Unit {
        #[command(subcommand)]
        command: UnitCommands,
    },

    /// Manage shipment jobs
    Job {
        #[command(subcommand)]
        command: JobCommands,
    },

    /// Manage loads and their assignments
    Load {
        #[command(subcommand)]
        command: LoadCommands,
    },

    /// Show dashboard statistics
    Dashboard,

    /// Show total revenue from completed jobs
    Revenue,

    /// Print the job summary report
    Report,

    /// List loads exceeding their unit's capacity
    Overloads,

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set default output format
        #[arg(long)]
        set_format: Option<OutputFormat>,

        /// Set data directory
        #[arg(long)]
        set_data_dir: Option<PathBuf>,

        /// Reset to defaults
        #[arg(long)]
        reset: bool,
    },
}

#[derive(Subcommand)]
pub enum CustomerCommands {
    /// Register a customer
    Add {
        first_name: String,
        last_name: String,
        email: String,
        username: String,
        password: String,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        address: Option<String>,
    },

    /// List customers
    List,

    /// Remove a customer by id
    Remove { id: u32 },
}

#[derive(Subcommand)]
pub enum UnitCommands {
    /// Register a transport unit
    Add {
        /// Vehicle classification, e.g. "Lorry"
        unit_type: String,
        license_plate: String,
        /// Maximum payload weight in kg
        max_weight: Decimal,
        /// Maximum payload volume in m3
        max_volume: Decimal,
        driver: String,
        assistant: String,

        #[arg(long)]
        phone: Option<String>,
    },

    /// List transport units
    List {
        /// Only units currently available
        #[arg(long)]
        available: bool,
    },

    /// Remove a transport unit by id
    Remove { id: u32 },
}

#[derive(Subcommand)]
pub enum JobCommands {
    /// Submit a shipment job for a customer
    Add {
        /// Owning customer id
        customer: u32,
        start_location: String,
        destination: String,
        /// Job cost
        cost: Decimal,

        #[arg(long)]
        description: Option<String>,

        /// Initial status (default: pending)
        #[arg(long)]
        status: Option<String>,
    },

    /// List jobs
    List {
        /// Filter by owning customer id
        #[arg(long)]
        customer: Option<u32>,
    },

    /// Show the most recently created jobs
    Recent {
        #[arg(long, short = 'n', default_value = "10")]
        limit: usize,
    },

    /// Set a job's status
    SetStatus {
        id: u32,
        /// pending | accepted | in-progress | completed | cancelled
        status: String,
    },

    /// Remove a job and its loads
    Remove { id: u32 },
}

#[derive(Subcommand)]
pub enum LoadCommands {
    /// Create a load on a job
    Add {
        /// Owning job id
        job: u32,
        description: String,
        /// Weight in kg
        weight: Decimal,
        /// Volume in m3
        volume: Decimal,

        /// Assign to a transport unit
        #[arg(long)]
        unit: Option<u32>,

        #[arg(long)]
        category: Option<String>,

        /// Initial status (default: pending; assigned requires --unit)
        #[arg(long)]
        status: Option<String>,
    },

    /// List loads
    List {
        /// Filter by owning job id
        #[arg(long)]
        job: Option<u32>,
    },

    /// Assign a load to a transport unit
    Assign { id: u32, unit: u32 },

    /// Mark a load delivered (completes the owning job)
    Deliver { id: u32 },

    /// Release a load back to pending with no unit
    Release { id: u32 },

    /// Remove a load by id
    Remove { id: u32 },
}
