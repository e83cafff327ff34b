//! Command handlers

use crate::app::{query_service, report};
use crate::cli::{
    Cli, Commands, CustomerCommands, JobCommands, LoadCommands, OutputFormat, UnitCommands,
};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::model::{Customer, Job, JobStatus, LoadStatus, TransportUnit};
use crate::output;
use crate::service::assignment::{self, LoadUpdate, NewLoad};
use crate::store::DataStore;

/// Execute CLI command
pub fn execute(cli: Cli) -> Result<()> {
    // Load config and apply CLI overrides
    let mut config = Config::load()?;
    if cli.data_dir.is_some() {
        config.data_dir = cli.data_dir.clone();
    }
    let format = cli.format.unwrap_or(config.output_format);

    match &cli.command {
        Commands::Customer { command } => cmd_customer(&config, format, command),
        Commands::Unit { command } => cmd_unit(&config, format, command),
        Commands::Job { command } => cmd_job(&config, format, command),
        Commands::Load { command } => cmd_load(&config, format, command),

        Commands::Dashboard => {
            let stats = query_service::get_dashboard_stats(&config)?;
            output::print_dashboard(format, &stats)
        }

        Commands::Revenue => {
            let revenue = query_service::get_total_revenue(&config)?;
            output::print_revenue(format, revenue)
        }

        Commands::Report => {
            let store = open_store(&config)?;
            print!("{}", report::job_summary(&store));
            Ok(())
        }

        Commands::Overloads => {
            let overloads = query_service::get_overloaded_loads(&config)?;
            output::print_overloads(format, &overloads)
        }

        Commands::Config { show, set_format, set_data_dir, reset } => {
            cmd_config(*show, *set_format, set_data_dir.clone(), *reset)
        }
    }
}

fn open_store(config: &Config) -> Result<DataStore> {
    DataStore::open(config.data_dir()?)
}

fn cmd_customer(config: &Config, format: OutputFormat, command: &CustomerCommands) -> Result<()> {
    match command {
        CustomerCommands::Add {
            first_name,
            last_name,
            email,
            username,
            password,
            phone,
            address,
        } => {
            if first_name.trim().is_empty() || last_name.trim().is_empty() {
                return Err(Error::Validation("Customer name is required".into()));
            }
            if email.trim().is_empty() || username.trim().is_empty() {
                return Err(Error::Validation("Email and username are required".into()));
            }

            let mut store = open_store(config)?;
            if store.customer_by_username(username).is_some() {
                return Err(Error::Validation(format!(
                    "Username '{}' is already taken",
                    username
                )));
            }

            let mut customer = Customer::new(
                first_name.clone(),
                last_name.clone(),
                email.clone(),
                username.clone(),
                password.clone(),
            );
            customer.phone = phone.clone();
            customer.address = address.clone();
            let customer = store.add_customer(customer);
            store.commit()?;
            println!("Customer {} added: {}", customer.id, customer.full_name());
            Ok(())
        }

        CustomerCommands::List => {
            let customers = query_service::get_customers(config)?;
            output::print_customers(format, &customers)
        }

        CustomerCommands::Remove { id } => {
            let mut store = open_store(config)?;
            if store.remove_customer(*id) {
                store.commit()?;
                println!("Customer {} removed.", id);
            } else {
                println!("Customer {} not found; nothing removed.", id);
            }
            Ok(())
        }
    }
}

fn cmd_unit(config: &Config, format: OutputFormat, command: &UnitCommands) -> Result<()> {
    match command {
        UnitCommands::Add {
            unit_type,
            license_plate,
            max_weight,
            max_volume,
            driver,
            assistant,
            phone,
        } => {
            if unit_type.trim().is_empty() || license_plate.trim().is_empty() {
                return Err(Error::Validation("Unit type and license plate are required".into()));
            }

            let mut store = open_store(config)?;
            let mut unit = TransportUnit::new(
                unit_type.clone(),
                license_plate.clone(),
                *max_weight,
                *max_volume,
                driver.clone(),
                assistant.clone(),
            );
            unit.driver_phone = phone.clone();
            let unit = store.add_unit(unit);
            store.commit()?;
            println!("Transport unit {} added: {} {}", unit.id, unit.unit_type, unit.license_plate);
            Ok(())
        }

        UnitCommands::List { available } => {
            let units = query_service::get_transport_units(config, *available)?;
            output::print_units(format, &units)
        }

        UnitCommands::Remove { id } => {
            let mut store = open_store(config)?;
            if store.remove_unit(*id) {
                store.commit()?;
                println!("Transport unit {} removed.", id);
            } else {
                println!("Transport unit {} not found; nothing removed.", id);
            }
            Ok(())
        }
    }
}

fn cmd_job(config: &Config, format: OutputFormat, command: &JobCommands) -> Result<()> {
    match command {
        JobCommands::Add {
            customer,
            start_location,
            destination,
            cost,
            description,
            status,
        } => {
            let status = match status {
                Some(s) => s.parse::<JobStatus>()?,
                None => JobStatus::Pending,
            };
            if start_location.trim().is_empty() || destination.trim().is_empty() {
                return Err(Error::Validation("Start location and destination are required".into()));
            }

            let mut store = open_store(config)?;
            if store.customer(*customer).is_none() {
                return Err(Error::NotFound { entity: "Customer", id: *customer });
            }

            let mut job = Job::new(*customer, start_location.clone(), destination.clone(), *cost)
                .with_status(status);
            job.description = description.clone();
            let job = store.add_job(job);
            store.commit()?;
            println!("{} created ({})", job.display_name(), job.status);
            Ok(())
        }

        JobCommands::List { customer } => {
            let jobs = query_service::get_jobs(config, *customer)?;
            output::print_jobs(format, &jobs)
        }

        JobCommands::Recent { limit } => {
            let jobs = query_service::get_recent_jobs(config, *limit)?;
            output::print_jobs(format, &jobs)
        }

        JobCommands::SetStatus { id, status } => {
            let status = status.parse::<JobStatus>()?;
            let mut store = open_store(config)?;
            if !store.set_job_status(*id, status) {
                return Err(Error::NotFound { entity: "Job", id: *id });
            }
            store.commit()?;
            println!("Job {} status set to {}.", id, status);
            Ok(())
        }

        JobCommands::Remove { id } => {
            let mut store = open_store(config)?;
            if assignment::delete_job(&mut store, *id)? {
                println!("Job {} and its loads removed.", id);
            } else {
                println!("Job {} not found; nothing removed.", id);
            }
            Ok(())
        }
    }
}

fn cmd_load(config: &Config, format: OutputFormat, command: &LoadCommands) -> Result<()> {
    match command {
        LoadCommands::Add {
            job,
            description,
            weight,
            volume,
            unit,
            category,
            status,
        } => {
            let status = match status {
                Some(s) => s.parse::<LoadStatus>()?,
                None => LoadStatus::Pending,
            };
            if status == LoadStatus::Assigned && unit.is_none() {
                return Err(Error::Validation(
                    "An assigned load requires --unit".into(),
                ));
            }

            let mut store = open_store(config)?;
            let load = assignment::create_load(
                &mut store,
                NewLoad {
                    job_id: *job,
                    transport_unit_id: *unit,
                    description: description.clone(),
                    weight: *weight,
                    volume: *volume,
                    category: category.clone(),
                    status,
                },
            )?;
            println!("Load {} created on job {} ({}).", load.id, load.job_id, load.status);
            Ok(())
        }

        LoadCommands::List { job } => {
            let loads = query_service::get_loads(config, *job)?;
            output::print_loads(format, &loads)
        }

        LoadCommands::Assign { id, unit } => {
            let mut store = open_store(config)?;
            let load = store
                .load(*id)
                .cloned()
                .ok_or(Error::NotFound { entity: "Load", id: *id })?;
            let update = LoadUpdate::from_load(&load)
                .with_unit(Some(*unit))
                .with_status(LoadStatus::Assigned);
            assignment::update_load(&mut store, *id, update)?;
            println!("Load {} assigned to unit {}.", id, unit);
            Ok(())
        }

        LoadCommands::Deliver { id } => {
            let mut store = open_store(config)?;
            let load = store
                .load(*id)
                .cloned()
                .ok_or(Error::NotFound { entity: "Load", id: *id })?;
            let update = LoadUpdate::from_load(&load).with_status(LoadStatus::Delivered);
            let load = assignment::update_load(&mut store, *id, update)?;
            println!("Load {} delivered; job {} completed.", load.id, load.job_id);
            Ok(())
        }

        LoadCommands::Release { id } => {
            let mut store = open_store(config)?;
            let load = store
                .load(*id)
                .cloned()
                .ok_or(Error::NotFound { entity: "Load", id: *id })?;
            let update = LoadUpdate::from_load(&load)
                .with_unit(None)
                .with_status(LoadStatus::Pending);
            assignment::update_load(&mut store, *id, update)?;
            println!("Load {} released to pending.", id);
            Ok(())
        }

        LoadCommands::Remove { id } => {
            let mut store = open_store(config)?;
            if assignment::delete_load(&mut store, *id)? {
                println!("Load {} removed.", id);
            } else {
                println!("Load {} not found; nothing removed.", id);
            }
            Ok(())
        }
    }
}

fn cmd_config(
    show: bool,
    set_format: Option<OutputFormat>,
    set_data_dir: Option<std::path::PathBuf>,
    reset: bool,
) -> Result<()> {
    if reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults.");
        return Ok(());
    }

    let mut config = Config::load()?;
    let mut changed = false;

    if let Some(format) = set_format {
        config.output_format = format;
        changed = true;
    }
    if let Some(dir) = set_data_dir {
        config.data_dir = Some(dir);
        changed = true;
    }

    if changed {
        config.save()?;
        println!("Configuration updated.");
    }

    if show || !changed {
        println!("{}", serde_json::to_string_pretty(&config)?);
    }
    Ok(())
}
