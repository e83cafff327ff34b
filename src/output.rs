//! Output formatting module

use rust_decimal::Decimal;

use crate::app::query_service::OverloadedLoad;
use crate::cli::OutputFormat;
use crate::error::Result;
use crate::model::{Customer, Job, Load, TransportUnit};
use crate::store::DashboardStats;

fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let truncated: String = s.chars().take(max_len.saturating_sub(2)).collect();
        format!("{}..", truncated)
    } else {
        s.to_string()
    }
}

pub fn print_customers(format: OutputFormat, customers: &[Customer]) -> Result<()> {
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(customers)?);
        return Ok(());
    }

    println!("{:<5} {:<24} {:<28} {:<14}", "ID", "Name", "Email", "Username");
    println!("{}", "-".repeat(73));
    for c in customers {
        println!(
            "{:<5} {:<24} {:<28} {:<14}",
            c.id,
            truncate_str(&c.full_name(), 23),
            truncate_str(&c.email, 27),
            truncate_str(&c.username, 13)
        );
    }
    println!("\n{} customer(s)", customers.len());
    Ok(())
}

pub fn print_units(format: OutputFormat, units: &[TransportUnit]) -> Result<()> {
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(units)?);
        return Ok(());
    }

    println!(
        "{:<5} {:<12} {:<14} {:>10} {:>8} {:<16} {:<10}",
        "ID", "Type", "Plate", "MaxWt(kg)", "MaxVol", "Driver", "Available"
    );
    println!("{}", "-".repeat(80));
    for u in units {
        println!(
            "{:<5} {:<12} {:<14} {:>10} {:>8} {:<16} {:<10}",
            u.id,
            truncate_str(&u.unit_type, 11),
            truncate_str(&u.license_plate, 13),
            u.max_weight,
            u.max_volume,
            truncate_str(&u.driver_name, 15),
            if u.is_available { "yes" } else { "no" }
        );
    }
    println!("\n{} unit(s)", units.len());
    Ok(())
}

pub fn print_jobs(format: OutputFormat, jobs: &[Job]) -> Result<()> {
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(jobs)?);
        return Ok(());
    }

    println!(
        "{:<5} {:<8} {:<30} {:<12} {:>10}",
        "ID", "Cust", "Route", "Status", "Cost"
    );
    println!("{}", "-".repeat(68));
    for j in jobs {
        let route = format!("{} -> {}", j.start_location, j.destination);
        println!(
            "{:<5} {:<8} {:<30} {:<12} {:>10}",
            j.id,
            j.customer_id,
            truncate_str(&route, 29),
            j.status,
            j.cost
        );
    }
    println!("\n{} job(s)", jobs.len());
    Ok(())
}

pub fn print_loads(format: OutputFormat, loads: &[Load]) -> Result<()> {
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(loads)?);
        return Ok(());
    }

    println!(
        "{:<5} {:<6} {:<6} {:<22} {:>9} {:>7} {:<10}",
        "ID", "Job", "Unit", "Description", "Wt(kg)", "Vol", "Status"
    );
    println!("{}", "-".repeat(70));
    for l in loads {
        let unit = l
            .transport_unit_id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<5} {:<6} {:<6} {:<22} {:>9} {:>7} {:<10}",
            l.id,
            l.job_id,
            unit,
            truncate_str(&l.description, 21),
            l.weight,
            l.volume,
            l.status
        );
    }
    println!("\n{} load(s)", loads.len());
    Ok(())
}

pub fn print_dashboard(format: OutputFormat, stats: &DashboardStats) -> Result<()> {
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(stats)?);
        return Ok(());
    }

    println!("\ne-Shift Dashboard");
    println!("=================");
    println!("Customers:       {}", stats.total_customers);
    println!("Active jobs:     {}", stats.active_jobs);
    println!("Transport units: {}", stats.transport_units);
    println!("Completed jobs:  {}", stats.completed_jobs);
    Ok(())
}

pub fn print_revenue(format: OutputFormat, revenue: Decimal) -> Result<()> {
    if format == OutputFormat::Json {
        println!("{}", serde_json::json!({ "total_revenue": revenue }));
        return Ok(());
    }

    println!("Total revenue (completed jobs): {}", revenue);
    Ok(())
}

pub fn print_overloads(format: OutputFormat, overloads: &[OverloadedLoad]) -> Result<()> {
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(overloads)?);
        return Ok(());
    }

    if overloads.is_empty() {
        println!("No loads exceed their unit's capacity.");
        return Ok(());
    }

    println!(
        "{:<6} {:<6} {:<22} {:>12} {:>12}",
        "Load", "Unit", "Description", "ExcessWt", "ExcessVol"
    );
    println!("{}", "-".repeat(62));
    for o in overloads {
        println!(
            "{:<6} {:<6} {:<22} {:>12} {:>12}",
            o.load.id,
            o.unit.id,
            truncate_str(&o.load.description, 21),
            o.excess_weight
                .map(|w| w.to_string())
                .unwrap_or_else(|| "-".to_string()),
            o.excess_volume
                .map(|v| v.to_string())
                .unwrap_or_else(|| "-".to_string())
        );
    }
    println!("\n{} overloaded load(s)", overloads.len());
    Ok(())
}
