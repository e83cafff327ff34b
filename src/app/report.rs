//! Plain-text job summary report

use std::collections::BTreeMap;

use chrono::Utc;

use crate::store::DataStore;

/// Render the admin job report: status summary, per-job details, and
/// the revenue footer.
pub fn job_summary(store: &DataStore) -> String {
    let jobs = store.jobs();

    let mut report = String::new();
    report.push_str("==================================================\n");
    report.push_str("              e-Shift Job Report                  \n");
    report.push_str("==================================================\n");
    report.push_str(&format!("Generated: {}\n\n", Utc::now().format("%Y-%m-%d %H:%M UTC")));

    let mut by_status: BTreeMap<&'static str, usize> = BTreeMap::new();
    for job in &jobs {
        *by_status.entry(job.status.label()).or_insert(0) += 1;
    }
    report.push_str("Job Status Summary:\n");
    if by_status.is_empty() {
        report.push_str("  (no jobs)\n");
    }
    for (status, count) in &by_status {
        report.push_str(&format!("  {:<12} {}\n", status, count));
    }
    report.push('\n');

    report.push_str("Job Details:\n");
    report.push_str("-".repeat(50).as_str());
    report.push('\n');
    for job in &jobs {
        let customer = store
            .customer(job.customer_id)
            .map(|c| c.full_name())
            .unwrap_or_else(|| "Unknown Customer".to_string());
        report.push_str(&format!("{}\n", job.display_name()));
        report.push_str(&format!("  Customer: {}\n", customer));
        report.push_str(&format!("  Status:   {}\n", job.status));
        report.push_str(&format!("  Cost:     {}\n", job.cost));
        report.push_str(&format!("  Loads:    {}\n", store.loads_by_job(job.id).len()));
        report.push('\n');
    }

    report.push_str(&format!("Total Revenue (Completed): {}\n", store.total_revenue()));
    report.push_str("==================================================\n");
    report
}
