use tracing::debug;

use crate::models::Job;

/// Numeric value of a job number such as `5012` or `#5012`.
pub fn parse_job_number(raw: &str) -> Option<u64> {
    raw.trim().trim_start_matches('#').parse().ok()
}

/// Next free job number: one past the highest numeric job number, and never
/// below `start`.
pub fn next_job_number(jobs: &[Job], start: u64) -> u64 {
    let highest = jobs
        .iter()
        .filter_map(|job| job.job_number.as_deref())
        .filter_map(parse_job_number)
        .max();

    let next = match highest {
        Some(highest) => highest.saturating_add(1).max(start),
        None => start,
    };
    debug!(?highest, next, "allocated job number");
    next
}
