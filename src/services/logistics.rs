//! Logistics board views: incoming purchase orders, the loading bay and
//! logistics jobs grouped by status.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter};
use tracing::{debug, instrument};

use crate::models::{Job, Part, PartStatus, PurchaseOrder};

/// Column a logistics job is shown in.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum LogisticsBucket {
    Open,
    Scheduled,
    InProgress,
    Completed,
}

impl LogisticsBucket {
    /// Exact, case-sensitive match on the recorded status. Anything else,
    /// including a missing status, lands in `Open`.
    pub fn from_status(status: Option<&str>) -> Self {
        match status {
            Some("Scheduled") => LogisticsBucket::Scheduled,
            Some("In Progress") => LogisticsBucket::InProgress,
            Some("Completed") => LogisticsBucket::Completed,
            _ => LogisticsBucket::Open,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LogisticsJobGroups {
    pub open: Vec<Job>,
    pub scheduled: Vec<Job>,
    pub in_progress: Vec<Job>,
    pub completed: Vec<Job>,
}

impl LogisticsJobGroups {
    pub fn bucket(&self, bucket: LogisticsBucket) -> &[Job] {
        match bucket {
            LogisticsBucket::Open => &self.open,
            LogisticsBucket::Scheduled => &self.scheduled,
            LogisticsBucket::InProgress => &self.in_progress,
            LogisticsBucket::Completed => &self.completed,
        }
    }

    fn bucket_mut(&mut self, bucket: LogisticsBucket) -> &mut Vec<Job> {
        match bucket {
            LogisticsBucket::Open => &mut self.open,
            LogisticsBucket::Scheduled => &mut self.scheduled,
            LogisticsBucket::InProgress => &mut self.in_progress,
            LogisticsBucket::Completed => &mut self.completed,
        }
    }

    pub fn total(&self) -> usize {
        self.open.len() + self.scheduled.len() + self.in_progress.len() + self.completed.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LogisticsSummaryStats {
    #[serde(rename = "incomingPOCount")]
    pub incoming_po_count: usize,
    #[serde(rename = "logisticsJobCount")]
    pub logistics_job_count: usize,
    #[serde(rename = "loadingBayPartCount")]
    pub loading_bay_part_count: usize,
}

/// Orders still on their way, newest first. Orders without a creation date
/// keep their relative order after the dated ones.
pub fn incoming_purchase_orders(purchase_orders: &[PurchaseOrder]) -> Vec<PurchaseOrder> {
    let mut incoming: Vec<PurchaseOrder> = purchase_orders
        .iter()
        .filter(|po| matches!(po.status, Ok(status) if status.is_incoming()))
        .cloned()
        .collect();

    incoming.sort_by(|a, b| b.created_date.cmp(&a.created_date));
    incoming
}

pub fn loading_bay_parts(parts: &[Part]) -> Vec<Part> {
    parts
        .iter()
        .filter(|part| part.status == Ok(PartStatus::InLoadingBay))
        .cloned()
        .collect()
}

pub fn logistics_jobs(jobs: &[Job]) -> LogisticsJobGroups {
    let mut groups = LogisticsJobGroups::default();
    for job in jobs.iter().filter(|job| job.is_logistics()) {
        groups
            .bucket_mut(LogisticsBucket::from_status(job.status.as_deref()))
            .push(job.clone());
    }
    groups
}

#[instrument(
    level = "debug",
    skip_all,
    fields(purchase_orders = purchase_orders.len(), jobs = jobs.len(), parts = parts.len())
)]
pub fn logistics_summary_stats(
    purchase_orders: &[PurchaseOrder],
    jobs: &[Job],
    parts: &[Part],
) -> LogisticsSummaryStats {
    let stats = LogisticsSummaryStats {
        incoming_po_count: incoming_purchase_orders(purchase_orders).len(),
        logistics_job_count: logistics_jobs(jobs).total(),
        loading_bay_part_count: loading_bay_parts(parts).len(),
    };
    debug!(?stats, "computed logistics summary");
    stats
}
