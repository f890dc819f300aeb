// Readiness classification and roll-up
pub mod readiness;

// Logistics board views
pub mod logistics;

// Display view models
pub mod adapters;

// Job number allocation
pub mod job_numbering;

pub use logistics::{
    incoming_purchase_orders, loading_bay_parts, logistics_jobs, logistics_summary_stats,
    LogisticsBucket, LogisticsJobGroups, LogisticsSummaryStats,
};
pub use readiness::{
    classify_part, compute_parts_status, compute_parts_status_at, is_part_ordered, is_part_ready,
    PartsReadiness, ReadinessCategory,
};
