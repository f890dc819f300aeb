use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::record::{first_date, first_text, text};
use super::record_elements;

/// Job type name that marks a job as a logistics run.
pub const LOGISTICS_JOB_TYPE: &str = "Logistics";

/// A scheduled unit of field work.
///
/// `status` is kept exactly as recorded; the logistics board buckets it by
/// exact match.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Job {
    pub id: Option<String>,
    pub job_number: Option<String>,
    pub job_type_name: Option<String>,
    pub status: Option<String>,
    pub customer_name: Option<String>,
    pub address: Option<String>,
    pub project_id: Option<String>,
    pub scheduled_date: Option<DateTime<Utc>>,
    pub created_date: Option<DateTime<Utc>>,
}

impl Job {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    pub fn with_type(mut self, job_type_name: impl Into<String>) -> Self {
        self.job_type_name = Some(job_type_name.into());
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_number(mut self, job_number: impl Into<String>) -> Self {
        self.job_number = Some(job_number.into());
        self
    }

    pub fn is_logistics(&self) -> bool {
        self.job_type_name.as_deref() == Some(LOGISTICS_JOB_TYPE)
    }

    pub fn from_record(record: &Value) -> Self {
        Self {
            id: first_text(record, &["id"]),
            job_number: first_text(record, &["job_number"]),
            job_type_name: job_type_name(record),
            status: first_text(record, &["status"]),
            customer_name: first_text(record, &["customer_name"]),
            address: first_text(record, &["address", "address_full"]),
            project_id: first_text(record, &["project_id"]),
            scheduled_date: first_date(record, &["scheduled_date"]),
            created_date: first_date(record, &["created_date"]),
        }
    }

    pub fn from_records(value: &Value) -> Vec<Self> {
        record_elements(value).map(Self::from_record).collect()
    }
}

/// `job_type_name`, else `job_type` as text, else `job_type.name`.
fn job_type_name(record: &Value) -> Option<String> {
    first_text(record, &["job_type_name"]).or_else(|| {
        record.get("job_type").and_then(|job_type| {
            text(job_type).or_else(|| job_type.get("name").and_then(text))
        })
    })
}
