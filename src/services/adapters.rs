//! View models handed to the display layer. Every field has a safe default so
//! templates never deal with missing values.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::status::{normalized_label, normalized_str};
use crate::models::{Job, Part, PurchaseOrder};
use crate::services::readiness::{
    classify_part, purchase_order_is_open, purchase_order_is_overdue, ReadinessCategory,
};

pub const UNKNOWN_CUSTOMER: &str = "Unknown customer";
pub const UNKNOWN_SUPPLIER: &str = "Unknown supplier";
pub const UNNUMBERED_PO: &str = "Unnumbered";
pub const UNNAMED_PART: &str = "Unnamed part";
pub const DEFAULT_JOB_STATUS: &str = "Open";
const NO_NUMBER: &str = "—";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobCard {
    pub id: Option<String>,
    pub display_number: String,
    pub customer_name: String,
    pub address: String,
    pub status: String,
    pub scheduled_date: Option<DateTime<Utc>>,
    pub is_logistics: bool,
}

impl JobCard {
    pub fn from_job(job: &Job) -> Self {
        Self {
            id: job.id.clone(),
            display_number: job
                .job_number
                .as_deref()
                .map(|number| format!("#{}", number.trim_start_matches('#')))
                .unwrap_or_else(|| NO_NUMBER.to_string()),
            customer_name: non_blank(job.customer_name.as_deref())
                .unwrap_or(UNKNOWN_CUSTOMER)
                .to_string(),
            address: job.address.clone().unwrap_or_default(),
            status: non_blank(job.status.as_deref())
                .unwrap_or(DEFAULT_JOB_STATUS)
                .to_string(),
            scheduled_date: job.scheduled_date,
            is_logistics: job.is_logistics(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseOrderRow {
    pub id: Option<String>,
    pub po_number: String,
    pub supplier: String,
    pub status: String,
    pub status_label: String,
    pub delivery_method: String,
    pub eta: Option<DateTime<Utc>>,
    pub is_open: bool,
    pub is_overdue: bool,
}

impl PurchaseOrderRow {
    pub fn from_purchase_order(po: &PurchaseOrder, now: DateTime<Utc>) -> Self {
        Self {
            id: po.id.clone(),
            po_number: po
                .po_number
                .clone()
                .unwrap_or_else(|| UNNUMBERED_PO.to_string()),
            supplier: non_blank(po.supplier_name.as_deref())
                .unwrap_or(UNKNOWN_SUPPLIER)
                .to_string(),
            status: normalized_str(&po.status).to_string(),
            status_label: normalized_label(&po.status).to_string(),
            delivery_method: normalized_label(&po.delivery_method).to_string(),
            eta: po.eta(),
            is_open: purchase_order_is_open(po),
            is_overdue: purchase_order_is_overdue(po, now),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartRow {
    pub id: Option<String>,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub quantity_required: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub received_qty: Decimal,
    pub status: String,
    pub status_label: String,
    pub location_label: String,
    pub source_label: String,
    pub category: ReadinessCategory,
    pub po_link: Option<String>,
}

impl PartRow {
    pub fn from_part(part: &Part) -> Self {
        Self {
            id: part.id.clone(),
            name: non_blank(part.name.as_deref())
                .unwrap_or(UNNAMED_PART)
                .to_string(),
            quantity_required: part.quantity_required,
            received_qty: part.received_qty,
            status: normalized_str(&part.status).to_string(),
            status_label: normalized_label(&part.status).to_string(),
            location_label: normalized_label(&part.location).to_string(),
            source_label: normalized_label(&part.source_type).to_string(),
            category: classify_part(part),
            po_link: part.po_link.clone(),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
