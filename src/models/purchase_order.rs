use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::record::{first_date, first_populated, first_text};
use super::status::{
    normalize_po_status, normalize_source_type, serde_normalized, Normalized,
    PurchaseOrderStatus, SourceType,
};
use super::{note_unrecognized, record_elements};
use crate::warnings::WarningRegistry;

/// Field spellings that carry the expected delivery date, in precedence order.
pub const ETA_FIELDS: &[&str] = &[
    "expected_date",
    "eta",
    "expected_delivery_date",
    "delivery_date",
    "estimated_arrival",
];

/// An order placed with a supplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseOrder {
    pub id: Option<String>,
    pub po_number: Option<String>,
    pub supplier_id: Option<String>,
    pub supplier_name: Option<String>,
    #[serde(with = "serde_normalized")]
    pub status: Normalized<PurchaseOrderStatus>,
    #[serde(with = "serde_normalized")]
    pub delivery_method: Normalized<SourceType>,
    pub expected_date: Option<DateTime<Utc>>,
    pub created_date: Option<DateTime<Utc>>,
}

impl PurchaseOrder {
    pub fn new(id: impl Into<String>, status: &str) -> Self {
        Self {
            id: Some(id.into()),
            po_number: None,
            supplier_id: None,
            supplier_name: None,
            status: normalize_po_status(Some(status)),
            delivery_method: Ok(SourceType::SupplierDelivery),
            expected_date: None,
            created_date: None,
        }
    }

    pub fn with_expected_date(mut self, eta: DateTime<Utc>) -> Self {
        self.expected_date = Some(eta);
        self
    }

    pub fn with_created_date(mut self, created: DateTime<Utc>) -> Self {
        self.created_date = Some(created);
        self
    }

    /// Expected arrival, if the order carries a usable one.
    pub fn eta(&self) -> Option<DateTime<Utc>> {
        self.expected_date
    }

    pub fn from_record(record: &Value, warnings: &WarningRegistry) -> Self {
        let id = first_text(record, &["id"]);
        let key = id.as_deref().unwrap_or("<unidentified>");

        let status = normalize_po_status(first_text(record, &["status"]).as_deref());
        let delivery_method = normalize_source_type(
            first_text(record, &["delivery_method", "source_type"]).as_deref(),
        );
        note_unrecognized(warnings, "purchase order", key, &status);
        note_unrecognized(warnings, "purchase order", key, &delivery_method);

        let expected_date = first_date(record, ETA_FIELDS);
        if expected_date.is_none() {
            if let Some(raw) = first_populated(record, ETA_FIELDS) {
                warnings.warn_once(
                    format!("eta:{}", key),
                    &format!("purchase order {} has unparseable ETA {}", key, raw),
                );
            }
        }

        Self {
            po_number: first_text(record, &["po_number", "reference"]),
            supplier_id: first_text(record, &["supplier_id"]),
            supplier_name: first_text(record, &["supplier_name", "supplier"]),
            created_date: first_date(record, &["created_date"]),
            expected_date,
            status,
            delivery_method,
            id,
        }
    }

    pub fn from_records(value: &Value, warnings: &WarningRegistry) -> Vec<Self> {
        record_elements(value)
            .map(|record| Self::from_record(record, warnings))
            .collect()
    }
}
