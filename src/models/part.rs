use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::record::{first_date, first_populated, first_text, text};
use super::status::{
    normalize_part_location, normalize_part_status, normalize_source_type, serde_normalized,
    Normalized, PartLocation, PartStatus, SourceType,
};
use super::{note_unrecognized, quantity_field, record_elements};
use crate::warnings::WarningRegistry;

/// Field spellings for the required quantity, in precedence order.
pub const REQUIRED_QTY_FIELDS: &[&str] = &["quantity_required", "required_qty", "quantity"];

/// Field spellings for the received quantity, in precedence order.
pub const RECEIVED_QTY_FIELDS: &[&str] = &["received_qty", "quantity_received"];

/// Fields that link a part to a purchase order, in precedence order.
pub const PO_LINK_FIELDS: &[&str] = &[
    "purchase_order_id",
    "linked_po_id",
    "po_id",
    "purchase_order_line_id",
];

/// A material line required by a project or job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    pub id: Option<String>,
    pub name: Option<String>,
    pub project_id: Option<String>,
    pub job_id: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub quantity_required: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub received_qty: Decimal,
    #[serde(with = "serde_normalized")]
    pub status: Normalized<PartStatus>,
    #[serde(with = "serde_normalized")]
    pub location: Normalized<PartLocation>,
    #[serde(with = "serde_normalized")]
    pub source_type: Normalized<SourceType>,
    /// The first populated purchase-order link, whichever field carried it.
    pub po_link: Option<String>,
    pub created_date: Option<DateTime<Utc>>,
}

impl Default for Part {
    fn default() -> Self {
        Self::new(Decimal::ONE)
    }
}

impl Part {
    pub fn new(quantity_required: Decimal) -> Self {
        Self {
            id: None,
            name: None,
            project_id: None,
            job_id: None,
            quantity_required,
            received_qty: Decimal::ZERO,
            status: Ok(PartStatus::Pending),
            location: Ok(PartLocation::Supplier),
            source_type: Ok(SourceType::SupplierDelivery),
            po_link: None,
            created_date: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the status from raw text, normalizing it.
    pub fn with_status(mut self, raw: &str) -> Self {
        self.status = normalize_part_status(Some(raw));
        self
    }

    pub fn with_received(mut self, received_qty: Decimal) -> Self {
        self.received_qty = received_qty;
        self
    }

    pub fn with_po_link(mut self, po_id: impl Into<String>) -> Self {
        self.po_link = Some(po_id.into());
        self
    }

    /// Builds a part from a backend record, resolving legacy field names.
    pub fn from_record(record: &Value, warnings: &WarningRegistry) -> Self {
        let id = first_text(record, &["id"]);
        let key = id.as_deref().unwrap_or("<unidentified>");

        let status = normalize_part_status(first_text(record, &["status"]).as_deref());
        let location = normalize_part_location(first_text(record, &["location"]).as_deref());
        let source_type = normalize_source_type(
            first_text(record, &["source_type", "delivery_method"]).as_deref(),
        );
        note_unrecognized(warnings, "part", key, &status);
        note_unrecognized(warnings, "part", key, &location);
        note_unrecognized(warnings, "part", key, &source_type);

        Self {
            quantity_required: quantity_field(
                record,
                REQUIRED_QTY_FIELDS,
                Decimal::ONE,
                warnings,
                key,
            ),
            received_qty: quantity_field(
                record,
                RECEIVED_QTY_FIELDS,
                Decimal::ZERO,
                warnings,
                key,
            ),
            name: first_text(record, &["name", "item_name", "description"]),
            project_id: first_text(record, &["project_id"]),
            job_id: first_text(record, &["job_id"]),
            po_link: first_populated(record, PO_LINK_FIELDS).map(|value| {
                text(value).unwrap_or_else(|| value.to_string())
            }),
            created_date: first_date(record, &["created_date"]),
            status,
            location,
            source_type,
            id,
        }
    }

    /// Adapts every object in a collection document.
    pub fn from_records(value: &Value, warnings: &WarningRegistry) -> Vec<Self> {
        record_elements(value)
            .map(|record| Self::from_record(record, warnings))
            .collect()
    }

    pub fn has_po_link(&self) -> bool {
        self.po_link.is_some()
    }
}
