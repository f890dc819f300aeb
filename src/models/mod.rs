//! Canonical record shapes and the ingestion adapters that build them.
//!
//! Backend exports spell the same field several ways. Each `from_record`
//! adapter resolves those variants once, so the services only ever see the
//! typed structs in this module.

pub mod job;
pub mod part;
pub mod purchase_order;
pub mod record;
pub mod status;

pub use job::{Job, LOGISTICS_JOB_TYPE};
pub use part::Part;
pub use purchase_order::PurchaseOrder;
pub use status::{
    CanonicalValue, Normalized, PartLocation, PartStatus, PurchaseOrderStatus, SourceType,
    UnrecognizedStatus,
};

use rust_decimal::Decimal;
use serde_json::Value;

use crate::warnings::WarningRegistry;
use record::NumberCoercion;

/// Reports an unrecognized value once per domain and spelling.
pub(crate) fn note_unrecognized<T: CanonicalValue>(
    warnings: &WarningRegistry,
    entity: &str,
    id: &str,
    value: &Normalized<T>,
) {
    if let Err(raw) = value {
        warnings.warn_once(
            format!("{}:{}", T::DOMAIN, raw.as_str()),
            &format!(
                "{} {} has unrecognized {} '{}'",
                entity,
                id,
                T::DOMAIN,
                raw.as_str()
            ),
        );
    }
}

/// Coalesces a quantity across field variants. NaN becomes zero and
/// out-of-range magnitudes saturate.
pub(crate) fn quantity_field(
    record: &Value,
    names: &[&str],
    default: Decimal,
    warnings: &WarningRegistry,
    id: &str,
) -> Decimal {
    let value = match record::first_present(record, names) {
        None => return default,
        Some(value) => value,
    };

    match record::coerce(value) {
        NumberCoercion::Exact(quantity) => quantity,
        NumberCoercion::Clamped(quantity) => {
            warnings.warn_once(
                format!("range:{}:{}", id, names[0]),
                &format!(
                    "part {} has out-of-range {} {}, clamped to {}",
                    id, names[0], value, quantity
                ),
            );
            quantity
        }
        NumberCoercion::NotANumber => {
            warnings.warn_once(
                format!("quantity:{}:{}", id, names[0]),
                &format!("part {} has non-numeric {}: {}", id, names[0], value),
            );
            Decimal::ZERO
        }
    }
}

/// Elements of a collection document. Null or non-array input is empty and
/// non-object elements are skipped.
pub(crate) fn record_elements(value: &Value) -> impl Iterator<Item = &Value> {
    value
        .as_array()
        .map(|items| items.as_slice())
        .unwrap_or(&[])
        .iter()
        .filter(|item| item.is_object())
}
