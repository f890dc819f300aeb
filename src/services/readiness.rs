//! Parts readiness: per-part classification and the roll-up shown on job and
//! project screens.
//!
//! A part is Ready when its status puts it physically on hand or when any
//! quantity has been received. Otherwise it is Ordered when its status says
//! so or it carries a purchase-order link, and Missing when neither holds.
//! Ready takes precedence over Ordered, which takes precedence over Missing.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};
use tracing::{debug, instrument};

use crate::models::{Job, Part, PurchaseOrder};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ReadinessCategory {
    Ready,
    Ordered,
    Missing,
}

pub fn is_part_ready(part: &Part) -> bool {
    matches!(part.status, Ok(status) if status.is_ready()) || part.received_qty > Decimal::ZERO
}

/// Any purchase-order link counts, whatever state the linked order is in.
pub fn is_part_ordered(part: &Part) -> bool {
    matches!(part.status, Ok(status) if status.is_ordered()) || part.has_po_link()
}

/// Headline category of a part, by precedence.
pub fn classify_part(part: &Part) -> ReadinessCategory {
    if is_part_ready(part) {
        ReadinessCategory::Ready
    } else if is_part_ordered(part) {
        ReadinessCategory::Ordered
    } else {
        ReadinessCategory::Missing
    }
}

/// How one part's required quantity splits across the three categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QuantityBreakdown {
    #[serde(with = "rust_decimal::serde::float")]
    pub ready: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub ordered: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub missing: Decimal,
}

/// Splits a part's quantity. Arithmetic saturates at the `Decimal` bounds.
///
/// A Ready part with nothing received counts as fully ready. A Ready part
/// with a partial receipt sends the remainder through the Ordered check on
/// the same record, so the remainder of a part that is Ready by status and
/// has no PO link lands in Missing.
pub fn part_breakdown(part: &Part) -> QuantityBreakdown {
    let required = part.quantity_required;
    let received = part.received_qty;
    let mut breakdown = QuantityBreakdown::default();

    if is_part_ready(part) {
        let ready = if received > Decimal::ZERO {
            received.min(required)
        } else {
            required
        };
        breakdown.ready = ready;

        let remaining = required.saturating_sub(ready).max(Decimal::ZERO);
        if remaining > Decimal::ZERO {
            if is_part_ordered(part) {
                breakdown.ordered = remaining;
            } else {
                breakdown.missing = remaining;
            }
        }
    } else if is_part_ordered(part) {
        breakdown.ordered = required.saturating_sub(received).max(Decimal::ZERO);
    } else {
        breakdown.missing = required.saturating_sub(received).max(Decimal::ZERO);
    }

    breakdown
}

pub fn purchase_order_is_open(po: &PurchaseOrder) -> bool {
    match po.status {
        Ok(status) => !status.is_closed(),
        Err(_) => true,
    }
}

/// Open, goods not yet received, and the ETA has passed. Orders without a
/// usable ETA are never overdue.
pub fn purchase_order_is_overdue(po: &PurchaseOrder, now: DateTime<Utc>) -> bool {
    if !purchase_order_is_open(po) {
        return false;
    }
    if matches!(po.status, Ok(status) if status.is_received()) {
        return false;
    }
    po.eta().map(|eta| eta < now).unwrap_or(false)
}

/// Derived readiness summary for a set of parts and their purchase orders.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartsReadiness {
    #[serde(with = "rust_decimal::serde::float")]
    pub required_count: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub ready_count: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub ordered_count: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub missing_count: Decimal,
    pub parts_ready: bool,
    #[serde(rename = "openPOCount")]
    pub open_po_count: usize,
    #[serde(rename = "overduePOCount")]
    pub overdue_po_count: usize,
}

/// Readiness as of now. `logistics_jobs` is accepted for call-site parity
/// and does not affect the result.
pub fn compute_parts_status(
    parts: &[Part],
    purchase_orders: &[PurchaseOrder],
    logistics_jobs: &[Job],
) -> PartsReadiness {
    let _ = logistics_jobs;
    compute_parts_status_at(parts, purchase_orders, Utc::now())
}

#[instrument(
    level = "debug",
    skip_all,
    fields(parts = parts.len(), purchase_orders = purchase_orders.len())
)]
pub fn compute_parts_status_at(
    parts: &[Part],
    purchase_orders: &[PurchaseOrder],
    now: DateTime<Utc>,
) -> PartsReadiness {
    let mut summary = PartsReadiness::default();

    for part in parts {
        summary.required_count = summary.required_count.saturating_add(part.quantity_required);

        let breakdown = part_breakdown(part);
        summary.ready_count = summary.ready_count.saturating_add(breakdown.ready);
        summary.ordered_count = summary.ordered_count.saturating_add(breakdown.ordered);
        summary.missing_count = summary.missing_count.saturating_add(breakdown.missing);
    }

    for po in purchase_orders {
        if !purchase_order_is_open(po) {
            continue;
        }
        summary.open_po_count += 1;
        if purchase_order_is_overdue(po, now) {
            summary.overdue_po_count += 1;
        }
    }

    summary.parts_ready =
        summary.required_count > Decimal::ZERO && summary.ready_count >= summary.required_count;

    debug!(
        required = %summary.required_count,
        ready = %summary.ready_count,
        ordered = %summary.ordered_count,
        missing = %summary.missing_count,
        open_pos = summary.open_po_count,
        overdue_pos = summary.overdue_po_count,
        "computed parts readiness"
    );

    summary
}
