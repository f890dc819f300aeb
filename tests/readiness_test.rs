//! Parts readiness over records shaped like backend exports.

use chrono::{DateTime, Duration, Utc};
use fieldops_logistics::{
    models::{Part, PurchaseOrder},
    services::{compute_parts_status, compute_parts_status_at, PartsReadiness},
    LogisticsDataset, WarningRegistry,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::json;

fn now() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2025-03-10T09:00:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

fn dataset(document: serde_json::Value) -> LogisticsDataset {
    LogisticsDataset::from_json(&document, &WarningRegistry::disabled()).unwrap()
}

#[test]
fn empty_inputs_report_zero_and_not_ready() {
    let summary = compute_parts_status(&[], &[], &[]);
    assert_eq!(
        summary,
        PartsReadiness {
            required_count: Decimal::ZERO,
            ready_count: Decimal::ZERO,
            ordered_count: Decimal::ZERO,
            missing_count: Decimal::ZERO,
            parts_ready: false,
            open_po_count: 0,
            overdue_po_count: 0,
        }
    );
}

#[test]
fn partial_receipt_scenario() {
    let future = (now() + Duration::days(14)).to_rfc3339();
    let data = dataset(json!({
        "parts": [
            { "quantity_required": 5, "received_qty": 3, "status": "in_storage" },
            { "quantity_required": 2, "status": "on_order", "purchase_order_id": "po1" },
        ],
        "purchase_orders": [
            { "id": "po1", "status": "sent", "expected_date": future },
        ],
    }));

    let summary = compute_parts_status_at(&data.parts, &data.purchase_orders, now());

    assert_eq!(summary.required_count, dec!(7));
    assert_eq!(summary.ready_count, dec!(3));
    // The stored part has no PO link, so its remainder of 2 is missing; the
    // second part contributes 2 ordered.
    assert_eq!(summary.missing_count, dec!(2));
    assert_eq!(summary.ordered_count, dec!(2));
    assert!(!summary.parts_ready);
    assert_eq!(summary.open_po_count, 1);
    assert_eq!(summary.overdue_po_count, 0);
}

#[test]
fn fully_stored_parts_are_ready() {
    let data = dataset(json!({
        "parts": [
            { "quantity_required": 2, "received_qty": 2, "status": "In Storage" },
            { "required_qty": "4", "quantity_received": 4, "status": "in_storage" },
        ],
    }));

    let summary = compute_parts_status_at(&data.parts, &[], now());
    assert!(summary.parts_ready);
    assert_eq!(summary.missing_count, Decimal::ZERO);
    assert_eq!(summary.ready_count, summary.required_count);
}

#[test]
fn overdue_po_counts_until_received() {
    let yesterday = now() - Duration::days(1);

    let sent = PurchaseOrder::new("po1", "sent").with_expected_date(yesterday);
    let summary = compute_parts_status_at(&[], &[sent], now());
    assert_eq!(summary.open_po_count, 1);
    assert_eq!(summary.overdue_po_count, 1);

    let received = PurchaseOrder::new("po1", "received").with_expected_date(yesterday);
    let summary = compute_parts_status_at(&[], &[received], now());
    assert_eq!(summary.open_po_count, 0);
    assert_eq!(summary.overdue_po_count, 0);
}

#[test]
fn closed_and_cancelled_orders_are_not_open() {
    let pos: Vec<PurchaseOrder> = ["completed", "closed", "Canceled", "sent", "Draft"]
        .iter()
        .enumerate()
        .map(|(i, status)| PurchaseOrder::new(format!("po{}", i), status))
        .collect();

    let summary = compute_parts_status_at(&[], &pos, now());
    assert_eq!(summary.open_po_count, 2);
}

#[test]
fn malformed_dates_never_make_orders_overdue() {
    let data = dataset(json!({
        "purchase_orders": [
            { "id": "a", "status": "on order", "expected_date": "ASAP" },
            { "id": "b", "status": "on order", "eta": null },
            { "id": "c", "status": "on order", "expected_delivery_date": "2025-03-01" },
        ],
    }));

    let summary = compute_parts_status_at(&[], &data.purchase_orders, now());
    assert_eq!(summary.open_po_count, 3);
    assert_eq!(summary.overdue_po_count, 1);
}

#[test]
fn parts_linked_to_cancelled_orders_still_count_as_ordered() {
    let parts = vec![Part::new(dec!(3)).with_po_link("po-cancelled")];
    let pos = vec![PurchaseOrder::new("po-cancelled", "cancelled")];

    let summary = compute_parts_status_at(&parts, &pos, now());
    assert_eq!(summary.ordered_count, dec!(3));
    assert_eq!(summary.missing_count, Decimal::ZERO);
    assert_eq!(summary.open_po_count, 0);
}

#[test]
fn bad_quantities_fall_back_without_failing() {
    let warnings = WarningRegistry::disabled();
    let data = LogisticsDataset::from_json(
        &json!({
            "parts": [
                { "id": "p1", "quantity_required": "several", "status": "pending" },
                { "id": "p2", "status": "pending" },
            ],
        }),
        &warnings,
    )
    .unwrap();

    let summary = compute_parts_status_at(&data.parts, &[], now());
    assert_eq!(summary.required_count, dec!(1));
    assert_eq!(summary.missing_count, dec!(1));
    assert!(warnings.has_warned("quantity:p1:quantity_required"));
}

#[test]
fn huge_quantities_saturate_instead_of_overflowing() {
    let warnings = WarningRegistry::disabled();
    let data = LogisticsDataset::from_json(
        &json!({
            "parts": [
                { "id": "a", "quantity_required": 5e28 },
                { "id": "b", "quantity_required": 5e28 },
                { "id": "c", "quantity_required": 5e28, "received_qty": -5e28 },
                { "id": "d", "quantity_required": 1e30 },
            ],
        }),
        &warnings,
    )
    .unwrap();

    assert_eq!(data.parts[3].quantity_required, Decimal::MAX);
    assert!(warnings.has_warned("range:d:quantity_required"));

    let summary = compute_parts_status_at(&data.parts, &[], now());
    assert_eq!(summary.required_count, Decimal::MAX);
    assert_eq!(summary.missing_count, Decimal::MAX);
    assert_eq!(summary.ready_count, Decimal::ZERO);
    assert!(!summary.parts_ready);

    let value = serde_json::to_value(&summary).unwrap();
    assert!(value["requiredCount"].as_f64().unwrap() > 7.9e28);
}
