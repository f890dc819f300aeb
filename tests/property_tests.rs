//! Property-based tests for readiness aggregation and logistics views.
//!
//! These tests use proptest to verify invariants across a wide range of inputs,
//! helping to catch edge cases that unit tests might miss.

use chrono::{DateTime, Duration, TimeZone, Utc};
use fieldops_logistics::{
    models::status::{normalize_part_status, normalize_po_status, normalized_str},
    models::{Job, Part, PurchaseOrder},
    services::{
        compute_parts_status_at, incoming_purchase_orders, is_part_ready, logistics_jobs,
        logistics_summary_stats, readiness::part_breakdown,
    },
};
use proptest::prelude::*;
use rust_decimal::Decimal;

const PART_STATUSES: &[&str] = &[
    "pending",
    "on_order",
    "in_transit",
    "in_loading_bay",
    "in_storage",
    "in_vehicle",
    "installed",
    "cancelled",
    "Ordered",
    "Delivered to Delivery Bay",
    "mystery",
];

const PO_STATUSES: &[&str] = &[
    "draft",
    "sent",
    "on_order",
    "in_transit",
    "delivered",
    "received",
    "completed",
    "closed",
    "cancelled",
    "Shipped",
    "unknown",
];

const JOB_TYPES: &[&str] = &["Logistics", "Install", "Service", "logistics"];

const JOB_STATUSES: &[&str] = &[
    "Open",
    "Scheduled",
    "In Progress",
    "Completed",
    "on hold",
    "",
];

// Strategies for generating test data
fn part_strategy() -> impl Strategy<Value = Part> {
    (
        0i64..50,
        0i64..60,
        prop::sample::select(PART_STATUSES),
        prop::option::of("po-[0-9]{1,3}"),
    )
        .prop_map(|(required, received, status, po_link)| {
            let mut part = Part::new(Decimal::from(required))
                .with_received(Decimal::from(received))
                .with_status(status);
            part.po_link = po_link;
            part
        })
}

fn purchase_order_strategy() -> impl Strategy<Value = PurchaseOrder> {
    (
        "po-[0-9]{1,4}",
        prop::sample::select(PO_STATUSES),
        prop::option::of(-30i64..30),
        prop::option::of(0i64..365),
    )
        .prop_map(|(id, status, eta_days, created_days)| {
            let mut po = PurchaseOrder::new(id, status);
            po.expected_date = eta_days.map(|d| base_time() + Duration::days(d));
            po.created_date = created_days.map(|d| base_time() - Duration::days(d));
            po
        })
}

fn job_strategy() -> impl Strategy<Value = Job> {
    (
        "[a-z]{4}",
        prop::sample::select(JOB_TYPES),
        prop::sample::select(JOB_STATUSES),
    )
        .prop_map(|(id, job_type, status)| Job::new(id).with_type(job_type).with_status(status))
}

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 5, 1, 8, 0, 0).unwrap()
}

// Property: required quantities are conserved and fully partitioned
proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn required_count_is_sum_of_required(parts in prop::collection::vec(part_strategy(), 0..30)) {
        let summary = compute_parts_status_at(&parts, &[], base_time());
        let expected: Decimal = parts.iter().map(|p| p.quantity_required).sum();
        prop_assert_eq!(summary.required_count, expected);
    }

    #[test]
    fn ready_portion_never_counts_as_missing(part in part_strategy()) {
        let breakdown = part_breakdown(&part);
        if is_part_ready(&part) {
            let uncovered = (part.quantity_required - breakdown.ready).max(Decimal::ZERO);
            prop_assert_eq!(breakdown.ordered + breakdown.missing, uncovered);
            prop_assert!(breakdown.ordered.is_zero() || breakdown.missing.is_zero());
        } else {
            prop_assert!(breakdown.ready.is_zero());
        }
    }

    #[test]
    fn parts_ready_requires_positive_requirement(parts in prop::collection::vec(part_strategy(), 0..10)) {
        let summary = compute_parts_status_at(&parts, &[], base_time());
        prop_assert_eq!(
            summary.parts_ready,
            summary.required_count > Decimal::ZERO && summary.ready_count >= summary.required_count
        );
    }
}

// Property: purchase order counts
proptest! {
    #[test]
    fn overdue_never_exceeds_open(pos in prop::collection::vec(purchase_order_strategy(), 0..20)) {
        let summary = compute_parts_status_at(&[], &pos, base_time());
        prop_assert!(summary.overdue_po_count <= summary.open_po_count);
        prop_assert!(summary.open_po_count <= pos.len());
    }
}

// Property: normalization is idempotent
proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    #[test]
    fn part_status_normalization_is_idempotent(raw in ".{0,30}") {
        let once = normalize_part_status(Some(&raw));
        let twice = normalize_part_status(Some(normalized_str(&once)));
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn po_status_normalization_is_idempotent(
        raw in prop_oneof![prop::sample::select(PO_STATUSES).prop_map(String::from), "[A-Za-z _]{0,20}"]
    ) {
        let once = normalize_po_status(Some(&raw));
        let twice = normalize_po_status(Some(normalized_str(&once)));
        prop_assert_eq!(once, twice);
    }
}

// Property: logistics views
proptest! {
    #[test]
    fn logistics_job_count_is_sum_of_buckets(jobs in prop::collection::vec(job_strategy(), 0..25)) {
        let groups = logistics_jobs(&jobs);
        let stats = logistics_summary_stats(&[], &jobs, &[]);
        prop_assert_eq!(
            stats.logistics_job_count,
            groups.open.len() + groups.scheduled.len() + groups.in_progress.len() + groups.completed.len()
        );
        prop_assert_eq!(stats.logistics_job_count, jobs.iter().filter(|j| j.is_logistics()).count());
    }

    #[test]
    fn incoming_filter_is_exact_and_non_mutating(pos in prop::collection::vec(purchase_order_strategy(), 0..25)) {
        let before = pos.clone();
        let incoming = incoming_purchase_orders(&pos);

        prop_assert_eq!(&pos, &before);
        for po in &incoming {
            prop_assert!(matches!(po.status, Ok(status) if status.is_incoming()));
        }
        let expected = pos
            .iter()
            .filter(|po| matches!(po.status, Ok(status) if status.is_incoming()))
            .count();
        prop_assert_eq!(incoming.len(), expected);

        for pair in incoming.windows(2) {
            if let (Some(a), Some(b)) = (pair[0].created_date, pair[1].created_date) {
                prop_assert!(a >= b);
            }
        }
    }
}
