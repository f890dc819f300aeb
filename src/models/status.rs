//! Canonical status and location vocabularies.
//!
//! Historical records carry free-text values ("Delivered to Delivery Bay",
//! "Ready for Pick up", "ORDERED"). Each domain maps them onto one canonical
//! enum through a legacy table. Values the table does not know are returned
//! as [`UnrecognizedStatus`] so callers have to decide what to do with them.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, IntoEnumIterator, IntoStaticStr};

/// A non-empty raw value that no legacy table recognizes, kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, thiserror::Error)]
#[error("unrecognized value: {0}")]
pub struct UnrecognizedStatus(pub String);

impl UnrecognizedStatus {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Outcome of normalizing a raw value.
pub type Normalized<T> = Result<T, UnrecognizedStatus>;

/// A closed vocabulary with a default and a legacy-spelling table.
pub trait CanonicalValue:
    Copy + Eq + std::fmt::Debug + IntoEnumIterator + Into<&'static str> + 'static
{
    /// Name of the vocabulary, used in warnings.
    const DOMAIN: &'static str;

    /// Value used when the raw input is missing or blank.
    const DEFAULT: Self;

    /// Normalized key -> canonical value. Contains every canonical value.
    fn legacy_table() -> &'static HashMap<&'static str, Self>;

    fn label(&self) -> &'static str;

    fn as_str(self) -> &'static str {
        self.into()
    }
}

/// Lower-cases, trims and joins whitespace runs with `_`.
pub fn normalize_key(raw: &str) -> String {
    raw.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

pub fn normalize<T: CanonicalValue>(raw: Option<&str>) -> Normalized<T> {
    let raw = match raw {
        Some(value) if !value.trim().is_empty() => value,
        _ => return Ok(T::DEFAULT),
    };

    T::legacy_table()
        .get(normalize_key(raw).as_str())
        .copied()
        .ok_or_else(|| UnrecognizedStatus(raw.to_string()))
}

/// Canonical name, or the raw text when unrecognized.
pub fn normalized_str<T: CanonicalValue>(value: &Normalized<T>) -> &str {
    match value {
        Ok(canonical) => canonical.as_str(),
        Err(raw) => raw.as_str(),
    }
}

/// Human label, or the raw text when unrecognized.
pub fn normalized_label<T: CanonicalValue>(value: &Normalized<T>) -> &str {
    match value {
        Ok(canonical) => canonical.label(),
        Err(raw) => raw.as_str(),
    }
}

fn build_table<T: CanonicalValue>(legacy: &[(&'static str, T)]) -> HashMap<&'static str, T> {
    let mut table: HashMap<&'static str, T> = T::iter().map(|v| (v.as_str(), v)).collect();
    for (key, value) in legacy {
        table.entry(*key).or_insert(*value);
    }
    table
}

// ---------------------------------------------------------------------------
// Part status
// ---------------------------------------------------------------------------

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
    IntoStaticStr,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PartStatus {
    Pending,
    OnOrder,
    InTransit,
    InLoadingBay,
    InStorage,
    InVehicle,
    Installed,
    Cancelled,
}

/// Statuses meaning the part is physically available.
pub const READY_PART_STATUSES: &[PartStatus] = &[
    PartStatus::InStorage,
    PartStatus::InLoadingBay,
    PartStatus::InVehicle,
    PartStatus::Installed,
];

/// Statuses meaning the part is committed with a supplier but not yet here.
pub const ORDERED_PART_STATUSES: &[PartStatus] = &[PartStatus::OnOrder, PartStatus::InTransit];

impl PartStatus {
    pub fn is_ready(self) -> bool {
        READY_PART_STATUSES.contains(&self)
    }

    pub fn is_ordered(self) -> bool {
        ORDERED_PART_STATUSES.contains(&self)
    }
}

static PART_STATUS_TABLE: Lazy<HashMap<&'static str, PartStatus>> = Lazy::new(|| {
    use PartStatus::*;
    build_table(&[
        ("required", Pending),
        ("needed", Pending),
        ("not_ordered", Pending),
        ("to_order", Pending),
        ("awaiting_order", Pending),
        ("ordered", OnOrder),
        ("order_placed", OnOrder),
        ("back_ordered", OnOrder),
        ("backordered", OnOrder),
        ("shipped", InTransit),
        ("dispatched", InTransit),
        ("in-transit", InTransit),
        ("delivered", InLoadingBay),
        ("arrived", InLoadingBay),
        ("delivered_to_delivery_bay", InLoadingBay),
        ("in_delivery_bay", InLoadingBay),
        ("delivery_bay", InLoadingBay),
        ("loading_bay", InLoadingBay),
        ("at_loading_bay", InLoadingBay),
        ("ready_for_pick_up", InLoadingBay),
        ("ready_for_pickup", InLoadingBay),
        ("received", InStorage),
        ("stored", InStorage),
        ("storage", InStorage),
        ("in_stock", InStorage),
        ("warehouse", InStorage),
        ("in_warehouse", InStorage),
        ("loaded", InVehicle),
        ("vehicle", InVehicle),
        ("on_vehicle", InVehicle),
        ("in_van", InVehicle),
        ("with_technician", InVehicle),
        ("used", Installed),
        ("fitted", Installed),
        ("canceled", Cancelled),
        ("void", Cancelled),
    ])
});

impl CanonicalValue for PartStatus {
    const DOMAIN: &'static str = "part_status";
    const DEFAULT: Self = PartStatus::Pending;

    fn legacy_table() -> &'static HashMap<&'static str, Self> {
        &PART_STATUS_TABLE
    }

    fn label(&self) -> &'static str {
        match self {
            PartStatus::Pending => "Pending",
            PartStatus::OnOrder => "On Order",
            PartStatus::InTransit => "In Transit",
            PartStatus::InLoadingBay => "In Loading Bay",
            PartStatus::InStorage => "In Storage",
            PartStatus::InVehicle => "In Vehicle",
            PartStatus::Installed => "Installed",
            PartStatus::Cancelled => "Cancelled",
        }
    }
}

// ---------------------------------------------------------------------------
// Part location
// ---------------------------------------------------------------------------

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
    IntoStaticStr,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PartLocation {
    Supplier,
    InTransit,
    LoadingBay,
    Storage,
    Vehicle,
    ClientSite,
}

static PART_LOCATION_TABLE: Lazy<HashMap<&'static str, PartLocation>> = Lazy::new(|| {
    use PartLocation::*;
    build_table(&[
        ("with_supplier", Supplier),
        ("at_supplier", Supplier),
        ("on_order", Supplier),
        ("shipped", InTransit),
        ("in-transit", InTransit),
        ("delivery_bay", LoadingBay),
        ("in_delivery_bay", LoadingBay),
        ("delivered_to_delivery_bay", LoadingBay),
        ("in_loading_bay", LoadingBay),
        ("warehouse", Storage),
        ("in_storage", Storage),
        ("warehouse_storage", Storage),
        ("in_vehicle", Vehicle),
        ("van", Vehicle),
        ("with_technician", Vehicle),
        ("on_site", ClientSite),
        ("client", ClientSite),
        ("at_client", ClientSite),
        ("installed", ClientSite),
    ])
});

impl CanonicalValue for PartLocation {
    const DOMAIN: &'static str = "part_location";
    const DEFAULT: Self = PartLocation::Supplier;

    fn legacy_table() -> &'static HashMap<&'static str, Self> {
        &PART_LOCATION_TABLE
    }

    fn label(&self) -> &'static str {
        match self {
            PartLocation::Supplier => "With Supplier",
            PartLocation::InTransit => "In Transit",
            PartLocation::LoadingBay => "Loading Bay",
            PartLocation::Storage => "Storage",
            PartLocation::Vehicle => "Vehicle",
            PartLocation::ClientSite => "Client Site",
        }
    }
}

// ---------------------------------------------------------------------------
// Purchase order status
// ---------------------------------------------------------------------------

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
    IntoStaticStr,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PurchaseOrderStatus {
    Draft,
    Sent,
    OnOrder,
    InTransit,
    Delivered,
    Received,
    InLoadingBay,
    InStorage,
    InVehicle,
    Installed,
    Completed,
    Closed,
    Cancelled,
}

/// A PO in one of these is no longer open.
pub const CLOSED_PO_STATUSES: &[PurchaseOrderStatus] = &[
    PurchaseOrderStatus::Received,
    PurchaseOrderStatus::Completed,
    PurchaseOrderStatus::Closed,
    PurchaseOrderStatus::Cancelled,
];

/// A PO in one of these has its goods on hand and cannot be overdue.
pub const RECEIVED_PO_STATUSES: &[PurchaseOrderStatus] = &[
    PurchaseOrderStatus::Delivered,
    PurchaseOrderStatus::Received,
    PurchaseOrderStatus::InLoadingBay,
    PurchaseOrderStatus::InStorage,
    PurchaseOrderStatus::InVehicle,
    PurchaseOrderStatus::Installed,
    PurchaseOrderStatus::Completed,
];

/// Statuses shown in the incoming purchase orders list.
pub const INCOMING_PO_STATUSES: &[PurchaseOrderStatus] = &[
    PurchaseOrderStatus::Sent,
    PurchaseOrderStatus::OnOrder,
    PurchaseOrderStatus::InTransit,
];

impl PurchaseOrderStatus {
    pub fn is_closed(self) -> bool {
        CLOSED_PO_STATUSES.contains(&self)
    }

    pub fn is_received(self) -> bool {
        RECEIVED_PO_STATUSES.contains(&self)
    }

    pub fn is_incoming(self) -> bool {
        INCOMING_PO_STATUSES.contains(&self)
    }
}

static PO_STATUS_TABLE: Lazy<HashMap<&'static str, PurchaseOrderStatus>> = Lazy::new(|| {
    use PurchaseOrderStatus::*;
    build_table(&[
        ("pending", Draft),
        ("new", Draft),
        ("not_sent", Draft),
        ("submitted", Sent),
        ("emailed", Sent),
        ("sent_to_supplier", Sent),
        ("awaiting_confirmation", Sent),
        ("ordered", OnOrder),
        ("confirmed", OnOrder),
        ("acknowledged", OnOrder),
        ("back_ordered", OnOrder),
        ("shipped", InTransit),
        ("dispatched", InTransit),
        ("in-transit", InTransit),
        ("arrived", Delivered),
        ("partially_received", Delivered),
        ("delivered_to_delivery_bay", InLoadingBay),
        ("in_delivery_bay", InLoadingBay),
        ("loading_bay", InLoadingBay),
        ("ready_for_pick_up", InLoadingBay),
        ("ready_for_pickup", InLoadingBay),
        ("stored", InStorage),
        ("in_warehouse", InStorage),
        ("loaded", InVehicle),
        ("on_vehicle", InVehicle),
        ("complete", Completed),
        ("done", Completed),
        ("fulfilled", Completed),
        ("archived", Closed),
        ("canceled", Cancelled),
        ("void", Cancelled),
    ])
});

impl CanonicalValue for PurchaseOrderStatus {
    const DOMAIN: &'static str = "purchase_order_status";
    const DEFAULT: Self = PurchaseOrderStatus::Draft;

    fn legacy_table() -> &'static HashMap<&'static str, Self> {
        &PO_STATUS_TABLE
    }

    fn label(&self) -> &'static str {
        match self {
            PurchaseOrderStatus::Draft => "Draft",
            PurchaseOrderStatus::Sent => "Sent",
            PurchaseOrderStatus::OnOrder => "On Order",
            PurchaseOrderStatus::InTransit => "In Transit",
            PurchaseOrderStatus::Delivered => "Delivered",
            PurchaseOrderStatus::Received => "Received",
            PurchaseOrderStatus::InLoadingBay => "In Loading Bay",
            PurchaseOrderStatus::InStorage => "In Storage",
            PurchaseOrderStatus::InVehicle => "In Vehicle",
            PurchaseOrderStatus::Installed => "Installed",
            PurchaseOrderStatus::Completed => "Completed",
            PurchaseOrderStatus::Closed => "Closed",
            PurchaseOrderStatus::Cancelled => "Cancelled",
        }
    }
}

// ---------------------------------------------------------------------------
// Source type
// ---------------------------------------------------------------------------

/// How a part reaches the job.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
    IntoStaticStr,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SourceType {
    SupplierDelivery,
    SupplierPickup,
    Stock,
    ClientSupplied,
}

static SOURCE_TYPE_TABLE: Lazy<HashMap<&'static str, SourceType>> = Lazy::new(|| {
    use SourceType::*;
    build_table(&[
        ("delivery", SupplierDelivery),
        ("delivered", SupplierDelivery),
        ("supplier_delivered", SupplierDelivery),
        ("pickup", SupplierPickup),
        ("pick_up", SupplierPickup),
        ("collect", SupplierPickup),
        ("supplier_pick_up", SupplierPickup),
        ("ready_for_pick_up", SupplierPickup),
        ("from_stock", Stock),
        ("ex_stock", Stock),
        ("inventory", Stock),
        ("warehouse", Stock),
        ("customer_supplied", ClientSupplied),
        ("supplied_by_client", ClientSupplied),
    ])
});

impl CanonicalValue for SourceType {
    const DOMAIN: &'static str = "source_type";
    const DEFAULT: Self = SourceType::SupplierDelivery;

    fn legacy_table() -> &'static HashMap<&'static str, Self> {
        &SOURCE_TYPE_TABLE
    }

    fn label(&self) -> &'static str {
        match self {
            SourceType::SupplierDelivery => "Supplier Delivery",
            SourceType::SupplierPickup => "Supplier Pickup",
            SourceType::Stock => "From Stock",
            SourceType::ClientSupplied => "Client Supplied",
        }
    }
}

pub fn normalize_part_status(raw: Option<&str>) -> Normalized<PartStatus> {
    normalize(raw)
}

pub fn normalize_part_location(raw: Option<&str>) -> Normalized<PartLocation> {
    normalize(raw)
}

pub fn normalize_po_status(raw: Option<&str>) -> Normalized<PurchaseOrderStatus> {
    normalize(raw)
}

pub fn normalize_source_type(raw: Option<&str>) -> Normalized<SourceType> {
    normalize(raw)
}

/// Serializes a [`Normalized`] value as its canonical or raw text and reads
/// one back through the normalizer.
pub mod serde_normalized {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::{normalize, normalized_str, CanonicalValue, Normalized};

    pub fn serialize<T, S>(value: &Normalized<T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: CanonicalValue,
        S: Serializer,
    {
        serializer.serialize_str(normalized_str(value))
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Normalized<T>, D::Error>
    where
        T: CanonicalValue,
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(normalize(raw.as_deref()))
    }
}
