//! FieldOps logistics library
//!
//! Parts readiness and logistics aggregation for field-service jobs:
//! normalizing legacy status text, classifying parts as ready, ordered or
//! missing, tracking open and overdue purchase orders, and building the
//! logistics board views.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

// Core modules
pub mod config;
pub mod dataset;
pub mod errors;
pub mod models;
pub mod services;
pub mod warnings;

pub use dataset::LogisticsDataset;
pub use errors::{ServiceError, ServiceResult};
pub use models::{
    Job, Normalized, Part, PartLocation, PartStatus, PurchaseOrder, PurchaseOrderStatus,
    SourceType, UnrecognizedStatus,
};
pub use services::{PartsReadiness, ReadinessCategory};
pub use warnings::WarningRegistry;
