//! Loading the collections the services work on from exported JSON.

use std::fs;
use std::path::Path;

use serde::Serialize;
use serde_json::Value;
use tracing::{info, instrument};

use crate::errors::{ServiceError, ServiceResult};
use crate::models::{Job, Part, PurchaseOrder};
use crate::warnings::WarningRegistry;

/// Parts, purchase orders and jobs for one project or board.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LogisticsDataset {
    pub parts: Vec<Part>,
    pub purchase_orders: Vec<PurchaseOrder>,
    pub jobs: Vec<Job>,
}

impl LogisticsDataset {
    /// Reads the `parts`, `purchase_orders` and `jobs` keys of a document.
    /// Missing or non-array keys give empty collections.
    pub fn from_json(document: &Value, warnings: &WarningRegistry) -> ServiceResult<Self> {
        if !document.is_object() {
            return Err(ServiceError::InvalidInput(
                "dataset document must be a JSON object".to_string(),
            ));
        }

        let empty = Value::Null;
        let collection = |key: &str| document.get(key).unwrap_or(&empty);

        Ok(Self {
            parts: Part::from_records(collection("parts"), warnings),
            purchase_orders: PurchaseOrder::from_records(collection("purchase_orders"), warnings),
            jobs: Job::from_records(collection("jobs")),
        })
    }

    pub fn from_json_str(raw: &str, warnings: &WarningRegistry) -> ServiceResult<Self> {
        let document: Value = serde_json::from_str(raw)?;
        Self::from_json(&document, warnings)
    }

    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>, warnings: &WarningRegistry) -> ServiceResult<Self> {
        let raw = fs::read_to_string(path.as_ref())?;
        let dataset = Self::from_json_str(&raw, warnings)?;
        info!(
            parts = dataset.parts.len(),
            purchase_orders = dataset.purchase_orders.len(),
            jobs = dataset.jobs.len(),
            "loaded dataset"
        );
        Ok(dataset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn reads_all_collections() {
        let warnings = WarningRegistry::disabled();
        let dataset = LogisticsDataset::from_json(
            &json!({
                "parts": [{ "id": "p1", "status": "in_storage" }],
                "purchase_orders": [{ "id": "po1", "status": "sent" }],
                "jobs": [{ "id": "j1", "job_type_name": "Logistics" }],
            }),
            &warnings,
        )
        .unwrap();

        assert_eq!(dataset.parts.len(), 1);
        assert_eq!(dataset.purchase_orders.len(), 1);
        assert_eq!(dataset.jobs.len(), 1);
    }

    #[test]
    fn tolerates_missing_and_malformed_collections() {
        let warnings = WarningRegistry::disabled();
        let dataset = LogisticsDataset::from_json(
            &json!({ "parts": null, "purchase_orders": "nope" }),
            &warnings,
        )
        .unwrap();
        assert_eq!(dataset, LogisticsDataset::default());
    }

    #[test]
    fn rejects_non_object_documents() {
        let warnings = WarningRegistry::disabled();
        let result = LogisticsDataset::from_json(&json!([1, 2]), &warnings);
        assert!(matches!(result, Err(ServiceError::InvalidInput(_))));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "parts": [{{ "quantity": 3 }}] }}"#).unwrap();

        let dataset = LogisticsDataset::load(file.path(), &WarningRegistry::disabled()).unwrap();
        assert_eq!(dataset.parts.len(), 1);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = LogisticsDataset::load("/nonexistent/dataset.json", &WarningRegistry::disabled());
        assert!(matches!(result, Err(ServiceError::IoError(_))));
    }
}
