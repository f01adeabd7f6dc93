//! The product entity as returned by the remote store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single product row.
///
/// Products are created through the widget and never mutated by it; `id` and
/// `created_at` are assigned server-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    /// Creation timestamp, the sole sort key (newest first).
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Creation date formatted for display (dd/mm/yyyy).
    pub fn created_date(&self) -> String {
        self.created_at.format("%d/%m/%Y").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_creation_date_for_display() {
        let product = Product {
            id: 1,
            name: "Cadeira".to_string(),
            created_at: "2024-01-02T10:30:00Z".parse().unwrap(),
        };
        assert_eq!(product.created_date(), "02/01/2024");
    }

    #[test]
    fn decodes_store_row() {
        let row = r#"{"id": 7, "name": "Cadeira", "created_at": "2024-01-02T10:30:00Z"}"#;
        let product: Product = serde_json::from_str(row).unwrap();
        assert_eq!(product.id, 7);
        assert_eq!(product.name, "Cadeira");
        assert_eq!(product.created_at.to_rfc3339(), "2024-01-02T10:30:00+00:00");
    }

    #[test]
    fn decodes_timezone_offsets() {
        let row = r#"{"id": 1, "name": "Mesa", "created_at": "2024-06-01T09:00:00-03:00"}"#;
        let product: Product = serde_json::from_str(row).unwrap();
        assert_eq!(product.created_at.to_rfc3339(), "2024-06-01T12:00:00+00:00");
    }
}
