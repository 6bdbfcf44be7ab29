//! Catalog loading: fetch, decode and validate.

use crate::catalog::{Catalog, CatalogSource, Product};
use crate::error::CatalogError;
use serde_json::Value;

/// Load the catalog from `source`.
///
/// Every failure is fatal; a partially decoded catalog is never returned.
#[tracing::instrument(skip(source), fields(source = %source.describe()), err)]
pub async fn load_catalog(source: &dyn CatalogSource) -> Result<Catalog, CatalogError> {
    let payload = source.fetch().await?;
    if !payload.is_success() {
        return Err(CatalogError::HttpStatus {
            status: payload.status,
        });
    }

    let catalog = parse_catalog(&payload.body)?;
    tracing::info!(products = catalog.len(), "catalog loaded");
    Ok(catalog)
}

/// Decode and validate a catalog body.
pub fn parse_catalog(body: &[u8]) -> Result<Catalog, CatalogError> {
    let value: Value =
        serde_json::from_slice(body).map_err(|e| CatalogError::Malformed(e.to_string()))?;

    let elements = match value {
        Value::Array(elements) => elements,
        other => {
            return Err(CatalogError::NotAnArray {
                found: json_kind(&other),
            })
        }
    };

    let products = elements
        .into_iter()
        .enumerate()
        .map(|(index, element)| {
            serde_json::from_value::<Product>(element).map_err(|e| CatalogError::InvalidProduct {
                index,
                reason: e.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Catalog::new(products)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{FileCatalogSource, StaticCatalogSource};
    use crate::ids::ProductId;
    use crate::money::Money;
    use std::io::Write;

    const PRODUCTS: &str = r#"[
        {"id": 1, "name": "Phone", "price": 699.99, "category": "Electronics", "subCategory": "Smartphone"},
        {"id": 2, "name": "Jeans", "price": 49.5, "category": "Clothes", "brand": "Levi's"}
    ]"#;

    #[test]
    fn test_parse_catalog() {
        let catalog = parse_catalog(PRODUCTS.as_bytes()).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(
            catalog.get(&ProductId::new("2")).unwrap().price,
            Money::from_cents(4950)
        );
    }

    #[test]
    fn test_empty_array_is_an_empty_catalog() {
        assert!(parse_catalog(b"[]").unwrap().is_empty());
    }

    #[test]
    fn test_malformed_json() {
        let err = parse_catalog(b"[{\"id\": 1,").unwrap_err();
        assert!(matches!(err, CatalogError::Malformed(_)));
    }

    #[test]
    fn test_not_an_array() {
        let err = parse_catalog(br#"{"products": []}"#).unwrap_err();
        assert_eq!(err, CatalogError::NotAnArray { found: "object" });
        assert!(err.to_string().starts_with("Invalid product format"));
    }

    #[test]
    fn test_invalid_element_is_fatal() {
        let err = parse_catalog(br#"[{"id": 1, "name": "ok", "price": 1}, {"id": 2}]"#)
            .unwrap_err();
        assert!(matches!(err, CatalogError::InvalidProduct { index: 1, .. }));
    }

    #[test]
    fn test_duplicate_ids_are_fatal() {
        let err = parse_catalog(
            br#"[{"id": 1, "name": "a", "price": 1}, {"id": "1", "name": "b", "price": 2}]"#,
        )
        .unwrap_err();
        assert_eq!(err, CatalogError::DuplicateProductId("1".to_string()));
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(PRODUCTS.as_bytes()).unwrap();

        let catalog = load_catalog(&FileCatalogSource::new(file.path()))
            .await
            .unwrap();
        assert_eq!(catalog.categories(), vec!["Electronics", "Clothes"]);
    }

    #[tokio::test]
    async fn test_non_success_status() {
        let source = StaticCatalogSource::with_status(404, "Not Found");
        let err = load_catalog(&source).await.unwrap_err();
        assert_eq!(err, CatalogError::HttpStatus { status: 404 });
    }

    #[tokio::test]
    async fn test_static_source() {
        let catalog = load_catalog(&StaticCatalogSource::new(PRODUCTS))
            .await
            .unwrap();
        assert_eq!(catalog.len(), 2);
    }
}
