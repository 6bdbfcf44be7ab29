//! Storefront configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use storefront_observability::LogConfig;

use crate::browse::DEFAULT_PER_PAGE;
use crate::cart::PricingConfig;
use crate::error::CommerceError;

/// Storefront configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// Where the product catalog comes from.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Tax and shipping settings.
    #[serde(default)]
    pub pricing: PricingConfig,

    /// Category page settings.
    #[serde(default)]
    pub browse: BrowseConfig,

    /// Log output settings.
    #[serde(default)]
    pub logging: LogConfig,
}

impl StorefrontConfig {
    /// Load config from a file. Paths ending in `.json` are read as JSON,
    /// anything else as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))?
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))?
        };

        config
            .validate()
            .with_context(|| format!("Invalid config: {}", path.display()))?;
        Ok(config)
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse TOML config")?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to a file, in the format implied by its extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Reject out-of-range values.
    pub fn validate(&self) -> Result<(), CommerceError> {
        let pricing = &self.pricing;
        if pricing.tax_rate.is_sign_negative() && !pricing.tax_rate.is_zero() {
            return Err(CommerceError::InvalidConfig(format!(
                "pricing.tax_rate must not be negative (got {})",
                pricing.tax_rate
            )));
        }
        if pricing.free_shipping_threshold.is_negative() {
            return Err(CommerceError::InvalidConfig(
                "pricing.free_shipping_threshold must not be negative".to_string(),
            ));
        }
        if pricing.flat_shipping_fee.is_negative() {
            return Err(CommerceError::InvalidConfig(
                "pricing.flat_shipping_fee must not be negative".to_string(),
            ));
        }
        if self.browse.per_page == 0 {
            return Err(CommerceError::InvalidConfig(
                "browse.per_page must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// Catalog source settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Path of the catalog JSON file.
    #[serde(default = "default_catalog_path")]
    pub path: PathBuf,

    /// URL of the catalog. Used instead of `path` when the `http` feature
    /// is enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("public/products.json")
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
            url: None,
        }
    }
}

/// Category page settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowseConfig {
    /// Products per page.
    #[serde(default = "default_per_page")]
    pub per_page: usize,
}

fn default_per_page() -> usize {
    DEFAULT_PER_PAGE
}

impl Default for BrowseConfig {
    fn default() -> Self {
        Self {
            per_page: default_per_page(),
        }
    }
}

/// Generate a default storefront.toml config file.
pub fn generate_default_config() -> String {
    r#"# Storefront configuration

[catalog]
path = "public/products.json"
# url = "https://shop.example.com/products.json"

[pricing]
tax_rate = 0.08
# Shipping is free when the subtotal is above this amount.
free_shipping_threshold = 100
flat_shipping_fee = 15

[browse]
per_page = 12

[logging]
level = "info"
format = "human"
# filter = "storefront_commerce=debug,info"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use rust_decimal::Decimal;
    use std::io::Write;
    use storefront_observability::{LogFormat, LogLevel};

    #[test]
    fn test_default_template_matches_defaults() {
        let config = StorefrontConfig::from_toml_str(&generate_default_config()).unwrap();
        assert_eq!(config, StorefrontConfig::default());
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = StorefrontConfig::from_toml_str("").unwrap();
        assert_eq!(config.catalog.path, PathBuf::from("public/products.json"));
        assert_eq!(config.pricing.tax_rate, Decimal::new(8, 2));
        assert_eq!(config.browse.per_page, 12);
        assert_eq!(config.logging.level, LogLevel::Info);
    }

    #[test]
    fn test_partial_sections() {
        let config = StorefrontConfig::from_toml_str(
            r#"
            [pricing]
            flat_shipping_fee = 9.5

            [logging]
            format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(config.pricing.flat_shipping_fee, Money::from_cents(950));
        assert_eq!(config.pricing.free_shipping_threshold, Money::from_major(100));
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_validation() {
        let err = StorefrontConfig::from_toml_str("[pricing]\ntax_rate = -0.1\n").unwrap_err();
        assert!(err.to_string().contains("tax_rate"));

        let err = StorefrontConfig::from_toml_str("[browse]\nper_page = 0\n").unwrap_err();
        assert!(err.to_string().contains("per_page"));
    }

    #[test]
    fn test_load_json() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(br#"{"catalog": {"url": "https://shop.example.com/products.json"}}"#)
            .unwrap();

        let config = StorefrontConfig::load(file.path()).unwrap();
        assert_eq!(
            config.catalog.url.as_deref(),
            Some("https://shop.example.com/products.json")
        );
        assert_eq!(config.catalog.path, PathBuf::from("public/products.json"));
    }

    #[test]
    fn test_save_and_load_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storefront.toml");

        let mut config = StorefrontConfig::default();
        config.browse.per_page = 24;
        config.save(&path).unwrap();

        assert_eq!(StorefrontConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_missing_file() {
        let err = StorefrontConfig::load("/nonexistent/storefront.toml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
