use crate::core::catalog::Catalog;
use crate::domain::model::Coupon;
use crate::utils::error::{EcoError, Result};
use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Catalog overrides loaded from TOML.
///
/// ```toml
/// [garments]
/// hoodie = "2kg"
/// kimono = "3kg"
///
/// [[coupons]]
/// title = "Eco Store"
/// price = "$5"
/// link = "${COUPON_LINK}"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub garments: IndexMap<String, String>,
    #[serde(default)]
    pub coupons: Vec<Coupon>,
}

impl CatalogFile {
    /// 從 TOML 檔案載入目錄
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EcoError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析目錄
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| EcoError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${COUPON_LINK})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| EcoError::ConfigError {
            message: format!("Invalid placeholder pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Sections left empty fall back to the built-in catalog.
    pub fn into_catalog(self) -> Result<Catalog> {
        let defaults = Catalog::default();

        let garments = if self.garments.is_empty() {
            defaults
                .garments()
                .map(|(name, weight)| (name.to_string(), weight))
                .collect()
        } else {
            self.garments
        };

        let coupons = if self.coupons.is_empty() {
            defaults.coupons().to_vec()
        } else {
            self.coupons
        };

        for coupon in &coupons {
            crate::utils::validation::validate_url(&format!("coupons.{}.link", coupon.title), &coupon.link)?;
        }

        Catalog::from_parts(garments, coupons)
    }
}
