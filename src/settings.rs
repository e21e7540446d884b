use crate::error::Result;
use crate::i18n::Locale;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Shop-wide settings consumed by the payment processors.
///
/// Every field has a default, so an empty JSON object is a valid settings file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ShopSettings {
    /// Record stock transactions when orders are paid.
    pub stock_tracking: bool,
    /// Keys of the payment modules offered by the shop.
    pub payment_modules: Vec<String>,
    /// Display name overrides, keyed by payment module key.
    pub payment_module_names: HashMap<String, String>,
    pub default_locale: Locale,
}

impl Default for ShopSettings {
    fn default() -> Self {
        Self {
            stock_tracking: true,
            payment_modules: vec!["invoice".to_string()],
            payment_module_names: HashMap::new(),
            default_locale: Locale::default(),
        }
    }
}

impl ShopSettings {
    /// Loads settings from a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let settings = serde_json::from_reader(BufReader::new(file))?;
        Ok(settings)
    }
}
