//! Message catalog for the handful of user-facing strings the payment flow
//! stores or displays.
//!
//! Lookups are explicit: callers pass both the message key and the locale they
//! want the text in, usually the locale of the current request.

use crate::error::{PaymentError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    De,
    Fr,
}

impl Locale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::De => "de",
            Locale::Fr => "fr",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = PaymentError;

    /// Accepts bare language codes as well as region-qualified tags
    /// (`de-CH`, `fr_FR`), which fall back to their language.
    fn from_str(s: &str) -> Result<Self> {
        let language = s
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match language.as_str() {
            "en" => Ok(Locale::En),
            "de" => Ok(Locale::De),
            "fr" => Ok(Locale::Fr),
            _ => Err(PaymentError::ValidationError(format!(
                "Unsupported locale: {s}"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    /// Display name of the invoice payment module.
    Invoice,
    /// Notes attached to stock transactions created by a sale.
    Sale,
    /// Status history note for completed orders.
    OrderCompleted,
}

pub fn translate(key: MessageKey, locale: Locale) -> &'static str {
    match (key, locale) {
        (MessageKey::Invoice, Locale::En) => "Invoice",
        (MessageKey::Invoice, Locale::De) => "Rechnung",
        (MessageKey::Invoice, Locale::Fr) => "Facture",
        (MessageKey::Sale, Locale::En) => "sale",
        (MessageKey::Sale, Locale::De) => "Verkauf",
        (MessageKey::Sale, Locale::Fr) => "vente",
        (MessageKey::OrderCompleted, Locale::En) => "Order has been completed",
        (MessageKey::OrderCompleted, Locale::De) => "Bestellung wurde abgeschlossen",
        (MessageKey::OrderCompleted, Locale::Fr) => "La commande a été finalisée",
    }
}
