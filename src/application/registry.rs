use super::invoice::InvoiceProcessor;
use super::processor::{
    Collaborators, PaymentProcessor, PaymentProcessorBox, ProcessorBase, ProcessorKey,
    RequestContext,
};
use crate::error::Result;
use crate::settings::ShopSettings;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info_span;

/// The payment processors enabled for this shop, built once at startup.
pub struct ProcessorRegistry {
    order: Vec<ProcessorKey>,
    processors: HashMap<ProcessorKey, PaymentProcessorBox>,
}

impl ProcessorRegistry {
    /// Instantiates every module listed in `settings.payment_modules`, in
    /// order. Unknown keys are rejected; duplicates are ignored.
    pub fn from_settings(settings: ShopSettings, collaborators: Collaborators) -> Result<Self> {
        let settings = Arc::new(settings);
        let mut order = Vec::new();
        let mut processors = HashMap::new();

        for raw in &settings.payment_modules {
            let key: ProcessorKey = raw.parse()?;
            if processors.contains_key(&key) {
                continue;
            }

            let span = info_span!("payment", module = key.as_str());
            let base = ProcessorBase::new(key, collaborators.clone(), settings.clone(), span);
            let processor: PaymentProcessorBox = match key {
                ProcessorKey::Invoice => Box::new(InvoiceProcessor::new(base)),
            };

            order.push(key);
            processors.insert(key, processor);
        }

        Ok(Self { order, processors })
    }

    pub fn get(&self, key: ProcessorKey) -> Option<&dyn PaymentProcessor> {
        self.processors.get(&key).map(|p| p.as_ref())
    }

    /// Processors that may be offered for `request`, in configuration order.
    pub fn available_for(&self, request: &RequestContext) -> Vec<&dyn PaymentProcessor> {
        self.order
            .iter()
            .filter_map(|key| self.get(*key))
            .filter(|p| p.enabled_for_request(request))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.processors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PaymentError;
    use crate::i18n::Locale;
    use crate::infrastructure::in_memory::{
        InMemoryOrderStore, InMemoryStockLedger, RecordingEventSink,
    };

    fn collaborators() -> Collaborators {
        Collaborators {
            orders: Arc::new(InMemoryOrderStore::new()),
            stock: Arc::new(InMemoryStockLedger::new()),
            events: Arc::new(RecordingEventSink::new()),
        }
    }

    #[test]
    fn test_registry_from_default_settings() {
        let registry =
            ProcessorRegistry::from_settings(ShopSettings::default(), collaborators()).unwrap();

        assert_eq!(registry.len(), 1);
        let invoice = registry.get(ProcessorKey::Invoice).unwrap();
        assert_eq!(invoice.key(), ProcessorKey::Invoice);
        assert_eq!(invoice.name(Locale::Fr), "Facture");
    }

    #[test]
    fn test_registry_rejects_unknown_module() {
        let settings = ShopSettings {
            payment_modules: vec!["invoice".to_string(), "cod".to_string()],
            ..ShopSettings::default()
        };

        let result = ProcessorRegistry::from_settings(settings, collaborators());
        assert!(matches!(result, Err(PaymentError::UnknownProcessor(key)) if key == "cod"));
    }

    #[test]
    fn test_registry_without_modules() {
        let settings = ShopSettings {
            payment_modules: Vec::new(),
            ..ShopSettings::default()
        };

        let registry = ProcessorRegistry::from_settings(settings, collaborators()).unwrap();
        assert!(registry.is_empty());
        assert!(registry.get(ProcessorKey::Invoice).is_none());
        assert!(registry.available_for(&RequestContext::default()).is_empty());
    }

    #[test]
    fn test_duplicate_modules_registered_once() {
        let settings = ShopSettings {
            payment_modules: vec!["invoice".to_string(), "invoice".to_string()],
            ..ShopSettings::default()
        };

        let registry = ProcessorRegistry::from_settings(settings, collaborators()).unwrap();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.available_for(&RequestContext::default()).len(), 1);
    }
}
