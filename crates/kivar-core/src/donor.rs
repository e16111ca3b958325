//! Donor index: nominal value -> property set of a symbol with no active variant.

use std::collections::HashMap;

use crate::catalog::Discovery;
use crate::model::find_property;
use crate::{Property, Symbol, VariantPolicy};

/// Lookup from a nominal value (e.g. `1k2`) to a full donor property sequence.
#[derive(Debug, Clone, Default)]
pub struct DonorIndex {
    donors: HashMap<String, Vec<Property>>,
}

impl DonorIndex {
    /// Register every symbol without an active variant assignment under its value.
    ///
    /// A symbol lacking a value property is registered under the empty string.
    /// When two donors share a value, the later one replaces the earlier.
    pub fn build(symbols: &[Symbol], discovery: &Discovery, policy: &VariantPolicy) -> Self {
        let mut donors = HashMap::new();
        for (index, symbol) in symbols.iter().enumerate() {
            if discovery.has_active_assignment(index) {
                continue;
            }
            let value = find_property(&symbol.properties, &policy.value_token)
                .map(|p| p.value.clone())
                .unwrap_or_default();
            if donors
                .insert(value.clone(), symbol.properties.clone())
                .is_some()
            {
                log::debug!("Donor for value {value:?} replaced by symbol #{index}");
            }
        }
        log::debug!("Indexed {} donor value(s)", donors.len());
        Self { donors }
    }

    pub fn get(&self, value: &str) -> Option<&[Property]> {
        self.donors.get(value).map(Vec::as_slice)
    }

    pub fn contains(&self, value: &str) -> bool {
        self.donors.contains_key(value)
    }

    pub fn len(&self) -> usize {
        self.donors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.donors.is_empty()
    }
}
