//! Variant discovery: the first pass over the symbol collection.

use std::cmp::Ordering;

use crate::{Symbol, VariantName, VariantPolicy};

/// Variant names found in a schematic, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariantCatalog {
    entries: Vec<CatalogEntry>,
}

/// One discovered variant and how many symbols assign it a non-empty value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub name: VariantName,
    pub assigned: usize,
}

impl VariantCatalog {
    pub fn names(&self) -> impl Iterator<Item = &VariantName> {
        self.entries.iter().map(|e| &e.name)
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &VariantName) -> bool {
        self.entries.iter().any(|e| &e.name == name)
    }

    /// Names in natural order (`Rev2` before `Rev10`), for presentation.
    pub fn sorted_names(&self) -> Vec<VariantName> {
        let mut names: Vec<VariantName> = self.names().cloned().collect();
        names.sort_by(|a, b| natural_cmp(a.as_str(), b.as_str()));
        names
    }

    fn entry_mut(&mut self, name: VariantName) -> &mut CatalogEntry {
        let idx = match self.entries.iter().position(|e| e.name == name) {
            Some(idx) => idx,
            None => {
                self.entries.push(CatalogEntry { name, assigned: 0 });
                self.entries.len() - 1
            }
        };
        &mut self.entries[idx]
    }
}

fn natural_cmp(a: &str, b: &str) -> Ordering {
    natord::compare(a, b).then_with(|| a.cmp(b))
}

/// Result of the discovery pass.
#[derive(Debug, Clone, Default)]
pub struct Discovery {
    pub catalog: VariantCatalog,
    /// Per symbol (same order as the input): does any variant property carry a value?
    pub active: Vec<bool>,
}

impl Discovery {
    pub fn has_active_assignment(&self, index: usize) -> bool {
        self.active.get(index).copied().unwrap_or(false)
    }
}

/// Scan every symbol once, collecting variant names and active-assignment flags.
pub fn discover(symbols: &[Symbol], policy: &VariantPolicy) -> Discovery {
    let mut discovery = Discovery {
        catalog: VariantCatalog::default(),
        active: Vec::with_capacity(symbols.len()),
    };

    for symbol in symbols {
        let mut active = false;
        for property in &symbol.properties {
            if !policy.is_variant_key(&property.key) {
                continue;
            }
            let assigned = !property.value.is_empty();
            active |= assigned;
            if let Some(name) = policy.variant_name(&property.key) {
                let entry = discovery.catalog.entry_mut(name);
                if assigned {
                    entry.assigned += 1;
                }
            }
        }
        discovery.active.push(active);
    }

    log::debug!(
        "Discovered {} variant(s) across {} symbol(s)",
        discovery.catalog.len(),
        symbols.len()
    );
    discovery
}
