//! Choosing which variant to resolve.

use thiserror::Error;

use crate::{VariantCatalog, VariantName};

/// Outcome of asking for a variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Chosen(VariantName),
    Cancelled,
}

#[derive(Debug, Error)]
pub enum SelectError {
    #[error("No variants found in schematic")]
    EmptyCatalog,

    #[error("Unknown variant '{name}' (available: {available})")]
    UnknownVariant { name: String, available: String },

    #[error("Variant selection failed: {0}")]
    Prompt(String),
}

/// Source of the variant to resolve. Runs strictly before the resolver.
pub trait VariantSelector {
    fn select(&mut self, catalog: &VariantCatalog) -> Result<Selection, SelectError>;
}

/// Selects a name given up front, e.g. from `--variant`.
#[derive(Debug, Clone)]
pub struct FixedSelector {
    name: VariantName,
}

impl FixedSelector {
    pub fn new(name: VariantName) -> Self {
        Self { name }
    }
}

impl VariantSelector for FixedSelector {
    fn select(&mut self, catalog: &VariantCatalog) -> Result<Selection, SelectError> {
        if catalog.is_empty() {
            return Err(SelectError::EmptyCatalog);
        }
        if !catalog.contains(&self.name) {
            let available = catalog
                .sorted_names()
                .iter()
                .map(VariantName::as_str)
                .collect::<Vec<_>>()
                .join(", ");
            return Err(SelectError::UnknownVariant {
                name: self.name.to_string(),
                available,
            });
        }
        Ok(Selection::Chosen(self.name.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Symbol, VariantPolicy, discover};

    fn catalog() -> VariantCatalog {
        let symbols = vec![Symbol::from_pairs([
            ("Reference", "R1"),
            ("Variant_Rev10", "dnf"),
            ("Variant_Rev2", ""),
        ])];
        discover(&symbols, &VariantPolicy::default()).catalog
    }

    #[test]
    fn fixed_selector_picks_known_name() {
        let mut selector = FixedSelector::new("Rev2".parse().unwrap());
        assert_eq!(
            selector.select(&catalog()).unwrap(),
            Selection::Chosen("Rev2".parse().unwrap())
        );
    }

    #[test]
    fn fixed_selector_rejects_unknown_name() {
        let mut selector = FixedSelector::new("Rev3".parse().unwrap());
        let err = selector.select(&catalog()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unknown variant 'Rev3' (available: Rev2, Rev10)"
        );
    }

    #[test]
    fn fixed_selector_rejects_empty_catalog() {
        let mut selector = FixedSelector::new("Rev2".parse().unwrap());
        let err = selector.select(&VariantCatalog::default()).unwrap_err();
        assert!(matches!(err, SelectError::EmptyCatalog));
    }
}
