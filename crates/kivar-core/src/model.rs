//! Property record model shared by the resolver and document readers.

/// A key/value pair attached to a symbol.
///
/// Keys are not unique within a symbol. `extra` is format-specific payload
/// (for KiCad, the raw position/effects text of the property node) and is
/// carried through substitution untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Property {
    pub key: String,
    pub value: String,
    pub extra: Option<String>,
}

impl Property {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            extra: None,
        }
    }

    pub fn with_extra(mut self, extra: impl Into<String>) -> Self {
        self.extra = Some(extra.into());
        self
    }
}

/// One schematic component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub properties: Vec<Property>,
    pub dnp: bool,
    pub in_bom: bool,
}

impl Default for Symbol {
    fn default() -> Self {
        Self {
            properties: Vec::new(),
            dnp: false,
            in_bom: true,
        }
    }
}

impl Symbol {
    pub fn new(properties: Vec<Property>) -> Self {
        Self {
            properties,
            ..Default::default()
        }
    }

    /// Build a symbol from `(key, value)` pairs, fitted and in the BOM.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self::new(
            pairs
                .into_iter()
                .map(|(key, value)| Property::new(key, value))
                .collect(),
        )
    }

    /// First property whose key contains `token`.
    pub fn find_property(&self, token: &str) -> Option<&Property> {
        find_property(&self.properties, token)
    }

    /// Mark as fitted: placed and listed in the BOM.
    pub fn fit(&mut self) {
        self.dnp = false;
        self.in_bom = true;
    }

    /// Mark as not fitted: not placed and excluded from the BOM.
    pub fn unfit(&mut self) {
        self.dnp = true;
        self.in_bom = false;
    }
}

/// First-match containment lookup: the first property whose key contains `token`.
///
/// `ValueTolerance` listed before `Value` wins a lookup for `Value`; callers rely
/// on this ordering rule rather than exact key matches.
pub fn find_property<'a>(properties: &'a [Property], token: &str) -> Option<&'a Property> {
    properties.iter().find(|p| p.key.contains(token))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_first_match_containment() {
        let symbol = Symbol::from_pairs([
            ("Reference", "R1"),
            ("ValueTolerance", "1%"),
            ("Value", "10k"),
        ]);
        assert_eq!(symbol.find_property("Value").unwrap().value, "1%");
        assert_eq!(symbol.find_property("Ref").unwrap().value, "R1");
        assert!(symbol.find_property("Footprint").is_none());
    }

    #[test]
    fn duplicate_keys_resolve_to_first() {
        let symbol = Symbol::from_pairs([("Value", "a"), ("Value", "b")]);
        assert_eq!(symbol.find_property("Value").unwrap().value, "a");
    }

    #[test]
    fn flags_toggle_together() {
        let mut symbol = Symbol::default();
        assert!(!symbol.dnp && symbol.in_bom);
        symbol.unfit();
        assert!(symbol.dnp && !symbol.in_bom);
        symbol.fit();
        assert!(!symbol.dnp && symbol.in_bom);
    }
}
