//! Resolution parameters: marker prefix, keyword sets and the selected variant.

use serde::Deserialize;

use crate::VariantName;

pub const DEFAULT_MARKER: &str = "Variant_";

pub const DEFAULT_DNF_KEYWORDS: &[&str] = &[
    "dnf",
    "do not fit",
    "nofit",
    "not fitted",
    "dnp",
    "do not place",
    "no stuff",
    "nostuff",
    "noload",
    "do not load",
];

pub const DEFAULT_SHORT_KEYWORDS: &[&str] = &["short", "link"];

/// Policy keyword class of a variant value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    DoNotFit,
    Short,
}

/// How variant data is recognised in symbol properties.
///
/// Every field falls back to its default when absent from a config file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VariantPolicy {
    /// Text marking a property key as variant data, followed by the variant name.
    pub marker: String,
    /// Values meaning "leave this part off the board". Case-insensitive.
    pub dnf: Vec<String>,
    /// Values meaning "replace this part with a short". Case-insensitive.
    pub short: Vec<String>,
    /// Token locating the reference designator property.
    pub reference_token: String,
    /// Token locating the nominal value property.
    pub value_token: String,
}

impl Default for VariantPolicy {
    fn default() -> Self {
        Self {
            marker: DEFAULT_MARKER.to_string(),
            dnf: DEFAULT_DNF_KEYWORDS.iter().map(|s| s.to_string()).collect(),
            short: DEFAULT_SHORT_KEYWORDS.iter().map(|s| s.to_string()).collect(),
            reference_token: "Reference".to_string(),
            value_token: "Value".to_string(),
        }
    }
}

impl VariantPolicy {
    /// Whether a property key carries variant data.
    pub fn is_variant_key(&self, key: &str) -> bool {
        key.contains(&self.marker)
    }

    /// Variant name encoded in `key`: the text after the first marker occurrence.
    ///
    /// Returns `None` for non-variant keys and for a bare marker.
    pub fn variant_name(&self, key: &str) -> Option<VariantName> {
        let (_, name) = key.split_once(&self.marker)?;
        VariantName::new(name).ok()
    }

    /// Classify a variant value against the DNF and SHORT keyword sets.
    ///
    /// DNF is checked first, so a keyword listed in both sets is DNF.
    pub fn classify(&self, value: &str) -> Option<Keyword> {
        let value = value.to_lowercase();
        let matches = |keywords: &[String]| keywords.iter().any(|k| k.to_lowercase() == value);
        if matches(&self.dnf) {
            Some(Keyword::DoNotFit)
        } else if matches(&self.short) {
            Some(Keyword::Short)
        } else {
            None
        }
    }
}

/// Everything one resolution run needs besides the symbols themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveConfig {
    pub policy: VariantPolicy,
    pub variant: VariantName,
}

impl ResolveConfig {
    pub fn new(policy: VariantPolicy, variant: VariantName) -> Self {
        Self { policy, variant }
    }

    /// Key token of the selected variant, e.g. `Variant_Test`.
    pub fn variant_token(&self) -> String {
        format!("{}{}", self.policy.marker, self.variant)
    }
}
