use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Variant names must contain at least one non-whitespace character.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("variant name must not be blank")]
pub struct InvalidVariantName;

/// Name of a build variant, e.g. `Test` for properties keyed `Variant_Test`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariantName(String);

impl VariantName {
    pub fn new(name: impl Into<String>) -> Result<Self, InvalidVariantName> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(InvalidVariantName);
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for VariantName {
    type Err = InvalidVariantName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for VariantName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VariantName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_names() {
        assert_eq!(VariantName::new(""), Err(InvalidVariantName));
        assert_eq!(" \t".parse::<VariantName>(), Err(InvalidVariantName));
    }

    #[test]
    fn keeps_name_verbatim() {
        let name: VariantName = "Low Cost".parse().unwrap();
        assert_eq!(name.as_str(), "Low Cost");
        assert_eq!(name.to_string(), "Low Cost");
    }
}
