//! Per-symbol outcomes of a resolution run and the aggregate verdict.

use std::fmt;

use crate::{ResolveError, VariantName};

/// What the resolver did to one symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// The symbol has no property for the selected variant.
    NotApplicable,
    /// The variant property exists but is empty.
    NoOverride,
    /// The variant value equals the current value; the part is fitted.
    Fitted { value: String },
    /// A DNF keyword; the part is left off and dropped from the BOM.
    DoNotFit { keyword: String },
    /// A SHORT keyword; currently handled exactly like DNF.
    Shorted { keyword: String },
    /// Properties were replaced by those of the donor for `to`.
    Substituted { from: String, to: String },
}

impl Action {
    /// Whether the symbol was left untouched.
    pub fn is_skip(&self) -> bool {
        matches!(self, Action::NotApplicable | Action::NoOverride)
    }
}

/// Result for one symbol, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Position in the input collection.
    pub index: usize,
    /// Reference designator, when the symbol has one.
    pub reference: Option<String>,
    pub result: Result<Action, ResolveError>,
}

impl Outcome {
    pub fn is_error(&self) -> bool {
        self.result.is_err()
    }

    pub fn is_skip(&self) -> bool {
        matches!(&self.result, Ok(action) if action.is_skip())
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reference {
            Some(reference) => write!(f, "{reference} : ")?,
            None => write!(f, "Symbol #{} : ", self.index + 1)?,
        }
        match &self.result {
            Ok(Action::NotApplicable) => write!(f, "Not part of variant"),
            Ok(Action::NoOverride) => write!(f, "No variant value"),
            Ok(Action::Fitted { value }) => write!(f, "Fitted as {value}"),
            Ok(Action::DoNotFit { .. }) => write!(f, "Marked as DNF"),
            Ok(Action::Shorted { .. }) => write!(f, "Marked as Short"),
            Ok(Action::Substituted { from, to }) => write!(f, "Replace {from} with {to}"),
            Err(e) => write!(f, "{e}"),
        }
    }
}

/// Aggregated outcomes of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub variant: VariantName,
    pub outcomes: Vec<Outcome>,
}

impl Report {
    pub fn new(variant: VariantName) -> Self {
        Self {
            variant,
            outcomes: Vec::new(),
        }
    }

    pub fn push(&mut self, outcome: Outcome) {
        if let Err(e) = &outcome.result {
            log::warn!("{outcome}");
            log::debug!("Symbol #{} failed: {e:?}", outcome.index);
        } else {
            log::debug!("{outcome}");
        }
        self.outcomes.push(outcome);
    }

    /// True when no symbol produced an error. Callers must not persist otherwise.
    pub fn success(&self) -> bool {
        !self.outcomes.iter().any(Outcome::is_error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Outcome> {
        self.outcomes.iter().filter(|o| o.is_error())
    }

    /// Outcomes that did something or failed.
    pub fn notable(&self) -> impl Iterator<Item = &Outcome> {
        self.outcomes.iter().filter(|o| !o.is_skip())
    }

    /// Outcomes where the variant was applied to the symbol.
    pub fn changed(&self) -> impl Iterator<Item = &Outcome> {
        self.outcomes
            .iter()
            .filter(|o| matches!(&o.result, Ok(action) if !action.is_skip()))
    }

    /// Number of symbols the variant was applied to.
    pub fn applied(&self) -> usize {
        self.changed().count()
    }

    /// One human-readable line per symbol visited.
    pub fn messages(&self) -> Vec<String> {
        self.outcomes.iter().map(ToString::to_string).collect()
    }
}
