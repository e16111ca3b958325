use thiserror::Error;

/// Per-symbol resolution failure. Never aborts the pass; fails the run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("Can't find \"{token}\" property")]
    MissingReferenceProperty { token: String },

    #[error("Can't find \"{token}\" property")]
    MissingValueProperty { token: String },

    #[error("Variant value not found -> {value}")]
    DonorValueNotFound { value: String },
}
