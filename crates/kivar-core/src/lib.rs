//! Variant resolution for schematic symbols.
//!
//! A symbol may carry properties keyed `<marker><variant>` (by default
//! `Variant_<name>`). Resolving a variant rewrites every symbol so exactly that
//! variant's choices are materialized:
//!
//! - [`discover`] - Collect the [`VariantCatalog`] and active-assignment flags
//! - [`DonorIndex`] - Map nominal values to the property sets of plain symbols
//! - [`resolve`] - Confirm, unfit or substitute each symbol and return a [`Report`]
//! - [`select`] - Choose a variant from the catalog before resolving

mod catalog;
mod donor;
mod error;
mod model;
mod name;
mod policy;
mod report;
mod resolve;
pub mod select;

pub use catalog::{CatalogEntry, Discovery, VariantCatalog, discover};
pub use donor::DonorIndex;
pub use error::ResolveError;
pub use model::{Property, Symbol, find_property};
pub use name::{InvalidVariantName, VariantName};
pub use policy::{DEFAULT_MARKER, Keyword, ResolveConfig, VariantPolicy};
pub use report::{Action, Outcome, Report};
pub use resolve::{Resolver, resolve, resolve_with, splice_properties};
pub use select::{FixedSelector, SelectError, Selection, VariantSelector};
