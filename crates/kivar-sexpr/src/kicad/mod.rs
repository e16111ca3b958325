//! KiCad-specific S-expression helpers.
//!
//! - [`props`] - common "property-like" query helpers
//! - [`schematic`] - KiCad schematic (`.kicad_sch`) helpers

pub mod props;
pub mod schematic;

pub use props::{child_node, yes_no_prop};
pub use schematic::{is_placed_symbol, kicad_sch_items, placed_symbols, property_nodes};
