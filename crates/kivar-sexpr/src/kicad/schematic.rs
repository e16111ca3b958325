//! KiCad schematic (`.kicad_sch`) helpers.

use crate::Sexpr;

use super::props::child_node;

/// Return root items for a KiCad schematic `(kicad_sch ...)`.
pub fn kicad_sch_items(root: &Sexpr) -> Option<&[Sexpr]> {
    (root.tag() == Some("kicad_sch")).then(|| root.as_list()).flatten()
}

/// A placed symbol is a `(symbol (lib_id "...") ...)` instance on the sheet.
///
/// Library definitions under `(lib_symbols ...)` use `(symbol "Name" ...)` and
/// carry no `lib_id`.
pub fn is_placed_symbol(node: &Sexpr) -> bool {
    node.tag() == Some("symbol")
        && node
            .as_list()
            .is_some_and(|items| child_node(items, "lib_id").is_some())
}

/// Placed symbols among the root items of a schematic, in document order.
pub fn placed_symbols(root_items: &[Sexpr]) -> impl Iterator<Item = &Sexpr> {
    root_items.iter().filter(|node| is_placed_symbol(node))
}

/// Direct `(property ...)` children of a placed symbol with their index in
/// `symbol_items`, in document order.
pub fn property_nodes(symbol_items: &[Sexpr]) -> impl Iterator<Item = (usize, &Sexpr)> {
    symbol_items
        .iter()
        .enumerate()
        .skip(1)
        .filter(|(_, node)| node.tag() == Some("property"))
}
