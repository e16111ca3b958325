//! Where a placed symbol's properties and flags sit in the source text.

use kivar_core::{Property, Symbol};
use kivar_sexpr::kicad::{property_nodes, yes_no_prop};
use kivar_sexpr::{Sexpr, SexprKind, Span};

use crate::SchematicError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flag {
    Dnp,
    InBom,
}

impl Flag {
    pub(crate) fn tag(self) -> &'static str {
        match self {
            Flag::Dnp => "dnp",
            Flag::InBom => "in_bom",
        }
    }

    /// Value assumed when the node is missing from the symbol.
    fn absent_value(self) -> bool {
        matches!(self, Flag::InBom)
    }

    /// Siblings a missing node is inserted after, most preferred first.
    fn anchors(self) -> &'static [&'static str] {
        match self {
            Flag::Dnp => &["on_board", "in_bom", "unit", "at", "lib_id"],
            Flag::InBom => &["exclude_from_sim", "unit", "at", "lib_id"],
        }
    }
}

/// A `(dnp ...)` or `(in_bom ...)` child of a symbol.
#[derive(Debug, Clone)]
pub(crate) struct FlagNode {
    /// Index into the symbol's children.
    pub index: usize,
    pub node: Span,
    /// The `yes`/`no` atom; `None` for a bare `(dnp)`.
    pub value: Option<Span>,
}

/// Child spans of one placed `(symbol ...)` list.
#[derive(Debug, Clone)]
pub(crate) struct SymbolLayout {
    /// Spans of every list item, the leading `symbol` atom included.
    pub children: Vec<Span>,
    pub tags: Vec<Option<String>>,
    /// Indices into `children` of the `(property ...)` nodes.
    pub properties: Vec<usize>,
    pub dnp: Option<FlagNode>,
    pub in_bom: Option<FlagNode>,
}

impl SymbolLayout {
    pub(crate) fn flag(&self, flag: Flag) -> Option<&FlagNode> {
        match flag {
            Flag::Dnp => self.dnp.as_ref(),
            Flag::InBom => self.in_bom.as_ref(),
        }
    }

    /// Whether child `index` sits between the first and last property node.
    pub(crate) fn in_property_run(&self, index: usize) -> bool {
        match (self.properties.first(), self.properties.last()) {
            (Some(&first), Some(&last)) => first < index && index < last,
            _ => false,
        }
    }

    /// Child index a missing `flag` node goes after. Never inside the property run.
    pub(crate) fn anchor(&self, flag: Flag) -> usize {
        let limit = self.properties.first().copied().unwrap_or(self.children.len());
        flag.anchors()
            .iter()
            .find_map(|tag| (1..limit).find(|&i| self.tags[i].as_deref() == Some(*tag)))
            .unwrap_or(0)
    }

    /// Whitespace between child `index` and its predecessor.
    pub(crate) fn separator_before<'s>(&self, index: usize, source: &'s str) -> &'s str {
        if index == 0 {
            return " ";
        }
        whitespace_or_space(&source[self.children[index - 1].end..self.children[index].start])
    }

    /// Whitespace between child `index` and its successor, or before it when it is last.
    pub(crate) fn separator_after<'s>(&self, index: usize, source: &'s str) -> &'s str {
        match self.children.get(index + 1) {
            Some(next) => whitespace_or_space(&source[self.children[index].end..next.start]),
            None => self.separator_before(index, source),
        }
    }
}

fn whitespace_or_space(gap: &str) -> &str {
    if !gap.is_empty() && gap.chars().all(char::is_whitespace) {
        gap
    } else {
        " "
    }
}

/// Text of an atom as it reads in the file; numbers keep their source spelling.
fn atom_text(node: &Sexpr, source: &str) -> Option<String> {
    match &node.kind {
        SexprKind::Int(_) | SexprKind::F64(_) => Some(node.text(source).to_string()),
        _ => node.as_atom().map(str::to_string),
    }
}

fn read_property(node: &Sexpr, source: &str) -> Result<Property, SchematicError> {
    let malformed = || SchematicError::MalformedProperty {
        offset: node.span.start,
    };
    let items = node.as_list().ok_or_else(malformed)?;
    let key = items
        .get(1)
        .and_then(|n| atom_text(n, source))
        .ok_or_else(malformed)?;
    let value_node = items.get(2).ok_or_else(malformed)?;
    let value = atom_text(value_node, source).ok_or_else(malformed)?;

    // Everything after the value up to the closing paren travels with the property.
    let extra = &source[value_node.span.end..node.span.end - 1];
    let property = Property::new(key, value);
    Ok(if extra.is_empty() {
        property
    } else {
        property.with_extra(extra)
    })
}

fn read_flag(items: &[Sexpr], flag: Flag) -> Option<(FlagNode, bool)> {
    let tag = flag.tag();
    let index = items.iter().position(|item| item.tag() == Some(tag))?;
    let node = &items[index];
    let value = node.as_list().and_then(|list| list.get(1));

    let enabled = match (yes_no_prop(items, tag), value) {
        (Some(enabled), _) => enabled,
        (None, None) => true,
        (None, Some(_)) => {
            log::warn!(
                "Unrecognised ({tag} ...) value at byte {}, assuming default",
                node.span.start
            );
            flag.absent_value()
        }
    };
    let flag_node = FlagNode {
        index,
        node: node.span,
        value: value.map(|v| v.span),
    };
    Some((flag_node, enabled))
}

/// Read a placed `(symbol ...)` node into the record model plus its layout.
pub(crate) fn read_symbol(
    node: &Sexpr,
    source: &str,
) -> Result<(Symbol, SymbolLayout), SchematicError> {
    let items = node.as_list().unwrap_or_default();
    let mut symbol = Symbol::default();

    let mut properties = Vec::new();
    for (index, property) in property_nodes(items) {
        symbol.properties.push(read_property(property, source)?);
        properties.push(index);
    }

    let dnp = read_flag(items, Flag::Dnp).map(|(node, enabled)| {
        symbol.dnp = enabled;
        node
    });
    let in_bom = read_flag(items, Flag::InBom).map(|(node, enabled)| {
        symbol.in_bom = enabled;
        node
    });

    let layout = SymbolLayout {
        children: items.iter().map(|item| item.span).collect(),
        tags: items.iter().map(|item| item.tag().map(str::to_string)).collect(),
        properties,
        dnp,
        in_bom,
    };
    Ok((symbol, layout))
}
