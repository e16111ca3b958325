//! Turning resolved symbols back into minimal text patches.

use kivar_core::{Property, Symbol};
use kivar_sexpr::{PatchSet, Span, quote_string};

use crate::layout::{Flag, FlagNode, SymbolLayout};

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

pub(crate) fn render_property(property: &Property) -> String {
    format!(
        "(property {} {}{})",
        quote_string(&property.key),
        quote_string(&property.value),
        property.extra.as_deref().unwrap_or("")
    )
}

/// Patches turning `before` into `after` for one placed symbol.
///
/// Flag patches are added before the property patch so an insertion that lands
/// on the start of the property run is written ahead of it.
pub(crate) fn patch_symbol(
    layout: &SymbolLayout,
    before: &Symbol,
    after: &Symbol,
    source: &str,
    patches: &mut PatchSet,
) {
    let rewrite_run = before.properties != after.properties;
    let flags = [
        (Flag::InBom, before.in_bom, after.in_bom),
        (Flag::Dnp, before.dnp, after.dnp),
    ];
    for (flag, was, now) in flags {
        if was == now {
            continue;
        }
        // A flag node inside a rewritten property run is re-emitted with the run.
        let in_run = layout
            .flag(flag)
            .is_some_and(|node| layout.in_property_run(node.index));
        if rewrite_run && in_run {
            continue;
        }
        patch_flag(layout, flag, now, source, patches);
    }
    if rewrite_run {
        patch_properties(layout, after, source, patches);
    }
}

fn patch_flag(
    layout: &SymbolLayout,
    flag: Flag,
    value: bool,
    source: &str,
    patches: &mut PatchSet,
) {
    let value = yes_no(value);
    match layout.flag(flag) {
        Some(node) => match node.value {
            Some(span) => patches.replace_raw(span, value.to_string()),
            None => patches.replace_raw(node.node, format!("({} {value})", flag.tag())),
        },
        None => {
            let anchor = layout.anchor(flag);
            let sep = layout.separator_after(anchor, source);
            patches.insert(
                layout.children[anchor].end,
                format!("{sep}({} {value})", flag.tag()),
            );
        }
    }
}

/// Text of a flag node carrying `value`, keeping the node's own spacing.
fn flag_text(node: &FlagNode, flag: Flag, value: bool, source: &str) -> String {
    let value = yes_no(value);
    match node.value {
        Some(atom) => format!(
            "{}{value}{}",
            &source[node.node.start..atom.start],
            &source[atom.end..node.node.end]
        ),
        None => format!("({} {value})", flag.tag()),
    }
}

/// Source text of child `index`, with flag nodes carrying the values in `after`.
fn child_text(layout: &SymbolLayout, index: usize, after: &Symbol, source: &str) -> String {
    for (flag, value) in [(Flag::InBom, after.in_bom), (Flag::Dnp, after.dnp)] {
        if let Some(node) = layout.flag(flag).filter(|node| node.index == index) {
            return flag_text(node, flag, value, source);
        }
    }
    let span = layout.children[index];
    source[span.start..span.end].to_string()
}

fn patch_properties(layout: &SymbolLayout, after: &Symbol, source: &str, patches: &mut PatchSet) {
    let rendered = after.properties.iter().map(render_property);

    let (Some(&first), Some(&last)) = (layout.properties.first(), layout.properties.last()) else {
        // No property run yet: append after the last child.
        let last = layout.children.len() - 1;
        let sep = layout.separator_after(last, source);
        let text: String = rendered.map(|p| format!("{sep}{p}")).collect();
        patches.insert(layout.children[last].end, text);
        return;
    };

    // Non-property nodes inside the run are kept, after the new properties.
    let interleaved = (first..=last)
        .filter(|i| !layout.properties.contains(i))
        .map(|i| child_text(layout, i, after, source));

    let sep = layout.separator_before(first, source);
    let text = rendered.chain(interleaved).collect::<Vec<_>>().join(sep);
    let region = Span::new(layout.children[first].start, layout.children[last].end);
    patches.replace_raw(region, text);
}
