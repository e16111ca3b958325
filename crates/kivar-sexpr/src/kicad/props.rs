//! Common KiCad-ish S-expression query helpers.
//!
//! Many KiCad formats use small list nodes that behave like key/value properties:
//! `(tag "value")`, `(tag 123)`, `(tag yes)`, etc. These helpers standardize querying.

use crate::Sexpr;

/// Find the first direct child node `(tag ...)` within `list`.
pub fn child_node<'a>(list: &'a [Sexpr], tag: &str) -> Option<&'a Sexpr> {
    list.iter().find(|item| item.tag() == Some(tag))
}

/// Find the items of the first direct child list `(tag ...)` within `list`.
fn child_list<'a>(list: &'a [Sexpr], tag: &str) -> Option<&'a [Sexpr]> {
    child_node(list, tag)?.as_list()
}

/// Find a symbol atom property `(tag VALUE)` within `list`.
fn sym_prop<'a>(list: &'a [Sexpr], tag: &str) -> Option<&'a str> {
    child_list(list, tag)?.get(1)?.as_sym()
}

/// Find a boolean property that is represented as `(tag yes)` or `(tag no)`.
pub fn yes_no_prop(list: &[Sexpr], tag: &str) -> Option<bool> {
    match sym_prop(list, tag)? {
        "yes" => Some(true),
        "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    #[test]
    fn reads_yes_no_flags() {
        let parsed = parse("(symbol (in_bom yes) (dnp no) (on_board maybe))").unwrap();
        let items = parsed.as_list().unwrap();
        assert_eq!(yes_no_prop(items, "in_bom"), Some(true));
        assert_eq!(yes_no_prop(items, "dnp"), Some(false));
        assert_eq!(yes_no_prop(items, "on_board"), None);
        assert_eq!(yes_no_prop(items, "exclude_from_sim"), None);
    }

    #[test]
    fn first_child_wins() {
        let parsed = parse(r#"(symbol (unit 1) (unit 2) (lib_id "Device:R"))"#).unwrap();
        let items = parsed.as_list().unwrap();
        assert_eq!(child_list(items, "unit").unwrap()[1].as_int(), Some(1));
        assert_eq!(child_list(items, "lib_id").unwrap()[1].as_str(), Some("Device:R"));
        assert!(child_node(items, "uuid").is_none());
    }
}
