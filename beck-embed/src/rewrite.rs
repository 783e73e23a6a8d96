use crate::{Placeholder, PlaceholderKind};
use beck_core::ParameterKey;
use std::collections::BTreeSet;
use std::fmt::Write;

/// The engine-native form of a statement: SQL text with `?N` markers plus
/// the order of logical parameters behind those slots.
///
/// Derived once per distinct SQL text and immutable afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Rewritten {
    /// SQL with every placeholder replaced by a native `?N` marker,
    /// N being the 1-based slot number.
    pub native_sql: String,
    /// Logical key behind each native slot, in slot order.
    pub slots: Box<[ParameterKey]>,
}

/// Rewrites the surface placeholder syntaxes into the engine's native
/// indexed-positional form. Pure function over the parser output, never
/// re-parses the SQL.
///
/// Slot assignment: positional `?` markers take a fresh slot each, in
/// source order; a named parameter takes one slot at its first occurrence
/// and every later occurrence reuses that same marker; indexed `$n` keys
/// collapse duplicates and are laid out in ascending index order (gaps are
/// accepted). When styles are mixed, indexed slots follow the positional
/// and named ones.
pub fn rewrite(sql: &str, placeholders: &[Placeholder]) -> Rewritten {
    let mut slots: Vec<ParameterKey> = Vec::new();
    let mut indexed = BTreeSet::new();
    for placeholder in placeholders {
        if placeholder.kind == PlaceholderKind::Indexed {
            if let ParameterKey::Index(index) = placeholder.key {
                indexed.insert(index);
            }
        } else if !slots.contains(&placeholder.key) {
            slots.push(placeholder.key.clone());
        }
    }
    for index in indexed {
        let key = ParameterKey::Index(index);
        if !slots.contains(&key) {
            slots.push(key);
        }
    }

    let mut native_sql = String::with_capacity(sql.len() + placeholders.len() * 2);
    let mut cursor = 0;
    for placeholder in placeholders {
        // Slot lookup cannot fail: every key was collected above.
        let slot = slots.iter().position(|k| k == &placeholder.key).unwrap_or(0) + 1;
        native_sql.push_str(&sql[cursor..placeholder.offset]);
        let _ = write!(native_sql, "?{}", slot);
        cursor = placeholder.offset + placeholder.len;
    }
    native_sql.push_str(&sql[cursor..]);

    Rewritten {
        native_sql,
        slots: slots.into(),
    }
}
