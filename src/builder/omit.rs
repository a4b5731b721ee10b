//! Zero-value pruning

use super::value::WhereMap;

/// Removes each of `keys` from `where_map` when its value is a zero value
///
/// Keys not present are ignored. Null markers, ranges and fill policies are
/// never removed.
pub fn omit_empty(where_map: &mut WhereMap, keys: &[&str]) {
    for key in keys {
        if where_map.get(*key).is_some_and(|v| v.is_zero()) {
            where_map.remove(*key);
        }
    }
}
