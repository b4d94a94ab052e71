use crate::entry::{Entry, project_children};
use crate::tree::TreeState;

/// Free-text filter over the projected tree. Matches case-insensitively
/// against key, rendered value, and type label, walking depth-first through
/// lazily generated children. Ancestors of a match are included (and their
/// ids force-expanded in `tree`) so the match is reachable once rendered; a
/// matching entry is included directly without listing its own children. An
/// empty query is the idle state: the roots come back unfiltered with no
/// forced expansion.
pub fn filter(roots: &[Entry], query: &str, tree: &mut TreeState) -> Vec<Entry> {
    if query.is_empty() {
        return roots.to_vec();
    }
    let needle = query.to_lowercase();
    filter_recursive(roots, &needle, tree)
}

fn filter_recursive(entries: &[Entry], needle: &str, tree: &mut TreeState) -> Vec<Entry> {
    let mut result = Vec::new();

    for entry in entries {
        if matches(entry, needle) {
            // A matching container stays open so its contents are one click away.
            if entry.is_expandable {
                tree.force_expand(entry.id);
            }
            result.push(entry.clone());
        } else if entry.is_expandable {
            let children = project_children(entry);
            let hits = filter_recursive(&children, needle, tree);
            if !hits.is_empty() {
                tree.force_expand(entry.id);
                tree.prime(entry.id, children);
                result.push(entry.clone());
                result.extend(hits);
            }
        }
    }

    result
}

fn matches(entry: &Entry, needle: &str) -> bool {
    entry.key.to_lowercase().contains(needle)
        || entry.rendered.to_lowercase().contains(needle)
        || entry.type_label.to_lowercase().contains(needle)
}
