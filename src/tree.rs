use crate::entry::{Entry, EntryId, project_children};
use std::collections::{HashMap, HashSet};

/// Caller-owned expansion state for one editing session: which entry ids are
/// open, plus the materialized child list per parent so re-renders do not
/// regenerate. Single-writer; cleared wholesale on section switch or reload.
#[derive(Debug, Default)]
pub struct TreeState {
    expanded: HashSet<EntryId>,
    children: HashMap<EntryId, Vec<Entry>>,
}

impl TreeState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the entry expanded and return its children, generating and
    /// caching them on first use. Non-expandable entries stay collapsed and
    /// yield nothing.
    pub fn expand(&mut self, entry: &Entry) -> &[Entry] {
        if !entry.is_expandable {
            return &[];
        }
        self.expanded.insert(entry.id);
        self.children
            .entry(entry.id)
            .or_insert_with(|| project_children(entry))
    }

    /// The cached child list is retained for a cheap re-expand.
    pub fn collapse(&mut self, id: EntryId) {
        self.expanded.remove(&id);
    }

    pub fn is_expanded(&self, id: EntryId) -> bool {
        self.expanded.contains(&id)
    }

    /// Mark an id expanded without materializing children; used by the
    /// search engine to make matches reachable.
    pub fn force_expand(&mut self, id: EntryId) {
        self.expanded.insert(id);
    }

    /// Seed the child cache for an entry the search engine already
    /// materialized, so a later `expand` returns the same generation.
    pub(crate) fn prime(&mut self, id: EntryId, children: Vec<Entry>) {
        self.children.insert(id, children);
    }

    pub fn cached_children(&self, id: EntryId) -> Option<&[Entry]> {
        self.children.get(&id).map(Vec::as_slice)
    }

    pub fn reset(&mut self) {
        self.expanded.clear();
        self.children.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::TreeState;
    use crate::config::sample_document;
    use crate::entry::project_section;
    use crate::statics;

    #[test]
    fn expand_caches_and_collapse_keeps_the_cache() {
        let doc = sample_document();
        let root = project_section(&doc, statics::OC_ACPI);

        let mut tree = TreeState::new();
        let first: Vec<_> = tree.expand(&root).iter().map(|e| e.id).collect();
        assert!(tree.is_expanded(root.id));
        assert!(!first.is_empty());

        // Second expand reuses the cached generation, ids included.
        let second: Vec<_> = tree.expand(&root).iter().map(|e| e.id).collect();
        assert_eq!(first, second);

        tree.collapse(root.id);
        assert!(!tree.is_expanded(root.id));
        assert!(tree.cached_children(root.id).is_some());

        // Re-expand after collapse reproduces an equivalent list.
        let third: Vec<_> = tree.expand(&root).iter().map(|e| e.id).collect();
        assert_eq!(first, third);
    }

    #[test]
    fn non_expandable_entries_never_enter_the_state() {
        let doc = sample_document();
        let root = project_section(&doc, statics::OC_ACPI);
        let mut tree = TreeState::new();
        let delete = tree
            .expand(&root)
            .iter()
            .find(|e| e.key == "Delete")
            .cloned()
            .unwrap();
        assert!(!delete.is_expandable);

        assert!(tree.expand(&delete).is_empty());
        assert!(!tree.is_expanded(delete.id));
        assert!(tree.cached_children(delete.id).is_none());
    }

    #[test]
    fn reset_clears_everything() {
        let doc = sample_document();
        let root = project_section(&doc, statics::OC_KERNEL);
        let mut tree = TreeState::new();
        tree.expand(&root);

        tree.reset();
        assert!(!tree.is_expanded(root.id));
        assert!(tree.cached_children(root.id).is_none());
    }
}
