use crate::CfgValue;
use crate::config::ConfigDocument;
use std::fmt;
use uuid::Uuid;

/// Opaque identity of one materialized entry. Fresh per generation: ids are
/// scoped to the currently materialized tree, not to the underlying value, so
/// regenerating a parent's children may assign new ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryId(Uuid);

impl EntryId {
    fn fresh() -> Self {
        Self(Uuid::new_v4())
    }
}

/// One step from a section root down to a nested value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathStep {
    Key(String),
    Index(usize),
}

impl fmt::Display for PathStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathStep::Key(key) => f.write_str(key),
            PathStep::Index(i) => write!(f, "[{i}]"),
        }
    }
}

/// Render a path for error messages, e.g. `Add/[3]/Enabled`.
pub fn path_string(path: &[PathStep]) -> String {
    let steps: Vec<String> = path.iter().map(PathStep::to_string).collect();
    steps.join("/")
}

/// A displayable projection of one config value: the key, a type label, a
/// one-line rendering, and enough linkage (section + path) to commit edits
/// back without consulting any UI state.
#[derive(Debug, Clone)]
pub struct Entry {
    pub id: EntryId,
    pub key: String,
    pub type_label: &'static str,
    pub rendered: String,
    /// The boolean value for Boolean entries; `true` (and meaningless) for
    /// every other type, kept for uniform row shape.
    pub is_enabled: bool,
    pub parent_key: Option<String>,
    pub depth: usize,
    pub is_expandable: bool,
    pub section: String,
    pub path: Vec<PathStep>,
    pub value: CfgValue,
}

/// Project a top-level section as a depth-0 entry. Absent sections project
/// their synthesized default, so e.g. a missing `ACPI` still shows its empty
/// `Add`/`Delete`/`Patch`/`Quirks` skeleton.
pub fn project_section(doc: &ConfigDocument, name: &str) -> Entry {
    let value = doc.section_or_default(name);
    make_entry(name.to_string(), value, name, Vec::new(), None, 0)
}

/// Generate the child entries of a container entry. Pure: no cache is
/// consulted or mutated (that is the tree navigator's job). Dictionary
/// children come out in lexicographic key order, array children in element
/// order labeled `[i]`.
pub fn project_children(parent: &Entry) -> Vec<Entry> {
    match &parent.value {
        CfgValue::Dict(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            keys.into_iter()
                .map(|key| {
                    let mut path = parent.path.clone();
                    path.push(PathStep::Key(key.clone()));
                    make_entry(
                        key.clone(),
                        map[key].clone(),
                        &parent.section,
                        path,
                        Some(parent.key.clone()),
                        parent.depth + 1,
                    )
                })
                .collect()
        }
        CfgValue::Array(values) => values
            .iter()
            .enumerate()
            .map(|(i, value)| {
                let mut path = parent.path.clone();
                path.push(PathStep::Index(i));
                make_entry(
                    format!("[{i}]"),
                    value.clone(),
                    &parent.section,
                    path,
                    Some(parent.key.clone()),
                    parent.depth + 1,
                )
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn make_entry(
    key: String,
    value: CfgValue,
    section: &str,
    path: Vec<PathStep>,
    parent_key: Option<String>,
    depth: usize,
) -> Entry {
    let is_enabled = match value {
        CfgValue::Bool(v) => v,
        _ => true,
    };
    Entry {
        id: EntryId::fresh(),
        key,
        type_label: value.type_label(),
        rendered: value.rendered_string(),
        is_enabled,
        parent_key,
        depth,
        is_expandable: !value.is_empty_container()
            && matches!(value, CfgValue::Dict(_) | CfgValue::Array(_)),
        section: section.to_string(),
        path,
        value,
    }
}
