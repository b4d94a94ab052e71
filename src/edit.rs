use crate::config::{ConfigDocument, NotFoundError};
use crate::entry::{Entry, EntryId};
use crate::{CfgValue, statics};
use thiserror::Error;

/// Commit-time validation failures. The document is untouched whenever one
/// of these comes back.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommitError {
    #[error("{0:?} is not an integer")]
    NotAnInteger(String),
    #[error("{0:?} is not a number")]
    NotADouble(String),
    #[error("{0} values are not text-editable")]
    UnsupportedForContainer(&'static str),
    #[error("{0} values cannot be edited as text")]
    UnsupportedType(&'static str),
    #[error(transparent)]
    NotFound(#[from] NotFoundError),
}

/// An in-flight edit of one leaf entry. Captures the rendered value as the
/// initial buffer; the caller mutates `buffer` and hands it to `commit`.
/// Works for both explicit edit-then-commit and inline-edit UI patterns.
#[derive(Debug, Clone)]
pub struct EditSession {
    pub entry_id: EntryId,
    pub key: String,
    pub type_label: &'static str,
    pub buffer: String,
}

impl EditSession {
    pub fn start(entry: &Entry) -> Self {
        Self {
            entry_id: entry.id,
            key: entry.key.clone(),
            type_label: entry.type_label,
            buffer: entry.rendered.clone(),
        }
    }
}

/// Coerce edited text into a value of the entry's declared type.
pub fn coerce(type_label: &'static str, text: &str) -> Result<CfgValue, CommitError> {
    match type_label {
        statics::TYPE_STRING => Ok(CfgValue::String(text.to_string())),
        // Permissive on purpose: anything but "true" is false, no error path.
        statics::TYPE_BOOLEAN => Ok(CfgValue::Bool(text.eq_ignore_ascii_case("true"))),
        statics::TYPE_INTEGER => text
            .trim()
            .parse::<i64>()
            .map(CfgValue::Int)
            .map_err(|_| CommitError::NotAnInteger(text.to_string())),
        statics::TYPE_DOUBLE => text
            .trim()
            .parse::<f64>()
            .map(CfgValue::Double)
            .map_err(|_| CommitError::NotADouble(text.to_string())),
        statics::TYPE_ARRAY | statics::TYPE_DICTIONARY => {
            Err(CommitError::UnsupportedForContainer(type_label))
        }
        other => Err(CommitError::UnsupportedType(other)),
    }
}

/// Validate `new_text` against the entry's type, then thread the replacement
/// value through every ancestor back to the entry's top-level section. A
/// depth-0 entry replaces its section outright. Siblings along the path are
/// untouched; on any error the document is left exactly as it was.
///
/// Returns the committed value so the caller can refresh its projection.
pub fn commit(
    doc: &mut ConfigDocument,
    entry: &Entry,
    new_text: &str,
) -> Result<CfgValue, CommitError> {
    let value = coerce(entry.type_label, new_text)?;
    if entry.path.is_empty() {
        doc.replace_section(&entry.section, value.clone());
    } else {
        doc.set_path(&entry.section, &entry.path, value.clone())?;
    }
    Ok(value)
}
