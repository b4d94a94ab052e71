//! Core library for the OpenCore Config Editor (OCCE).
//! Parses XML/binary config.plist documents into a typed value tree, projects
//! them as a lazily expandable entry tree with search and in-place editing,
//! and serializes back with round-trip guarantees.

mod config;
mod edit;
mod entry;
mod search;
pub mod statics;
mod tree;
mod value;

pub use config::{
    ConfigDocument, LoadError, NotFoundError, OpenCoreInfo, PlistFormat, SaveError, default_for,
    detect_format, sample_document,
};
pub use edit::{CommitError, EditSession, coerce, commit};
pub use entry::{Entry, EntryId, PathStep, project_children, project_section};
pub use search::filter;
pub use tree::TreeState;
pub use value::CfgValue;
