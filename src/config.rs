use crate::entry::{PathStep, path_string};
use crate::{CfgValue, statics};
use anyhow::Context;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::Cursor,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// The two interchangeable config.plist wire formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlistFormat {
    Xml,
    Binary,
}

impl PlistFormat {
    fn other(self) -> PlistFormat {
        match self {
            PlistFormat::Xml => PlistFormat::Binary,
            PlistFormat::Binary => PlistFormat::Xml,
        }
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("not a valid property list: {0}")]
    Plist(#[from] plist::Error),
    #[error("top level of the property list is not a dictionary")]
    NotAKeyedDocument,
}

/// Both serialization attempts failed; carries both underlying messages so
/// nothing is silently dropped.
#[derive(Debug, Error)]
#[error("xml serialization failed ({xml}); binary fallback failed ({binary})")]
pub struct SaveError {
    pub xml: String,
    pub binary: String,
}

/// A section or nested path that does not exist in the document.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("no value at {path} in section {section}")]
pub struct NotFoundError {
    pub section: String,
    pub path: String,
}

/// Detection record produced by the surrounding application's OpenCore
/// scanner. The editor only displays it; it is never validated here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenCoreInfo {
    pub version: String,
    pub mode: String,
    pub secure_boot_model: String,
    pub sip_status: String,
    pub boot_args: String,
    pub is_hackintosh: bool,
    pub efi_mount_path: Option<String>,
}

/// A loaded config.plist, preserving its original bytes so an unmodified
/// document saves back byte-for-byte.
#[derive(Debug, Clone)]
pub struct ConfigDocument {
    pub source_path: Option<PathBuf>,
    pub format: PlistFormat,
    pub original_bytes: Vec<u8>,
    pub root: IndexMap<String, CfgValue>,
    pub dirty: bool,
}

impl ConfigDocument {
    pub fn empty() -> Self {
        Self {
            source_path: None,
            format: PlistFormat::Xml,
            original_bytes: Vec::new(),
            root: IndexMap::new(),
            dirty: false,
        }
    }

    /// Parse either plist format (auto-detected from the leading bytes).
    /// Fails unless the top level is a dictionary. Returns a fresh document,
    /// so a failed load leaves any previously loaded document untouched.
    pub fn load_from_bytes(bytes: &[u8]) -> Result<Self, LoadError> {
        let value = plist::Value::from_reader(Cursor::new(bytes))?;
        let plist::Value::Dictionary(dict) = value else {
            return Err(LoadError::NotAKeyedDocument);
        };

        let mut root = IndexMap::new();
        for (key, value) in dict {
            root.insert(key, CfgValue::from_plist(value));
        }

        Ok(Self {
            source_path: None,
            format: detect_format(bytes),
            original_bytes: bytes.to_vec(),
            root,
            dirty: false,
        })
    }

    pub fn load_path(path: &Path) -> anyhow::Result<Self> {
        let bytes = fs::read(path).with_context(|| format!("reading {path:?}"))?;
        let mut doc =
            Self::load_from_bytes(&bytes).with_context(|| format!("parsing {path:?}"))?;
        doc.source_path = Some(path.to_path_buf());
        Ok(doc)
    }

    /// Serialize the requested format first; on failure retry the other one.
    /// A clean document in its source format returns the original bytes.
    pub fn save_to_bytes(&self, preferred: PlistFormat) -> Result<Vec<u8>, SaveError> {
        if !self.dirty && preferred == self.format && !self.original_bytes.is_empty() {
            return Ok(self.original_bytes.clone());
        }
        self.generate_with_fallback(preferred).map(|(bytes, _)| bytes)
    }

    fn generate_with_fallback(
        &self,
        preferred: PlistFormat,
    ) -> Result<(Vec<u8>, PlistFormat), SaveError> {
        let first = match self.generate_bytes(preferred) {
            Ok(bytes) => return Ok((bytes, preferred)),
            Err(err) => err,
        };
        let fallback = preferred.other();
        let second = match self.generate_bytes(fallback) {
            Ok(bytes) => return Ok((bytes, fallback)),
            Err(err) => err,
        };

        let (xml, binary) = match preferred {
            PlistFormat::Xml => (first, second),
            PlistFormat::Binary => (second, first),
        };
        Err(SaveError {
            xml: xml.to_string(),
            binary: binary.to_string(),
        })
    }

    fn generate_bytes(&self, format: PlistFormat) -> Result<Vec<u8>, plist::Error> {
        let value = CfgValue::Dict(self.root.clone()).into_plist();
        let mut out = Vec::new();
        match format {
            PlistFormat::Xml => value.to_writer_xml(&mut out)?,
            PlistFormat::Binary => value.to_writer_binary(&mut out)?,
        }
        Ok(out)
    }

    /// Write XML (with binary fallback) and refresh the document's source
    /// state so it reads as clean against the written bytes.
    pub fn save_to_path(&mut self, path: &Path) -> anyhow::Result<()> {
        let (bytes, format) = if !self.dirty && !self.original_bytes.is_empty() {
            (self.original_bytes.clone(), self.format)
        } else {
            self.generate_with_fallback(PlistFormat::Xml)?
        };
        fs::write(path, &bytes).with_context(|| format!("writing {path:?}"))?;

        self.source_path = Some(path.to_path_buf());
        self.format = format;
        self.original_bytes = bytes;
        self.dirty = false;
        Ok(())
    }

    /// Absent sections return `None`, distinct from an empty dictionary.
    pub fn section(&self, name: &str) -> Option<&CfgValue> {
        self.root.get(name)
    }

    /// The section's real value, or its synthesized default when absent.
    pub fn section_or_default(&self, name: &str) -> CfgValue {
        self.section(name).cloned().unwrap_or_else(|| default_for(name))
    }

    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.root.keys().map(String::as_str)
    }

    /// Replace a single top-level section; sibling sections are untouched.
    pub fn replace_section(&mut self, name: &str, value: CfgValue) {
        self.root.insert(name.to_string(), value);
        self.dirty = true;
    }

    /// Substitute the value at `path` inside `section`, leaving every sibling
    /// along the way unchanged. An absent section is materialized from its
    /// default first, so entries projected from a synthesized section commit
    /// cleanly. Fails without touching the document if the path is dead.
    pub fn set_path(
        &mut self,
        section: &str,
        path: &[PathStep],
        new_value: CfgValue,
    ) -> Result<(), NotFoundError> {
        match self.root.get_mut(section) {
            Some(slot) => substitute(slot, section, path, new_value)?,
            None => {
                let mut synthesized = default_for(section);
                substitute(&mut synthesized, section, path, new_value)?;
                self.root.insert(section.to_string(), synthesized);
            }
        }
        self.dirty = true;
        Ok(())
    }

    /// Element count of an array subsection, e.g. `("ACPI", "Add")`. Used to
    /// summarize a loaded config. Missing or non-array paths count as zero.
    pub fn array_count_at(&self, section: &str, key: &str) -> usize {
        self.section(section)
            .and_then(|v| v.get(key))
            .and_then(CfgValue::as_array)
            .map_or(0, <[CfgValue]>::len)
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Diagnostic JSON view of the whole document (lossy, one-way).
    pub fn to_json_pretty(&self) -> String {
        CfgValue::Dict(self.root.clone()).to_json_pretty()
    }
}

fn substitute(
    slot: &mut CfgValue,
    section: &str,
    path: &[PathStep],
    new_value: CfgValue,
) -> Result<(), NotFoundError> {
    let mut cursor = slot;
    for step in path {
        let next = match step {
            PathStep::Key(key) => cursor.get_mut(key),
            PathStep::Index(i) => cursor.as_array_mut().and_then(|v| v.get_mut(*i)),
        };
        cursor = next.ok_or_else(|| NotFoundError {
            section: section.to_string(),
            path: path_string(path),
        })?;
    }
    *cursor = new_value;
    Ok(())
}

/// Leading-bytes format sniff; `plist` does its own detection on load, this
/// exists so the document can record which format it came from.
pub fn detect_format(bytes: &[u8]) -> PlistFormat {
    if bytes.starts_with(statics::BPLIST_MAGIC) {
        PlistFormat::Binary
    } else {
        PlistFormat::Xml
    }
}

/// Canonical synthetic sub-structure shown when a known section is absent.
/// Sections with no registered default get an empty dictionary.
pub fn default_for(section: &str) -> CfgValue {
    match section {
        statics::OC_ACPI => dict([
            (statics::KEY_ADD, CfgValue::Array(vec![])),
            (statics::KEY_DELETE, CfgValue::Array(vec![])),
            (statics::KEY_PATCH, CfgValue::Array(vec![])),
            (statics::KEY_QUIRKS, empty_dict()),
        ]),
        statics::OC_KERNEL => dict([
            (statics::KEY_ADD, CfgValue::Array(vec![])),
            (statics::KEY_BLOCK, CfgValue::Array(vec![])),
            (statics::KEY_PATCH, CfgValue::Array(vec![])),
            (statics::KEY_QUIRKS, empty_dict()),
            (statics::KEY_SCHEME, empty_dict()),
        ]),
        statics::OC_UEFI => dict([
            (statics::SEC_APFS, empty_dict()),
            (statics::KEY_DRIVERS, CfgValue::Array(vec![])),
            (statics::KEY_INPUT, empty_dict()),
            (statics::KEY_OUTPUT, empty_dict()),
            (statics::KEY_QUIRKS, empty_dict()),
        ]),
        statics::SEC_APFS => dict([
            (statics::APFS_ENABLE_JUMPSTART, CfgValue::Bool(true)),
            (statics::APFS_GLOBAL_CONNECT, CfgValue::Bool(true)),
            (statics::APFS_HIDE_VERBOSE, CfgValue::Bool(false)),
            (statics::APFS_JUMPSTART_HOT_PLUG, CfgValue::Bool(false)),
            (statics::APFS_MIN_DATE, CfgValue::Int(0)),
            (statics::APFS_MIN_VERSION, CfgValue::String(String::new())),
        ]),
        _ => empty_dict(),
    }
}

/// Demonstration document used when nothing is loaded: a config with dozens
/// of fake ACPI/Kernel/UEFI entries. Satisfies the same invariants as a
/// parsed one.
pub fn sample_document() -> ConfigDocument {
    let acpi_add: Vec<CfgValue> = (1..=50)
        .map(|i| {
            dict([
                ("Enabled", CfgValue::Bool(i % 4 != 0)),
                ("Path", CfgValue::String(format!("SSDT-{i}.aml"))),
                ("Comment", CfgValue::String(format!("SSDT Entry {i}"))),
                ("OemTableId", CfgValue::String(format!("SSDT{i}"))),
                ("TableLength", CfgValue::Int(1024)),
                ("TableSignature", CfgValue::String("SSDT".into())),
            ])
        })
        .collect();

    let kernel_add: Vec<CfgValue> = (1..=40)
        .map(|i| {
            dict([
                ("Enabled", CfgValue::Bool(i % 3 != 0)),
                ("BundlePath", CfgValue::String(format!("Kext{i}.kext"))),
                ("Comment", CfgValue::String(format!("Kernel Extension {i}"))),
                (
                    "ExecutablePath",
                    CfgValue::String(format!("Contents/MacOS/Kext{i}")),
                ),
                ("PlistPath", CfgValue::String("Contents/Info.plist".into())),
                ("MinKernel", CfgValue::String("20.0.0".into())),
                ("MaxKernel", CfgValue::String("24.0.0".into())),
            ])
        })
        .collect();

    let uefi_drivers: Vec<CfgValue> = (1..=30)
        .map(|i| {
            dict([
                ("Enabled", CfgValue::Bool(i % 5 != 0)),
                ("Path", CfgValue::String(format!("Driver{i}.efi"))),
                ("Comment", CfgValue::String(format!("UEFI Driver {i}"))),
                ("Arguments", CfgValue::String(String::new())),
                ("LoadEarly", CfgValue::Bool(i < 10)),
                ("PciDevices", CfgValue::Array(vec![])),
            ])
        })
        .collect();

    let acpi_quirks = dict([
        ("FadtEnableReset", CfgValue::Bool(false)),
        ("NormalizeHeaders", CfgValue::Bool(true)),
        ("RebaseRegions", CfgValue::Bool(true)),
        ("ResetHwSig", CfgValue::Bool(false)),
        ("ResetLogoStatus", CfgValue::Bool(false)),
        ("SyncTableIds", CfgValue::Bool(true)),
    ]);

    let mut doc = ConfigDocument::empty();
    doc.root.insert(
        statics::OC_ACPI.to_string(),
        dict([
            (statics::KEY_ADD, CfgValue::Array(acpi_add)),
            (statics::KEY_DELETE, CfgValue::Array(vec![])),
            (statics::KEY_PATCH, CfgValue::Array(vec![])),
            (statics::KEY_QUIRKS, acpi_quirks),
        ]),
    );
    doc.root.insert(
        statics::OC_BOOTER.to_string(),
        dict([
            ("MmioWhitelist", CfgValue::Array(vec![])),
            (statics::KEY_PATCH, CfgValue::Array(vec![])),
            (statics::KEY_QUIRKS, empty_dict()),
        ]),
    );
    doc.root.insert(
        statics::OC_DEVICE_PROPERTIES.to_string(),
        dict([
            (statics::KEY_ADD, empty_dict()),
            (statics::KEY_DELETE, empty_dict()),
        ]),
    );
    doc.root.insert(
        statics::OC_KERNEL.to_string(),
        dict([
            (statics::KEY_ADD, CfgValue::Array(kernel_add)),
            (statics::KEY_BLOCK, CfgValue::Array(vec![])),
            (statics::KEY_PATCH, CfgValue::Array(vec![])),
            (statics::KEY_QUIRKS, empty_dict()),
            (statics::KEY_SCHEME, empty_dict()),
        ]),
    );
    doc.root.insert(
        statics::OC_MISC.to_string(),
        dict([
            ("Boot", empty_dict()),
            ("Debug", empty_dict()),
            ("Security", empty_dict()),
            ("Tools", CfgValue::Array(vec![])),
        ]),
    );
    doc.root.insert(
        statics::OC_NVRAM.to_string(),
        dict([
            (statics::KEY_ADD, empty_dict()),
            (statics::KEY_DELETE, empty_dict()),
            ("WriteFlash", CfgValue::Bool(true)),
        ]),
    );
    doc.root.insert(
        statics::OC_PLATFORM_INFO.to_string(),
        dict([
            ("Generic", empty_dict()),
            ("UpdateDataHub", CfgValue::Bool(true)),
            ("UpdateSMBIOS", CfgValue::Bool(true)),
        ]),
    );
    doc.root.insert(
        statics::OC_UEFI.to_string(),
        dict([
            (statics::SEC_APFS, empty_dict()),
            (statics::KEY_DRIVERS, CfgValue::Array(uefi_drivers)),
            (statics::KEY_INPUT, empty_dict()),
            (statics::KEY_OUTPUT, empty_dict()),
            (statics::KEY_QUIRKS, empty_dict()),
        ]),
    );
    doc
}

fn dict<const N: usize>(entries: [(&str, CfgValue); N]) -> CfgValue {
    CfgValue::Dict(
        entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect(),
    )
}

fn empty_dict() -> CfgValue {
    CfgValue::Dict(IndexMap::new())
}
