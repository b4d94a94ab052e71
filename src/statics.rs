// Central place for section vocabulary and other shared constants.
// Keep these out of the model modules to reduce duplication and make tweaks safer.

// Type labels shown next to entries (TYPE_ prefix).
pub const TYPE_STRING: &str = "String";
pub const TYPE_BOOLEAN: &str = "Boolean";
pub const TYPE_INTEGER: &str = "Integer";
pub const TYPE_DOUBLE: &str = "Double";
pub const TYPE_ARRAY: &str = "Array";
pub const TYPE_DICTIONARY: &str = "Dictionary";
pub const TYPE_DATA: &str = "Data";
pub const TYPE_DATE: &str = "Date";

// OpenCore config.plist top-level sections (OC_ prefix).
pub const OC_ACPI: &str = "ACPI";
pub const OC_BOOTER: &str = "Booter";
pub const OC_DEVICE_PROPERTIES: &str = "DeviceProperties";
pub const OC_KERNEL: &str = "Kernel";
pub const OC_MISC: &str = "Misc";
pub const OC_NVRAM: &str = "NVRAM";
pub const OC_PLATFORM_INFO: &str = "PlatformInfo";
pub const OC_UEFI: &str = "UEFI";

// Panel sections that are not part of the OpenCore schema proper.
pub const SEC_APFS: &str = "APFS";
pub const SEC_APPLE_INPUT: &str = "AppleInput";
pub const SEC_AUDIO: &str = "Audio";
pub const SEC_DRIVERS: &str = "Drivers";
pub const SEC_INPUT: &str = "Input";
pub const SEC_OUTPUT: &str = "Output";
pub const SEC_PROTOCOL_OVERRIDES: &str = "ProtocolOverrides";
pub const SEC_RESERVED_MEMORY: &str = "ReservedMemory";
pub const SEC_UNLOAD: &str = "Unload";

/// Sections of an OpenCore config.plist, in schema order.
pub const OPENCORE_SECTIONS: [&str; 8] = [
    OC_ACPI,
    OC_BOOTER,
    OC_DEVICE_PROPERTIES,
    OC_KERNEL,
    OC_MISC,
    OC_NVRAM,
    OC_PLATFORM_INFO,
    OC_UEFI,
];

/// Every section the editor knows how to display, OpenCore or not.
pub const ALL_SECTIONS: [&str; 17] = [
    SEC_APFS,
    SEC_APPLE_INPUT,
    SEC_AUDIO,
    SEC_DRIVERS,
    SEC_INPUT,
    SEC_OUTPUT,
    SEC_PROTOCOL_OVERRIDES,
    SEC_RESERVED_MEMORY,
    SEC_UNLOAD,
    OC_ACPI,
    OC_BOOTER,
    OC_DEVICE_PROPERTIES,
    OC_KERNEL,
    OC_MISC,
    OC_NVRAM,
    OC_PLATFORM_INFO,
    OC_UEFI,
];

pub fn is_opencore_section(name: &str) -> bool {
    OPENCORE_SECTIONS.contains(&name)
}

// Well-known subsection keys (KEY_ prefix).
pub const KEY_ADD: &str = "Add";
pub const KEY_BLOCK: &str = "Block";
pub const KEY_DELETE: &str = "Delete";
pub const KEY_PATCH: &str = "Patch";
pub const KEY_QUIRKS: &str = "Quirks";
pub const KEY_SCHEME: &str = "Scheme";
pub const KEY_DRIVERS: &str = "Drivers";
pub const KEY_INPUT: &str = "Input";
pub const KEY_OUTPUT: &str = "Output";

// Default APFS settings (mirrors the OpenCore UEFI->APFS defaults).
pub const APFS_ENABLE_JUMPSTART: &str = "EnableJumpstart";
pub const APFS_GLOBAL_CONNECT: &str = "GlobalConnect";
pub const APFS_HIDE_VERBOSE: &str = "HideVerbose";
pub const APFS_JUMPSTART_HOT_PLUG: &str = "JumpstartHotPlug";
pub const APFS_MIN_DATE: &str = "MinDate";
pub const APFS_MIN_VERSION: &str = "MinVersion";

// Binary plists start with "bplist" followed by a two-byte version.
pub const BPLIST_MAGIC: &[u8] = b"bplist";

// Timestamp display format for Date values.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opencore_sections_are_a_subset_of_all_sections() {
        for section in OPENCORE_SECTIONS {
            assert!(ALL_SECTIONS.contains(&section));
            assert!(is_opencore_section(section));
        }
        assert!(!is_opencore_section(SEC_APFS));
        assert!(!is_opencore_section("NotASection"));
    }
}
