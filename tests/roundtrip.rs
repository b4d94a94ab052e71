use occe::{CfgValue, ConfigDocument, PlistFormat};
use pretty_assertions::assert_eq;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

const MIXED_XML: &[u8] = br#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
    <key>Misc</key>
    <dict>
        <key>Timeout</key>
        <integer>5</integer>
        <key>Scale</key>
        <real>0.5</real>
        <key>ShowPicker</key>
        <true/>
        <key>Comment</key>
        <string>hello</string>
        <key>Blob</key>
        <data>3q2+7w==</data>
        <key>Stamp</key>
        <date>2024-01-15T12:30:45Z</date>
        <key>Tools</key>
        <array>
            <string>OpenShell.efi</string>
            <integer>2</integer>
        </array>
    </dict>
    <key>NVRAM</key>
    <dict>
        <key>WriteFlash</key>
        <false/>
    </dict>
</dict>
</plist>"#;

#[test]
fn xml_roundtrip_is_structurally_equal() -> Result<()> {
    let doc = ConfigDocument::load_from_bytes(MIXED_XML)?;
    assert_eq!(doc.format, PlistFormat::Xml);

    let bytes = doc.save_to_bytes(PlistFormat::Xml)?;
    let reloaded = ConfigDocument::load_from_bytes(&bytes)?;
    assert_eq!(reloaded.root, doc.root);
    Ok(())
}

#[test]
fn binary_roundtrip_is_structurally_equal() -> Result<()> {
    let doc = ConfigDocument::load_from_bytes(MIXED_XML)?;

    let bytes = doc.save_to_bytes(PlistFormat::Binary)?;
    assert_eq!(occe::detect_format(&bytes), PlistFormat::Binary);

    let reloaded = ConfigDocument::load_from_bytes(&bytes)?;
    assert_eq!(reloaded.format, PlistFormat::Binary);
    assert_eq!(reloaded.root, doc.root);
    Ok(())
}

#[test]
fn sample_document_roundtrips_through_both_formats() -> Result<()> {
    let doc = occe::sample_document();

    for format in [PlistFormat::Xml, PlistFormat::Binary] {
        let bytes = doc.save_to_bytes(format)?;
        let reloaded = ConfigDocument::load_from_bytes(&bytes)?;
        assert_eq!(reloaded.root, doc.root);
    }
    Ok(())
}

#[test]
fn clean_document_saves_byte_identical_from_disk() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("config.plist");
    std::fs::write(&path, MIXED_XML)?;

    let doc = ConfigDocument::load_path(&path)?;
    assert!(!doc.dirty);
    assert_eq!(doc.source_path.as_deref(), Some(path.as_path()));

    let out = doc.save_to_bytes(PlistFormat::Xml)?;
    assert_eq!(out, MIXED_XML.to_vec());
    Ok(())
}

#[test]
fn save_to_path_refreshes_document_state() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("out.plist");

    let mut doc = ConfigDocument::load_from_bytes(MIXED_XML)?;
    doc.replace_section("Kernel", occe::default_for("Kernel"));
    assert!(doc.dirty);

    doc.save_to_path(&path)?;
    assert!(!doc.dirty);
    assert_eq!(doc.format, PlistFormat::Xml);
    assert_eq!(doc.source_path.as_deref(), Some(path.as_path()));

    let reloaded = ConfigDocument::load_path(&path)?;
    assert_eq!(reloaded.root, doc.root);
    assert_eq!(
        reloaded.section("Kernel"),
        Some(&occe::default_for("Kernel"))
    );
    Ok(())
}

#[test]
fn failed_load_reports_an_error_and_yields_nothing() {
    // A non-dictionary top level is rejected; the caller's previous document
    // stays whatever it was, because no document is produced at all.
    let mut xml = Vec::new();
    CfgValue::Array(vec![CfgValue::Int(1)])
        .into_plist()
        .to_writer_xml(&mut xml)
        .unwrap();

    let err = ConfigDocument::load_from_bytes(&xml).unwrap_err();
    assert!(err.to_string().contains("not a dictionary"));
}
