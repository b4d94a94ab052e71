use occe::{
    CfgValue, CommitError, ConfigDocument, EditSession, PlistFormat, TreeState, commit,
    project_section, statics,
};
use pretty_assertions::assert_eq;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

const MISC_XML: &[u8] = br#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
    <key>Misc</key>
    <dict>
        <key>a</key>
        <integer>1</integer>
        <key>b</key>
        <string>x</string>
        <key>c</key>
        <true/>
    </dict>
</dict>
</plist>"#;

#[test]
fn editing_one_key_preserves_its_siblings_through_a_save() -> Result<()> {
    let mut doc = ConfigDocument::load_from_bytes(MISC_XML)?;
    let mut tree = TreeState::new();

    let root = project_section(&doc, statics::OC_MISC);
    let b = tree
        .expand(&root)
        .iter()
        .find(|e| e.key == "b")
        .cloned()
        .unwrap();

    // Explicit session flow: start from the rendered value, type, commit.
    let mut session = EditSession::start(&b);
    assert_eq!(session.buffer, "x");
    session.buffer = "y".to_string();
    commit(&mut doc, &b, &session.buffer)?;

    let bytes = doc.save_to_bytes(PlistFormat::Xml)?;
    let reloaded = ConfigDocument::load_from_bytes(&bytes)?;
    let misc = reloaded.section(statics::OC_MISC).unwrap();

    assert_eq!(misc.get("a"), Some(&CfgValue::Int(1)));
    assert_eq!(misc.get("b"), Some(&CfgValue::String("y".into())));
    assert_eq!(misc.get("c"), Some(&CfgValue::Bool(true)));
    Ok(())
}

#[test]
fn boolean_commits_are_permissive() -> Result<()> {
    let mut doc = ConfigDocument::load_from_bytes(MISC_XML)?;
    let root = project_section(&doc, statics::OC_MISC);
    let c = occe::project_children(&root)
        .into_iter()
        .find(|e| e.key == "c")
        .unwrap();

    // "TRUE" in any casing is true.
    assert_eq!(commit(&mut doc, &c, "True")?, CfgValue::Bool(true));
    // Any other text quietly lands as false, by design.
    assert_eq!(commit(&mut doc, &c, "definitely")?, CfgValue::Bool(false));
    assert_eq!(
        doc.section(statics::OC_MISC).and_then(|v| v.get("c")),
        Some(&CfgValue::Bool(false))
    );
    Ok(())
}

#[test]
fn containers_reject_text_commits() -> Result<()> {
    let mut doc = ConfigDocument::load_from_bytes(MISC_XML)?;
    let before = doc.section(statics::OC_MISC).cloned();

    let root = project_section(&doc, statics::OC_MISC);
    let err = commit(&mut doc, &root, "{}").unwrap_err();
    assert_eq!(
        err,
        CommitError::UnsupportedForContainer(statics::TYPE_DICTIONARY)
    );
    assert_eq!(doc.section(statics::OC_MISC).cloned(), before);
    Ok(())
}

#[test]
fn integer_validation_round_trips_the_offending_text() -> Result<()> {
    let mut doc = ConfigDocument::load_from_bytes(MISC_XML)?;
    let root = project_section(&doc, statics::OC_MISC);
    let a = occe::project_children(&root)
        .into_iter()
        .find(|e| e.key == "a")
        .unwrap();

    let err = commit(&mut doc, &a, "one hundred").unwrap_err();
    assert_eq!(err, CommitError::NotAnInteger("one hundred".into()));
    assert!(err.to_string().contains("one hundred"));

    // A valid retry goes through.
    assert_eq!(commit(&mut doc, &a, "100")?, CfgValue::Int(100));
    Ok(())
}
