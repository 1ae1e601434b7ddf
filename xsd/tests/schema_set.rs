use std::fs;
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use tempfile::TempDir;
use xsd_model::{AttributeUse, ParseError, ReadOptions, SchemaSet, XsdError};

const CORE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<xsd:schema xmlns:xsd="http://www.w3.org/2001/XMLSchema"
            xmlns:core="urn:core"
            targetNamespace="urn:core">
  <xsd:import namespace="http://www.w3.org/XML/1998/namespace"/>
  <xsd:element name="Image">
    <xsd:complexType>
      <xsd:sequence>
        <xsd:element ref="core:Pixels"/>
      </xsd:sequence>
      <xsd:attribute name="ID" type="xsd:string" use="required"/>
      <xsd:attribute name="Name" type="xsd:string" use="optional"/>
    </xsd:complexType>
  </xsd:element>
  <xsd:element name="Pixels">
    <xsd:complexType>
      <xsd:attribute name="SizeX" type="xsd:positiveInteger" use="required"/>
    </xsd:complexType>
  </xsd:element>
</xsd:schema>
"#;

const EXT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<xsd:schema xmlns:xsd="http://www.w3.org/2001/XMLSchema"
            targetNamespace="urn:ext">
  <xsd:import namespace="urn:core" schemaLocation="core.xsd"/>
  <xsd:element name="Ref">
    <xsd:complexType>
      <xsd:attribute name="Target" type="xsd:string" use="required"/>
    </xsd:complexType>
  </xsd:element>
  <xsd:element name="Image">
    <xsd:complexType>
      <xsd:attribute name="Other" type="xsd:int" use="prohibited"/>
    </xsd:complexType>
  </xsd:element>
</xsd:schema>
"#;

struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }
}

fn schema_text(namespace: &str, body: &str) -> String {
    format!(
        r#"<xsd:schema xmlns:xsd="http://www.w3.org/2001/XMLSchema" targetNamespace="{namespace}">{body}</xsd:schema>"#
    )
}

#[test]
fn core_and_extension_resolve_end_to_end() {
    let fixture = Fixture::new();
    let core = fixture.write("core.xsd", CORE);
    let ext = fixture.write("ext.xsd", EXT);

    let set = SchemaSet::new([&core, &ext]).unwrap().process().unwrap();

    let ext_schema = set.schema("urn:ext").unwrap();
    assert_eq!(ext_schema.filename(), ext.as_path());
    assert_eq!(ext_schema.imports().len(), 1);

    let image = set.element("Image").unwrap();
    assert_eq!(image.uri(&set), "urn:core");
    let id = &image.attribute_map()["ID"];
    assert_eq!(id.use_(), AttributeUse::Required);
    assert_eq!(id.use_().as_str(), "required");
    assert_eq!(id.attribute_type(), "xsd:string");
    assert_eq!(id.uri(&set), "urn:core");

    let reference = set.element("Ref").unwrap();
    assert_eq!(reference.uri(&set), "urn:ext");
    assert!(reference.attribute("Target").unwrap().is_required());
}

#[test]
fn same_named_elements_stay_visible_through_their_schema() {
    let fixture = Fixture::new();
    let core = fixture.write("core.xsd", CORE);
    let ext = fixture.write("ext.xsd", EXT);

    let set = SchemaSet::new([core, ext]).unwrap().process().unwrap();

    let global = set.element("Image").unwrap();
    assert!(global.attribute("ID").is_some());
    assert!(global.attribute("Other").is_none());

    let local = set
        .schema("urn:ext")
        .unwrap()
        .element("Image", &set)
        .unwrap();
    assert_eq!(local.uri(&set), "urn:ext");
    let other = local.attribute("Other").unwrap();
    assert_eq!(other.use_(), AttributeUse::Prohibited);
    assert_eq!(other.attribute_type(), "xsd:int");
}

#[test]
fn element_references_are_never_indexed() {
    let fixture = Fixture::new();
    let core = fixture.write("core.xsd", CORE);

    let set = SchemaSet::new([core]).unwrap().process().unwrap();

    // `core:Pixels` is referenced inside Image; only the top-level declaration exists.
    let names: Vec<_> = set.elements().map(|element| element.name()).collect();
    assert_eq!(names, vec!["Image", "Pixels"]);
    assert!(set.element("core:Pixels").is_err());
}

#[test]
fn distinct_namespaces_are_all_registered() {
    let fixture = Fixture::new();
    let uris = ["urn:one", "urn:two", "urn:three"];
    let files: Vec<_> = uris
        .iter()
        .enumerate()
        .map(|(i, uri)| fixture.write(&format!("s{i}.xsd"), &schema_text(uri, "")))
        .collect();

    let set = SchemaSet::new(&files).unwrap().process().unwrap();

    for uri in uris {
        assert_eq!(set.schema(uri).unwrap().uri(), uri);
    }
    assert_eq!(set.schemas().count(), 3);
    for uri in ["urn:four", "", "urn:one "] {
        assert!(matches!(
            set.schema(uri),
            Err(XsdError::SchemaNotFound { .. })
        ));
    }
}

#[test]
fn second_document_for_a_namespace_is_excluded() {
    let fixture = Fixture::new();
    let first = fixture.write(
        "first.xsd",
        &schema_text("urn:dup", r#"<xsd:element name="FromFirst"/>"#),
    );
    let second = fixture.write(
        "second.xsd",
        &schema_text("urn:dup", r#"<xsd:element name="FromSecond"/>"#),
    );

    let set = SchemaSet::new([&first, &second]).unwrap().process().unwrap();

    let schema = set.schema("urn:dup").unwrap();
    assert_eq!(schema.filename(), first.as_path());
    assert!(schema.element("FromFirst", &set).is_ok());
    assert!(set.element("FromSecond").is_err());
}

#[test]
fn unresolved_import_aborts_processing() {
    let fixture = Fixture::new();
    let ext = fixture.write("ext.xsd", EXT);

    let err = SchemaSet::new([&ext]).unwrap().process().unwrap_err();

    match err {
        XsdError::UnresolvedImport {
            namespace,
            filename,
        } => {
            assert_eq!(namespace.as_deref(), Some("urn:core"));
            assert_eq!(filename, ext);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn xml_namespace_import_needs_no_schema() {
    let fixture = Fixture::new();
    let core = fixture.write("core.xsd", CORE);

    let set = SchemaSet::new([core]).unwrap().process().unwrap();

    assert!(set.schema("http://www.w3.org/XML/1998/namespace").is_err());
    assert_eq!(set.imported_schemas("urn:core").unwrap().count(), 0);
}

#[test]
fn unreadable_file_fails_construction() {
    let fixture = Fixture::new();
    let core = fixture.write("core.xsd", CORE);
    let missing = fixture.dir.path().join("missing.xsd");

    let err = SchemaSet::new([core, missing.clone()]).unwrap_err();

    match err {
        XsdError::Parse { filename, source } => {
            assert_eq!(filename, missing);
            assert!(matches!(source, ParseError::Io(_)));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn malformed_markup_fails_construction() {
    let fixture = Fixture::new();
    let broken = fixture.write("broken.xsd", "<xsd:schema><unclosed></xsd:schema>");

    let err = SchemaSet::new([broken]).unwrap_err();

    assert!(matches!(
        err,
        XsdError::Parse {
            source: ParseError::Xml(_),
            ..
        }
    ));
}

#[test]
fn dtd_is_accepted_only_when_allowed() {
    let fixture = Fixture::new();
    let text = format!(
        "<!DOCTYPE xsd:schema>\n{}",
        schema_text("urn:dtd", r#"<xsd:element name="E"/>"#)
    );
    let path = fixture.write("dtd.xsd", &text);

    assert!(SchemaSet::new([&path]).is_err());

    let set = SchemaSet::with_options([&path], ReadOptions { allow_dtd: true })
        .unwrap()
        .process()
        .unwrap();
    assert!(set.element("E").is_ok());
}

#[test]
fn schema_without_target_namespace_fails_construction() {
    let fixture = Fixture::new();
    let path = fixture.write(
        "anonymous.xsd",
        r#"<xsd:schema xmlns:xsd="http://www.w3.org/2001/XMLSchema"/>"#,
    );

    let err = SchemaSet::new([&path]).unwrap_err();

    assert!(matches!(err, XsdError::MalformedSchema { filename, .. } if filename == path));
}

#[test]
fn error_messages_name_the_offender() {
    let fixture = Fixture::new();
    let path = fixture.write(
        "bad.xsd",
        &schema_text("urn:bad", r#"<xsd:import namespace="urn:nowhere"/>"#),
    );

    let err = SchemaSet::new([&path]).unwrap().process().unwrap_err();
    let message = err.to_string();

    assert!(message.contains("urn:nowhere"), "{message}");
    assert!(message.contains(&display(&path)), "{message}");
}

fn display(path: &Path) -> String {
    path.display().to_string()
}
