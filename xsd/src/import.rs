use crate::xml::XmlNode;

/// This structure represents the `import` element; it is not a model component.
///
/// Note that an import is allowed to have neither a `schemaLocation` nor a `namespace` attribute.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Import {
    pub namespace: Option<String>,
    pub schema_location: Option<String>,
}

impl Import {
    pub const TAG_NAME: &'static str = "import";

    pub fn map_from_xml(import: &XmlNode) -> Self {
        Import {
            namespace: import.attribute("namespace").map(str::to_string),
            schema_location: import.attribute("schemaLocation").map(str::to_string),
        }
    }
}
