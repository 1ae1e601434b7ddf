use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::components::Ref;
use crate::element::Element;
use crate::error::{Result, XsdError};
use crate::schema_set::SchemaSet;
use crate::xml::XmlNode;

/// The `use` of an attribute declaration.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AttributeUse {
    Required,
    Optional,
    Prohibited,
}

impl AttributeUse {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Optional => "optional",
            Self::Prohibited => "prohibited",
        }
    }
}

impl FromStr for AttributeUse {
    type Err = ();

    fn from_str(src: &str) -> std::result::Result<Self, ()> {
        match src {
            "required" => Ok(Self::Required),
            "optional" => Ok(Self::Optional),
            "prohibited" => Ok(Self::Prohibited),
            _ => Err(()),
        }
    }
}

impl fmt::Display for AttributeUse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One attribute declaration found in the complex type of an [`Element`].
#[derive(Clone, Debug)]
pub struct Attribute {
    element: Ref<Element>,
    name: String,
    attribute_type: String,
    use_: AttributeUse,
}

impl Attribute {
    pub const TAG_NAME: &'static str = "attribute";

    /// Reads `type` and `use` from the declaration `node`. Both are mandatory here even though
    /// XSD itself would default `use` to `optional`.
    pub fn map_from_xml(
        element: Ref<Element>,
        name: String,
        node: &XmlNode,
        element_name: &str,
        filename: &Path,
    ) -> Result<Self> {
        let malformed = |missing| XsdError::MalformedAttribute {
            filename: filename.to_path_buf(),
            element: element_name.to_string(),
            attribute: Some(name.clone()),
            missing,
        };

        let attribute_type = node.attribute("type").ok_or_else(|| malformed("type"))?;
        let use_ = node
            .attribute("use")
            .ok_or_else(|| malformed("use"))?
            .parse::<AttributeUse>()
            .map_err(|()| malformed("use"))?;

        Ok(Self {
            element,
            attribute_type: attribute_type.to_string(),
            use_,
            name,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The type reference exactly as declared, e.g. `xsd:string` or `core:LSID`.
    pub fn attribute_type(&self) -> &str {
        &self.attribute_type
    }

    pub fn use_(&self) -> AttributeUse {
        self.use_
    }

    pub fn is_required(&self) -> bool {
        self.use_ == AttributeUse::Required
    }

    /// The element whose complex type declares this attribute.
    pub fn element(&self) -> Ref<Element> {
        self.element
    }

    pub fn uri<'s>(&self, set: &'s SchemaSet) -> &'s str {
        self.element.get(set).uri(set)
    }
}
