use std::fmt;

pub type NCName = String;
pub type AnyURI = String;

/// Namespace of the XML Schema vocabulary (`xsd:` / `xs:` prefix).
pub const XSD_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema";

/// The namespace bound to the `xml` prefix. Imports of it never need a registered schema.
pub const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// An expanded name: optional namespace name plus local name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct QName {
    pub namespace_name: Option<AnyURI>,
    pub local_name: NCName,
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(namespace_name) = self.namespace_name.as_ref() {
            write!(f, "{{{}}}{}", namespace_name, self.local_name)
        } else {
            write!(f, "{}", self.local_name)
        }
    }
}

impl QName {
    pub fn with_namespace(
        namespace_name: impl Into<String>,
        local_name: impl Into<String>,
    ) -> Self {
        Self::with_optional_namespace(Some(namespace_name), local_name)
    }

    pub fn with_optional_namespace(
        namespace_name: Option<impl Into<String>>,
        local_name: impl Into<String>,
    ) -> Self {
        Self {
            namespace_name: namespace_name.map(Into::into),
            local_name: local_name.into(),
        }
    }

    pub fn local(local_name: impl Into<String>) -> Self {
        Self {
            namespace_name: None,
            local_name: local_name.into(),
        }
    }

    /// Name of an element in the XML Schema vocabulary, e.g. `xsd("element")`.
    pub fn xsd(local_name: impl Into<String>) -> Self {
        Self::with_namespace(XSD_NAMESPACE, local_name)
    }

    pub fn matches(&self, namespace_name: Option<&str>, local_name: &str) -> bool {
        self.namespace_name.as_deref() == namespace_name && self.local_name == local_name
    }
}
