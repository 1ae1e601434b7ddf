use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use log::{debug, trace, warn};

use crate::components::{Component, Ref};
use crate::element::Element;
use crate::error::{Result, XsdError};
use crate::import::Import;
use crate::schema_set::SchemaSet;
use crate::xml::{ReadOptions, XmlDocument};
use crate::xstypes::{QName, XML_NAMESPACE, XSD_NAMESPACE};

/// One parsed schema document, identified by its target namespace.
#[derive(Clone, Debug)]
pub struct Schema {
    filename: PathBuf,
    target_namespace: String,
    document: XmlDocument,
    element_map: IndexMap<String, Ref<Element>>,
    imports: Vec<Import>,
    imported_schemas: Vec<Ref<Schema>>,
}

impl Component for Schema {
    const DISPLAY_NAME: &'static str = "Schema";
}

impl Schema {
    pub const TAG_NAME: &'static str = "schema";

    pub fn load(filename: impl AsRef<Path>, options: &ReadOptions) -> Result<Self> {
        let filename = filename.as_ref();
        let document = XmlDocument::load(filename, options).map_err(|source| XsdError::Parse {
            filename: filename.to_path_buf(),
            source,
        })?;
        Self::from_document(filename.to_path_buf(), document)
    }

    /// Parses an in-memory document. `filename` is only recorded for diagnostics.
    pub fn parse(filename: impl Into<PathBuf>, text: &str, options: &ReadOptions) -> Result<Self> {
        let filename = filename.into();
        match XmlDocument::parse(text, options) {
            Ok(document) => Self::from_document(filename, document),
            Err(source) => Err(XsdError::Parse { filename, source }),
        }
    }

    fn from_document(filename: PathBuf, document: XmlDocument) -> Result<Self> {
        let root = document.root_node();
        if !root.name().matches(Some(XSD_NAMESPACE), Self::TAG_NAME) {
            return Err(XsdError::MalformedSchema {
                filename,
                reason: format!("root element is {}, not xsd:schema", root.name()),
            });
        }
        let Some(target_namespace) = root.attribute("targetNamespace") else {
            return Err(XsdError::MalformedSchema {
                filename,
                reason: "missing targetNamespace attribute".to_string(),
            });
        };
        let target_namespace = target_namespace.to_string();
        debug!("Loaded schema {} ({target_namespace})", filename.display());

        Ok(Self {
            filename,
            target_namespace,
            document,
            element_map: IndexMap::new(),
            imports: Vec::new(),
            imported_schemas: Vec::new(),
        })
    }

    /// The target namespace; the key of this schema within its [`SchemaSet`].
    pub fn uri(&self) -> &str {
        &self.target_namespace
    }

    pub fn filename(&self) -> &Path {
        &self.filename
    }

    pub fn document(&self) -> &XmlDocument {
        &self.document
    }

    pub fn element_map(&self) -> &IndexMap<String, Ref<Element>> {
        &self.element_map
    }

    /// Looks up an element declared by this schema, regardless of whether it also made it into the
    /// set's global index.
    pub fn element<'s>(&self, name: &str, set: &'s SchemaSet) -> Result<&'s Element> {
        self.element_map
            .get(name)
            .map(|&element| element.get(set))
            .ok_or_else(|| XsdError::ElementNotFound {
                name: name.to_string(),
            })
    }

    pub fn elements<'s>(&'s self, set: &'s SchemaSet) -> impl Iterator<Item = &'s Element> + 's {
        self.element_map.values().map(move |&element| element.get(set))
    }

    /// Every `xsd:import` of this schema, filled in by [`Schema::process_imports`].
    pub fn imports(&self) -> &[Import] {
        &self.imports
    }

    /// The registered schemas this one imports. An exempted XML namespace import has no entry.
    pub fn imported_schemas(&self) -> &[Ref<Schema>] {
        &self.imported_schemas
    }

    /// Checks that every namespace imported by the schema is registered in `set`, with the
    /// exception of the XML namespace.
    pub fn process_imports(schema_ref: Ref<Schema>, set: &mut SchemaSet) -> Result<()> {
        let (imports, imported_schemas) = {
            let schema = set.schemas.get(schema_ref);
            schema.resolve_imports(set)?
        };

        let schema = set.schemas.get_mut(schema_ref);
        schema.imports = imports;
        schema.imported_schemas = imported_schemas;
        Ok(())
    }

    fn resolve_imports(&self, set: &SchemaSet) -> Result<(Vec<Import>, Vec<Ref<Schema>>)> {
        let document = &self.document;
        let import_tag = QName::xsd(Import::TAG_NAME);

        let mut imports = Vec::new();
        let mut imported_schemas = Vec::new();
        for import in document.children_named(document.root(), &import_tag) {
            let import = Import::map_from_xml(document.node(import));
            let unresolved = || XsdError::UnresolvedImport {
                namespace: import.namespace.clone(),
                filename: self.filename.clone(),
            };

            let namespace = import.namespace.as_deref().ok_or_else(unresolved)?;
            match set.schema_ref(namespace) {
                Ok(imported) => {
                    debug!("{} imports {namespace}", self.target_namespace);
                    imported_schemas.push(imported);
                }
                Err(_) if namespace == XML_NAMESPACE => {
                    trace!("{} imports the XML namespace", self.target_namespace);
                }
                Err(_) => return Err(unresolved()),
            }
            imports.push(import);
        }
        Ok((imports, imported_schemas))
    }

    /// Materializes every named `xsd:element` anywhere in the document. Element references
    /// (`ref`, no `name`) are not modelled.
    pub fn process_elements(schema_ref: Ref<Schema>, set: &mut SchemaSet) -> Result<()> {
        let declarations: Vec<_> = {
            let document = &set.schemas.get(schema_ref).document;
            let element_tag = QName::xsd(Element::TAG_NAME);
            document
                .descendants_named(document.root(), &element_tag)
                .filter_map(|id| match document.attribute(id, "name") {
                    Some(name) => Some((name.to_string(), id)),
                    None => {
                        trace!("Skipping element reference {:?}", document.attribute(id, "ref"));
                        None
                    }
                })
                .collect()
        };

        for (name, node) in declarations {
            Self::add_element(schema_ref, set, Element::new(schema_ref, name, node));
        }
        Ok(())
    }

    /// Runs [`Element::process_attributes`] for every element of this schema.
    pub fn process_attributes(schema_ref: Ref<Schema>, set: &mut SchemaSet) -> Result<()> {
        let elements: Vec<_> = set
            .schemas
            .get(schema_ref)
            .element_map
            .values()
            .copied()
            .collect();
        for element in elements {
            Element::process_attributes(element, set)?;
        }
        Ok(())
    }

    /// Adds `element` to this schema unless it already declares an element with that name, then
    /// offers it to the set's global index. Returns the new reference if the element was kept.
    pub fn add_element(
        schema_ref: Ref<Schema>,
        set: &mut SchemaSet,
        element: Element,
    ) -> Option<Ref<Element>> {
        let schema = set.schemas.get(schema_ref);
        if schema.element_map.contains_key(element.name()) {
            warn!(
                "Skipping duplicate element {:?} in {}",
                element.name(),
                schema.filename.display()
            );
            return None;
        }

        let name = element.name().to_string();
        let element_ref = set.elements.create(element);
        set.schemas
            .get_mut(schema_ref)
            .element_map
            .insert(name, element_ref);
        set.add_element(element_ref);
        Some(element_ref)
    }
}
