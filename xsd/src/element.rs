use indexmap::IndexMap;
use log::{trace, warn};

use crate::attribute::Attribute;
use crate::components::{Component, Ref};
use crate::error::{Result, XsdError};
use crate::schema::Schema;
use crate::schema_set::SchemaSet;
use crate::xml::NodeId;
use crate::xstypes::QName;

/// A named element declaration and the attributes declared directly in its complex type.
#[derive(Clone, Debug)]
pub struct Element {
    schema: Ref<Schema>,
    name: String,
    node: NodeId,
    attribute_map: IndexMap<String, Attribute>,
}

impl Component for Element {
    const DISPLAY_NAME: &'static str = "Element";
}

impl Element {
    pub const TAG_NAME: &'static str = "element";

    pub(crate) fn new(schema: Ref<Schema>, name: String, node: NodeId) -> Self {
        Self {
            schema,
            name,
            node,
            attribute_map: IndexMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The schema whose document declares this element.
    pub fn schema(&self) -> Ref<Schema> {
        self.schema
    }

    /// The declaration node inside the owning schema's document.
    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn attribute_map(&self) -> &IndexMap<String, Attribute> {
        &self.attribute_map
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attribute_map.get(name)
    }

    /// Attributes in declaration order.
    pub fn attributes(&self) -> impl Iterator<Item = &Attribute> {
        self.attribute_map.values()
    }

    pub fn uri<'s>(&self, set: &'s SchemaSet) -> &'s str {
        self.schema.get(set).uri()
    }

    /// Inserts `attribute` unless one with the same name is already present. Returns whether the
    /// attribute was added.
    pub fn add_attribute(&mut self, attribute: Attribute) -> bool {
        if self.attribute_map.contains_key(attribute.name()) {
            return false;
        }
        self.attribute_map.insert(attribute.name().to_string(), attribute);
        true
    }

    /// Reads the `complexType/attribute` children of the declaration and adds them to the
    /// element. Attribute references (`ref`, no `name`) are not modelled.
    pub fn process_attributes(element_ref: Ref<Element>, set: &mut SchemaSet) -> Result<()> {
        let attributes = {
            let element = set.elements.get(element_ref);
            let schema = set.schemas.get(element.schema);
            element.read_attributes(element_ref, schema)?
        };

        let element = set.elements.get_mut(element_ref);
        for attribute in attributes {
            let name = attribute.name().to_string();
            if !element.add_attribute(attribute) {
                warn!("Skipping duplicate attribute {name:?} of element {:?}", element.name);
            }
        }
        Ok(())
    }

    fn read_attributes(&self, self_ref: Ref<Element>, schema: &Schema) -> Result<Vec<Attribute>> {
        let document = schema.document();
        let path = [QName::xsd("complexType"), QName::xsd(Attribute::TAG_NAME)];

        let mut attributes = Vec::new();
        for attribute_id in document.find_path(self.node, &path) {
            let node = document.node(attribute_id);
            let Some(name) = node.attribute("name") else {
                if node.has_attribute("ref") {
                    trace!("Skipping attribute reference in element {:?}", self.name);
                    continue;
                }
                return Err(XsdError::MalformedAttribute {
                    filename: schema.filename().to_path_buf(),
                    element: self.name.clone(),
                    attribute: None,
                    missing: "name",
                });
            };
            trace!("Reading attribute {name:?} of element {:?}", self.name);
            attributes.push(Attribute::map_from_xml(
                self_ref,
                name.to_string(),
                node,
                &self.name,
                schema.filename(),
            )?);
        }
        Ok(attributes)
    }
}
