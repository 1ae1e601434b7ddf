//! Owned XML element tree.
//!
//! `roxmltree` documents borrow their source text, which would make every schema generic over the
//! lifetime of its file contents. Documents are therefore parsed with `roxmltree` and immediately
//! copied into an arena of element nodes that a [`Schema`](crate::Schema) can own outright.

use std::collections::HashMap;
use std::path::Path;

use crate::error::ParseError;
use crate::xstypes::QName;

/// Options handed to the XML parser for every document of a set.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ReadOptions {
    /// Allow a Document Type Definition (DTD) to occur.
    pub allow_dtd: bool,
}

impl ReadOptions {
    fn parsing_options(&self) -> roxmltree::ParsingOptions {
        roxmltree::ParsingOptions {
            allow_dtd: self.allow_dtd,
            ..Default::default()
        }
    }
}

/// Index of an element node inside its [`XmlDocument`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Clone, Debug)]
pub struct XmlNode {
    name: QName,
    attributes: Vec<(QName, String)>,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
}

impl XmlNode {
    pub fn name(&self) -> &QName {
        &self.name
    }

    /// Value of the unqualified attribute `local_name`, which is how XSD spells all of its own
    /// attributes (`name`, `type`, `use`, `targetNamespace`, ...).
    pub fn attribute(&self, local_name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(name, _)| name.matches(None, local_name))
            .map(|(_, value)| value.as_str())
    }

    pub fn has_attribute(&self, local_name: &str) -> bool {
        self.attribute(local_name).is_some()
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }
}

/// A parsed document, reduced to its element nodes. Text, comments and processing instructions
/// carry nothing the schema model needs and are dropped.
#[derive(Clone, Debug)]
pub struct XmlDocument {
    nodes: Vec<XmlNode>,
}

impl XmlDocument {
    pub fn load(path: impl AsRef<Path>, options: &ReadOptions) -> Result<Self, ParseError> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text, options)
    }

    pub fn parse(text: &str, options: &ReadOptions) -> Result<Self, ParseError> {
        let document = roxmltree::Document::parse_with_options(text, options.parsing_options())?;
        Ok(Self::from_roxmltree(&document))
    }

    fn from_roxmltree(document: &roxmltree::Document) -> Self {
        let mut nodes: Vec<XmlNode> = Vec::new();
        let mut ids = HashMap::new();

        // `descendants()` is pre-order, so a parent is always converted before its children.
        for node in document.root_element().descendants().filter(|n| n.is_element()) {
            let id = NodeId(nodes.len());
            ids.insert(node.id(), id);

            let parent = node
                .parent_element()
                .and_then(|parent| ids.get(&parent.id()).copied());
            if let Some(parent) = parent {
                nodes[parent.0].children.push(id);
            }

            let tag_name = node.tag_name();
            nodes.push(XmlNode {
                name: QName::with_optional_namespace(tag_name.namespace(), tag_name.name()),
                attributes: node
                    .attributes()
                    .map(|attribute| {
                        (
                            QName::with_optional_namespace(attribute.namespace(), attribute.name()),
                            attribute.value().to_string(),
                        )
                    })
                    .collect(),
                children: Vec::new(),
                parent,
            });
        }

        Self { nodes }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn root_node(&self) -> &XmlNode {
        self.node(self.root())
    }

    pub fn node(&self, id: NodeId) -> &XmlNode {
        &self.nodes[id.0]
    }

    /// Value of the unqualified attribute `local_name` on node `id`.
    pub fn attribute(&self, id: NodeId, local_name: &str) -> Option<&str> {
        self.node(id).attribute(local_name)
    }

    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.node(id).children.iter().copied()
    }

    /// Direct children of `id` whose tag is `name`.
    pub fn children_named<'a>(
        &'a self,
        id: NodeId,
        name: &'a QName,
    ) -> impl Iterator<Item = NodeId> + 'a {
        self.children(id).filter(move |&c| self.node(c).name == *name)
    }

    /// All nodes below `id` (at any depth, `id` itself excluded), in document order.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        let mut stack = self.node(id).children.clone();
        stack.reverse();
        Descendants {
            document: self,
            stack,
        }
    }

    /// Nodes below `id` (at any depth) whose tag is `name`, in document order.
    pub fn descendants_named<'a>(
        &'a self,
        id: NodeId,
        name: &'a QName,
    ) -> impl Iterator<Item = NodeId> + 'a {
        self.descendants(id).filter(move |&d| self.node(d).name == *name)
    }

    /// Follows a path of tag names from `id`, one level per step, yielding every match of the
    /// last step.
    pub fn find_path(&self, id: NodeId, path: &[QName]) -> Vec<NodeId> {
        let mut current = vec![id];
        for step in path {
            current = current
                .into_iter()
                .flat_map(|node| self.children_named(node, step).collect::<Vec<_>>())
                .collect();
        }
        current
    }
}

/// Depth-first iterator returned by [`XmlDocument::descendants`].
pub struct Descendants<'a> {
    document: &'a XmlDocument,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let next = self.stack.pop()?;
        self.stack.extend(self.document.node(next).children.iter().rev().copied());
        Some(next)
    }
}
