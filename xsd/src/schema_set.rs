use std::path::{Path, PathBuf};

use indexmap::map::Entry;
use indexmap::IndexMap;
use log::{debug, info, warn};

use crate::components::{Arena, ComponentTable, Ref};
use crate::element::Element;
use crate::error::{Result, XsdError};
use crate::schema::Schema;
use crate::xml::ReadOptions;

/// All schemas of one resolution run, keyed by target namespace, plus a global index of elements
/// keyed by name.
///
/// A set goes through three phases: schemas are registered ([`SchemaSet::new`],
/// [`SchemaSet::add_schema`]), then [`SchemaSet::process`] resolves imports, elements and
/// attributes, after which the set is queried read-only. On every key collision the first
/// registrant wins.
#[derive(Debug, Default)]
pub struct SchemaSet {
    options: ReadOptions,

    pub(crate) schemas: Arena<Schema>,
    schema_map: IndexMap<String, Ref<Schema>>,

    pub(crate) elements: Arena<Element>,
    element_map: IndexMap<String, Ref<Element>>,

    /// Number of registered schemas (in registration order) that went through all three passes.
    processed: usize,
}

impl SchemaSet {
    /// Loads every file in order. Any unreadable or malformed document fails the whole set.
    pub fn new<P: AsRef<Path>>(filenames: impl IntoIterator<Item = P>) -> Result<Self> {
        Self::with_options(filenames, ReadOptions::default())
    }

    pub fn with_options<P: AsRef<Path>>(
        filenames: impl IntoIterator<Item = P>,
        options: ReadOptions,
    ) -> Result<Self> {
        let mut set = Self::empty(options);
        for filename in filenames {
            set.add_schema(filename)?;
        }
        Ok(set)
    }

    pub fn empty(options: ReadOptions) -> Self {
        Self {
            options,
            ..Default::default()
        }
    }

    pub fn options(&self) -> &ReadOptions {
        &self.options
    }

    /// Parses `filename` and registers it unless its target namespace is already taken, in which
    /// case the new schema is discarded and `None` is returned.
    pub fn add_schema(&mut self, filename: impl AsRef<Path>) -> Result<Option<Ref<Schema>>> {
        let schema = Schema::load(filename, &self.options)?;
        Ok(self.register(schema))
    }

    /// Like [`SchemaSet::add_schema`] for a document already held in memory.
    pub fn add_schema_str(
        &mut self,
        filename: impl Into<PathBuf>,
        text: &str,
    ) -> Result<Option<Ref<Schema>>> {
        let schema = Schema::parse(filename, text, &self.options)?;
        Ok(self.register(schema))
    }

    fn register(&mut self, schema: Schema) -> Option<Ref<Schema>> {
        match self.schema_map.entry(schema.uri().to_string()) {
            Entry::Occupied(existing) => {
                warn!(
                    "Skipping {} ({}): schema already registered as {}",
                    schema.filename().display(),
                    schema.uri(),
                    self.schemas.get(*existing.get()).filename().display()
                );
                None
            }
            Entry::Vacant(vacant) => {
                let schema_ref = self.schemas.create(schema);
                vacant.insert(schema_ref);
                Some(schema_ref)
            }
        }
    }

    /// Runs the import, element and attribute passes. Each pass completes for every schema before
    /// the next one starts.
    ///
    /// The set is consumed so that a failed run never leaves a half-resolved model behind. Schemas
    /// registered after a successful run are processed by the next call; already processed ones
    /// are not touched again.
    pub fn process(mut self) -> Result<Self> {
        let pending: Vec<_> = self.schema_map.values().skip(self.processed).copied().collect();
        if pending.is_empty() {
            return Ok(self);
        }

        debug!("Processing imports of {} schemas", pending.len());
        for &schema in &pending {
            Schema::process_imports(schema, &mut self)?;
        }
        debug!("Processing elements of {} schemas", pending.len());
        for &schema in &pending {
            Schema::process_elements(schema, &mut self)?;
        }
        debug!("Processing attributes of {} schemas", pending.len());
        for &schema in &pending {
            Schema::process_attributes(schema, &mut self)?;
        }

        self.processed = self.schema_map.len();
        Ok(self)
    }

    /// Whether every registered schema has been processed.
    pub fn is_processed(&self) -> bool {
        self.processed == self.schema_map.len()
    }

    pub fn schema(&self, uri: &str) -> Result<&Schema> {
        self.schema_ref(uri).map(|schema| self.schemas.get(schema))
    }

    pub fn schema_ref(&self, uri: &str) -> Result<Ref<Schema>> {
        self.schema_map
            .get(uri)
            .copied()
            .ok_or_else(|| XsdError::SchemaNotFound {
                uri: uri.to_string(),
            })
    }

    /// Registered schemas in registration order.
    pub fn schemas(&self) -> impl Iterator<Item = &Schema> {
        self.schema_map
            .values()
            .map(|&schema| self.schemas.get(schema))
    }

    pub fn schema_map(&self) -> &IndexMap<String, Ref<Schema>> {
        &self.schema_map
    }

    /// The schemas imported by the schema registered under `uri`.
    pub fn imported_schemas(&self, uri: &str) -> Result<impl Iterator<Item = &Schema>> {
        let schema = self.schema(uri)?;
        Ok(schema
            .imported_schemas()
            .iter()
            .map(|&imported| self.schemas.get(imported)))
    }

    /// Looks up an element in the global index, which holds the first element of each name across
    /// all schemas.
    pub fn element(&self, name: &str) -> Result<&Element> {
        self.element_map
            .get(name)
            .map(|&element| self.elements.get(element))
            .ok_or_else(|| XsdError::ElementNotFound {
                name: name.to_string(),
            })
    }

    /// Globally indexed elements in registration order.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.element_map
            .values()
            .map(|&element| self.elements.get(element))
    }

    pub fn element_map(&self) -> &IndexMap<String, Ref<Element>> {
        &self.element_map
    }

    /// Offers `element` to the global index. Returns `false` if an element of that name is
    /// already indexed; the element then stays reachable through its own schema only.
    pub fn add_element(&mut self, element_ref: Ref<Element>) -> bool {
        let element = self.elements.get(element_ref);
        match self.element_map.entry(element.name().to_string()) {
            Entry::Occupied(existing) => {
                let existing = self.elements.get(*existing.get());
                info!(
                    "Element {:?} of {} is shadowed in the global index by the one in {}",
                    element.name(),
                    self.schemas.get(element.schema()).uri(),
                    self.schemas.get(existing.schema()).uri()
                );
                false
            }
            Entry::Vacant(vacant) => {
                vacant.insert(element_ref);
                true
            }
        }
    }
}

impl ComponentTable<Schema> for SchemaSet {
    fn get(&self, ref_: Ref<Schema>) -> &Schema {
        self.schemas.get(ref_)
    }
}

impl ComponentTable<Element> for SchemaSet {
    fn get(&self, ref_: Ref<Element>) -> &Element {
        self.elements.get(ref_)
    }
}
