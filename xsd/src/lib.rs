//! Multi-document model of XSD element and attribute declarations.
//!
//! A [`SchemaSet`] loads a list of schema documents, keys them by target namespace, checks that
//! every `xsd:import` names a namespace present in the set, and indexes every named element
//! declaration together with the attributes declared directly in its complex type.
//!
//! ```no_run
//! # fn main() -> Result<(), xsd_model::XsdError> {
//! let set = xsd_model::SchemaSet::new(["core.xsd", "ext.xsd"])?.process()?;
//! let image = set.element("Image")?;
//! println!("{} is declared in {}", image.name(), image.uri(&set));
//! # Ok(())
//! # }
//! ```

pub mod attribute;
pub mod element;
pub mod error;
pub mod import;
pub mod schema;
pub mod schema_set;
pub mod xml;
pub mod xstypes;

mod components;

pub use attribute::{Attribute, AttributeUse};
pub use components::{Component, ComponentTable, Ref};
pub use element::Element;
pub use error::{ParseError, Result, XsdError};
pub use import::Import;
pub use schema::Schema;
pub use schema_set::SchemaSet;
pub use xml::ReadOptions;
pub use xstypes::QName;
