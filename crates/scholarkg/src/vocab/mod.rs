//! The fixed bibliographic schema: classes, properties and TBOX generation.
//!
//! The instance engine only ever uses names declared here.

mod class;
mod property;
mod tbox;

pub use class::EntityClass;
pub use property::{DatatypeProperty, LiteralType, ObjectProperty, parse_bool};
pub use tbox::{assert_schema, schema_graph};
