//! Request schema resolution
//!
//! Declarative field specifications plus the pure resolver that computes the
//! active field set for a tool from the values collected so far.

pub mod field;
pub mod resolver;

pub use field::{Dependency, FieldKind, FieldSpec};
pub use resolver::{active_fields, collect, validate};
