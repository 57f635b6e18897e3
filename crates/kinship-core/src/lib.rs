//! Kinship Core - Genealogical graph and relationship engine
//!
//! People are stored as nodes in a flat arena with parent, child and side
//! (partner) links. [`FamilyTree`] owns the arena, enforces identity
//! uniqueness and the family rules (one mother, one father, one partner),
//! and derives relationships such as siblings, cousins and lineages by
//! traversing the links.

pub mod error;
pub mod limits;
pub mod node;
pub mod person;
pub mod query;
pub mod traversal;
pub mod tree;

pub use error::{Error, Result};
pub use limits::ValidationError;
pub use node::{LinkKind, LinkOutcome, Node, NodeArena, NodeId, UnlinkOutcome};
pub use person::{Person, PersonKey};
pub use query::{generation_prefix, PersonDetails, QueryKind, Relative, RelativeQuery, Role};
pub use tree::{FamilyTree, ParentRole};
