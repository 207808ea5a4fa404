//! Scene engine - nodes, properties and the node tree.
//!
//! The engine manages the core data structures:
//! - Props: tagged property values in declaration order
//! - Node: identity, properties, content, geometry, dirty flags
//! - NodeTree: arena of nodes with id mapping and dirty propagation
//!
//! # Architecture
//!
//! Nodes are NOT linked objects. They are indices into one arena:
//!
//! ```text
//! Index 0: app    (parent=None, children=[1, 2])
//! Index 1: text   (parent=0)
//! Index 2: column (parent=0, children=[3])
//! Index 3: input  (parent=2)
//! ```
//!
//! The parent index is a non-owning back reference, used to walk upward when
//! a change must dirty every ancestor.

mod node;
mod props;
mod tree;

pub use node::{Content, MutationHook, Node, Slot};
pub use props::{PropValue, Props};
pub use tree::NodeTree;
