//! Error types.
//!
//! Construction-time failures (bindings, tree shape) are [`SceneError`]s and
//! abort before the first frame. Runtime layout anomalies never surface as
//! errors; they are reported as [`LayoutDiagnostic`]s and the frame goes on.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T, E = SceneError> = std::result::Result<T, E>;

/// Fatal errors raised while building or driving a scene.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SceneError {
    /// A `bind`/`model`/`sync` attribute names a state entry that does not exist.
    #[error("node `{node_id}` binds to unknown state `{name}`")]
    UnknownBindingTarget { node_id: String, name: String },

    /// Appending the node would make it its own ancestor.
    #[error("node `{node_id}` would create a cycle in the scene tree")]
    CyclicTree { node_id: String },

    /// Two nodes share the same id.
    #[error("duplicate node id `{0}`")]
    DuplicateNodeId(String),

    /// A second binding was declared for the same (node, slot) pair.
    #[error("node `{node_id}` already has a binding for slot `{slot}`")]
    DuplicateBinding { node_id: String, slot: String },

    /// A binding attribute whose value is not a state name.
    #[error("node `{node_id}` has a malformed binding attribute `{attribute}`")]
    InvalidBindingAttribute { node_id: String, attribute: String },

    /// An event or lookup referenced a node id that is not in the tree.
    #[error("unknown node `{0}`")]
    UnknownNode(String),

    /// The tree has no root node.
    #[error("scene tree is empty")]
    EmptyTree,
}

/// Failure reported by the renderer's measure callback.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("measure failed: {0}")]
pub struct MeasureError(pub String);

impl MeasureError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}

/// Recoverable anomaly found during a layout pass.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutDiagnostic {
    /// A numeric layout property was malformed or negative and was clamped.
    InvalidLayoutProperty {
        node_id: String,
        property: String,
        raw: String,
        clamped_to: f32,
    },
    /// The measure callback failed; the leaf was sized as zero for this pass.
    MeasureFailure { node_id: String, reason: String },
}

impl LayoutDiagnostic {
    /// Id of the node the diagnostic refers to.
    pub fn node_id(&self) -> &str {
        match self {
            Self::InvalidLayoutProperty { node_id, .. } | Self::MeasureFailure { node_id, .. } => {
                node_id
            }
        }
    }
}
