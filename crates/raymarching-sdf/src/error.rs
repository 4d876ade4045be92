//! Error types for scene construction and shader generation

use thiserror::Error;

use crate::NodeId;

/// Result type alias using the generator's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building a scene or emitting its shader
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// GLSL only has 2, 3 and 4 component vectors
    #[error("Bad GLSL vector dimension {0}. GLSL supports only 2, 3 and 4.")]
    BadVectorDimension(usize),

    /// Component list does not fit the requested vector type
    #[error("Cannot build vec{expected} from {found} components")]
    VectorLength { expected: usize, found: usize },

    /// Value is neither an expression string nor a component sequence
    #[error("Cannot convert '{0}' to a GLSL vector")]
    NotAVector(String),

    /// N-ary operator given fewer than two operands
    #[error("{operator} needs at least 2 operands, got {found}")]
    TooFewOperands {
        operator: &'static str,
        found: usize,
    },

    /// Node id does not belong to this registry
    #[error("Unknown node {0}")]
    UnknownNode(NodeId),

    /// Shader template is missing a substitution point
    #[error("Invalid template: {0}")]
    Template(String),
}
