//! Scene nodes: identity, parameters, transform, and their GLSL emission

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use crate::glsl::VecExpr;
use crate::operators::Fold;
use crate::primitives;
use crate::{Registry, Result, Transform};

/// Name of the overloaded distance function in the generated shader
pub const SD_FUNC_NAME: &str = "sdist";

/// Stable identity of a node within one [`Registry`].
///
/// The index equals the node's position in creation order. The id also
/// remembers which registry issued it, so it never resolves in another one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId {
    pub(crate) registry: u64,
    pub(crate) index: usize,
}

impl NodeId {
    pub fn index(self) -> usize {
        self.index
    }

    /// GLSL type name of the node, `SDF<id>`
    pub fn struct_name(self) -> String {
        format!("SDF{}", self.index)
    }

    /// Key under which a parent operator stores this node
    pub fn parameter_key(self) -> String {
        format!("o{}", self.index)
    }

    /// Call of the distance function on this node through the parent's receiver
    pub(crate) fn distance_call(self) -> String {
        format!("{SD_FUNC_NAME}(p,o.{})", self.parameter_key())
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.index)
    }
}

/// A node parameter: a typed literal expression or a reference to another node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parameter {
    Literal { ty: String, expr: String },
    Child(NodeId),
}

impl Parameter {
    pub fn literal(ty: impl Into<String>, expr: impl Into<String>) -> Self {
        Self::Literal {
            ty: ty.into(),
            expr: expr.into(),
        }
    }

    /// Scalar `float` literal
    pub fn float(value: impl Display) -> Self {
        Self::literal("float", value.to_string())
    }

    /// GLSL type of the struct field holding this parameter
    pub fn glsl_type(&self) -> String {
        match self {
            Self::Literal { ty, .. } => ty.clone(),
            Self::Child(id) => id.struct_name(),
        }
    }
}

/// Parameters keyed by name; iteration order is lexicographic
pub type Parameters = BTreeMap<String, Parameter>;

/// What a node computes
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NodeKind {
    // Primitives
    Emptiness,
    Sphere,
    Plane,
    AABBox,
    Cylinder,

    // Operators
    Fold(Fold),
    Difference { minuend: NodeId, subtrahend: NodeId },
}

impl NodeKind {
    /// Human readable kind name, used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::Emptiness => "Emptiness",
            Self::Sphere => "Sphere",
            Self::Plane => "Plane",
            Self::AABBox => "AABBox",
            Self::Cylinder => "Cylinder",
            Self::Fold(fold) => fold.combine().operator_name(),
            Self::Difference { .. } => "Difference",
        }
    }
}

/// One registered SDF node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    id: NodeId,
    kind: NodeKind,
    parameters: Parameters,
    transform: Transform,
}

impl Node {
    pub(crate) fn new(id: NodeId, kind: NodeKind, parameters: Parameters) -> Self {
        Self {
            id,
            kind,
            parameters,
            transform: Transform::new(),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// GLSL struct name, `SDF<id>`
    pub fn struct_name(&self) -> String {
        self.id.struct_name()
    }

    /// GLSL statements computing the distance from the local point `p`,
    /// reading parameters through the receiver `o`
    pub fn distance_body(&self) -> String {
        match &self.kind {
            NodeKind::Emptiness => primitives::EMPTINESS_BODY.to_owned(),
            NodeKind::Sphere => primitives::SPHERE_BODY.to_owned(),
            NodeKind::Plane => primitives::PLANE_BODY.to_owned(),
            NodeKind::AABBox => primitives::AABBOX_BODY.to_owned(),
            NodeKind::Cylinder => primitives::CYLINDER_BODY.to_owned(),
            NodeKind::Fold(fold) => fold.distance_body(),
            NodeKind::Difference {
                minuend,
                subtrahend,
            } => crate::operators::difference_body(*minuend, *subtrahend),
        }
    }

    /// Type and distance function declaration, as an `SDFType` macro call
    pub fn declaration(&self) -> String {
        let mut code = format!("SDFType({},\n{{\n", self.struct_name());
        for (name, param) in &self.parameters {
            code.push_str(&format!("{} {};\n", param.glsl_type(), name));
        }
        code.push_str("Transform t;\n},\n{\n");
        code.push_str(&self.distance_body());
        code.push_str("\n})");
        code
    }

    /// Constructor expression for this node's struct.
    ///
    /// Child references expand to the child's own initialization, so the
    /// registry is needed to resolve them.
    pub fn initialization(&self, registry: &Registry) -> Result<String> {
        let mut code = format!("{}(", self.struct_name());
        for param in self.parameters.values() {
            match param {
                Parameter::Literal { expr, .. } => code.push_str(expr),
                Parameter::Child(child) => {
                    code.push_str(&registry.node(*child)?.initialization(registry)?);
                }
            }
            code.push_str(", ");
        }
        code.push_str(&format!("{})", self.transform));
        Ok(code)
    }

    // === Transform builders ===

    /// Move the node by `delta`, adding to any earlier translation
    pub fn translate(&mut self, delta: impl Into<VecExpr>) -> Result<&mut Self> {
        self.transform.translate(&delta.into())?;
        Ok(self)
    }

    /// Rotate around `axis` by `angle` radians, replacing any earlier rotation
    pub fn rotate(&mut self, axis: impl Into<VecExpr>, angle: impl Display) -> Result<&mut Self> {
        self.transform.rotate(&axis.into(), angle)?;
        Ok(self)
    }

    /// Set the rotation quaternion, replacing any earlier rotation
    pub fn rotate_quaternion(&mut self, q: impl Into<VecExpr>) -> Result<&mut Self> {
        self.transform.rotate_quaternion(&q.into())?;
        Ok(self)
    }

    /// Multiply the node's scale by `k`
    pub fn scale_by(&mut self, k: impl Display) -> &mut Self {
        self.transform.scale_by(k);
        self
    }
}
