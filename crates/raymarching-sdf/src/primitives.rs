//! Primitive leaf shapes
//!
//! All primitives are unit shapes in local space; size comes from the
//! node's parameters or its scale.

use std::fmt::Display;

use crate::glsl::VecExpr;
use crate::node::{Node, NodeKind, Parameter, Parameters};
use crate::{Registry, Result};

/// Never hit; the default scene root
pub(crate) const EMPTINESS_BODY: &str = "return INF;";

pub(crate) const SPHERE_BODY: &str = "return length(p) - 1.0;";

/// Infinite plane through the origin with normal +Y
pub(crate) const PLANE_BODY: &str = "return abs(p.y);";

pub(crate) const AABBOX_BODY: &str =
    "vec3 d = abs(p) - o.r; return min(max(d.x, max(d.y, d.z)), 0.0) + length(max(d, 0.0));";

/// Capped cylinder along Y
pub(crate) const CYLINDER_BODY: &str = "vec2 d = vec2(length(p.xz) - o.radius, abs(p.y) - o.height2); \
     return min(max(d.x, d.y), 0.0) + length(max(d, 0.0));";

impl Registry {
    /// Empty space: distance is always `INF`
    pub fn emptiness(&mut self) -> &mut Node {
        self.register(NodeKind::Emptiness, Parameters::new())
    }

    /// Unit sphere at the origin
    pub fn sphere(&mut self) -> &mut Node {
        self.register(NodeKind::Sphere, Parameters::new())
    }

    /// The `y = 0` plane
    pub fn plane(&mut self) -> &mut Node {
        self.register(NodeKind::Plane, Parameters::new())
    }

    /// Axis-aligned box with half-extents `r`
    pub fn aabbox(&mut self, r: impl Into<VecExpr>) -> Result<&mut Node> {
        let r = r.into().to_glsl(3)?;
        let parameters = Parameters::from([("r".to_owned(), Parameter::literal("vec3", r))]);
        Ok(self.register(NodeKind::AABBox, parameters))
    }

    /// Capped cylinder of `radius` with half-height `height2`
    pub fn cylinder(&mut self, radius: impl Display, height2: impl Display) -> &mut Node {
        let parameters = Parameters::from([
            ("radius".to_owned(), Parameter::float(radius)),
            ("height2".to_owned(), Parameter::float(height2)),
        ]);
        self.register(NodeKind::Cylinder, parameters)
    }
}
