//! Per-node rigid transform and uniform scale, kept as GLSL expression text
//!
//! Nothing here is evaluated numerically. Each field holds the source text
//! the shader will compute, and composition builds bigger expressions.

use std::fmt::{self, Display};

use crate::glsl::VecExpr;
use crate::Result;

/// Translation emitted when a node was never translated
pub const DEFAULT_TRANSLATION: &str = "vec3(0, 0, 0)";
/// Identity quaternion
pub const DEFAULT_ROTATION: &str = "vec4(0, 0, 0, 1)";
/// Unit scale
pub const DEFAULT_SCALE: &str = "1";

/// Translation, rotation (as a quaternion) and scale expressions.
///
/// Unset fields emit the identity defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transform {
    translation: Option<String>,
    rotation: Option<String>,
    scale: Option<String>,
}

impl Transform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Translation expression, or the zero vector
    pub fn translation(&self) -> &str {
        self.translation.as_deref().unwrap_or(DEFAULT_TRANSLATION)
    }

    /// Rotation quaternion expression, or the identity quaternion
    pub fn rotation(&self) -> &str {
        self.rotation.as_deref().unwrap_or(DEFAULT_ROTATION)
    }

    /// Scale expression, or `1`
    pub fn scale(&self) -> &str {
        self.scale.as_deref().unwrap_or(DEFAULT_SCALE)
    }

    /// True when no transform was ever applied
    pub fn is_identity(&self) -> bool {
        self.translation.is_none() && self.rotation.is_none() && self.scale.is_none()
    }

    /// Accumulate a translation: `(old + delta)`, or just `delta` the first time
    pub fn translate(&mut self, delta: &VecExpr) -> Result<&mut Self> {
        let delta = delta.to_glsl(3)?;
        self.translation = Some(match self.translation.take() {
            Some(old) => format!("({old} + {delta})"),
            None => delta,
        });
        Ok(self)
    }

    /// Rotate by `angle` radians around `axis`.
    ///
    /// Replaces any earlier rotation, see [`Transform::rotate_quaternion`].
    pub fn rotate(&mut self, axis: &VecExpr, angle: impl Display) -> Result<&mut Self> {
        let axis = axis.to_glsl(3)?;
        let q = format!(
            "vec4(normalize({axis}) * sin(({angle}) / 2.0), cos(({angle}) / 2.0))"
        );
        self.rotate_quaternion(&VecExpr::Expr(q))
    }

    /// Set the rotation quaternion.
    ///
    /// Overwrites the previous rotation instead of multiplying quaternions.
    pub fn rotate_quaternion(&mut self, q: &VecExpr) -> Result<&mut Self> {
        // TODO: compose with the existing rotation via quaternion product once
        // the template ships a qmul helper.
        self.rotation = Some(q.to_glsl(4)?);
        Ok(self)
    }

    /// Accumulate a uniform scale: `(old * (k))`
    pub fn scale_by(&mut self, k: impl Display) -> &mut Self {
        let old = self.scale.take().unwrap_or_else(|| DEFAULT_SCALE.to_owned());
        self.scale = Some(format!("({old} * ({k}))"));
        self
    }
}

/// GLSL constructor call, fields in (rotation, translation, scale) order
impl Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Transform({}, {}, {})",
            self.rotation(),
            self.translation(),
            self.scale()
        )
    }
}
