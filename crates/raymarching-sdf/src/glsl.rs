//! Conversion of vector arguments into GLSL expression text

use std::fmt::Display;

use crate::{Error, Result};

/// A vector argument: either a ready GLSL expression or a list of
/// scalar expressions to be wrapped in a `vecN(...)` constructor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VecExpr {
    /// Passed through unchanged, e.g. `"vec3(1.0)"` or `"u_offset"`
    Expr(String),
    /// Scalar component expressions in order
    Components(Vec<String>),
}

impl VecExpr {
    /// Build from any sequence of displayable scalars
    pub fn components<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Display,
    {
        Self::Components(values.into_iter().map(|v| v.to_string()).collect())
    }

    /// Render as GLSL text for a `vec{n}` slot
    pub fn to_glsl(&self, n: usize) -> Result<String> {
        to_glsl_vec(self, n)
    }
}

impl From<&str> for VecExpr {
    fn from(value: &str) -> Self {
        Self::Expr(value.to_owned())
    }
}

impl From<String> for VecExpr {
    fn from(value: String) -> Self {
        Self::Expr(value)
    }
}

impl<T: Display, const N: usize> From<[T; N]> for VecExpr {
    fn from(values: [T; N]) -> Self {
        Self::components(values)
    }
}

impl<T: Display> From<Vec<T>> for VecExpr {
    fn from(values: Vec<T>) -> Self {
        Self::components(values)
    }
}

impl<T: Display> From<&[T]> for VecExpr {
    fn from(values: &[T]) -> Self {
        Self::components(values)
    }
}

/// Convert a vector argument into GLSL `vec{n}` text.
///
/// Expression strings pass through untouched. Component lists must hold
/// exactly `n` values, or a single value which GLSL splats.
pub fn to_glsl_vec(value: &VecExpr, n: usize) -> Result<String> {
    if !(2..=4).contains(&n) {
        return Err(Error::BadVectorDimension(n));
    }
    match value {
        VecExpr::Expr(expr) => Ok(expr.clone()),
        VecExpr::Components(components) => {
            if components.len() != n && components.len() != 1 {
                return Err(Error::VectorLength {
                    expected: n,
                    found: components.len(),
                });
            }
            Ok(format!("vec{n}({})", components.join(", ")))
        }
    }
}
