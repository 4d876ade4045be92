//! Raymarching SDF - scene trees compiled to GLSL
//!
//! Scenes are built from signed distance field primitives, combined with
//! boolean and blend operators, each node carrying its own translation,
//! rotation and scale. The tree is compiled into GLSL source for a
//! raymarching fragment shader; nothing is evaluated on the CPU.
//!
//! ## Key Types
//!
//! - [`Registry`] - Owns every node of one generation run and assigns ids
//! - [`Node`] - One primitive or operator with its parameters and [`Transform`]
//! - [`Scene`] - Selects a root and emits the full shader
//!
//! ## Example
//!
//! ```rust
//! use raymarching_sdf::{Registry, Scene, default_template};
//!
//! # fn main() -> raymarching_sdf::Result<()> {
//! let mut registry = Registry::new();
//! let ball = registry.sphere().id();
//! let crate_box = registry.aabbox([1, 1, 1])?.translate([2, 0, 0])?.id();
//! let root = registry.union([ball, crate_box])?.id();
//!
//! let mut scene = Scene::named("Demo").with_root(root);
//! let shader = scene.process(&mut registry, default_template())?;
//! assert!(shader.contains("SDFType(SDF2,"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Generated Code
//!
//! Every node `n` becomes a struct `SDF<n>` holding its parameters (sorted
//! by name) and a `Transform t`, plus an overload of `sdist(vec3 p, SDF<n> o)`.
//! Operators hold their children as struct fields named `o<child id>` and call
//! `sdist` on them. The scene itself is one nested constructor expression.

mod error;
mod glsl;
mod node;
mod operators;
mod primitives;
mod registry;
mod scene;
mod template;
mod transform;

pub use error::{Error, Result};
pub use glsl::{VecExpr, to_glsl_vec};
pub use node::{Node, NodeId, NodeKind, Parameter, Parameters, SD_FUNC_NAME};
pub use operators::{Combine, Fold, SMOOTH_K_PARAM};
pub use registry::Registry;
pub use scene::{Scene, SceneSource, UNNAMED_SCENE};
pub use template::{
    SDFTYPES_MACRO, SDSCENE_MACRO, default_template, merge_template, validate_template,
};
pub use transform::{DEFAULT_ROTATION, DEFAULT_SCALE, DEFAULT_TRANSLATION, Transform};
