//! Raymarching Script - describe scenes as Rhai scripts
//!
//! ## Example Script
//!
//! ```rhai
//! let ball = sphere().scale(0.75);
//! let block = aabbox([1, 1, 1]).translate([2, 0, 0]);
//! let hole = cylinder(0.3, 2).rotate([1, 0, 0], deg(90));
//!
//! // Name the scene and pick its root
//! scene("Demo", difference(union(ball, block), hole));
//! ```
//!
//! Vector arguments take an array of numbers or GLSL expressions
//! (`[1, "sin(time)", 0]`), or a single string passed through as-is
//! (`"vec3(0.5)"`). Scalars likewise take a number or an expression.
//!
//! If `scene(...)` is never called, the script's last expression is used
//! as the root.

pub mod engine;
pub mod sdf_api;

mod error;

#[cfg(feature = "file-watcher")]
pub mod watcher;

pub use engine::{GeneratedScene, ScriptEngine};
pub use error::{Result, ScriptError};
pub use sdf_api::ScriptNode;

#[cfg(feature = "file-watcher")]
pub use watcher::{ScriptWatcher, WatchEvent};

// Re-export for convenience
pub use raymarching_sdf::{Registry, Scene, default_template};
