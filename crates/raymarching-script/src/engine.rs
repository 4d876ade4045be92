//! Script engine for evaluating Rhai scripts that describe scenes

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use raymarching_sdf::{Registry, Scene};
use rhai::{Dynamic, Engine};
use tracing::{debug, warn};

use crate::sdf_api::{RunState, ScriptNode, SharedState, register_sdf_api};
use crate::{Result, ScriptError};

/// A scene produced by one script evaluation, with the nodes it created
#[derive(Debug)]
pub struct GeneratedScene {
    pub registry: Registry,
    pub scene: Scene,
}

impl GeneratedScene {
    /// Scene name, or "Unnamed scene"
    pub fn name(&self) -> &str {
        self.scene.display_name()
    }

    /// Emit the full shader from `template`
    pub fn process(&mut self, template: &str) -> Result<String> {
        Ok(self.scene.process(&mut self.registry, template)?)
    }
}

/// Script engine with the SDF API registered.
///
/// Each evaluation starts with an empty registry, so node ids always count
/// from zero and earlier runs never leak into later ones.
pub struct ScriptEngine {
    engine: Engine,
    state: SharedState,
}

impl ScriptEngine {
    pub fn new() -> Self {
        let mut engine = Engine::new();
        let state: SharedState = Rc::new(RefCell::new(RunState::default()));

        register_sdf_api(&mut engine, &state);

        // Configure engine for better errors
        engine.set_max_expr_depths(64, 64);

        Self { engine, state }
    }

    /// Evaluate a script and collect the scene it describes.
    ///
    /// The root is the node passed to `scene(...)`, or else the value of the
    /// script's last expression. A script selecting neither yields a scene
    /// without root, which renders as empty space.
    pub fn eval_scene(&self, script: &str) -> Result<GeneratedScene> {
        *self.state.borrow_mut() = RunState::default();

        let result: std::result::Result<Dynamic, _> = self.engine.eval(script);
        let RunState { registry, scene } = std::mem::take(&mut *self.state.borrow_mut());
        let result = result.map_err(|e| ScriptError::Eval(e.to_string()))?;

        let mut scene = scene.unwrap_or_default();
        if scene.root().is_none() {
            match result.try_cast::<ScriptNode>() {
                Some(node) => scene.set_root(node.id()),
                None => warn!("Script selected no root shape; the scene will be empty"),
            }
        }

        debug!(
            "Script built {} nodes for '{}'",
            registry.len(),
            scene.display_name()
        );
        Ok(GeneratedScene { registry, scene })
    }

    /// Evaluate a script file
    pub fn eval_scene_file(&self, path: &Path) -> Result<GeneratedScene> {
        let script = std::fs::read_to_string(path).map_err(|source| ScriptError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.eval_scene(&script)
    }

    /// Compile a script to check for syntax errors without running it
    pub fn compile(&self, script: &str) -> Result<()> {
        self.engine
            .compile(script)
            .map_err(|e| ScriptError::Compile(e.to_string()))?;
        Ok(())
    }
}

impl Default for ScriptEngine {
    fn default() -> Self {
        Self::new()
    }
}
