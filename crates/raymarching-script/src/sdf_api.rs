//! Rhai API for SDF primitives, operators and transforms
//!
//! Every function forwards to the run's [`Registry`], so script-built nodes
//! get the same ids and emission as nodes built from Rust.

use std::cell::RefCell;
use std::fmt::Display;
use std::rc::Rc;

use raymarching_sdf::{Error, NodeId, Registry, Scene, VecExpr};
use rhai::{Array, Dynamic, Engine, EvalAltResult, ImmutableString};

type ApiResult<T> = Result<T, Box<EvalAltResult>>;

/// Handle to a registered node, as seen by scripts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptNode(NodeId);

impl ScriptNode {
    pub fn id(self) -> NodeId {
        self.0
    }
}

/// Everything one script evaluation builds
#[derive(Debug, Default)]
pub(crate) struct RunState {
    pub registry: Registry,
    pub scene: Option<Scene>,
}

pub(crate) type SharedState = Rc<RefCell<RunState>>;

fn script_error(err: impl Display) -> Box<EvalAltResult> {
    err.to_string().into()
}

/// Text of a scalar argument: a number or a GLSL expression string
fn scalar_text(value: &Dynamic) -> ApiResult<String> {
    if let Ok(i) = value.as_int() {
        return Ok(i.to_string());
    }
    // Debug keeps the decimal point, GLSL reads `2` as an int
    if let Ok(f) = value.as_float() {
        return Ok(format!("{f:?}"));
    }
    if value.is_string() {
        return Ok(value.to_string());
    }
    Err(script_error(format!(
        "Expected a number or GLSL expression, got {}",
        value.type_name()
    )))
}

/// A vector argument: an expression string or an array of scalars
fn vec_arg(value: Dynamic) -> ApiResult<VecExpr> {
    if value.is_string() {
        return Ok(VecExpr::Expr(value.to_string()));
    }
    if value.is_array() {
        let array = value.into_array().map_err(script_error)?;
        let components = array.iter().map(scalar_text).collect::<ApiResult<Vec<_>>>()?;
        return Ok(VecExpr::Components(components));
    }
    Err(script_error(Error::NotAVector(value.to_string())))
}

fn node_list(nodes: Array) -> ApiResult<Vec<NodeId>> {
    nodes
        .into_iter()
        .map(|item| {
            let type_name = item.type_name();
            item.try_cast::<ScriptNode>()
                .map(ScriptNode::id)
                .ok_or_else(|| script_error(format!("Expected a shape, got {type_name}")))
        })
        .collect()
}

/// Register all SDF functions with a Rhai engine
pub(crate) fn register_sdf_api(engine: &mut Engine, state: &SharedState) {
    engine
        .register_type_with_name::<ScriptNode>("Node")
        .register_fn("to_string", |node: &mut ScriptNode| node.0.struct_name())
        .register_fn("id", |node: &mut ScriptNode| node.0.index() as i64);

    register_primitives(engine, state);
    register_operators(engine, state);
    register_transforms(engine, state);
    register_scene(engine, state);

    // === Math helpers ===
    engine.register_fn("PI", || std::f64::consts::PI);
    engine.register_fn("deg", |deg: f64| deg.to_radians());
    engine.register_fn("deg", |deg: i64| (deg as f64).to_radians());
}

fn register_primitives(engine: &mut Engine, state: &SharedState) {
    let s = Rc::clone(state);
    engine.register_fn("emptiness", move || {
        ScriptNode(s.borrow_mut().registry.emptiness().id())
    });

    let s = Rc::clone(state);
    engine.register_fn("sphere", move || {
        ScriptNode(s.borrow_mut().registry.sphere().id())
    });

    let s = Rc::clone(state);
    engine.register_fn("plane", move || {
        ScriptNode(s.borrow_mut().registry.plane().id())
    });

    let s = Rc::clone(state);
    engine.register_fn("aabbox", move |r: Dynamic| -> ApiResult<ScriptNode> {
        let r = vec_arg(r)?;
        let mut state = s.borrow_mut();
        let node = state.registry.aabbox(r).map_err(script_error)?;
        Ok(ScriptNode(node.id()))
    });

    let s = Rc::clone(state);
    engine.register_fn(
        "cylinder",
        move |radius: Dynamic, height2: Dynamic| -> ApiResult<ScriptNode> {
            let radius = scalar_text(&radius)?;
            let height2 = scalar_text(&height2)?;
            Ok(ScriptNode(s.borrow_mut().registry.cylinder(radius, height2).id()))
        },
    );
}

fn register_operators(engine: &mut Engine, state: &SharedState) {
    let s = Rc::clone(state);
    engine.register_fn("union", move |nodes: Array| -> ApiResult<ScriptNode> {
        let nodes = node_list(nodes)?;
        let mut state = s.borrow_mut();
        let node = state.registry.union(nodes).map_err(script_error)?;
        Ok(ScriptNode(node.id()))
    });

    let s = Rc::clone(state);
    engine.register_fn(
        "union",
        move |a: ScriptNode, b: ScriptNode| -> ApiResult<ScriptNode> {
            let mut state = s.borrow_mut();
            let node = state.registry.union([a.0, b.0]).map_err(script_error)?;
            Ok(ScriptNode(node.id()))
        },
    );

    let s = Rc::clone(state);
    engine.register_fn("intersection", move |nodes: Array| -> ApiResult<ScriptNode> {
        let nodes = node_list(nodes)?;
        let mut state = s.borrow_mut();
        let node = state.registry.intersection(nodes).map_err(script_error)?;
        Ok(ScriptNode(node.id()))
    });

    let s = Rc::clone(state);
    engine.register_fn(
        "intersection",
        move |a: ScriptNode, b: ScriptNode| -> ApiResult<ScriptNode> {
            let mut state = s.borrow_mut();
            let node = state.registry.intersection([a.0, b.0]).map_err(script_error)?;
            Ok(ScriptNode(node.id()))
        },
    );

    let s = Rc::clone(state);
    engine.register_fn(
        "smooth_union",
        move |k: Dynamic, nodes: Array| -> ApiResult<ScriptNode> {
            let k = scalar_text(&k)?;
            let nodes = node_list(nodes)?;
            let mut state = s.borrow_mut();
            let node = state.registry.smooth_union(k, nodes).map_err(script_error)?;
            Ok(ScriptNode(node.id()))
        },
    );

    let s = Rc::clone(state);
    engine.register_fn(
        "difference",
        move |a: ScriptNode, b: ScriptNode| -> ApiResult<ScriptNode> {
            let mut state = s.borrow_mut();
            let node = state.registry.difference(a.0, b.0).map_err(script_error)?;
            Ok(ScriptNode(node.id()))
        },
    );
}

fn register_transforms(engine: &mut Engine, state: &SharedState) {
    let s = Rc::clone(state);
    engine.register_fn(
        "translate",
        move |node: &mut ScriptNode, delta: Dynamic| -> ApiResult<ScriptNode> {
            let delta = vec_arg(delta)?;
            let mut state = s.borrow_mut();
            state
                .registry
                .node_mut(node.0)
                .and_then(|n| n.translate(delta).map(|_| ()))
                .map_err(script_error)?;
            Ok(*node)
        },
    );

    let s = Rc::clone(state);
    engine.register_fn(
        "rotate",
        move |node: &mut ScriptNode, axis: Dynamic, angle: Dynamic| -> ApiResult<ScriptNode> {
            let axis = vec_arg(axis)?;
            let angle = scalar_text(&angle)?;
            let mut state = s.borrow_mut();
            state
                .registry
                .node_mut(node.0)
                .and_then(|n| n.rotate(axis, angle).map(|_| ()))
                .map_err(script_error)?;
            Ok(*node)
        },
    );

    let s = Rc::clone(state);
    engine.register_fn(
        "rotate_quaternion",
        move |node: &mut ScriptNode, q: Dynamic| -> ApiResult<ScriptNode> {
            let q = vec_arg(q)?;
            let mut state = s.borrow_mut();
            state
                .registry
                .node_mut(node.0)
                .and_then(|n| n.rotate_quaternion(q).map(|_| ()))
                .map_err(script_error)?;
            Ok(*node)
        },
    );

    let s = Rc::clone(state);
    engine.register_fn(
        "scale",
        move |node: &mut ScriptNode, k: Dynamic| -> ApiResult<ScriptNode> {
            let k = scalar_text(&k)?;
            let mut state = s.borrow_mut();
            state
                .registry
                .node_mut(node.0)
                .map_err(script_error)?
                .scale_by(k);
            Ok(*node)
        },
    );
}

fn register_scene(engine: &mut Engine, state: &SharedState) {
    let s = Rc::clone(state);
    engine.register_fn("scene", move |root: ScriptNode| {
        s.borrow_mut().scene = Some(Scene::new().with_root(root.0));
    });

    let s = Rc::clone(state);
    engine.register_fn("scene", move |name: ImmutableString, root: ScriptNode| {
        s.borrow_mut().scene = Some(Scene::named(name.as_str()).with_root(root.0));
    });

    let s = Rc::clone(state);
    engine.register_fn("scene_name", move |name: ImmutableString| {
        let mut state = s.borrow_mut();
        let scene = state.scene.get_or_insert_with(Scene::new);
        let mut named = Scene::named(name.as_str());
        if let Some(root) = scene.root() {
            named.set_root(root);
        }
        *scene = named;
    });
}
