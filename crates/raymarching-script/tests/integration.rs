//! Integration tests for script to shader generation

// Tests are allowed to use unwrap for cleaner error messages
#![allow(clippy::unwrap_used)]

use raymarching_script::{Registry, Scene, ScriptEngine, ScriptError, default_template};

#[test]
fn script_matches_rust_api() {
    let script = r#"
        let ball = sphere();
        let block = aabbox([1, 1, 1]).translate([2, 0, 0]);
        scene("Demo", union([ball, block]))
    "#;
    let engine = ScriptEngine::new();
    let mut generated = engine.eval_scene(script).unwrap();
    let from_script = generated.process(default_template()).unwrap();

    let mut registry = Registry::new();
    let ball = registry.sphere().id();
    let block = registry.aabbox([1, 1, 1]).unwrap().translate([2, 0, 0]).unwrap().id();
    let root = registry.union([ball, block]).unwrap().id();
    let from_rust = Scene::named("Demo")
        .with_root(root)
        .process(&mut registry, default_template())
        .unwrap();

    assert_eq!(generated.name(), "Demo");
    assert_eq!(from_script, from_rust);
}

#[test]
fn transforms_compose_like_the_core() {
    let script = r#"
        sphere()
            .translate([1, 0, 0])
            .translate("offset")
            .scale(2)
            .scale(0.5)
            .rotate_quaternion([0, 0, 0, 1])
            .rotate_quaternion("q")
    "#;
    let engine = ScriptEngine::new();
    let generated = engine.eval_scene(script).unwrap();
    let node = generated.registry.all_nodes()[0].transform().clone();

    assert_eq!(node.translation(), "(vec3(1, 0, 0) + offset)");
    assert_eq!(node.scale(), "((1 * (2)) * (0.5))");
    assert_eq!(node.rotation(), "q");
}

#[test]
fn smooth_union_and_difference() {
    let script = r#"
        let a = sphere();
        let b = cylinder(0.5, "h");
        let c = plane();
        let blob = smooth_union(0.3, [a, b, c]);
        difference(blob, aabbox("vec3(0.25)"))
    "#;
    let engine = ScriptEngine::new();
    let generated = engine.eval_scene(script).unwrap();
    let nodes = generated.registry.all_nodes();

    assert_eq!(nodes.len(), 6);
    assert_eq!(
        nodes[3].distance_body(),
        "return smin(smin(sdist(p,o.o0), sdist(p,o.o1), o.k), sdist(p,o.o2), o.k);"
    );
    assert_eq!(
        nodes[5].distance_body(),
        "return max(sdist(p,o.o3), -sdist(p,o.o4));"
    );
    assert!(nodes[1].declaration().contains("float height2;\nfloat radius;"));
}

#[test]
fn non_vector_argument_fails_the_run() {
    let engine = ScriptEngine::new();
    let err = engine.eval_scene("sphere().translate(5)").unwrap_err();
    assert!(matches!(err, ScriptError::Eval(_)));
    assert!(err.to_string().contains("Cannot convert '5' to a GLSL vector"));
}

#[test]
fn bad_arity_fails_the_run() {
    let engine = ScriptEngine::new();
    let err = engine.eval_scene("aabbox([1, 2])").unwrap_err();
    assert!(err.to_string().contains("Cannot build vec3 from 2 components"));

    let err = engine.eval_scene("union([sphere()])").unwrap_err();
    assert!(err.to_string().contains("Union needs at least 2 operands"));

    let err = engine.eval_scene("union([sphere(), 3])").unwrap_err();
    assert!(err.to_string().contains("Expected a shape"));
}

#[test]
fn script_file_round_trip() {
    let path = std::env::temp_dir().join("raymarching_script_test_scene.rhai");
    std::fs::write(&path, "scene(\"From file\", sphere().rotate([0, 1, 0], deg(45)));").unwrap();

    let engine = ScriptEngine::new();
    let mut generated = engine.eval_scene_file(&path).unwrap();
    assert_eq!(generated.name(), "From file");
    let shader = generated.process(default_template()).unwrap();
    assert!(shader.contains("vec4(normalize(vec3(0, 1, 0)) * sin(("));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn missing_script_file() {
    let engine = ScriptEngine::new();
    let err = engine
        .eval_scene_file(std::path::Path::new("/nonexistent/scene.rhai"))
        .unwrap_err();
    assert!(matches!(err, ScriptError::Io { .. }));
}

#[test]
fn bundled_snowman_scene() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../../scenes/snowman.rhai");
    let engine = ScriptEngine::new();
    let mut generated = engine.eval_scene_file(&path).unwrap();

    assert_eq!(generated.name(), "Snowman");
    assert_eq!(generated.registry.len(), 8);
    let shader = generated.process(default_template()).unwrap();
    assert!(shader.contains("return min(min(min(sdist(p,o.o3), sdist(p,o.o4)), sdist(p,o.o5)), sdist(p,o.o6));"));
}
