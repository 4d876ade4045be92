//! Built-in demo scene

use raymarching_sdf::{Registry, Result, Scene};

/// A sphere and a box merged together, standing on a floor plane
pub fn demo_scene(registry: &mut Registry) -> Result<Scene> {
    let ball = registry.sphere().id();
    let block = registry.aabbox([1, 1, 1])?.translate([2, 0, 0])?.id();
    let body = registry.union([ball, block])?.id();

    let hole = registry
        .cylinder(0.4, 3)
        .rotate([1, 0, 0], "radians(90.0)")?
        .translate([2, 0, 0])?
        .id();
    let carved = registry.difference(body, hole)?.id();

    let floor = registry.plane().translate([0, -1, 0])?.id();
    let root = registry.smooth_union(0.1, [carved, floor])?.id();

    Ok(Scene::named("Demo").with_root(root))
}
