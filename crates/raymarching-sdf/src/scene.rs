//! Scene: root selection and full shader emission

use tracing::{debug, info};

use crate::node::{NodeId, SD_FUNC_NAME};
use crate::template::merge_template;
use crate::{Registry, Result};

/// Name reported for scenes created without one
pub const UNNAMED_SCENE: &str = "Unnamed scene";

/// The two generated shader blocks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneSource {
    /// Declarations of every registered node, in creation order
    pub declarations: String,
    /// `return sdist(p, <root initialization>);`
    pub scene: String,
}

impl SceneSource {
    /// Insert both blocks into a shader template
    pub fn merge_into(&self, template: &str) -> String {
        merge_template(template, &self.declarations, &self.scene)
    }
}

/// A named scene with an optional root node
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scene {
    name: Option<String>,
    root: Option<NodeId>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            root: None,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The scene name, or [`UNNAMED_SCENE`]
    pub fn display_name(&self) -> &str {
        self.name().unwrap_or(UNNAMED_SCENE)
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn set_root(&mut self, root: NodeId) {
        self.root = Some(root);
    }

    /// Builder form of [`Scene::set_root`]
    pub fn with_root(mut self, root: NodeId) -> Self {
        self.root = Some(root);
        self
    }

    /// Generate both shader blocks.
    ///
    /// A scene without a root gets a fresh `Emptiness` node, registered
    /// before declarations are emitted.
    pub fn emit(&mut self, registry: &mut Registry) -> Result<SceneSource> {
        let root = match self.root {
            Some(root) => registry.node(root)?.id(),
            None => {
                debug!("Scene has no root, using Emptiness");
                let root = registry.emptiness().id();
                self.root = Some(root);
                root
            }
        };

        let declarations = registry.declarations();
        let init = registry.node(root)?.initialization(registry)?;
        let scene = format!("return {SD_FUNC_NAME}(p, {init});");

        info!(
            "Generated scene '{}' with {} nodes, root {}",
            self.display_name(),
            registry.len(),
            root.struct_name()
        );
        Ok(SceneSource {
            declarations,
            scene,
        })
    }

    /// Generate the complete shader program from `template`
    pub fn process(&mut self, registry: &mut Registry, template: &str) -> Result<String> {
        Ok(self.emit(registry)?.merge_into(template))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_scene_names() {
        assert_eq!(Scene::new().display_name(), "Unnamed scene");
        assert_eq!(Scene::named("Snowman").display_name(), "Snowman");
        assert_eq!(Scene::named("Snowman").name(), Some("Snowman"));
    }

    #[test]
    fn test_empty_scene_defaults_to_emptiness() {
        let mut registry = Registry::new();
        let mut scene = Scene::new();
        let source = scene.emit(&mut registry).unwrap();

        assert_eq!(registry.len(), 1);
        assert_eq!(scene.root().map(NodeId::index), Some(0));
        assert!(source.declarations.contains("return INF;"));
        assert_eq!(
            source.scene,
            "return sdist(p, SDF0(Transform(vec4(0, 0, 0, 1), vec3(0, 0, 0), 1)));"
        );
    }

    #[test]
    fn test_emptiness_root_after_existing_nodes() {
        let mut registry = Registry::new();
        registry.sphere();
        let mut scene = Scene::new();
        let source = scene.emit(&mut registry).unwrap();

        // Unused sphere is still declared, the new root comes after it
        assert!(source.declarations.starts_with("SDFType(SDF0,"));
        assert!(source.scene.starts_with("return sdist(p, SDF1("));
    }

    #[test]
    fn test_unknown_root() {
        let mut registry = Registry::new();
        registry.sphere();
        registry.sphere();
        let mut other = Registry::new();
        other.sphere();
        let foreign = other.sphere().id();

        let mut scene = Scene::new().with_root(foreign);
        assert_eq!(
            scene.process(&mut registry, "#version 330\n").unwrap_err(),
            Error::UnknownNode(foreign)
        );
    }

    #[test]
    fn test_process_merges_template() {
        let mut registry = Registry::new();
        let root = registry.sphere().id();
        let mut scene = Scene::named("Ball").with_root(root);
        let text = scene
            .process(&mut registry, "#version 330 core\nTEMPLATE_SDFTYPES\nfloat f(vec3 p) { TEMPLATE_SDSCENE }\n")
            .unwrap();

        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("#version 330 core"));
        assert_eq!(lines.next(), Some("#define TEMPLATE_SDFTYPES \\"));
        assert!(text.ends_with("TEMPLATE_SDFTYPES\nfloat f(vec3 p) { TEMPLATE_SDSCENE }\n"));
    }
}
