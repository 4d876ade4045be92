//! Boolean and blend operators
//!
//! Union, intersection and smooth union share one N-ary left fold:
//! `f(f(f(d0, d1), d2), d3)`, with an optional constant appended to every
//! call. Difference is strictly binary.

use std::fmt::Display;

use crate::node::{Node, NodeId, NodeKind, Parameter, Parameters};
use crate::{Error, Registry, Result};

/// Parameter holding the smooth union blend radius
pub const SMOOTH_K_PARAM: &str = "k";

/// Binary combining function used at every fold level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Combine {
    Min,
    Max,
    SmoothMin,
}

impl Combine {
    /// GLSL function name
    pub fn function_name(self) -> &'static str {
        match self {
            Self::Min => "min",
            Self::Max => "max",
            Self::SmoothMin => "smin",
        }
    }

    pub fn operator_name(self) -> &'static str {
        match self {
            Self::Min => "Union",
            Self::Max => "Intersection",
            Self::SmoothMin => "SmoothUnion",
        }
    }
}

/// Left fold of children distances through one combining function
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fold {
    combine: Combine,
    children: Vec<NodeId>,
    shared: Option<&'static str>,
}

impl Fold {
    pub fn combine(&self) -> Combine {
        self.combine
    }

    /// Children in the order they were supplied
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Name of the parameter passed as third argument at every level
    pub fn shared_parameter(&self) -> Option<&'static str> {
        self.shared
    }

    pub(crate) fn distance_body(&self) -> String {
        let func = self.combine.function_name();
        let extra = self
            .shared
            .map(|name| format!(", o.{name}"))
            .unwrap_or_default();
        let folded = self
            .children
            .iter()
            .map(|child| child.distance_call())
            .reduce(|acc, next| format!("{func}({acc}, {next}{extra})"))
            .unwrap_or_default();
        format!("return {folded};")
    }
}

pub(crate) fn difference_body(minuend: NodeId, subtrahend: NodeId) -> String {
    format!(
        "return max({}, -{});",
        minuend.distance_call(),
        subtrahend.distance_call()
    )
}

impl Registry {
    fn fold(
        &mut self,
        combine: Combine,
        children: Vec<NodeId>,
        shared: Option<(&'static str, Parameter)>,
    ) -> Result<&mut Node> {
        if children.len() < 2 {
            return Err(Error::TooFewOperands {
                operator: combine.operator_name(),
                found: children.len(),
            });
        }
        let mut parameters = Parameters::new();
        for &child in &children {
            parameters.insert(child.parameter_key(), Parameter::Child(self.check(child)?));
        }
        let shared = shared.map(|(name, value)| {
            parameters.insert(name.to_owned(), value);
            name
        });
        let fold = Fold {
            combine,
            children,
            shared,
        };
        Ok(self.register(NodeKind::Fold(fold), parameters))
    }

    /// `min` over all children
    pub fn union(&mut self, children: impl IntoIterator<Item = NodeId>) -> Result<&mut Node> {
        self.fold(Combine::Min, children.into_iter().collect(), None)
    }

    /// `max` over all children
    pub fn intersection(
        &mut self,
        children: impl IntoIterator<Item = NodeId>,
    ) -> Result<&mut Node> {
        self.fold(Combine::Max, children.into_iter().collect(), None)
    }

    /// `smin` over all children, with the same blend radius `k` at every level
    pub fn smooth_union(
        &mut self,
        k: impl Display,
        children: impl IntoIterator<Item = NodeId>,
    ) -> Result<&mut Node> {
        self.fold(
            Combine::SmoothMin,
            children.into_iter().collect(),
            Some((SMOOTH_K_PARAM, Parameter::float(k))),
        )
    }

    /// `subtrahend` carved out of `minuend`
    pub fn difference(&mut self, minuend: NodeId, subtrahend: NodeId) -> Result<&mut Node> {
        let mut parameters = Parameters::new();
        parameters.insert(minuend.parameter_key(), Parameter::Child(self.check(minuend)?));
        parameters.insert(
            subtrahend.parameter_key(),
            Parameter::Child(self.check(subtrahend)?),
        );
        Ok(self.register(
            NodeKind::Difference {
                minuend,
                subtrahend,
            },
            parameters,
        ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn three_leaves(registry: &mut Registry) -> [NodeId; 3] {
        [
            registry.sphere().id(),
            registry.plane().id(),
            registry.cylinder(1, 1).id(),
        ]
    }

    #[test]
    fn test_union_left_fold() {
        let mut registry = Registry::new();
        let leaves = three_leaves(&mut registry);
        let union = registry.union(leaves).unwrap();
        assert_eq!(
            union.distance_body(),
            "return min(min(sdist(p,o.o0), sdist(p,o.o1)), sdist(p,o.o2));"
        );
    }

    #[test]
    fn test_intersection_left_fold() {
        let mut registry = Registry::new();
        let leaves = three_leaves(&mut registry);
        let node = registry.intersection(leaves).unwrap();
        assert_eq!(
            node.distance_body(),
            "return max(max(sdist(p,o.o0), sdist(p,o.o1)), sdist(p,o.o2));"
        );
    }

    #[test]
    fn test_fold_respects_supplied_order() {
        let mut registry = Registry::new();
        let [a, b, c] = three_leaves(&mut registry);
        let node = registry.union([c, a, b]).unwrap();
        assert_eq!(
            node.distance_body(),
            "return min(min(sdist(p,o.o2), sdist(p,o.o0)), sdist(p,o.o1));"
        );
    }

    #[test]
    fn test_smooth_union_shares_k() {
        let mut registry = Registry::new();
        let leaves = three_leaves(&mut registry);
        let node = registry.smooth_union(0.25, leaves).unwrap();
        assert_eq!(
            node.distance_body(),
            "return smin(smin(sdist(p,o.o0), sdist(p,o.o1), o.k), sdist(p,o.o2), o.k);"
        );
        assert_eq!(node.parameters().get("k"), Some(&Parameter::float(0.25)));
        // k sorts ahead of the child keys
        assert_eq!(
            node.parameters().keys().collect::<Vec<_>>(),
            ["k", "o0", "o1", "o2"]
        );
    }

    #[test]
    fn test_binary_union() {
        let mut registry = Registry::new();
        let a = registry.sphere().id();
        let b = registry.plane().id();
        let node = registry.union([a, b]).unwrap();
        assert_eq!(node.distance_body(), "return min(sdist(p,o.o0), sdist(p,o.o1));");
    }

    #[test]
    fn test_difference() {
        let mut registry = Registry::new();
        let a = registry.sphere().id();
        let b = registry.aabbox("vec3(0.5)").unwrap().id();
        let node = registry.difference(a, b).unwrap();
        assert_eq!(
            node.distance_body(),
            "return max(sdist(p,o.o0), -sdist(p,o.o1));"
        );
    }

    #[test]
    fn test_too_few_operands() {
        let mut registry = Registry::new();
        let a = registry.sphere().id();
        assert_eq!(
            registry.union([a]).unwrap_err(),
            Error::TooFewOperands {
                operator: "Union",
                found: 1
            }
        );
        assert!(registry.smooth_union(0.1, Vec::new()).is_err());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_foreign_child_rejected() {
        let mut other = Registry::new();
        other.sphere();
        other.sphere();
        let foreign = other.sphere().id();

        let mut registry = Registry::new();
        let a = registry.sphere().id();
        assert_eq!(
            registry.union([a, foreign]).unwrap_err(),
            Error::UnknownNode(foreign)
        );
        assert!(registry.difference(foreign, a).is_err());
    }

    #[test]
    fn test_in_range_foreign_child_rejected() {
        let mut other = Registry::new();
        let foreign = other.sphere().id();

        let mut registry = Registry::new();
        let a = registry.sphere().id();
        registry.plane();
        assert_eq!(foreign.index(), a.index());
        assert_eq!(
            registry.smooth_union(0.5, [a, foreign]).unwrap_err(),
            Error::UnknownNode(foreign)
        );
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_shared_child() {
        let mut registry = Registry::new();
        let a = registry.sphere().id();
        let b = registry.plane().id();
        let first = registry.union([a, b]).unwrap().id();
        let second = registry.intersection([a, b]).unwrap().id();
        let top = registry.union([first, second]).unwrap().id();

        let text = registry.node(top).unwrap().initialization(&registry).unwrap();
        // The sphere is nested under both operators
        assert_eq!(text.matches("SDF0(").count(), 2);
    }
}
