//! Run-scoped node registry
//!
//! Every node created during one generation run lives here, in creation
//! order. Node ids are indices into this list, so they are unique, gapless
//! and never reused. Each id is also tagged with the serial of the registry
//! that issued it and does not resolve anywhere else. Parents refer to children by id; nodes are owned by the
//! registry only, which lets one node appear under several parents.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

use crate::node::{Node, NodeId, NodeKind, Parameters};
use crate::{Error, Result};

/// Serial handed to the next registry, tags every id it issues
static NEXT_SERIAL: AtomicU64 = AtomicU64::new(0);

/// Append-only, creation-ordered list of all nodes of one generation run
///
/// A clone keeps the serial of its source, so ids stay valid in both.
#[derive(Debug, Clone)]
pub struct Registry {
    serial: u64,
    nodes: Vec<Node>,
}

impl Default for Registry {
    fn default() -> Self {
        Self {
            serial: NEXT_SERIAL.fetch_add(1, Ordering::Relaxed),
            nodes: Vec::new(),
        }
    }
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node and hand it back for further building
    pub(crate) fn register(&mut self, kind: NodeKind, parameters: Parameters) -> &mut Node {
        let index = self.nodes.len();
        let id = NodeId {
            registry: self.serial,
            index,
        };
        debug!("Registering {} as {}", kind.name(), id.struct_name());
        self.nodes.push(Node::new(id, kind, parameters));
        &mut self.nodes[index]
    }

    /// Every node ever registered, in creation order
    pub fn all_nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Does `id` name a node of this registry
    pub fn contains(&self, id: NodeId) -> bool {
        id.registry == self.serial && id.index < self.nodes.len()
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        if self.contains(id) {
            self.nodes.get(id.index)
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        if self.contains(id) {
            self.nodes.get_mut(id.index)
        } else {
            None
        }
    }

    /// Like [`Registry::get`], failing with [`Error::UnknownNode`]
    pub fn node(&self, id: NodeId) -> Result<&Node> {
        self.get(id).ok_or(Error::UnknownNode(id))
    }

    /// Like [`Registry::get_mut`], failing with [`Error::UnknownNode`]
    pub fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.get_mut(id).ok_or(Error::UnknownNode(id))
    }

    pub(crate) fn check(&self, id: NodeId) -> Result<NodeId> {
        if self.contains(id) {
            Ok(id)
        } else {
            Err(Error::UnknownNode(id))
        }
    }

    /// Concatenated declarations of every node, each followed by `;`
    pub fn declarations(&self) -> String {
        self.nodes
            .iter()
            .map(|node| node.declaration() + ";\n")
            .collect()
    }
}
