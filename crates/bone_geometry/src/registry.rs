//! Node registry
//!
//! Minimal stand-in for the host's object model: owns bone nodes behind
//! stable handles and implements creation and duplication the way the host
//! does.

use slotmap::SlotMap;

use crate::config::BoneConfig;
use crate::node::BoneNode;

slotmap::new_key_type! {
    /// Stable handle to a registered bone node
    pub struct NodeHandle;
}

/// Handle-based store of bone nodes
#[derive(Debug, Clone, Default)]
pub struct NodeRegistry {
    nodes: SlotMap<NodeHandle, BoneNode>,
    config: BoneConfig,
}

impl NodeRegistry {
    /// Create an empty registry with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry whose nodes start from `config`
    pub fn with_config(config: BoneConfig) -> Self {
        Self {
            nodes: SlotMap::with_key(),
            config,
        }
    }

    /// Configuration applied to new nodes
    pub const fn config(&self) -> &BoneConfig {
        &self.config
    }

    /// Create a node with the configured shape defaults and units
    pub fn create(&mut self) -> NodeHandle {
        let node = BoneNode::with_parameters(self.config.shape.to_parameters())
            .with_units(self.config.units);
        let handle = self.nodes.insert(node);
        log::debug!("Created bone node {:?}", handle);
        handle
    }

    /// Duplicate a node, copying its parameters by value
    ///
    /// Returns `None` if `source` is not registered.
    pub fn duplicate(&mut self, source: NodeHandle) -> Option<NodeHandle> {
        let mut node = BoneNode::new().with_units(self.config.units);
        node.copy_internal_data(self.nodes.get(source)?);

        let handle = self.nodes.insert(node);
        log::debug!("Duplicated bone node {:?} as {:?}", source, handle);
        Some(handle)
    }

    /// Look up a node
    pub fn get(&self, handle: NodeHandle) -> Option<&BoneNode> {
        self.nodes.get(handle)
    }

    /// Look up a node for modification
    pub fn get_mut(&mut self, handle: NodeHandle) -> Option<&mut BoneNode> {
        self.nodes.get_mut(handle)
    }

    /// Remove a node
    pub fn remove(&mut self, handle: NodeHandle) -> Option<BoneNode> {
        self.nodes.remove(handle)
    }

    /// Number of registered nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether no nodes are registered
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over all nodes
    pub fn iter(&self) -> impl Iterator<Item = (NodeHandle, &BoneNode)> {
        self.nodes.iter()
    }
}
