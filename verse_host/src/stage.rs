/// Stage — the live render-graph shared by the Host and the active scene.
///
/// Uses a SlotMap for O(1) attach/detach with stable keys. A scene
/// attaches its subtree on activation and detaches it on
/// deactivate/dispose; keys from a detached subtree are harmless
/// (generational invalidation makes stale detach/set calls no-ops).
/// At most one scene's subtree is attached at a time — the Host enforces
/// this by only ever keeping one scene active.

use std::sync::Arc;
use bitflags::bitflags;
use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use slotmap::SlotMap;

use crate::renderer::{PrimitiveTopology, RendererBuffer, RendererTexture};

slotmap::new_key_type! {
    /// Stable key for a stage node
    pub struct NodeKey;
}

bitflags! {
    /// Per-node state flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct NodeFlags: u32 {
        /// Node is drawn by the composer
        const VISIBLE = 1 << 0;
    }
}

/// One vertex of mesh data uploaded to the renderer
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
}

impl Vertex {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            position: [x, y, z],
        }
    }
}

/// Drawable payload of a node: a vertex buffer plus material data
#[derive(Clone)]
pub struct MeshHandle {
    /// Vertex buffer holding `Vertex` data
    pub vertex_buffer: Arc<dyn RendererBuffer>,
    /// Number of vertices in the buffer
    pub vertex_count: u32,
    /// Primitive assembly mode
    pub topology: PrimitiveTopology,
    /// Flat RGBA color
    pub color: [f32; 4],
    /// Optional sampled texture
    pub texture: Option<Arc<dyn RendererTexture>>,
}

/// One node of the stage graph
#[derive(Clone)]
pub struct Node {
    /// World transform
    pub transform: Mat4,
    /// Drawable payload (None for grouping/placeholder nodes)
    pub mesh: Option<MeshHandle>,
    /// State flags
    pub flags: NodeFlags,
}

impl Node {
    /// A visible node carrying a mesh at the identity transform
    pub fn with_mesh(mesh: MeshHandle) -> Self {
        Self {
            transform: Mat4::IDENTITY,
            mesh: Some(mesh),
            flags: NodeFlags::VISIBLE,
        }
    }

    /// An empty, visible node (grouping/placeholder)
    pub fn empty() -> Self {
        Self {
            transform: Mat4::IDENTITY,
            mesh: None,
            flags: NodeFlags::VISIBLE,
        }
    }

    /// Builder-style transform override
    pub fn at(mut self, transform: Mat4) -> Self {
        self.transform = transform;
        self
    }
}

/// The live render-graph.
///
/// Nodes are managed via stable keys (NodeKey). Keys remain valid even
/// after other nodes are removed.
pub struct Stage {
    nodes: SlotMap<NodeKey, Node>,
}

impl Stage {
    /// Create a new empty stage
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
        }
    }

    /// Attach a node to the stage.
    ///
    /// Returns a stable key that remains valid until the node is detached.
    pub fn attach(&mut self, node: Node) -> NodeKey {
        self.nodes.insert(node)
    }

    /// Detach a node. Returns false if the key is stale.
    pub fn detach(&mut self, key: NodeKey) -> bool {
        self.nodes.remove(key).is_some()
    }

    /// Get a node by key
    pub fn node(&self, key: NodeKey) -> Option<&Node> {
        self.nodes.get(key)
    }

    /// Get a mutable node by key
    pub fn node_mut(&mut self, key: NodeKey) -> Option<&mut Node> {
        self.nodes.get_mut(key)
    }

    /// Set the world transform of a node. Returns false if the key is stale.
    pub fn set_transform(&mut self, key: NodeKey, transform: Mat4) -> bool {
        if let Some(node) = self.nodes.get_mut(key) {
            node.transform = transform;
            true
        } else {
            false
        }
    }

    /// Set the visibility flag of a node. Returns false if the key is stale.
    pub fn set_visible(&mut self, key: NodeKey, visible: bool) -> bool {
        if let Some(node) = self.nodes.get_mut(key) {
            node.flags.set(NodeFlags::VISIBLE, visible);
            true
        } else {
            false
        }
    }

    /// Set the flat color of a node's mesh. Returns false if the key is
    /// stale or the node has no mesh.
    pub fn set_color(&mut self, key: NodeKey, color: [f32; 4]) -> bool {
        if let Some(mesh) = self.nodes.get_mut(key).and_then(|n| n.mesh.as_mut()) {
            mesh.color = color;
            true
        } else {
            false
        }
    }

    /// Iterate over all nodes (key, node)
    pub fn nodes(&self) -> impl Iterator<Item = (NodeKey, &Node)> {
        self.nodes.iter()
    }

    /// Iterate over visible nodes only
    pub fn visible(&self) -> impl Iterator<Item = (NodeKey, &Node)> {
        self.nodes
            .iter()
            .filter(|(_, node)| node.flags.contains(NodeFlags::VISIBLE))
    }

    /// Number of attached nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the stage has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Detach all nodes
    pub fn clear(&mut self) {
        self.nodes.clear();
    }
}

impl Default for Stage {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "stage_tests.rs"]
mod tests;
