//! Verse 19 — plain wood, the uncarved block.
//!
//! A slowly turning wireframe block. The "carving" slider displaces the
//! edge lattice away from the plain cube; "grain" picks how finely the
//! edges are subdivided; "release" lets the carving spring back to the
//! uncut block. Corners stay fixed: however deep the carving, the block
//! remembers its shape.

use std::sync::Arc;

use glam::{Mat4, Vec3};

use verse_host::versehost::render::{
    BufferDesc, BufferUsage, MeshHandle, Node, NodeKey, PrimitiveTopology, RendererBuffer,
    Stage, Vertex,
};
use verse_host::versehost::scene::{
    ActionValue, Ease, Scene, SceneContext, ScenePhase, Tween,
};
use verse_host::versehost::Result;

/// Edge subdivision per grain setting
const GRAIN_SEGMENTS: [(&str, usize); 3] = [("coarse", 2), ("medium", 4), ("fine", 8)];
const MAX_SEGMENTS: usize = 8;

/// 12 cube edges as corner-index pairs
const EDGES: [(usize, usize); 12] = [
    (0, 1), (1, 3), (3, 2), (2, 0), // bottom
    (4, 5), (5, 7), (7, 6), (6, 4), // top
    (0, 4), (1, 5), (2, 6), (3, 7), // verticals
];

fn corners() -> [Vec3; 8] {
    let mut out = [Vec3::ZERO; 8];
    for (i, corner) in out.iter_mut().enumerate() {
        *corner = Vec3::new(
            if i & 1 == 0 { -1.0 } else { 1.0 },
            if i & 4 == 0 { -1.0 } else { 1.0 },
            if i & 2 == 0 { -1.0 } else { 1.0 },
        );
    }
    out
}

/// Deterministic per-point displacement direction (hash-flavored)
fn displacement(seed: Vec3) -> Vec3 {
    Vec3::new(
        (seed.x * 12.9898 + seed.y * 78.233 + seed.z * 37.719).sin(),
        (seed.x * 93.989 + seed.y * 67.345 + seed.z * 11.135).sin(),
        (seed.x * 43.332 + seed.y * 19.514 + seed.z * 83.155).sin(),
    )
}

pub struct UncarvedBlock {
    phase: ScenePhase,
    node: Option<NodeKey>,
    buffer: Option<Arc<dyn RendererBuffer>>,
    vertices: Vec<Vertex>,
    carving: Tween,
    segments: usize,
    elapsed: f32,
}

impl UncarvedBlock {
    pub fn new() -> Self {
        Self {
            phase: ScenePhase::new(),
            node: None,
            buffer: None,
            vertices: Vec::new(),
            carving: Tween::settled(0.0),
            segments: GRAIN_SEGMENTS[0].1,
            elapsed: 0.0,
        }
    }

    fn max_vertex_count() -> usize {
        EDGES.len() * MAX_SEGMENTS * 2
    }

    fn rebuild_vertices(&mut self) {
        let corners = corners();
        let depth = self.carving.value() * 0.45;
        self.vertices.clear();

        for &(a, b) in &EDGES {
            let from = corners[a];
            let to = corners[b];
            for segment in 0..self.segments {
                let t0 = segment as f32 / self.segments as f32;
                let t1 = (segment + 1) as f32 / self.segments as f32;
                for t in [t0, t1] {
                    let on_edge = from.lerp(to, t);
                    // Fade to zero at the corners so the block keeps its frame
                    let fade = (std::f32::consts::PI * t).sin();
                    let carved = on_edge + displacement(on_edge) * depth * fade;
                    self.vertices.push(Vertex::new(carved.x, carved.y, carved.z));
                }
            }
        }
    }
}

impl Scene for UncarvedBlock {
    fn activate(&mut self, ctx: &mut SceneContext<'_>) -> Result<()> {
        if !self.phase.activate() {
            return Ok(());
        }
        // Allocate for the finest grain; coarser settings use a prefix
        let size = (Self::max_vertex_count() * std::mem::size_of::<Vertex>()) as u64;
        let buffer = ctx.renderer.lock().unwrap().create_buffer(BufferDesc {
            size,
            usage: BufferUsage::Vertex,
        })?;

        self.rebuild_vertices();
        buffer.update(0, bytemuck::cast_slice(&self.vertices))?;

        self.node = Some(ctx.stage.attach(Node::with_mesh(MeshHandle {
            vertex_buffer: buffer.clone(),
            vertex_count: self.vertices.len() as u32,
            topology: PrimitiveTopology::LineList,
            color: [0.9, 0.78, 0.55, 1.0],
            texture: None,
        })));
        self.buffer = Some(buffer);
        Ok(())
    }

    fn deactivate(&mut self, stage: &mut Stage) {
        self.phase.deactivate();
        if let Some(key) = self.node.take() {
            stage.detach(key);
        }
    }

    fn update(&mut self, stage: &mut Stage, delta: f32) -> Result<()> {
        if !self.phase.can_update() {
            return Ok(());
        }
        self.elapsed += delta;
        self.carving.advance(delta);
        self.rebuild_vertices();

        if let Some(buffer) = &self.buffer {
            buffer.update(0, bytemuck::cast_slice(&self.vertices))?;
        }
        if let Some(key) = self.node {
            if let Some(node) = stage.node_mut(key) {
                node.transform = Mat4::from_rotation_y(self.elapsed * 0.3)
                    * Mat4::from_rotation_x(0.35);
                if let Some(mesh) = node.mesh.as_mut() {
                    mesh.vertex_count = self.vertices.len() as u32;
                }
            }
        }
        Ok(())
    }

    fn handle_action(&mut self, action: &str, value: Option<ActionValue>) {
        if self.phase.is_disposed() {
            return;
        }
        match action {
            "set_carving" => {
                if let Some(target) = value.and_then(|v| v.as_number()) {
                    self.carving.retarget(target as f32, 0.4, Ease::QuadOut);
                }
            }
            "set_grain" => {
                if let Some(choice) = value.as_ref().and_then(|v| v.as_choice()) {
                    if let Some(&(_, segments)) =
                        GRAIN_SEGMENTS.iter().find(|(name, _)| *name == choice)
                    {
                        self.segments = segments;
                    }
                }
            }
            "release" => {
                self.carving.retarget(0.0, 1.5, Ease::ElasticOut);
            }
            _ => {}
        }
    }

    fn dispose(&mut self, stage: &mut Stage) {
        if !self.phase.dispose() {
            return;
        }
        if let Some(key) = self.node.take() {
            stage.detach(key);
        }
        self.buffer = None;
    }

    fn is_active(&self) -> bool {
        self.phase.is_active()
    }

    fn is_disposed(&self) -> bool {
        self.phase.is_disposed()
    }
}

impl Default for UncarvedBlock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "uncarved_block_tests.rs"]
mod tests;
