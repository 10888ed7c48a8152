//! Verse 24 — tiptoe.
//!
//! A two-arm pendulum hanging from a crossbar. "Nudge" shoves the upper
//! arm; the "damping" slider decides how quickly the strain dies out.
//! Left alone with any damping at all, the arms return to hanging
//! straight down — the posture that needs no effort to hold.

use std::sync::Arc;

use verse_host::versehost::render::{
    BufferDesc, BufferUsage, MeshHandle, Node, NodeKey, PrimitiveTopology, RendererBuffer,
    Stage, Vertex,
};
use verse_host::versehost::scene::{ActionValue, Scene, SceneContext, ScenePhase};
use verse_host::versehost::Result;

const PIVOT_HEIGHT: f32 = 1.8;
const ARM_LENGTH: f32 = 1.1;
const GRAVITY_OVER_LENGTH: f32 = 8.0;
const COUPLING: f32 = 3.0;
const NUDGE_IMPULSE: f32 = 2.4;
/// crossbar (2) + upper arm (2) + lower arm (2)
const VERTEX_COUNT: usize = 6;

pub struct StillPendulum {
    phase: ScenePhase,
    node: Option<NodeKey>,
    buffer: Option<Arc<dyn RendererBuffer>>,
    theta1: f32,
    omega1: f32,
    theta2: f32,
    omega2: f32,
    damping: f32,
}

impl StillPendulum {
    pub fn new() -> Self {
        Self {
            phase: ScenePhase::new(),
            node: None,
            buffer: None,
            // Start mid-swing so the scene is alive on entry
            theta1: 0.7,
            omega1: 0.0,
            theta2: 0.3,
            omega2: 0.0,
            damping: 0.15,
        }
    }

    fn vertices(&self) -> [Vertex; VERTEX_COUNT] {
        let pivot = [0.0, PIVOT_HEIGHT, 0.0];
        let bob1 = [
            pivot[0] + ARM_LENGTH * self.theta1.sin(),
            pivot[1] - ARM_LENGTH * self.theta1.cos(),
            0.0,
        ];
        let bob2 = [
            bob1[0] + ARM_LENGTH * self.theta2.sin(),
            bob1[1] - ARM_LENGTH * self.theta2.cos(),
            0.0,
        ];
        [
            // Crossbar the pendulum hangs from
            Vertex::new(-0.6, PIVOT_HEIGHT, 0.0),
            Vertex::new(0.6, PIVOT_HEIGHT, 0.0),
            Vertex::new(pivot[0], pivot[1], pivot[2]),
            Vertex::new(bob1[0], bob1[1], bob1[2]),
            Vertex::new(bob1[0], bob1[1], bob1[2]),
            Vertex::new(bob2[0], bob2[1], bob2[2]),
        ]
    }

    /// Semi-implicit Euler step of the coupled, damped arms
    fn step(&mut self, dt: f32) {
        let lean = self.theta2 - self.theta1;
        let alpha1 =
            -GRAVITY_OVER_LENGTH * self.theta1.sin() - self.damping * 4.0 * self.omega1
                + COUPLING * lean;
        let alpha2 = -GRAVITY_OVER_LENGTH * self.theta2.sin()
            - self.damping * 4.0 * self.omega2
            - COUPLING * lean;

        self.omega1 += alpha1 * dt;
        self.omega2 += alpha2 * dt;
        self.theta1 += self.omega1 * dt;
        self.theta2 += self.omega2 * dt;
    }
}

impl Scene for StillPendulum {
    fn activate(&mut self, ctx: &mut SceneContext<'_>) -> Result<()> {
        if !self.phase.activate() {
            return Ok(());
        }
        let buffer = ctx.renderer.lock().unwrap().create_buffer(BufferDesc {
            size: (VERTEX_COUNT * std::mem::size_of::<Vertex>()) as u64,
            usage: BufferUsage::Vertex,
        })?;
        buffer.update(0, bytemuck::cast_slice(&self.vertices()))?;

        self.node = Some(ctx.stage.attach(Node::with_mesh(MeshHandle {
            vertex_buffer: buffer.clone(),
            vertex_count: VERTEX_COUNT as u32,
            topology: PrimitiveTopology::LineList,
            color: [0.95, 0.95, 0.9, 1.0],
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

    fn update(&mut self, _stage: &mut Stage, delta: f32) -> Result<()> {
        if !self.phase.can_update() {
            return Ok(());
        }
        self.step(delta);
        if let Some(buffer) = &self.buffer {
            buffer.update(0, bytemuck::cast_slice(&self.vertices()))?;
        }
        Ok(())
    }

    fn handle_action(&mut self, action: &str, value: Option<ActionValue>) {
        if self.phase.is_disposed() {
            return;
        }
        match action {
            "set_damping" => {
                if let Some(damping) = value.and_then(|v| v.as_number()) {
                    self.damping = damping.clamp(0.0, 1.0) as f32;
                }
            }
            "nudge" => {
                self.omega1 += NUDGE_IMPULSE;
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

impl Default for StillPendulum {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "still_pendulum_tests.rs"]
mod tests;
