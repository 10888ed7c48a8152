//! Verse 11 — the use of what is not.
//!
//! A cloud of particles orbiting a common hub. The "emptiness" slider
//! widens the hollow center; the scatter button flings the cloud
//! outward, and a timer gathers it back a moment later. The hollow is
//! the point: the particles only ever draw its edge.

use std::sync::Arc;

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use verse_host::versehost::render::{
    BufferDesc, BufferUsage, MeshHandle, Node, NodeKey, PrimitiveTopology, RendererBuffer,
    Stage, Vertex,
};
use verse_host::versehost::scene::{
    ActionValue, Ease, Scene, SceneContext, ScenePhase, TimerKey, TimerSet, Tween,
};
use verse_host::versehost::Result;

const PARTICLE_COUNT: usize = 420;
const GATHER_DELAY: f32 = 2.0;

struct Particle {
    angle: f32,
    speed: f32,
    height: f32,
    wobble: f32,
}

pub struct VesselParticles {
    phase: ScenePhase,
    node: Option<NodeKey>,
    buffer: Option<Arc<dyn RendererBuffer>>,
    particles: Vec<Particle>,
    vertices: Vec<Vertex>,
    /// Hollow radius of the vessel, driven by the slider
    emptiness: Tween,
    /// Outward impulse from the scatter button, decaying back to zero
    scatter: Tween,
    gather_timer: Option<TimerKey>,
    timers: TimerSet,
    elapsed: f32,
}

impl VesselParticles {
    pub fn new(seed: u32) -> Self {
        let mut rng = StdRng::seed_from_u64(seed as u64);
        let particles = (0..PARTICLE_COUNT)
            .map(|_| Particle {
                angle: rng.gen_range(0.0..std::f32::consts::TAU),
                speed: rng.gen_range(0.1..0.45),
                height: rng.gen_range(-0.6..0.6),
                wobble: rng.gen_range(0.0..std::f32::consts::TAU),
            })
            .collect();

        Self {
            phase: ScenePhase::new(),
            node: None,
            buffer: None,
            particles,
            vertices: vec![Vertex::new(0.0, 0.0, 0.0); PARTICLE_COUNT],
            emptiness: Tween::settled(0.35),
            scatter: Tween::settled(0.0),
            gather_timer: None,
            timers: TimerSet::new(),
            elapsed: 0.0,
        }
    }

    fn rebuild_vertices(&mut self) {
        let hollow = 0.4 + self.emptiness.value() * 1.2;
        let fling = self.scatter.value();
        for (particle, vertex) in self.particles.iter_mut().zip(self.vertices.iter_mut()) {
            let radius = hollow + 0.25 * (self.elapsed * 0.7 + particle.wobble).sin() + fling * 2.0;
            let position = Vec3::new(
                particle.angle.cos() * radius,
                particle.height + 0.1 * (self.elapsed + particle.wobble).sin(),
                particle.angle.sin() * radius,
            );
            *vertex = Vertex::new(position.x, position.y, position.z);
        }
    }
}

impl Scene for VesselParticles {
    fn activate(&mut self, ctx: &mut SceneContext<'_>) -> Result<()> {
        if !self.phase.activate() {
            return Ok(());
        }
        let size = (PARTICLE_COUNT * std::mem::size_of::<Vertex>()) as u64;
        let buffer = ctx.renderer.lock().unwrap().create_buffer(BufferDesc {
            size,
            usage: BufferUsage::Vertex,
        })?;

        self.rebuild_vertices();
        buffer.update(0, bytemuck::cast_slice(&self.vertices))?;

        self.node = Some(ctx.stage.attach(Node::with_mesh(MeshHandle {
            vertex_buffer: buffer.clone(),
            vertex_count: PARTICLE_COUNT as u32,
            topology: PrimitiveTopology::PointList,
            color: [0.75, 0.82, 1.0, 0.9],
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
        self.elapsed += delta;

        for key in self.timers.tick(delta) {
            if Some(key) == self.gather_timer {
                self.gather_timer = None;
                self.scatter.retarget(0.0, 1.2, Ease::QuadInOut);
            }
        }

        for particle in &mut self.particles {
            particle.angle = (particle.angle + particle.speed * delta)
                .rem_euclid(std::f32::consts::TAU);
        }
        self.emptiness.advance(delta);
        self.scatter.advance(delta);
        self.rebuild_vertices();

        if let Some(buffer) = &self.buffer {
            buffer.update(0, bytemuck::cast_slice(&self.vertices))?;
        }
        Ok(())
    }

    fn handle_action(&mut self, action: &str, value: Option<ActionValue>) {
        if self.phase.is_disposed() {
            return;
        }
        match action {
            "set_emptiness" => {
                if let Some(target) = value.and_then(|v| v.as_number()) {
                    self.emptiness.retarget(target as f32, 0.6, Ease::QuadOut);
                }
            }
            "scatter" => {
                self.scatter.retarget(1.0, 0.3, Ease::QuadOut);
                if let Some(key) = self.gather_timer.take() {
                    self.timers.cancel(key);
                }
                self.gather_timer = Some(self.timers.schedule(GATHER_DELAY, None));
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
        self.timers.clear();
        self.gather_timer = None;
    }

    fn is_active(&self) -> bool {
        self.phase.is_active()
    }

    fn is_disposed(&self) -> bool {
        self.phase.is_disposed()
    }
}

#[cfg(test)]
#[path = "vessel_particles_tests.rs"]
mod tests;
