//! Verse 20 — alone and still.
//!
//! A state vector poised on a point-cloud sphere: every direction at
//! once until something disturbs it. The "phase" slider swings the
//! azimuth, "basis" snaps the vector to a measurement axis, and
//! "collapse" drops it onto the pole — a timer then lets it drift back
//! into superposition. The sphere itself only ever turns slowly; the
//! stillness is the content.

use std::f32::consts::{FRAC_PI_2, PI};
use std::sync::Arc;

use glam::{Mat4, Vec3};

use verse_host::versehost::render::{
    BufferDesc, BufferUsage, MeshHandle, Node, NodeKey, PrimitiveTopology, RendererBuffer,
    RendererTexture, Stage, TextureDesc, TextureFormat, TextureUsage, Vertex,
};
use verse_host::versehost::scene::{
    ActionValue, Ease, Scene, SceneContext, ScenePhase, TimerKey, TimerSet, Tween,
};
use verse_host::versehost::Result;

const RINGS: usize = 12;
const POINTS_PER_RING: usize = 24;
const SPHERE_RADIUS: f32 = 1.4;
const RECOHERE_DELAY: f32 = 1.5;
const TEXTURE_SIZE: u32 = 8;

pub struct QubitPoise {
    phase: ScenePhase,
    sphere_node: Option<NodeKey>,
    vector_node: Option<NodeKey>,
    sphere_buffer: Option<Arc<dyn RendererBuffer>>,
    vector_buffer: Option<Arc<dyn RendererBuffer>>,
    texture: Option<Arc<dyn RendererTexture>>,
    /// Polar angle of the state vector (0 = north pole)
    theta: Tween,
    /// Azimuth of the state vector
    phi: Tween,
    recohere_timer: Option<TimerKey>,
    timers: TimerSet,
    elapsed: f32,
}

impl QubitPoise {
    pub fn new() -> Self {
        Self {
            phase: ScenePhase::new(),
            sphere_node: None,
            vector_node: None,
            sphere_buffer: None,
            vector_buffer: None,
            texture: None,
            theta: Tween::settled(FRAC_PI_2),
            phi: Tween::settled(0.0),
            recohere_timer: None,
            timers: TimerSet::new(),
            elapsed: 0.0,
        }
    }

    fn sphere_vertices() -> Vec<Vertex> {
        let mut vertices = Vec::with_capacity(RINGS * POINTS_PER_RING);
        for ring in 0..RINGS {
            let theta = PI * (ring as f32 + 0.5) / RINGS as f32;
            for point in 0..POINTS_PER_RING {
                let phi = std::f32::consts::TAU * point as f32 / POINTS_PER_RING as f32;
                vertices.push(Vertex::new(
                    SPHERE_RADIUS * theta.sin() * phi.cos(),
                    SPHERE_RADIUS * theta.cos(),
                    SPHERE_RADIUS * theta.sin() * phi.sin(),
                ));
            }
        }
        vertices
    }

    /// Vertical gradient tint, brightest at the pole
    fn texture_pixels() -> Vec<u8> {
        let mut pixels = Vec::with_capacity((TEXTURE_SIZE * TEXTURE_SIZE * 4) as usize);
        for y in 0..TEXTURE_SIZE {
            let brightness = 140 + (115 * (TEXTURE_SIZE - 1 - y) / (TEXTURE_SIZE - 1)) as u8;
            for _ in 0..TEXTURE_SIZE {
                pixels.extend_from_slice(&[brightness, brightness, 255, 255]);
            }
        }
        pixels
    }

    fn state_tip(&self) -> Vec3 {
        let theta = self.theta.value();
        let phi = self.phi.value();
        Vec3::new(
            SPHERE_RADIUS * theta.sin() * phi.cos(),
            SPHERE_RADIUS * theta.cos(),
            SPHERE_RADIUS * theta.sin() * phi.sin(),
        )
    }

    fn write_vector(&self) -> Result<()> {
        if let Some(buffer) = &self.vector_buffer {
            let tip = self.state_tip();
            let vertices = [Vertex::new(0.0, 0.0, 0.0), Vertex::new(tip.x, tip.y, tip.z)];
            buffer.update(0, bytemuck::cast_slice(&vertices))?;
        }
        Ok(())
    }
}

impl Scene for QubitPoise {
    fn activate(&mut self, ctx: &mut SceneContext<'_>) -> Result<()> {
        if !self.phase.activate() {
            return Ok(());
        }

        let mut renderer = ctx.renderer.lock().unwrap();

        let sphere_vertices = Self::sphere_vertices();
        let sphere_buffer = renderer.create_buffer(BufferDesc {
            size: (sphere_vertices.len() * std::mem::size_of::<Vertex>()) as u64,
            usage: BufferUsage::Vertex,
        })?;
        sphere_buffer.update(0, bytemuck::cast_slice(&sphere_vertices))?;

        let vector_buffer = renderer.create_buffer(BufferDesc {
            size: (2 * std::mem::size_of::<Vertex>()) as u64,
            usage: BufferUsage::Vertex,
        })?;

        let texture = renderer.create_texture(TextureDesc {
            width: TEXTURE_SIZE,
            height: TEXTURE_SIZE,
            format: TextureFormat::R8G8B8A8_UNORM,
            usage: TextureUsage::Sampled,
            data: Some(Self::texture_pixels()),
        })?;
        drop(renderer);

        self.sphere_node = Some(ctx.stage.attach(Node::with_mesh(MeshHandle {
            vertex_buffer: sphere_buffer.clone(),
            vertex_count: (RINGS * POINTS_PER_RING) as u32,
            topology: PrimitiveTopology::PointList,
            color: [0.45, 0.55, 0.9, 0.8],
            texture: Some(texture.clone()),
        })));
        self.vector_node = Some(ctx.stage.attach(Node::with_mesh(MeshHandle {
            vertex_buffer: vector_buffer.clone(),
            vertex_count: 2,
            topology: PrimitiveTopology::LineList,
            color: [1.0, 0.9, 0.4, 1.0],
            texture: None,
        })));

        self.sphere_buffer = Some(sphere_buffer);
        self.vector_buffer = Some(vector_buffer);
        self.texture = Some(texture);
        self.write_vector()?;
        Ok(())
    }

    fn deactivate(&mut self, stage: &mut Stage) {
        self.phase.deactivate();
        if let Some(key) = self.sphere_node.take() {
            stage.detach(key);
        }
        if let Some(key) = self.vector_node.take() {
            stage.detach(key);
        }
    }

    fn update(&mut self, stage: &mut Stage, delta: f32) -> Result<()> {
        if !self.phase.can_update() {
            return Ok(());
        }
        self.elapsed += delta;

        for key in self.timers.tick(delta) {
            if Some(key) == self.recohere_timer {
                self.recohere_timer = None;
                self.theta.retarget(FRAC_PI_2, 1.0, Ease::SineInOut);
            }
        }

        self.theta.advance(delta);
        self.phi.advance(delta);
        self.write_vector()?;

        if let Some(key) = self.sphere_node {
            stage.set_transform(key, Mat4::from_rotation_y(self.elapsed * 0.1));
        }
        Ok(())
    }

    fn handle_action(&mut self, action: &str, value: Option<ActionValue>) {
        if self.phase.is_disposed() {
            return;
        }
        match action {
            "set_phase" => {
                if let Some(target) = value.and_then(|v| v.as_number()) {
                    self.phi.retarget(target as f32, 0.4, Ease::SineInOut);
                }
            }
            "set_basis" => {
                let Some(choice) = value.as_ref().and_then(|v| v.as_choice()) else {
                    return;
                };
                let (theta, phi) = match choice {
                    "x" => (FRAC_PI_2, 0.0),
                    "y" => (FRAC_PI_2, FRAC_PI_2),
                    "z" => (0.0, 0.0),
                    _ => return,
                };
                self.theta.retarget(theta, 0.6, Ease::QuadInOut);
                self.phi.retarget(phi, 0.6, Ease::QuadInOut);
            }
            "collapse" => {
                self.theta.retarget(0.0, 0.25, Ease::QuadIn);
                if let Some(key) = self.recohere_timer.take() {
                    self.timers.cancel(key);
                }
                self.recohere_timer = Some(self.timers.schedule(RECOHERE_DELAY, None));
            }
            _ => {}
        }
    }

    fn dispose(&mut self, stage: &mut Stage) {
        if !self.phase.dispose() {
            return;
        }
        if let Some(key) = self.sphere_node.take() {
            stage.detach(key);
        }
        if let Some(key) = self.vector_node.take() {
            stage.detach(key);
        }
        self.sphere_buffer = None;
        self.vector_buffer = None;
        self.texture = None;
        self.timers.clear();
        self.recohere_timer = None;
    }

    fn is_active(&self) -> bool {
        self.phase.is_active()
    }

    fn is_disposed(&self) -> bool {
        self.phase.is_disposed()
    }
}

impl Default for QubitPoise {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "qubit_poise_tests.rs"]
mod tests;
