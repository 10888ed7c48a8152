/// Host — the orchestrator owning the render loop, stage, camera and the
/// current scene pointer.
///
/// The Host is an explicit struct handed to the application loop, never a
/// global: scenes receive everything they may touch through
/// `SceneContext` and their `update` parameters.
///
/// Navigation is a state machine over the slide index. The boundary
/// policy is clamp, not wraparound: navigating past either end is a
/// silent no-op. Switching slides fully disposes the previous scene's
/// resources before constructing the next.

use std::sync::{Arc, Mutex};
use std::time::Instant;

use crate::camera::Camera;
use crate::content::{ContentStore, SlideEntry};
use crate::controls::{ControlPanel, PanelInput};
use crate::error::{Error, Result};
use crate::renderer::{DrawCall, Renderer, Viewport};
use crate::scene::{Scene, SceneContext, SceneRegistry};
use crate::stage::Stage;
use crate::{host_error, host_info, host_trace, host_warn};
use glam::{Mat4, Vec3};

/// Host configuration
#[derive(Debug, Clone)]
pub struct HostConfig {
    /// Slide shown at startup (clamped into range)
    pub initial_slide: usize,
    /// Initial viewport
    pub viewport: Viewport,
    /// Upper bound on the per-frame delta, in seconds. Protects scene
    /// simulations from one giant step after a stall or a suspend.
    pub max_delta: f32,
    /// Fixed timestep in seconds instead of the wall clock. Used for
    /// deterministic stepping (tests, frame capture); None for live use.
    pub fixed_delta: Option<f32>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            initial_slide: 0,
            viewport: Viewport::with_size(1280.0, 720.0),
            max_delta: 0.1,
            fixed_delta: None,
        }
    }
}

/// What one `frame()` call did, for callers that want to observe the loop
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// Delta passed to the scene, in seconds
    pub delta: f32,
    /// Whether the active scene's update ran and succeeded
    pub updated: bool,
    /// Number of draw calls recorded
    pub drawn: u32,
}

/// Monotonic frame clock producing clamped deltas
struct FrameClock {
    last: Option<Instant>,
    max_delta: f32,
    fixed_delta: Option<f32>,
}

impl FrameClock {
    fn new(max_delta: f32, fixed_delta: Option<f32>) -> Self {
        Self {
            last: None,
            max_delta,
            fixed_delta,
        }
    }

    fn tick(&mut self) -> f32 {
        if let Some(fixed) = self.fixed_delta {
            return fixed;
        }
        let now = Instant::now();
        let delta = match self.last {
            Some(last) => now.duration_since(last).as_secs_f32().min(self.max_delta),
            None => 0.0,
        };
        self.last = Some(now);
        delta
    }
}

/// The scene host.
///
/// Owns the renderer handle, the stage, the camera, the control panel and
/// the current scene. One Host lives for the whole session.
pub struct Host {
    renderer: Arc<Mutex<dyn Renderer>>,
    registry: SceneRegistry,
    content: ContentStore,
    panel: ControlPanel,
    stage: Stage,
    camera: Camera,
    clock: FrameClock,
    viewport: Viewport,
    current_index: usize,
    current_scene: Option<Box<dyn Scene>>,
    scene_failed: bool,
    playing: bool,
    show_text: bool,
}

impl Host {
    /// Create a host and activate the initial slide.
    ///
    /// # Errors
    ///
    /// Returns an error if the registry is empty, if the registry and
    /// content disagree on the slide count, or if the initial scene
    /// fails to construct or activate.
    pub fn new(
        renderer: Arc<Mutex<dyn Renderer>>,
        registry: SceneRegistry,
        content: ContentStore,
        config: HostConfig,
    ) -> Result<Self> {
        if registry.is_empty() {
            host_error!("versehost::Host", "scene registry is empty");
            return Err(Error::InitializationFailed(
                "scene registry is empty".to_string(),
            ));
        }
        if registry.len() != content.len() {
            host_error!(
                "versehost::Host",
                "registry has {} scenes but content has {} entries",
                registry.len(),
                content.len()
            );
            return Err(Error::InitializationFailed(format!(
                "registry/content mismatch: {} scenes, {} entries",
                registry.len(),
                content.len()
            )));
        }

        let viewport = config.viewport;
        let initial = config.initial_slide.min(content.len() - 1);
        let camera = Camera::new(Self::view(), Self::projection(viewport), viewport);

        let mut host = Self {
            renderer,
            registry,
            content,
            panel: ControlPanel::new(),
            stage: Stage::new(),
            camera,
            clock: FrameClock::new(config.max_delta, config.fixed_delta),
            viewport,
            current_index: initial,
            current_scene: None,
            scene_failed: false,
            playing: true,
            show_text: true,
        };
        host.enter_slide(initial)?;
        Ok(host)
    }

    /// Fixed gallery eye: straight-on, slightly back
    fn view() -> Mat4 {
        Mat4::look_at_rh(Vec3::new(0.0, 0.0, 6.0), Vec3::ZERO, Vec3::Y)
    }

    fn projection(viewport: Viewport) -> Mat4 {
        Mat4::perspective_rh(
            std::f32::consts::FRAC_PI_4,
            viewport.aspect_ratio(),
            0.1,
            100.0,
        )
    }

    /// Render the panel for a slide and construct + activate its scene.
    ///
    /// The slide index must already be validated.
    fn enter_slide(&mut self, index: usize) -> Result<()> {
        let entry = self.content.entry(index).ok_or(Error::OutOfRange {
            index,
            len: self.content.len(),
        })?;
        self.panel.render(&entry.controls);

        let factory = self.registry.get(index)?;
        let mut ctx = SceneContext {
            renderer: &self.renderer,
            stage: &mut self.stage,
            viewport: self.viewport,
            entry,
        };
        let mut scene = factory(&mut ctx)
            .map_err(|e| Error::SceneFailed(format!("slide {}: construct: {}", index, e)))?;
        if let Err(e) = scene.activate(&mut ctx) {
            // Roll back whatever the half-activated scene attached
            scene.dispose(ctx.stage);
            return Err(Error::SceneFailed(format!(
                "slide {}: activate: {}",
                index, e
            )));
        }

        self.current_scene = Some(scene);
        self.scene_failed = false;
        host_info!(
            "versehost::Host",
            "slide {} active (verse {})",
            index,
            entry.number
        );
        Ok(())
    }

    /// Navigate relative to the current slide.
    ///
    /// The target is clamped to `[0, N-1]`; a clamped-to-self navigation
    /// is a no-op, not an error and not a wraparound.
    pub fn navigate(&mut self, delta: i32) -> Result<()> {
        let next = clamp_index(self.current_index, delta, self.content.len());
        self.navigate_to(next)
    }

    /// Navigate to an absolute slide index (clamped into range).
    ///
    /// Transition order: resolve the target factory, then deactivate and
    /// dispose the old scene, then build the new panel and scene. A
    /// registry gap keeps the previous scene alive; a scene construction
    /// failure leaves the slide empty and surfaces the error.
    pub fn navigate_to(&mut self, index: usize) -> Result<()> {
        let next = index.min(self.content.len() - 1);
        if next == self.current_index {
            return Ok(());
        }

        // Factory first: never tear down the old scene for a target that
        // cannot be built at all.
        if let Err(e) = self.registry.get(next) {
            host_error!(
                "versehost::Host",
                "no scene factory for slide {}: {} (keeping slide {})",
                next,
                e,
                self.current_index
            );
            return Err(e);
        }

        if let Some(mut old) = self.current_scene.take() {
            old.deactivate(&mut self.stage);
            old.dispose(&mut self.stage);
        }
        self.current_index = next;

        match self.enter_slide(next) {
            Ok(()) => Ok(()),
            Err(e) => {
                host_error!("versehost::Host", "slide {} failed to start: {}", next, e);
                self.current_scene = None;
                self.scene_failed = true;
                Err(e)
            }
        }
    }

    /// Run one iteration of the render loop.
    ///
    /// Never panics and never returns an error: a failing scene update is
    /// logged once and suspends further updates for that scene (the last
    /// good frame keeps rendering); backend frame errors are logged and
    /// the frame is dropped.
    pub fn frame(&mut self) -> FrameReport {
        let delta = self.clock.tick();

        let mut updated = false;
        if self.playing && !self.scene_failed {
            if let Some(scene) = self.current_scene.as_mut() {
                match scene.update(&mut self.stage, delta) {
                    Ok(()) => updated = true,
                    Err(e) => {
                        host_error!(
                            "versehost::Host",
                            "scene update failed on slide {}: {} (updates suspended)",
                            self.current_index,
                            e
                        );
                        self.scene_failed = true;
                    }
                }
            }
        }

        let drawn = self.compose();
        FrameReport {
            delta,
            updated,
            drawn,
        }
    }

    /// Record one draw per visible stage node and submit the frame
    fn compose(&self) -> u32 {
        let mut renderer = match self.renderer.lock() {
            Ok(guard) => guard,
            Err(_) => {
                host_error!("versehost::Host", "renderer lock poisoned");
                return 0;
            }
        };

        let mut frame = match renderer.begin_frame() {
            Ok(frame) => frame,
            Err(e) => {
                host_warn!("versehost::Host", "begin_frame failed: {}", e);
                return 0;
            }
        };

        if let Err(e) = frame.set_viewport(self.viewport) {
            host_warn!("versehost::Host", "set_viewport failed: {}", e);
        }

        let view_projection = self.camera.view_projection_matrix();
        let mut drawn = 0;
        for (_, node) in self.stage.visible() {
            let Some(mesh) = &node.mesh else { continue };
            let call = DrawCall {
                vertex_buffer: mesh.vertex_buffer.clone(),
                vertex_count: mesh.vertex_count,
                topology: mesh.topology,
                mvp: view_projection * node.transform,
                color: mesh.color,
                texture: mesh.texture.clone(),
            };
            match frame.draw(call) {
                Ok(()) => drawn += 1,
                Err(e) => host_warn!("versehost::Host", "draw skipped: {}", e),
            }
        }

        if let Err(e) = renderer.end_frame(frame) {
            host_warn!("versehost::Host", "end_frame failed: {}", e);
        }
        drawn
    }

    /// Apply one control-panel interaction and route any resulting
    /// action to the active scene.
    pub fn panel_input(&mut self, input: PanelInput) {
        let Some(event) = self.panel.apply(input) else {
            return;
        };
        if self.scene_failed {
            host_trace!(
                "versehost::Host",
                "action '{}' dropped: scene failed",
                event.action
            );
            return;
        }
        match self.current_scene.as_mut() {
            Some(scene) => scene.handle_action(&event.action, event.value),
            None => host_trace!(
                "versehost::Host",
                "action '{}' dropped: no active scene",
                event.action
            ),
        }
    }

    /// Window resize: update viewport, camera projection and the backend
    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport = Viewport::with_size(width as f32, height as f32);
        self.camera.set_viewport(self.viewport);
        self.camera.set_projection(Self::projection(self.viewport));
        match self.renderer.lock() {
            Ok(mut renderer) => renderer.resize(width, height),
            Err(_) => host_error!("versehost::Host", "renderer lock poisoned on resize"),
        }
    }

    // ===== ACCESSORS =====

    /// Current slide index
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Number of slides
    pub fn slide_count(&self) -> usize {
        self.content.len()
    }

    /// Content entry for the current slide
    pub fn current_entry(&self) -> Option<&SlideEntry> {
        self.content.entry(self.current_index)
    }

    /// Whether a scene is active for the current slide
    pub fn has_active_scene(&self) -> bool {
        self.current_scene
            .as_ref()
            .map(|scene| scene.is_active())
            .unwrap_or(false)
    }

    /// Whether the current scene has been suspended after an update error
    pub fn scene_failed(&self) -> bool {
        self.scene_failed
    }

    /// Whether scene updates run each frame
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Pause or resume scene updates
    pub fn set_playing(&mut self, playing: bool) {
        self.playing = playing;
    }

    /// Toggle play/pause; returns the new state
    pub fn toggle_playing(&mut self) -> bool {
        self.playing = !self.playing;
        self.playing
    }

    /// Whether the verse text overlay is shown
    pub fn show_text(&self) -> bool {
        self.show_text
    }

    /// Toggle the verse text overlay; returns the new state
    pub fn toggle_text(&mut self) -> bool {
        self.show_text = !self.show_text;
        self.show_text
    }

    /// The control panel (for text UIs rendering widget state)
    pub fn panel(&self) -> &ControlPanel {
        &self.panel
    }

    /// The live stage
    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    /// The camera
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// The shared renderer handle
    pub fn renderer(&self) -> &Arc<Mutex<dyn Renderer>> {
        &self.renderer
    }
}

/// Saturating index arithmetic clamped to `[0, len-1]`
fn clamp_index(current: usize, delta: i32, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let target = current as i64 + delta as i64;
    target.clamp(0, (len - 1) as i64) as usize
}

#[cfg(test)]
#[path = "host_tests.rs"]
mod tests;
