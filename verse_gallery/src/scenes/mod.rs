//! The verse scenes.
//!
//! One module per verse, each a self-contained `Scene` implementation:
//! its own stage nodes, GPU buffers, tweens, timers and action handlers.
//! `registry()` is the data-driven slide index -> factory table; its
//! order must match `assets/verses.ron`.

mod qubit_poise;
mod still_pendulum;
mod uncarved_block;
mod vessel_particles;

#[cfg(test)]
pub mod test_support;

pub use qubit_poise::QubitPoise;
pub use still_pendulum::StillPendulum;
pub use uncarved_block::UncarvedBlock;
pub use vessel_particles::VesselParticles;

use verse_host::versehost::scene::{Scene, SceneRegistry};

/// Build the gallery's scene registry, one factory per verse in
/// content order.
pub fn registry() -> SceneRegistry {
    let mut registry = SceneRegistry::new();
    registry.register(|ctx| {
        Ok(Box::new(VesselParticles::new(ctx.entry.number)) as Box<dyn Scene>)
    });
    registry.register(|_ctx| Ok(Box::new(UncarvedBlock::new()) as Box<dyn Scene>));
    registry.register(|_ctx| Ok(Box::new(QubitPoise::new()) as Box<dyn Scene>));
    registry.register(|_ctx| Ok(Box::new(StillPendulum::new()) as Box<dyn Scene>));
    registry
}

#[cfg(test)]
#[path = "gallery_tests.rs"]
mod tests;
