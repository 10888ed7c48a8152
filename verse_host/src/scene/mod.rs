//! Scene module
//!
//! Provides the verse scene lifecycle contract, the slide index ->
//! factory registry, and scene-owned timers.

mod registry;
mod scene;
mod timer;

pub use registry::SceneRegistry;
pub use scene::{ActionValue, Scene, SceneContext, SceneFactory, ScenePhase};
pub use timer::{TimerKey, TimerSet};
