/*!
# Verse Host

Core traits and types for the verse scene host.

This crate provides the platform-agnostic machinery for a slide-driven
gallery of animated scenes: one scene per verse of a text, each scene a
self-contained unit with its own render-graph subtree, action handlers
and animation state. Rendering backends (wgpu, etc.) are loaded at
runtime via the plugin system.

## Architecture

- **Scene**: lifecycle contract for one verse scene (activate /
  deactivate / update / dispose) plus named action dispatch
- **SceneRegistry**: ordered slide index -> scene factory table
- **ControlPanel**: declarative control descriptors bound to the active
  scene's action handlers
- **Host**: orchestrator owning the render loop, stage, camera and the
  current scene pointer
- **ContentStore**: immutable per-verse text, concepts and control
  descriptors
- **Renderer**: factory trait for GPU resources, implemented by backend
  crates

Backend implementations provide concrete types that implement the
renderer traits.
*/

// Internal modules
mod error;
mod host;
pub mod camera;
pub mod content;
pub mod controls;
pub mod log;
pub mod renderer;
pub mod scene;
pub mod stage;
pub mod tween;

// Main versehost namespace module
pub mod versehost {
    // Error types
    pub use crate::error::{Error, Result};

    // Host orchestrator
    pub use crate::host::{FrameReport, Host, HostConfig};

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{DefaultLogger, LogEntry, LogSeverity, Logger};
        // Note: host_* macros are NOT re-exported here - they are internal only
    }

    // Render sub-module with the renderer seam, stage and camera
    pub mod render {
        pub use crate::camera::*;
        pub use crate::renderer::*;
        pub use crate::stage::*;
    }

    // Scene sub-module (contract, registry, timers, tweens)
    pub mod scene {
        pub use crate::scene::*;
        pub use crate::tween::*;
    }

    // Content sub-module (verse entries and control descriptors)
    pub mod content {
        pub use crate::content::*;
        pub use crate::controls::*;
    }
}

// Re-export math library at crate root
pub use glam;
