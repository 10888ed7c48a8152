//! Controls module
//!
//! Declarative control descriptors (owned by verse content) and the
//! panel binder that turns them into live widgets routed to the active
//! scene's action handlers.

mod descriptor;
mod panel;

pub use descriptor::ControlDescriptor;
pub use panel::{ControlEvent, ControlPanel, ControlWidget, PanelInput};
