/// ControlDescriptor — one declarative control-panel entry.
///
/// Descriptors are data, owned by a verse's SlideEntry and consumed only
/// by the panel binder. In the RON content file they appear as
/// `button(...)`, `slider(...)` and `select(...)` variants.

use serde::{Deserialize, Serialize};

/// One interactive control and the scene action it triggers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlDescriptor {
    /// Momentary button; fires its action with no value
    Button {
        id: String,
        label: String,
        action: String,
    },
    /// Stepped numeric slider; fires its action with the new value
    Slider {
        id: String,
        label: String,
        action: String,
        min: f64,
        max: f64,
        step: f64,
        value: f64,
    },
    /// Option cycle; fires its action with the selected option string
    Select {
        id: String,
        label: String,
        action: String,
        options: Vec<String>,
    },
}

impl ControlDescriptor {
    /// Stable widget id
    pub fn id(&self) -> &str {
        match self {
            ControlDescriptor::Button { id, .. }
            | ControlDescriptor::Slider { id, .. }
            | ControlDescriptor::Select { id, .. } => id,
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &str {
        match self {
            ControlDescriptor::Button { label, .. }
            | ControlDescriptor::Slider { label, .. }
            | ControlDescriptor::Select { label, .. } => label,
        }
    }

    /// Scene action id this control triggers
    pub fn action(&self) -> &str {
        match self {
            ControlDescriptor::Button { action, .. }
            | ControlDescriptor::Slider { action, .. }
            | ControlDescriptor::Select { action, .. } => action,
        }
    }
}
