/// ControlPanel — binds declarative descriptors to live widgets.
///
/// `render` rebuilds the widget list from a descriptor slice; rendering
/// is idempotent, so re-rendering the same list yields the same widget
/// set with no duplicates. Interactions come in as `PanelInput` and go
/// out as `ControlEvent`s that the Host routes to the active scene's
/// `handle_action`.

use rustc_hash::FxHashMap;

use crate::controls::ControlDescriptor;
use crate::host_warn;
use crate::scene::ActionValue;

/// One keyboard-driven interaction with the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelInput {
    /// Move focus to the next widget (wraps)
    FocusNext,
    /// Move focus to the previous widget (wraps)
    FocusPrev,
    /// Press the focused button / cycle the focused select forward
    Activate,
    /// Step the focused slider up / cycle the focused select forward
    Increase,
    /// Step the focused slider down / cycle the focused select backward
    Decrease,
}

/// An action fired by a widget, addressed to the active scene
#[derive(Debug, Clone, PartialEq)]
pub struct ControlEvent {
    /// Scene action id
    pub action: String,
    /// Slider value / select choice; None for buttons
    pub value: Option<ActionValue>,
}

/// Live widget state built from one descriptor
#[derive(Debug, Clone, PartialEq)]
pub enum ControlWidget {
    Button {
        id: String,
        label: String,
        action: String,
    },
    Slider {
        id: String,
        label: String,
        action: String,
        min: f64,
        max: f64,
        step: f64,
        current: f64,
    },
    Select {
        id: String,
        label: String,
        action: String,
        options: Vec<String>,
        selected: usize,
    },
}

impl ControlWidget {
    /// Stable widget id
    pub fn id(&self) -> &str {
        match self {
            ControlWidget::Button { id, .. }
            | ControlWidget::Slider { id, .. }
            | ControlWidget::Select { id, .. } => id,
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &str {
        match self {
            ControlWidget::Button { label, .. }
            | ControlWidget::Slider { label, .. }
            | ControlWidget::Select { label, .. } => label,
        }
    }

    /// One-line description of the widget and its current state,
    /// for text UIs and logs
    pub fn describe(&self) -> String {
        match self {
            ControlWidget::Button { label, .. } => format!("[{}]", label),
            ControlWidget::Slider { label, current, .. } => {
                format!("{}: {:.2}", label, current)
            }
            ControlWidget::Select {
                label,
                options,
                selected,
                ..
            } => match options.get(*selected) {
                Some(option) => format!("{}: {}", label, option),
                None => format!("{}: -", label),
            },
        }
    }

    fn from_descriptor(descriptor: &ControlDescriptor) -> Self {
        match descriptor {
            ControlDescriptor::Button { id, label, action } => ControlWidget::Button {
                id: id.clone(),
                label: label.clone(),
                action: action.clone(),
            },
            ControlDescriptor::Slider {
                id,
                label,
                action,
                min,
                max,
                step,
                value,
            } => ControlWidget::Slider {
                id: id.clone(),
                label: label.clone(),
                action: action.clone(),
                min: *min,
                max: *max,
                step: *step,
                current: value.clamp(*min, *max),
            },
            ControlDescriptor::Select {
                id,
                label,
                action,
                options,
            } => ControlWidget::Select {
                id: id.clone(),
                label: label.clone(),
                action: action.clone(),
                options: options.clone(),
                selected: 0,
            },
        }
    }
}

/// The control panel: widgets plus keyboard focus
pub struct ControlPanel {
    widgets: Vec<ControlWidget>,
    index_by_id: FxHashMap<String, usize>,
    focus: usize,
}

impl ControlPanel {
    /// Create a new empty panel
    pub fn new() -> Self {
        Self {
            widgets: Vec::new(),
            index_by_id: FxHashMap::default(),
            focus: 0,
        }
    }

    /// Rebuild the panel from a descriptor list.
    ///
    /// Previously rendered widgets are destroyed first; calling twice
    /// with the same list produces the same visible state, not a
    /// duplicate. Descriptors with a duplicate id are dropped with a
    /// warning. Focus resets to the first widget.
    pub fn render(&mut self, controls: &[ControlDescriptor]) {
        self.widgets.clear();
        self.index_by_id.clear();
        self.focus = 0;

        for descriptor in controls {
            if self.index_by_id.contains_key(descriptor.id()) {
                host_warn!(
                    "versehost::ControlPanel",
                    "duplicate control id '{}' dropped",
                    descriptor.id()
                );
                continue;
            }
            self.index_by_id
                .insert(descriptor.id().to_string(), self.widgets.len());
            self.widgets.push(ControlWidget::from_descriptor(descriptor));
        }
    }

    /// All widgets, in descriptor order
    pub fn widgets(&self) -> &[ControlWidget] {
        &self.widgets
    }

    /// Widget by id
    pub fn widget(&self, id: &str) -> Option<&ControlWidget> {
        self.index_by_id
            .get(id)
            .and_then(|index| self.widgets.get(*index))
    }

    /// Index of the focused widget
    pub fn focus(&self) -> usize {
        self.focus
    }

    /// The focused widget, if the panel is not empty
    pub fn focused(&self) -> Option<&ControlWidget> {
        self.widgets.get(self.focus)
    }

    /// Number of widgets
    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    /// Whether the panel has no widgets
    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Apply one interaction.
    ///
    /// Returns the event to deliver to the active scene, if the
    /// interaction produced one. Slider steps that are already clamped
    /// at their bound produce no event (the value did not change).
    pub fn apply(&mut self, input: PanelInput) -> Option<ControlEvent> {
        if self.widgets.is_empty() {
            return None;
        }

        let is_slider = matches!(self.widgets[self.focus], ControlWidget::Slider { .. });
        let is_select = matches!(self.widgets[self.focus], ControlWidget::Select { .. });

        match input {
            PanelInput::FocusNext => {
                self.focus = (self.focus + 1) % self.widgets.len();
                None
            }
            PanelInput::FocusPrev => {
                self.focus = (self.focus + self.widgets.len() - 1) % self.widgets.len();
                None
            }
            PanelInput::Activate => {
                if is_select {
                    self.cycle_select(1)
                } else {
                    self.press_button()
                }
            }
            PanelInput::Increase => {
                if is_slider {
                    self.step_slider(1.0)
                } else if is_select {
                    self.cycle_select(1)
                } else {
                    None
                }
            }
            PanelInput::Decrease => {
                if is_slider {
                    self.step_slider(-1.0)
                } else if is_select {
                    self.cycle_select(-1)
                } else {
                    None
                }
            }
        }
    }

    fn press_button(&mut self) -> Option<ControlEvent> {
        if let ControlWidget::Button { action, .. } = &self.widgets[self.focus] {
            return Some(ControlEvent {
                action: action.clone(),
                value: None,
            });
        }
        None
    }

    fn step_slider(&mut self, direction: f64) -> Option<ControlEvent> {
        if let ControlWidget::Slider {
            action,
            min,
            max,
            step,
            current,
            ..
        } = &mut self.widgets[self.focus]
        {
            let next = (*current + direction * *step).clamp(*min, *max);
            if next == *current {
                return None;
            }
            *current = next;
            return Some(ControlEvent {
                action: action.clone(),
                value: Some(ActionValue::Number(next)),
            });
        }
        None
    }

    fn cycle_select(&mut self, direction: isize) -> Option<ControlEvent> {
        if let ControlWidget::Select {
            action,
            options,
            selected,
            ..
        } = &mut self.widgets[self.focus]
        {
            if options.is_empty() {
                return None;
            }
            let len = options.len() as isize;
            let next = (*selected as isize + direction).rem_euclid(len) as usize;
            *selected = next;
            return Some(ControlEvent {
                action: action.clone(),
                value: Some(ActionValue::Choice(options[next].clone())),
            });
        }
        None
    }
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "panel_tests.rs"]
mod tests;
