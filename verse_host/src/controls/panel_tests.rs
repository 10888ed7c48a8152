/// Tests for ControlPanel
///
/// Covers the re-render idempotence law, focus movement, and the
/// event values each widget kind produces.

use super::*;

fn sample_controls() -> Vec<ControlDescriptor> {
    vec![
        ControlDescriptor::Button {
            id: "scatter".to_string(),
            label: "Scatter".to_string(),
            action: "scatter".to_string(),
        },
        ControlDescriptor::Slider {
            id: "spread".to_string(),
            label: "Spread".to_string(),
            action: "set_spread".to_string(),
            min: 0.0,
            max: 1.0,
            step: 0.1,
            value: 0.5,
        },
        ControlDescriptor::Select {
            id: "basis".to_string(),
            label: "Basis".to_string(),
            action: "set_basis".to_string(),
            options: vec!["x".to_string(), "y".to_string(), "z".to_string()],
        },
    ]
}

fn widget_ids(panel: &ControlPanel) -> Vec<String> {
    panel.widgets().iter().map(|w| w.id().to_string()).collect()
}

// ============================================================================
// Tests: Render
// ============================================================================

#[test]
fn test_render_builds_widgets_in_order() {
    let mut panel = ControlPanel::new();
    panel.render(&sample_controls());

    assert_eq!(panel.len(), 3);
    assert_eq!(widget_ids(&panel), vec!["scatter", "spread", "basis"]);
    assert_eq!(panel.widgets()[0].label(), "Scatter");
}

#[test]
fn test_render_twice_is_idempotent() {
    let controls = sample_controls();
    let mut panel = ControlPanel::new();

    panel.render(&controls);
    let first = panel.widgets().to_vec();

    panel.render(&controls);
    assert_eq!(panel.widgets(), first.as_slice());
    assert_eq!(panel.len(), 3);
    assert_eq!(panel.focus(), 0);
}

#[test]
fn test_render_replaces_previous_widgets() {
    let mut panel = ControlPanel::new();
    panel.render(&sample_controls());
    assert_eq!(panel.len(), 3);

    let next = vec![ControlDescriptor::Button {
        id: "nudge".to_string(),
        label: "Nudge".to_string(),
        action: "nudge".to_string(),
    }];
    panel.render(&next);

    assert_eq!(widget_ids(&panel), vec!["nudge"]);
    assert!(panel.widget("spread").is_none());
}

#[test]
fn test_render_empty_clears_panel() {
    let mut panel = ControlPanel::new();
    panel.render(&sample_controls());
    panel.render(&[]);
    assert!(panel.is_empty());
    assert!(panel.apply(PanelInput::Activate).is_none());
}

#[test]
fn test_duplicate_ids_are_dropped() {
    let mut controls = sample_controls();
    controls.push(ControlDescriptor::Button {
        id: "spread".to_string(),
        label: "Dup".to_string(),
        action: "dup".to_string(),
    });

    let mut panel = ControlPanel::new();
    panel.render(&controls);

    assert_eq!(panel.len(), 3);
    assert_eq!(panel.widget("spread").unwrap().label(), "Spread");
}

#[test]
fn test_render_resets_slider_to_descriptor_value() {
    let controls = sample_controls();
    let mut panel = ControlPanel::new();
    panel.render(&controls);

    // Move focus to the slider and change it
    panel.apply(PanelInput::FocusNext);
    panel.apply(PanelInput::Increase);
    match panel.widget("spread").unwrap() {
        ControlWidget::Slider { current, .. } => assert!((current - 0.6).abs() < 1e-9),
        other => panic!("unexpected widget: {:?}", other),
    }

    // Re-render restores the declared default
    panel.render(&controls);
    match panel.widget("spread").unwrap() {
        ControlWidget::Slider { current, .. } => assert_eq!(*current, 0.5),
        other => panic!("unexpected widget: {:?}", other),
    }
}

// ============================================================================
// Tests: Focus
// ============================================================================

#[test]
fn test_focus_wraps_both_directions() {
    let mut panel = ControlPanel::new();
    panel.render(&sample_controls());

    assert_eq!(panel.focus(), 0);
    panel.apply(PanelInput::FocusNext);
    panel.apply(PanelInput::FocusNext);
    panel.apply(PanelInput::FocusNext);
    assert_eq!(panel.focus(), 0);

    panel.apply(PanelInput::FocusPrev);
    assert_eq!(panel.focus(), 2);
}

// ============================================================================
// Tests: Events
// ============================================================================

#[test]
fn test_button_activate_fires_action_without_value() {
    let mut panel = ControlPanel::new();
    panel.render(&sample_controls());

    let event = panel.apply(PanelInput::Activate).unwrap();
    assert_eq!(event.action, "scatter");
    assert_eq!(event.value, None);
}

#[test]
fn test_button_ignores_step_inputs() {
    let mut panel = ControlPanel::new();
    panel.render(&sample_controls());

    assert!(panel.apply(PanelInput::Increase).is_none());
    assert!(panel.apply(PanelInput::Decrease).is_none());
}

#[test]
fn test_slider_steps_and_emits_number() {
    let mut panel = ControlPanel::new();
    panel.render(&sample_controls());
    panel.apply(PanelInput::FocusNext);

    let event = panel.apply(PanelInput::Increase).unwrap();
    assert_eq!(event.action, "set_spread");
    match event.value {
        Some(crate::scene::ActionValue::Number(n)) => assert!((n - 0.6).abs() < 1e-9),
        other => panic!("unexpected value: {:?}", other),
    }
}

#[test]
fn test_slider_clamps_silently_at_bounds() {
    let mut panel = ControlPanel::new();
    panel.render(&sample_controls());
    panel.apply(PanelInput::FocusNext);

    // Walk to the top of the range
    for _ in 0..10 {
        panel.apply(PanelInput::Increase);
    }
    match panel.widget("spread").unwrap() {
        ControlWidget::Slider { current, .. } => assert_eq!(*current, 1.0),
        other => panic!("unexpected widget: {:?}", other),
    }

    // Already at the bound: no event, no change
    assert!(panel.apply(PanelInput::Increase).is_none());
}

#[test]
fn test_select_cycles_and_emits_choice() {
    let mut panel = ControlPanel::new();
    panel.render(&sample_controls());
    panel.apply(PanelInput::FocusNext);
    panel.apply(PanelInput::FocusNext);

    let event = panel.apply(PanelInput::Increase).unwrap();
    assert_eq!(event.action, "set_basis");
    assert_eq!(
        event.value,
        Some(crate::scene::ActionValue::Choice("y".to_string()))
    );

    // Wrap backwards from "y" through "x" to "z"
    panel.apply(PanelInput::Decrease);
    let event = panel.apply(PanelInput::Decrease).unwrap();
    assert_eq!(
        event.value,
        Some(crate::scene::ActionValue::Choice("z".to_string()))
    );
}

#[test]
fn test_empty_panel_swallows_everything() {
    let mut panel = ControlPanel::new();
    for input in [
        PanelInput::FocusNext,
        PanelInput::FocusPrev,
        PanelInput::Activate,
        PanelInput::Increase,
        PanelInput::Decrease,
    ] {
        assert!(panel.apply(input).is_none());
    }
}
