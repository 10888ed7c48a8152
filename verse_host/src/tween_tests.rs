/// Tests for easing curves and Tween

use super::*;

const EASES: [Ease; 6] = [
    Ease::Linear,
    Ease::QuadIn,
    Ease::QuadOut,
    Ease::QuadInOut,
    Ease::SineInOut,
    Ease::ElasticOut,
];

#[test]
fn test_ease_endpoints_are_exact() {
    for ease in EASES {
        assert_eq!(ease.apply(0.0), 0.0, "{:?} at t=0", ease);
        assert_eq!(ease.apply(1.0), 1.0, "{:?} at t=1", ease);
    }
}

#[test]
fn test_ease_clamps_out_of_range_input() {
    for ease in EASES {
        assert_eq!(ease.apply(-0.5), 0.0);
        assert_eq!(ease.apply(1.5), 1.0);
    }
}

#[test]
fn test_quad_in_out_midpoint() {
    assert!((Ease::QuadInOut.apply(0.5) - 0.5).abs() < 1e-6);
    assert!((Ease::SineInOut.apply(0.5) - 0.5).abs() < 1e-6);
}

#[test]
fn test_tween_runs_from_to() {
    let mut tween = Tween::new(2.0, 6.0, 2.0, Ease::Linear);
    assert_eq!(tween.value(), 2.0);
    assert!(!tween.finished());

    assert_eq!(tween.advance(1.0), 4.0);
    assert_eq!(tween.advance(1.0), 6.0);
    assert!(tween.finished());

    // Advancing past the end stays at the target
    assert_eq!(tween.advance(5.0), 6.0);
}

#[test]
fn test_zero_duration_snaps() {
    let tween = Tween::new(1.0, 9.0, 0.0, Ease::QuadOut);
    assert!(tween.finished());
    assert_eq!(tween.value(), 9.0);
}

#[test]
fn test_settled_tween() {
    let tween = Tween::settled(3.5);
    assert!(tween.finished());
    assert_eq!(tween.value(), 3.5);
    assert_eq!(tween.target(), 3.5);
}

#[test]
fn test_variable_delta_reaches_same_endpoint() {
    let mut coarse = Tween::new(0.0, 1.0, 1.0, Ease::QuadInOut);
    let mut fine = Tween::new(0.0, 1.0, 1.0, Ease::QuadInOut);

    coarse.advance(1.0);
    for _ in 0..16 {
        fine.advance(0.0625);
    }

    assert!((coarse.value() - fine.value()).abs() < 1e-4);
    assert!(coarse.finished() && fine.finished());
}

#[test]
fn test_retarget_starts_from_current_value() {
    let mut tween = Tween::new(0.0, 10.0, 2.0, Ease::Linear);
    tween.advance(1.0);
    assert_eq!(tween.value(), 5.0);

    tween.retarget(0.0, 1.0, Ease::Linear);
    assert_eq!(tween.value(), 5.0);
    assert!(!tween.finished());

    tween.advance(0.5);
    assert_eq!(tween.value(), 2.5);
    tween.advance(0.5);
    assert_eq!(tween.value(), 0.0);
}

#[test]
fn test_negative_delta_is_ignored() {
    let mut tween = Tween::new(0.0, 1.0, 1.0, Ease::Linear);
    tween.advance(0.5);
    let value = tween.value();
    tween.advance(-10.0);
    assert_eq!(tween.value(), value);
}
