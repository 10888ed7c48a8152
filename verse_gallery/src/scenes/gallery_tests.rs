/// Tests tying the registry, the content file and the scenes together:
/// the shipped verses.ron must line up with the factories, and every
/// declared control action must be wired into its scene.

use super::*;
use crate::scenes::test_support::NullRenderer;
use std::sync::atomic::Ordering;
use verse_host::versehost::content::{ContentStore, ControlDescriptor};
use verse_host::versehost::render::{Stage, Viewport};
use verse_host::versehost::scene::{ActionValue, SceneContext};
use verse_host::versehost::{Host, HostConfig};

const VERSES: &str = include_str!("../../assets/verses.ron");

#[test]
fn test_registry_matches_shipped_content() {
    let content = ContentStore::from_ron(VERSES).unwrap();
    assert_eq!(registry().len(), content.len());
}

#[test]
fn test_every_scene_activates_and_disposes_cleanly() {
    let content = ContentStore::from_ron(VERSES).unwrap();
    let registry = registry();

    for index in 0..content.len() {
        let (renderer, counters) = NullRenderer::shared();
        let entry = content.entry(index).unwrap();
        let mut stage = Stage::new();

        let mut scene = {
            let mut ctx = SceneContext {
                renderer: &renderer,
                stage: &mut stage,
                viewport: Viewport::with_size(800.0, 600.0),
                entry,
            };
            let scene = registry.get(index).unwrap()(&mut ctx).unwrap();
            scene
        };
        {
            let mut ctx = SceneContext {
                renderer: &renderer,
                stage: &mut stage,
                viewport: Viewport::with_size(800.0, 600.0),
                entry,
            };
            scene.activate(&mut ctx).unwrap();
        }
        assert!(scene.is_active(), "slide {} did not activate", index);
        assert!(!stage.is_empty(), "slide {} attached nothing", index);

        // Drive it a little, poke every declared control action
        for _ in 0..30 {
            scene.update(&mut stage, 1.0 / 60.0).unwrap();
        }
        for control in &entry.controls {
            let value = match control {
                ControlDescriptor::Button { .. } => None,
                ControlDescriptor::Slider { max, .. } => Some(ActionValue::Number(*max)),
                ControlDescriptor::Select { options, .. } => {
                    Some(ActionValue::Choice(options[0].clone()))
                }
            };
            scene.handle_action(control.action(), value);
        }
        for _ in 0..30 {
            scene.update(&mut stage, 1.0 / 60.0).unwrap();
        }

        scene.deactivate(&mut stage);
        scene.dispose(&mut stage);
        assert!(stage.is_empty(), "slide {} leaked stage nodes", index);
        assert_eq!(
            counters.buffers_alive.load(Ordering::SeqCst),
            0,
            "slide {} leaked buffers",
            index
        );
        assert_eq!(
            counters.textures_alive.load(Ordering::SeqCst),
            0,
            "slide {} leaked textures",
            index
        );
    }
}

#[test]
fn test_full_gallery_host_walkthrough() {
    let (renderer, counters) = NullRenderer::shared();
    let content = ContentStore::from_ron(VERSES).unwrap();
    let mut host = Host::new(
        renderer,
        registry(),
        content,
        HostConfig {
            fixed_delta: Some(1.0 / 60.0),
            ..HostConfig::default()
        },
    )
    .unwrap();

    // Walk forward through every verse and back, rendering as we go
    for _ in 0..host.slide_count() {
        for _ in 0..5 {
            let report = host.frame();
            assert!(report.updated);
            assert!(report.drawn >= 1);
        }
        host.navigate(1).unwrap();
    }
    for _ in 0..host.slide_count() {
        host.navigate(-1).unwrap();
        host.frame();
    }

    assert_eq!(host.current_index(), 0);
    // Only the first verse's scene is alive at the end
    assert_eq!(host.stage().len(), 1);
    assert_eq!(counters.buffers_alive.load(Ordering::SeqCst), 1);
}
