/// Tests for the mock renderer itself: alive-counters, failure
/// injection and frame recording.

use super::*;
use crate::renderer::{PrimitiveTopology, TextureFormat, TextureUsage};
use glam::Mat4;

#[test]
fn test_buffer_alive_counter_tracks_drops() {
    let mut renderer = MockRenderer::new();

    let a = renderer.create_buffer(vertex_buffer_desc(64)).unwrap();
    let b = renderer.create_buffer(vertex_buffer_desc(128)).unwrap();
    assert_eq!(renderer.stats().buffers_alive, 2);
    assert_eq!(renderer.stats().gpu_memory_used, 192);

    drop(a);
    assert_eq!(renderer.stats().buffers_alive, 1);
    assert_eq!(renderer.stats().gpu_memory_used, 128);

    drop(b);
    assert_eq!(renderer.stats().buffers_alive, 0);
    assert_eq!(renderer.stats().gpu_memory_used, 0);
}

#[test]
fn test_texture_alive_counter_tracks_drops() {
    let mut renderer = MockRenderer::new();

    let tex = renderer
        .create_texture(TextureDesc {
            width: 4,
            height: 4,
            format: TextureFormat::R8G8B8A8_UNORM,
            usage: TextureUsage::Sampled,
            data: None,
        })
        .unwrap();
    assert_eq!(renderer.stats().textures_alive, 1);
    assert_eq!(tex.info().width, 4);

    drop(tex);
    assert_eq!(renderer.stats().textures_alive, 0);
}

#[test]
fn test_buffer_update_bounds_checked() {
    let mut renderer = MockRenderer::new();
    let buffer = renderer.create_buffer(vertex_buffer_desc(16)).unwrap();

    assert!(buffer.update(0, &[0u8; 16]).is_ok());
    assert!(buffer.update(8, &[0u8; 8]).is_ok());
    assert!(buffer.update(8, &[0u8; 16]).is_err());
}

#[test]
fn test_fail_next_create_fails_once() {
    let mut renderer = MockRenderer::new();
    *renderer.fail_next_create.lock().unwrap() = true;

    assert!(renderer.create_buffer(vertex_buffer_desc(8)).is_err());
    // Flag is consumed; the next call succeeds again
    assert!(renderer.create_buffer(vertex_buffer_desc(8)).is_ok());
}

#[test]
fn test_end_frame_records_draw_count() {
    let mut renderer = MockRenderer::new();
    let buffer = renderer.create_buffer(vertex_buffer_desc(36)).unwrap();

    let mut frame = renderer.begin_frame().unwrap();
    frame.set_viewport(Viewport::with_size(640.0, 480.0)).unwrap();
    for _ in 0..3 {
        frame
            .draw(DrawCall {
                vertex_buffer: buffer.clone(),
                vertex_count: 3,
                topology: PrimitiveTopology::TriangleList,
                mvp: Mat4::IDENTITY,
                color: [1.0, 0.0, 0.0, 1.0],
                texture: None,
            })
            .unwrap();
    }
    renderer.end_frame(frame).unwrap();

    assert_eq!(renderer.stats().draw_calls, 3);
    assert_eq!(renderer.frames_submitted, 1);
}
