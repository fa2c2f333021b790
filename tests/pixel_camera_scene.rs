mod common;

use common::{Call, FixedClock, RecordingCanvas};
use tyndustre::{
    Scene,
    input::Input,
    math::{Rect, vec2},
    pixel_camera::PixelCameraScene,
    render::Color,
};

fn loaded() -> (RecordingCanvas, PixelCameraScene) {
    let mut canvas = RecordingCanvas::default();
    let scene = PixelCameraScene::load(&mut canvas).expect("recording canvas never fails");
    (canvas, scene)
}

#[test]
fn update_spins_and_splits_the_camera_target() {
    let (_, mut scene) = loaded();
    let clock = FixedClock {
        frame_time: 0.5,
        time: 0.0,
        fps: 60,
    };
    scene.update(&Input::default(), &clock);

    assert_eq!(scene.rotation(), 30.0);
    assert_eq!(scene.world_camera().target(), vec2(-10.0, 30.0));
    assert_eq!(scene.screen_camera().target(), vec2(0.0, 0.0));
}

#[test]
fn sub_pixel_remainder_moves_the_screen_camera() {
    let (_, mut scene) = loaded();
    let clock = FixedClock {
        time: 1.0,
        ..FixedClock::default()
    };
    scene.update(&Input::default(), &clock);

    let world = scene.world_camera().target();
    let screen = scene.screen_camera().target();
    assert_eq!(world, world.trunc());
    let target = vec2((1f64.sin() * 50.0 - 10.0) as f32, (1f64.cos() * 30.0) as f32);
    assert!((world + screen / 5.0 - target).length() < 1e-4);
}

#[test]
fn draws_world_offscreen_then_blits_flipped() {
    let (mut canvas, mut scene) = loaded();
    scene.update(&Input::default(), &FixedClock::default());
    scene.draw(&mut canvas).expect("draw");
    let calls = canvas.take_calls();

    let Call::Offscreen { calls: world, .. } = &calls[0] else {
        panic!("expected offscreen pass first, got {:?}", calls[0]);
    };
    assert_eq!(world[0], Call::Clear(Color::RAYWHITE));
    assert_eq!(world[1], Call::SetCamera(*scene.world_camera()));
    let colors: Vec<_> = world[2..5]
        .iter()
        .map(|call| match call {
            Call::Rectangle { color, .. } => *color,
            other => panic!("expected a rectangle, got {other:?}"),
        })
        .collect();
    assert_eq!(colors, [Color::BLACK, Color::RED, Color::BLUE]);
    assert_eq!(world[5], Call::ResetCamera);

    assert_eq!(calls[1], Call::Clear(Color::RED));
    assert_eq!(calls[2], Call::SetCamera(*scene.screen_camera()));
    let Call::Texture { source, dest, .. } = calls[3] else {
        panic!("expected the blit, got {:?}", calls[3]);
    };
    assert_eq!(source, Rect::xywh(0.0, 0.0, 160.0, -90.0));
    assert_eq!(dest, Rect::xywh(-5.0, -5.0, 810.0, 460.0));
    assert_eq!(calls[4], Call::ResetCamera);

    let texts: Vec<_> = calls[5..]
        .iter()
        .filter_map(|call| match call {
            Call::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(
        texts,
        [
            "Screen resolution: 800x450",
            "World resolution: 160x90",
            "60 FPS"
        ]
    );
}

#[test]
fn rectangles_keep_their_relative_spin() {
    let (mut canvas, mut scene) = loaded();
    let clock = FixedClock {
        frame_time: 1.0,
        ..FixedClock::default()
    };
    scene.update(&Input::default(), &clock);
    scene.draw(&mut canvas).expect("draw");

    let Call::Offscreen { calls, .. } = &canvas.calls[0] else {
        panic!("expected offscreen pass");
    };
    let rotations: Vec<_> = calls
        .iter()
        .filter_map(|call| match call {
            Call::Rectangle { rotation, .. } => Some(*rotation),
            _ => None,
        })
        .collect();
    assert_eq!(rotations, [60.0, -60.0, 105.0]);
}

#[test]
fn unload_releases_the_render_texture() {
    let (mut canvas, scene) = loaded();
    scene.unload(&mut canvas).expect("unload");
    assert_eq!(canvas.released_targets.len(), 1);
    assert!(canvas.released.is_empty());
}
