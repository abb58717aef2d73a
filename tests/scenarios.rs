//! Integration tests driving a mounted engine end to end.
//!
//! These exercise the public API the host sees: mount, tick, input,
//! pause/resume, quality readout and teardown.

use axon::prelude::*;
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// Renderer that counts presents and shutdowns through shared cells, so the
/// test can observe the engine after handing the renderer over.
#[derive(Default)]
struct CountingRenderer {
    frames: Rc<Cell<u64>>,
    shutdowns: Rc<Cell<u32>>,
}

impl CountingRenderer {
    fn new() -> (Self, Rc<Cell<u64>>, Rc<Cell<u32>>) {
        let renderer = Self::default();
        let frames = renderer.frames.clone();
        let shutdowns = renderer.shutdowns.clone();
        (renderer, frames, shutdowns)
    }
}

impl Renderer for CountingRenderer {
    fn init(&mut self, _viewport: Viewport) -> Result<(), RendererError> {
        Ok(())
    }

    fn present(&mut self, _frame: &FrameState) {
        self.frames.set(self.frames.get() + 1);
    }

    fn shutdown(&mut self) {
        self.shutdowns.set(self.shutdowns.get() + 1);
    }
}

/// Renderer whose required capability is missing.
struct BrokenRenderer;

#[derive(Debug)]
struct NoGpu;

impl fmt::Display for NoGpu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no compatible GPU adapter")
    }
}

impl std::error::Error for NoGpu {}

impl Renderer for BrokenRenderer {
    fn init(&mut self, _viewport: Viewport) -> Result<(), RendererError> {
        Err(Box::new(NoGpu))
    }

    fn present(&mut self, _frame: &FrameState) {
        unreachable!("present must never run after a failed init");
    }

    fn shutdown(&mut self) {}
}

fn mounted(config: SimConfig) -> Engine<NullRenderer> {
    let mut engine = Simulation::new()
        .with_config(config)
        .with_seed(1234)
        .mount(NullRenderer::new(), 1600.0, 900.0)
        .expect("mount with a working renderer succeeds");
    engine.set_fixed_delta(Some(1.0 / 60.0));
    engine
}

#[test]
fn activity_stays_in_unit_range_under_load() {
    let mut engine = mounted(SimConfig::default());
    engine.set_pointer(Vec2::new(0.0, 0.0));

    for i in 0..600 {
        if i % 40 == 0 {
            engine.tap(Vec2::new((i % 300) as f32, -(i as f32 % 200.0)));
        }
        if i % 25 == 0 {
            engine.set_scroll_velocity(1.4);
        }
        engine.tick();

        for node in engine.nodes() {
            assert!(
                node.activity >= 0.0 && node.activity <= 1.0,
                "activity {} escaped [0,1] at tick {}",
                node.activity,
                i
            );
        }
    }
}

#[test]
fn edge_count_respects_quality_scaled_budget() {
    let config = SimConfig::default();
    let base_budget = config.connection_budget();
    let mut engine = mounted(config);

    for _ in 0..300 {
        engine.tick();
        let cap = (base_budget as f32 * engine.quality_level()).round() as usize;
        assert!(engine.frame().edges().len() <= cap);
    }
}

#[test]
fn sustained_low_fps_floors_quality() {
    // Scenario: 20 FPS ticks against a 50 FPS target.
    let config = SimConfig {
        target_fps: 50.0,
        ..SimConfig::default()
    };
    let mut engine = mounted(config);
    engine.set_fixed_delta(Some(1.0 / 20.0));

    for _ in 0..30 {
        engine.tick();
    }
    assert_eq!(engine.quality_level(), 0.5);

    // Further overload never pushes below the floor.
    for _ in 0..100 {
        engine.tick();
    }
    assert_eq!(engine.quality_level(), 0.5);
}

#[test]
fn tap_creates_node_exactly_at_position_with_full_activity() {
    let mut engine = mounted(SimConfig::default());
    let before = engine.nodes().len();

    engine.tap(Vec2::new(100.0, 100.0));
    engine.tick();

    assert_eq!(engine.nodes().len(), before + 1);
    let node = engine
        .nodes()
        .iter()
        .find(|n| n.position.x == 100.0 && n.position.y == 100.0)
        .expect("tap must create a node at exactly the tap position");
    assert_eq!(node.activity, 1.0);
}

#[test]
fn frame_buffers_mirror_simulation_state() {
    let mut engine = mounted(SimConfig::default());
    for _ in 0..120 {
        engine.tick();
    }

    let frame = engine.frame();
    assert_eq!(frame.nodes().len(), engine.nodes().len());
    assert!(frame.meta.quality >= 0.5 && frame.meta.quality <= 1.0);
    assert!(frame.meta.time > 0.0);

    for edge in frame.edges() {
        assert!((edge.a as usize) < frame.nodes().len());
        assert!((edge.b as usize) < frame.nodes().len());
        assert!(edge.strength >= 0.0 && edge.strength <= 1.0);
    }
    for signal in frame.signals() {
        assert!(signal.alpha >= 0.0 && signal.alpha <= 1.0);
    }
}

#[test]
fn paused_ticks_mutate_and_emit_nothing() {
    let (renderer, frames, _) = CountingRenderer::new();
    let mut engine = Simulation::new()
        .with_seed(7)
        .mount(renderer, 800.0, 600.0)
        .unwrap();
    engine.set_fixed_delta(Some(1.0 / 60.0));

    engine.tick();
    assert_eq!(frames.get(), 1);
    let positions: Vec<f32> = engine.nodes().iter().map(|n| n.position.x).collect();

    engine.set_paused(true);
    for _ in 0..50 {
        engine.tick();
    }
    assert_eq!(frames.get(), 1);
    let paused_positions: Vec<f32> = engine.nodes().iter().map(|n| n.position.x).collect();
    assert_eq!(positions, paused_positions);

    engine.set_paused(false);
    engine.tick();
    assert_eq!(frames.get(), 2);
}

#[test]
fn mount_fails_explicitly_without_renderer_capability() {
    let result = Simulation::new().mount(BrokenRenderer, 800.0, 600.0);
    assert!(matches!(result, Err(MountError::Renderer(_))));
}

#[test]
fn mount_rejects_inconsistent_config() {
    let config = SimConfig {
        cell_size: 50.0, // below connect_max
        ..SimConfig::default()
    };
    let result = Simulation::new()
        .with_config(config)
        .mount(NullRenderer::new(), 800.0, 600.0);
    assert!(matches!(result, Err(MountError::Config(_))));
}

#[test]
fn teardown_runs_exactly_once() {
    let (renderer, _, shutdowns) = CountingRenderer::new();
    let engine = Simulation::new()
        .with_seed(7)
        .mount(renderer, 800.0, 600.0)
        .unwrap();

    engine.unmount();
    assert_eq!(shutdowns.get(), 1);

    // Dropping without an explicit unmount also tears down once.
    let (renderer, _, shutdowns) = CountingRenderer::new();
    {
        let _engine = Simulation::new()
            .with_seed(7)
            .mount(renderer, 800.0, 600.0)
            .unwrap();
    }
    assert_eq!(shutdowns.get(), 1);
}

#[test]
fn resize_keeps_population_intact() {
    let mut engine = mounted(SimConfig::default());
    let before = engine.nodes().len();

    engine.resize(800.0, 600.0);
    for _ in 0..60 {
        engine.tick();
    }
    assert_eq!(engine.nodes().len(), before);
}

#[test]
fn node_count_is_never_throttled_by_quality() {
    let mut engine = mounted(SimConfig::default());
    let seeded = engine.nodes().len();

    // Drive quality to the floor, then keep running.
    engine.set_fixed_delta(Some(1.0 / 15.0));
    for _ in 0..200 {
        engine.tick();
    }
    assert_eq!(engine.quality_level(), 0.5);
    assert_eq!(engine.nodes().len(), seeded);
}
