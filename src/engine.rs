//! Simulation builder and frame orchestrator.
//!
//! [`Simulation`] is the entry point: configure with method chaining, then
//! [`mount`](Simulation::mount) a renderer to get a running [`Engine`]. The
//! engine owns every piece of simulation state exclusively and advances it
//! once per [`tick`](Engine::tick), which the host calls from its animation
//! callback.
//!
//! Tick pipeline, in fixed order: timing → quality feedback → stochastic
//! events → interaction forces → motion integration → partition rebuild →
//! connection rebuild (may launch signals) → star/signal advancement →
//! frame emission to the renderer.

use crate::config::SimConfig;
use crate::connection::ConnectionBuilder;
use crate::error::MountError;
use crate::events::{burst_at, StarField};
use crate::frame::{EdgeInstance, FrameState, NodeInstance, SignalInstance, StarInstance};
use crate::input::InteractionHandler;
use crate::node::NodePool;
use crate::quality::QualityController;
use crate::render::{Renderer, Viewport};
use crate::signal::SignalPool;
use crate::spatial::SpatialGrid;
use crate::time::Clock;
use glam::Vec2;
use log::{debug, info};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Strength of the burst fired at a tap position.
const TAP_BURST_STRENGTH: f32 = 1.0;
/// Scroll-spike bursts cover twice the normal burst radius.
const SPIKE_RADIUS_FACTOR: f32 = 2.0;

/// Builder for a background simulation.
///
/// # Example
///
/// ```ignore
/// let engine = Simulation::new()
///     .with_node_count(100)
///     .with_seed(42)
///     .mount(MyRenderer::new(), 1920.0, 1080.0)?;
/// ```
pub struct Simulation {
    config: SimConfig,
    seed: Option<u64>,
}

impl Simulation {
    pub fn new() -> Self {
        Self {
            config: SimConfig::default(),
            seed: None,
        }
    }

    /// Replace the whole configuration.
    pub fn with_config(mut self, config: SimConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the seed node count, growing the cap to fit if needed.
    pub fn with_node_count(mut self, count: usize) -> Self {
        self.config.node_count = count;
        if self.config.max_nodes < count {
            self.config.max_nodes = count + count / 2;
        }
        self
    }

    /// Set the FPS target for the quality controller.
    pub fn with_target_fps(mut self, fps: f32) -> Self {
        self.config.target_fps = fps;
        self
    }

    /// Seed the RNG for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validate the configuration, initialize the renderer and start the
    /// simulation context.
    ///
    /// Fails explicitly if the renderer cannot initialize; there is no
    /// partial mount.
    pub fn mount<R: Renderer>(
        self,
        mut renderer: R,
        width: f32,
        height: f32,
    ) -> Result<Engine<R>, MountError> {
        self.config.validate()?;
        let viewport = Viewport::new(width, height);
        renderer.init(viewport).map_err(MountError::Renderer)?;

        let seed = self.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(42)
        });
        let mut rng = SmallRng::seed_from_u64(seed);

        let config = self.config;
        let nodes = NodePool::seed(&config, viewport, &mut rng);
        let grid = SpatialGrid::new(viewport, config.cell_size, config.max_nodes);
        let connections = ConnectionBuilder::new(&config);
        let signals = SignalPool::new(config.signal_capacity, config.signal_speed);
        let stars = StarField::new(config.star_capacity, config.star_speed, config.star_lifetime);
        let quality = QualityController::new(config.target_fps, config.fps_window);
        let interaction = InteractionHandler::new(&config);
        let frame = FrameState::with_capacity(
            config.max_nodes,
            config.connection_budget(),
            config.signal_capacity,
            config.star_capacity,
        );

        info!(
            "mounted axon engine: {} nodes, {}x{} viewport",
            config.node_count, width, height
        );

        Ok(Engine {
            config,
            viewport,
            renderer,
            clock: Clock::new(),
            rng,
            nodes,
            grid,
            connections,
            signals,
            stars,
            quality,
            interaction,
            frame,
            last_level: 1.0,
            paused: false,
            torn_down: false,
        })
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}

/// A mounted, running simulation context.
///
/// All state is owned here; there are no globals, so several engines can
/// coexist on one page.
pub struct Engine<R: Renderer> {
    config: SimConfig,
    viewport: Viewport,
    renderer: R,
    clock: Clock,
    rng: SmallRng,
    nodes: NodePool,
    grid: SpatialGrid,
    connections: ConnectionBuilder,
    signals: SignalPool,
    stars: StarField,
    quality: QualityController,
    interaction: InteractionHandler,
    frame: FrameState,
    last_level: f32,
    paused: bool,
    torn_down: bool,
}

impl<R: Renderer> Engine<R> {
    /// Advance the simulation by one tick and present the result.
    ///
    /// Paused ticks return immediately: no mutation, no emission, but the
    /// host keeps scheduling so resume is instant.
    pub fn tick(&mut self) {
        if self.paused || self.torn_down {
            return;
        }

        // 1. Timing feeds the quality controller.
        let (elapsed, dt) = self.clock.advance();
        if let Some(fps) = self.clock.instant_fps() {
            self.quality.sample(fps);
        }
        let level = self.quality.level();
        if (level - self.last_level).abs() > f32::EPSILON {
            debug!("quality level {} -> {}", self.last_level, level);
            self.last_level = level;
        }

        // 2. Stochastic events, probability scaled by quality.
        let star_chance = (self.config.star_chance * level).clamp(0.0, 1.0);
        if self.rng.gen_bool(star_chance as f64) {
            self.stars.spawn(self.viewport, &mut self.rng);
        }
        let burst_chance = (self.config.ambient_burst_chance * level).clamp(0.0, 1.0);
        if self.rng.gen_bool(burst_chance as f64) {
            let (wx, wy) = self.viewport.wrap();
            let center = Vec2::new(
                self.rng.gen_range(-wx..wx),
                self.rng.gen_range(-wy..wy),
            );
            burst_at(
                self.nodes.nodes_mut(),
                center,
                self.config.burst_radius,
                self.config.ambient_burst_strength,
            );
        }

        // 3. Interaction: pointer forces, taps, scroll spikes.
        self.interaction.apply_forces(self.nodes.nodes_mut());
        let taps: Vec<Vec2> = self.interaction.drain_taps().collect();
        for tap in taps {
            self.nodes.add_node(tap, &mut self.rng);
            burst_at(
                self.nodes.nodes_mut(),
                tap,
                self.config.burst_radius,
                TAP_BURST_STRENGTH,
            );
        }
        if self.interaction.take_spike() {
            burst_at(
                self.nodes.nodes_mut(),
                Vec2::ZERO,
                self.config.burst_radius * SPIKE_RADIUS_FACTOR,
                self.config.ambient_burst_strength,
            );
        }

        // 4. Integrate node motion.
        self.nodes
            .step(dt, self.interaction.scroll_energy(), self.viewport);
        self.interaction.decay();

        // 5. Rebuild the spatial partition.
        self.grid.rebuild(self.nodes.nodes_mut());

        // 6. Rebuild connections; may launch signals.
        let budget = self.quality.scale_budget(self.config.connection_budget());
        self.connections.rebuild(
            self.nodes.nodes(),
            &self.grid,
            elapsed,
            budget,
            &mut self.signals,
            &mut self.rng,
        );

        // 7. Advance shooting stars.
        self.stars.step(dt);

        // 8. Advance signal particles.
        self.signals.step(dt);

        // 9. Emit flat buffers to the renderer.
        self.emit(elapsed, level);
        self.renderer.present(&self.frame);
    }

    fn emit(&mut self, elapsed: f32, level: f32) {
        self.frame.clear();

        for node in self.nodes.nodes() {
            self.frame.push_node(NodeInstance {
                position: node.position.to_array(),
                size: node.size,
                activity: node.activity,
                twinkle_phase: node.twinkle_phase + elapsed * node.twinkle_speed,
                depth: node.depth as f32,
                _pad: 0.0,
            });
        }

        for edge in self.connections.edges() {
            self.frame.push_edge(EdgeInstance {
                a: edge.a,
                b: edge.b,
                strength: edge.strength,
                pulse_phase: edge.pulse_phase,
            });
        }

        for signal in self.signals.particles() {
            self.frame.push_signal(SignalInstance {
                position: signal.position().to_array(),
                alpha: signal.alpha(),
            });
        }

        for star in self.stars.stars() {
            self.frame.push_star(StarInstance {
                head: star.position.to_array(),
                alpha: star.fade(),
                tail: star.tail(self.config.star_trail).to_array(),
                _pad: 0.0,
            });
        }

        self.frame.meta.time = elapsed;
        self.frame.meta.quality = level;
        self.frame.meta.bloom_strength = self.config.bloom_strength * level;
        self.frame.meta.bloom_radius = self.config.bloom_radius;
        self.frame.meta.bloom_threshold = self.config.bloom_threshold;
        self.frame.meta.pulse_speed = self.config.pulse_speed;
    }

    /// Pause or resume. Paused ticks keep the schedule alive but do nothing.
    pub fn set_paused(&mut self, paused: bool) {
        if self.paused && !paused {
            // Swallow the pause so resume does not see one giant delta.
            self.clock.skip_gap();
        }
        self.paused = paused;
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Report scroll velocity from the host.
    pub fn set_scroll_velocity(&mut self, velocity: f32) {
        self.interaction.set_scroll_velocity(velocity);
    }

    /// Report the pointer's world position.
    pub fn set_pointer(&mut self, position: Vec2) {
        self.interaction.set_pointer(position);
    }

    /// The pointer left the surface.
    pub fn clear_pointer(&mut self) {
        self.interaction.clear_pointer();
    }

    /// Register a click/tap at a world position. Takes effect next tick:
    /// one node is created exactly there and a burst fires around it.
    pub fn tap(&mut self, position: Vec2) {
        self.interaction.tap(position);
    }

    /// Current quality level in [0.5, 1.0].
    #[inline]
    pub fn quality_level(&self) -> f32 {
        self.quality.level()
    }

    /// The viewport changed size.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Viewport::new(width, height);
        self.grid.resize(self.viewport);
        self.renderer.resize(self.viewport);
    }

    /// Install a fixed delta for deterministic ticks (tests, replays).
    pub fn set_fixed_delta(&mut self, delta: Option<f32>) {
        self.clock.set_fixed_delta(delta);
    }

    /// Current nodes, for inspection.
    pub fn nodes(&self) -> &[crate::node::Node] {
        self.nodes.nodes()
    }

    /// The frame emitted by the most recent tick.
    pub fn frame(&self) -> &FrameState {
        &self.frame
    }

    /// Tear down and release renderer resources.
    ///
    /// Teardown runs exactly once; dropping an engine that was never
    /// explicitly unmounted performs the same teardown.
    pub fn unmount(mut self) {
        self.teardown();
    }

    fn teardown(&mut self) {
        if !self.torn_down {
            self.torn_down = true;
            self.renderer.shutdown();
            info!("unmounted axon engine");
        }
    }
}

impl<R: Renderer> Drop for Engine<R> {
    fn drop(&mut self) {
        self.teardown();
    }
}
