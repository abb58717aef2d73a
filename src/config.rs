//! Simulation configuration.
//!
//! All tunable parameters live in [`SimConfig`]. The defaults give the stock
//! scene: ~100 slowly drifting nodes, connections that breathe between 80 and
//! 120 world units, occasional shooting stars.
//!
//! # Example
//!
//! ```ignore
//! let config = SimConfig {
//!     node_count: 70,
//!     connect_min: 80.0,
//!     connect_max: 120.0,
//!     ..SimConfig::default()
//! };
//! config.validate()?;
//! ```

use crate::error::ConfigError;

/// Nominal tick rate the per-frame constants were tuned against.
///
/// Velocities are stored in units-per-frame at this rate; the integrator
/// rescales by `dt * TICK_RATE` so the scene speed is frame-rate independent.
pub const TICK_RATE: f32 = 60.0;

/// Configuration for the whole simulation.
///
/// Distances are in world units (CSS pixels for a fullscreen background),
/// speeds in units per nominal frame, probabilities per tick.
#[derive(Clone, Debug)]
pub struct SimConfig {
    /// Number of nodes seeded at mount.
    pub node_count: usize,
    /// Hard cap on total nodes (seeded + interactively injected).
    pub max_nodes: usize,
    /// Magnitude of initial random drift velocity.
    pub drift_speed: f32,
    /// Base node size.
    pub base_size: f32,
    /// Random addition on top of `base_size`.
    pub size_variance: f32,
    /// Number of depth layers nodes are distributed across.
    pub depth_layers: u32,
    /// Z distance covered by the depth layers.
    pub depth_range: f32,
    /// Per-tick geometric decay applied to node activity.
    pub activity_decay: f32,
    /// Per-tick damping applied to node velocity.
    pub velocity_damping: f32,

    /// Minimum of the breathing connection distance.
    pub connect_min: f32,
    /// Maximum of the breathing connection distance.
    pub connect_max: f32,
    /// Angular speed of the breathing oscillation, radians per second.
    pub breathe_speed: f32,
    /// Width of the linear fade band below the current reach.
    pub fade_band: f32,
    /// Speed used to derive per-edge pulse phases.
    pub pulse_speed: f32,
    /// Edge budget per node; the per-frame cap is `node_count * edges_per_node`
    /// scaled by the quality level.
    pub edges_per_node: usize,

    /// Capacity of the signal particle pool.
    pub signal_capacity: usize,
    /// Per-edge, per-tick chance of spawning a signal at strength 1.
    pub signal_chance: f32,
    /// Signal speed band, in progress per second.
    pub signal_speed: (f32, f32),

    /// Maximum concurrent shooting stars.
    pub star_capacity: usize,
    /// Per-tick shooting star spawn chance at quality 1.
    pub star_chance: f32,
    /// Shooting star speed, units per nominal frame.
    pub star_speed: f32,
    /// Shooting star lifetime in seconds.
    pub star_lifetime: f32,
    /// Full trail length; shrinks with remaining life.
    pub star_trail: f32,

    /// Per-tick chance of an ambient activity burst.
    pub ambient_burst_chance: f32,
    /// Radius of ambient and tap bursts.
    pub burst_radius: f32,
    /// Strength of ambient bursts.
    pub ambient_burst_strength: f32,

    /// Radius of the pointer force field.
    pub interaction_radius: f32,
    /// Velocity nudge per tick at zero distance from the pointer.
    pub interaction_strength: f32,
    /// Upper clamp on the reported scroll velocity.
    pub scroll_max: f32,
    /// Upward position bias per unit of scroll energy.
    pub scroll_bias: f32,
    /// Scroll velocity above this triggers an activity burst.
    pub scroll_spike: f32,

    /// Grid cell size; must be at least `connect_max`.
    pub cell_size: f32,

    /// FPS the quality controller steers toward.
    pub target_fps: f32,
    /// Size of the rolling FPS sample window.
    pub fps_window: usize,

    /// Bloom parameters forwarded to the renderer; strength is scaled by the
    /// quality level before emission.
    pub bloom_strength: f32,
    pub bloom_radius: f32,
    pub bloom_threshold: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            node_count: 100,
            max_nodes: 160,
            drift_speed: 0.52,
            base_size: 4.8,
            size_variance: 4.0,
            depth_layers: 3,
            depth_range: 400.0,
            activity_decay: 0.97,
            velocity_damping: 0.99,

            connect_min: 80.0,
            connect_max: 120.0,
            breathe_speed: 0.6,
            fade_band: 30.0,
            pulse_speed: 1.5,
            edges_per_node: 5,

            signal_capacity: 64,
            signal_chance: 0.03,
            signal_speed: (0.8, 1.6),

            star_capacity: 10,
            star_chance: 0.01,
            star_speed: 10.0,
            star_lifetime: 1.5,
            star_trail: 150.0,

            ambient_burst_chance: 0.004,
            burst_radius: 220.0,
            ambient_burst_strength: 0.6,

            interaction_radius: 160.0,
            interaction_strength: 0.12,
            scroll_max: 1.5,
            scroll_bias: 0.35,
            scroll_spike: 1.0,

            cell_size: 120.0,

            target_fps: 60.0,
            fps_window: 10,

            bloom_strength: 1.4,
            bloom_radius: 0.8,
            bloom_threshold: 0.08,
        }
    }
}

impl SimConfig {
    /// A reduced preset for compact viewports (fewer nodes, same behavior).
    pub fn compact() -> Self {
        Self {
            node_count: 45,
            max_nodes: 80,
            ..Self::default()
        }
    }

    /// Base per-frame edge budget before quality scaling.
    #[inline]
    pub fn connection_budget(&self) -> usize {
        self.node_count * self.edges_per_node
    }

    /// Check internal consistency.
    ///
    /// The cell size must cover the largest possible connection reach,
    /// otherwise the partition would miss connectable pairs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.node_count == 0 {
            return Err(ConfigError::NoNodes);
        }
        if self.max_nodes < self.node_count {
            return Err(ConfigError::CapBelowSeed {
                max_nodes: self.max_nodes,
                node_count: self.node_count,
            });
        }
        if self.connect_min > self.connect_max {
            return Err(ConfigError::InvertedBreathingRange {
                min: self.connect_min,
                max: self.connect_max,
            });
        }
        if self.cell_size < self.connect_max {
            return Err(ConfigError::CellTooSmall {
                cell_size: self.cell_size,
                connect_max: self.connect_max,
            });
        }
        Ok(())
    }
}
