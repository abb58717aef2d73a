//! Connection builder.
//!
//! Connections are ephemeral: the edge list is derived from scratch every
//! tick out of the spatial partition. The maximum connection distance
//! "breathes" sinusoidally between two bounds, so the graph visibly expands
//! and contracts over time.
//!
//! Strength is 1 for close pairs and fades linearly to 0 across a fade band
//! just below the current reach, then gets boosted by the pair's combined
//! activity and clamped back to 1. A hard per-frame budget (scaled by the
//! quality level) truncates the scan in node-index order.

use crate::config::SimConfig;
use crate::node::Node;
use crate::signal::SignalPool;
use crate::spatial::SpatialGrid;
use rand::rngs::SmallRng;
use rand::Rng;

/// One ephemeral edge between two nodes.
#[derive(Clone, Copy, Debug)]
pub struct Connection {
    pub a: u32,
    pub b: u32,
    /// Always in [0, 1].
    pub strength: f32,
    pub pulse_phase: f32,
}

/// Derives the per-tick edge list.
#[derive(Debug)]
pub struct ConnectionBuilder {
    connect_min: f32,
    connect_max: f32,
    breathe_speed: f32,
    fade_band: f32,
    signal_chance: f32,
    edges: Vec<Connection>,
}

impl ConnectionBuilder {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            connect_min: config.connect_min,
            connect_max: config.connect_max,
            breathe_speed: config.breathe_speed,
            fade_band: config.fade_band,
            signal_chance: config.signal_chance,
            edges: Vec::with_capacity(config.connection_budget()),
        }
    }

    /// Current breathing reach at the given elapsed time.
    #[inline]
    pub fn reach(&self, elapsed: f32) -> f32 {
        let phase = 0.5 + 0.5 * (elapsed * self.breathe_speed).sin();
        self.connect_min + (self.connect_max - self.connect_min) * phase
    }

    /// Rebuild the edge list for this tick.
    ///
    /// Scans candidate pairs from the partition in node-index order and
    /// stops dead once `budget` edges are retained. Each retained edge rolls
    /// an independent, strength-proportional chance of launching a signal
    /// particle between its endpoint snapshots.
    pub fn rebuild(
        &mut self,
        nodes: &[Node],
        grid: &SpatialGrid,
        elapsed: f32,
        budget: usize,
        signals: &mut SignalPool,
        rng: &mut SmallRng,
    ) {
        self.edges.clear();
        let reach = self.reach(elapsed);
        let fade_start = reach - self.fade_band;

        'scan: for (i, node) in nodes.iter().enumerate() {
            for j in grid.neighborhood(node.cell) {
                let j = j as usize;
                // Each unordered pair once, from its lower index.
                if j <= i {
                    continue;
                }
                if self.edges.len() >= budget {
                    break 'scan;
                }

                let other = &nodes[j];
                let dist = node.position.distance(other.position);
                if dist >= reach {
                    continue;
                }

                let base = if dist <= fade_start {
                    1.0
                } else {
                    1.0 - (dist - fade_start) / self.fade_band
                };
                let boosted = base * (1.0 + node.activity + other.activity);
                let strength = boosted.min(1.0);

                self.edges.push(Connection {
                    a: i as u32,
                    b: j as u32,
                    strength,
                    pulse_phase: (i + j) as f32 * 0.1,
                });

                let chance = (self.signal_chance * strength).clamp(0.0, 1.0);
                if chance > 0.0 && rng.gen_bool(chance as f64) {
                    // Travel direction along the edge is random.
                    if rng.gen::<bool>() {
                        signals.spawn(node.position, other.position, rng);
                    } else {
                        signals.spawn(other.position, node.position, rng);
                    }
                }
            }
        }
    }

    /// Edges retained this tick.
    #[inline]
    pub fn edges(&self) -> &[Connection] {
        &self.edges
    }
}
