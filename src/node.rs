//! Node pool and motion integrator.
//!
//! Nodes are the drifting point entities of the graph. The pool owns their
//! state, advances it each tick, and handles interactive injection with a
//! capped population. Nothing here removes a node except the eviction that
//! makes room for an injected one.

use crate::config::{SimConfig, TICK_RATE};
use crate::render::Viewport;
use glam::{IVec2, Vec2, Vec3};
use rand::rngs::SmallRng;
use rand::Rng;
use std::f32::consts::TAU;

/// A drifting point entity.
#[derive(Clone, Debug)]
pub struct Node {
    /// World position; z is the depth-layer plane.
    pub position: Vec3,
    /// Drift velocity in the xy plane, units per nominal frame.
    pub velocity: Vec2,
    pub size: f32,
    pub twinkle_phase: f32,
    pub twinkle_speed: f32,
    /// Depth layer index, 0 = front.
    pub depth: u32,
    /// Transient excitement, always in [0, 1].
    pub activity: f32,
    /// Grid cell coordinates, refreshed on every partition rebuild.
    pub cell: IVec2,
    /// Skip integration on the tick a node is injected, so a tap produces a
    /// node at exactly the tap position with its full activity intact.
    fresh: bool,
}

/// Owns every node and advances them each tick.
#[derive(Debug)]
pub struct NodePool {
    nodes: Vec<Node>,
    /// Nodes below this index were seeded at mount and are never evicted.
    seeded: usize,
    max_nodes: usize,
    activity_decay: f32,
    velocity_damping: f32,
    scroll_bias: f32,
}

impl NodePool {
    /// Seed the pool with `config.node_count` nodes scattered across the
    /// wrap region and depth layers.
    pub fn seed(config: &SimConfig, viewport: Viewport, rng: &mut SmallRng) -> Self {
        let (wx, wy) = viewport.wrap();
        let layer_span = config.depth_layers.saturating_sub(1).max(1) as f32;

        let nodes = (0..config.node_count)
            .map(|_| {
                let depth = rng.gen_range(0..config.depth_layers);
                let z = -config.depth_range * depth as f32 / layer_span;
                Node {
                    position: Vec3::new(
                        rng.gen_range(-wx..wx),
                        rng.gen_range(-wy..wy),
                        z,
                    ),
                    velocity: Vec2::new(
                        (rng.gen::<f32>() - 0.5) * config.drift_speed,
                        (rng.gen::<f32>() - 0.5) * config.drift_speed,
                    ),
                    size: config.base_size + rng.gen::<f32>() * config.size_variance,
                    twinkle_phase: rng.gen_range(0.0..TAU),
                    twinkle_speed: 0.9 * rng.gen_range(0.75..1.25),
                    depth,
                    activity: rng.gen::<f32>() * 0.3,
                    cell: IVec2::ZERO,
                    fresh: false,
                }
            })
            .collect();

        Self {
            nodes,
            seeded: config.node_count,
            max_nodes: config.max_nodes,
            activity_decay: config.activity_decay,
            velocity_damping: config.velocity_damping,
            scroll_bias: config.scroll_bias,
        }
    }

    /// Advance every node by one tick.
    ///
    /// Position moves by velocity plus a scroll-energy bias; positions past
    /// the wrap bounds teleport to the opposite edge; activity decays and
    /// velocity damps geometrically. Freshly injected nodes sit out their
    /// first tick.
    pub fn step(&mut self, dt: f32, scroll_energy: f32, viewport: Viewport) {
        let (wx, wy) = viewport.wrap();
        let scale = dt * TICK_RATE;

        for node in &mut self.nodes {
            if node.fresh {
                node.fresh = false;
                continue;
            }

            node.position.x += node.velocity.x * scale;
            node.position.y += (node.velocity.y + scroll_energy * self.scroll_bias) * scale;

            if node.position.x > wx {
                node.position.x = -wx;
            } else if node.position.x < -wx {
                node.position.x = wx;
            }
            if node.position.y > wy {
                node.position.y = -wy;
            } else if node.position.y < -wy {
                node.position.y = wy;
            }

            node.activity = (node.activity * self.activity_decay).clamp(0.0, 1.0);
            node.velocity *= self.velocity_damping;
        }
    }

    /// Inject a node at an exact position with full activity.
    ///
    /// When the pool is at capacity, the oldest injected node is evicted
    /// first; seeded nodes are visual identity and are kept. If every node
    /// is seeded and the cap equals the seed count, the request is dropped.
    ///
    /// Returns the index of the new node, or `None` if it was dropped.
    pub fn add_node(&mut self, position: Vec2, rng: &mut SmallRng) -> Option<usize> {
        if self.nodes.len() >= self.max_nodes {
            if self.nodes.len() > self.seeded {
                self.nodes.remove(self.seeded);
            } else {
                return None;
            }
        }

        self.nodes.push(Node {
            position: Vec3::new(position.x, position.y, 0.0),
            velocity: Vec2::new(
                (rng.gen::<f32>() - 0.5) * 0.4,
                (rng.gen::<f32>() - 0.5) * 0.4,
            ),
            size: 6.0 + rng.gen::<f32>() * 3.0,
            twinkle_phase: rng.gen_range(0.0..TAU),
            twinkle_speed: 0.9 * rng.gen_range(0.75..1.25),
            depth: 0,
            activity: 1.0,
            cell: IVec2::ZERO,
            fresh: true,
        });
        Some(self.nodes.len() - 1)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    #[inline]
    pub fn nodes_mut(&mut self) -> &mut [Node] {
        &mut self.nodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn pool(config: &SimConfig) -> (NodePool, SmallRng) {
        let mut rng = SmallRng::seed_from_u64(7);
        let pool = NodePool::seed(config, Viewport::new(1000.0, 800.0), &mut rng);
        (pool, rng)
    }

    #[test]
    fn test_seeding_respects_count_and_ranges() {
        let config = SimConfig::default();
        let (pool, _) = pool(&config);
        assert_eq!(pool.len(), config.node_count);
        for node in pool.nodes() {
            assert!(node.activity >= 0.0 && node.activity <= 1.0);
            assert!(node.depth < config.depth_layers);
            assert!(node.size >= config.base_size);
        }
    }

    #[test]
    fn test_wrap_teleports_to_opposite_edge() {
        let config = SimConfig::default();
        let (mut pool, _) = pool(&config);
        let viewport = Viewport::new(1000.0, 800.0);
        let (wx, _) = viewport.wrap();

        pool.nodes_mut()[0].position.x = wx + 5.0;
        pool.nodes_mut()[0].velocity = Vec2::ZERO;
        pool.step(1.0 / 60.0, 0.0, viewport);
        assert!((pool.nodes()[0].position.x - (-wx)).abs() < 0.001);
    }

    #[test]
    fn test_activity_decays_within_bounds() {
        let config = SimConfig::default();
        let (mut pool, _) = pool(&config);
        let viewport = Viewport::new(1000.0, 800.0);
        pool.nodes_mut()[0].activity = 1.0;

        for _ in 0..500 {
            pool.step(1.0 / 60.0, 0.0, viewport);
            for node in pool.nodes() {
                assert!(node.activity >= 0.0 && node.activity <= 1.0);
            }
        }
        assert!(pool.nodes()[0].activity < 0.01);
    }

    #[test]
    fn test_injected_node_sits_out_first_tick() {
        let config = SimConfig::default();
        let (mut pool, mut rng) = pool(&config);
        let viewport = Viewport::new(1000.0, 800.0);

        let idx = pool.add_node(Vec2::new(100.0, 100.0), &mut rng).unwrap();
        pool.step(1.0 / 60.0, 0.0, viewport);

        let node = &pool.nodes()[idx];
        assert_eq!(node.position.x, 100.0);
        assert_eq!(node.position.y, 100.0);
        assert_eq!(node.activity, 1.0);

        // Second tick integrates normally.
        pool.step(1.0 / 60.0, 0.0, viewport);
        assert!(pool.nodes()[idx].activity < 1.0);
    }

    #[test]
    fn test_eviction_removes_oldest_injected_first() {
        let config = SimConfig {
            node_count: 3,
            max_nodes: 5,
            ..SimConfig::default()
        };
        let (mut pool, mut rng) = pool(&config);

        pool.add_node(Vec2::new(1.0, 0.0), &mut rng);
        pool.add_node(Vec2::new(2.0, 0.0), &mut rng);
        assert_eq!(pool.len(), 5);

        // At capacity: the injected node at (1,0) goes, seeded ones stay.
        pool.add_node(Vec2::new(3.0, 0.0), &mut rng);
        assert_eq!(pool.len(), 5);
        let xs: Vec<f32> = pool.nodes()[3..].iter().map(|n| n.position.x).collect();
        assert_eq!(xs, vec![2.0, 3.0]);
    }

    #[test]
    fn test_add_dropped_when_cap_equals_seed() {
        let config = SimConfig {
            node_count: 4,
            max_nodes: 4,
            ..SimConfig::default()
        };
        let (mut pool, mut rng) = pool(&config);
        assert!(pool.add_node(Vec2::ZERO, &mut rng).is_none());
        assert_eq!(pool.len(), 4);
    }
}
