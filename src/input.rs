//! Pointer and scroll interaction.
//!
//! The host owns raw DOM/window events; this module only receives
//! already-normalized world-space pointer coordinates and a scalar scroll
//! velocity. Pointer proximity nudges nodes, taps are queued for the
//! orchestrator (which injects a node and fires a burst), and scroll spikes
//! raise a one-shot burst flag.

use crate::config::SimConfig;
use crate::node::Node;
use glam::Vec2;

/// Per-tick activity boost at zero distance from the pointer.
const POINTER_ACTIVITY_BOOST: f32 = 0.02;
/// Per-tick decay of scroll energy.
const SCROLL_DECAY: f32 = 0.92;

/// Tracks pointer/scroll state between ticks.
#[derive(Debug)]
pub struct InteractionHandler {
    pointer: Option<Vec2>,
    taps: Vec<Vec2>,
    scroll_energy: f32,
    spike_pending: bool,
    radius: f32,
    strength: f32,
    scroll_max: f32,
    scroll_spike: f32,
}

impl InteractionHandler {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            pointer: None,
            taps: Vec::new(),
            scroll_energy: 0.0,
            spike_pending: false,
            radius: config.interaction_radius,
            strength: config.interaction_strength,
            scroll_max: config.scroll_max,
            scroll_spike: config.scroll_spike,
        }
    }

    /// Latest pointer position in world coordinates.
    pub fn set_pointer(&mut self, position: Vec2) {
        self.pointer = Some(position);
    }

    /// The pointer left the surface.
    pub fn clear_pointer(&mut self) {
        self.pointer = None;
    }

    /// Queue a click/tap at a world position.
    pub fn tap(&mut self, position: Vec2) {
        self.taps.push(position);
    }

    /// Report the host's scroll velocity, clamped to the configured maximum.
    ///
    /// Crossing the spike threshold arms a one-shot burst.
    pub fn set_scroll_velocity(&mut self, velocity: f32) {
        let clamped = velocity.abs().min(self.scroll_max);
        if clamped >= self.scroll_spike && self.scroll_energy < self.scroll_spike {
            self.spike_pending = true;
        }
        self.scroll_energy = clamped;
    }

    /// Current scroll energy, fed to the integrator as a drift bias.
    #[inline]
    pub fn scroll_energy(&self) -> f32 {
        self.scroll_energy
    }

    /// Nudge every node within the interaction radius toward the pointer.
    ///
    /// The nudge is proportional to `1 - distance / radius` and comes with a
    /// small activity boost of the same falloff.
    pub fn apply_forces(&self, nodes: &mut [Node]) {
        let Some(pointer) = self.pointer else {
            return;
        };

        for node in nodes {
            let to_pointer = pointer - node.position.truncate();
            let dist = to_pointer.length();
            if dist >= self.radius || dist <= f32::EPSILON {
                continue;
            }
            let falloff = 1.0 - dist / self.radius;
            node.velocity += to_pointer / dist * self.strength * falloff;
            node.activity = (node.activity + POINTER_ACTIVITY_BOOST * falloff).min(1.0);
        }
    }

    /// Drain taps queued since the previous tick.
    pub fn drain_taps(&mut self) -> std::vec::Drain<'_, Vec2> {
        self.taps.drain(..)
    }

    /// Take the scroll-spike flag, clearing it.
    pub fn take_spike(&mut self) -> bool {
        std::mem::take(&mut self.spike_pending)
    }

    /// Per-tick decay so scroll energy fades once the host goes quiet.
    pub fn decay(&mut self) {
        self.scroll_energy *= SCROLL_DECAY;
        if self.scroll_energy < 1e-4 {
            self.scroll_energy = 0.0;
        }
    }
}
