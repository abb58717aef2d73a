//! # Axon - Neural Network Background Engine
//!
//! A real-time simulation of a drifting "neural network": glowing nodes,
//! proximity-derived connections, traveling signal pulses, shooting stars
//! and pointer-reactive forces, designed as a decorative website background.
//!
//! Axon is simulation only. It owns entity state and advances it once per
//! host animation callback; rendering is delegated to a collaborator that
//! receives flat numeric buffers each tick and never anything else — no
//! shader text, no GPU handles.
//!
//! ## Quick Start
//!
//! ```ignore
//! use axon::prelude::*;
//!
//! let mut engine = Simulation::new()
//!     .with_node_count(100)
//!     .mount(MyRenderer::new(), 1920.0, 1080.0)?;
//!
//! // In the host animation callback:
//! engine.tick();
//!
//! // From host input handlers:
//! engine.set_pointer(Vec2::new(320.0, -140.0));
//! engine.tap(Vec2::new(100.0, 100.0));
//! engine.set_scroll_velocity(0.8);
//! ```
//!
//! ## Core Concepts
//!
//! ### Nodes
//!
//! A fixed population of drifting points, seeded at mount and optionally
//! grown by taps (capped, oldest-injected evicted first). Each node carries
//! a decaying `activity` scalar that brightens it and its connections.
//!
//! ### Connections
//!
//! Ephemeral edges recomputed from scratch every tick via a uniform-grid
//! spatial partition. The connection distance "breathes" sinusoidally, and
//! a per-frame edge budget (scaled by the quality level) bounds the cost.
//!
//! ### Quality
//!
//! A rolling-window FPS governor degrades optional load (edge budget, star
//! probability, bloom intensity) under sustained overload and recovers
//! slowly when headroom returns. Node count is never throttled.
//!
//! ### Renderer seam
//!
//! Implement [`Renderer`] and receive a [`FrameState`] of `bytemuck::Pod`
//! records once per tick. `mount` fails explicitly when the renderer cannot
//! initialize.

pub mod config;
pub mod connection;
pub mod engine;
pub mod error;
pub mod events;
pub mod frame;
pub mod input;
pub mod node;
pub mod quality;
pub mod render;
pub mod signal;
pub mod spatial;
pub mod time;

pub use bytemuck;
pub use config::SimConfig;
pub use connection::{Connection, ConnectionBuilder};
pub use engine::{Engine, Simulation};
pub use error::{ConfigError, MountError};
pub use events::{burst_at, ShootingStar, StarField};
pub use frame::{EdgeInstance, FrameMeta, FrameState, NodeInstance, SignalInstance, StarInstance};
pub use glam::{IVec2, Vec2, Vec3};
pub use input::InteractionHandler;
pub use node::{Node, NodePool};
pub use quality::{QualityController, QUALITY_FLOOR};
pub use render::{NullRenderer, Renderer, RendererError, Viewport};
pub use signal::{SignalParticle, SignalPool};
pub use spatial::SpatialGrid;
pub use time::Clock;

/// Convenient re-exports for common usage.
///
/// # Usage
///
/// ```ignore
/// use axon::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::SimConfig;
    pub use crate::engine::{Engine, Simulation};
    pub use crate::error::{ConfigError, MountError};
    pub use crate::frame::FrameState;
    pub use crate::render::{NullRenderer, Renderer, RendererError, Viewport};
    pub use crate::{Vec2, Vec3};
}
