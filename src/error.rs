//! Error types for axon.
//!
//! Mounting is the only fallible operation: the renderer may be unable to
//! initialize, or the configuration may be internally inconsistent. The hot
//! loop itself never errors; pool exhaustion drops spawns silently and
//! sustained overload is handled by the quality controller.

use std::fmt;

/// Errors detected while validating a [`SimConfig`](crate::SimConfig).
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The seed node count is zero.
    NoNodes,
    /// The node cap is smaller than the seed count.
    CapBelowSeed { max_nodes: usize, node_count: usize },
    /// The breathing range is inverted (min > max).
    InvertedBreathingRange { min: f32, max: f32 },
    /// The grid cell size cannot cover the maximum connection reach.
    CellTooSmall { cell_size: f32, connect_max: f32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NoNodes => write!(f, "node_count must be at least 1"),
            ConfigError::CapBelowSeed { max_nodes, node_count } => write!(
                f,
                "max_nodes ({}) is below the seed node_count ({})",
                max_nodes, node_count
            ),
            ConfigError::InvertedBreathingRange { min, max } => write!(
                f,
                "breathing range is inverted: connect_min ({}) > connect_max ({})",
                min, max
            ),
            ConfigError::CellTooSmall { cell_size, connect_max } => write!(
                f,
                "cell_size ({}) must be >= connect_max ({}) or the partition misses connectable pairs",
                cell_size, connect_max
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Errors that can occur when mounting a simulation.
#[derive(Debug)]
pub enum MountError {
    /// The configuration failed validation.
    Config(ConfigError),
    /// The rendering collaborator could not be initialized.
    Renderer(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for MountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MountError::Config(e) => write!(f, "invalid configuration: {}", e),
            MountError::Renderer(e) => write!(f, "renderer failed to initialize: {}", e),
        }
    }
}

impl std::error::Error for MountError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MountError::Config(e) => Some(e),
            MountError::Renderer(e) => Some(e.as_ref()),
        }
    }
}

impl From<ConfigError> for MountError {
    fn from(e: ConfigError) -> Self {
        MountError::Config(e)
    }
}
