//! The rendering collaborator seam.
//!
//! The engine never touches a GPU. Once per tick it hands the renderer a
//! [`FrameState`](crate::frame::FrameState) of flat numeric buffers — node
//! positions/sizes/activity, edge index pairs with strengths and phases,
//! signal positions with alphas, shooting-star head/tail segments — and the
//! renderer owns everything from upload to post-processing.
//!
//! # Example
//!
//! ```ignore
//! struct WgpuRenderer { /* pipelines, buffers */ }
//!
//! impl Renderer for WgpuRenderer {
//!     fn init(&mut self, viewport: Viewport) -> Result<(), RendererError> {
//!         // request adapter/device; fail here if the GPU is unusable
//!         Ok(())
//!     }
//!
//!     fn present(&mut self, frame: &FrameState) {
//!         // upload frame.nodes() / frame.edges() / ... and draw
//!     }
//!
//!     fn shutdown(&mut self) {}
//! }
//! ```

use crate::frame::FrameState;

/// Error type renderers report from [`Renderer::init`].
pub type RendererError = Box<dyn std::error::Error + Send + Sync>;

/// World-space viewport dimensions.
///
/// The world origin is the viewport center; x grows right, y grows up.
/// Nodes drift within a margin slightly larger than the visible area so
/// edge wrapping happens off screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// Margin factor applied to the half extents for the wrap region.
    pub const WRAP_MARGIN: f32 = 1.2;

    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Half extents of the visible area.
    #[inline]
    pub fn half(&self) -> (f32, f32) {
        (self.width * 0.5, self.height * 0.5)
    }

    /// Half extents of the wrap region nodes teleport across.
    #[inline]
    pub fn wrap(&self) -> (f32, f32) {
        let (hx, hy) = self.half();
        (hx * Self::WRAP_MARGIN, hy * Self::WRAP_MARGIN)
    }
}

/// Consumes simulation output once per tick.
///
/// Implementations must be cheap to call from the hot loop; `present` takes
/// borrowed buffers and must not block.
pub trait Renderer {
    /// One-time setup, called during mount.
    ///
    /// Return an error if a required capability is missing; the mount fails
    /// explicitly rather than degrading into partial rendering.
    fn init(&mut self, viewport: Viewport) -> Result<(), RendererError>;

    /// Consume the frame produced by this tick.
    fn present(&mut self, frame: &FrameState);

    /// The viewport changed; internal surfaces should follow.
    fn resize(&mut self, _viewport: Viewport) {}

    /// Release rendering resources. Called exactly once during teardown.
    fn shutdown(&mut self);
}

/// A renderer that discards every frame.
///
/// Useful for tests and headless runs of the simulation.
#[derive(Debug, Default)]
pub struct NullRenderer {
    frames: u64,
}

impl NullRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of frames presented so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Renderer for NullRenderer {
    fn init(&mut self, _viewport: Viewport) -> Result<(), RendererError> {
        Ok(())
    }

    fn present(&mut self, _frame: &FrameState) {
        self.frames += 1;
    }

    fn shutdown(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_extents() {
        let viewport = Viewport::new(1920.0, 1080.0);
        assert_eq!(viewport.half(), (960.0, 540.0));
        let (wx, wy) = viewport.wrap();
        assert!((wx - 1152.0).abs() < 0.001);
        assert!((wy - 648.0).abs() < 0.001);
    }
}
