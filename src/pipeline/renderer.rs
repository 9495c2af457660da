//! Renderer handle used for viewport-dependent filtering.

use std::cell::RefCell;
use std::rc::Rc;

use cgmath::{Matrix4, SquareMatrix};

/// Shared handle to the active renderer
///
/// Externally owned and shared across sibling sources; mutation happens only
/// between frames under the render loop's single-threaded discipline.
pub type RendererRef = Rc<RefCell<Renderer>>;

/// Viewport state a visibility filter evaluates against
#[derive(Debug, Clone)]
pub struct Renderer {
    /// Viewport size in pixels (width, height)
    pub viewport: (u32, u32),
    /// Combined view-projection matrix of the active camera
    pub view_proj: Matrix4<f32>,
}

impl Renderer {
    pub fn new(viewport: (u32, u32), view_proj: Matrix4<f32>) -> Self {
        Self { viewport, view_proj }
    }

    /// Wrap into a shared handle
    pub fn into_ref(self) -> RendererRef {
        Rc::new(RefCell::new(self))
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self {
            viewport: (800, 600),
            view_proj: Matrix4::identity(),
        }
    }
}
