//! Immutable per-draw bundle handed to the renderer

use crate::foundation::color::Color;
use crate::foundation::math::Mat4;
use crate::shape::bounds::BoundingBox;
use crate::shape::mesh::RenderBuffers;
use crate::shape::parameters::ShapeParameters;

/// Everything a renderer needs to draw one bone placement
///
/// Built once per redraw and never mutated afterwards. It is shared through
/// an `Arc`, so the render stage can read it from another thread.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawSnapshot {
    params: ShapeParameters,
    object_matrix: Mat4,
    wire_color: Color,
    depth_priority: u32,
    line_width: f32,
    buffers: RenderBuffers,
    bounds: BoundingBox,
}

impl DrawSnapshot {
    pub(crate) fn new(
        params: ShapeParameters,
        object_matrix: Mat4,
        line_width: f32,
        buffers: RenderBuffers,
        bounds: BoundingBox,
    ) -> Self {
        Self {
            wire_color: params.wire_color,
            depth_priority: params.depth_priority,
            params,
            object_matrix,
            line_width,
            buffers,
            bounds,
        }
    }

    /// Parameters at the time of the draw
    pub const fn parameters(&self) -> &ShapeParameters {
        &self.params
    }

    /// Object matrix at the time of the draw
    pub const fn object_matrix(&self) -> &Mat4 {
        &self.object_matrix
    }

    /// Wire colour for the placement
    pub const fn wire_color(&self) -> Color {
        self.wire_color
    }

    /// Depth priority for the placement
    pub const fn depth_priority(&self) -> u32 {
        self.depth_priority
    }

    /// Wireframe line width
    pub const fn line_width(&self) -> f32 {
        self.line_width
    }

    /// Triangle and line buffers
    pub const fn buffers(&self) -> &RenderBuffers {
        &self.buffers
    }

    /// Bounds of the drawn geometry
    pub const fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }
}
