// Orthographic camera with a fixed world height

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2, Vec3};

use crate::core::math::aspect_ratio;
use crate::engine::physics::Bounds;

/// Default world-space half-height visible in the viewport
pub const DEFAULT_HALF_HEIGHT: f32 = 5.0;

/// 2D camera centred on the origin
///
/// The visible half-height is fixed; the half-width follows the framebuffer
/// aspect ratio so world units stay square.
#[derive(Debug, Clone)]
pub struct Camera {
    half_width: f32,
    half_height: f32,
    projection: Mat4,
}

impl Camera {
    /// Create a camera for a framebuffer of the given pixel size
    pub fn new(half_height: f32, width: u32, height: u32) -> Self {
        let mut camera = Self {
            half_width: half_height * aspect_ratio(width, height),
            half_height,
            projection: Mat4::IDENTITY,
        };
        camera.update_projection();
        camera
    }

    fn update_projection(&mut self) {
        self.projection = Mat4::orthographic_rh(
            -self.half_width,
            self.half_width,
            -self.half_height,
            self.half_height,
            -1.0,
            1.0,
        );
    }

    /// Follow a framebuffer resize
    ///
    /// Returns true if the visible extents changed. A fully collapsed
    /// framebuffer (minimized window) keeps the previous extents.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if width == 0 && height == 0 {
            return false;
        }

        let half_width = self.half_height * aspect_ratio(width, height);
        if half_width == self.half_width {
            return false;
        }

        self.half_width = half_width;
        self.update_projection();
        true
    }

    /// Projection matrix for the current extents
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    /// World-space half-extents
    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(self.half_width, self.half_height)
    }

    /// Visible region as collision bounds
    pub fn viewport_bounds(&self) -> Bounds {
        Bounds::new(self.half_width, self.half_height)
    }
}

/// A 4x4 matrix uniform for the GPU
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct MatrixUniform {
    pub matrix: [[f32; 4]; 4],
}

impl MatrixUniform {
    pub fn new(matrix: Mat4) -> Self {
        Self {
            matrix: matrix.to_cols_array_2d(),
        }
    }

    /// Translation-only model matrix placing the mesh at `position`
    pub fn model(position: Vec3) -> Self {
        Self::new(Mat4::from_translation(position))
    }
}
