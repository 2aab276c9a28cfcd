//! # 3D Camera and Screen Projection
//!
//! Provides the perspective camera the viewer looks through and the
//! [`ScreenProjector`] abstraction the manipulator uses to map pointer
//! positions into the world.
//!
//! ## Design Principles
//! - **Library-agnostic**: No renderer dependencies in camera math
//! - **Exact inverse**: `screen_to_world(world_to_screen(p)) == p` for any
//!   point in front of the camera
//! - **Depth-carrying screen points**: the third screen component is the
//!   view-space depth, so a pointer position plus a depth names one world point

use crate::foundation::math::{Mat4, Point3, Vec3, utils};

/// Orthonormal camera basis in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBasis {
    /// Screen-right direction
    pub right: Vec3,
    /// Screen-up direction
    pub up: Vec3,
    /// Direction the camera looks along (into the screen)
    pub forward: Vec3,
}

/// Maps between world space and screen space
///
/// Screen points are `(x_px, y_px, depth)` with a bottom-left pixel origin and
/// `depth` measured along the view-forward axis from the camera.
pub trait ScreenProjector {
    /// Project a world point to screen pixels plus its view depth
    fn world_to_screen(&self, world: Vec3) -> Vec3;

    /// Reconstruct the world point under a screen pixel at the given depth
    fn screen_to_world(&self, screen: Vec3) -> Vec3;

    /// Camera basis used to relate screen directions to world directions
    fn view_basis(&self) -> ViewBasis;
}

/// 3D Camera for perspective projection
///
/// # Coordinate System
/// Uses standard right-handed Y-up world coordinates. The camera looks from
/// `position` towards `target`; screen-right is `forward x up`.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Camera position in world space
    pub position: Vec3,

    /// Point the camera is looking at in world space
    pub target: Vec3,

    /// Up vector for camera orientation (typically [0, 1, 0])
    pub up: Vec3,

    /// Vertical field of view angle in radians
    pub fov: f32,

    /// Viewport width in pixels
    pub viewport_width: f32,

    /// Viewport height in pixels
    pub viewport_height: f32,

    /// Distance to near clipping plane
    pub near: f32,

    /// Distance to far clipping plane
    pub far: f32,
}

impl Camera {
    /// Create a new perspective camera with standard Y-up orientation
    ///
    /// # Arguments
    /// * `position` - Camera position in world space
    /// * `fov_degrees` - Vertical field of view in degrees
    /// * `viewport_width` / `viewport_height` - Viewport size in pixels
    /// * `near` / `far` - Clipping plane distances
    ///
    /// The default target is the origin and the up vector is +Y.
    pub fn perspective(
        position: Vec3,
        fov_degrees: f32,
        viewport_width: f32,
        viewport_height: f32,
        near: f32,
        far: f32,
    ) -> Self {
        Self {
            position,
            target: Vec3::zeros(),
            up: Vec3::new(0.0, 1.0, 0.0),
            fov: utils::deg_to_rad(fov_degrees),
            viewport_width,
            viewport_height,
            near,
            far,
        }
    }

    /// Configure camera to look at a specific point with custom up vector
    ///
    /// The up vector doesn't need to be perpendicular to the view direction;
    /// the basis is re-orthonormalized on use.
    pub fn look_at(&mut self, target: Vec3, up: Vec3) {
        self.target = target;
        self.up = up;
        log::trace!("Camera look_at updated - target: {:?}, up: {:?}", target, up);
    }

    /// Aspect ratio (width / height)
    pub fn aspect(&self) -> f32 {
        self.viewport_width / self.viewport_height
    }

    /// Generate view matrix for world-to-camera space transformation
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(
            &Point3::from(self.position),
            &Point3::from(self.target),
            &self.up,
        )
    }

    /// Generate perspective projection matrix
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::new_perspective(self.aspect(), self.fov, self.near, self.far)
    }

    fn half_extents_per_depth(&self) -> (f32, f32) {
        let tan_half_fov = (self.fov * 0.5).tan();
        (tan_half_fov * self.aspect(), tan_half_fov)
    }
}

impl ScreenProjector for Camera {
    fn world_to_screen(&self, world: Vec3) -> Vec3 {
        let basis = self.view_basis();
        let relative = world - self.position;
        let depth = relative.dot(&basis.forward);
        // Points on the camera plane have no projection; keep the result finite
        let divisor = if depth.abs() < f32::EPSILON { f32::EPSILON } else { depth };

        let (half_w, half_h) = self.half_extents_per_depth();
        let ndc_x = relative.dot(&basis.right) / (divisor * half_w);
        let ndc_y = relative.dot(&basis.up) / (divisor * half_h);

        Vec3::new(
            (ndc_x + 1.0) * 0.5 * self.viewport_width,
            (ndc_y + 1.0) * 0.5 * self.viewport_height,
            depth,
        )
    }

    fn screen_to_world(&self, screen: Vec3) -> Vec3 {
        let basis = self.view_basis();
        let depth = screen.z;
        let ndc_x = screen.x / self.viewport_width * 2.0 - 1.0;
        let ndc_y = screen.y / self.viewport_height * 2.0 - 1.0;

        let (half_w, half_h) = self.half_extents_per_depth();
        self.position
            + basis.right * (ndc_x * depth * half_w)
            + basis.up * (ndc_y * depth * half_h)
            + basis.forward * depth
    }

    fn view_basis(&self) -> ViewBasis {
        let forward = (self.target - self.position).normalize();
        let right = forward.cross(&self.up).normalize();
        let up = right.cross(&forward);
        ViewBasis { right, up, forward }
    }
}

impl Default for Camera {
    /// Camera ten units back on +Z looking at the origin, 60 degree FOV, 1280x720
    fn default() -> Self {
        Self::perspective(Vec3::new(0.0, 0.0, 10.0), 60.0, 1280.0, 720.0, 0.1, 1000.0)
    }
}
