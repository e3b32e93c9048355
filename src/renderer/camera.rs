use crate::config::CameraConfig;
use crate::picking::Ray;
use glam::{Mat4, Vec2, Vec3};

/// Fixed camera on the +z axis looking at the origin.
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy: f32,
    pub znear: f32,
    pub zfar: f32,
}

// WGPU's clip space differs from OpenGL's; this remaps z from [-1, 1]
// to [0, 1].
const OPENGL_TO_WGPU_MATRIX: Mat4 = Mat4::from_cols_array(&[
    1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.5, 0.5, 0.0, 0.0, 0.0, 1.0,
]);

impl Camera {
    pub fn new(config: &CameraConfig, aspect: f32) -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, config.distance),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            fovy: config.fov_deg,
            znear: config.near,
            zfar: config.far,
        }
    }

    pub fn build_view_projection_matrix(&self) -> Mat4 {
        let view = Mat4::look_at_rh(self.eye, self.target, self.up);
        let proj = Mat4::perspective_rh(self.fovy.to_radians(), self.aspect, self.znear, self.zfar);

        OPENGL_TO_WGPU_MATRIX * proj * view
    }

    /// Unprojects a pointer position (NDC, y up) into a world-space
    /// picking ray.
    pub fn screen_ray(&self, pointer: Vec2) -> Ray {
        let inverse = self.build_view_projection_matrix().inverse();
        let near = inverse.project_point3(Vec3::new(pointer.x, pointer.y, 0.0));
        let far = inverse.project_point3(Vec3::new(pointer.x, pointer.y, 1.0));

        Ray {
            origin: near,
            direction: (far - near).normalize(),
        }
    }
}

// This is the data we send to the GPU; `repr(C)` and the bytemuck
// traits pin the memory layout.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn new() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
        }
    }

    pub fn update_view_proj(&mut self, camera: &Camera) {
        self.view_proj = camera.build_view_projection_matrix().to_cols_array_2d();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CameraConfig;

    fn camera() -> Camera {
        Camera::new(&CameraConfig::default(), 1.0)
    }

    #[test]
    fn origin_projects_to_screen_center() {
        let camera = camera();
        let clip = camera.build_view_projection_matrix() * Vec3::ZERO.extend(1.0);
        let ndc = clip / clip.w;
        assert!(ndc.x.abs() < 1e-5);
        assert!(ndc.y.abs() < 1e-5);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn center_ray_runs_down_the_view_axis() {
        let camera = camera();
        let ray = camera.screen_ray(Vec2::ZERO);
        assert!((ray.direction - Vec3::NEG_Z).length() < 1e-4);
        assert!((ray.origin.z - camera.eye.z).abs() < 0.1);
    }

    #[test]
    fn screen_ray_round_trips_projection() {
        let camera = camera();
        // Project a world point, then unproject a ray through its
        // screen position; the ray must pass back through the point.
        let world = Vec3::new(4.0, -2.5, 1.0);
        let clip = camera.build_view_projection_matrix() * world.extend(1.0);
        let ndc = clip / clip.w;

        let ray = camera.screen_ray(Vec2::new(ndc.x, ndc.y));
        let to_point = world - ray.origin;
        let miss = (to_point - ray.direction * to_point.dot(ray.direction)).length();
        assert!(miss < 1e-2, "ray misses the point by {miss}");
    }
}
