use crate::config::Rgb;
use glam::{Mat4, Vec2, Vec3};
use std::f32::consts::PI;

/// Smoothing rate for the pointer-follow motion; equivalent to a lerp
/// factor of 0.1 per frame at 60 Hz.
const FOLLOW_RATE: f32 = 6.3;

/// How far the pointer displaces a ring, in world units per NDC unit.
const POINTER_SHIFT: f32 = 0.2;

/// Maximum yaw a ring picks up from the pointer.
const MAX_YAW: f32 = PI / 20.0;

/// A torus that parallaxes gently toward the pointer. The ring's
/// transform also carries its electrons, which orbit in ring-local
/// space.
#[derive(Clone, Debug)]
pub struct OrbitRing {
    radius: f32,
    color: Rgb,
    position: Vec3,
    yaw: f32,
}

impl OrbitRing {
    pub fn new(radius: f32, color: Rgb) -> Self {
        Self {
            radius,
            color,
            position: Vec3::ZERO,
            yaw: 0.0,
        }
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Eases the ring toward the pointer. `dt` is wall-clock time, so
    /// the follow feel does not change with frame rate or scene pause.
    pub fn follow_pointer(&mut self, pointer: Vec2, dt: f32) {
        let blend = 1.0 - (-FOLLOW_RATE * dt).exp();
        let target = Vec3::new(pointer.x * POINTER_SHIFT, pointer.y * POINTER_SHIFT, 0.0);
        self.position = self.position.lerp(target, blend);

        let target_yaw = -pointer.x * MAX_YAW;
        self.yaw += (target_yaw - self.yaw) * blend;
    }

    pub fn transform(&self) -> Mat4 {
        Mat4::from_translation(self.position) * Mat4::from_rotation_y(self.yaw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring() -> OrbitRing {
        OrbitRing::new(6.0, Rgb([1.0, 0.5, 0.2]))
    }

    #[test]
    fn converges_to_pointer_target() {
        let mut ring = ring();
        let pointer = Vec2::new(1.0, -1.0);
        for _ in 0..600 {
            ring.follow_pointer(pointer, 1.0 / 60.0);
        }
        let expected = Vec3::new(POINTER_SHIFT, -POINTER_SHIFT, 0.0);
        assert!((ring.position - expected).length() < 1e-3);
        assert!((ring.yaw - (-MAX_YAW)).abs() < 1e-3);
    }

    #[test]
    fn yaw_stays_bounded() {
        let mut ring = ring();
        for step in 0..1000 {
            let x = if step % 2 == 0 { 1.0 } else { -1.0 };
            ring.follow_pointer(Vec2::new(x, 0.0), 0.05);
            assert!(ring.yaw.abs() <= MAX_YAW + 1e-4);
        }
    }

    #[test]
    fn centered_pointer_recenters_ring() {
        let mut ring = ring();
        for _ in 0..120 {
            ring.follow_pointer(Vec2::new(1.0, 1.0), 1.0 / 60.0);
        }
        assert!(ring.position.length() > 0.0);
        for _ in 0..600 {
            ring.follow_pointer(Vec2::ZERO, 1.0 / 60.0);
        }
        assert!(ring.position.length() < 1e-3);
        assert!(ring.yaw.abs() < 1e-3);
    }

    #[test]
    fn transform_carries_local_points_with_ring() {
        let mut ring = ring();
        for _ in 0..600 {
            ring.follow_pointer(Vec2::new(1.0, 0.0), 1.0 / 60.0);
        }
        let local = Vec3::new(ring.radius(), 0.0, 0.0);
        let world = ring.transform().transform_point3(local);
        // Offset by the ring shift, rotated slightly out of plane.
        assert!((world.x - ring.position.x).abs() < ring.radius());
        assert!(world.z.abs() > 1e-3);
    }
}
