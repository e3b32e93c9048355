use glam::Vec3;

/// How much a hovered electron grows.
const HOVER_SCALE: f32 = 2.0;

/// An electron circling its ring in local space. Hovering freezes it
/// in place and doubles its rendered size; on unhover it snaps back to
/// the position dictated by the scene clock.
#[derive(Clone, Debug)]
pub struct Electron {
    radius: f32,
    start_angle: f32,
    speed: f32,
    base_scale: f32,
    position: Vec3,
    hovered: bool,
}

impl Electron {
    pub fn new(radius: f32, start_angle: f32, speed: f32, base_scale: f32) -> Self {
        let mut electron = Self {
            radius,
            start_angle,
            speed,
            base_scale,
            position: Vec3::ZERO,
            hovered: false,
        };
        electron.advance(0.0);
        electron
    }

    /// Position on the orbit circle at scene time `t`.
    pub fn orbit_position(&self, t: f32) -> Vec3 {
        let angle = self.speed * t + self.start_angle;
        Vec3::new(self.radius * angle.cos(), self.radius * angle.sin(), 0.0)
    }

    pub fn advance(&mut self, t: f32) {
        if self.hovered {
            return;
        }
        self.position = self.orbit_position(t);
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered;
    }

    pub fn hovered(&self) -> bool {
        self.hovered
    }

    pub fn current_scale(&self) -> f32 {
        if self.hovered {
            self.base_scale * HOVER_SCALE
        } else {
            self.base_scale
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stays_on_orbit_circle() {
        let mut electron = Electron::new(6.0, 1.2, 0.15, 0.2);
        for step in 0..500 {
            electron.advance(step as f32 * 0.13);
            assert!((electron.position().length() - 6.0).abs() < 1e-4);
            assert_eq!(electron.position().z, 0.0);
        }
    }

    #[test]
    fn start_angle_offsets_position() {
        let a = Electron::new(3.0, 0.0, 0.1, 0.2);
        let b = Electron::new(3.0, std::f32::consts::PI, 0.1, 0.2);
        assert!((a.position() + b.position()).length() < 1e-5);
    }

    #[test]
    fn hover_freezes_and_scales() {
        let mut electron = Electron::new(9.0, 0.0, 0.08, 0.2);
        electron.advance(4.0);
        let frozen = electron.position();

        electron.set_hovered(true);
        electron.advance(9.0);
        assert_eq!(electron.position(), frozen);
        assert_eq!(electron.current_scale(), 0.4);

        electron.set_hovered(false);
        electron.advance(9.0);
        assert_eq!(electron.position(), electron.orbit_position(9.0));
        assert_eq!(electron.current_scale(), 0.2);
    }
}
