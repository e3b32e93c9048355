use crate::scene::atom::Atom;
use glam::Vec3;

/// What the pointer is over. Hitting any nucleon hovers the nucleus as
/// a whole; electrons are addressed by shell and slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickTarget {
    Nucleus,
    Electron { shell: usize, index: usize },
}

/// A world-space picking ray, unprojected from the pointer.
#[derive(Clone, Copy, Debug)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Distance along the ray to the nearest intersection with a
    /// sphere, if any lies in front of the origin.
    pub fn sphere_hit(&self, center: Vec3, radius: f32) -> Option<f32> {
        let to_center = self.origin - center;
        let b = to_center.dot(self.direction);
        let c = to_center.length_squared() - radius * radius;
        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrt_d = discriminant.sqrt();
        let near = -b - sqrt_d;
        let far = -b + sqrt_d;
        if near >= 0.0 {
            Some(near)
        } else if far >= 0.0 {
            // Origin inside the sphere.
            Some(far)
        } else {
            None
        }
    }
}

/// Intersects the ray with every pickable sphere in the scene and
/// returns the closest hit, mirroring a scene-graph raycast.
pub fn pick(atom: &Atom, ray: &Ray) -> Option<PickTarget> {
    let mut best: Option<(f32, PickTarget)> = None;
    let mut consider = |distance: f32, target: PickTarget| {
        if best.map_or(true, |(nearest, _)| distance < nearest) {
            best = Some((distance, target));
        }
    };

    let nucleon_radius = atom.nucleus().nucleon_radius();
    for center in atom.nucleus().nucleon_centers() {
        if let Some(distance) = ray.sphere_hit(center, nucleon_radius) {
            consider(distance, PickTarget::Nucleus);
        }
    }

    for (shell_index, shell) in atom.shells().iter().enumerate() {
        let ring_transform = shell.ring().transform();
        for (electron_index, electron) in shell.electrons().iter().enumerate() {
            let center = ring_transform.transform_point3(electron.position());
            if let Some(distance) = ray.sphere_hit(center, electron.current_scale()) {
                consider(
                    distance,
                    PickTarget::Electron {
                        shell: shell_index,
                        index: electron_index,
                    },
                );
            }
        }
    }

    best.map(|(_, target)| target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SceneConfig;

    fn ray_from_camera(target: Vec3) -> Ray {
        let origin = Vec3::new(0.0, 0.0, 50.0);
        Ray {
            origin,
            direction: (target - origin).normalize(),
        }
    }

    #[test]
    fn sphere_hit_reports_near_surface() {
        let ray = Ray {
            origin: Vec3::new(0.0, 0.0, 10.0),
            direction: Vec3::NEG_Z,
        };
        let hit = ray.sphere_hit(Vec3::ZERO, 2.0).unwrap();
        assert!((hit - 8.0).abs() < 1e-5);
    }

    #[test]
    fn sphere_behind_ray_is_ignored() {
        let ray = Ray {
            origin: Vec3::new(0.0, 0.0, 10.0),
            direction: Vec3::Z,
        };
        assert!(ray.sphere_hit(Vec3::ZERO, 2.0).is_none());
    }

    #[test]
    fn grazing_miss_returns_none() {
        let ray = Ray {
            origin: Vec3::new(3.0, 0.0, 10.0),
            direction: Vec3::NEG_Z,
        };
        assert!(ray.sphere_hit(Vec3::ZERO, 2.0).is_none());
    }

    #[test]
    fn central_ray_picks_nucleus() {
        let atom = Atom::new(&SceneConfig::default());
        let ray = ray_from_camera(Vec3::ZERO);
        assert_eq!(pick(&atom, &ray), Some(PickTarget::Nucleus));
    }

    #[test]
    fn ray_at_electron_picks_it() {
        let atom = Atom::new(&SceneConfig::default());
        // At t = 0 the first outer electron sits at (9, 0, 0).
        let electron = &atom.shells()[2].electrons()[0];
        let world = atom.shells()[2]
            .ring()
            .transform()
            .transform_point3(electron.position());
        let ray = ray_from_camera(world);
        assert_eq!(
            pick(&atom, &ray),
            Some(PickTarget::Electron { shell: 2, index: 0 })
        );
    }

    #[test]
    fn empty_space_picks_nothing() {
        let atom = Atom::new(&SceneConfig::default());
        let ray = ray_from_camera(Vec3::new(100.0, 100.0, 0.0));
        assert_eq!(pick(&atom, &ray), None);
    }

    #[test]
    fn nearer_object_wins() {
        let atom = Atom::new(&SceneConfig::default());
        // A ray skimming through the scene center from the side hits the
        // near face of the nucleus, never a farther electron behind it.
        let ray = Ray {
            origin: Vec3::new(-20.0, 0.0, 0.0),
            direction: Vec3::X,
        };
        assert_eq!(pick(&atom, &ray), Some(PickTarget::Nucleus));
    }
}
