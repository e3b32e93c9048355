use crate::config::{NucleusConfig, Rgb};
use glam::{EulerRot, Mat4, Vec3};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, UnitSphere};

/// One rendered sphere inside the nucleus cluster.
#[derive(Clone, Debug)]
pub struct Nucleon {
    pub offset: Vec3,
    pub color: Rgb,
}

/// The clickable nucleus: a fixed nucleon cluster with a slow,
/// time-varying wobble that freezes while hovered.
#[derive(Clone, Debug)]
pub struct Nucleus {
    nucleons: Vec<Nucleon>,
    nucleon_radius: f32,
    wobble_rate: f32,
    anchor: String,
    rotation: Vec3,
    hovered: bool,
}

impl Nucleus {
    pub fn nucleons(&self) -> &[Nucleon] {
        &self.nucleons
    }

    pub fn nucleon_radius(&self) -> f32 {
        self.nucleon_radius
    }

    pub fn anchor(&self) -> &str {
        &self.anchor
    }

    pub fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered;
    }

    pub fn hovered(&self) -> bool {
        self.hovered
    }

    /// Advances the wobble. The rate swings sinusoidally with scene
    /// time, so the cluster drifts back and forth rather than spinning.
    pub fn advance(&mut self, t: f32, dt: f32) {
        if self.hovered {
            return;
        }
        let rate = (t / 10.0).sin() * self.wobble_rate;
        self.rotation += Vec3::splat(rate * dt);
    }

    pub fn rotation_matrix(&self) -> Mat4 {
        Mat4::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        )
    }

    /// World-space center of each nucleon under the current wobble.
    pub fn nucleon_centers(&self) -> impl Iterator<Item = Vec3> + '_ {
        let rotation = self.rotation_matrix();
        self.nucleons
            .iter()
            .map(move |nucleon| rotation.transform_point3(nucleon.offset))
    }
}

/// Builds the nucleon cluster deterministically from a seed: protons on
/// an inner fibonacci shell, neutrons on an outer one, with a little
/// seeded jitter so the cluster reads as packed rather than gridded.
pub struct NucleusBuilder {
    config: NucleusConfig,
}

impl NucleusBuilder {
    pub fn new(config: NucleusConfig) -> Self {
        Self { config }
    }

    pub fn build(&self) -> Nucleus {
        let config = &self.config;
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);

        let inner_radius = config.nucleon_radius * 1.2;
        let outer_radius = config.nucleon_radius * 2.0;
        let jitter = config.nucleon_radius * 0.16;

        let mut nucleons = Vec::with_capacity(config.protons + config.neutrons);
        for offset in fibonacci_sphere(config.protons, inner_radius) {
            nucleons.push(Nucleon {
                offset: offset + jittered(&mut rng, jitter),
                color: config.proton_color,
            });
        }
        for offset in fibonacci_sphere(config.neutrons, outer_radius) {
            nucleons.push(Nucleon {
                offset: offset + jittered(&mut rng, jitter),
                color: config.neutron_color,
            });
        }

        // Interleave the shells so neither color clumps on one side.
        let protons = config.protons;
        let mut mixed = Vec::with_capacity(nucleons.len());
        let (inner, outer) = nucleons.split_at(protons);
        let mut a = inner.iter();
        let mut b = outer.iter();
        loop {
            match (a.next(), b.next()) {
                (None, None) => break,
                (x, y) => {
                    mixed.extend(x.cloned());
                    mixed.extend(y.cloned());
                }
            }
        }

        Nucleus {
            nucleons: mixed,
            nucleon_radius: config.nucleon_radius,
            wobble_rate: config.wobble_rate,
            anchor: config.anchor.clone(),
            rotation: Vec3::ZERO,
            hovered: false,
        }
    }
}

fn jittered<R: rand::Rng>(rng: &mut R, magnitude: f32) -> Vec3 {
    let direction: [f32; 3] = UnitSphere.sample(rng);
    Vec3::from(direction) * magnitude
}

fn fibonacci_sphere(count: usize, radius: f32) -> Vec<Vec3> {
    if count == 0 {
        return Vec::new();
    }
    if count == 1 {
        return vec![Vec3::ZERO];
    }

    let mut points = Vec::with_capacity(count);
    let golden_angle = std::f32::consts::PI * (3.0 - 5.0_f32.sqrt());

    for i in 0..count {
        let y = 1.0 - (2.0 * (i as f32 + 0.5) / count as f32);
        let radius_xy = (1.0 - y * y).max(0.0).sqrt();
        let theta = golden_angle * i as f32;
        let x = radius_xy * theta.cos();
        let z = radius_xy * theta.sin();
        points.push(Vec3::new(x, y, z) * radius);
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NucleusConfig;

    fn build_default() -> Nucleus {
        NucleusBuilder::new(NucleusConfig::default()).build()
    }

    #[test]
    fn builds_fourteen_nucleons() {
        let nucleus = build_default();
        assert_eq!(nucleus.nucleons().len(), 14);
        let red = NucleusConfig::default().proton_color;
        let protons = nucleus
            .nucleons()
            .iter()
            .filter(|n| n.color == red)
            .count();
        assert_eq!(protons, 7);
    }

    #[test]
    fn cluster_stays_compact() {
        let nucleus = build_default();
        let max_offset = nucleus
            .nucleons()
            .iter()
            .map(|n| n.offset.length())
            .fold(0.0f32, f32::max);
        assert!(max_offset < 1.5, "cluster radius {max_offset} too wide");
    }

    #[test]
    fn same_seed_same_cluster() {
        let a = build_default();
        let b = build_default();
        for (x, y) in a.nucleons().iter().zip(b.nucleons()) {
            assert_eq!(x.offset, y.offset);
        }
    }

    #[test]
    fn wobble_freezes_while_hovered() {
        let mut nucleus = build_default();
        nucleus.advance(2.0, 0.016);
        let moved = nucleus.rotation;
        assert_ne!(moved, Vec3::ZERO);

        nucleus.set_hovered(true);
        nucleus.advance(3.0, 0.016);
        assert_eq!(nucleus.rotation, moved);

        nucleus.set_hovered(false);
        nucleus.advance(3.0, 0.016);
        assert_ne!(nucleus.rotation, moved);
    }

    #[test]
    fn rotation_preserves_offsets() {
        let mut nucleus = build_default();
        for _ in 0..100 {
            nucleus.advance(1.0, 0.016);
        }
        for (center, nucleon) in nucleus.nucleon_centers().zip(nucleus.nucleons()) {
            let drift = (center.length() - nucleon.offset.length()).abs();
            assert!(drift < 1e-4);
        }
    }
}
