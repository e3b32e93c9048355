use crate::config::{Rgb, SceneConfig, ShellConfig};
use crate::picking::PickTarget;
use crate::scene::electron::Electron;
use crate::scene::nucleus::{Nucleus, NucleusBuilder};
use crate::scene::orbit::OrbitRing;
use glam::Vec2;

/// One orbit ring plus the electrons riding it. All electrons of a
/// shell share a color, size, speed and navigation anchor.
#[derive(Clone, Debug)]
pub struct Shell {
    ring: OrbitRing,
    electrons: Vec<Electron>,
    electron_color: Rgb,
    anchor: String,
}

impl Shell {
    fn new(config: &ShellConfig) -> Self {
        let electrons = config
            .phases
            .iter()
            .map(|&start| Electron::new(config.radius, start, config.speed, config.electron_scale))
            .collect();

        Self {
            ring: OrbitRing::new(config.radius, config.ring_color),
            electrons,
            electron_color: config.electron_color,
            anchor: config.anchor.clone(),
        }
    }

    pub fn ring(&self) -> &OrbitRing {
        &self.ring
    }

    pub fn electrons(&self) -> &[Electron] {
        &self.electrons
    }

    pub fn electron_color(&self) -> Rgb {
        self.electron_color
    }

    pub fn anchor(&self) -> &str {
        &self.anchor
    }
}

/// The whole scene graph: nucleus plus shells. Owns the current hover
/// target and applies its side effects (freezes, scaling).
pub struct Atom {
    nucleus: Nucleus,
    shells: Vec<Shell>,
    hovered: Option<PickTarget>,
}

impl Atom {
    pub fn new(config: &SceneConfig) -> Self {
        let nucleus = NucleusBuilder::new(config.nucleus.clone()).build();
        let shells = config.shells.iter().map(Shell::new).collect();

        Self {
            nucleus,
            shells,
            hovered: None,
        }
    }

    pub fn nucleus(&self) -> &Nucleus {
        &self.nucleus
    }

    pub fn shells(&self) -> &[Shell] {
        &self.shells
    }

    pub fn hovered(&self) -> Option<PickTarget> {
        self.hovered
    }

    /// Advances all motion. `t`/`scene_dt` follow the scene clock (they
    /// stop while paused); `real_dt` drives the pointer-follow easing,
    /// which stays live even when the scene is frozen.
    pub fn advance(&mut self, t: f32, scene_dt: f32, real_dt: f32, pointer: Vec2) {
        self.nucleus.advance(t, scene_dt);
        for shell in &mut self.shells {
            shell.ring.follow_pointer(pointer, real_dt);
            for electron in &mut shell.electrons {
                electron.advance(t);
            }
        }
    }

    /// Swaps the hover target, toggling the per-object hover flags.
    pub fn set_hovered(&mut self, target: Option<PickTarget>) {
        if self.hovered == target {
            return;
        }

        match self.hovered.take() {
            Some(PickTarget::Nucleus) => self.nucleus.set_hovered(false),
            Some(PickTarget::Electron { shell, index }) => {
                if let Some(e) = self.electron_mut(shell, index) {
                    e.set_hovered(false);
                }
            }
            None => {}
        }

        match target {
            Some(PickTarget::Nucleus) => self.nucleus.set_hovered(true),
            Some(PickTarget::Electron { shell, index }) => {
                if let Some(e) = self.electron_mut(shell, index) {
                    e.set_hovered(true);
                }
            }
            None => {}
        }

        self.hovered = target;
    }

    /// Navigation anchor for a picked object.
    pub fn anchor_of(&self, target: PickTarget) -> Option<&str> {
        match target {
            PickTarget::Nucleus => Some(self.nucleus.anchor()),
            PickTarget::Electron { shell, .. } => {
                self.shells.get(shell).map(|s| s.anchor())
            }
        }
    }

    fn electron_mut(&mut self, shell: usize, index: usize) -> Option<&mut Electron> {
        self.shells.get_mut(shell)?.electrons.get_mut(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SceneConfig;

    #[test]
    fn builds_default_scene() {
        let atom = Atom::new(&SceneConfig::default());
        assert_eq!(atom.shells().len(), 3);
        assert_eq!(atom.shells()[0].electrons().len(), 3);
        assert_eq!(atom.shells()[1].electrons().len(), 4);
        assert_eq!(atom.shells()[2].electrons().len(), 2);
        assert_eq!(atom.nucleus().nucleons().len(), 14);
    }

    #[test]
    fn hover_switch_clears_previous_target() {
        let mut atom = Atom::new(&SceneConfig::default());

        atom.set_hovered(Some(PickTarget::Electron { shell: 0, index: 1 }));
        assert!(atom.shells()[0].electrons()[1].hovered());

        atom.set_hovered(Some(PickTarget::Nucleus));
        assert!(!atom.shells()[0].electrons()[1].hovered());
        assert!(atom.nucleus().hovered());

        atom.set_hovered(None);
        assert!(!atom.nucleus().hovered());
    }

    #[test]
    fn anchors_resolve_per_target() {
        let atom = Atom::new(&SceneConfig::default());
        assert_eq!(atom.anchor_of(PickTarget::Nucleus), Some("#about-me"));
        assert_eq!(
            atom.anchor_of(PickTarget::Electron { shell: 2, index: 0 }),
            Some("#artificial-intelligence")
        );
        assert_eq!(
            atom.anchor_of(PickTarget::Electron { shell: 9, index: 0 }),
            None
        );
    }

    #[test]
    fn paused_scene_still_follows_pointer() {
        let mut atom = Atom::new(&SceneConfig::default());
        let before = atom.shells()[0].electrons()[0].position();
        for _ in 0..120 {
            atom.advance(0.0, 0.0, 1.0 / 60.0, Vec2::new(1.0, 0.0));
        }
        assert_eq!(atom.shells()[0].electrons()[0].position(), before);
        assert!(atom.shells()[0].ring().yaw().abs() > 1e-3);
    }
}
