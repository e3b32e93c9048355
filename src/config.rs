use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::f32::consts::{FRAC_PI_2, PI};

/// An sRGB color stored as `#rrggbb` in config files.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgb(pub [f32; 3]);

impl Rgb {
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if digits.len() != 6 {
            return None;
        }
        let value = u32::from_str_radix(digits, 16).ok()?;
        let channel = |shift: u32| ((value >> shift) & 0xff) as f32 / 255.0;
        Some(Self([channel(16), channel(8), channel(0)]))
    }

    pub fn to_hex(self) -> String {
        let byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u32;
        format!(
            "#{:02x}{:02x}{:02x}",
            byte(self.0[0]),
            byte(self.0[1]),
            byte(self.0[2])
        )
    }

    /// Converts to linear light for the GPU (the surface format encodes back).
    pub fn to_linear(self) -> [f32; 3] {
        self.0.map(|c| {
            if c <= 0.04045 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        })
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Rgb::from_hex(&hex)
            .ok_or_else(|| D::Error::custom(format!("expected #rrggbb color, got {hex:?}")))
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_deg: f32,
    pub near: f32,
    pub far: f32,
    pub distance: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_deg: 30.0,
            near: 0.01,
            far: 300.0,
            distance: 50.0,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct NucleusConfig {
    pub protons: usize,
    pub neutrons: usize,
    pub proton_color: Rgb,
    pub neutron_color: Rgb,
    pub nucleon_radius: f32,
    /// Peak wobble rate in radians per second.
    pub wobble_rate: f32,
    pub anchor: String,
    pub seed: u64,
}

impl Default for NucleusConfig {
    fn default() -> Self {
        Self {
            protons: 7,
            neutrons: 7,
            proton_color: Rgb::from_hex("#ee0000").unwrap(),
            neutron_color: Rgb::from_hex("#0000aa").unwrap(),
            nucleon_radius: 0.5,
            wobble_rate: 0.3,
            anchor: "#about-me".to_owned(),
            seed: 42,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    pub radius: f32,
    pub ring_color: Rgb,
    pub electron_color: Rgb,
    pub electron_scale: f32,
    /// Angular speed in radians per second.
    pub speed: f32,
    /// Start angle of each electron on the ring, in radians.
    pub phases: Vec<f32>,
    pub anchor: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            radius: 3.0,
            ring_color: Rgb::from_hex("#ffd830").unwrap(),
            electron_color: Rgb::from_hex("#7fa3ff").unwrap(),
            electron_scale: 0.2,
            speed: 0.1,
            phases: vec![0.0],
            anchor: String::new(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub camera: CameraConfig,
    pub nucleus: NucleusConfig,
    pub shells: Vec<ShellConfig>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        let inner = ShellConfig {
            radius: 3.0,
            ring_color: Rgb::from_hex("#ffd830").unwrap(),
            electron_color: Rgb::from_hex("#7fa3ff").unwrap(),
            speed: 0.1,
            phases: vec![0.0, 2.0 * PI / 3.0, -2.0 * PI / 3.0],
            anchor: "#theoretical-physics".to_owned(),
            ..ShellConfig::default()
        };
        let middle = ShellConfig {
            radius: 6.0,
            ring_color: Rgb::from_hex("#ff7e30").unwrap(),
            electron_color: Rgb::from_hex("#6ec6ff").unwrap(),
            speed: 0.15,
            phases: vec![0.0, FRAC_PI_2, PI, -FRAC_PI_2],
            anchor: "#web-development".to_owned(),
            ..ShellConfig::default()
        };
        let outer = ShellConfig {
            radius: 9.0,
            ring_color: Rgb::from_hex("#ff3232").unwrap(),
            electron_color: Rgb::from_hex("#6efff2").unwrap(),
            speed: 0.08,
            phases: vec![0.0, PI],
            anchor: "#artificial-intelligence".to_owned(),
            ..ShellConfig::default()
        };

        Self {
            camera: CameraConfig::default(),
            nucleus: NucleusConfig::default(),
            shells: vec![inner, middle, outer],
        }
    }
}

impl SceneConfig {
    /// Normalizes anchors to `#fragment` form and drops empty shells.
    pub fn sanitize(mut self) -> Self {
        self.nucleus.anchor = crate::navigate::normalize_anchor(&self.nucleus.anchor);
        for shell in &mut self.shells {
            shell.anchor = crate::navigate::normalize_anchor(&shell.anchor);
        }
        self.shells.retain(|shell| {
            let keep = shell.radius > 0.0 && !shell.phases.is_empty();
            if !keep {
                log::warn!("dropping shell with radius {} and no electrons", shell.radius);
            }
            keep
        });
        self
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &std::path::Path) -> Result<Self, Box<dyn std::error::Error>> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        Ok(config.sanitize())
    }

    /// Reads the config file if present, falling back to the built-in scene.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_or_default(path: &std::path::Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => {
                log::info!("loaded scene config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("failed to read {}: {e}; using built-in scene", path.display());
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_colors() {
        assert_eq!(Rgb::from_hex("#ff7e30"), Some(Rgb([1.0, 126.0 / 255.0, 48.0 / 255.0])));
        assert_eq!(Rgb::from_hex("ff7e30"), None);
        assert_eq!(Rgb::from_hex("#ff7e3"), None);
        assert_eq!(Rgb::from_hex("#gg0000"), None);
    }

    #[test]
    fn hex_survives_formatting() {
        let color = Rgb::from_hex("#6efff2").unwrap();
        assert_eq!(color.to_hex(), "#6efff2");
    }

    #[test]
    fn linear_conversion_is_monotonic() {
        let dark = Rgb([0.1, 0.1, 0.1]).to_linear();
        let bright = Rgb([0.9, 0.9, 0.9]).to_linear();
        assert!(dark[0] < bright[0]);
        assert!(dark[0] < 0.1, "sRGB decode darkens low values");
    }

    #[test]
    fn default_scene_matches_layout() {
        let config = SceneConfig::default();
        assert_eq!(config.shells.len(), 3);
        assert_eq!(config.shells[0].radius, 3.0);
        assert_eq!(config.shells[1].radius, 6.0);
        assert_eq!(config.shells[2].radius, 9.0);
        let electrons: usize = config.shells.iter().map(|s| s.phases.len()).sum();
        assert_eq!(electrons, 9);
        assert_eq!(config.nucleus.protons + config.nucleus.neutrons, 14);
        assert_eq!(config.camera.fov_deg, 30.0);
    }

    #[test]
    fn partial_json_overrides_defaults() {
        let json = r#"{
            "camera": { "distance": 40.0 },
            "shells": [
                { "radius": 4.5, "anchor": "projects", "phases": [0.0, 3.14] }
            ]
        }"#;
        let config: SceneConfig = serde_json::from_str(json).unwrap();
        let config = config.sanitize();
        assert_eq!(config.camera.distance, 40.0);
        assert_eq!(config.camera.fov_deg, 30.0);
        assert_eq!(config.shells.len(), 1);
        assert_eq!(config.shells[0].anchor, "#projects");
        assert_eq!(config.shells[0].electron_scale, 0.2);
    }

    #[test]
    fn sanitize_drops_degenerate_shells() {
        let mut config = SceneConfig::default();
        config.shells[1].phases.clear();
        let config = config.sanitize();
        assert_eq!(config.shells.len(), 2);
    }
}
