/// Longest frame delta fed into the scene; stalls (window drags,
/// background tabs) otherwise make electrons jump whole orbits.
const MAX_DT: f32 = 0.1;

/// Monotonic frame clock with a platform-specific time source.
pub struct FrameClock {
    #[cfg(not(target_arch = "wasm32"))]
    start: std::time::Instant,
    last: f64,
}

impl FrameClock {
    pub fn new() -> Self {
        #[cfg(not(target_arch = "wasm32"))]
        {
            Self {
                start: std::time::Instant::now(),
                last: 0.0,
            }
        }
        #[cfg(target_arch = "wasm32")]
        {
            Self { last: now_seconds() }
        }
    }

    /// Seconds since the previous `tick`, clamped to [`MAX_DT`].
    pub fn tick(&mut self) -> f32 {
        let now = self.now();
        let dt = (now - self.last) as f32;
        self.last = now;
        dt.clamp(0.0, MAX_DT)
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn now(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }

    #[cfg(target_arch = "wasm32")]
    fn now(&self) -> f64 {
        now_seconds()
    }
}

#[cfg(target_arch = "wasm32")]
fn now_seconds() -> f64 {
    web_sys::window()
        .and_then(|window| window.performance())
        .map(|performance| performance.now() / 1000.0)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dt_is_clamped() {
        let mut clock = FrameClock::new();
        clock.last = -10.0;
        assert_eq!(clock.tick(), MAX_DT);
    }

    #[test]
    fn dt_is_never_negative() {
        let mut clock = FrameClock::new();
        clock.last = f64::MAX;
        assert_eq!(clock.tick(), 0.0);
    }
}
