pub mod app;
pub mod clock;
pub mod config;
pub mod navigate;
pub mod picking;
pub mod platform;
pub mod renderer;
pub mod scene;
pub mod ui;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    platform::start();
}
