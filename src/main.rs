#[cfg(not(target_arch = "wasm32"))]
fn main() {
    atom_scene::platform::start();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // On wasm32 the #[wasm_bindgen(start)] entry point in lib.rs runs
    // instead.
}
