use crate::clock::FrameClock;
use crate::config::SceneConfig;
use crate::navigate;
use crate::picking;
use crate::renderer::renderer::Renderer;
use crate::renderer::vertex::InstanceRaw;
use crate::scene::atom::Atom;
use crate::ui::HudState;
use glam::{Mat4, Vec2, Vec3};
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::WindowEvent;
use winit::window::{CursorIcon, Window};

pub type AppError = Box<dyn std::error::Error + Send + Sync>;
pub type AppResult<T> = Result<T, AppError>;

#[cfg(not(target_arch = "wasm32"))]
use crate::ui::desktop::{HudFrame, HudLayer};

/// Emissive boost for electrons; there is no bloom pass, so the glow
/// comes from overdriving the tint.
const ELECTRON_INTENSITY: f32 = 1.2;

/// Directional falloff on nucleons so the cluster keeps its shape.
const NUCLEON_SHADE: f32 = 0.45;

pub struct App {
    renderer: Renderer<'static>,
    atom: Atom,
    clock: FrameClock,
    scene_time: f32,
    pointer: Vec2,
    cursor_inside: bool,
    hud_state: HudState,
    #[cfg(not(target_arch = "wasm32"))]
    hud_layer: HudLayer,
}

impl App {
    pub async fn initialize(window: &Window, config: SceneConfig) -> AppResult<Self> {
        let renderer = Renderer::new(window, &config)
            .await
            .map_err(|e| -> AppError { e.to_string().into() })?;
        let atom = Atom::new(&config);

        #[cfg(not(target_arch = "wasm32"))]
        let hud_layer = HudLayer::new(window, renderer.device(), renderer.surface_format());

        Ok(Self {
            renderer,
            atom,
            clock: FrameClock::new(),
            scene_time: 0.0,
            pointer: Vec2::ZERO,
            cursor_inside: false,
            hud_state: HudState::new(),
            #[cfg(not(target_arch = "wasm32"))]
            hud_layer,
        })
    }

    pub fn size(&self) -> PhysicalSize<u32> {
        self.renderer.size()
    }

    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        self.renderer.resize(new_size);
    }

    /// Routes a window event to the HUD first; a consumed event stays
    /// out of the scene (clicks on the control window must not
    /// navigate).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn handle_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        self.hud_layer.handle_event(window, event)
    }

    #[cfg(target_arch = "wasm32")]
    pub fn handle_event(&mut self, _window: &Window, _event: &WindowEvent) -> bool {
        false
    }

    pub fn pointer_moved(&mut self, position: PhysicalPosition<f64>) {
        let size = self.renderer.size();
        self.pointer = Vec2::new(
            (2.0 * position.x / size.width as f64 - 1.0) as f32,
            (1.0 - 2.0 * position.y / size.height as f64) as f32,
        );
        self.cursor_inside = true;
    }

    pub fn pointer_left(&mut self) {
        self.cursor_inside = false;
        self.atom.set_hovered(None);
        self.hud_state.hovered_anchor = None;
    }

    pub fn pointer_clicked(&mut self) {
        let Some(target) = self.atom.hovered() else {
            return;
        };
        if let Some(anchor) = self.atom.anchor_of(target) {
            let anchor = anchor.to_owned();
            navigate::navigate(&anchor);
            self.hud_state.last_navigation = Some(anchor);
        }
    }

    pub fn render(&mut self, window: &Window) -> Result<(), wgpu::SurfaceError> {
        self.advance(window);

        let (spheres, rings) = self.build_instances();
        self.renderer.update_instances(&spheres, &rings);

        #[cfg(not(target_arch = "wasm32"))]
        {
            let hud_frame: HudFrame = {
                let (hud_layer, hud_state) = (&mut self.hud_layer, &mut self.hud_state);
                hud_layer.prepare(window, |ctx| Self::build_hud(ctx, hud_state))
            };

            let mut pending_frame = Some(hud_frame);
            let (renderer, hud_layer) = (&mut self.renderer, &mut self.hud_layer);
            renderer.render_with_overlay(|device, queue, encoder, view| {
                if let Some(frame) = pending_frame.take() {
                    hud_layer.paint(device, queue, encoder, view, frame);
                }
            })
        }

        #[cfg(target_arch = "wasm32")]
        {
            self.renderer.render_with_overlay(|_, _, _, _| {})
        }
    }

    /// Per-frame update: advance clocks and motion, then re-resolve the
    /// hover target under the pointer.
    fn advance(&mut self, window: &Window) {
        let dt = self.clock.tick();
        let scene_dt = dt * self.hud_state.time_scale();
        self.scene_time += scene_dt;

        self.atom
            .advance(self.scene_time, scene_dt, dt, self.pointer);

        let target = if self.cursor_inside {
            let ray = self.renderer.camera().screen_ray(self.pointer);
            picking::pick(&self.atom, &ray)
        } else {
            None
        };
        self.atom.set_hovered(target);
        self.hud_state.hovered_anchor = target
            .and_then(|t| self.atom.anchor_of(t))
            .map(str::to_owned);

        window.set_cursor_icon(if target.is_some() {
            CursorIcon::Pointer
        } else {
            CursorIcon::Default
        });
    }

    /// Flattens the scene graph into per-instance GPU data: spheres
    /// (nucleons, then electrons) and one transform per ring.
    fn build_instances(&self) -> (Vec<InstanceRaw>, Vec<InstanceRaw>) {
        let nucleus = self.atom.nucleus();
        let nucleon_scale = Mat4::from_scale(Vec3::splat(nucleus.nucleon_radius()));
        let rotation = nucleus.rotation_matrix();

        let mut spheres = Vec::with_capacity(32);
        for nucleon in nucleus.nucleons() {
            let model = rotation * Mat4::from_translation(nucleon.offset) * nucleon_scale;
            spheres.push(InstanceRaw::new(model, nucleon.color, 1.0, NUCLEON_SHADE));
        }

        let mut rings = Vec::with_capacity(self.atom.shells().len());
        for shell in self.atom.shells() {
            let ring_transform = shell.ring().transform();
            for electron in shell.electrons() {
                let model = ring_transform
                    * Mat4::from_translation(electron.position())
                    * Mat4::from_scale(Vec3::splat(electron.current_scale()));
                spheres.push(InstanceRaw::new(
                    model,
                    shell.electron_color(),
                    ELECTRON_INTENSITY,
                    0.0,
                ));
            }

            if self.hud_state.show_rings {
                rings.push(InstanceRaw::new(ring_transform, shell.ring().color(), 1.0, 0.0));
            }
        }

        (spheres, rings)
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn build_hud(ctx: &egui::Context, hud_state: &mut HudState) {
        use egui::Slider;

        egui::Window::new("Scene")
            .default_width(220.0)
            .resizable(false)
            .show(ctx, |ui| {
                ui.checkbox(&mut hud_state.paused, "Paused");
                ui.add(Slider::new(&mut hud_state.speed, 0.0..=3.0).text("Speed"));
                ui.checkbox(&mut hud_state.show_rings, "Show rings");

                ui.separator();

                match &hud_state.hovered_anchor {
                    Some(anchor) => ui.label(format!("Hovering {anchor}")),
                    None => ui.label("Nothing hovered"),
                };
                if let Some(anchor) = &hud_state.last_navigation {
                    ui.label(format!("Last visited {anchor}"));
                }
            });
    }
}
