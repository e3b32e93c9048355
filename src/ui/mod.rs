/// Scene controls surfaced by the HUD. The state exists on every
/// target so the frame loop reads one source of truth; only the egui
/// layer that edits it is desktop-only.
#[derive(Clone, Debug)]
pub struct HudState {
    pub paused: bool,
    pub speed: f32,
    pub show_rings: bool,
    pub hovered_anchor: Option<String>,
    pub last_navigation: Option<String>,
}

impl HudState {
    pub fn new() -> Self {
        Self {
            paused: false,
            speed: 1.0,
            show_rings: true,
            hovered_anchor: None,
            last_navigation: None,
        }
    }

    /// Scene-time multiplier for this frame.
    pub fn time_scale(&self) -> f32 {
        if self.paused { 0.0 } else { self.speed.max(0.0) }
    }
}

impl Default for HudState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub mod desktop {
    use egui::ClippedPrimitive;
    use egui_wgpu::{Renderer, ScreenDescriptor};
    use egui_winit::{State as EguiWinitState, pixels_per_point};
    use wgpu::{CommandEncoder, Device, Queue, TextureFormat, TextureView};
    use winit::{event::WindowEvent, window::Window};

    pub struct HudLayer {
        ctx: egui::Context,
        state: EguiWinitState,
        renderer: Renderer,
        screen_desc: ScreenDescriptor,
    }

    pub struct HudFrame {
        pub shapes: Vec<ClippedPrimitive>,
        pub textures_delta: egui::TexturesDelta,
    }

    impl HudLayer {
        pub fn new(window: &Window, device: &Device, surface_format: TextureFormat) -> Self {
            let ctx = egui::Context::default();
            let state = EguiWinitState::new(
                ctx.clone(),
                egui::ViewportId::ROOT,
                window,
                Some(window.scale_factor() as f32),
                None,
            );

            let mut layer = Self {
                ctx,
                state,
                renderer: Renderer::new(device, surface_format, None, 1),
                screen_desc: ScreenDescriptor {
                    size_in_pixels: [1, 1],
                    pixels_per_point: 1.0,
                },
            };
            layer.update_screen_descriptor(window);
            layer
        }

        /// Returns true when egui consumed the event (e.g. a click on
        /// the control window must not pick the scene behind it).
        pub fn handle_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
            let response = self.state.on_window_event(window, event);
            if response.repaint {
                window.request_redraw();
            }
            response.consumed
        }

        pub fn prepare<F>(&mut self, window: &Window, mut build_hud: F) -> HudFrame
        where
            F: FnMut(&egui::Context),
        {
            self.update_screen_descriptor(window);
            let raw_input = self.state.take_egui_input(window);
            let full_output = self.ctx.run(raw_input, |ctx| build_hud(ctx));
            self.state
                .handle_platform_output(window, full_output.platform_output);

            self.screen_desc.pixels_per_point = full_output.pixels_per_point;

            let shapes = self
                .ctx
                .tessellate(full_output.shapes, self.screen_desc.pixels_per_point);

            HudFrame {
                shapes,
                textures_delta: full_output.textures_delta,
            }
        }

        pub fn paint(
            &mut self,
            device: &Device,
            queue: &Queue,
            encoder: &mut CommandEncoder,
            view: &TextureView,
            frame: HudFrame,
        ) {
            let HudFrame {
                shapes,
                mut textures_delta,
            } = frame;

            for (id, image_delta) in textures_delta.set.drain(..) {
                self.renderer
                    .update_texture(device, queue, id, &image_delta);
            }

            let callback_buffers =
                self.renderer
                    .update_buffers(device, queue, encoder, &shapes, &self.screen_desc);

            if !callback_buffers.is_empty() {
                queue.submit(callback_buffers);
            }

            {
                let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("hud-pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    timestamp_writes: None,
                    occlusion_query_set: None,
                });
                self.renderer
                    .render(&mut render_pass, &shapes, &self.screen_desc);
            }

            for id in textures_delta.free.drain(..) {
                self.renderer.free_texture(&id);
            }
        }

        fn update_screen_descriptor(&mut self, window: &Window) {
            let size = window.inner_size();
            self.screen_desc.size_in_pixels = [size.width.max(1), size.height.max(1)];
            self.screen_desc.pixels_per_point = pixels_per_point(&self.ctx, window);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pause_zeroes_time_scale() {
        let mut hud = HudState::new();
        assert_eq!(hud.time_scale(), 1.0);
        hud.paused = true;
        assert_eq!(hud.time_scale(), 0.0);
        hud.paused = false;
        hud.speed = -2.0;
        assert_eq!(hud.time_scale(), 0.0);
    }
}
