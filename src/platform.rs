use crate::app::App;
use wgpu::{Instance, Surface};
use winit::{
    dpi::PhysicalSize,
    event::{ElementState, Event, MouseButton, WindowEvent},
    event_loop::EventLoopWindowTarget,
    window::Window,
};

/// Abstracts where the swapchain surface comes from, so renderer setup
/// stays identical across targets.
pub trait SurfaceProvider {
    fn create_surface(
        &self,
        instance: &Instance,
    ) -> Result<(Surface<'static>, PhysicalSize<u32>), Box<dyn std::error::Error>>;
}

impl SurfaceProvider for Window {
    fn create_surface(
        &self,
        instance: &Instance,
    ) -> Result<(Surface<'static>, PhysicalSize<u32>), Box<dyn std::error::Error>> {
        let surface = instance.create_surface(self)?;
        let size = self.inner_size();
        // The window outlives the event loop, which never returns;
        // extend the surface lifetime to match.
        let static_surface = unsafe { std::mem::transmute(surface) };
        Ok((static_surface, size))
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn start() {
    use crate::config::SceneConfig;
    use pollster::block_on;
    use winit::{dpi::LogicalSize, event_loop::EventLoop, window::WindowBuilder};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = SceneConfig::load_or_default(std::path::Path::new("atom-scene.json"));

    let event_loop = EventLoop::new().unwrap();
    let window = WindowBuilder::new()
        .with_title("Atom")
        .with_inner_size(LogicalSize::new(900.0, 900.0))
        .build(&event_loop)
        .unwrap();

    let mut app = block_on(App::initialize(&window, config)).expect("failed to initialize");

    let _ = event_loop.run(move |event, target| {
        dispatch(&mut app, &window, event, target);
    });
}

#[cfg(target_arch = "wasm32")]
pub fn start() {
    use crate::config::SceneConfig;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::spawn_local;
    use winit::{
        event_loop::EventLoop,
        platform::web::{EventLoopExtWebSys, WindowBuilderExtWebSys},
        window::WindowBuilder,
    };

    console_log::init_with_level(log::Level::Info).expect("Couldn't initialize logger");
    console_error_panic_hook::set_once();

    let document = web_sys::window()
        .and_then(|window| window.document())
        .expect("no document");
    let canvas = document
        .get_element_by_id("canvas")
        .expect("no #canvas element")
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .expect("#canvas is not a canvas");
    canvas.set_width(720);
    canvas.set_height(720);

    let event_loop = EventLoop::new().unwrap();
    let window = WindowBuilder::new()
        .with_canvas(Some(canvas))
        .build(&event_loop)
        .unwrap();

    spawn_local(async move {
        match App::initialize(&window, SceneConfig::default()).await {
            Ok(mut app) => {
                log::info!("scene initialized");
                event_loop.spawn(move |event, target| {
                    dispatch(&mut app, &window, event, target);
                });
            }
            Err(e) => {
                log::error!("failed to initialize scene: {e:?}");
            }
        }
    });
}

/// One event handler for both targets.
fn dispatch(app: &mut App, window: &Window, event: Event<()>, target: &EventLoopWindowTarget<()>) {
    match event {
        Event::WindowEvent { event, .. } => {
            if app.handle_event(window, &event) {
                return;
            }
            match event {
                WindowEvent::CloseRequested => target.exit(),
                WindowEvent::Resized(new_size) => app.resize(new_size),
                WindowEvent::CursorMoved { position, .. } => app.pointer_moved(position),
                WindowEvent::CursorLeft { .. } => app.pointer_left(),
                WindowEvent::MouseInput {
                    state: ElementState::Pressed,
                    button: MouseButton::Left,
                    ..
                } => app.pointer_clicked(),
                WindowEvent::RedrawRequested => match app.render(window) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => app.resize(app.size()),
                    Err(wgpu::SurfaceError::OutOfMemory) => target.exit(),
                    Err(e) => log::warn!("render error: {e:?}"),
                },
                _ => {}
            }
        }
        // Continuous animation: ask for the next frame as soon as the
        // loop goes idle.
        Event::AboutToWait => window.request_redraw(),
        _ => {}
    }
}
