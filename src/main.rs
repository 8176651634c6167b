use glutin::config::ConfigTemplateBuilder;
use glutin::context::{ContextApi, ContextAttributesBuilder, Version};
use glutin::display::GetGlDisplay;
use glutin::prelude::*;
use glutin::surface::{SurfaceAttributesBuilder, WindowSurface};
use glutin_winit::DisplayBuilder;
use log::{debug, error, info};
use raw_window_handle::HasWindowHandle;
use std::num::NonZeroU32;
use std::time::Instant;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

mod engine;
use engine::demo::Demo;
use engine::utils::frame_timer::FrameTimer;

/// Idle until `resumed` gives us a window; Running once the GL context and
/// the demo exist. One redraw request per presented frame keeps the loop
/// paced by the swapchain.
struct App {
    window: Option<Window>,
    gl_context: Option<glutin::context::PossiblyCurrentContext>,
    gl_surface: Option<glutin::surface::Surface<WindowSurface>>,
    gl: Option<glow::Context>,
    demo: Option<Demo<glow::Context>>,
    timer: Option<FrameTimer>,
}

impl App {
    fn new() -> Self {
        Self {
            window: None,
            gl_context: None,
            gl_surface: None,
            gl: None,
            demo: None,
            timer: None,
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = event_loop
            .create_window(Window::default_attributes().with_title("shader playground"))
            .expect("failed to create window");

        let display_builder = DisplayBuilder::new();
        let (_, gl_config) = display_builder
            .build(event_loop, ConfigTemplateBuilder::new(), |mut c| {
                c.next().expect("no matching GL config")
            })
            .expect("failed to build GL display");

        let display = gl_config.display();
        let ctx_attrs = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
            .build(Some(window.window_handle().unwrap().as_raw()));

        let not_current = unsafe {
            display
                .create_context(&gl_config, &ctx_attrs)
                .expect("failed to create GL context")
        };

        let size = window.inner_size();
        let (width, height) = (size.width.max(1), size.height.max(1));
        let attrs = SurfaceAttributesBuilder::<WindowSurface>::new().build(
            window.window_handle().unwrap().as_raw(),
            NonZeroU32::new(width).unwrap(),
            NonZeroU32::new(height).unwrap(),
        );
        let surface = unsafe {
            display
                .create_window_surface(&gl_config, &attrs)
                .expect("failed to create GL surface")
        };
        let ctx = not_current
            .make_current(&surface)
            .expect("failed to make GL context current");

        let gl = unsafe {
            glow::Context::from_loader_function(|s| {
                display.get_proc_address(&std::ffi::CString::new(s).unwrap()) as *const _
            })
        };
        info!("GL context created at {width}x{height}");

        let demo = match Demo::new(&gl, width, height) {
            Ok(demo) => demo,
            Err(e) => {
                error!("failed to initialize renderer: {e}");
                event_loop.exit();
                return;
            }
        };

        window.request_redraw();

        self.window = Some(window);
        self.gl_context = Some(ctx);
        self.gl_surface = Some(surface);
        self.gl = Some(gl);
        self.demo = Some(demo);
        self.timer = Some(FrameTimer::new(Instant::now()));
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                // release GPU resources while the context is still current
                if let (Some(demo), Some(gl)) = (self.demo.take(), &self.gl) {
                    demo.destroy(gl);
                }
                event_loop.exit();
            }

            WindowEvent::RedrawRequested => {
                if let (Some(surface), Some(ctx), Some(gl), Some(demo)) = (
                    &self.gl_surface,
                    &self.gl_context,
                    &self.gl,
                    &mut self.demo,
                ) {
                    if let Some(timer) = &mut self.timer {
                        if let (_, Some(average)) = timer.tick(Instant::now()) {
                            debug!("frame time {:.2} ms avg", average.as_secs_f64() * 1000.0);
                        }
                    }
                    demo.tick(gl);
                    surface.swap_buffers(ctx).expect("buffer swap failed");
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            WindowEvent::Resized(size) => {
                let (width, height) = (size.width.max(1), size.height.max(1));
                if let (Some(surface), Some(ctx)) = (&self.gl_surface, &self.gl_context) {
                    surface.resize(
                        ctx,
                        NonZeroU32::new(width).unwrap(),
                        NonZeroU32::new(height).unwrap(),
                    );
                }
                if let Some(demo) = &mut self.demo {
                    demo.resize(width, height);
                }
            }

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                if code == KeyCode::Escape {
                    if let (Some(demo), Some(gl)) = (self.demo.take(), &self.gl) {
                        demo.destroy(gl);
                    }
                    event_loop.exit();
                } else if let (Some(demo), Some(gl)) = (&mut self.demo, &self.gl) {
                    handle_key(demo, gl, code);
                }
            }

            _ => {}
        }
    }
}

fn handle_key(demo: &mut Demo<glow::Context>, gl: &glow::Context, code: KeyCode) {
    match code {
        KeyCode::KeyR => demo.reset(gl),
        KeyCode::KeyG => demo.controls_mut().cycle_geometry(),
        KeyCode::KeyF => demo.controls_mut().cycle_shader(),
        KeyCode::KeyC => demo.controls_mut().cycle_color(),
        KeyCode::Equal => demo.controls_mut().step_radius(0.2),
        KeyCode::Minus => demo.controls_mut().step_radius(-0.2),
        KeyCode::BracketRight => demo.controls_mut().step_tessellations(1),
        KeyCode::BracketLeft => demo.controls_mut().step_tessellations(-1),
        KeyCode::ArrowLeft => demo.camera_mut().rotate(-0.1, 0.0),
        KeyCode::ArrowRight => demo.camera_mut().rotate(0.1, 0.0),
        KeyCode::ArrowUp => demo.camera_mut().rotate(0.0, 0.1),
        KeyCode::ArrowDown => demo.camera_mut().rotate(0.0, -0.1),
        KeyCode::KeyZ => demo.camera_mut().zoom(-0.5),
        KeyCode::KeyX => demo.camera_mut().zoom(0.5),
        _ => {}
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let event_loop = EventLoop::new()?;
    let mut app = App::new();
    event_loop.run_app(&mut app)?;
    Ok(())
}
