use anyhow::{anyhow, bail, Context, Result};
use glam::Vec4;
use glutin::{
    config::ConfigTemplateBuilder,
    context::{ContextApi, ContextAttributesBuilder, GlProfile, PossiblyCurrentContext, Version},
    display::{GetGlDisplay, GlDisplay},
    prelude::*,
    surface::{Surface, SwapInterval, WindowSurface},
};
use glutin_winit::{DisplayBuilder, GlWindow};
use log::{error, info, warn, LevelFilter};
use raw_window_handle::HasRawWindowHandle;
use simple_logger::SimpleLogger;
use std::{
    ffi::{CStr, CString},
    num::NonZeroU32,
    time::Instant,
};
use winit::{
    dpi::PhysicalSize,
    event::{Event, KeyEvent, WindowEvent},
    event_loop::{ControlFlow, EventLoop, EventLoopBuilder},
    keyboard::PhysicalKey,
    window::{Window, WindowBuilder},
};

use glsteps::{
    config::{AppConfig, EventPolicy, CONFIG_FILE},
    input,
    render::mesh,
    CameraState, GlDriver, Lighting, Mesh, Projection, RenderPipeline, ShaderProgramBuilder,
};

struct App {
    // Declared first so GL objects are released while the context is still alive.
    pipeline: Option<RenderPipeline>,
    camera: CameraState,
    projection: Projection,
    event_policy: EventPolicy,
    started: Instant,
    gl_surface: Surface<WindowSurface>,
    gl_context: PossiblyCurrentContext,
    window: Window,
}

impl App {
    fn new(config: &AppConfig) -> Result<(Self, EventLoop<()>)> {
        let event_loop = EventLoopBuilder::new().build()?;
        let window_builder = WindowBuilder::new()
            .with_title(config.window.title.as_str())
            .with_inner_size(PhysicalSize::new(config.window.width, config.window.height));

        let template = ConfigTemplateBuilder::new().with_depth_size(24);
        let display_builder = DisplayBuilder::new().with_window_builder(Some(window_builder));

        let (window, gl_config) = display_builder
            .build(&event_loop, template, |configs| {
                // glutin only calls the picker with at least one matching config.
                configs
                    .max_by_key(|config| config.num_samples())
                    .expect("display offered no GL configs")
            })
            .map_err(|e| anyhow!("Failed to create window: {}", e))?;

        let window = window.context("Display builder returned no window")?;
        let raw_window_handle = window.raw_window_handle();

        let context_attributes = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
            .with_profile(GlProfile::Core)
            .build(Some(raw_window_handle));

        let gl_display = gl_config.display();

        let gl_context = unsafe {
            gl_display
                .create_context(&gl_config, &context_attributes)
                .context("Failed to create OpenGL context")?
        };

        let attrs = window.build_surface_attributes(<_>::default());
        let gl_surface = unsafe {
            gl_display
                .create_window_surface(&gl_config, &attrs)
                .context("Failed to create GL surface")?
        };

        let gl_context = gl_context
            .make_current(&gl_surface)
            .context("Failed to make context current")?;

        if config.window.vsync {
            let interval = SwapInterval::Wait(NonZeroU32::MIN);
            if let Err(e) = gl_surface.set_swap_interval(&gl_context, interval) {
                warn!("Could not enable vsync: {}", e);
            }
        }

        // Load OpenGL functions
        gl::load_with(|symbol| match CString::new(symbol) {
            Ok(symbol) => gl_display.get_proc_address(symbol.as_c_str()) as *const _,
            Err(_) => std::ptr::null(),
        });
        if !gl::CreateShader::is_loaded() {
            bail!("OpenGL functions failed to load");
        }
        log_gl_version();

        let pipeline = build_pipeline(config)?;
        let size = window.inner_size();
        pipeline.set_viewport(size.width, size.height);

        Ok((
            Self {
                pipeline: Some(pipeline),
                camera: CameraState::from_config(&config.camera),
                projection: Projection::from_config(&config.camera, size.width, size.height),
                event_policy: config.window.event_policy,
                started: Instant::now(),
                gl_surface,
                gl_context,
                window,
            },
            event_loop,
        ))
    }

    fn resize(&mut self, width: u32, height: u32) {
        let (Some(w), Some(h)) = (NonZeroU32::new(width), NonZeroU32::new(height)) else {
            return;
        };
        self.gl_surface.resize(&self.gl_context, w, h);
        self.projection.resize(width, height);
        if let Some(pipeline) = &self.pipeline {
            pipeline.set_viewport(width, height);
        }
        self.window.request_redraw();
    }

    fn handle_window_event(&mut self, event: WindowEvent) -> bool {
        match event {
            WindowEvent::CloseRequested => return true,
            WindowEvent::Resized(size) => self.resize(size.width, size.height),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state,
                        ..
                    },
                ..
            } => {
                if input::handle_key(&mut self.camera, key, state) {
                    self.window.request_redraw();
                }
            }
            WindowEvent::RedrawRequested => self.redraw(),
            _ => {}
        }
        false
    }

    fn redraw(&mut self) {
        let Some(pipeline) = &mut self.pipeline else {
            return;
        };
        let elapsed = self.started.elapsed().as_secs_f32();
        pipeline.draw_frame(&self.camera, &self.projection, elapsed);

        if let Err(e) = self.gl_surface.swap_buffers(&self.gl_context) {
            error!("Failed to swap buffers: {}", e);
        }
    }

    fn shutdown(&mut self) {
        if self.pipeline.take().is_some() {
            info!("Render pipeline released");
        }
    }
}

fn build_pipeline(config: &AppConfig) -> Result<RenderPipeline> {
    let builder = ShaderProgramBuilder::new(GlDriver);
    let program = builder
        .from_files(&config.shaders.vertex_path, &config.shaders.fragment_path)
        .context("Failed to build shader program")?;

    let mesh = Mesh::upload(&mesh::cube()).context("Failed to upload mesh")?;
    let lighting = Lighting::from_config(&config.lighting);

    Ok(RenderPipeline::new(
        program,
        mesh,
        lighting,
        Vec4::from_array(config.clear_color),
    ))
}

fn log_gl_version() {
    let version = unsafe { gl::GetString(gl::VERSION) };
    if version.is_null() {
        warn!("GL_VERSION unavailable");
        return;
    }
    let version = unsafe { CStr::from_ptr(version as *const _) };
    info!("OpenGL {}", version.to_string_lossy());
}

fn run() -> Result<()> {
    let config = AppConfig::load_or_default(CONFIG_FILE);
    let level = config
        .as_ref()
        .map_or(LevelFilter::Info, AppConfig::level_filter_or_info);
    SimpleLogger::new().with_level(level).init()?;

    let config = config.with_context(|| format!("Failed to load {}", CONFIG_FILE))?;
    if let Err(e) = config.level_filter() {
        warn!("{}, logging at info", e);
    }
    info!("Initializing application...");

    let (mut app, event_loop) = App::new(&config)?;

    event_loop.set_control_flow(match app.event_policy {
        EventPolicy::Poll => ControlFlow::Poll,
        EventPolicy::Wait => ControlFlow::Wait,
    });

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => {
            if app.handle_window_event(event) {
                elwt.exit();
            }
        }
        Event::AboutToWait => {
            if app.event_policy == EventPolicy::Poll {
                app.window.request_redraw();
            }
        }
        Event::LoopExiting => app.shutdown(),
        _ => (),
    })?;

    Ok(())
}

fn main() {
    if let Err(e) = run() {
        if log::max_level() == LevelFilter::Off {
            // Failed before the logger came up.
            eprintln!("Error: {:#}", e);
        } else {
            error!("{:#}", e);
        }
        std::process::exit(-1);
    }
}
