use prism_config::WindowConfig;
use prism_dependencies::{
    glutin::{
        self, Api, ContextBuilder, ContextError, ContextWrapper, CreationError, GlProfile,
        GlRequest, PossiblyCurrent,
    },
    image::{self, io::Reader},
    log,
    winit::{
        dpi::PhysicalSize,
        event_loop::EventLoop,
        window::{CursorGrabMode, Fullscreen, Icon, WindowBuilder},
    },
};
use std::{io, path::Path};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WindowError {
    #[error("Failed to create icon file!")]
    CreateIcon(#[source] glutin::window::BadIcon),

    #[error("Failed to create a window with an OpenGL context!")]
    CreateContext(#[source] CreationError),

    #[error("Failed to decode icon file at path: {1}")]
    DecodeIconFile(#[source] image::ImageError, String),

    #[error("Failed to make the OpenGL context current!")]
    MakeContextCurrent(#[source] ContextError),

    #[error("Failed to open icon file at path: {1}")]
    OpenIconFile(#[source] io::Error, String),
}

type Result<T, E = WindowError> = std::result::Result<T, E>;

pub type WindowContext = ContextWrapper<PossiblyCurrent, glutin::window::Window>;

/// OpenGL 3.3 core, the oldest version every tutorial shader targets.
pub const GL_VERSION: (u8, u8) = (3, 3);

pub struct Window {
    pub event_loop: EventLoop<()>,
    pub context: WindowContext,
}

impl Window {
    pub fn new(config: &WindowConfig) -> Result<Self> {
        let event_loop = EventLoop::new();
        let mut window_builder = WindowBuilder::new()
            .with_title(config.title.to_string())
            .with_inner_size(PhysicalSize::new(config.width, config.height));

        if let Some(icon_path) = config.icon.as_ref() {
            window_builder = window_builder.with_window_icon(Some(load_icon(icon_path)?));
        }

        let context = ContextBuilder::new()
            .with_gl(GlRequest::Specific(Api::OpenGl, GL_VERSION))
            .with_gl_profile(GlProfile::Core)
            .with_vsync(config.vsync)
            .with_depth_buffer(24)
            .build_windowed(window_builder, &event_loop)
            .map_err(WindowError::CreateContext)?;

        let context = unsafe { context.make_current() }
            .map_err(|(_, error)| WindowError::MakeContextCurrent(error))?;

        if config.is_fullscreen {
            let window = context.window();
            window.set_fullscreen(Some(Fullscreen::Borderless(window.current_monitor())));
        }

        log::info!(
            "Created window '{}' with a {:?} context",
            config.title,
            context.get_api()
        );

        Ok(Self {
            event_loop,
            context,
        })
    }
}

/// Hides the cursor and keeps it inside the window. Platforms that cannot
/// confine the cursor get it locked in place instead.
pub fn capture_cursor(window: &glutin::window::Window, capture: bool) {
    window.set_cursor_visible(!capture);

    let result = if capture {
        window
            .set_cursor_grab(CursorGrabMode::Confined)
            .or_else(|_| window.set_cursor_grab(CursorGrabMode::Locked))
    } else {
        window.set_cursor_grab(CursorGrabMode::None)
    };

    if let Err(error) = result {
        log::warn!("Failed to change the cursor grab mode: {}", error);
    }
}

fn load_icon(icon_path: &Path) -> Result<Icon> {
    let path = icon_path.display().to_string();
    let image = Reader::open(icon_path)
        .map_err(|error| WindowError::OpenIconFile(error, path.clone()))?
        .decode()
        .map_err(|error| WindowError::DecodeIconFile(error, path))?
        .into_rgba8();
    let (width, height) = image.dimensions();
    Icon::from_rgba(image.into_raw(), width, height).map_err(WindowError::CreateIcon)
}
