//=========================================================================
// Viewer
//
// Public entry point of the crate. `ViewerBuilder` collects window
// parameters, `Viewer::run` wires a scene to the platform layer and
// drives the event loop until the window closes.
//
// Requests the scene cannot satisfy alone (opening a picture in its
// own window, editing, help) surface through a pluggable request
// handler instead of being acted on here.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::info;
use winit::event_loop::EventLoop;

//=== Internal Dependencies ===============================================

use crate::platform::{Platform, ShellError, WindowSettings};
use crate::scene::{feedback_channel, Scene, ViewerRequest};

//=== Constants ===========================================================

const DEFAULT_WIDTH: u32 = 1280;
const DEFAULT_HEIGHT: u32 = 720;
const DEFAULT_TITLE: &str = "3D Picture Browser";
const DEFAULT_FPS: u32 = 60;
const DEFAULT_MSAA: u8 = 2;
const DEFAULT_CHANNEL_CAPACITY: usize = 128;

//=== ViewerBuilder =======================================================

/// Step-by-step configuration for a [`Viewer`].
///
/// ```no_run
/// use pavilion::{Viewer, gallery::StripScene};
///
/// let viewer = Viewer::builder()
///     .with_title("Holiday pictures")
///     .with_fps(30)
///     .build();
/// viewer.run(StripScene::new(None)).unwrap();
/// ```
pub struct ViewerBuilder {
    width: u32,
    height: u32,
    title: String,
    fps: u32,
    msaa: u8,
    channel_capacity: usize,
    on_request: Option<Box<dyn FnMut(ViewerRequest)>>,
}

impl ViewerBuilder {
    pub fn new() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            title: String::from(DEFAULT_TITLE),
            fps: DEFAULT_FPS,
            msaa: DEFAULT_MSAA,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            on_request: None,
        }
    }

    /// Fixed inner size of the window in logical pixels.
    ///
    /// # Panics
    /// Panics when either dimension is zero.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        assert!(width > 0, "Window width must be greater than zero");
        assert!(height > 0, "Window height must be greater than zero");
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Redraw rate cap in frames per second.
    ///
    /// # Panics
    /// Panics when `fps` is zero.
    pub fn with_fps(mut self, fps: u32) -> Self {
        assert!(fps > 0, "Frame rate must be greater than zero");
        self.fps = fps;
        self
    }

    /// Requested multisample count; zero disables multisampling.
    pub fn with_msaa(mut self, samples: u8) -> Self {
        self.msaa = samples;
        self
    }

    /// Capacity of the scene feedback channel.
    ///
    /// # Panics
    /// Panics when `capacity` is zero.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be greater than zero");
        self.channel_capacity = capacity;
        self
    }

    /// Handler for requests the window itself does not act on.
    pub fn on_request(mut self, handler: impl FnMut(ViewerRequest) + 'static) -> Self {
        self.on_request = Some(Box::new(handler));
        self
    }

    pub fn build(self) -> Viewer {
        info!(
            target: "viewer",
            "Viewer configured: {}x{} \"{}\", {} fps, MSAA {}",
            self.width,
            self.height,
            self.title,
            self.fps,
            self.msaa
        );
        Viewer {
            settings: WindowSettings {
                width: self.width,
                height: self.height,
                title: self.title,
                fps: self.fps,
                msaa: self.msaa,
            },
            channel_capacity: self.channel_capacity,
            on_request: self
                .on_request
                .unwrap_or_else(|| Box::new(log_request)),
        }
    }
}

impl Default for ViewerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Viewer ==============================================================

/// A configured picture-viewer window, ready to run a scene.
pub struct Viewer {
    settings: WindowSettings,
    channel_capacity: usize,
    on_request: Box<dyn FnMut(ViewerRequest)>,
}

impl Viewer {
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Opens the window and blocks until it closes.
    ///
    /// The scene receives its [`SceneLink`](crate::scene::SceneLink)
    /// before the first event arrives.
    pub fn run(self, scene: impl Scene + 'static) -> Result<(), ShellError> {
        let mut scene: Box<dyn Scene> = Box::new(scene);
        let (link, receiver) = feedback_channel(self.channel_capacity);
        scene.attach(link);

        let event_loop = EventLoop::new().map_err(ShellError::EventLoopCreation)?;
        let mut platform = Platform::new(self.settings, scene, receiver, self.on_request);
        event_loop
            .run_app(&mut platform)
            .map_err(ShellError::EventLoopRun)?;

        if let Some(error) = platform.take_error() {
            return Err(error);
        }
        info!(target: "viewer", "Viewer shut down cleanly");
        Ok(())
    }
}

/// Default request handler; only makes requests visible in the log.
fn log_request(request: ViewerRequest) {
    match request {
        ViewerRequest::OpenPicture(path) => {
            info!(target: "viewer", "Open picture requested: {}", path.display());
        }
        ViewerRequest::EditPicture {
            path,
            width,
            height,
        } => {
            info!(
                target: "viewer",
                "Edit requested: {} ({}x{})",
                path.display(),
                width,
                height
            );
        }
        ViewerRequest::ShowHelp => {
            info!(target: "viewer", "Help requested");
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn builder_defaults_match_the_shipped_window() {
        let viewer = Viewer::builder().build();
        assert_eq!(viewer.settings.width, 1280);
        assert_eq!(viewer.settings.height, 720);
        assert_eq!(viewer.settings.title, "3D Picture Browser");
        assert_eq!(viewer.settings.fps, 60);
        assert_eq!(viewer.settings.msaa, 2);
        assert_eq!(viewer.channel_capacity, 128);
    }

    #[test]
    fn builder_setters_chain() {
        let viewer = Viewer::builder()
            .with_size(800, 600)
            .with_title("Slides")
            .with_fps(30)
            .with_msaa(4)
            .with_channel_capacity(8)
            .build();

        assert_eq!(viewer.settings.width, 800);
        assert_eq!(viewer.settings.height, 600);
        assert_eq!(viewer.settings.title, "Slides");
        assert_eq!(viewer.settings.fps, 30);
        assert_eq!(viewer.settings.msaa, 4);
        assert_eq!(viewer.channel_capacity, 8);
    }

    #[test]
    #[should_panic(expected = "Frame rate must be greater than zero")]
    fn zero_fps_is_rejected() {
        ViewerBuilder::new().with_fps(0);
    }

    #[test]
    #[should_panic(expected = "Window width must be greater than zero")]
    fn zero_width_is_rejected() {
        ViewerBuilder::new().with_size(0, 720);
    }

    #[test]
    #[should_panic(expected = "Channel capacity must be greater than zero")]
    fn zero_channel_capacity_is_rejected() {
        ViewerBuilder::new().with_channel_capacity(0);
    }

    #[test]
    fn custom_request_handler_is_kept() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut viewer = Viewer::builder()
            .on_request(move |request| sink.borrow_mut().push(request))
            .build();

        (viewer.on_request)(ViewerRequest::ShowHelp);
        assert_eq!(*seen.borrow(), vec![ViewerRequest::ShowHelp]);
    }

    #[test]
    fn msaa_zero_is_a_valid_setting() {
        let viewer = Viewer::builder().with_msaa(0).build();
        assert_eq!(viewer.settings.msaa, 0);
    }
}
