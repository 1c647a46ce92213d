//=========================================================================
// Platform Layer
//
// Window shell around the scene: owns the winit window, the GL context,
// the redraw timer and the overlay, and translates raw window events
// into scene calls.
//
//    +------------+   events   +----------+   calls    +-------+
//    | winit loop |----------->| Platform |----------->| Scene |
//    +------------+            |          |<-----------+-------+
//                              +----+-----+   feedback
//                                   |
//                                   v
//                        GL context + overlay labels
//
// The window is created lazily on `resumed`, as required on platforms
// that hand out the graphics handle late. Redraws are paced by a fixed
// interval deadline instead of vsync.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::path::PathBuf;
use std::time::Instant;

use crossbeam_channel::Receiver;
use log::{debug, error, info, trace};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, StartCause, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::window::{Window, WindowId};

//=== Internal Dependencies ===============================================

use crate::input::{Key, PointerButton};
use crate::overlay::painter::OverlayPainter;
use crate::overlay::Overlay;
use crate::scene::{Scene, SceneFeedback, ViewerRequest};

use context::RenderContext;
use frame_clock::FrameClock;
use pointer::{ClickTracker, PointerTracker};

//=== Submodules ==========================================================

mod context;
mod event_mapper;
mod frame_clock;
mod pointer;

//=== ShellError ==========================================================

/// Fatal failures of the window shell.
#[derive(Debug)]
pub enum ShellError {
    /// The OS refused to hand out an event loop.
    EventLoopCreation(winit::error::EventLoopError),
    /// The event loop aborted while running.
    EventLoopRun(winit::error::EventLoopError),
    /// Window plus GL display negotiation failed.
    DisplayBootstrap(String),
    /// The display builder finished without producing a window.
    WindowUnavailable,
    /// The window would not expose a native handle.
    WindowHandle(raw_window_handle::HandleError),
    /// No GL context could be created, not even GLES.
    ContextCreation(glutin::error::Error),
    /// The window surface could not be created.
    SurfaceCreation(glutin::error::Error),
    /// The fresh context could not be made current.
    MakeCurrent(glutin::error::Error),
    /// Presenting a finished frame failed.
    SwapBuffers(glutin::error::Error),
    /// The overlay text pipeline failed to build.
    OverlayInit(String),
}

impl std::fmt::Display for ShellError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShellError::EventLoopCreation(error) => {
                write!(f, "failed to create the event loop: {}", error)
            }
            ShellError::EventLoopRun(error) => {
                write!(f, "the event loop aborted: {}", error)
            }
            ShellError::DisplayBootstrap(message) => {
                write!(f, "failed to set up window and GL display: {}", message)
            }
            ShellError::WindowUnavailable => {
                write!(f, "display setup finished without a window")
            }
            ShellError::WindowHandle(error) => {
                write!(f, "no native window handle available: {}", error)
            }
            ShellError::ContextCreation(error) => {
                write!(f, "failed to create a GL context: {}", error)
            }
            ShellError::SurfaceCreation(error) => {
                write!(f, "failed to create the window surface: {}", error)
            }
            ShellError::MakeCurrent(error) => {
                write!(f, "failed to make the GL context current: {}", error)
            }
            ShellError::SwapBuffers(error) => {
                write!(f, "failed to present a frame: {}", error)
            }
            ShellError::OverlayInit(message) => {
                write!(f, "failed to build the overlay pipeline: {}", message)
            }
        }
    }
}

impl std::error::Error for ShellError {}

//=== WindowSettings ======================================================

/// Static window parameters collected by the viewer builder.
#[derive(Debug, Clone)]
pub(crate) struct WindowSettings {
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub fps: u32,
    pub msaa: u8,
}

//=== Platform ============================================================

/// The application handler driving one fixed-size scene window.
pub(crate) struct Platform {
    settings: WindowSettings,

    window: Option<Window>,
    render: Option<RenderContext>,
    painter: Option<OverlayPainter>,

    overlay: Overlay,
    clock: FrameClock,
    pointer: PointerTracker,
    clicks: ClickTracker,
    suppress_left_release: bool,

    scene: Box<dyn Scene>,
    feedback: Receiver<SceneFeedback>,
    on_request: Box<dyn FnMut(ViewerRequest)>,

    exit_error: Option<ShellError>,
}

impl Platform {
    //--- Construction -----------------------------------------------------

    pub fn new(
        settings: WindowSettings,
        scene: Box<dyn Scene>,
        feedback: Receiver<SceneFeedback>,
        on_request: Box<dyn FnMut(ViewerRequest)>,
    ) -> Self {
        let clock = FrameClock::new(settings.fps);
        debug!(target: "platform", "Frame interval: {:?}", clock.interval());
        Self {
            clock,
            settings,
            window: None,
            render: None,
            painter: None,
            overlay: Overlay::new(),
            pointer: PointerTracker::new(),
            clicks: ClickTracker::new(),
            suppress_left_release: false,
            scene,
            feedback,
            on_request,
            exit_error: None,
        }
    }

    /// Takes the error that shut the loop down, if any.
    pub fn take_error(&mut self) -> Option<ShellError> {
        self.exit_error.take()
    }

    //--- Event Handling ---------------------------------------------------

    /// Applies one key press. Returns true when the app should exit.
    fn handle_key(&mut self, key: Key) -> bool {
        match key {
            Key::Escape => {
                info!(target: "platform", "Escape pressed, closing");
                true
            }
            Key::ArrowLeft => {
                self.scene.show_previous();
                false
            }
            Key::ArrowRight => {
                self.scene.show_next();
                false
            }
            Key::Unidentified => false,
        }
    }

    /// Applies one pointer press at the last known cursor position.
    ///
    /// A second left press inside the double-click window is consumed:
    /// it asks the scene which picture sits under the cursor and emits
    /// an open request instead of a press, and the matching release is
    /// dropped when it arrives.
    fn handle_pointer_press(&mut self, now: Instant, button: PointerButton) {
        let (x, y) = self.pointer.position();

        if button == PointerButton::Left {
            if self.clicks.register_press(now, x, y) {
                debug!(target: "platform", "Double click at ({:.0}, {:.0})", x, y);
                self.suppress_left_release = true;
                if let Some(path) = self.scene.picture_at(x, y) {
                    (self.on_request)(ViewerRequest::OpenPicture(path));
                }
                return;
            }
            self.suppress_left_release = false;
        }

        self.pointer.press(x, y);
        self.scene.pointer_pressed(x, y, button);
    }

    /// Applies one pointer release. Only the release tailing a consumed
    /// double click is dropped; every other release reaches the scene.
    fn handle_pointer_release(&mut self, button: PointerButton) {
        if button == PointerButton::Left && self.suppress_left_release {
            self.suppress_left_release = false;
            return;
        }
        self.pointer.release();
        let (x, y) = self.pointer.position();
        self.scene.pointer_released(x, y, button);
    }

    /// Forwards a dropped path when it names a directory.
    fn handle_drop(&mut self, path: PathBuf) {
        if path.is_dir() {
            info!(target: "platform", "Directory dropped: {}", path.display());
            self.scene.load_directory(&path);
        } else {
            debug!(
                target: "platform",
                "Ignoring non-directory drop: {}",
                path.display()
            );
        }
    }

    //--- Frame Sequence ---------------------------------------------------

    /// Runs the per-frame scene work: time step, pointer state, drag
    /// delta, and any feedback the scene produced along the way.
    fn advance_scene(&mut self) {
        let delta = self.clock.tick();
        let drag_dx = self.pointer.frame_delta_x();
        let (x, y) = self.pointer.position();

        self.scene.pointer_moved(x, y);
        self.scene.advance(delta, drag_dx);
        self.drain_feedback();
    }

    /// Applies queued scene feedback to the overlay and request sink.
    fn drain_feedback(&mut self) {
        while let Ok(feedback) = self.feedback.try_recv() {
            trace!(target: "platform", "Scene feedback: {:?}", feedback);
            match feedback {
                SceneFeedback::Caption(name) => self.overlay.set_caption(&name),
                SceneFeedback::Resolution(width, height) => {
                    self.overlay.set_resolution(width, height)
                }
                SceneFeedback::OverlayOpacity(opacity) => self.overlay.set_opacity(opacity),
                SceneFeedback::Request(request) => (self.on_request)(request),
            }
        }
    }

    /// Advances the scene and draws one frame.
    fn render_frame(&mut self, event_loop: &ActiveEventLoop) {
        self.advance_scene();

        let Some(window) = &self.window else {
            return;
        };
        let Some(render) = &self.render else {
            return;
        };
        let size = window.inner_size();

        render.begin_frame();
        self.scene.render(render.gl(), size.width, size.height);
        if let Some(painter) = &mut self.painter {
            painter.paint(render.gl(), &mut self.overlay, size.width, size.height);
        }

        if let Err(error) = render.swap() {
            self.fail(event_loop, error);
        }
    }

    /// Records a fatal error and stops the loop.
    fn fail(&mut self, event_loop: &ActiveEventLoop, error: ShellError) {
        error!(target: "platform", "Fatal: {}", error);
        self.exit_error = Some(error);
        event_loop.exit();
    }
}

//=== ApplicationHandler ==================================================

impl ApplicationHandler for Platform {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attributes = Window::default_attributes()
            .with_title(self.settings.title.as_str())
            .with_inner_size(LogicalSize::new(
                self.settings.width as f64,
                self.settings.height as f64,
            ))
            .with_resizable(false);

        let (window, render) = match RenderContext::bootstrap(
            event_loop,
            attributes,
            self.settings.msaa,
        ) {
            Ok(pair) => pair,
            Err(error) => {
                self.fail(event_loop, error);
                return;
            }
        };

        let painter = match OverlayPainter::new(render.gl()) {
            Ok(painter) => painter,
            Err(message) => {
                self.fail(event_loop, ShellError::OverlayInit(message));
                return;
            }
        };

        info!(
            target: "platform",
            "Window open: {}x{}, {} samples, {} fps cap",
            self.settings.width,
            self.settings.height,
            render.samples(),
            self.settings.fps
        );

        window.request_redraw();
        self.window = Some(window);
        self.render = Some(render);
        self.painter = Some(painter);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Close requested");
                event_loop.exit();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                // Auto-repeat is deliberately let through so held arrow
                // keys keep navigating.
                if event.state == ElementState::Pressed
                    && self.handle_key(Key::from(event.physical_key))
                {
                    event_loop.exit();
                }
            }
            WindowEvent::MouseInput { state, button, .. } => match state {
                ElementState::Pressed => {
                    self.handle_pointer_press(Instant::now(), PointerButton::from(button))
                }
                ElementState::Released => {
                    self.handle_pointer_release(PointerButton::from(button))
                }
            },
            WindowEvent::CursorMoved { position, .. } => {
                self.pointer.set_position(position.x as f32, position.y as f32);
            }
            WindowEvent::DroppedFile(path) => self.handle_drop(path),
            WindowEvent::HoveredFile(path) => {
                debug!(target: "platform", "Hovering: {}", path.display());
            }
            WindowEvent::HoveredFileCancelled => {
                debug!(target: "platform", "Hover cancelled");
            }
            WindowEvent::Occluded(occluded) => {
                self.overlay.set_visible(!occluded);
            }
            WindowEvent::Focused(true) => {
                self.overlay.set_visible(true);
            }
            WindowEvent::Resized(size) => {
                if let Some(render) = &self.render {
                    render.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => self.render_frame(event_loop),
            _ => {}
        }
    }

    fn new_events(&mut self, _event_loop: &ActiveEventLoop, cause: StartCause) {
        if let StartCause::ResumeTimeReached { .. } = cause {
            self.clock.advance_deadline();
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            event_loop.set_control_flow(ControlFlow::WaitUntil(self.clock.deadline()));
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        info!(target: "platform", "Event loop exiting");
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
