//=========================================================================
// Scene Seam
//=========================================================================
//
// The boundary between the viewer shell and the picture-browsing logic.
//
// Architecture:
// ```text
//   Shell ──calls──────────────────> Scene (trait hooks)
//     ▲                                │
//     │                                │ emits
//     └── drains once per frame ◄── SceneLink ── bounded channel
// ```
//
// The shell owns the window, GL context and overlay labels; the scene
// owns everything about pictures (layout, animation, navigation). Input
// flows forward through trait calls; presentation state (caption,
// resolution, overlay opacity) and dialog requests flow back through a
// bounded feedback channel the shell drains at each frame boundary.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::path::{Path, PathBuf};

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use log::{debug, warn};

use crate::input::PointerButton;

//=== ViewerRequest =======================================================

/// A request to open one of the viewer's collaborator surfaces.
///
/// The shell does not own those surfaces; it hands requests to the
/// embedder's handler (see `ViewerBuilder::on_request`) and keeps
/// running. The default handler logs them.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewerRequest {
    /// Show a single picture full-screen.
    ///
    /// Emitted when the user double-clicks a picture, or directly by the
    /// scene.
    OpenPicture(PathBuf),

    /// Open the editing surface for a picture.
    EditPicture {
        path: PathBuf,
        width: u32,
        height: u32,
    },

    /// Show the about/help surface.
    ShowHelp,
}

//=== SceneFeedback =======================================================

/// A message emitted by the scene for the shell to apply.
///
/// The first three variants drive the overlay labels; `Request` is
/// forwarded to the embedder. The shell drains all pending feedback once
/// per frame, after advancing the scene and before painting.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneFeedback {
    /// File name of the picture currently in focus.
    Caption(String),

    /// Pixel dimensions of the picture currently in focus.
    Resolution(u32, u32),

    /// Opacity of both overlay labels, clamped to `[0, 1]` on apply.
    OverlayOpacity(f32),

    /// Collaborator-surface request, forwarded to the embedder.
    Request(ViewerRequest),
}

//=== SceneLink ===========================================================

/// The scene's handle for sending feedback to the shell.
///
/// Cloneable and cheap; a scene that later grows worker threads can hand
/// clones to them. Sending never blocks: when the shell is not draining
/// fast enough the message is dropped with a warning, and when the shell
/// is gone entirely the send is a quiet no-op.
#[derive(Clone)]
pub struct SceneLink {
    sender: Sender<SceneFeedback>,
}

impl SceneLink {
    //--- Overlay Feedback -------------------------------------------------

    /// Updates the file-name label.
    pub fn set_caption(&self, name: impl Into<String>) {
        self.send(SceneFeedback::Caption(name.into()));
    }

    /// Updates the resolution label.
    pub fn set_resolution(&self, width: u32, height: u32) {
        self.send(SceneFeedback::Resolution(width, height));
    }

    /// Sets the opacity of both overlay labels.
    pub fn set_overlay_opacity(&self, opacity: f32) {
        self.send(SceneFeedback::OverlayOpacity(opacity));
    }

    //--- Collaborator Requests --------------------------------------------

    /// Asks the embedder to show a picture full-screen.
    pub fn open_picture(&self, path: impl Into<PathBuf>) {
        self.send(SceneFeedback::Request(ViewerRequest::OpenPicture(
            path.into(),
        )));
    }

    /// Asks the embedder to open the picture-editing surface.
    pub fn edit_picture(&self, path: impl Into<PathBuf>, width: u32, height: u32) {
        self.send(SceneFeedback::Request(ViewerRequest::EditPicture {
            path: path.into(),
            width,
            height,
        }));
    }

    /// Asks the embedder to show the help surface.
    pub fn show_help(&self) {
        self.send(SceneFeedback::Request(ViewerRequest::ShowHelp));
    }

    //--- Internal ---------------------------------------------------------

    fn send(&self, feedback: SceneFeedback) {
        match self.sender.try_send(feedback) {
            Ok(()) => {}
            Err(TrySendError::Full(dropped)) => {
                warn!(
                    target: "scene",
                    "Feedback channel full, dropping {:?}",
                    dropped
                );
            }
            Err(TrySendError::Disconnected(_)) => {
                debug!(target: "scene", "Shell gone, feedback ignored");
            }
        }
    }
}

/// Creates the feedback channel pairing a [`SceneLink`] with the shell's
/// receiving end.
pub(crate) fn feedback_channel(capacity: usize) -> (SceneLink, Receiver<SceneFeedback>) {
    let (sender, receiver) = bounded(capacity);
    (SceneLink { sender }, receiver)
}

//=== Scene Trait =========================================================

/// Picture-browsing logic plugged into the viewer shell.
///
/// The shell calls these hooks from its event dispatch and frame loop;
/// the scene answers through its [`SceneLink`]. Where the hook order
/// matters it is:
///
/// 1. input hooks, as events arrive;
/// 2. once per frame: `pointer_moved` with the last known cursor
///    position, then `advance` with the frame delta and the horizontal
///    drag distance accumulated since the previous frame;
/// 3. `render` with the current GL context and viewport.
///
/// # Minimal Implementation
///
/// Only `load_directory`, `show_previous`, `show_next`, `advance` and
/// `render` are required; the pointer hooks and `picture_at` default to
/// doing nothing.
pub trait Scene {
    /// Receives the feedback link before the window opens.
    ///
    /// Default implementation drops the link; scenes that emit feedback
    /// store it.
    fn attach(&mut self, link: SceneLink) {
        let _ = link;
    }

    /// Loads the pictures found in `dir`, replacing the current set.
    ///
    /// Called when the user drops a directory onto the window.
    fn load_directory(&mut self, dir: &Path);

    /// Navigates to the previous picture (Left arrow).
    fn show_previous(&mut self);

    /// Navigates to the next picture (Right arrow).
    fn show_next(&mut self);

    /// A button went down at the given window position.
    fn pointer_pressed(&mut self, x: f32, y: f32, button: PointerButton) {
        let _ = (x, y, button);
    }

    /// A button came up at the given window position.
    fn pointer_released(&mut self, x: f32, y: f32, button: PointerButton) {
        let _ = (x, y, button);
    }

    /// The last known cursor position, reported once per frame.
    fn pointer_moved(&mut self, x: f32, y: f32) {
        let _ = (x, y);
    }

    /// The picture shown at the given window position, if any.
    ///
    /// Queried on double-click; a `Some` answer becomes a
    /// [`ViewerRequest::OpenPicture`].
    fn picture_at(&self, x: f32, y: f32) -> Option<PathBuf> {
        let _ = (x, y);
        None
    }

    /// Advances animation by `delta_secs`, with `drag_dx` pixels of
    /// horizontal drag accumulated since the previous frame (zero while
    /// no button is held).
    fn advance(&mut self, delta_secs: f32, drag_dx: f32);

    /// Draws the scene into the current GL context.
    fn render(&mut self, gl: &glow::Context, width: u32, height: u32);
}

//=========================================================================
// Unit Tests
//=========================================================================
