//=========================================================================
// Overlay Labels
//=========================================================================
//
// The two text lines composited over the scene: the file name of the
// picture in focus and its resolution. Both sit horizontally centered
// near the top of the window and share one opacity value driven by the
// scene (labels fade out while the browser is idle).
//
// This module owns the label *state*; rasterization and GL drawing live
// in `painter`.
//
//=========================================================================

//=== Submodules ==========================================================

pub(crate) mod painter;

//=== Constants ===========================================================

/// Text color of the file-name label.
const FILE_NAME_COLOR: [u8; 3] = [59, 59, 59];

/// Text color of the resolution label.
const RESOLUTION_COLOR: [u8; 3] = [112, 112, 112];

/// Font height of the file-name label, in pixels.
const FILE_NAME_FONT_PX: f32 = 24.0;

/// Font height of the resolution label, in pixels.
const RESOLUTION_FONT_PX: f32 = 18.0;

/// Distance from the window top to the file-name label.
const FILE_NAME_TOP: f32 = 40.0;

/// Distance from the window top to the resolution label.
const RESOLUTION_TOP: f32 = 70.0;

//=== Label ===============================================================

/// One overlay text line.
pub(crate) struct Label {
    /// Text to display; empty labels are skipped by the painter.
    pub text: String,

    /// Base color; the shared overlay opacity multiplies its alpha.
    pub color: [u8; 3],

    /// Font height in pixels.
    pub font_px: f32,

    /// Y position of the label's top edge, window top-left origin.
    pub top: f32,

    /// Set when `text` changed and the painter must re-rasterize.
    pub dirty: bool,
}

impl Label {
    fn new(color: [u8; 3], font_px: f32, top: f32) -> Self {
        Self {
            text: String::new(),
            color,
            font_px,
            top,
            dirty: false,
        }
    }

    fn set_text(&mut self, text: String) {
        if self.text != text {
            self.text = text;
            self.dirty = true;
        }
    }
}

//=== Overlay =============================================================

/// State of both overlay labels.
pub(crate) struct Overlay {
    pub file_name: Label,
    pub resolution: Label,

    /// Shared label opacity in `[0, 1]`.
    opacity: f32,

    /// False while the window is minimized or occluded.
    visible: bool,
}

impl Overlay {
    pub fn new() -> Self {
        Self {
            file_name: Label::new(FILE_NAME_COLOR, FILE_NAME_FONT_PX, FILE_NAME_TOP),
            resolution: Label::new(RESOLUTION_COLOR, RESOLUTION_FONT_PX, RESOLUTION_TOP),
            opacity: 1.0,
            visible: true,
        }
    }

    //--- Feedback Application ---------------------------------------------

    /// Sets the file-name line from the raw picture name.
    pub fn set_caption(&mut self, name: &str) {
        self.file_name.set_text(format!("File: {}", name));
    }

    /// Sets the resolution line from pixel dimensions.
    pub fn set_resolution(&mut self, width: u32, height: u32) {
        self.resolution
            .set_text(format!("Resolution: {}, {}", width, height));
    }

    /// Sets the shared opacity, clamped to `[0, 1]`.
    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity.clamp(0.0, 1.0);
    }

    //--- Visibility -------------------------------------------------------

    /// Mirrors window minimize/activation state onto the labels.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    //--- Queries ----------------------------------------------------------

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// True when the painter should draw the labels at all.
    pub fn should_draw(&self) -> bool {
        self.visible && self.opacity > 0.0
    }
}

/// X position centering a label of `label_w` pixels in a window of
/// `window_w` pixels.
pub(crate) fn centered_x(window_w: f32, label_w: f32) -> f32 {
    (window_w - label_w) / 2.0
}

//=========================================================================
// Unit Tests
//=========================================================================
