//=========================================================================
// Gallery Scene
//
// A ready-to-use scene for the viewer: shows one picture of a directory
// at a time as a flat, aspect-fitted quad. Arrow keys and horizontal
// drags page through the directory, the overlay fades out after a few
// seconds without input.
//
// Decoding happens synchronously on the frame that first shows a
// picture; directories of ordinary photos stay comfortably within a
// frame budget at typical sizes.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::path::{Path, PathBuf};

use glow::HasContext;
use log::{debug, error, info, warn};

//=== Internal Dependencies ===============================================

use crate::input::PointerButton;
use crate::scene::{Scene, SceneLink};

//=== Constants ===========================================================

/// File extensions the scene lists when scanning a directory.
const PICTURE_EXTENSIONS: &[&str] = &[
    "bmp", "dds", "gif", "ico", "jpeg", "jpg", "png", "pnm", "tga", "tiff", "webp",
];

/// Fraction of the window width a drag must cover to flip the page.
const DRAG_PAGE_FRACTION: f32 = 0.25;

/// Exponential rate at which a released drag settles back.
const EASE_RATE: f32 = 8.0;

/// Seconds the overlay stays fully visible after the last interaction.
const OVERLAY_HOLD_SECS: f32 = 2.0;

/// Seconds the overlay then takes to fade out completely.
const OVERLAY_FADE_SECS: f32 = 1.0;

/// Flip threshold basis before the first frame reports a real size.
const FALLBACK_VIEW_WIDTH: f32 = 1280.0;

//=== StripScene ==========================================================

/// Decoded metadata of the picture currently on screen.
struct CurrentPicture {
    path: PathBuf,
    width: u32,
    height: u32,
}

/// Directory-backed picture strip.
pub struct StripScene {
    link: Option<SceneLink>,
    start_dir: Option<PathBuf>,

    pictures: Vec<PathBuf>,
    index: usize,
    pending: Option<PathBuf>,
    current: Option<CurrentPicture>,

    pan: f32,
    drag_total: f32,
    pressed: bool,
    idle: f32,
    last_opacity: f32,
    last_pointer: Option<(f32, f32)>,
    viewport: (u32, u32),

    renderer: Option<StripRenderer>,
    renderer_failed: bool,
}

impl StripScene {
    /// Creates an empty strip; `start_dir` is scanned as soon as the
    /// scene is attached to a viewer.
    pub fn new(start_dir: Option<PathBuf>) -> Self {
        Self {
            link: None,
            start_dir,
            pictures: Vec::new(),
            index: 0,
            pending: None,
            current: None,
            pan: 0.0,
            drag_total: 0.0,
            pressed: false,
            idle: 0.0,
            last_opacity: 1.0,
            last_pointer: None,
            viewport: (0, 0),
            renderer: None,
            renderer_failed: false,
        }
    }

    /// Number of pictures the last directory scan found.
    pub fn len(&self) -> usize {
        self.pictures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pictures.is_empty()
    }

    //--- Internal ---------------------------------------------------------

    /// Announces the picture at `index` and schedules it for decoding.
    fn show_current(&mut self) {
        let Some(path) = self.pictures.get(self.index) else {
            return;
        };
        if let Some(link) = &self.link {
            let name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            link.set_caption(name);
            link.set_overlay_opacity(1.0);
        }
        self.last_opacity = 1.0;
        self.idle = 0.0;
        self.pending = Some(path.clone());
    }

    fn flip_threshold(&self) -> f32 {
        let width = if self.viewport.0 == 0 {
            FALLBACK_VIEW_WIDTH
        } else {
            self.viewport.0 as f32
        };
        width * DRAG_PAGE_FRACTION
    }
}

impl Scene for StripScene {
    fn attach(&mut self, link: SceneLink) {
        self.link = Some(link);
        if let Some(dir) = self.start_dir.take() {
            self.load_directory(&dir);
        }
    }

    fn load_directory(&mut self, dir: &Path) {
        let mut found = Vec::new();
        match std::fs::read_dir(dir) {
            Ok(entries) => {
                for entry in entries.flatten() {
                    let path = entry.path();
                    if path.is_file() && is_picture_file(&path) {
                        found.push(path);
                    }
                }
            }
            Err(error) => {
                warn!(target: "gallery", "Cannot read {}: {}", dir.display(), error);
                return;
            }
        }
        found.sort();

        if found.is_empty() {
            warn!(target: "gallery", "No pictures found in {}", dir.display());
        } else {
            info!(
                target: "gallery",
                "{} pictures in {}",
                found.len(),
                dir.display()
            );
        }

        self.pictures = found;
        self.index = 0;
        self.pan = 0.0;
        self.drag_total = 0.0;
        self.show_current();
    }

    fn show_previous(&mut self) {
        if self.pictures.is_empty() {
            return;
        }
        self.index = (self.index + self.pictures.len() - 1) % self.pictures.len();
        debug!(
            target: "gallery",
            "Previous picture: {}/{}",
            self.index + 1,
            self.pictures.len()
        );
        self.show_current();
    }

    fn show_next(&mut self) {
        if self.pictures.is_empty() {
            return;
        }
        self.index = (self.index + 1) % self.pictures.len();
        debug!(
            target: "gallery",
            "Next picture: {}/{}",
            self.index + 1,
            self.pictures.len()
        );
        self.show_current();
    }

    fn pointer_pressed(&mut self, _x: f32, _y: f32, button: PointerButton) {
        if button != PointerButton::Left {
            return;
        }
        self.pressed = true;
        self.drag_total = 0.0;
        self.idle = 0.0;
    }

    fn pointer_released(&mut self, _x: f32, _y: f32, button: PointerButton) {
        if button != PointerButton::Left || !self.pressed {
            return;
        }
        self.pressed = false;
        self.idle = 0.0;

        let threshold = self.flip_threshold();
        if self.drag_total <= -threshold {
            self.show_next();
        } else if self.drag_total >= threshold {
            self.show_previous();
        }
        self.drag_total = 0.0;
    }

    fn pointer_moved(&mut self, x: f32, y: f32) {
        if let Some((last_x, last_y)) = self.last_pointer {
            if (x - last_x).abs() > 0.5 || (y - last_y).abs() > 0.5 {
                self.idle = 0.0;
            }
        }
        self.last_pointer = Some((x, y));
    }

    fn picture_at(&self, x: f32, y: f32) -> Option<PathBuf> {
        let picture = self.current.as_ref()?;
        let (view_w, view_h) = self.viewport;
        let (rect_x, rect_y, rect_w, rect_h) =
            fit_rect(picture.width, picture.height, view_w, view_h);
        let rect_x = rect_x + self.pan;

        if x >= rect_x && x < rect_x + rect_w && y >= rect_y && y < rect_y + rect_h {
            Some(picture.path.clone())
        } else {
            None
        }
    }

    fn advance(&mut self, delta_secs: f32, drag_dx: f32) {
        if self.pressed && drag_dx != 0.0 {
            self.pan += drag_dx;
            self.drag_total += drag_dx;
            self.idle = 0.0;
        } else {
            self.idle += delta_secs;
        }

        if !self.pressed && self.pan != 0.0 {
            let decay = (EASE_RATE * delta_secs).min(1.0);
            self.pan -= self.pan * decay;
            if self.pan.abs() < 0.5 {
                self.pan = 0.0;
            }
        }

        let opacity = overlay_opacity(self.idle);
        if (opacity - self.last_opacity).abs() > f32::EPSILON {
            self.last_opacity = opacity;
            if let Some(link) = &self.link {
                link.set_overlay_opacity(opacity);
            }
        }
    }

    fn render(&mut self, gl: &glow::Context, width: u32, height: u32) {
        self.viewport = (width, height);

        if self.renderer.is_none() && !self.renderer_failed {
            match StripRenderer::new(gl) {
                Ok(renderer) => self.renderer = Some(renderer),
                Err(message) => {
                    error!(target: "gallery", "Picture pipeline failed: {}", message);
                    self.renderer_failed = true;
                }
            }
        }
        let Some(renderer) = &mut self.renderer else {
            return;
        };

        if let Some(path) = self.pending.take() {
            match image::open(&path) {
                Ok(decoded) => {
                    let rgba = decoded.to_rgba8();
                    let (img_w, img_h) = rgba.dimensions();
                    renderer.upload(gl, img_w, img_h, rgba.as_raw());
                    if let Some(link) = &self.link {
                        link.set_resolution(img_w, img_h);
                    }
                    info!(
                        target: "gallery",
                        "Loaded {} ({}x{})",
                        path.display(),
                        img_w,
                        img_h
                    );
                    self.current = Some(CurrentPicture {
                        path,
                        width: img_w,
                        height: img_h,
                    });
                }
                Err(error) => {
                    // The strip keeps showing the previous picture; the
                    // index has already moved on.
                    warn!(
                        target: "gallery",
                        "Failed to load {}: {}",
                        path.display(),
                        error
                    );
                }
            }
        }

        if let Some(picture) = &self.current {
            let (x, y, w, h) = fit_rect(picture.width, picture.height, width, height);
            renderer.draw(gl, x + self.pan, y, w, h, width, height);
        }
    }
}

//=== Pure Helpers ========================================================

/// True when the path carries a known picture extension.
fn is_picture_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let lower = ext.to_ascii_lowercase();
            PICTURE_EXTENSIONS.iter().any(|known| *known == lower)
        })
        .unwrap_or(false)
}

/// Overlay opacity as a function of seconds since the last interaction.
fn overlay_opacity(idle_secs: f32) -> f32 {
    if idle_secs <= OVERLAY_HOLD_SECS {
        1.0
    } else {
        (1.0 - (idle_secs - OVERLAY_HOLD_SECS) / OVERLAY_FADE_SECS).max(0.0)
    }
}

/// Aspect-fit placement of an image inside a viewport, centered.
fn fit_rect(img_w: u32, img_h: u32, view_w: u32, view_h: u32) -> (f32, f32, f32, f32) {
    if img_w == 0 || img_h == 0 || view_w == 0 || view_h == 0 {
        return (0.0, 0.0, 0.0, 0.0);
    }
    let scale = (view_w as f32 / img_w as f32).min(view_h as f32 / img_h as f32);
    let w = img_w as f32 * scale;
    let h = img_h as f32 * scale;
    ((view_w as f32 - w) / 2.0, (view_h as f32 - h) / 2.0, w, h)
}

//=== StripRenderer =======================================================

const STRIP_VERTEX_SHADER: &str = r#"
layout (location = 0) in vec2 a_pos;
layout (location = 1) in vec2 a_uv;

uniform vec4 u_rect;
uniform vec2 u_viewport;

out vec2 v_uv;

void main() {
    vec2 px = u_rect.xy + a_pos * u_rect.zw;
    vec2 ndc = vec2(px.x / u_viewport.x * 2.0 - 1.0,
                    1.0 - px.y / u_viewport.y * 2.0);
    v_uv = a_uv;
    gl_Position = vec4(ndc, 0.0, 1.0);
}
"#;

const STRIP_FRAGMENT_SHADER: &str = r#"
in vec2 v_uv;

uniform sampler2D u_picture;

out vec4 frag_color;

void main() {
    frag_color = texture(u_picture, v_uv);
}
"#;

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct StripVertex {
    position: [f32; 2],
    tex_coords: [f32; 2],
}

const STRIP_VERTICES: [StripVertex; 4] = [
    StripVertex { position: [0.0, 0.0], tex_coords: [0.0, 0.0] },
    StripVertex { position: [1.0, 0.0], tex_coords: [1.0, 0.0] },
    StripVertex { position: [1.0, 1.0], tex_coords: [1.0, 1.0] },
    StripVertex { position: [0.0, 1.0], tex_coords: [0.0, 1.0] },
];

const STRIP_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

/// Textured quad pipeline for the picture itself.
struct StripRenderer {
    program: glow::Program,
    vao: glow::VertexArray,
    _vbo: glow::Buffer,
    _ebo: glow::Buffer,
    texture: glow::Texture,
    u_rect: Option<glow::UniformLocation>,
    u_viewport: Option<glow::UniformLocation>,
    u_picture: Option<glow::UniformLocation>,
    has_picture: bool,
}

impl StripRenderer {
    fn new(gl: &glow::Context) -> Result<Self, String> {
        let header = if gl.version().is_embedded {
            "#version 300 es\nprecision mediump float;"
        } else {
            "#version 330 core"
        };

        unsafe {
            let program = gl.create_program()?;
            let stages = [
                (glow::VERTEX_SHADER, STRIP_VERTEX_SHADER),
                (glow::FRAGMENT_SHADER, STRIP_FRAGMENT_SHADER),
            ];
            let mut shaders = Vec::with_capacity(stages.len());
            for (stage, source) in stages {
                let shader = gl.create_shader(stage)?;
                gl.shader_source(shader, &format!("{}\n{}", header, source));
                gl.compile_shader(shader);
                if !gl.get_shader_compile_status(shader) {
                    return Err(gl.get_shader_info_log(shader));
                }
                gl.attach_shader(program, shader);
                shaders.push(shader);
            }
            gl.link_program(program);
            if !gl.get_program_link_status(program) {
                return Err(gl.get_program_info_log(program));
            }
            for shader in shaders {
                gl.detach_shader(program, shader);
                gl.delete_shader(shader);
            }

            let vao = gl.create_vertex_array()?;
            let vbo = gl.create_buffer()?;
            let ebo = gl.create_buffer()?;

            gl.bind_vertex_array(Some(vao));
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
            gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(&STRIP_VERTICES),
                glow::STATIC_DRAW,
            );
            gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(ebo));
            gl.buffer_data_u8_slice(
                glow::ELEMENT_ARRAY_BUFFER,
                bytemuck::cast_slice(&STRIP_INDICES),
                glow::STATIC_DRAW,
            );

            let stride = std::mem::size_of::<StripVertex>() as i32;
            gl.enable_vertex_attrib_array(0);
            gl.vertex_attrib_pointer_f32(0, 2, glow::FLOAT, false, stride, 0);
            gl.enable_vertex_attrib_array(1);
            gl.vertex_attrib_pointer_f32(1, 2, glow::FLOAT, false, stride, 8);
            gl.bind_vertex_array(None);

            let texture = gl.create_texture()?;
            gl.bind_texture(glow::TEXTURE_2D, Some(texture));
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MIN_FILTER,
                glow::LINEAR as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MAG_FILTER,
                glow::LINEAR as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_WRAP_S,
                glow::CLAMP_TO_EDGE as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_WRAP_T,
                glow::CLAMP_TO_EDGE as i32,
            );
            gl.bind_texture(glow::TEXTURE_2D, None);

            Ok(Self {
                u_rect: gl.get_uniform_location(program, "u_rect"),
                u_viewport: gl.get_uniform_location(program, "u_viewport"),
                u_picture: gl.get_uniform_location(program, "u_picture"),
                program,
                vao,
                _vbo: vbo,
                _ebo: ebo,
                texture,
                has_picture: false,
            })
        }
    }

    /// Replaces the picture texture with fresh RGBA pixels.
    fn upload(&mut self, gl: &glow::Context, width: u32, height: u32, pixels: &[u8]) {
        unsafe {
            gl.bind_texture(glow::TEXTURE_2D, Some(self.texture));
            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGBA as i32,
                width as i32,
                height as i32,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                Some(pixels),
            );
            gl.bind_texture(glow::TEXTURE_2D, None);
        }
        self.has_picture = true;
    }

    /// Draws the picture quad at the given pixel rectangle.
    fn draw(
        &self,
        gl: &glow::Context,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        view_w: u32,
        view_h: u32,
    ) {
        if !self.has_picture || view_w == 0 || view_h == 0 {
            return;
        }
        unsafe {
            gl.enable(glow::BLEND);
            gl.blend_func(glow::SRC_ALPHA, glow::ONE_MINUS_SRC_ALPHA);

            gl.use_program(Some(self.program));
            gl.bind_vertex_array(Some(self.vao));
            gl.active_texture(glow::TEXTURE0);
            gl.bind_texture(glow::TEXTURE_2D, Some(self.texture));
            gl.uniform_1_i32(self.u_picture.as_ref(), 0);
            gl.uniform_2_f32(self.u_viewport.as_ref(), view_w as f32, view_h as f32);
            gl.uniform_4_f32(self.u_rect.as_ref(), x, y, w, h);
            gl.draw_elements(
                glow::TRIANGLES,
                STRIP_INDICES.len() as i32,
                glow::UNSIGNED_SHORT,
                0,
            );

            gl.bind_vertex_array(None);
            gl.use_program(None);
            gl.disable(glow::BLEND);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{feedback_channel, SceneFeedback};
    use crossbeam_channel::Receiver;

    //--- test scaffolding -------------------------------------------------

    /// Temp directory removed on drop.
    struct ScratchDir {
        path: PathBuf,
    }

    impl ScratchDir {
        fn new(tag: &str) -> Self {
            let path = std::env::temp_dir().join(format!(
                "pavilion-gallery-{}-{}",
                tag,
                std::process::id()
            ));
            std::fs::create_dir_all(&path).expect("scratch dir");
            Self { path }
        }
    }

    impl Drop for ScratchDir {
        fn drop(&mut self) {
            let _ = std::fs::remove_dir_all(&self.path);
        }
    }

    fn attached_scene() -> (StripScene, Receiver<SceneFeedback>) {
        let (link, receiver) = feedback_channel(64);
        let mut scene = StripScene::new(None);
        scene.attach(link);
        (scene, receiver)
    }

    fn with_fake_pictures(names: &[&str]) -> (StripScene, Receiver<SceneFeedback>) {
        let (mut scene, receiver) = attached_scene();
        scene.pictures = names.iter().map(|name| PathBuf::from(*name)).collect();
        (scene, receiver)
    }

    fn drain(receiver: &Receiver<SceneFeedback>) -> Vec<SceneFeedback> {
        let mut out = Vec::new();
        while let Ok(feedback) = receiver.try_recv() {
            out.push(feedback);
        }
        out
    }

    //--- file filtering ---------------------------------------------------

    #[test]
    fn recognizes_picture_extensions_case_insensitively() {
        assert!(is_picture_file(Path::new("a.png")));
        assert!(is_picture_file(Path::new("b.JPG")));
        assert!(is_picture_file(Path::new("c.JpEg")));
        assert!(is_picture_file(Path::new("d.webp")));
    }

    #[test]
    fn rejects_non_picture_files() {
        assert!(!is_picture_file(Path::new("notes.txt")));
        assert!(!is_picture_file(Path::new("archive.tar.gz")));
        assert!(!is_picture_file(Path::new("no_extension")));
    }

    //--- overlay opacity --------------------------------------------------

    #[test]
    fn overlay_stays_opaque_during_the_hold() {
        assert_eq!(overlay_opacity(0.0), 1.0);
        assert_eq!(overlay_opacity(1.9), 1.0);
        assert_eq!(overlay_opacity(OVERLAY_HOLD_SECS), 1.0);
    }

    #[test]
    fn overlay_fades_linearly_then_bottoms_out() {
        assert_eq!(overlay_opacity(2.5), 0.5);
        assert_eq!(overlay_opacity(3.0), 0.0);
        assert_eq!(overlay_opacity(10.0), 0.0);
    }

    //--- fitting ----------------------------------------------------------

    #[test]
    fn wide_image_letterboxes_vertically() {
        let (x, y, w, h) = fit_rect(200, 100, 100, 100);
        assert_eq!((x, y, w, h), (0.0, 25.0, 100.0, 50.0));
    }

    #[test]
    fn tall_image_letterboxes_horizontally() {
        let (x, y, w, h) = fit_rect(100, 200, 100, 100);
        assert_eq!((x, y, w, h), (25.0, 0.0, 50.0, 100.0));
    }

    #[test]
    fn matching_aspect_fills_the_viewport() {
        assert_eq!(fit_rect(640, 360, 1280, 720), (0.0, 0.0, 1280.0, 720.0));
    }

    #[test]
    fn degenerate_sizes_collapse_to_nothing() {
        assert_eq!(fit_rect(0, 100, 100, 100), (0.0, 0.0, 0.0, 0.0));
        assert_eq!(fit_rect(100, 100, 0, 100), (0.0, 0.0, 0.0, 0.0));
    }

    //--- navigation -------------------------------------------------------

    #[test]
    fn navigation_wraps_both_directions() {
        let (mut scene, _receiver) = with_fake_pictures(&["a.png", "b.png", "c.png"]);

        scene.show_previous();
        assert_eq!(scene.index, 2, "Previous from the first picture must wrap");
        scene.show_next();
        assert_eq!(scene.index, 0, "Next from the last picture must wrap");
    }

    #[test]
    fn navigation_announces_caption_and_restores_overlay() {
        let (mut scene, receiver) = with_fake_pictures(&["a.png", "b.png"]);
        scene.last_opacity = 0.0;

        scene.show_next();

        let feedback = drain(&receiver);
        assert_eq!(
            feedback,
            vec![
                SceneFeedback::Caption(String::from("b.png")),
                SceneFeedback::OverlayOpacity(1.0),
            ]
        );
        assert_eq!(scene.pending, Some(PathBuf::from("b.png")));
    }

    #[test]
    fn navigation_on_an_empty_strip_is_a_noop() {
        let (mut scene, receiver) = attached_scene();
        scene.show_next();
        scene.show_previous();
        assert!(drain(&receiver).is_empty());
        assert_eq!(scene.index, 0);
    }

    //--- dragging ---------------------------------------------------------

    #[test]
    fn long_drag_left_flips_to_the_next_picture() {
        let (mut scene, _receiver) = with_fake_pictures(&["a.png", "b.png", "c.png"]);
        scene.viewport = (1000, 500);

        scene.pointer_pressed(500.0, 250.0, PointerButton::Left);
        scene.advance(0.016, -300.0);
        scene.pointer_released(200.0, 250.0, PointerButton::Left);

        assert_eq!(scene.index, 1);
    }

    #[test]
    fn long_drag_right_flips_to_the_previous_picture() {
        let (mut scene, _receiver) = with_fake_pictures(&["a.png", "b.png", "c.png"]);
        scene.viewport = (1000, 500);

        scene.pointer_pressed(200.0, 250.0, PointerButton::Left);
        scene.advance(0.016, 300.0);
        scene.pointer_released(500.0, 250.0, PointerButton::Left);

        assert_eq!(scene.index, 2, "Dragging right must wrap to the last picture");
    }

    #[test]
    fn short_drag_keeps_the_page_and_settles_back() {
        let (mut scene, _receiver) = with_fake_pictures(&["a.png", "b.png"]);
        scene.viewport = (1000, 500);

        scene.pointer_pressed(500.0, 250.0, PointerButton::Left);
        scene.advance(0.016, -100.0);
        scene.pointer_released(400.0, 250.0, PointerButton::Left);
        assert_eq!(scene.index, 0);
        assert_ne!(scene.pan, 0.0);

        for _ in 0..100 {
            scene.advance(0.1, 0.0);
        }
        assert_eq!(scene.pan, 0.0, "Pan must ease back to rest after release");
    }

    #[test]
    fn right_button_does_not_drag_the_strip() {
        let (mut scene, _receiver) = with_fake_pictures(&["a.png", "b.png"]);
        scene.viewport = (1000, 500);

        scene.pointer_pressed(500.0, 250.0, PointerButton::Right);
        scene.advance(0.016, -400.0);
        scene.pointer_released(100.0, 250.0, PointerButton::Right);

        assert_eq!(scene.index, 0);
        assert_eq!(scene.pan, 0.0);
    }

    //--- idle fade --------------------------------------------------------

    #[test]
    fn idle_time_fades_the_overlay() {
        let (mut scene, receiver) = with_fake_pictures(&["a.png"]);
        scene.advance(2.5, 0.0);

        assert!(
            drain(&receiver).contains(&SceneFeedback::OverlayOpacity(0.5)),
            "Half-faded opacity must be announced"
        );
    }

    #[test]
    fn steady_opacity_is_not_reannounced() {
        let (mut scene, receiver) = with_fake_pictures(&["a.png"]);
        scene.advance(0.1, 0.0);
        scene.advance(0.1, 0.0);
        assert!(drain(&receiver).is_empty());
    }

    #[test]
    fn pointer_motion_resets_the_idle_clock() {
        let (mut scene, _receiver) = attached_scene();
        scene.idle = 5.0;

        scene.pointer_moved(10.0, 10.0);
        assert_eq!(scene.idle, 5.0, "The first sample only records a position");
        scene.pointer_moved(30.0, 10.0);
        assert_eq!(scene.idle, 0.0);
    }

    //--- directory scan ---------------------------------------------------

    #[test]
    fn directory_scan_keeps_only_pictures_sorted() {
        let scratch = ScratchDir::new("scan");
        for name in ["b.png", "a.jpg", "notes.txt", "c.PNG"] {
            std::fs::write(scratch.path.join(name), b"x").expect("write sample");
        }

        let (mut scene, receiver) = attached_scene();
        scene.load_directory(&scratch.path);

        let names: Vec<_> = scene
            .pictures
            .iter()
            .map(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
            .collect();
        assert_eq!(
            names,
            vec![
                Some(String::from("a.jpg")),
                Some(String::from("b.png")),
                Some(String::from("c.PNG")),
            ]
        );

        let feedback = drain(&receiver);
        assert_eq!(
            feedback.first(),
            Some(&SceneFeedback::Caption(String::from("a.jpg")))
        );
    }

    #[test]
    fn unreadable_directory_leaves_the_strip_untouched() {
        let (mut scene, receiver) = with_fake_pictures(&["a.png"]);
        scene.load_directory(Path::new("/no/such/directory/anywhere"));

        assert_eq!(scene.pictures, vec![PathBuf::from("a.png")]);
        assert!(drain(&receiver).is_empty());
    }

    #[test]
    fn empty_directory_clears_the_strip() {
        let scratch = ScratchDir::new("empty");
        let (mut scene, _receiver) = with_fake_pictures(&["a.png"]);

        scene.load_directory(&scratch.path);
        assert!(scene.is_empty());
    }

    //--- hit testing ------------------------------------------------------

    #[test]
    fn picture_hit_test_respects_the_fitted_rect() {
        let (mut scene, _receiver) = attached_scene();
        scene.viewport = (400, 200);
        scene.current = Some(CurrentPicture {
            path: PathBuf::from("a.png"),
            width: 100,
            height: 100,
        });

        // 100x100 fitted into 400x200 lands at (100, 0), 200x200.
        assert_eq!(scene.picture_at(150.0, 100.0), Some(PathBuf::from("a.png")));
        assert_eq!(scene.picture_at(50.0, 100.0), None);
        assert_eq!(scene.picture_at(350.0, 100.0), None);
    }

    #[test]
    fn hit_test_without_a_picture_misses() {
        let (scene, _receiver) = attached_scene();
        assert_eq!(scene.picture_at(100.0, 100.0), None);
    }
}
