//=========================================================================
// Overlay Painter
//
// Rasterizes the overlay labels on the CPU (cosmic-text) and composites
// them over the scene as alpha-blended textured quads (glow).
//
// Each label owns one texture that is re-rasterized only when its text
// changes; drawing is two quads with a shared shader. Glyph color is
// baked into the texture, the shared overlay opacity rides a uniform.
//
//=========================================================================

//=== External Dependencies ===============================================

use cosmic_text::{Attrs, Buffer as TextBuffer, Color, Family, FontSystem, Metrics, Shaping, SwashCache};
use glow::HasContext;
use log::debug;

//=== Internal Dependencies ===============================================

use super::{centered_x, Label, Overlay};

//=== Constants ===========================================================

/// Line height as a multiple of the font size.
const LINE_HEIGHT_FACTOR: f32 = 1.3;

const VERTEX_SHADER: &str = r#"
layout (location = 0) in vec2 a_pos;
layout (location = 1) in vec2 a_uv;

uniform vec4 u_rect;     // x, y, w, h in window pixels, y down
uniform vec2 u_viewport; // window size in pixels

out vec2 v_uv;

void main() {
    vec2 px = u_rect.xy + a_pos * u_rect.zw;
    vec2 ndc = vec2(px.x / u_viewport.x * 2.0 - 1.0,
                    1.0 - px.y / u_viewport.y * 2.0);
    v_uv = a_uv;
    gl_Position = vec4(ndc, 0.0, 1.0);
}
"#;

const FRAGMENT_SHADER: &str = r#"
in vec2 v_uv;

uniform sampler2D u_glyphs;
uniform float u_opacity;

out vec4 frag_color;

void main() {
    vec4 color = texture(u_glyphs, v_uv);
    color.a *= u_opacity;
    if (color.a <= 0.0) {
        discard;
    }
    frag_color = color;
}
"#;

//=== Geometry ============================================================

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct Vertex {
    position: [f32; 2],
    tex_coords: [f32; 2],
}

/// Unit quad in label-local space, y down; positions double as UVs.
const VERTICES: [Vertex; 4] = [
    Vertex { position: [0.0, 0.0], tex_coords: [0.0, 0.0] },
    Vertex { position: [1.0, 0.0], tex_coords: [1.0, 0.0] },
    Vertex { position: [1.0, 1.0], tex_coords: [1.0, 1.0] },
    Vertex { position: [0.0, 1.0], tex_coords: [0.0, 1.0] },
];

const INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

//=== LabelSlot ===========================================================

/// GPU-side state of one label.
struct LabelSlot {
    texture: glow::Texture,
    width: u32,
    height: u32,
    /// True while the label has no drawable glyphs.
    empty: bool,
}

//=== OverlayPainter ======================================================

/// Draws the overlay labels into the current GL context.
pub(crate) struct OverlayPainter {
    font_system: FontSystem,
    swash_cache: SwashCache,

    program: glow::Program,
    vao: glow::VertexArray,
    _vbo: glow::Buffer,
    _ebo: glow::Buffer,

    u_rect: Option<glow::UniformLocation>,
    u_viewport: Option<glow::UniformLocation>,
    u_opacity: Option<glow::UniformLocation>,
    u_glyphs: Option<glow::UniformLocation>,

    slots: [LabelSlot; 2],
}

impl OverlayPainter {
    //--- Construction -----------------------------------------------------

    /// Compiles the quad pipeline and allocates one texture per label.
    pub fn new(gl: &glow::Context) -> Result<Self, String> {
        let header = if gl.version().is_embedded {
            "#version 300 es\nprecision mediump float;"
        } else {
            "#version 330 core"
        };

        unsafe {
            let program = link_program(gl, header)?;

            let vao = gl.create_vertex_array()?;
            let vbo = gl.create_buffer()?;
            let ebo = gl.create_buffer()?;

            gl.bind_vertex_array(Some(vao));

            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
            gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(&VERTICES),
                glow::STATIC_DRAW,
            );

            gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(ebo));
            gl.buffer_data_u8_slice(
                glow::ELEMENT_ARRAY_BUFFER,
                bytemuck::cast_slice(&INDICES),
                glow::STATIC_DRAW,
            );

            let stride = std::mem::size_of::<Vertex>() as i32;
            gl.enable_vertex_attrib_array(0);
            gl.vertex_attrib_pointer_f32(0, 2, glow::FLOAT, false, stride, 0);
            gl.enable_vertex_attrib_array(1);
            gl.vertex_attrib_pointer_f32(1, 2, glow::FLOAT, false, stride, 8);

            gl.bind_vertex_array(None);

            let slots = [new_slot(gl)?, new_slot(gl)?];

            Ok(Self {
                font_system: FontSystem::new(),
                swash_cache: SwashCache::new(),
                u_rect: gl.get_uniform_location(program, "u_rect"),
                u_viewport: gl.get_uniform_location(program, "u_viewport"),
                u_opacity: gl.get_uniform_location(program, "u_opacity"),
                u_glyphs: gl.get_uniform_location(program, "u_glyphs"),
                program,
                vao,
                _vbo: vbo,
                _ebo: ebo,
                slots,
            })
        }
    }

    //--- Painting ---------------------------------------------------------

    /// Refreshes changed label textures and draws both labels.
    pub fn paint(
        &mut self,
        gl: &glow::Context,
        overlay: &mut Overlay,
        viewport_w: u32,
        viewport_h: u32,
    ) {
        // Texture refresh happens even while hidden so the dirty flags
        // never pile up behind a minimized window.
        self.refresh(gl, 0, &mut overlay.file_name);
        self.refresh(gl, 1, &mut overlay.resolution);

        if !overlay.should_draw() || viewport_w == 0 || viewport_h == 0 {
            return;
        }

        unsafe {
            gl.disable(glow::DEPTH_TEST);
            gl.enable(glow::BLEND);
            gl.blend_func(glow::SRC_ALPHA, glow::ONE_MINUS_SRC_ALPHA);

            gl.use_program(Some(self.program));
            gl.bind_vertex_array(Some(self.vao));
            gl.active_texture(glow::TEXTURE0);
            gl.uniform_1_i32(self.u_glyphs.as_ref(), 0);
            gl.uniform_2_f32(
                self.u_viewport.as_ref(),
                viewport_w as f32,
                viewport_h as f32,
            );
            gl.uniform_1_f32(self.u_opacity.as_ref(), overlay.opacity());

            self.draw_slot(gl, 0, overlay.file_name.top, viewport_w);
            self.draw_slot(gl, 1, overlay.resolution.top, viewport_w);

            gl.bind_vertex_array(None);
            gl.use_program(None);
            gl.disable(glow::BLEND);
            gl.enable(glow::DEPTH_TEST);
        }
    }

    //--- Internal ---------------------------------------------------------

    /// Re-rasterizes one label into its texture if the text changed.
    fn refresh(&mut self, gl: &glow::Context, index: usize, label: &mut Label) {
        if !label.dirty {
            return;
        }
        label.dirty = false;

        let slot = &mut self.slots[index];
        let raster = rasterize(
            &mut self.font_system,
            &mut self.swash_cache,
            &label.text,
            label.font_px,
            label.color,
        );

        match raster {
            Some((pixels, width, height)) => {
                unsafe {
                    gl.bind_texture(glow::TEXTURE_2D, Some(slot.texture));
                    gl.tex_image_2d(
                        glow::TEXTURE_2D,
                        0,
                        glow::RGBA as i32,
                        width as i32,
                        height as i32,
                        0,
                        glow::RGBA,
                        glow::UNSIGNED_BYTE,
                        Some(&pixels),
                    );
                    gl.bind_texture(glow::TEXTURE_2D, None);
                }
                slot.width = width;
                slot.height = height;
                slot.empty = false;
                debug!(
                    target: "overlay",
                    "Label {} rasterized to {}x{}",
                    index,
                    width,
                    height
                );
            }
            None => {
                slot.empty = true;
            }
        }
    }

    /// Draws one label slot centered at its row.
    ///
    /// Safety: caller has bound the program, VAO and texture unit.
    unsafe fn draw_slot(&self, gl: &glow::Context, index: usize, top: f32, viewport_w: u32) {
        let slot = &self.slots[index];
        if slot.empty {
            return;
        }

        let x = centered_x(viewport_w as f32, slot.width as f32);
        gl.bind_texture(glow::TEXTURE_2D, Some(slot.texture));
        gl.uniform_4_f32(
            self.u_rect.as_ref(),
            x,
            top,
            slot.width as f32,
            slot.height as f32,
        );
        gl.draw_elements(glow::TRIANGLES, INDICES.len() as i32, glow::UNSIGNED_SHORT, 0);
    }
}

//=== Rasterization =======================================================

/// Rasterizes `text` into a tightly sized RGBA buffer.
///
/// Returns `None` when nothing is drawable (empty text, or no usable
/// fonts on the system).
fn rasterize(
    font_system: &mut FontSystem,
    swash_cache: &mut SwashCache,
    text: &str,
    font_px: f32,
    color: [u8; 3],
) -> Option<(Vec<u8>, u32, u32)> {
    if text.is_empty() {
        return None;
    }

    let line_height = font_px * LINE_HEIGHT_FACTOR;
    let mut buffer = TextBuffer::new(font_system, Metrics::new(font_px, line_height));
    buffer.set_size(font_system, None, None);
    buffer.set_text(
        font_system,
        text,
        Attrs::new().family(Family::SansSerif),
        Shaping::Advanced,
    );
    buffer.shape_until_scroll(font_system, false);

    let mut max_line_w = 0.0f32;
    let mut line_count = 0u32;
    for run in buffer.layout_runs() {
        max_line_w = max_line_w.max(run.line_w);
        line_count += 1;
    }

    let width = max_line_w.ceil() as u32;
    let height = (line_count as f32 * line_height).ceil() as u32;
    if width == 0 || height == 0 {
        return None;
    }

    let mut pixels = vec![0u8; (width * height * 4) as usize];
    let text_color = Color::rgb(color[0], color[1], color[2]);
    buffer.draw(font_system, swash_cache, text_color, |x, y, w, h, c| {
        let alpha = c.a();
        if alpha == 0 {
            return;
        }
        for py in y..y + h as i32 {
            for px in x..x + w as i32 {
                write_pixel(&mut pixels, width, height, px, py, [c.r(), c.g(), c.b(), alpha]);
            }
        }
    });

    Some((pixels, width, height))
}

/// Writes one RGBA pixel, ignoring out-of-bounds coordinates and keeping
/// the higher coverage where glyphs overlap.
fn write_pixel(pixels: &mut [u8], width: u32, height: u32, x: i32, y: i32, rgba: [u8; 4]) {
    if x < 0 || y < 0 || x as u32 >= width || y as u32 >= height {
        return;
    }
    let offset = ((y as u32 * width + x as u32) * 4) as usize;
    if pixels[offset + 3] <= rgba[3] {
        pixels[offset..offset + 4].copy_from_slice(&rgba);
    }
}

//=== GL Helpers ==========================================================

unsafe fn new_slot(gl: &glow::Context) -> Result<LabelSlot, String> {
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
    Ok(LabelSlot {
        texture,
        width: 0,
        height: 0,
        empty: true,
    })
}

unsafe fn link_program(gl: &glow::Context, header: &str) -> Result<glow::Program, String> {
    let program = gl.create_program()?;

    let shaders = [
        (glow::VERTEX_SHADER, VERTEX_SHADER),
        (glow::FRAGMENT_SHADER, FRAGMENT_SHADER),
    ];

    let mut compiled = Vec::with_capacity(shaders.len());
    for (stage, source) in shaders {
        let shader = gl.create_shader(stage)?;
        gl.shader_source(shader, &format!("{}\n{}", header, source));
        gl.compile_shader(shader);
        if !gl.get_shader_compile_status(shader) {
            return Err(gl.get_shader_info_log(shader));
        }
        gl.attach_shader(program, shader);
        compiled.push(shader);
    }

    gl.link_program(program);
    if !gl.get_program_link_status(program) {
        return Err(gl.get_program_info_log(program));
    }

    for shader in compiled {
        gl.detach_shader(program, shader);
        gl.delete_shader(shader);
    }

    Ok(program)
}

//=========================================================================
// Unit Tests
//=========================================================================
