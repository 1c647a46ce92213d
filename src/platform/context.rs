//=========================================================================
// Render Context
//
// Builds the window together with its OpenGL machinery: framebuffer
// config negotiation (multisampling included), context creation with a
// GLES fallback, the window surface, and the glow function loader.
//
// The multisample request is best-effort. When the display offers no
// matching config the closest one below the request is taken, mirroring
// a plain non-multisampled setup when nothing else fits.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::num::NonZeroU32;

use glow::HasContext;
use glutin::config::{Config, ConfigTemplateBuilder, GlConfig};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, NotCurrentGlContext, PossiblyCurrentContext,
};
use glutin::display::{GetGlDisplay, GlDisplay};
use glutin::surface::{GlSurface, Surface, SwapInterval, WindowSurface};
use glutin_winit::{DisplayBuilder, GlWindow};
use log::{debug, info, warn};
use raw_window_handle::HasWindowHandle;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowAttributes};

//=== Internal Dependencies ===============================================

use super::ShellError;

//=== Constants ===========================================================

const ALPHA_BITS: u8 = 8;
const DEPTH_BITS: u8 = 16;

/// Background clear color (linear-ish dark gray).
const CLEAR_COLOR: [f32; 4] = [0.10, 0.10, 0.12, 1.0];

//=== RenderContext =======================================================

/// Owns the GL context, the window surface and the loaded GL API.
pub(crate) struct RenderContext {
    context: PossiblyCurrentContext,
    surface: Surface<WindowSurface>,
    gl: glow::Context,
    samples: u8,
}

impl RenderContext {
    //--- Bootstrap --------------------------------------------------------

    /// Creates the window and a current GL context for it.
    ///
    /// `msaa` is the requested per-pixel sample count; zero disables
    /// multisampling outright.
    pub fn bootstrap(
        event_loop: &ActiveEventLoop,
        attributes: WindowAttributes,
        msaa: u8,
    ) -> Result<(Window, Self), ShellError> {
        let mut template = ConfigTemplateBuilder::new()
            .with_alpha_size(ALPHA_BITS)
            .with_depth_size(DEPTH_BITS);
        if msaa > 0 {
            template = template.with_multisampling(msaa);
        }

        let (window, gl_config) = DisplayBuilder::new()
            .with_window_attributes(Some(attributes))
            .build(event_loop, template, pick_config(msaa))
            .map_err(|error| ShellError::DisplayBootstrap(error.to_string()))?;
        let window = window.ok_or(ShellError::WindowUnavailable)?;

        let samples = gl_config.num_samples();
        info!(
            target: "platform",
            "GL config chosen: {} samples, alpha {}, depth {}, accelerated: {}",
            samples,
            gl_config.alpha_size(),
            gl_config.depth_size(),
            gl_config.hardware_accelerated()
        );

        let display = gl_config.display();
        let raw_window_handle = window
            .window_handle()
            .map_err(ShellError::WindowHandle)?
            .as_raw();

        // Desktop GL first, GLES when the driver refuses it.
        let context_attributes = ContextAttributesBuilder::new().build(Some(raw_window_handle));
        let fallback_attributes = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::Gles(None))
            .build(Some(raw_window_handle));
        let not_current = unsafe {
            display
                .create_context(&gl_config, &context_attributes)
                .or_else(|error| {
                    debug!(
                        target: "platform",
                        "Desktop GL context unavailable ({}), trying GLES",
                        error
                    );
                    display.create_context(&gl_config, &fallback_attributes)
                })
        }
        .map_err(ShellError::ContextCreation)?;

        let surface_attributes = window
            .build_surface_attributes(Default::default())
            .map_err(ShellError::WindowHandle)?;
        let surface = unsafe { display.create_window_surface(&gl_config, &surface_attributes) }
            .map_err(ShellError::SurfaceCreation)?;

        let context = not_current
            .make_current(&surface)
            .map_err(ShellError::MakeCurrent)?;

        // Pacing comes from the redraw timer, not from vsync.
        if let Err(error) = surface.set_swap_interval(&context, SwapInterval::DontWait) {
            warn!(target: "platform", "Swap interval rejected: {}", error);
        }

        let gl = unsafe {
            glow::Context::from_loader_function_cstr(|symbol| display.get_proc_address(symbol))
        };

        let size = window.inner_size();
        unsafe {
            gl.clear_color(
                CLEAR_COLOR[0],
                CLEAR_COLOR[1],
                CLEAR_COLOR[2],
                CLEAR_COLOR[3],
            );
            gl.enable(glow::DEPTH_TEST);
            if samples > 0 {
                gl.enable(glow::MULTISAMPLE);
            }
            gl.viewport(0, 0, size.width as i32, size.height as i32);

            info!(
                target: "platform",
                "OpenGL ready: {}",
                gl.get_parameter_string(glow::VERSION)
            );
        }

        Ok((
            window,
            Self {
                context,
                surface,
                gl,
                samples,
            },
        ))
    }

    //--- Frame Plumbing ---------------------------------------------------

    /// Clears color and depth for the next frame.
    pub fn begin_frame(&self) {
        unsafe {
            self.gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }
    }

    /// Presents the back buffer.
    pub fn swap(&self) -> Result<(), ShellError> {
        self.surface
            .swap_buffers(&self.context)
            .map_err(ShellError::SwapBuffers)
    }

    /// Resizes surface and viewport; zero-sized updates are ignored.
    pub fn resize(&self, width: u32, height: u32) {
        let (Some(w), Some(h)) = (NonZeroU32::new(width), NonZeroU32::new(height)) else {
            return;
        };
        self.surface.resize(&self.context, w, h);
        unsafe {
            self.gl.viewport(0, 0, width as i32, height as i32);
        }
    }

    //--- Accessors --------------------------------------------------------

    pub fn gl(&self) -> &glow::Context {
        &self.gl
    }

    pub fn samples(&self) -> u8 {
        self.samples
    }
}

//=== Config Selection ====================================================

/// Builds the picker callback handed to the display builder.
fn pick_config(
    requested_samples: u8,
) -> impl FnOnce(Box<dyn Iterator<Item = Config> + '_>) -> Config {
    move |configs| {
        configs
            .max_by_key(|config| {
                config_rank(
                    requested_samples,
                    config.hardware_accelerated(),
                    config.num_samples(),
                    config.alpha_size(),
                    config.depth_size(),
                )
            })
            .expect("display offered no GL configs")
    }
}

/// Ranking key for a candidate framebuffer config.
///
/// Hardware acceleration dominates, then sample affinity, then alpha and
/// depth precision as tiebreakers.
fn config_rank(
    requested: u8,
    accelerated: bool,
    samples: u8,
    alpha: u8,
    depth: u8,
) -> (bool, i32, u8, u8) {
    (accelerated, sample_affinity(requested, samples), alpha, depth)
}

/// Scores how close a config's sample count is to the requested one.
///
/// An exact match wins; otherwise counts at or below the request beat
/// counts above it, and each side prefers the count nearest the request.
fn sample_affinity(requested: u8, actual: u8) -> i32 {
    if actual == requested {
        2000
    } else if actual < requested {
        1000 + actual as i32
    } else {
        1000 - actual as i32
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_sample_match_scores_highest() {
        assert!(sample_affinity(2, 2) > sample_affinity(2, 0));
        assert!(sample_affinity(2, 2) > sample_affinity(2, 4));
        assert!(sample_affinity(0, 0) > sample_affinity(0, 2));
    }

    #[test]
    fn counts_below_request_beat_counts_above() {
        assert!(
            sample_affinity(4, 2) > sample_affinity(4, 8),
            "A lower sample count must win over overshooting the request"
        );
        assert!(sample_affinity(4, 0) > sample_affinity(4, 16));
    }

    #[test]
    fn nearer_counts_win_within_each_side() {
        assert!(sample_affinity(8, 4) > sample_affinity(8, 2));
        assert!(sample_affinity(2, 4) > sample_affinity(2, 8));
    }

    #[test]
    fn zero_request_prefers_unsampled_configs() {
        assert!(sample_affinity(0, 0) > sample_affinity(0, 4));
        assert!(sample_affinity(0, 2) > sample_affinity(0, 8));
    }

    #[test]
    fn software_configs_lose_to_accelerated_ones() {
        assert!(
            config_rank(2, true, 0, 0, 0) > config_rank(2, false, 2, 8, 16),
            "Acceleration must outweigh every other config property"
        );
    }

    #[test]
    fn precision_breaks_ties_between_equal_sample_counts() {
        assert!(config_rank(2, true, 2, 8, 16) > config_rank(2, true, 2, 8, 0));
        assert!(config_rank(2, true, 2, 8, 16) > config_rank(2, true, 2, 0, 16));
    }
}
