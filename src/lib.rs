//=========================================================================
// Pavilion — Library Root
//
// This crate defines the public API surface of the Pavilion picture
// viewer.
//
// Responsibilities:
// - Expose the viewer entry point (`Viewer`, `ViewerBuilder`)
// - Define the `Scene` seam a picture renderer plugs into
// - Keep internal modules (like `platform`) hidden from end users
// - Provide clean separation between the high-level viewer facade
//   and lower-level subsystems (window, GL context, overlay)
//
// Typical usage:
// ```no_run
// use pavilion::{Viewer, gallery::StripScene};
//
// fn main() {
//     let viewer = Viewer::builder().build();
//     viewer.run(StripScene::new(None)).unwrap();
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `scene` defines the trait a scene implements plus the feedback link it
// talks back through; `input` holds the small shared input vocabulary.
// `gallery` ships a ready-made directory-browsing scene so the binary
// works out of the box.
//
pub mod gallery;
pub mod input;
pub mod prelude;
pub mod scene;

//--- Internal Modules ----------------------------------------------------
//
// `platform` contains OS and GL specific logic (window, Winit
// integration, event loop, overlay drawing) and is kept private, as it
// is not part of the public API surface.
//
// `overlay` holds the label state shared between platform and painter.
//
// `viewer` defines the main entry point and configuration builder.
//
mod overlay;
mod platform;
mod viewer;

//--- Public Exports ------------------------------------------------------
//
// Re-exports the viewer types as the main entry point for applications.
// This allows users to simply `use pavilion::Viewer;` without having to
// know the internal module structure.
//
pub use platform::ShellError;
pub use viewer::{Viewer, ViewerBuilder};
