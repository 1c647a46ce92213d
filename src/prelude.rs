//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use pavilion::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Viewer entry points
pub use crate::{ShellError, Viewer, ViewerBuilder};

// Scene system
pub use crate::scene::{Scene, SceneFeedback, SceneLink, ViewerRequest};

// Input vocabulary
pub use crate::input::{Key, PointerButton};

// Bundled scenes
pub use crate::gallery::StripScene;
