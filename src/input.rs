//=========================================================================
// Input Types
//
// Defines the shell-level representation of keyboard and mouse input.
// This module abstracts away platform-specific input (e.g. Winit) into
// the small, stable vocabulary the viewer window actually dispatches on.
//
// Responsibilities:
// - Represent the keys the window reacts to (close, navigate)
// - Represent mouse buttons forwarded to the scene
// - Provide fallback variants for everything unmapped
//
//=========================================================================

//=== Key Enum ============================================================
// The keyboard surface of the viewer window.
//
// Escape closes the window, ArrowLeft/ArrowRight navigate the picture
// strip. All other keys arrive as `Unidentified` and are ignored by the
// dispatch layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    ArrowLeft,
    ArrowRight,

    //--- Fallback ---------------------------------------------------------
    // Used for keys not mapped explicitly by the input layer.
    Unidentified,
}

//=== PointerButton Enum ==================================================
// Represents a physical mouse button.
//
// This abstraction keeps the scene seam independent of the underlying
// windowing library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Left,
    Right,
    Middle,
    Other,
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn keys_compare_by_variant() {
        assert_eq!(Key::Escape, Key::Escape);
        assert_ne!(Key::ArrowLeft, Key::ArrowRight);
        assert_ne!(Key::Escape, Key::Unidentified);
    }

    #[test]
    fn buttons_are_hashable() {
        let mut set = HashSet::new();
        set.insert(PointerButton::Left);
        set.insert(PointerButton::Left);
        set.insert(PointerButton::Right);
        assert_eq!(set.len(), 2, "Identical buttons must hash identically");
    }

    #[test]
    fn key_is_copy() {
        let key = Key::ArrowLeft;
        let copied = key;
        assert_eq!(key, copied);
    }
}
