//=========================================================================
// Platform Event Mapper
//
// Converts Winit input identifiers to shell-level types. Provides a
// clean separation between OS-specific input and the viewer's internal
// representation.
//
// Responsibilities:
// - Translate keyboard and mouse button identifiers
// - Provide fallbacks (`Unidentified` / `Other`) for unmapped inputs
//
//=========================================================================

use winit::event::MouseButton as WinitMouseButton;
use winit::keyboard::KeyCode as WinitKeyCode;
use winit::keyboard::PhysicalKey;

use crate::input::{Key, PointerButton};

//=== Key Conversion ======================================================
//
// Maps `WinitKeyCode` values to the viewer's `Key` enum. Only the keys
// the window dispatches on are mapped; all others become `Unidentified`.
//

impl From<WinitKeyCode> for Key {
    fn from(code: WinitKeyCode) -> Self {
        match code {
            WinitKeyCode::Escape => Key::Escape,
            WinitKeyCode::ArrowLeft => Key::ArrowLeft,
            WinitKeyCode::ArrowRight => Key::ArrowRight,

            //--- Fallback ---------------------------------------------------
            _ => Key::Unidentified,
        }
    }
}

impl From<PhysicalKey> for Key {
    fn from(key: PhysicalKey) -> Self {
        match key {
            PhysicalKey::Code(code) => Key::from(code),
            _ => Key::Unidentified,
        }
    }
}

//=== Mouse Conversion ====================================================
//
// Maps Winit mouse button identifiers to shell-level button types.
//

impl From<WinitMouseButton> for PointerButton {
    fn from(button: WinitMouseButton) -> Self {
        match button {
            WinitMouseButton::Left => PointerButton::Left,
            WinitMouseButton::Right => PointerButton::Right,
            WinitMouseButton::Middle => PointerButton::Middle,
            _ => PointerButton::Other,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    //=====================================================================
    // Key Mapping Tests
    //=====================================================================

    #[test]
    fn escape_maps_to_escape() {
        assert_eq!(Key::from(WinitKeyCode::Escape), Key::Escape);
    }

    #[test]
    fn arrow_keys_map_to_navigation() {
        assert_eq!(Key::from(WinitKeyCode::ArrowLeft), Key::ArrowLeft);
        assert_eq!(Key::from(WinitKeyCode::ArrowRight), Key::ArrowRight);
    }

    #[test]
    fn unmapped_keys_fall_back_to_unidentified() {
        assert_eq!(Key::from(WinitKeyCode::KeyA), Key::Unidentified);
        assert_eq!(Key::from(WinitKeyCode::Space), Key::Unidentified);
        assert_eq!(Key::from(WinitKeyCode::ArrowUp), Key::Unidentified);
        assert_eq!(Key::from(WinitKeyCode::F11), Key::Unidentified);
    }

    #[test]
    fn physical_key_code_maps_through() {
        let key = PhysicalKey::Code(WinitKeyCode::Escape);
        assert_eq!(Key::from(key), Key::Escape);
    }

    //=====================================================================
    // Mouse Mapping Tests
    //=====================================================================

    #[test]
    fn standard_buttons_map_directly() {
        assert_eq!(
            PointerButton::from(WinitMouseButton::Left),
            PointerButton::Left
        );
        assert_eq!(
            PointerButton::from(WinitMouseButton::Right),
            PointerButton::Right
        );
        assert_eq!(
            PointerButton::from(WinitMouseButton::Middle),
            PointerButton::Middle
        );
    }

    #[test]
    fn extra_buttons_fall_back_to_other() {
        assert_eq!(
            PointerButton::from(WinitMouseButton::Back),
            PointerButton::Other
        );
        assert_eq!(
            PointerButton::from(WinitMouseButton::Other(7)),
            PointerButton::Other
        );
    }
}
