//! Keyboard input normalized for a typing game.
//!
//! Window events are reduced to [`KeyPress`] values: a physical key plus the
//! auto-repeat flag. Only key-down events survive; releases carry no meaning
//! for gameplay.

use winit::event::{ElementState, KeyEvent};
use winit::keyboard::PhysicalKey;

/// A key-down event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: KeyCode,
    /// Generated by the OS while the key is held, not by a fresh press.
    pub repeat: bool,
}

impl KeyPress {
    pub fn new(key: KeyCode) -> Self {
        Self { key, repeat: false }
    }

    pub fn repeated(key: KeyCode) -> Self {
        Self { key, repeat: true }
    }

    /// Convert a winit keyboard event. Releases and keys without a physical
    /// code yield `None`.
    pub fn from_key_event(event: &KeyEvent) -> Option<Self> {
        if event.state != ElementState::Pressed {
            return None;
        }
        match event.physical_key {
            PhysicalKey::Code(key) => Some(Self { key, repeat: event.repeat }),
            PhysicalKey::Unidentified(code) => {
                log::trace!("Ignoring unidentified key {:?}", code);
                None
            }
        }
    }

    /// The uppercase letter this key types, if any.
    pub fn letter(&self) -> Option<char> {
        letter_for_key(self.key)
    }
}

/// Map a physical key to `'A'..='Z'`. Layout-independent: the key in the
/// QWERTY "A" position always types `'A'`.
pub fn letter_for_key(key: KeyCode) -> Option<char> {
    let letter = match key {
        KeyCode::KeyA => 'A',
        KeyCode::KeyB => 'B',
        KeyCode::KeyC => 'C',
        KeyCode::KeyD => 'D',
        KeyCode::KeyE => 'E',
        KeyCode::KeyF => 'F',
        KeyCode::KeyG => 'G',
        KeyCode::KeyH => 'H',
        KeyCode::KeyI => 'I',
        KeyCode::KeyJ => 'J',
        KeyCode::KeyK => 'K',
        KeyCode::KeyL => 'L',
        KeyCode::KeyM => 'M',
        KeyCode::KeyN => 'N',
        KeyCode::KeyO => 'O',
        KeyCode::KeyP => 'P',
        KeyCode::KeyQ => 'Q',
        KeyCode::KeyR => 'R',
        KeyCode::KeyS => 'S',
        KeyCode::KeyT => 'T',
        KeyCode::KeyU => 'U',
        KeyCode::KeyV => 'V',
        KeyCode::KeyW => 'W',
        KeyCode::KeyX => 'X',
        KeyCode::KeyY => 'Y',
        KeyCode::KeyZ => 'Z',
        _ => return None,
    };
    Some(letter)
}

/// Inverse of [`letter_for_key`], accepting either case.
pub fn key_for_letter(letter: char) -> Option<KeyCode> {
    let key = match letter.to_ascii_uppercase() {
        'A' => KeyCode::KeyA,
        'B' => KeyCode::KeyB,
        'C' => KeyCode::KeyC,
        'D' => KeyCode::KeyD,
        'E' => KeyCode::KeyE,
        'F' => KeyCode::KeyF,
        'G' => KeyCode::KeyG,
        'H' => KeyCode::KeyH,
        'I' => KeyCode::KeyI,
        'J' => KeyCode::KeyJ,
        'K' => KeyCode::KeyK,
        'L' => KeyCode::KeyL,
        'M' => KeyCode::KeyM,
        'N' => KeyCode::KeyN,
        'O' => KeyCode::KeyO,
        'P' => KeyCode::KeyP,
        'Q' => KeyCode::KeyQ,
        'R' => KeyCode::KeyR,
        'S' => KeyCode::KeyS,
        'T' => KeyCode::KeyT,
        'U' => KeyCode::KeyU,
        'V' => KeyCode::KeyV,
        'W' => KeyCode::KeyW,
        'X' => KeyCode::KeyX,
        'Y' => KeyCode::KeyY,
        'Z' => KeyCode::KeyZ,
        _ => return None,
    };
    Some(key)
}

// Re-export for convenience
pub use winit::keyboard::KeyCode;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letter_keys_map_to_uppercase() {
        assert_eq!(letter_for_key(KeyCode::KeyA), Some('A'));
        assert_eq!(letter_for_key(KeyCode::KeyZ), Some('Z'));
        assert_eq!(KeyPress::new(KeyCode::KeyQ).letter(), Some('Q'));
    }

    #[test]
    fn other_keys_have_no_letter() {
        assert_eq!(letter_for_key(KeyCode::Space), None);
        assert_eq!(letter_for_key(KeyCode::Digit1), None);
        assert_eq!(letter_for_key(KeyCode::Escape), None);
    }

    #[test]
    fn every_letter_round_trips_through_its_key() {
        for letter in 'A'..='Z' {
            let key = key_for_letter(letter).unwrap();
            assert_eq!(letter_for_key(key), Some(letter));
        }
        assert_eq!(key_for_letter('g'), Some(KeyCode::KeyG));
        assert_eq!(key_for_letter('!'), None);
    }

    #[test]
    fn repeated_press_keeps_flag() {
        let press = KeyPress::repeated(KeyCode::KeyB);
        assert!(press.repeat);
        assert_eq!(press.letter(), Some('B'));
    }
}
