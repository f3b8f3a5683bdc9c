//! Keyboard input latch for the flight controls.
//!
//! Host events write into an [`InputLatch`]; the per-frame update reads a
//! [`ControlState`] snapshot taken once at the start of the frame.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use winit::keyboard::{Key, NamedKey};

/// A flight control the pilot can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Control {
    Forward,
    Back,
    Left,
    Right,
    PitchUp,
    PitchDown,
    RollLeft,
    RollRight,
    Boost,
}

/// Held flags for every control, copied out of the latch once per frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlState {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    pub pitch_up: bool,
    pub pitch_down: bool,
    pub roll_left: bool,
    pub roll_right: bool,
    pub boost: bool,
}

impl ControlState {
    /// Build a state with exactly the given controls held.
    pub fn holding(controls: &[Control]) -> Self {
        let mut state = Self::default();
        for &control in controls {
            state.set(control, true);
        }
        state
    }

    /// Set the held flag of a control.
    pub fn set(&mut self, control: Control, held: bool) {
        let flag = match control {
            Control::Forward => &mut self.forward,
            Control::Back => &mut self.back,
            Control::Left => &mut self.left,
            Control::Right => &mut self.right,
            Control::PitchUp => &mut self.pitch_up,
            Control::PitchDown => &mut self.pitch_down,
            Control::RollLeft => &mut self.roll_left,
            Control::RollRight => &mut self.roll_right,
            Control::Boost => &mut self.boost,
        };
        *flag = held;
    }
}

/// One key identifier bound to one control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Binding {
    pub key: String,
    pub control: Control,
}

/// Key identifier to control table. A key may drive several controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Binding>", into = "Vec<Binding>")]
pub struct KeyBindings {
    bindings: Vec<Binding>,
}

impl From<Vec<Binding>> for KeyBindings {
    fn from(bindings: Vec<Binding>) -> Self {
        let bindings = bindings
            .into_iter()
            .map(|b| Binding {
                key: normalize_key(&b.key),
                control: b.control,
            })
            .collect();
        Self { bindings }
    }
}

impl From<KeyBindings> for Vec<Binding> {
    fn from(table: KeyBindings) -> Self {
        table.bindings
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::new([
            ("w", Control::Forward),
            ("arrowup", Control::Forward),
            ("s", Control::Back),
            ("arrowdown", Control::Back),
            ("a", Control::Left),
            ("d", Control::Right),
            ("arrowup", Control::PitchUp),
            ("arrowdown", Control::PitchDown),
            ("q", Control::RollLeft),
            ("e", Control::RollRight),
            (" ", Control::Boost),
        ])
    }
}

impl KeyBindings {
    /// Build a table from `(key, control)` pairs. Keys are lower-cased.
    pub fn new<'a>(pairs: impl IntoIterator<Item = (&'a str, Control)>) -> Self {
        let bindings = pairs
            .into_iter()
            .map(|(key, control)| Binding {
                key: normalize_key(key),
                control,
            })
            .collect();
        Self { bindings }
    }

    /// Controls driven by a (normalized) key.
    pub fn controls_for<'a>(&'a self, key: &'a str) -> impl Iterator<Item = Control> + 'a {
        self.bindings
            .iter()
            .filter(move |b| b.key == key)
            .map(|b| b.control)
    }

    /// Check if a (normalized) key drives any control.
    pub fn is_bound(&self, key: &str) -> bool {
        self.bindings.iter().any(|b| b.key == key)
    }
}

/// Latches the live held state of the bound keys.
///
/// Writes are latest-wins per key. Unbound keys are ignored.
#[derive(Debug, Clone, Default)]
pub struct InputLatch {
    bindings: KeyBindings,
    /// Bound keys currently held down (normalized identifiers).
    keys_held: HashSet<String>,
}

impl InputLatch {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            keys_held: HashSet::new(),
        }
    }

    /// Process a key press.
    pub fn on_key_down(&mut self, key: &str) {
        let key = normalize_key(key);
        if self.bindings.is_bound(&key) {
            self.keys_held.insert(key);
        } else {
            log::trace!("ignoring unbound key {:?}", key);
        }
    }

    /// Process a key release.
    pub fn on_key_up(&mut self, key: &str) {
        let key = normalize_key(key);
        self.keys_held.remove(&key);
    }

    /// Release every key (e.g. when the window loses focus).
    pub fn release_all(&mut self) {
        self.keys_held.clear();
    }

    /// Copy of the current control flags. A control is held while any key bound to it is held.
    pub fn snapshot(&self) -> ControlState {
        let mut state = ControlState::default();
        for key in &self.keys_held {
            for control in self.bindings.controls_for(key) {
                state.set(control, true);
            }
        }
        state
    }
}

/// Lower-case a key identifier before lookup.
pub fn normalize_key(key: &str) -> String {
    key.to_lowercase()
}

/// Map a winit logical key to the identifier used by [`KeyBindings`].
///
/// Named keys use their lower-cased name (`"arrowup"`); space maps to `" "`.
pub fn key_identifier(key: &Key) -> Option<String> {
    match key {
        Key::Character(text) => Some(normalize_key(text.as_str())),
        Key::Named(NamedKey::Space) => Some(" ".to_string()),
        Key::Named(NamedKey::ArrowUp) => Some("arrowup".to_string()),
        Key::Named(NamedKey::ArrowDown) => Some("arrowdown".to_string()),
        _ => None,
    }
}

// Re-export for convenience
pub use winit::event::ElementState;
