//! Test utilities for the terminal front end
//!
//! - [`key`]: build a `KeyEvent` from a string such as `"ctrl+c"`
//! - [`RenderHarness`]: render into a `TestBackend` and read the buffer back
//! - [`ActionAssertions`]: assertions over actions returned by components
//!
//! ```ignore
//! use geoweather_tui::testing::*;
//!
//! let mut render = RenderHarness::new(80, 24);
//! let output = render.render_to_string_plain(|frame| {
//!     view.render(frame, frame.area(), AppViewProps { state: &state });
//! });
//! assert!(output.contains("Latitude: 35"));
//! ```

use std::fmt::Debug;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{backend::TestBackend, buffer::Buffer, Frame, Terminal};

/// Parse a key description like `"q"`, `"enter"` or `"ctrl+c"`.
///
/// A lone `"+"` is the plus key, not a separator.
pub fn parse_key(s: &str) -> Option<KeyEvent> {
    let (mods, code) = match s.rsplit_once('+') {
        Some((mods, code)) if !mods.is_empty() && !code.is_empty() => (Some(mods), code),
        _ => (None, s),
    };

    let mut modifiers = KeyModifiers::NONE;
    for part in mods.into_iter().flat_map(|m| m.split('+')) {
        modifiers |= match part.to_ascii_lowercase().as_str() {
            "ctrl" | "control" => KeyModifiers::CONTROL,
            "alt" => KeyModifiers::ALT,
            "shift" => KeyModifiers::SHIFT,
            _ => return None,
        };
    }

    let code = match code.to_ascii_lowercase().as_str() {
        "enter" | "return" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "backspace" => KeyCode::Backspace,
        "space" => KeyCode::Char(' '),
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        _ => {
            let mut chars = code.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c),
                _ => return None,
            }
        }
    };

    Some(KeyEvent::new(code, modifiers))
}

/// Create a `KeyEvent` from a key string.
///
/// # Panics
///
/// Panics if the key string cannot be parsed.
pub fn key(s: &str) -> KeyEvent {
    parse_key(s).unwrap_or_else(|| panic!("Invalid key string: {:?}", s))
}

/// Renders into an in-memory terminal
pub struct RenderHarness {
    terminal: Terminal<TestBackend>,
}

impl RenderHarness {
    pub fn new(width: u16, height: u16) -> Self {
        let terminal =
            Terminal::new(TestBackend::new(width, height)).expect("test backend never fails");
        Self { terminal }
    }

    /// Draw one frame and return the resulting buffer
    pub fn render<F>(&mut self, render: F) -> &Buffer
    where
        F: FnOnce(&mut Frame),
    {
        self.terminal.draw(render).expect("test backend never fails");
        self.terminal.backend().buffer()
    }

    /// Draw one frame and return its text, one line per row, styles dropped
    pub fn render_to_string_plain<F>(&mut self, render: F) -> String
    where
        F: FnOnce(&mut Frame),
    {
        buffer_to_string_plain(self.render(render))
    }
}

pub fn buffer_to_string_plain(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut out = String::with_capacity(usize::from(area.width + 1) * usize::from(area.height));
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

/// Assertions over the actions a component returned
pub trait ActionAssertions<A> {
    fn assert_empty(&self);
    fn assert_count(&self, n: usize);
    fn assert_first(&self, expected: A);
    fn assert_contains(&self, expected: A);
}

impl<A: PartialEq + Debug> ActionAssertions<A> for Vec<A> {
    fn assert_empty(&self) {
        assert!(self.is_empty(), "expected no actions, got {:?}", self);
    }

    fn assert_count(&self, n: usize) {
        assert_eq!(self.len(), n, "unexpected action count: {:?}", self);
    }

    fn assert_first(&self, expected: A) {
        assert_eq!(self.first(), Some(&expected), "actions: {:?}", self);
    }

    fn assert_contains(&self, expected: A) {
        assert!(
            self.contains(&expected),
            "expected {:?} in {:?}",
            expected,
            self
        );
    }
}
