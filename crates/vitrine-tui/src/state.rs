//! Application state for the widget TUI.
//!
//! The render-state machine is explicit: [`Phase`] plus the product
//! collection project into the four mutually exclusive views (see
//! `render::WidgetView`), so "loading with an error banner" is representable
//! but "loading and ready" is not.

use vitrine_types::Product;

/// Where the widget is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the first load (or for credentials, early on).
    Loading,
    /// The grace period elapsed without a credential.
    AwaitingAuth,
    /// A load finished (successfully or not); the collection is current.
    Ready,
}

/// User input state for the add-product field.
#[derive(Debug, Default)]
pub struct InputState {
    /// Current field contents.
    pub value: String,
    /// Cursor position in characters.
    pub cursor: usize,
    /// An insert is in flight; the field and submit are disabled.
    pub adding: bool,
}

impl InputState {
    pub fn insert(&mut self, ch: char) {
        let at = byte_index(&self.value, self.cursor);
        self.value.insert(at, ch);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let at = byte_index(&self.value, self.cursor);
        self.value.remove(at);
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.value.chars().count());
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }
}

fn byte_index(value: &str, char_index: usize) -> usize {
    value
        .char_indices()
        .nth(char_index)
        .map_or(value.len(), |(index, _)| index)
}

/// Widget TUI state, mutated only by the reducer.
pub struct AppState {
    /// Flag indicating the app should quit.
    pub should_quit: bool,
    /// Lifecycle phase.
    pub phase: Phase,
    /// Local copy of the collection, replaced wholesale on every load.
    pub products: Vec<Product>,
    /// Error banner text; persists until the next operation starts.
    pub error: Option<String>,
    /// An authenticated client exists (mirrored from engine events).
    pub authenticated: bool,
    /// Add-product field state.
    pub input: InputState,
    /// Spinner animation frame counter.
    pub spinner_frame: usize,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            should_quit: false,
            phase: Phase::Loading,
            products: Vec::new(),
            error: None,
            authenticated: false,
            input: InputState::default(),
            spinner_frame: 0,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
