//! Events processed by the TUI reducer.

use vitrine_core::core::events::WidgetEvent;

/// Everything that can change TUI state.
#[derive(Debug)]
pub enum UiEvent {
    /// Frame tick; advances the spinner.
    Tick,
    /// Raw terminal input.
    Terminal(crossterm::event::Event),
    /// Engine progress, drained from the widget event channel.
    Widget(WidgetEvent),
}
