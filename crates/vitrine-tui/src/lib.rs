//! Full-screen terminal presentation for the vitrine widget.

pub mod common;
pub mod effects;
pub mod events;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, stderr};

use anyhow::Result;
use vitrine_core::core::widget::{WidgetEventRx, WidgetHandle};

pub use runtime::WidgetRuntime;

/// Runs the interactive widget until the user quits.
///
/// The engine must already be spawned; this takes its command handle and
/// event stream and owns the terminal for the duration.
pub fn run_widget(handle: WidgetHandle, events: WidgetEventRx) -> Result<()> {
    // The widget needs a terminal to render into.
    if !stderr().is_terminal() {
        anyhow::bail!(
            "Interactive mode requires a terminal.\n\
             Use `vitrine exec` for non-interactive execution."
        );
    }

    let mut runtime = WidgetRuntime::new(handle, events)?;
    runtime.run()
}
