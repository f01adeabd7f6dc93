//! TUI runtime - owns the terminal, runs the frame loop, executes effects.
//!
//! The reducer stays pure and produces effects; this module executes them by
//! forwarding commands to the widget engine. Engine progress arrives on the
//! widget event channel and is drained into the reducer each frame.

use std::io::Stdout;
use std::time::Duration;

use anyhow::{Context, Result};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use vitrine_core::core::widget::{WidgetEventRx, WidgetHandle};

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::{render, terminal, update};

/// Poll duration while a spinner is animating.
const FRAME_DURATION: Duration = Duration::from_millis(33);

/// Poll duration when idle; longer timeout reduces CPU usage.
const IDLE_POLL_DURATION: Duration = Duration::from_millis(100);

/// Full-screen widget runtime.
///
/// Owns the terminal and state. The terminal is restored on drop, so a panic
/// inside the loop (after the hook fires) or an early `?` return cannot leave
/// the user's shell in raw mode.
pub struct WidgetRuntime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    pub state: AppState,
    handle: WidgetHandle,
    events: WidgetEventRx,
}

impl WidgetRuntime {
    /// Creates a new runtime, taking over the terminal.
    pub fn new(handle: WidgetHandle, events: WidgetEventRx) -> Result<Self> {
        // Set up panic hook BEFORE entering the alternate screen.
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        Ok(Self {
            terminal,
            state: AppState::new(),
            handle,
            events,
        })
    }

    /// Runs the main event loop until the user quits.
    ///
    /// Each iteration processes at most one poll window of events plus a
    /// tick, then redraws; the poll timeout caps the frame rate.
    pub fn run(&mut self) -> Result<()> {
        while !self.state.should_quit {
            let mut events = self.collect_events()?;
            events.push(UiEvent::Tick);

            for event in events {
                let effects = update::update(&mut self.state, event);
                self.execute_effects(effects);
            }

            self.terminal.draw(|frame| {
                render::render(&self.state, frame);
            })?;
        }

        Ok(())
    }

    /// Collects events from the engine channel and the terminal.
    ///
    /// Blocks on terminal polling up to one tick so the loop stays cheap when
    /// idle but responsive while spinners run.
    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        // Drain engine progress first so renders reflect the newest state.
        while let Ok(event) = self.events.try_recv() {
            events.push(UiEvent::Widget(event));
        }

        let spinner_active =
            matches!(self.state.phase, crate::state::Phase::Loading) || self.state.input.adding;
        let poll_duration = if events.is_empty() {
            if spinner_active {
                FRAME_DURATION
            } else {
                IDLE_POLL_DURATION
            }
        } else {
            Duration::ZERO
        };

        if crossterm::event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(crossterm::event::read()?));
            // Drain any burst of input without blocking.
            while crossterm::event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(crossterm::event::read()?));
            }
        }

        Ok(events)
    }

    fn execute_effects(&self, effects: Vec<UiEffect>) {
        for effect in effects {
            match effect {
                UiEffect::Submit { name } => self.handle.add_product(name),
                UiEffect::Reload => self.handle.reload(),
            }
        }
    }
}

impl Drop for WidgetRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
        self.handle.abort();
    }
}
