//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(state, event)`
//! and executes the returned effects.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use vitrine_core::core::events::WidgetEvent;

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::{AppState, Phase};

/// The main reducer function.
pub fn update(state: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            state.spinner_frame = state.spinner_frame.wrapping_add(1);
            vec![]
        }
        UiEvent::Terminal(terminal_event) => handle_terminal_event(state, &terminal_event),
        UiEvent::Widget(widget_event) => handle_widget_event(state, widget_event),
    }
}

/// Applies engine progress to the mirrored state.
///
/// The error banner is only cleared on `LoadStarted` - a credential error
/// stays visible until the first load actually begins.
fn handle_widget_event(state: &mut AppState, event: WidgetEvent) -> Vec<UiEffect> {
    match event {
        WidgetEvent::AuthAccepted => {
            state.authenticated = true;
        }
        WidgetEvent::AuthRejected { error } => {
            state.error = Some(error);
        }
        WidgetEvent::GraceExpired => {
            if state.phase == Phase::Loading {
                state.phase = Phase::AwaitingAuth;
            }
        }
        WidgetEvent::LoadStarted => {
            state.phase = Phase::Loading;
            state.error = None;
        }
        WidgetEvent::LoadCompleted { products } => {
            state.products = products;
            state.phase = Phase::Ready;
        }
        WidgetEvent::LoadFailed { error } => {
            state.error = Some(error);
            state.phase = Phase::Ready;
        }
        WidgetEvent::AddStarted => {
            state.input.adding = true;
        }
        WidgetEvent::AddCompleted => {
            state.input.adding = false;
            state.input.clear();
        }
        WidgetEvent::AddFailed { error } => {
            state.input.adding = false;
            state.error = Some(error);
        }
    }
    vec![]
}

fn handle_terminal_event(state: &mut AppState, event: &Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(state, key),
        _ => vec![],
    }
}

fn handle_key(state: &mut AppState, key: &KeyEvent) -> Vec<UiEffect> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') => state.should_quit = true,
            KeyCode::Char('r') if state.authenticated => return vec![UiEffect::Reload],
            _ => {}
        }
        return vec![];
    }

    match key.code {
        KeyCode::Enter => submit(state),
        // The field is disabled while an insert is in flight.
        KeyCode::Char(ch) if !state.input.adding => {
            state.input.insert(ch);
            vec![]
        }
        KeyCode::Backspace if !state.input.adding => {
            state.input.backspace();
            vec![]
        }
        KeyCode::Left => {
            state.input.move_left();
            vec![]
        }
        KeyCode::Right => {
            state.input.move_right();
            vec![]
        }
        _ => vec![],
    }
}

/// Submit guard: no client, blank name, or an in-flight insert all no-op.
fn submit(state: &mut AppState) -> Vec<UiEffect> {
    if state.input.adding || !state.authenticated || state.input.value.trim().is_empty() {
        return vec![];
    }
    vec![UiEffect::Submit {
        name: state.input.value.clone(),
    }]
}

#[cfg(test)]
mod tests {
    use vitrine_types::Product;

    use super::*;

    fn key(code: KeyCode) -> UiEvent {
        UiEvent::Terminal(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    fn ctrl(ch: char) -> UiEvent {
        UiEvent::Terminal(Event::Key(KeyEvent::new(
            KeyCode::Char(ch),
            KeyModifiers::CONTROL,
        )))
    }

    fn type_text(state: &mut AppState, text: &str) {
        for ch in text.chars() {
            update(state, key(KeyCode::Char(ch)));
        }
    }

    fn product(id: i64, name: &str) -> Product {
        Product {
            id,
            name: name.to_string(),
            created_at: "2024-01-01T00:00:00Z".parse().unwrap(),
        }
    }

    #[test]
    fn submit_requires_client_and_non_blank_name() {
        let mut state = AppState::new();
        type_text(&mut state, "Lamp");
        assert_eq!(update(&mut state, key(KeyCode::Enter)), vec![]);

        state.authenticated = true;
        assert_eq!(
            update(&mut state, key(KeyCode::Enter)),
            vec![UiEffect::Submit {
                name: "Lamp".to_string()
            }]
        );
    }

    #[test]
    fn blank_submit_is_a_no_op() {
        let mut state = AppState::new();
        state.authenticated = true;
        type_text(&mut state, "   ");
        assert_eq!(update(&mut state, key(KeyCode::Enter)), vec![]);
        assert_eq!(state.input.value, "   ");
    }

    #[test]
    fn submit_disabled_while_adding() {
        let mut state = AppState::new();
        state.authenticated = true;
        type_text(&mut state, "Lamp");
        update(&mut state, UiEvent::Widget(WidgetEvent::AddStarted));

        assert_eq!(update(&mut state, key(KeyCode::Enter)), vec![]);
        // Typing is disabled too.
        update(&mut state, key(KeyCode::Char('x')));
        assert_eq!(state.input.value, "Lamp");
    }

    #[test]
    fn add_completed_clears_the_input() {
        let mut state = AppState::new();
        state.authenticated = true;
        type_text(&mut state, "Lamp");
        update(&mut state, UiEvent::Widget(WidgetEvent::AddStarted));
        assert!(state.input.adding);

        update(&mut state, UiEvent::Widget(WidgetEvent::AddCompleted));
        assert!(!state.input.adding);
        assert_eq!(state.input.value, "");
    }

    #[test]
    fn add_failure_keeps_input_and_sets_error() {
        let mut state = AppState::new();
        state.authenticated = true;
        type_text(&mut state, "Lamp");
        update(&mut state, UiEvent::Widget(WidgetEvent::AddStarted));
        update(
            &mut state,
            UiEvent::Widget(WidgetEvent::AddFailed {
                error: "Falha ao adicionar produto: duplicado".to_string(),
            }),
        );

        assert!(!state.input.adding);
        assert_eq!(state.input.value, "Lamp");
        assert_eq!(
            state.error.as_deref(),
            Some("Falha ao adicionar produto: duplicado")
        );
    }

    #[test]
    fn load_replaces_collection_wholesale() {
        let mut state = AppState::new();
        state.products = vec![product(1, "Velho")];

        update(&mut state, UiEvent::Widget(WidgetEvent::LoadStarted));
        assert_eq!(state.phase, Phase::Loading);

        update(
            &mut state,
            UiEvent::Widget(WidgetEvent::LoadCompleted {
                products: vec![product(2, "Chair"), product(3, "Desk")],
            }),
        );
        assert_eq!(state.phase, Phase::Ready);
        assert_eq!(state.products.len(), 2);
        assert_eq!(state.products[0].name, "Chair");

        update(
            &mut state,
            UiEvent::Widget(WidgetEvent::LoadCompleted {
                products: Vec::new(),
            }),
        );
        assert!(state.products.is_empty());
    }

    #[test]
    fn credential_error_persists_until_load_starts() {
        let mut state = AppState::new();
        update(
            &mut state,
            UiEvent::Widget(WidgetEvent::AuthRejected {
                error: "Token de autenticação não recebido.".to_string(),
            }),
        );
        assert!(state.error.is_some());

        // A later valid credential does not clear the banner by itself.
        update(&mut state, UiEvent::Widget(WidgetEvent::AuthAccepted));
        assert!(state.error.is_some());

        // The automatically triggered load does.
        update(&mut state, UiEvent::Widget(WidgetEvent::LoadStarted));
        assert!(state.error.is_none());
    }

    #[test]
    fn grace_expiry_only_leaves_the_loading_view() {
        let mut state = AppState::new();
        update(&mut state, UiEvent::Widget(WidgetEvent::GraceExpired));
        assert_eq!(state.phase, Phase::AwaitingAuth);

        state.phase = Phase::Ready;
        update(&mut state, UiEvent::Widget(WidgetEvent::GraceExpired));
        assert_eq!(state.phase, Phase::Ready);
    }

    #[test]
    fn ctrl_r_reloads_only_when_authenticated() {
        let mut state = AppState::new();
        assert_eq!(update(&mut state, ctrl('r')), vec![]);

        state.authenticated = true;
        assert_eq!(update(&mut state, ctrl('r')), vec![UiEffect::Reload]);
    }

    #[test]
    fn ctrl_c_quits() {
        let mut state = AppState::new();
        update(&mut state, ctrl('c'));
        assert!(state.should_quit);
    }
}
