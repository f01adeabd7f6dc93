//! The widget engine.
//!
//! A single task that owns the handshake and data synchronization: it
//! receives credential messages through a [`WidgetPort`], constructs store
//! clients through the injected [`StoreFactory`], fetches and re-fetches the
//! product collection, and reports everything as [`WidgetEvent`]s over an
//! async channel. No rendering happens here; the TUI and the non-interactive
//! host are both thin consumers of the same event stream.
//!
//! Load and add run to completion inside the task, so operations are
//! sequential: commands arriving mid-operation queue up on the command
//! channel.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};
use vitrine_types::{Notification, ParentMessage, WidgetMessage};

use crate::core::events::WidgetEvent;
use crate::core::frame::WidgetPort;
use crate::store::{ProductStore, StoreFactory};

/// Commands the host or UI can send to a running widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetCommand {
    /// Insert a product. Blank names and missing credentials make this a
    /// no-op with no state change.
    AddProduct { name: String },
    /// Re-fetch the collection. Ignored without a credential.
    Reload,
}

/// Channel-based event receiver for widget events.
pub type WidgetEventRx = mpsc::UnboundedReceiver<WidgetEvent>;

/// Handle to a spawned widget engine.
///
/// Dropping the handle closes the command channel; the engine exits once the
/// parent link is gone as well.
pub struct WidgetHandle {
    commands: mpsc::UnboundedSender<WidgetCommand>,
    task: JoinHandle<()>,
}

impl WidgetHandle {
    /// Sends an add command for the given (possibly untrimmed) name.
    pub fn add_product(&self, name: impl Into<String>) {
        self.send(WidgetCommand::AddProduct { name: name.into() });
    }

    /// Requests a re-fetch of the product collection.
    pub fn reload(&self) {
        self.send(WidgetCommand::Reload);
    }

    /// Sends a raw command to the engine.
    pub fn send(&self, command: WidgetCommand) {
        let _ = self.commands.send(command);
    }

    /// Closes the command channel and waits for the engine to finish.
    ///
    /// The engine only exits once the parent port is also dropped.
    pub async fn shutdown(self) {
        drop(self.commands);
        let _ = self.task.await;
    }

    /// Aborts the engine task immediately.
    pub fn abort(&self) {
        self.task.abort();
    }
}

/// Spawns the widget engine.
///
/// Posts `APP_LOADED` to the parent exactly once on start, then serves
/// messages and commands until both channels close. `grace` bounds how long
/// the widget waits for a credential before emitting
/// [`WidgetEvent::GraceExpired`].
pub fn spawn_widget(
    factory: Arc<dyn StoreFactory>,
    port: WidgetPort,
    grace: Duration,
) -> (WidgetHandle, WidgetEventRx) {
    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let (event_tx, event_rx) = mpsc::unbounded_channel();

    let engine = Engine {
        factory,
        port,
        events: event_tx,
        store: None,
    };
    let task = tokio::spawn(run(engine, command_rx, grace));

    (
        WidgetHandle {
            commands: command_tx,
            task,
        },
        event_rx,
    )
}

struct Engine {
    factory: Arc<dyn StoreFactory>,
    port: WidgetPort,
    events: mpsc::UnboundedSender<WidgetEvent>,
    /// The authenticated client handle; presence is the single source of
    /// "authenticated" state.
    store: Option<Arc<dyn ProductStore>>,
}

async fn run(
    mut engine: Engine,
    mut commands: mpsc::UnboundedReceiver<WidgetCommand>,
    grace: Duration,
) {
    engine.port.post(WidgetMessage::AppLoaded);

    let grace_timer = tokio::time::sleep(grace);
    tokio::pin!(grace_timer);
    let mut grace_armed = true;
    let mut port_open = true;
    let mut commands_open = true;

    while port_open || commands_open {
        tokio::select! {
            () = &mut grace_timer, if grace_armed => {
                grace_armed = false;
                if engine.store.is_none() {
                    debug!("no credential within grace period");
                    engine.emit(WidgetEvent::GraceExpired);
                }
            }
            message = engine.port.recv(), if port_open => match message {
                Some(message) => engine.handle_message(message).await,
                None => port_open = false,
            },
            command = commands.recv(), if commands_open => match command {
                Some(command) => engine.handle_command(command).await,
                None => commands_open = false,
            },
        }
    }
}

impl Engine {
    fn emit(&self, event: WidgetEvent) {
        let _ = self.events.send(event);
    }

    fn notify(&self, notification: Notification) {
        self.port
            .post(WidgetMessage::ShowNotification(notification));
    }

    async fn handle_message(&mut self, message: ParentMessage) {
        match message {
            ParentMessage::AuthToken(token) => {
                let token = token.unwrap_or_default();
                if token.is_empty() {
                    self.emit(WidgetEvent::AuthRejected {
                        error: "Token de autenticação não recebido.".to_string(),
                    });
                    return;
                }

                // One client per accepted credential message; a later message
                // replaces the handle wholesale.
                let store = self.factory.connect(&token);
                self.store = Some(store);
                info!("authenticated store client constructed");
                self.emit(WidgetEvent::AuthAccepted);
                self.load().await;
            }
        }
    }

    async fn handle_command(&mut self, command: WidgetCommand) {
        match command {
            WidgetCommand::AddProduct { name } => self.add(&name).await,
            WidgetCommand::Reload => self.load().await,
        }
    }

    async fn load(&mut self) {
        let Some(store) = self.store.clone() else {
            return;
        };

        self.emit(WidgetEvent::LoadStarted);
        match store.list_products().await {
            Ok(products) => {
                debug!(count = products.len(), "product collection replaced");
                self.emit(WidgetEvent::LoadCompleted { products });
            }
            Err(err) => {
                let detail = err.to_string();
                self.emit(WidgetEvent::LoadFailed {
                    error: format!("Falha ao carregar produtos: {detail}"),
                });
                self.notify(Notification::error(format!("Erro: {detail}")));
            }
        }
    }

    async fn add(&mut self, name: &str) {
        let Some(store) = self.store.clone() else {
            return;
        };
        let name = name.trim();
        if name.is_empty() {
            return;
        }

        self.emit(WidgetEvent::AddStarted);
        match store.insert_product(name).await {
            Ok(()) => {
                self.emit(WidgetEvent::AddCompleted);
                self.notify(Notification::success("Produto adicionado!"));
                self.load().await;
            }
            Err(err) => {
                let detail = err.to_string();
                self.emit(WidgetEvent::AddFailed {
                    error: format!("Falha ao adicionar produto: {detail}"),
                });
                self.notify(Notification::error(format!("Erro: {detail}")));
            }
        }
    }
}
